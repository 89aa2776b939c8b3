//! Tracing and OpenTelemetry wiring for the pipeline binary.

use opentelemetry::{KeyValue, trace::TracerProvider as _};
use opentelemetry_sdk::{
    Resource,
    trace::{RandomIdGenerator, Sampler, TracerProvider},
};
use opentelemetry_stdout::SpanExporter;
use scrivano_error::ConfigError;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber.
///
/// Spans go to two layers: a human-readable fmt layer and an OpenTelemetry
/// layer backed by the stdout span exporter, tagged with the `scrivano`
/// service name. Both layers honor `RUST_LOG`.
///
/// # Errors
///
/// Returns an error when a global subscriber is already installed.
pub fn init_telemetry() -> Result<(), ConfigError> {
    let provider = TracerProvider::builder()
        .with_simple_exporter(SpanExporter::default())
        .with_id_generator(RandomIdGenerator::default())
        .with_sampler(Sampler::AlwaysOn)
        .with_resource(Resource::new(vec![KeyValue::new(
            "service.name",
            "scrivano",
        )]))
        .build();

    let telemetry_layer = tracing_opentelemetry::layer()
        .with_tracer(provider.tracer("scrivano"))
        .with_filter(EnvFilter::from_default_env());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_filter(EnvFilter::from_default_env());

    tracing_subscriber::registry()
        .with(telemetry_layer)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| ConfigError::new(format!("Failed to install tracing subscriber: {}", e)))
}

/// Flush pending spans and tear down the global tracer provider.
///
/// Call once, right before process exit.
pub fn shutdown_telemetry() {
    opentelemetry::global::shutdown_tracer_provider();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_reports_config_error() {
        // Whether the first call wins depends on test ordering in the
        // process; the second is guaranteed to find a subscriber installed
        let _ = init_telemetry();
        let err = init_telemetry().unwrap_err();
        assert!(format!("{}", err).contains("tracing subscriber"));
    }
}
