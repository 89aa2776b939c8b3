//! HTTP client poller for generation results.
//!
//! Polls the content endpoint at a fixed interval and reports one of three
//! outcomes, keeping "article without audio" distinguishable from a timeout.

use scrivano_core::RequestId;
use serde_json::Value as JsonValue;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Terminal poll outcome.
#[derive(Debug, Clone)]
pub enum PollOutcome {
    /// Article and audio both arrived
    Complete(JsonValue),
    /// The article arrived but audio never did; a partial success, since the
    /// article is readable without narration
    ArticleOnly(JsonValue),
    /// The article never appeared within the attempt budget
    TimedOut,
}

/// Fixed-interval poller against a running Scrivano server.
///
/// # Example
///
/// ```no_run
/// use scrivano_server::{ContentPoller, PollOutcome};
/// use scrivano_core::RequestId;
/// use std::time::Duration;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let poller = ContentPoller::new("http://localhost:3000", Duration::from_secs(5), 60);
/// # let id = RequestId::mint();
/// match poller.poll(&id).await? {
///     PollOutcome::Complete(content) => println!("done: {}", content["article"]["title"]),
///     PollOutcome::ArticleOnly(_) => println!("article ready, audio failed or pending"),
///     PollOutcome::TimedOut => println!("gave up"),
/// }
/// # Ok(())
/// # }
/// ```
pub struct ContentPoller {
    client: reqwest::Client,
    base_url: String,
    interval: Duration,
    max_attempts: u32,
}

impl ContentPoller {
    /// Create a poller for the given server.
    pub fn new(base_url: impl Into<String>, interval: Duration, max_attempts: u32) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            interval,
            max_attempts,
        }
    }

    /// Poll until the result is complete or the attempt budget runs out.
    ///
    /// # Errors
    ///
    /// Returns error only for transport failures; not-yet-ready responses are
    /// part of the protocol, not errors.
    #[instrument(skip(self), fields(id = %id, max_attempts = self.max_attempts))]
    pub async fn poll(&self, id: &RequestId) -> Result<PollOutcome, reqwest::Error> {
        let url = format!("{}/api/content/{}", self.base_url, id);
        let mut last_article: Option<JsonValue> = None;

        for attempt in 1..=self.max_attempts {
            let response = self.client.get(&url).send().await?;

            if response.status().is_success() {
                let content: JsonValue = response.json().await?;
                if content.get("audio").is_some() {
                    info!(attempt, "Content complete with audio");
                    return Ok(PollOutcome::Complete(content));
                }
                debug!(attempt, "Article ready, audio pending");
                last_article = Some(content);
            } else {
                debug!(attempt, status = %response.status(), "Content not ready");
            }

            if attempt < self.max_attempts {
                tokio::time::sleep(self.interval).await;
            }
        }

        match last_article {
            Some(content) => {
                warn!("Audio never appeared; returning article alone");
                Ok(PollOutcome::ArticleOnly(content))
            }
            None => {
                warn!("Content never appeared");
                Ok(PollOutcome::TimedOut)
            }
        }
    }
}
