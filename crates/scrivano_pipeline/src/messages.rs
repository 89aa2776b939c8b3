//! Payloads carried on the stage channels.

use scrivano_core::{EnhancedBrief, GenerationOptions, GenerationRequest, RequestId};

/// Intake → enhancement payload.
#[derive(Debug, Clone)]
pub struct EnhanceJob {
    /// Identifier minted at intake
    pub id: RequestId,
    /// The accepted request
    pub request: GenerationRequest,
}

/// Enhancement → generation payload.
#[derive(Debug, Clone)]
pub struct GenerateJob {
    /// Identifier minted at intake
    pub id: RequestId,
    /// The original request, unchanged
    pub request: GenerationRequest,
    /// The enrichment brief (possibly degraded or fallback)
    pub brief: EnhancedBrief,
    /// Effective generation options
    pub options: GenerationOptions,
}

/// Generation → synthesis payload: the identifier alone. The synthesis stage
/// reloads the article from the store rather than trusting channel state.
#[derive(Debug, Clone)]
pub struct SynthesisJob {
    /// Identifier of the persisted article
    pub id: RequestId,
}
