//! Pipeline stage error types.

/// Kinds of pipeline errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PipelineErrorKind {
    /// A stage channel was closed before the payload could be enqueued
    #[display("Stage channel closed: {}", _0)]
    ChannelClosed(String),
    /// A stage queue is at capacity and cannot accept the payload
    #[display("Stage queue full: {}", _0)]
    QueueFull(String),
    /// The article a stage depends on was never persisted
    #[display("Article missing for request {}", _0)]
    MissingArticle(String),
    /// A persisted article is structurally incomplete
    #[display("Article for request {} is incomplete: {}", id, reason)]
    IncompleteArticle {
        /// Request identifier of the broken article
        id: String,
        /// What is missing
        reason: String,
    },
}

/// Pipeline error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Pipeline Error: {} at line {} in {}", kind, line, file)]
pub struct PipelineError {
    /// The kind of error that occurred
    pub kind: PipelineErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl PipelineError {
    /// Create a new PipelineError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PipelineErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
