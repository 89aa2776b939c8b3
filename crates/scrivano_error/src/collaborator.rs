//! Collaborator (external AI service) error types and transience classification.

/// Kinds of collaborator call failures.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum CollaboratorErrorKind {
    /// API key not found in environment
    #[display("GEMINI_API_KEY environment variable not set")]
    MissingApiKey,
    /// Failed to create the provider client
    #[display("Failed to create collaborator client: {}", _0)]
    ClientCreation(String),
    /// API request failed
    #[display("Collaborator request failed: {}", _0)]
    ApiRequest(String),
    /// HTTP error with status code and message
    #[display("HTTP {} error: {}", status_code, message)]
    HttpError {
        /// HTTP status code
        status_code: u16,
        /// Error message
        message: String,
    },
    /// The collaborator returned no usable payload
    #[display("Empty response from collaborator: {}", _0)]
    EmptyResponse(String),
    /// Base64 decoding of an audio payload failed
    #[display("Base64 decode error: {}", _0)]
    Base64Decode(String),
}

/// Collaborator error with source location tracking.
///
/// # Examples
///
/// ```
/// use scrivano_error::{CollaboratorError, CollaboratorErrorKind};
///
/// let err = CollaboratorError::new(CollaboratorErrorKind::MissingApiKey);
/// assert!(format!("{}", err).contains("GEMINI_API_KEY"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Collaborator Error: {} at line {} in {}", kind, line, file)]
pub struct CollaboratorError {
    /// The kind of error that occurred
    pub kind: CollaboratorErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl CollaboratorError {
    /// Create a new CollaboratorError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: CollaboratorErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Trait for errors whose transience can be judged against a marker list.
///
/// Collaborator failure messages are provider-specific free text. Whether a
/// failure is worth retrying is decided by matching known substrings
/// (case-insensitive) against the message. The marker list is configuration,
/// not a hard invariant; callers supply it from their retry policy.
///
/// # Examples
///
/// ```
/// use scrivano_error::{CollaboratorError, CollaboratorErrorKind, TransientError};
///
/// let err = CollaboratorError::new(CollaboratorErrorKind::ApiRequest(
///     "The model is overloaded. Please try again later.".to_string(),
/// ));
/// assert!(err.matches_markers(&["overloaded".to_string()]));
/// assert!(!err.matches_markers(&["quota exceeded".to_string()]));
/// ```
pub trait TransientError {
    /// Returns true if the error message contains any of the given markers,
    /// compared case-insensitively.
    fn matches_markers(&self, markers: &[String]) -> bool;
}

impl TransientError for CollaboratorError {
    fn matches_markers(&self, markers: &[String]) -> bool {
        let message = self.kind.to_string().to_lowercase();
        markers
            .iter()
            .any(|marker| message.contains(&marker.to_lowercase()))
    }
}
