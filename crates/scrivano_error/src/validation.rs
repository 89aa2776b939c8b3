//! Request validation error types.

/// Kinds of intake validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ValidationErrorKind {
    /// Topic is missing or blank
    #[display("Topic must be a non-empty string")]
    EmptyTopic,
    /// Keyword list is empty
    #[display("At least one keyword is required")]
    EmptyKeywords,
    /// Topic is too short to work with
    #[display("Topic must be at least {} characters", _0)]
    TopicTooShort(usize),
    /// Word count target must be positive
    #[display("Word count must be a positive integer (got {})", _0)]
    InvalidWordCount(u32),
    /// Section count target must be positive
    #[display("Section count must be a positive integer (got {})", _0)]
    InvalidSectionCount(u32),
}

/// Validation error with source location tracking.
///
/// # Examples
///
/// ```
/// use scrivano_error::{ValidationError, ValidationErrorKind};
///
/// let err = ValidationError::new(ValidationErrorKind::EmptyTopic);
/// assert!(format!("{}", err).contains("non-empty"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Validation Error: {} at line {} in {}", kind, line, file)]
pub struct ValidationError {
    /// The kind of error that occurred
    pub kind: ValidationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ValidationError {
    /// Create a new ValidationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ValidationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
