//! Top-level error wrapper types.

use crate::{
    CollaboratorError, ConfigError, JsonError, PipelineError, StoreError, ValidationError,
};

/// This is the foundation error enum for the Scrivano workspace.
///
/// # Examples
///
/// ```
/// use scrivano_error::{ScrivanoError, ConfigError};
///
/// let config_err = ConfigError::new("Missing listen address");
/// let err: ScrivanoError = config_err.into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum ScrivanoErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Intake validation error
    #[from(ValidationError)]
    Validation(ValidationError),
    /// Keyed store error
    #[from(StoreError)]
    Store(StoreError),
    /// External collaborator error
    #[from(CollaboratorError)]
    Collaborator(CollaboratorError),
    /// Pipeline stage error
    #[from(PipelineError)]
    Pipeline(PipelineError),
}

/// Scrivano error with kind discrimination.
///
/// # Examples
///
/// ```
/// use scrivano_error::{ScrivanoResult, JsonError};
///
/// fn might_fail() -> ScrivanoResult<()> {
///     Err(JsonError::new("trailing characters"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Scrivano Error: {}", _0)]
pub struct ScrivanoError(Box<ScrivanoErrorKind>);

impl ScrivanoError {
    /// Create a new error from a kind.
    pub fn new(kind: ScrivanoErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ScrivanoErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to ScrivanoErrorKind
impl<T> From<T> for ScrivanoError
where
    T: Into<ScrivanoErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Scrivano operations.
pub type ScrivanoResult<T> = std::result::Result<T, ScrivanoError>;
