//! Keyed store error types.

/// Kinds of store errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StoreErrorKind {
    /// A cell was written twice; cells are write-once
    #[display("Cell {}:{} already written", namespace, id)]
    AlreadyWritten {
        /// Namespace of the duplicated write
        namespace: String,
        /// Request identifier of the duplicated write
        id: String,
    },
    /// Failed to serialize a value for storage
    #[display("Failed to encode value: {}", _0)]
    Encode(String),
    /// Failed to deserialize a stored value
    #[display("Failed to decode value: {}", _0)]
    Decode(String),
    /// Backing filesystem operation failed
    #[display("Storage I/O failed: {}", _0)]
    Io(String),
}

/// Store error with location tracking.
///
/// # Examples
///
/// ```
/// use scrivano_error::{StoreError, StoreErrorKind};
///
/// let err = StoreError::new(StoreErrorKind::Io("disk full".to_string()));
/// assert!(format!("{}", err).contains("disk full"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Store Error: {} at line {} in {}", kind, line, file)]
pub struct StoreError {
    /// The kind of error that occurred
    pub kind: StoreErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StoreError {
    /// Create a new StoreError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StoreErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
