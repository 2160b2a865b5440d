//! Error types for document formatting.

/// Errors converting a document to or from text.
///
/// Recoverable: callers get the parse location instead of a silent default.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// The supplied text is not a well-formed JSON document.
    #[error("malformed document at line {line}, column {column}: {message}")]
    Malformed {
        line: usize,
        column: usize,
        message: String,
    },

    /// The document could not be rendered.
    #[error("failed to render document: {0}")]
    Render(String),
}
