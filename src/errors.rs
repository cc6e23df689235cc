use thiserror::Error; // Import the `Error` derive macro from the `thiserror` crate

// Define an enum to represent errors surfaced at the plugin's edges.
// The merge pipeline itself is total and never returns these.
#[derive(Debug, Error)]
pub enum ContextError {
    // Variant for malformed plugin options, with a message
    #[error("invalid options: {0}")]
    Options(String),

    // Variant for a default assignment that cannot be parsed, with a message
    #[error("invalid default assignment: {0}")]
    Assignment(String),
}

// Type alias for results that use `ContextError` as the error type
pub type Result<T> = std::result::Result<T, ContextError>;
