//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors (unreadable input or output paths).
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// The input is neither valid YAML nor valid JSON.
    #[from(ignore)]
    #[display("Parse Error: {_0}")]
    Parse(String),

    /// A required top-level section of the OpenAPI document is absent.
    #[from(ignore)]
    #[display("Invalid document structure: {_0}")]
    Structure(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
///
/// Implemented manually (instead of `derive(Error)`) because the `String`
/// variants do not implement `std::error::Error`, which breaks auto-derived
/// `source()` implementations.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
