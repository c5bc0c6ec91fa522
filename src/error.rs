//! Error types for sprite composition

use thiserror::Error;

/// Caller-misuse errors. Everything recoverable (missing files, bad XML,
/// unknown handles) degrades to an absent value instead of erroring.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpriteError {
    /// The handle already maps to a symbol in the sprite. Re-adding is
    /// rejected and leaves the sprite untouched.
    #[error("asset handle `{0}` is already registered in the sprite")]
    DuplicateHandle(String),
}
