//! Error types for the card stack

use thiserror::Error;

/// Errors raised by [`CardStackLayout`](crate::CardStackLayout)
///
/// Both variants are adapter contract violations. They are reported so the
/// host can fail loudly; the stack never substitutes placeholder content.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CardStackError {
    /// The adapter produced no view for a position inside `0..count`
    #[error("adapter returned no view for card position {position}")]
    MissingView {
        /// Position that had no view
        position: usize,
    },

    /// An adapter is bound; the operation needs an unbound stack
    #[error("an adapter is already bound to this card stack")]
    AlreadyBound,
}

/// Result type for card stack operations
pub type Result<T> = std::result::Result<T, CardStackError>;
