//! Extraction error types
//!
//! This module defines [`ExtractError`], the single terminal error a parsing
//! stage can return. Errors are plain values handed back to the caller; no
//! stage logs them or aborts the process.

use thiserror::Error;

/// Errors that stop extraction of a [`SourceModel`](super::model::SourceModel)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// The source text was empty or whitespace only
    #[error("No code provided")]
    EmptyInput,

    /// No `class Name {` occurrence anywhere in the text
    #[error("No class found in the code")]
    NoClassFound,

    /// An opening delimiter at `offset` has no matching closer
    #[error("Unbalanced braces: delimiter opened at byte {offset} is never closed")]
    UnbalancedBraces { offset: usize },

    /// A constructor was required but none was found
    #[error("No constructor found for class '{class}'")]
    NoConstructorFound { class: String },

    /// No declaration of an instance of the class was found
    #[error(
        "No objects found - make sure your code creates objects of class '{class}'"
    )]
    NoObjectsFound { class: String },

    /// An argument list has mismatched brackets
    #[error("Malformed argument list: ({arguments})")]
    MalformedArgumentList { arguments: String },
}
