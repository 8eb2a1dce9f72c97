//! C++ snippet extraction
//!
//! This module turns raw source text into a [`model::SourceModel`]:
//! - [`scanner`]: comment stripping and delimiter matching
//! - [`class`]: class location and member declarations
//! - [`constructor`]: constructor signature and body
//! - [`binding`]: member → parameter binding with tiered fallbacks
//! - [`objects`]: object declaration sites
//! - [`arguments`]: argument list tokenization
//! - [`parse`]: the [`parse::Parser`] coordinator
//! - [`model`]: extracted data types
//! - [`errors`]: [`errors::ExtractError`]
//!
//! # Supported subset
//!
//! One class per snippet, with an optional inline or out-of-line constructor
//! and any number of object declarations anywhere in the file. There is no
//! preprocessor, no overload resolution and no template instantiation; the
//! extractor prefers a best guess over rejecting loosely written input.
//!
//! # Implementation
//!
//! A depth-tracking delimiter scanner finds structural boundaries, then
//! `regex` patterns work only inside those windows (class body, constructor
//! body, argument lists).

pub mod arguments;
pub mod binding;
pub mod class;
pub mod constructor;
pub mod errors;
pub mod model;
pub mod objects;
pub mod parse;
pub mod scanner;
