#![allow(unreachable_pub)]

//! # Macros
//!
//! Procedural macros shared by the dskit crates.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! dskit-derive.workspace = true
//! thiserror.workspace = true
//! ```

mod error;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Turns an enum into a crate error type.
///
/// # Generated Items
///
/// * `#[derive(Debug, thiserror::Error)]` unless already derived.
/// * `<ErrorName>Ext` trait with `.context(...)` for `Result<T, ErrorName>` and,
///   for every variant with a source field, for `Result<T, SourceError>`.
/// * `From<SourceError>` for every variant with a source field.
/// * `From<&'static str>` and `From<String>` when an `Internal { message, context }`
///   variant exists.
/// * A private `format_context` helper for use inside `#[error(...)]` strings.
///
/// # Requirements
///
/// 1. Applied to an **enum** with named-field variants only.
/// 2. A variant carrying a `source` (or `#[source]`/`#[from]`) field must also carry
///    `context: Option<Cow<'static, str>>`.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[dskit_derive::dskit_error]
/// pub enum LoadError {
///     #[error("Parse error{}: {source}", format_context(.context))]
///     Parse { source: std::num::ParseIntError, context: Option<Cow<'static, str>> },
///
///     #[error("Internal error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn port(raw: &str) -> Result<u16, LoadError> {
///     raw.parse::<u16>().context("reading port")
/// }
/// ```
#[proc_macro_attribute]
pub fn dskit_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    error::expand(input).into()
}
