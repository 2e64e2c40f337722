//! # Domain Models
//!
//! Plain data shared by the dskit crates: configuration sections and the fixed
//! names used by templates and directives. No I/O and no rendering logic here.

pub mod config;
pub mod constants;
