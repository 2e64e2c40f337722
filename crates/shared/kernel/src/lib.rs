//! Kernel utilities shared across dskit crates.
//! Keep this crate lightweight: layered configuration loading and re-exports.
//!
//! ## Config loading
//! ```rust,no_run
//! use dskit_kernel::config::load_config;
//! use dskit_kernel::domain::config::DesignSystemConfig;
//!
//! let cfg: DesignSystemConfig = load_config(Some("dskit.toml")).unwrap_or_default();
//! assert_eq!(cfg.markup.tag_prefix, "ds-");
//! ```
pub mod config;

pub use dskit_domain as domain;
