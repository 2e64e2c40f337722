use crate::constants::{
    DEFAULT_ACTION_PREFIX, DEFAULT_LOADING_INDICATOR, DEFAULT_METHOD, DEFAULT_STATE_NAMESPACE,
    DEFAULT_SWAP, DEFAULT_TAG_PREFIX,
};
use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level configuration shared by the engine, the catalog and the CLI.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DesignSystemConfigInner {
    pub directives: DirectiveConfig,
    pub registry: RegistryConfig,
    pub markup: MarkupConfig,
    pub logging: LoggingConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct DesignSystemConfig {
    #[serde(flatten, default)]
    inner: Arc<DesignSystemConfigInner>,
}

impl Deref for DesignSystemConfig {
    type Target = DesignSystemConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for DesignSystemConfig {
    fn deref_mut(&mut self) -> &mut DesignSystemConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Constants emitted by the template directives.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DirectiveConfig {
    /// Client-side namespace of state components (`DS.component`).
    pub state_namespace: String,
    /// Path prefix the action name is appended to (`/api/ds/`).
    pub action_prefix: String,
    /// Selector of the loading indicator (`hx-indicator`).
    pub loading_indicator: String,
    /// Response swap strategy (`hx-swap`).
    pub swap: String,
    /// Method used when an action omits one.
    pub default_method: String,
}

/// What to do when a tag is registered twice with different definitions.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DuplicatePolicy {
    /// Warn and let the later registration win.
    #[default]
    Overwrite,
    /// Fail the registration.
    Reject,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub on_duplicate: DuplicatePolicy,
}

/// Page markup rendering knobs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MarkupConfig {
    /// Prefix identifying component tags (`ds-`).
    pub tag_prefix: String,
    /// Maximum nesting of component tags.
    pub max_depth: usize,
    /// Trim surrounding whitespace of rendered slots.
    pub trim_slots: bool,
}

/// Logging setup of the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `trace`, `debug`, `info`, `warn` or `error`.
    pub level: String,
    pub json: bool,
    /// Directory for rolling log files; console only when absent.
    pub path: Option<PathBuf>,
    /// Extra filter directives (e.g., `dskit_engine=debug`).
    pub env_filter: Option<String>,
}

// --- Default ---

impl Default for DirectiveConfig {
    fn default() -> Self {
        Self {
            state_namespace: DEFAULT_STATE_NAMESPACE.to_owned(),
            action_prefix: DEFAULT_ACTION_PREFIX.to_owned(),
            loading_indicator: DEFAULT_LOADING_INDICATOR.to_owned(),
            swap: DEFAULT_SWAP.to_owned(),
            default_method: DEFAULT_METHOD.to_owned(),
        }
    }
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self { tag_prefix: DEFAULT_TAG_PREFIX.to_owned(), max_depth: 32, trim_slots: true }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "warn".to_owned(), json: false, path: None, env_filter: None }
    }
}
