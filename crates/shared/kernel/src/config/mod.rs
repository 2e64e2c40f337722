use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable prefix for overrides (`DSKIT__MARKUP__MAX_DEPTH=8`).
pub const ENV_PREFIX: &str = "DSKIT";
/// File looked up (with any supported extension) when no path is given.
pub const DEFAULT_CONFIG_NAME: &str = "dskit";

#[dskit_derive::dskit_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Layered configuration loader: an optional file, then environment overrides.
///
/// Nested keys are separated by a double underscore, so `DSKIT__DIRECTIVES__SWAP`
/// maps to `directives.swap`.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    path: Option<PathBuf>,
    env: Option<config::Map<String, String>>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires the given file. Without it, `dskit.{toml,json,yaml,...}` in the
    /// working directory is used when present.
    #[must_use]
    pub fn file(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Replaces the process environment as the override source.
    #[must_use]
    pub fn env_source(mut self, vars: config::Map<String, String>) -> Self {
        self.env = Some(vars);
        self
    }

    /// Builds and deserializes the layered configuration.
    ///
    /// # Errors
    /// Returns [`ConfigError::Config`] if an explicit file is missing or malformed, or if
    /// the merged values do not match `T`.
    pub fn load<T>(self) -> Result<T, ConfigError>
    where
        T: DeserializeOwned,
    {
        let file = match &self.path {
            Some(path) => {
                info!("Loading config from {}", path.display());
                File::from(path.as_path()).required(true)
            },
            None => {
                debug!("No config file given, looking for optional '{DEFAULT_CONFIG_NAME}'");
                File::with_name(DEFAULT_CONFIG_NAME).required(false)
            },
        };

        let env = Environment::with_prefix(ENV_PREFIX).separator("__").source(self.env);

        let config = Config::builder()
            .add_source(file)
            .add_source(env)
            .build()
            .context("Failed to build config")?
            .try_deserialize::<T>()
            .context("Failed to deserialize config")?;

        Ok(config)
    }
}

/// Loads `T` from an optional file plus `DSKIT__*` environment overrides.
///
/// # Errors
/// See [`ConfigLoader::load`].
///
/// # Example
/// ```rust,no_run
/// use dskit_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local.toml")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let loader = ConfigLoader::new();
    match path {
        Some(path) => loader.file(path).load(),
        None => loader.load(),
    }
}
