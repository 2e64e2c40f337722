//! Facade crate for the design-system kit.
//! Re-exports the domain, kernel, engine and catalog crates and wires them together at boot.
//! Keep this crate thin: it should compose other crates, not implement rendering logic.
//!
//! ## Usage
//! - Load a [`DesignSystemConfig`] (see [`kernel::config::load_config`]) or use the default.
//! - Call [`boot`] once at startup and share the returned [`Renderer`] (it is cheap to clone).
//!
//! ```rust
//! let renderer = dskit::boot(&dskit::DesignSystemConfig::default()).unwrap();
//! let html = renderer.render_markup("<ds-link href=\"/docs\">Docs</ds-link>").unwrap();
//! assert_eq!(html, r#"<a class="ds-link ds-link--default" href="/docs">Docs</a>"#);
//! ```

pub use dskit_catalog as catalog;
pub use dskit_domain as domain;
pub use dskit_domain::config::DesignSystemConfig;
pub use dskit_engine as engine;
pub use dskit_engine::prelude;
pub use dskit_engine::{EngineError, Renderer};
pub use dskit_kernel as kernel;

use dskit_engine::{DirectiveExpander, Registry};
use tracing::info;

/// Builds the directive expander and the catalog registry from `config` and returns a
/// renderer over the frozen registry.
///
/// # Errors
/// * [`EngineError::InvalidDefinition`] for unusable directive settings;
/// * [`EngineError::InvalidTagName`] for an empty tag prefix or one that does not form valid
///   tag names;
/// * any catalog definition or registration error (e.g. a conflicting duplicate under the
///   `reject` policy).
pub fn boot(config: &DesignSystemConfig) -> Result<Renderer, EngineError> {
    let prefix = config.markup.tag_prefix.as_str();
    if prefix.is_empty() {
        return Err(EngineError::InvalidTagName {
            tag: String::new(),
            message: "the markup tag prefix must not be empty".into(),
            context: None,
        });
    }

    let expander = DirectiveExpander::from_config(&config.directives)?;
    let builder = Registry::builder().on_duplicate(config.registry.on_duplicate);
    let registry = catalog::register(builder, &expander, prefix)?.build();

    info!(
        components = registry.len(),
        prefix,
        "Design system ready"
    );
    Ok(Renderer::new(registry, config.markup.clone()))
}
