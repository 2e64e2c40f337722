//! # Component Catalog
//!
//! The built-in components, grouped the way a page uses them. Tags below use the default
//! `ds-` prefix; [`register`] takes the prefix configured for markup.
//!
//! * **Forms ([`forms`])**: `ds-button`, `ds-input`.
//! * **Layout ([`layout`])**: `ds-card`, `ds-grid`.
//! * **Navigation ([`navigation`])**: `ds-link`.
//! * **Overlay ([`overlay`])**: `ds-modal`, bound to client-side state through `@dsState`.
//! * **Data ([`data`])**: `ds-table`.
//! * **Feedback ([`feedback`])**: `ds-alert` (dismissed through `@dsAction`), `ds-loading`.
//!
//! Every component is a [`ComponentDefinition`] with BEM classes (`ds-<name>` plus
//! `ds-<name>--<modifier>`), icon references (`ds-icon ds-icon--<name>`) and a template
//! compiled against the directive settings passed to [`register`].

pub mod data;
pub mod feedback;
pub mod forms;
pub mod layout;
pub mod navigation;
pub mod overlay;

use dskit_engine::{
    ComponentDefinition, DirectiveExpander, EngineError, EngineErrorExt, RegistryBuilder,
};
use tracing::debug;

type DefinitionFn = fn(&DirectiveExpander) -> Result<ComponentDefinition, EngineError>;

/// Every catalog component name in registration order. The registered tag is the tag
/// prefix followed by the name.
pub const COMPONENTS: &[(&str, DefinitionFn)] = &[
    // Forms
    (forms::BUTTON, forms::button),
    (forms::INPUT, forms::input),
    // Layout
    (layout::CARD, layout::card),
    (layout::GRID, layout::grid),
    // Navigation
    (navigation::LINK, navigation::link),
    // Overlay
    (overlay::MODAL, overlay::modal),
    // Data
    (data::TABLE, data::table),
    // Feedback
    (feedback::ALERT, feedback::alert),
    (feedback::LOADING, feedback::loading),
];

/// Builds every catalog component with `expander` and registers it on `builder` as
/// `<prefix><name>`.
///
/// # Errors
/// Any definition or registration error (e.g. a prefix that does not form a valid tag
/// name), with the failing tag as context.
pub fn register(
    builder: RegistryBuilder,
    expander: &DirectiveExpander,
    prefix: &str,
) -> Result<RegistryBuilder, EngineError> {
    let builder = COMPONENTS.iter().try_fold(builder, |builder, (name, definition)| {
        let tag = format!("{prefix}{name}");
        let definition = definition(expander).context(tag.clone())?;
        builder.register(tag, definition)
    })?;

    debug!(components = COMPONENTS.len(), prefix, "Catalog registered");
    Ok(builder)
}

/// Catalog tags under `prefix`, in registration order.
pub fn tags(prefix: &str) -> impl Iterator<Item = String> + '_ {
    COMPONENTS.iter().map(move |(name, _)| format!("{prefix}{name}"))
}

/// Icon class reference for an icon name.
#[must_use]
pub fn icon_class(name: &str) -> String {
    format!("ds-icon ds-icon--{name}")
}

pub(crate) const SIZES: &[&str] = &["sm", "md", "lg"];
pub(crate) const SPACING: &[&str] = &["none", "sm", "md", "lg"];
