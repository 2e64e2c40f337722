//! # dskit engine
//!
//! Server-side rendering core of the design-system kit.
//!
//! A component is a [`ComponentDefinition`]: a typed property schema with defaults, pure
//! presentation helpers and a template compiled once at build time. Definitions are
//! registered on a [`RegistryBuilder`], frozen into a [`Registry`] and rendered through a
//! [`Renderer`], either one [`Invocation`] at a time or as whole pages of markup.
//!
//! ```rust
//! use dskit_engine::prelude::*;
//!
//! # fn main() -> Result<(), EngineError> {
//! let expander = DirectiveExpander::new();
//! let badge = ComponentDefinition::builder()
//!     .prop(PropSpec::one_of("tone", &["neutral", "info"]))
//!     .template(r#"<span class="ds-badge ds-badge--{{ tone }}">{{ slot }}</span>"#)
//!     .build(&expander)?;
//!
//! let registry = Registry::builder().register("ds-badge", badge)?.build();
//! let renderer = Renderer::new(registry, Default::default());
//!
//! let html = renderer.render_markup("<p><ds-badge tone=info>New</ds-badge></p>")?;
//! assert_eq!(html, r#"<p><span class="ds-badge ds-badge--info">New</span></p>"#);
//! # Ok(())
//! # }
//! ```

pub mod attributes;
pub mod definition;
pub mod directive;
pub mod error;
pub mod helpers;
pub mod html;
pub mod props;
pub mod registry;
pub mod renderer;
pub mod slots;
pub mod template;
pub mod value;

mod markup;
mod syntax;

pub use attributes::{AttributeSet, ClassList, StyleMap};
pub use definition::{ComponentDefinition, DefinitionBuilder};
pub use directive::{DirectiveExpander, HttpMethod};
pub use error::{EngineError, EngineErrorExt};
pub use helpers::{ComponentHelpers, Derived, PlainHelpers, base_attributes};
pub use props::{PropSchema, PropSpec, PropType, PropertyBag};
pub use registry::{Registry, RegistryBuilder};
pub use renderer::{Invocation, Renderer};
pub use slots::{Slot, Slots};
pub use template::Template;
pub use value::Value;

pub mod prelude {
    pub use crate::attributes::{AttributeSet, ClassList, StyleMap};
    pub use crate::definition::ComponentDefinition;
    pub use crate::directive::DirectiveExpander;
    pub use crate::error::{EngineError, EngineErrorExt};
    pub use crate::helpers::{ComponentHelpers, PlainHelpers};
    pub use crate::props::{PropSpec, PropertyBag};
    pub use crate::registry::{Registry, RegistryBuilder};
    pub use crate::renderer::{Invocation, Renderer};
    pub use crate::slots::Slots;
    pub use crate::value::Value;
}
