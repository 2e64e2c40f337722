use crate::attributes::AttributeSet;
use crate::error::{EngineError, EngineErrorExt};
use crate::markup::{self, Element, Node};
use crate::props::PropertyBag;
use crate::registry::Registry;
use crate::slots::{Slot, Slots};
use crate::syntax::line_col;
use crate::value::Value;
use dskit_domain::config::MarkupConfig;
use std::ops::Deref;
use std::sync::Arc;
use tracing::{debug, instrument};

/// A component tag as written at a call site: tag name, raw attributes and slots.
///
/// Attributes naming a declared property are passed as properties, the rest are merged
/// into the component's root attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    pub tag: String,
    pub attributes: AttributeSet,
    pub slots: Slots,
}

impl Invocation {
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into(), ..Self::default() }
    }

    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name, value);
        self
    }

    /// A bare attribute (`disabled`), equivalent to an empty value.
    #[must_use]
    pub fn flag(self, name: impl Into<String>) -> Self {
        self.attr(name, "")
    }

    #[must_use]
    pub fn content(mut self, html: impl Into<Slot>) -> Self {
        self.slots.set_default(html);
        self
    }

    #[must_use]
    pub fn named_slot(mut self, name: impl Into<String>, html: impl Into<Slot>) -> Self {
        self.slots.set_named(name, html);
        self
    }
}

#[derive(Debug)]
pub struct RendererInner {
    pub registry: Registry,
    pub markup: MarkupConfig,
}

/// Renders components from a frozen [`Registry`].
///
/// Holds no mutable state; clones share the same registry.
#[derive(Debug, Clone)]
pub struct Renderer {
    inner: Arc<RendererInner>,
}

impl Renderer {
    #[must_use]
    pub fn new(registry: Registry, markup: MarkupConfig) -> Self {
        Self { inner: Arc::new(RendererInner { registry, markup }) }
    }

    /// Renders `tag` with typed properties and caller attributes.
    ///
    /// # Errors
    /// * [`EngineError::UnknownComponent`] if `tag` is not registered;
    /// * [`EngineError::UnknownProperty`] or [`EngineError::InvalidPropertyType`] if
    ///   `props` does not fit the component schema.
    pub fn render_component(
        &self,
        tag: &str,
        props: &PropertyBag,
        attributes: &AttributeSet,
        slots: &Slots,
    ) -> Result<String, EngineError> {
        self.registry.resolve(tag)?.render(tag, props, attributes, slots)
    }

    /// Renders a call-site invocation, splitting its attributes into properties and
    /// caller attributes.
    ///
    /// # Errors
    /// See [`Renderer::render_component`].
    pub fn render(&self, invocation: &Invocation) -> Result<String, EngineError> {
        let definition = self.registry.resolve(&invocation.tag)?;

        let mut props = PropertyBag::new();
        let mut caller = AttributeSet::new();
        for (name, value) in invocation.attributes.iter() {
            if definition.schema.contains(name) {
                props.insert(name, Value::from(value));
            } else {
                caller.insert(name, value);
            }
        }

        definition.render(&invocation.tag, &props, &caller, &invocation.slots)
    }

    /// Renders every component tag in a page, innermost first, and passes all other text
    /// through.
    ///
    /// # Errors
    /// * [`EngineError::MarkupSyntax`] for malformed component or slot tags;
    /// * [`EngineError::NestingTooDeep`] beyond the configured depth;
    /// * any error of [`Renderer::render`], with the tag position as context.
    #[instrument(skip_all, fields(bytes = source.len()))]
    pub fn render_markup(&self, source: &str) -> Result<String, EngineError> {
        let nodes = markup::parse(source, &self.markup.tag_prefix, self.markup.max_depth)?;
        let mut out = String::with_capacity(source.len() * 2);
        self.render_nodes(source, &nodes, &mut out)?;
        debug!(output = out.len(), "Rendered markup");
        Ok(out)
    }

    fn render_nodes(
        &self,
        source: &str,
        nodes: &[Node<'_>],
        out: &mut String,
    ) -> Result<(), EngineError> {
        for node in nodes {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Element(element) => out.push_str(&self.render_element(source, element)?),
            }
        }
        Ok(())
    }

    fn render_element(&self, source: &str, element: &Element<'_>) -> Result<String, EngineError> {
        let mut content = String::new();
        self.render_nodes(source, &element.children, &mut content)?;
        let mut slots = Slots::content(content);
        for (name, nodes) in &element.named_slots {
            let mut html = String::new();
            self.render_nodes(source, nodes, &mut html)?;
            slots.set_named(*name, html);
        }
        if self.markup.trim_slots {
            slots = slots.trimmed();
        }

        let invocation = Invocation {
            tag: element.tag.to_owned(),
            attributes: element.attributes.clone(),
            slots,
        };
        self.render(&invocation).context({
            let (line, column) = line_col(source, element.offset);
            format!("<{}> at {line}:{column}", element.tag)
        })
    }
}

impl Deref for Renderer {
    type Target = RendererInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
