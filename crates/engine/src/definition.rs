use crate::attributes::AttributeSet;
use crate::directive::DirectiveExpander;
use crate::error::EngineError;
use crate::helpers::{ComponentHelpers, Derived, PlainHelpers};
use crate::props::{PropSchema, PropSpec, PropertyBag};
use crate::slots::Slots;
use crate::template::{Scope, Template};
use std::any::{TypeId, type_name};
use std::borrow::Cow;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;
use tracing::trace;

pub struct ComponentDefinitionInner {
    pub schema: PropSchema,
    pub template: Template,
    pub description: Option<Cow<'static, str>>,
    helpers: Box<dyn ComponentHelpers>,
    helpers_type: TypeId,
    helpers_name: &'static str,
}

/// Immutable component: property schema, compiled template and helpers.
///
/// Cloning shares the same definition.
#[derive(Debug, Clone)]
pub struct ComponentDefinition {
    inner: Arc<ComponentDefinitionInner>,
}

impl ComponentDefinition {
    #[must_use]
    pub fn builder() -> DefinitionBuilder {
        DefinitionBuilder::default()
    }

    #[must_use]
    pub fn helpers(&self) -> &dyn ComponentHelpers {
        self.inner.helpers.as_ref()
    }

    /// Type name of the helper implementation (for diagnostics).
    #[must_use]
    pub fn helpers_name(&self) -> &'static str {
        self.inner.helpers_name
    }

    /// Same helper type, equal schemas and equal compiled templates (directives included).
    #[must_use]
    pub fn is_identical(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
            || (self.inner.helpers_type == other.inner.helpers_type
                && self.inner.schema == other.inner.schema
                && self.inner.template == other.inner.template)
    }

    /// Renders with caller-supplied properties, attributes and slots.
    ///
    /// Missing properties take their defaults, helpers run on the defaulted bag, the
    /// helper attributes are merged with `caller` and the template is filled.
    ///
    /// # Errors
    /// [`EngineError::UnknownProperty`] or [`EngineError::InvalidPropertyType`] when `props`
    /// does not fit the schema.
    pub fn render(
        &self,
        component: &str,
        props: &PropertyBag,
        caller: &AttributeSet,
        slots: &Slots,
    ) -> Result<String, EngineError> {
        let props = self.schema.apply(component, props)?;
        let helpers = self.helpers();
        let derived = Derived::compute(helpers, &props);
        let attributes = AttributeSet::merge(&helpers.attributes(&props), caller);

        trace!(component, attributes = %attributes, "Rendering component");

        Ok(self.template.render(&Scope {
            props: &props,
            attributes: &attributes,
            slots,
            derived: &derived,
        }))
    }
}

impl Deref for ComponentDefinition {
    type Target = ComponentDefinitionInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl fmt::Debug for ComponentDefinitionInner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentDefinition")
            .field("schema", &self.schema)
            .field("template", &self.template.source())
            .field("helpers", &self.helpers_name)
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
pub struct DefinitionBuilder {
    props: Vec<PropSpec>,
    template: Option<String>,
    description: Option<Cow<'static, str>>,
    helpers: Option<(Box<dyn ComponentHelpers>, TypeId, &'static str)>,
}

impl DefinitionBuilder {
    #[must_use]
    pub fn prop(mut self, spec: PropSpec) -> Self {
        self.props.push(spec);
        self
    }

    #[must_use]
    pub fn props<I>(mut self, specs: I) -> Self
    where
        I: IntoIterator<Item = PropSpec>,
    {
        self.props.extend(specs);
        self
    }

    #[must_use]
    pub fn template(mut self, source: impl Into<String>) -> Self {
        self.template = Some(source.into());
        self
    }

    #[must_use]
    pub fn description(mut self, text: impl Into<Cow<'static, str>>) -> Self {
        self.description = Some(text.into());
        self
    }

    #[must_use]
    pub fn helpers<H: ComponentHelpers>(mut self, helpers: H) -> Self {
        let boxed: Box<dyn ComponentHelpers> = Box::new(helpers);
        self.helpers = Some((boxed, TypeId::of::<H>(), type_name::<H>()));
        self
    }

    /// Validates the schema and compiles the template.
    ///
    /// # Errors
    /// * [`EngineError::InvalidDefinition`] for a missing template or an invalid schema;
    /// * template and directive errors from [`Template::compile`].
    pub fn build(self, expander: &DirectiveExpander) -> Result<ComponentDefinition, EngineError> {
        let source = self.template.ok_or_else(|| EngineError::InvalidDefinition {
            message: "template not provided".into(),
            context: None,
        })?;
        let schema = PropSchema::new(self.props)?;
        let template = Template::compile(source, &schema, expander)?;
        let (helpers, helpers_type, helpers_name) = match self.helpers {
            Some(helpers) => helpers,
            None => (
                Box::new(PlainHelpers) as Box<dyn ComponentHelpers>,
                TypeId::of::<PlainHelpers>(),
                type_name::<PlainHelpers>(),
            ),
        };

        Ok(ComponentDefinition {
            inner: Arc::new(ComponentDefinitionInner {
                schema,
                template,
                description: self.description,
                helpers,
                helpers_type,
                helpers_name,
            }),
        })
    }
}

impl fmt::Debug for DefinitionBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefinitionBuilder")
            .field("props", &self.props)
            .field("template", &self.template)
            .field("helpers", &self.helpers.as_ref().map(|(_, _, name)| *name))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::ClassList;

    struct Chip;

    impl ComponentHelpers for Chip {
        fn classes(&self, props: &PropertyBag) -> ClassList {
            ClassList::block("ds-chip").modifier_if(props.flag("active"), "active")
        }
    }

    fn chip() -> ComponentDefinition {
        ComponentDefinition::builder()
            .prop(PropSpec::boolean("active"))
            .prop(PropSpec::string("label"))
            .template("<span {{ attributes }}>{{ label }}</span>")
            .helpers(Chip)
            .build(&DirectiveExpander::new())
            .unwrap()
    }

    #[test]
    fn render_runs_the_full_pipeline() {
        let props = PropertyBag::new().with("active", true).with("label", "New");
        let caller = AttributeSet::new().with("class", "mine").with("id", "c1");
        let html = chip().render("ds-chip", &props, &caller, &Slots::new()).unwrap();
        assert_eq!(
            html,
            r#"<span class="ds-chip ds-chip--active mine" id="c1">New</span>"#
        );
    }

    #[test]
    fn identity_compares_helpers_schema_and_template() {
        let a = chip();
        assert!(a.is_identical(&a.clone()));
        assert!(a.is_identical(&chip()));

        let plain = ComponentDefinition::builder()
            .prop(PropSpec::boolean("active"))
            .prop(PropSpec::string("label"))
            .template("<span {{ attributes }}>{{ label }}</span>")
            .build(&DirectiveExpander::new())
            .unwrap();
        assert!(!a.is_identical(&plain));
        assert_eq!(plain.helpers_name(), type_name::<PlainHelpers>());
    }

    #[test]
    fn build_rejects_bad_definitions() {
        let expander = DirectiveExpander::new();
        assert!(matches!(
            ComponentDefinition::builder().build(&expander),
            Err(EngineError::InvalidDefinition { .. })
        ));
        assert!(matches!(
            ComponentDefinition::builder()
                .prop(PropSpec::string("attributes"))
                .template("")
                .build(&expander),
            Err(EngineError::InvalidDefinition { .. })
        ));
        assert!(matches!(
            ComponentDefinition::builder().template("{{ missing }}").build(&expander),
            Err(EngineError::UnknownVariable { .. })
        ));
    }
}
