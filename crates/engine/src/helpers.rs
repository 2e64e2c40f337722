//! Presentation helpers: pure functions from a defaulted property bag to classes,
//! styles, icons and attributes.

use crate::attributes::{AttributeSet, ClassList, StyleMap};
use crate::props::PropertyBag;

/// Per-component presentation logic.
///
/// Every method receives the fully defaulted bag and must be pure: the same bag always
/// yields the same output. Methods a component does not need keep their empty defaults.
pub trait ComponentHelpers: Send + Sync + 'static {
    fn classes(&self, _props: &PropertyBag) -> ClassList {
        ClassList::default()
    }

    fn inline_styles(&self, _props: &PropertyBag) -> StyleMap {
        StyleMap::new()
    }

    /// CSS custom properties (`--ds-*`), appended after the inline styles.
    fn css_variables(&self, _props: &PropertyBag) -> StyleMap {
        StyleMap::new()
    }

    /// Icon class reference, e.g. `ds-icon ds-icon--check`.
    fn icon(&self, _props: &PropertyBag) -> Option<String> {
        None
    }

    /// Attributes placed on the component's root element before caller attributes are
    /// merged in. Defaults to [`base_attributes`].
    fn attributes(&self, props: &PropertyBag) -> AttributeSet {
        base_attributes(self, props)
    }
}

/// `class` from [`ComponentHelpers::classes`] and `style` from the inline styles followed
/// by the CSS variables. Empty values are left out.
pub fn base_attributes<H>(helpers: &H, props: &PropertyBag) -> AttributeSet
where
    H: ComponentHelpers + ?Sized,
{
    let mut style = helpers.inline_styles(props);
    style.extend(&helpers.css_variables(props));

    AttributeSet::new()
        .with_non_empty("class", helpers.classes(props).to_string())
        .with_non_empty("style", style.to_string())
}

/// Helpers of a component with no presentation logic.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainHelpers;

impl ComponentHelpers for PlainHelpers {}

/// Helper output computed once per render and exposed to templates as `helpers.*`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Derived {
    pub classes: String,
    pub styles: String,
    pub variables: String,
    pub icon: Option<String>,
}

impl Derived {
    pub fn compute<H>(helpers: &H, props: &PropertyBag) -> Self
    where
        H: ComponentHelpers + ?Sized,
    {
        Self {
            classes: helpers.classes(props).to_string(),
            styles: helpers.inline_styles(props).to_string(),
            variables: helpers.css_variables(props).to_string(),
            icon: helpers.icon(props),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Badge;

    impl ComponentHelpers for Badge {
        fn classes(&self, props: &PropertyBag) -> ClassList {
            ClassList::block("ds-badge").modifier(props.str("tone"))
        }

        fn inline_styles(&self, _props: &PropertyBag) -> StyleMap {
            StyleMap::new().with("display", "inline-flex")
        }

        fn css_variables(&self, props: &PropertyBag) -> StyleMap {
            StyleMap::new().with("--ds-badge-size", props.int("size").unwrap_or(1).to_string())
        }
    }

    #[test]
    fn base_attributes_combine_classes_and_styles() {
        let props = PropertyBag::new().with("tone", "info").with("size", 2);
        let attrs = Badge.attributes(&props);
        assert_eq!(
            attrs.to_string(),
            r#"class="ds-badge ds-badge--info" style="display: inline-flex; --ds-badge-size: 2""#
        );
    }

    #[test]
    fn plain_helpers_produce_nothing() {
        let props = PropertyBag::new();
        assert!(PlainHelpers.attributes(&props).is_empty());
        assert_eq!(Derived::compute(&PlainHelpers, &props), Derived::default());
    }

    #[test]
    fn derived_is_computed_per_helper() {
        let props = PropertyBag::new().with("tone", "warn");
        let derived = Derived::compute(&Badge, &props);
        assert_eq!(derived.classes, "ds-badge ds-badge--warn");
        assert_eq!(derived.styles, "display: inline-flex");
        assert_eq!(derived.variables, "--ds-badge-size: 1");
        assert_eq!(derived.icon, None);
    }
}
