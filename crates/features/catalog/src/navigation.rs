//! `ds-link`.

use crate::icon_class;
use dskit_engine::base_attributes;
use dskit_engine::prelude::*;

pub const LINK: &str = "link";

pub const LINK_VARIANTS: &[&str] = &["default", "subtle", "underline"];

/// Icon of external links without an explicit icon.
pub const EXTERNAL_ICON: &str = "external-link";

const LINK_TEMPLATE: &str = "<a {{ attributes }}>{{ slot }}\
    @if(helpers.icon) <i class=\"{{ helpers.icon }}\" aria-hidden=\"true\"></i>@endif\
    @if(external)<span class=\"ds-visually-hidden\"> (opens in a new tab)</span>@endif\
    </a>";

#[derive(Debug, Clone, Copy, Default)]
pub struct LinkHelpers;

impl ComponentHelpers for LinkHelpers {
    fn classes(&self, props: &PropertyBag) -> ClassList {
        ClassList::block("ds-link")
            .modifier(props.str("variant"))
            .modifier_if(props.flag("external"), "external")
    }

    fn icon(&self, props: &PropertyBag) -> Option<String> {
        match props.opt_str("icon") {
            Some(name) => Some(icon_class(name)),
            None if props.flag("external") => Some(icon_class(EXTERNAL_ICON)),
            None => None,
        }
    }

    fn attributes(&self, props: &PropertyBag) -> AttributeSet {
        let attributes = base_attributes(self, props).with("href", props.str("href"));
        if props.flag("external") {
            attributes.with("target", "_blank").with("rel", "noopener noreferrer")
        } else {
            attributes
        }
    }
}

/// `ds-link`: an anchor with variants and external-link handling.
///
/// # Errors
/// Propagates template compilation errors.
pub fn link(expander: &DirectiveExpander) -> Result<ComponentDefinition, EngineError> {
    ComponentDefinition::builder()
        .props([
            PropSpec::string("href").default_value("#"),
            PropSpec::one_of("variant", LINK_VARIANTS),
            PropSpec::boolean("external"),
            PropSpec::string("icon"),
        ])
        .template(LINK_TEMPLATE)
        .helpers(LinkHelpers)
        .description("Styled anchor")
        .build(expander)
}
