//! `ds-modal`, a dialog whose open state lives in a client-side component bound with
//! `@dsState`.

use dskit_engine::base_attributes;
use dskit_engine::prelude::*;

pub const MODAL: &str = "modal";

pub const MODAL_SIZES: &[&str] = &["sm", "md", "lg", "xl", "full"];

const MODAL_TEMPLATE: &str = "<div {{ attributes }}\
    @if(open) @dsState(modal, { open: true })@else @dsState(modal, { open: false })@endif>\
    <div class=\"ds-modal__backdrop\" @click=\"close()\"></div>\
    <div class=\"ds-modal__dialog\">\
    @if(title)<header class=\"ds-modal__header\">\
    <h2 class=\"ds-modal__title\" id=\"{{ id }}-title\">{{ title }}</h2></header>@endif\
    @if(closable)<button type=\"button\" class=\"ds-modal__close\" aria-label=\"Close\" \
    @click=\"close()\"><i class=\"ds-icon ds-icon--x\" aria-hidden=\"true\"></i></button>@endif\
    <div class=\"ds-modal__body\">{{ slot }}</div>\
    @if(slots.footer)<footer class=\"ds-modal__footer\">{{ slots.footer }}</footer>@endif\
    </div></div>";

#[derive(Debug, Clone, Copy, Default)]
pub struct ModalHelpers;

impl ComponentHelpers for ModalHelpers {
    fn classes(&self, props: &PropertyBag) -> ClassList {
        ClassList::block("ds-modal")
            .modifier(props.str("size"))
            .modifier_if(props.flag("open"), "open")
    }

    fn attributes(&self, props: &PropertyBag) -> AttributeSet {
        let id = props.str("id");
        let mut attributes = base_attributes(self, props)
            .with("id", id)
            .with("role", "dialog")
            .with("aria-modal", "true");
        if props.opt_str("title").is_some() {
            attributes.insert("aria-labelledby", format!("{id}-title"));
        }
        attributes
    }
}

/// `ds-modal`: an accessible dialog with optional title, close button and footer.
///
/// # Errors
/// Propagates template compilation errors.
pub fn modal(expander: &DirectiveExpander) -> Result<ComponentDefinition, EngineError> {
    ComponentDefinition::builder()
        .props([
            PropSpec::string("id").default_value("ds-modal"),
            PropSpec::string("title"),
            PropSpec::one_of("size", MODAL_SIZES).default_value("md"),
            PropSpec::boolean("open"),
            PropSpec::boolean("closable").default_value(true),
        ])
        .template(MODAL_TEMPLATE)
        .helpers(ModalHelpers)
        .description("Dialog bound to the client-side modal component")
        .build(expander)
}
