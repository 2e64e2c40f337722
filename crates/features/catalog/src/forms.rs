//! Form controls: `ds-button` and `ds-input`.

use crate::{SIZES, icon_class};
use dskit_engine::base_attributes;
use dskit_engine::prelude::*;

pub const BUTTON: &str = "button";
pub const INPUT: &str = "input";

pub const BUTTON_VARIANTS: &[&str] =
    &["primary", "secondary", "outline", "ghost", "danger", "link"];
pub const BUTTON_TYPES: &[&str] = &["button", "submit", "reset"];
pub const ICON_POSITIONS: &[&str] = &["left", "right"];
pub const INPUT_TYPES: &[&str] =
    &["text", "email", "password", "number", "search", "tel", "url", "date"];

const BUTTON_TEMPLATE: &str = "<button {{ attributes }}>\
    @if(loading)<span class=\"ds-button__spinner\" aria-hidden=\"true\"></span>@endif\
    @if(helpers.icon)@if(icon-position == 'left')\
    <i class=\"{{ helpers.icon }}\" aria-hidden=\"true\"></i>@endif@endif\
    <span class=\"ds-button__label\">{{ slot }}</span>\
    @if(helpers.icon)@if(icon-position == 'right')\
    <i class=\"{{ helpers.icon }}\" aria-hidden=\"true\"></i>@endif@endif\
    </button>";

const INPUT_TEMPLATE: &str = "<div {{ attributes }}>\
    @if(label)<label class=\"ds-input__label\"@if(id) for=\"{{ id }}\"@endif>{{ label }}\
    @if(required)<span class=\"ds-input__required\" aria-hidden=\"true\">*</span>@endif\
    </label>@endif\
    <input class=\"ds-input__control\" type=\"{{ type }}\"\
    @if(id) id=\"{{ id }}\"@endif\
    @if(name) name=\"{{ name }}\"@endif\
    @if(value) value=\"{{ value }}\"@endif\
    @if(placeholder) placeholder=\"{{ placeholder }}\"@endif\
    @if(required) required@endif\
    @if(disabled) disabled@endif\
    @if(error) aria-invalid=\"true\"@endif>\
    @if(error)<p class=\"ds-input__error\" role=\"alert\">{{ error }}</p>\
    @else@if(hint)<p class=\"ds-input__hint\">{{ hint }}</p>@endif@endif\
    </div>";

#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonHelpers;

impl ComponentHelpers for ButtonHelpers {
    fn classes(&self, props: &PropertyBag) -> ClassList {
        ClassList::block("ds-button")
            .modifier(props.str("variant"))
            .modifier(props.str("size"))
            .modifier_if(props.flag("full-width"), "full-width")
            .modifier_if(props.flag("loading"), "loading")
            .modifier_if(props.flag("disabled"), "disabled")
    }

    fn icon(&self, props: &PropertyBag) -> Option<String> {
        props.opt_str("icon").map(icon_class)
    }

    fn attributes(&self, props: &PropertyBag) -> AttributeSet {
        let busy = props.flag("loading");
        let mut attributes = base_attributes(self, props).with("type", props.str("type"));
        if busy || props.flag("disabled") {
            attributes.insert("disabled", "");
        }
        if busy {
            attributes.insert("aria-busy", "true");
        }
        attributes
    }
}

/// `ds-button`: a native button with variant, size, loading and icon support.
///
/// # Errors
/// Propagates template compilation errors.
pub fn button(expander: &DirectiveExpander) -> Result<ComponentDefinition, EngineError> {
    ComponentDefinition::builder()
        .props([
            PropSpec::one_of("variant", BUTTON_VARIANTS),
            PropSpec::one_of("size", SIZES).default_value("md"),
            PropSpec::one_of("type", BUTTON_TYPES),
            PropSpec::boolean("disabled"),
            PropSpec::boolean("loading"),
            PropSpec::string("icon"),
            PropSpec::one_of("icon-position", ICON_POSITIONS),
            PropSpec::boolean("full-width"),
        ])
        .template(BUTTON_TEMPLATE)
        .helpers(ButtonHelpers)
        .description("Action button")
        .build(expander)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InputHelpers;

impl ComponentHelpers for InputHelpers {
    fn classes(&self, props: &PropertyBag) -> ClassList {
        ClassList::block("ds-input")
            .modifier(props.str("size"))
            .modifier_if(props.opt_str("error").is_some(), "invalid")
            .modifier_if(props.flag("disabled"), "disabled")
    }
}

/// `ds-input`: a labelled text field with hint and error messages.
///
/// # Errors
/// Propagates template compilation errors.
pub fn input(expander: &DirectiveExpander) -> Result<ComponentDefinition, EngineError> {
    ComponentDefinition::builder()
        .props([
            PropSpec::one_of("type", INPUT_TYPES),
            PropSpec::string("id"),
            PropSpec::string("name"),
            PropSpec::string("label"),
            PropSpec::string("placeholder"),
            PropSpec::string("value"),
            PropSpec::string("hint"),
            PropSpec::string("error"),
            PropSpec::one_of("size", SIZES).default_value("md"),
            PropSpec::boolean("required"),
            PropSpec::boolean("disabled"),
        ])
        .template(INPUT_TEMPLATE)
        .helpers(InputHelpers)
        .description("Text field with label, hint and validation message")
        .build(expander)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props() -> PropertyBag {
        PropertyBag::new()
            .with("variant", "danger")
            .with("size", "lg")
            .with("type", "submit")
            .with("loading", true)
            .with("disabled", false)
            .with("full-width", false)
            .with("icon", Value::Null)
    }

    #[test]
    fn button_classes_follow_bem() {
        assert_eq!(
            ButtonHelpers.classes(&props()).to_string(),
            "ds-button ds-button--danger ds-button--lg ds-button--loading"
        );
    }

    #[test]
    fn loading_button_is_disabled_and_busy() {
        let attributes = ButtonHelpers.attributes(&props());
        assert_eq!(attributes.get("type"), Some("submit"));
        assert_eq!(attributes.get("disabled"), Some(""));
        assert_eq!(attributes.get("aria-busy"), Some("true"));
        assert_eq!(ButtonHelpers.icon(&props()), None);
    }
}
