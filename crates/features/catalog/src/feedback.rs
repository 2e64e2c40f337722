//! Feedback components: `ds-alert` and `ds-loading`.
//!
//! The loading indicator carries the `ds-loading` class, which is also the default
//! `hx-indicator` selector of `@dsAction`.

use crate::{SIZES, icon_class};
use dskit_engine::base_attributes;
use dskit_engine::prelude::*;

pub const ALERT: &str = "alert";
pub const LOADING: &str = "loading";

pub const ALERT_VARIANTS: &[&str] = &["info", "success", "warning", "error"];
pub const LOADING_VARIANTS: &[&str] = &["spinner", "dots"];

const ALERT_TEMPLATE: &str = "<div {{ attributes }}>\
    <i class=\"{{ helpers.icon }}\" aria-hidden=\"true\"></i>\
    <div class=\"ds-alert__content\">\
    @if(title)<p class=\"ds-alert__title\">{{ title }}</p>@endif\
    <div class=\"ds-alert__message\">{{ slot }}</div>\
    </div>\
    @if(dismissible)<button type=\"button\" class=\"ds-alert__dismiss\" aria-label=\"Dismiss\" \
    @dsAction(dismiss)><i class=\"ds-icon ds-icon--x\" aria-hidden=\"true\"></i></button>@endif\
    </div>";

const LOADING_TEMPLATE: &str = "<div {{ attributes }}>\
    @if(variant == 'dots')<span class=\"ds-loading__dots\" aria-hidden=\"true\">\
    <span></span><span></span><span></span></span>\
    @else<span class=\"ds-loading__spinner\" aria-hidden=\"true\"></span>@endif\
    <span class=\"ds-loading__label\">{{ label }}</span>\
    </div>";

/// Icon shown by an alert of `variant` without an explicit icon.
#[must_use]
pub fn variant_icon(variant: &str) -> &'static str {
    match variant {
        "success" => "check-circle",
        "warning" => "alert-triangle",
        "error" => "x-circle",
        _ => "info-circle",
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AlertHelpers;

impl ComponentHelpers for AlertHelpers {
    fn classes(&self, props: &PropertyBag) -> ClassList {
        ClassList::block("ds-alert")
            .modifier(props.str("variant"))
            .modifier_if(props.flag("dismissible"), "dismissible")
    }

    fn icon(&self, props: &PropertyBag) -> Option<String> {
        let name = props.opt_str("icon").unwrap_or_else(|| variant_icon(props.str("variant")));
        Some(icon_class(name))
    }

    fn attributes(&self, props: &PropertyBag) -> AttributeSet {
        let role = match props.str("variant") {
            "warning" | "error" => "alert",
            _ => "status",
        };
        base_attributes(self, props).with("role", role)
    }
}

/// `ds-alert`: a status message with a variant icon and an optional dismiss action.
///
/// # Errors
/// Propagates template compilation errors.
pub fn alert(expander: &DirectiveExpander) -> Result<ComponentDefinition, EngineError> {
    ComponentDefinition::builder()
        .props([
            PropSpec::one_of("variant", ALERT_VARIANTS),
            PropSpec::string("title"),
            PropSpec::boolean("dismissible"),
            PropSpec::string("icon"),
        ])
        .template(ALERT_TEMPLATE)
        .helpers(AlertHelpers)
        .description("Status message")
        .build(expander)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LoadingHelpers;

impl ComponentHelpers for LoadingHelpers {
    fn classes(&self, props: &PropertyBag) -> ClassList {
        ClassList::block("ds-loading")
            .modifier(props.str("variant"))
            .modifier(props.str("size"))
            .modifier_if(props.flag("overlay"), "overlay")
    }

    fn attributes(&self, props: &PropertyBag) -> AttributeSet {
        base_attributes(self, props).with("role", "status").with("aria-live", "polite")
    }
}

/// `ds-loading`: a spinner or dots indicator with an accessible label.
///
/// # Errors
/// Propagates template compilation errors.
pub fn loading(expander: &DirectiveExpander) -> Result<ComponentDefinition, EngineError> {
    ComponentDefinition::builder()
        .props([
            PropSpec::one_of("variant", LOADING_VARIANTS),
            PropSpec::one_of("size", SIZES).default_value("md"),
            PropSpec::string("label").default_value("Loading..."),
            PropSpec::boolean("overlay"),
        ])
        .template(LOADING_TEMPLATE)
        .helpers(LoadingHelpers)
        .description("Loading indicator")
        .build(expander)
}
