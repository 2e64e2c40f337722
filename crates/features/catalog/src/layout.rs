//! Layout containers: `ds-card` and `ds-grid`.

use crate::SPACING;
use dskit_engine::base_attributes;
use dskit_engine::prelude::*;

pub const CARD: &str = "card";
pub const GRID: &str = "grid";

pub const CARD_VARIANTS: &[&str] = &["elevated", "outlined", "flat"];

/// Upper bound of `ds-grid` columns; larger values are clamped.
pub const MAX_GRID_COLUMNS: i64 = 12;

const CARD_TEMPLATE: &str = "<article {{ attributes }}>\
    @if(slots.header)<header class=\"ds-card__header\">{{ slots.header }}</header>\
    @else@if(title)<header class=\"ds-card__header\">\
    <h3 class=\"ds-card__title\">{{ title }}</h3>\
    @if(subtitle)<p class=\"ds-card__subtitle\">{{ subtitle }}</p>@endif\
    </header>@endif@endif\
    <div class=\"ds-card__body\">{{ slot }}</div>\
    @if(slots.footer)<footer class=\"ds-card__footer\">{{ slots.footer }}</footer>@endif\
    </article>";

const GRID_TEMPLATE: &str = "<div {{ attributes }}>{{ slot }}</div>";

#[derive(Debug, Clone, Copy, Default)]
pub struct CardHelpers;

impl ComponentHelpers for CardHelpers {
    fn classes(&self, props: &PropertyBag) -> ClassList {
        ClassList::block("ds-card")
            .modifier(props.str("variant"))
            .modifier(&format!("padding-{}", props.str("padding")))
            .modifier_if(props.flag("interactive"), "interactive")
    }

    fn attributes(&self, props: &PropertyBag) -> AttributeSet {
        let attributes = base_attributes(self, props);
        if props.flag("interactive") { attributes.with("tabindex", "0") } else { attributes }
    }
}

/// `ds-card`: a content container with optional header, title and footer.
///
/// # Errors
/// Propagates template compilation errors.
pub fn card(expander: &DirectiveExpander) -> Result<ComponentDefinition, EngineError> {
    ComponentDefinition::builder()
        .props([
            PropSpec::one_of("variant", CARD_VARIANTS),
            PropSpec::one_of("padding", SPACING).default_value("md"),
            PropSpec::string("title"),
            PropSpec::string("subtitle"),
            PropSpec::boolean("interactive"),
        ])
        .template(CARD_TEMPLATE)
        .helpers(CardHelpers)
        .description("Content container with header, body and footer")
        .build(expander)
}

/// Column count, track template and gap of a responsive grid.
///
/// The column count is exposed as `--ds-grid-columns`; with a `min-column-width` the
/// tracks auto-fit instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridHelpers;

impl GridHelpers {
    fn columns(props: &PropertyBag) -> i64 {
        props.int("columns").unwrap_or(3).clamp(1, MAX_GRID_COLUMNS)
    }
}

impl ComponentHelpers for GridHelpers {
    fn classes(&self, props: &PropertyBag) -> ClassList {
        ClassList::block("ds-grid").modifier(&format!("gap-{}", props.str("gap")))
    }

    fn inline_styles(&self, props: &PropertyBag) -> StyleMap {
        let tracks = match props.opt_str("min-column-width") {
            Some(width) => format!("repeat(auto-fit, minmax({width}, 1fr))"),
            None => "repeat(var(--ds-grid-columns), minmax(0, 1fr))".to_owned(),
        };
        StyleMap::new().with("grid-template-columns", tracks)
    }

    fn css_variables(&self, props: &PropertyBag) -> StyleMap {
        StyleMap::new().with("--ds-grid-columns", Self::columns(props).to_string())
    }
}

/// `ds-grid`: a CSS grid with a fixed or auto-fitting column count.
///
/// # Errors
/// Propagates template compilation errors.
pub fn grid(expander: &DirectiveExpander) -> Result<ComponentDefinition, EngineError> {
    ComponentDefinition::builder()
        .props([
            PropSpec::integer("columns").default_value(3),
            PropSpec::one_of("gap", SPACING).default_value("md"),
            PropSpec::string("min-column-width"),
        ])
        .template(GRID_TEMPLATE)
        .helpers(GridHelpers)
        .description("Responsive grid layout")
        .build(expander)
}
