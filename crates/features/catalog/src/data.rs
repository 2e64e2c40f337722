//! `ds-table`.

use dskit_engine::prelude::*;

pub const TABLE: &str = "table";

const TABLE_TEMPLATE: &str = "@if(responsive)<div class=\"ds-table__scroll\">@endif\
    <table {{ attributes }}>\
    @if(caption)<caption class=\"ds-table__caption\">{{ caption }}</caption>@endif\
    @if(slots.head)<thead>{{ slots.head }}</thead>@endif\
    <tbody>{{ slot }}</tbody>\
    @if(slots.foot)<tfoot>{{ slots.foot }}</tfoot>@endif\
    </table>\
    @if(responsive)</div>@endif";

#[derive(Debug, Clone, Copy, Default)]
pub struct TableHelpers;

impl ComponentHelpers for TableHelpers {
    fn classes(&self, props: &PropertyBag) -> ClassList {
        ["striped", "hoverable", "bordered", "compact"]
            .into_iter()
            .fold(ClassList::block("ds-table"), |classes, modifier| {
                classes.modifier_if(props.flag(modifier), modifier)
            })
    }
}

/// `ds-table`: a data table with optional caption, head and foot slots, wrapped in a
/// horizontal scroller unless `responsive` is off.
///
/// # Errors
/// Propagates template compilation errors.
pub fn table(expander: &DirectiveExpander) -> Result<ComponentDefinition, EngineError> {
    ComponentDefinition::builder()
        .props([
            PropSpec::boolean("striped"),
            PropSpec::boolean("hoverable"),
            PropSpec::boolean("bordered"),
            PropSpec::boolean("compact"),
            PropSpec::boolean("responsive").default_value(true),
            PropSpec::string("caption"),
        ])
        .template(TABLE_TEMPLATE)
        .helpers(TableHelpers)
        .description("Data table")
        .build(expander)
}
