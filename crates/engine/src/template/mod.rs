//! Component templates, compiled once and rendered per call.
//!
//! ```text
//! {{ expr }}              escaped output
//! {!! expr !!}            raw output
//! {{-- comment --}}       dropped
//! @if(cond) … @else … @endif
//! @@                      literal '@'
//!
//! expr := <property> | attributes | slot | slots.<name>
//!       | helpers.classes | helpers.styles | helpers.variables | helpers.icon
//! cond := "!"? expr (("==" | "!=") 'literal')?
//! ```
//!
//! `attributes` and slots hold markup and are always emitted raw.

mod lexer;
mod parser;

use crate::attributes::AttributeSet;
use crate::directive::DirectiveExpander;
use crate::error::EngineError;
use crate::helpers::Derived;
use crate::html;
use crate::props::{PropSchema, PropertyBag};
use crate::slots::Slots;
use std::borrow::Cow;

/// Values produced by the component helpers, addressable as `helpers.<name>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum HelperValue {
    Classes,
    Styles,
    Variables,
    Icon,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Expr {
    Prop(String),
    Attributes,
    Slot,
    NamedSlot(String),
    Helper(HelperValue),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Comparison {
    Eq,
    Ne,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Condition {
    negate: bool,
    expr: Expr,
    compare: Option<(Comparison, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Node {
    Text(String),
    Output { expr: Expr, raw: bool },
    If { cond: Condition, then: Vec<Node>, otherwise: Vec<Node> },
}

/// Everything a template can read during one render.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    pub props: &'a PropertyBag,
    pub attributes: &'a AttributeSet,
    pub slots: &'a Slots,
    pub derived: &'a Derived,
}

/// A compiled template.
///
/// Directives are expanded and every name is resolved at compile time, so rendering
/// cannot fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    nodes: Vec<Node>,
}

impl Template {
    /// Expands directives in `source`, then parses it against `schema`.
    ///
    /// # Errors
    /// * [`EngineError::DirectiveSyntax`] for a malformed directive;
    /// * [`EngineError::TemplateSyntax`] for malformed tags or blocks;
    /// * [`EngineError::UnknownVariable`] for a name that is neither a declared property
    ///   nor a template variable.
    pub fn compile(
        source: impl Into<String>,
        schema: &PropSchema,
        expander: &DirectiveExpander,
    ) -> Result<Self, EngineError> {
        let source = source.into();
        let nodes = {
            let pieces = expander.pieces(&source)?;
            let tokens = lexer::tokenize(&source, &pieces)?;
            parser::parse(&source, tokens, schema)?
        };
        Ok(Self { source, nodes })
    }

    /// The template as written, before directive expansion.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn render(&self, scope: &Scope<'_>) -> String {
        let mut out = String::with_capacity(self.source.len() * 2);
        render_nodes(&self.nodes, scope, &mut out);
        out
    }
}

fn render_nodes(nodes: &[Node], scope: &Scope<'_>, out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Output { expr, raw } => {
                let value = text_of(expr, scope);
                if *raw || is_markup(expr) {
                    out.push_str(&value);
                } else {
                    out.push_str(&html::escape(&value));
                }
            },
            Node::If { cond, then, otherwise } => {
                let branch = if holds(cond, scope) { then } else { otherwise };
                render_nodes(branch, scope, out);
            },
        }
    }
}

const fn is_markup(expr: &Expr) -> bool {
    matches!(expr, Expr::Attributes | Expr::Slot | Expr::NamedSlot(_))
}

fn text_of<'a>(expr: &Expr, scope: &Scope<'a>) -> Cow<'a, str> {
    match expr {
        Expr::Prop(name) => match scope.props.get(name) {
            Some(value) => Cow::Owned(value.to_string()),
            None => Cow::Borrowed(""),
        },
        Expr::Attributes => Cow::Owned(scope.attributes.to_string()),
        Expr::Slot => Cow::Borrowed(scope.slots.default_slot().as_str()),
        Expr::NamedSlot(name) => {
            Cow::Borrowed(scope.slots.named(name).map(|slot| slot.as_str()).unwrap_or_default())
        },
        Expr::Helper(HelperValue::Classes) => Cow::Borrowed(scope.derived.classes.as_str()),
        Expr::Helper(HelperValue::Styles) => Cow::Borrowed(scope.derived.styles.as_str()),
        Expr::Helper(HelperValue::Variables) => Cow::Borrowed(scope.derived.variables.as_str()),
        Expr::Helper(HelperValue::Icon) => {
            Cow::Borrowed(scope.derived.icon.as_deref().unwrap_or_default())
        },
    }
}

fn is_truthy(expr: &Expr, scope: &Scope<'_>) -> bool {
    match expr {
        Expr::Prop(name) => scope.props.flag(name),
        Expr::Attributes => !scope.attributes.is_empty(),
        Expr::Slot => !scope.slots.default_slot().is_empty(),
        Expr::NamedSlot(name) => scope.slots.named(name).is_some_and(|slot| !slot.is_empty()),
        Expr::Helper(HelperValue::Icon) => scope.derived.icon.is_some(),
        Expr::Helper(_) => !text_of(expr, scope).is_empty(),
    }
}

fn holds(cond: &Condition, scope: &Scope<'_>) -> bool {
    let result = match &cond.compare {
        None => is_truthy(&cond.expr, scope),
        Some((Comparison::Eq, literal)) => text_of(&cond.expr, scope) == literal.as_str(),
        Some((Comparison::Ne, literal)) => text_of(&cond.expr, scope) != literal.as_str(),
    };
    result != cond.negate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props::PropSpec;
    use crate::slots::Slot;

    const VARIANTS: &[&str] = &["info", "error"];

    fn schema() -> PropSchema {
        PropSchema::new([
            PropSpec::one_of("variant", VARIANTS),
            PropSpec::string("title"),
            PropSpec::boolean("open"),
        ])
        .unwrap()
    }

    fn compile(source: &str) -> Result<Template, EngineError> {
        Template::compile(source, &schema(), &DirectiveExpander::new())
    }

    fn render(template: &Template, props: &PropertyBag, slots: &Slots) -> String {
        let derived = Derived {
            classes: "ds-x ds-x--info".to_owned(),
            icon: Some("ds-icon ds-icon--info".to_owned()),
            ..Derived::default()
        };
        let attributes = AttributeSet::new().with("class", derived.classes.clone());
        let bag = schema().apply("ds-x", props).unwrap();
        template.render(&Scope { props: &bag, attributes: &attributes, slots, derived: &derived })
    }

    #[test]
    fn outputs_are_escaped_unless_raw() {
        let template = compile("<h2>{{ title }}</h2>{!! title !!}").unwrap();
        let props = PropertyBag::new().with("title", "<b>&</b>");
        assert_eq!(
            render(&template, &props, &Slots::new()),
            "<h2>&lt;b&gt;&amp;&lt;/b&gt;</h2><b>&</b>"
        );
    }

    #[test]
    fn attributes_and_slots_are_markup() {
        let template =
            compile("<div {{ attributes }}>{{ slot }}|{{ slots.footer }}</div>").unwrap();
        let slots = Slots::content(Slot::new("<p>a</p>")).with_named("footer", "<i>f</i>");
        assert_eq!(
            render(&template, &PropertyBag::new(), &slots),
            r#"<div class="ds-x ds-x--info"><p>a</p>|<i>f</i></div>"#
        );
    }

    #[test]
    fn conditionals() {
        let template = compile(
            "@if(title)<h2>{{ title }}</h2>@endif\
             @if(variant == 'error')E@else{{ variant }}@endif\
             @if(!open)closed@endif\
             @if(helpers.icon)<i class=\"{{ helpers.icon }}\"></i>@endif\
             @if(slots.footer)F@endif",
        )
        .unwrap();

        assert_eq!(
            render(&template, &PropertyBag::new(), &Slots::new()),
            "infoclosed<i class=\"ds-icon ds-icon--info\"></i>"
        );

        let props =
            PropertyBag::new().with("title", "T").with("variant", "error").with("open", true);
        let slots = Slots::new().with_named("footer", "x");
        assert_eq!(
            render(&template, &props, &slots),
            "<h2>T</h2>E<i class=\"ds-icon ds-icon--info\"></i>F"
        );
    }

    #[test]
    fn nested_blocks() {
        let template =
            compile("@if(open)a@if(title)b@else c@endif d@else e@endif").unwrap();
        assert_eq!(render(&template, &PropertyBag::new(), &Slots::new()), " e");
        let props = PropertyBag::new().with("open", true);
        assert_eq!(render(&template, &props, &Slots::new()), "a c d");
    }

    #[test]
    fn directives_are_expanded_before_parsing() {
        let template = compile(r#"<div @dsState(modal, { open: "yes" })>{{-- x --}}@@</div>"#)
            .unwrap();
        assert_eq!(
            render(&template, &PropertyBag::new(), &Slots::new()),
            r#"<div x-data="DS.component.modal({ open: &quot;yes&quot; })">@</div>"#
        );
        assert!(template.source().contains("@dsState"));
    }

    #[test]
    fn directives_inside_comments_are_dropped_unexpanded() {
        let template =
            compile("<div>{{-- bound with @dsState(modal) --}}x{{-- @dsAction(a/b) --}}</div>")
                .unwrap();
        assert_eq!(render(&template, &PropertyBag::new(), &Slots::new()), "<div>x</div>");

        let template = compile("{{-- @@dsState --}}<b @dsAction(save)></b>").unwrap();
        assert_eq!(
            render(&template, &PropertyBag::new(), &Slots::new()),
            r#"<b hx-post="/api/ds/save" hx-indicator=".ds-loading" hx-swap="outerHTML"></b>"#
        );
        assert!(matches!(
            compile("{{-- @dsState(modal) x"),
            Err(EngineError::TemplateSyntax { .. })
        ));
    }

    #[test]
    fn unknown_names_fail_at_compile_time() {
        let err = compile("<p>\n  {{ subtitle }}</p>").unwrap_err();
        assert!(
            matches!(
                &err,
                EngineError::UnknownVariable { name, line: 2, column: 6, .. } if name == "subtitle"
            ),
            "{err}"
        );
        assert!(matches!(compile("{{ helpers.color }}"), Err(EngineError::UnknownVariable { .. })));
        assert!(matches!(compile("{{ slots }}"), Err(EngineError::TemplateSyntax { .. })));
        assert!(matches!(compile("{{ a + b }}"), Err(EngineError::TemplateSyntax { .. })));
    }

    #[test]
    fn unbalanced_blocks_fail() {
        for source in ["@if(open)x", "x@endif", "@else", "@if(open)a@else b@else c@endif"] {
            assert!(
                matches!(compile(source), Err(EngineError::TemplateSyntax { .. })),
                "{source:?}"
            );
        }
        assert!(matches!(
            compile("@if(variant == error)x@endif"),
            Err(EngineError::TemplateSyntax { .. })
        ));
    }
}
