use std::borrow::Cow;

/// Errors raised while defining, registering or rendering components.
#[dskit_derive::dskit_error]
pub enum EngineError {
    /// A tag reference that no registered component answers to.
    #[error("Unknown component '{tag}'{}", format_context(.context))]
    UnknownComponent { tag: String, context: Option<Cow<'static, str>> },

    /// A different definition was registered under an existing tag with the `reject` policy.
    #[error(
        "Component '{tag}' is already registered with a different definition{}",
        format_context(.context)
    )]
    DuplicateComponent { tag: String, context: Option<Cow<'static, str>> },

    #[error("Invalid tag name '{tag}'{}: {message}", format_context(.context))]
    InvalidTagName { tag: String, message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A caller value that cannot be read as the declared property type.
    #[error(
        "Invalid value for property '{property}' of '{component}'{}: expected {expected}, found {found}",
        format_context(.context)
    )]
    InvalidPropertyType {
        component: String,
        property: String,
        expected: String,
        found: String,
        context: Option<Cow<'static, str>>,
    },

    #[error("Unknown property '{property}' for '{component}'{}", format_context(.context))]
    UnknownProperty { component: String, property: String, context: Option<Cow<'static, str>> },

    /// A schema, template or helper set that cannot form a component.
    #[error("Invalid component definition{}: {message}", format_context(.context))]
    InvalidDefinition { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Directive syntax error at {line}:{column}{}: {message}", format_context(.context))]
    DirectiveSyntax {
        message: Cow<'static, str>,
        line: usize,
        column: usize,
        context: Option<Cow<'static, str>>,
    },

    #[error("Template syntax error at {line}:{column}{}: {message}", format_context(.context))]
    TemplateSyntax {
        message: Cow<'static, str>,
        line: usize,
        column: usize,
        context: Option<Cow<'static, str>>,
    },

    #[error("Unknown template variable '{name}' at {line}:{column}{}", format_context(.context))]
    UnknownVariable {
        name: String,
        line: usize,
        column: usize,
        context: Option<Cow<'static, str>>,
    },

    #[error("Markup syntax error at {line}:{column}{}: {message}", format_context(.context))]
    MarkupSyntax {
        message: Cow<'static, str>,
        line: usize,
        column: usize,
        context: Option<Cow<'static, str>>,
    },

    #[error("Component tags nested deeper than {limit}{}", format_context(.context))]
    NestingTooDeep { limit: usize, context: Option<Cow<'static, str>> },

    #[error("Internal engine error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
