use dskit_derive::dskit_error;
use std::borrow::Cow;

#[dskit_error]
pub enum DemoError {
    #[error("Parse error{}: {source}", format_context(.context))]
    Parse {
        #[source]
        source: std::num::ParseIntError,
        context: Option<Cow<'static, str>>,
    },

    #[error("Missing value{}: {message}", format_context(.context))]
    Missing { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn parse(raw: &str) -> Result<u16, DemoError> {
    raw.parse::<u16>().context("parsing port")
}

fn main() {
    let err = parse("nope").unwrap_err();
    assert!(err.to_string().starts_with("Parse error (parsing port)"));

    let err: Result<(), DemoError> =
        Err(DemoError::Missing { message: "port".into(), context: None });
    let err = err.context("reading config").unwrap_err();
    assert_eq!(err.to_string(), "Missing value (reading config): port");

    let internal: DemoError = "boom".into();
    assert_eq!(internal.to_string(), "Internal error: boom");
}
