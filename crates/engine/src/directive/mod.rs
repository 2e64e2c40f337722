//! Compile-time directive expansion.
//!
//! Template sources may call two directives, expanded once before template compilation:
//!
//! * `@dsState(component, config?)` becomes an `x-data` client-state binding;
//! * `@dsAction(action, method?)` becomes `hx-*` attributes pointing at the action route.
//!
//! `@@` is an escaped `@` and other `@words` (`@click`, `@if`) are left untouched, as is
//! everything inside a `{{-- comment --}}`.

mod parser;

use crate::error::EngineError;
use crate::html;
use crate::syntax::{
    COMMENT_CLOSE, COMMENT_OPEN, ScanError, at_word_boundary, find_closing_paren, line_col,
    word_at,
};
use dskit_domain::config::DirectiveConfig;
use dskit_domain::constants::{ACTION_DIRECTIVE, STATE_DIRECTIVE};
use parser::{Arg, parse_arguments};
use std::borrow::Cow;
use std::str::FromStr;
use tracing::trace;

/// HTTP methods accepted by the action directive.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum HttpMethod {
    Get,
    #[default]
    Post,
    Put,
    Patch,
    Delete,
}

/// A span of a template source after expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Piece<'a> {
    /// Untouched source text starting at byte `offset`.
    Source { text: &'a str, offset: usize },
    /// Attribute text produced by a directive.
    Expanded(String),
}

#[derive(Debug, Clone, Copy)]
enum Directive {
    State,
    Action,
}

/// Expands directives using the configured namespace, route prefix and htmx settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectiveExpander {
    config: DirectiveConfig,
    default_method: HttpMethod,
}

impl DirectiveExpander {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    /// Returns [`EngineError::InvalidDefinition`] when `default_method` is not a supported
    /// HTTP method.
    pub fn from_config(config: &DirectiveConfig) -> Result<Self, EngineError> {
        let default_method = HttpMethod::from_str(&config.default_method).map_err(|_| {
            EngineError::InvalidDefinition {
                message: format!("unsupported default HTTP method '{}'", config.default_method)
                    .into(),
                context: Some("directives.default_method".into()),
            }
        })?;
        Ok(Self { config: config.clone(), default_method })
    }

    #[must_use]
    pub const fn config(&self) -> &DirectiveConfig {
        &self.config
    }

    /// Expands every directive in `source`.
    ///
    /// # Errors
    /// Returns [`EngineError::DirectiveSyntax`] with the position of the first malformed
    /// directive.
    pub fn expand(&self, source: &str) -> Result<String, EngineError> {
        let pieces = self.pieces(source)?;
        let mut out = String::with_capacity(source.len());
        for piece in &pieces {
            match piece {
                Piece::Source { text, .. } => out.push_str(text),
                Piece::Expanded(text) => out.push_str(text),
            }
        }
        Ok(out)
    }

    /// Expands the arguments of one `@dsState(...)` call (the text between the parentheses).
    ///
    /// ```
    /// use dskit_engine::directive::DirectiveExpander;
    ///
    /// let expander = DirectiveExpander::new();
    /// assert_eq!(
    ///     expander.expand_state("modal").unwrap(),
    ///     r#"x-data="DS.component.modal({})""#
    /// );
    /// ```
    ///
    /// # Errors
    /// Returns [`EngineError::DirectiveSyntax`] for malformed arguments.
    pub fn expand_state(&self, raw_args: &str) -> Result<String, EngineError> {
        self.state(raw_args, 0).map_err(|e| syntax_error(raw_args, &e))
    }

    /// Expands the arguments of one `@dsAction(...)` call.
    ///
    /// # Errors
    /// Returns [`EngineError::DirectiveSyntax`] for malformed arguments or an unsupported
    /// method.
    pub fn expand_action(&self, raw_args: &str) -> Result<String, EngineError> {
        self.action(raw_args, 0).map_err(|e| syntax_error(raw_args, &e))
    }

    /// Splits `source` into untouched text and expanded directives.
    pub(crate) fn pieces<'a>(&self, source: &'a str) -> Result<Vec<Piece<'a>>, EngineError> {
        let mut pieces = Vec::new();
        let mut cursor = 0;
        let mut search = 0;

        while let Some(found) = source[search..].find(['@', '{']) {
            let at = search + found;
            if source[at..].starts_with(COMMENT_OPEN) {
                // An unterminated comment is reported by the template lexer.
                let body = at + COMMENT_OPEN.len();
                match source[body..].find(COMMENT_CLOSE) {
                    Some(len) => search = body + len + COMMENT_CLOSE.len(),
                    None => break,
                }
                continue;
            }
            if source[at..].starts_with('{') {
                search = at + 1;
                continue;
            }
            if source[at + 1..].starts_with('@') {
                search = at + 2;
                continue;
            }

            let name = word_at(source, at + 1);
            let directive = match name {
                STATE_DIRECTIVE if at_word_boundary(source, at) => Directive::State,
                ACTION_DIRECTIVE if at_word_boundary(source, at) => Directive::Action,
                _ => {
                    search = at + 1;
                    continue;
                },
            };

            let open = at + 1 + name.len();
            if !source[open..].starts_with('(') {
                let message = format!("expected '(' after @{name}");
                return Err(syntax_error(source, &ScanError { message, offset: open }));
            }
            let close = find_closing_paren(source, open).map_err(|e| syntax_error(source, &e))?;
            let args = &source[open + 1..close];

            let expanded = match directive {
                Directive::State => self.state(args, open + 1),
                Directive::Action => self.action(args, open + 1),
            }
            .map_err(|e| syntax_error(source, &e))?;
            trace!(directive = name, %expanded, "Expanded directive");

            if cursor < at {
                pieces.push(Piece::Source { text: &source[cursor..at], offset: cursor });
            }
            pieces.push(Piece::Expanded(expanded));
            cursor = close + 1;
            search = cursor;
        }

        if cursor < source.len() {
            pieces.push(Piece::Source { text: &source[cursor..], offset: cursor });
        }
        Ok(pieces)
    }

    fn state(&self, args: &str, base: usize) -> Result<String, ScanError> {
        let parsed = parse_arguments(args, base)?;
        let component = parsed.name;
        if !is_js_identifier(component.text) {
            return Err(ScanError {
                message: format!("'{}' is not a valid component name", component.text),
                offset: component.offset,
            });
        }

        let config = match parsed.rest.as_slice() {
            [] => "{}",
            [config] => config.text,
            [_, extra, ..] => return Err(too_many(STATE_DIRECTIVE, extra)),
        };

        Ok(format!(
            r#"x-data="{}.{}({})""#,
            html::escape(&self.config.state_namespace),
            component.text,
            config.replace('"', "&quot;")
        ))
    }

    fn action(&self, args: &str, base: usize) -> Result<String, ScanError> {
        let parsed = parse_arguments(args, base)?;
        let action = parsed.name;
        if !is_path_segment(action.text) {
            return Err(ScanError {
                message: format!("'{}' is not a valid action name", action.text),
                offset: action.offset,
            });
        }

        let method = match parsed.rest.as_slice() {
            [] => self.default_method,
            [method] => parse_method(method)?,
            [_, extra, ..] => return Err(too_many(ACTION_DIRECTIVE, extra)),
        };

        Ok(format!(
            r#"hx-{method}="{}{}" hx-indicator="{}" hx-swap="{}""#,
            html::escape(&self.config.action_prefix),
            action.text,
            html::escape(&self.config.loading_indicator),
            html::escape(&self.config.swap)
        ))
    }
}

fn parse_method(arg: &Arg<'_>) -> Result<HttpMethod, ScanError> {
    let name = unquote(arg.text);
    HttpMethod::from_str(name).map_err(|_| ScanError {
        message: format!("unsupported HTTP method '{name}'"),
        offset: arg.offset,
    })
}

fn unquote(text: &str) -> &str {
    ['\'', '"']
        .iter()
        .find_map(|q| text.strip_prefix(*q).and_then(|t| t.strip_suffix(*q)))
        .unwrap_or(text)
}

fn too_many(directive: &str, extra: &Arg<'_>) -> ScanError {
    ScanError {
        message: format!("@{directive} takes at most 2 arguments"),
        offset: extra.offset,
    }
}

fn is_js_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn is_path_segment(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && name.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

fn syntax_error(source: &str, error: &ScanError) -> EngineError {
    let (line, column) = line_col(source, error.offset);
    EngineError::DirectiveSyntax {
        message: Cow::Owned(error.message.clone()),
        line,
        column,
        context: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_binding_defaults() {
        let expander = DirectiveExpander::new();
        assert_eq!(expander.expand_state("modal").unwrap(), r#"x-data="DS.component.modal({})""#);
        assert_eq!(
            expander.expand_state("'dropdown', { open: false }").unwrap(),
            r#"x-data="DS.component.dropdown({ open: false })""#
        );
    }

    #[test]
    fn state_config_quotes_are_escaped() {
        let out = DirectiveExpander::new().expand_state(r#"tabs, { active: "one" }"#).unwrap();
        assert_eq!(out, r#"x-data="DS.component.tabs({ active: &quot;one&quot; })""#);
    }

    #[test]
    fn action_attributes() {
        let expander = DirectiveExpander::new();
        assert_eq!(
            expander.expand_action("save").unwrap(),
            r#"hx-post="/api/ds/save" hx-indicator=".ds-loading" hx-swap="outerHTML""#
        );
        assert_eq!(
            expander.expand_action("'refresh', 'GET'").unwrap(),
            r#"hx-get="/api/ds/refresh" hx-indicator=".ds-loading" hx-swap="outerHTML""#
        );
    }

    #[test]
    fn configured_constants_are_used() {
        let config = DirectiveConfig {
            state_namespace: "App.ui".to_owned(),
            action_prefix: "/actions/".to_owned(),
            loading_indicator: "#spinner".to_owned(),
            swap: "innerHTML".to_owned(),
            default_method: "put".to_owned(),
        };
        let expander = DirectiveExpander::from_config(&config).unwrap();
        assert_eq!(expander.expand_state("menu").unwrap(), r#"x-data="App.ui.menu({})""#);
        assert_eq!(
            expander.expand_action("sync").unwrap(),
            r##"hx-put="/actions/sync" hx-indicator="#spinner" hx-swap="innerHTML""##
        );
    }

    #[test]
    fn unsupported_default_method_is_rejected() {
        let config = DirectiveConfig { default_method: "fetch".to_owned(), ..Default::default() };
        assert!(matches!(
            DirectiveExpander::from_config(&config),
            Err(EngineError::InvalidDefinition { .. })
        ));
    }

    #[test]
    fn invalid_arguments_fail_fast() {
        let expander = DirectiveExpander::new();
        for args in ["", "my-modal", "modal, {}, x"] {
            assert!(
                matches!(expander.expand_state(args), Err(EngineError::DirectiveSyntax { .. })),
                "state args {args:?}"
            );
        }
        for args in ["", "a/b", "save, fetch", "save, get, x", "save, {"] {
            assert!(
                matches!(expander.expand_action(args), Err(EngineError::DirectiveSyntax { .. })),
                "action args {args:?}"
            );
        }
    }

    #[test]
    fn method_names_round_trip_lowercase() {
        assert_eq!(HttpMethod::from_str("DELETE").unwrap().to_string(), "delete");
        assert_eq!(HttpMethod::default().as_ref(), "post");
    }
}
