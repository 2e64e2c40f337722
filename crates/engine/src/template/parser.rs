//! Builds the node tree from tokens and resolves every name against the schema.

use super::lexer::Token;
use super::{Comparison, Condition, Expr, HelperValue, Node};
use crate::error::EngineError;
use crate::props::PropSchema;
use crate::syntax::line_col;
use dskit_domain::constants::{ATTRIBUTES_VAR, HELPERS_VAR, SLOT_VAR, SLOTS_VAR};
use std::borrow::Cow;
use std::str::FromStr;

pub(super) fn parse(
    source: &str,
    tokens: Vec<Token<'_>>,
    schema: &PropSchema,
) -> Result<Vec<Node>, EngineError> {
    let mut parser = Parser { source, schema, stack: Vec::new(), root: Vec::new() };
    for token in tokens {
        parser.token(token)?;
    }
    parser.finish()
}

/// An `@if` whose `@endif` has not been seen yet.
struct Frame {
    cond: Condition,
    offset: usize,
    then: Vec<Node>,
    otherwise: Option<Vec<Node>>,
}

struct Parser<'s> {
    source: &'s str,
    schema: &'s PropSchema,
    stack: Vec<Frame>,
    root: Vec<Node>,
}

impl Parser<'_> {
    fn token(&mut self, token: Token<'_>) -> Result<(), EngineError> {
        match token {
            Token::Text(text) => self.push_text(&text),
            Token::Output { expr, offset, raw } => {
                let expr = self.expr(expr, offset)?;
                self.current().push(Node::Output { expr, raw });
            },
            Token::If { cond, offset } => {
                let cond = self.condition(cond, offset)?;
                self.stack.push(Frame { cond, offset, then: Vec::new(), otherwise: None });
            },
            Token::Else { offset } => match self.stack.last_mut() {
                Some(frame) if frame.otherwise.is_none() => frame.otherwise = Some(Vec::new()),
                Some(_) => return Err(self.syntax(offset, "duplicate @else")),
                None => return Err(self.syntax(offset, "@else without @if")),
            },
            Token::EndIf { offset } => {
                let Some(frame) = self.stack.pop() else {
                    return Err(self.syntax(offset, "@endif without @if"));
                };
                let node = Node::If {
                    cond: frame.cond,
                    then: frame.then,
                    otherwise: frame.otherwise.unwrap_or_default(),
                };
                self.current().push(node);
            },
        }
        Ok(())
    }

    fn finish(self) -> Result<Vec<Node>, EngineError> {
        if let Some(frame) = self.stack.last() {
            return Err(self.syntax(frame.offset, "unclosed @if"));
        }
        Ok(self.root)
    }

    fn current(&mut self) -> &mut Vec<Node> {
        let Some(frame) = self.stack.last_mut() else {
            return &mut self.root;
        };
        match &mut frame.otherwise {
            Some(nodes) => nodes,
            None => &mut frame.then,
        }
    }

    fn push_text(&mut self, text: &str) {
        let nodes = self.current();
        match nodes.last_mut() {
            Some(Node::Text(prev)) => prev.push_str(text),
            _ => nodes.push(Node::Text(text.to_owned())),
        }
    }

    /// `"!"? expr (("==" | "!=") 'literal')?`
    fn condition(&self, raw: &str, offset: usize) -> Result<Condition, EngineError> {
        let (negate, body, offset) = match raw.strip_prefix('!') {
            Some(rest) => {
                let trimmed = rest.trim_start();
                (true, trimmed, offset + 1 + (rest.len() - trimmed.len()))
            },
            None => (false, raw, offset),
        };

        let Some((at, op)) = find_operator(body) else {
            let expr = self.expr(body.trim_end(), offset)?;
            return Ok(Condition { negate, expr, compare: None });
        };

        let lhs = body[..at].trim_end();
        if lhs.is_empty() {
            return Err(self.syntax(offset, "missing left side of comparison"));
        }
        let expr = self.expr(lhs, offset)?;

        let after = &body[at + 2..];
        let rhs_offset = offset + at + 2 + (after.len() - after.trim_start().len());
        let literal = parse_literal(after.trim())
            .ok_or_else(|| self.syntax(rhs_offset, "expected a quoted literal after comparison"))?;

        Ok(Condition { negate, expr, compare: Some((op, literal.to_owned())) })
    }

    fn expr(&self, raw: &str, offset: usize) -> Result<Expr, EngineError> {
        let (head, tail) = match raw.split_once('.') {
            Some((head, tail)) => (head, Some(tail)),
            None => (raw, None),
        };

        match (head, tail) {
            (ATTRIBUTES_VAR, None) => Ok(Expr::Attributes),
            (SLOT_VAR, None) => Ok(Expr::Slot),
            (SLOTS_VAR, Some(name)) if is_name(name) => Ok(Expr::NamedSlot(name.to_owned())),
            (SLOTS_VAR, _) => Err(self.syntax(offset, "expected 'slots.<name>'")),
            (HELPERS_VAR, Some(name)) => HelperValue::from_str(name)
                .map(Expr::Helper)
                .map_err(|_| self.unknown(raw, offset)),
            (HELPERS_VAR, None) => Err(self.syntax(offset, "expected 'helpers.<value>'")),
            (name, None) if self.schema.contains(name) => Ok(Expr::Prop(name.to_owned())),
            (name, None) if is_name(name) => Err(self.unknown(raw, offset)),
            _ => Err(self.syntax(offset, format!("invalid expression '{raw}'"))),
        }
    }

    fn syntax(&self, offset: usize, message: impl Into<Cow<'static, str>>) -> EngineError {
        let (line, column) = line_col(self.source, offset);
        EngineError::TemplateSyntax { message: message.into(), line, column, context: None }
    }

    fn unknown(&self, name: &str, offset: usize) -> EngineError {
        let (line, column) = line_col(self.source, offset);
        EngineError::UnknownVariable { name: name.to_owned(), line, column, context: None }
    }
}

/// First `==` or `!=` outside a quoted literal.
fn find_operator(body: &str) -> Option<(usize, Comparison)> {
    let mut quote: Option<char> = None;
    for (i, c) in body.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {},
            None if c == '\'' || c == '"' => quote = Some(c),
            None if body[i..].starts_with("==") => return Some((i, Comparison::Eq)),
            None if body[i..].starts_with("!=") => return Some((i, Comparison::Ne)),
            None => {},
        }
    }
    None
}

fn parse_literal(raw: &str) -> Option<&str> {
    ['\'', '"'].iter().find_map(|q| {
        let inner = raw.strip_prefix(*q)?.strip_suffix(*q)?;
        (!inner.contains(*q)).then_some(inner)
    })
}

fn is_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
