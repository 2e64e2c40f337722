//! Splits directive-expanded template pieces into text, output tags and block markers.

use crate::directive::Piece;
use crate::error::EngineError;
use crate::syntax::{COMMENT_CLOSE, COMMENT_OPEN, find_closing_paren, line_col, word_at};
use std::borrow::Cow;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Token<'a> {
    Text(Cow<'a, str>),
    /// `{{ expr }}` (`raw == false`) or `{!! expr !!}`.
    Output { expr: &'a str, offset: usize, raw: bool },
    If { cond: &'a str, offset: usize },
    Else { offset: usize },
    EndIf { offset: usize },
}

const ESCAPED_OPEN: &str = "{{";
const ESCAPED_CLOSE: &str = "}}";
const RAW_OPEN: &str = "{!!";
const RAW_CLOSE: &str = "!!}";

pub(super) fn tokenize<'a>(
    source: &str,
    pieces: &[Piece<'a>],
) -> Result<Vec<Token<'a>>, EngineError> {
    let mut tokens = Vec::new();
    for piece in pieces {
        match piece {
            Piece::Source { text, offset } => {
                Lexer { source, text, base: *offset, pos: 0, tokens: &mut tokens }.run()?;
            },
            Piece::Expanded(text) => tokens.push(Token::Text(Cow::Owned(text.clone()))),
        }
    }
    Ok(tokens)
}

struct Lexer<'s, 'a, 't> {
    /// Whole template source, for error positions.
    source: &'s str,
    text: &'a str,
    base: usize,
    pos: usize,
    tokens: &'t mut Vec<Token<'a>>,
}

impl<'a> Lexer<'_, 'a, '_> {
    fn run(mut self) -> Result<(), EngineError> {
        let mut text_start = 0;

        while let Some(found) = self.text[self.pos..].find(['{', '@']) {
            let at = self.pos + found;
            let rest = &self.text[at..];

            let consumed = if rest.starts_with(COMMENT_OPEN) {
                Some(self.comment(at)?)
            } else if rest.starts_with(RAW_OPEN) {
                Some(self.output(at, RAW_OPEN, RAW_CLOSE, true)?)
            } else if rest.starts_with(ESCAPED_OPEN) {
                Some(self.output(at, ESCAPED_OPEN, ESCAPED_CLOSE, false)?)
            } else if rest.starts_with("@@") {
                Some(self.escaped_at(at))
            } else if rest.starts_with('@') {
                self.block(at)?
            } else {
                None
            };

            match consumed {
                Some((token, end)) => {
                    self.flush_text(text_start, at);
                    if let Some(token) = token {
                        self.tokens.push(token);
                    }
                    self.pos = end;
                    text_start = end;
                },
                None => self.pos = at + 1,
            }
        }

        self.flush_text(text_start, self.text.len());
        Ok(())
    }

    fn flush_text(&mut self, start: usize, end: usize) {
        if start < end {
            self.tokens.push(Token::Text(Cow::Borrowed(&self.text[start..end])));
        }
    }

    fn comment(&self, at: usize) -> Result<(Option<Token<'a>>, usize), EngineError> {
        let body = at + COMMENT_OPEN.len();
        match self.text[body..].find(COMMENT_CLOSE) {
            Some(len) => Ok((None, body + len + COMMENT_CLOSE.len())),
            None => Err(self.error(at, "unterminated comment")),
        }
    }

    fn output(
        &self,
        at: usize,
        open: &str,
        close: &str,
        raw: bool,
    ) -> Result<(Option<Token<'a>>, usize), EngineError> {
        let body = at + open.len();
        let Some(len) = self.text[body..].find(close) else {
            return Err(self.error(at, format!("unterminated '{open}'")));
        };
        let inner = &self.text[body..body + len];
        let lead = inner.len() - inner.trim_start().len();
        let expr = inner.trim();
        if expr.is_empty() {
            return Err(self.error(at, format!("empty '{open} {close}'")));
        }
        let token = Token::Output { expr, offset: self.base + body + lead, raw };
        Ok((Some(token), body + len + close.len()))
    }

    fn escaped_at(&self, at: usize) -> (Option<Token<'a>>, usize) {
        (Some(Token::Text(Cow::Borrowed("@"))), at + 2)
    }

    /// `@if(...)`, `@else` and `@endif`; any other `@word` is plain text.
    fn block(&self, at: usize) -> Result<Option<(Option<Token<'a>>, usize)>, EngineError> {
        let word = word_at(self.text, at + 1);
        let end = at + 1 + word.len();
        let offset = self.base + at;

        match word {
            "if" => {
                if !self.text[end..].starts_with('(') {
                    return Err(self.error(end, "expected '(' after @if"));
                }
                let close = find_closing_paren(self.text, end)
                    .map_err(|e| self.error(e.offset, e.message))?;
                let inner = &self.text[end + 1..close];
                let cond = inner.trim();
                if cond.is_empty() {
                    return Err(self.error(end, "empty @if condition"));
                }
                let lead = inner.len() - inner.trim_start().len();
                let offset = self.base + end + 1 + lead;
                Ok(Some((Some(Token::If { cond, offset }), close + 1)))
            },
            "else" => Ok(Some((Some(Token::Else { offset }), end))),
            "endif" => Ok(Some((Some(Token::EndIf { offset }), end))),
            _ => Ok(None),
        }
    }

    fn error(&self, local: usize, message: impl Into<Cow<'static, str>>) -> EngineError {
        let (line, column) = line_col(self.source, self.base + local);
        EngineError::TemplateSyntax { message: message.into(), line, column, context: None }
    }
}
