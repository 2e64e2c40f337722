//! Recursive-descent parser for directive arguments.
//!
//! ```text
//! arguments  := name ( "," expression )*
//! name       := quoted | bare
//! quoted     := "'" [^']+ "'" | '"' [^"]+ '"'
//! bare       := [^\s,]+
//! expression := text balanced over ()[]{} and string literals
//! ```
//!
//! Offsets are byte positions in the enclosing source so errors can be reported
//! against it.

use crate::syntax::ScanError;

/// One argument and where it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Arg<'a> {
    pub(crate) text: &'a str,
    pub(crate) offset: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Arguments<'a> {
    pub(crate) name: Arg<'a>,
    pub(crate) rest: Vec<Arg<'a>>,
}

/// Parses `input`, the text between a directive's parentheses, which starts at byte
/// `base` of the enclosing source.
pub(crate) fn parse_arguments(input: &str, base: usize) -> Result<Arguments<'_>, ScanError> {
    let mut parser = Parser { input, base, pos: 0 };
    parser.arguments()
}

struct Parser<'a> {
    input: &'a str,
    base: usize,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn arguments(&mut self) -> Result<Arguments<'a>, ScanError> {
        self.skip_whitespace();
        let name = self.name()?;
        self.skip_whitespace();

        let mut rest = Vec::new();
        while !self.at_end() {
            self.expect(',')?;
            rest.push(self.expression()?);
        }

        Ok(Arguments { name, rest })
    }

    fn name(&mut self) -> Result<Arg<'a>, ScanError> {
        match self.peek() {
            None => Err(self.error("missing name argument")),
            Some(',') => Err(self.error("expected name before ','")),
            Some(quote @ ('\'' | '"')) => self.quoted(quote),
            Some(_) => {
                let start = self.pos;
                let len = self.remaining().find(|c: char| c.is_whitespace() || c == ',');
                self.pos += len.unwrap_or(self.remaining().len());
                Ok(self.arg(start, self.pos))
            },
        }
    }

    fn quoted(&mut self, quote: char) -> Result<Arg<'a>, ScanError> {
        let open = self.pos;
        self.pos += quote.len_utf8();
        let Some(len) = self.remaining().find(quote) else {
            return Err(self.error_at(open, format!("unterminated string starting with {quote}")));
        };
        if len == 0 {
            return Err(self.error_at(open, "empty name"));
        }
        let arg = self.arg(self.pos, self.pos + len);
        self.pos += len + quote.len_utf8();
        Ok(arg)
    }

    /// Raw text up to the next top-level comma, trimmed.
    fn expression(&mut self) -> Result<Arg<'a>, ScanError> {
        let start = self.pos;
        let mut depth = 0usize;
        let mut quote: Option<char> = None;
        let mut escaped = false;
        let mut end = self.input.len();

        for (i, c) in self.remaining().char_indices() {
            if let Some(q) = quote {
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == q {
                    quote = None;
                }
                continue;
            }
            match c {
                '\'' | '"' | '`' => quote = Some(c),
                '(' | '[' | '{' => depth += 1,
                ')' | ']' | '}' => depth = depth.saturating_sub(1),
                ',' if depth == 0 => {
                    end = self.pos + i;
                    break;
                },
                _ => {},
            }
        }

        let raw = &self.input[start..end];
        let lead = raw.len() - raw.trim_start().len();
        let text = raw.trim();
        if text.is_empty() {
            return Err(self.error_at(start, "expected expression after ','"));
        }
        self.pos = end;
        Ok(Arg { text, offset: self.base + start + lead })
    }

    fn expect(&mut self, want: char) -> Result<(), ScanError> {
        match self.peek() {
            Some(c) if c == want => {
                self.pos += c.len_utf8();
                Ok(())
            },
            Some(c) => Err(self.error(format!("expected '{want}' but found '{c}'"))),
            None => Err(self.error(format!("expected '{want}'"))),
        }
    }

    fn skip_whitespace(&mut self) {
        let trimmed = self.remaining().trim_start();
        self.pos = self.input.len() - trimmed.len();
    }

    fn arg(&self, start: usize, end: usize) -> Arg<'a> {
        Arg { text: &self.input[start..end], offset: self.base + start }
    }

    fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn error(&self, message: impl Into<String>) -> ScanError {
        self.error_at(self.pos, message)
    }

    fn error_at(&self, pos: usize, message: impl Into<String>) -> ScanError {
        ScanError { message: message.into(), offset: self.base + pos }
    }
}
