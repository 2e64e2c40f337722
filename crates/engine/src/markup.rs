//! Parser for pages mixing plain HTML with component tags.
//!
//! Component tags carry the configured prefix (`<ds-card title="x">…</ds-card>` or
//! `<ds-icon name=check />`). Their children become the default slot, except direct
//! `<slot:name>…</slot:name>` children, which fill named slots. Everything else,
//! including HTML comments, passes through untouched.

use crate::attributes::AttributeSet;
use crate::error::EngineError;
use crate::html;
use crate::syntax::line_col;
use dskit_domain::constants::SLOT_TAG_PREFIX;
use std::borrow::Cow;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Node<'a> {
    Text(&'a str),
    Element(Element<'a>),
}

/// One component tag with its parsed children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Element<'a> {
    pub(crate) tag: &'a str,
    pub(crate) attributes: AttributeSet,
    pub(crate) children: Vec<Node<'a>>,
    pub(crate) named_slots: Vec<(&'a str, Vec<Node<'a>>)>,
    /// Byte offset of the opening `<`.
    pub(crate) offset: usize,
}

/// Parses `source` into text and component nodes.
pub(crate) fn parse<'a>(
    source: &'a str,
    prefix: &'a str,
    max_depth: usize,
) -> Result<Vec<Node<'a>>, EngineError> {
    let mut parser = Parser { source, prefix, max_depth, pos: 0 };
    let content = parser.content(None, 0, false)?;
    Ok(content.nodes)
}

/// The closing tag that ends the content being parsed.
#[derive(Debug, Clone, Copy)]
enum Close<'a> {
    Component { tag: &'a str, offset: usize },
    Slot { name: &'a str, offset: usize },
}

#[derive(Debug, Clone, Copy)]
enum Mark<'a> {
    Comment,
    OpenComponent(&'a str),
    CloseComponent(&'a str),
    OpenSlot(&'a str),
    CloseSlot(&'a str),
}

#[derive(Default)]
struct Content<'a> {
    nodes: Vec<Node<'a>>,
    named: Vec<(&'a str, Vec<Node<'a>>)>,
}

struct Parser<'a> {
    source: &'a str,
    prefix: &'a str,
    max_depth: usize,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn content(
        &mut self,
        close: Option<Close<'a>>,
        depth: usize,
        in_component: bool,
    ) -> Result<Content<'a>, EngineError> {
        let source = self.source;
        let mut content = Content::default();

        loop {
            let Some((at, mark)) = self.next_mark() else {
                if let Some(close) = close {
                    return Err(match close {
                        Close::Component { tag, offset } => {
                            self.syntax(offset, format!("unclosed <{tag}>"))
                        },
                        Close::Slot { name, offset } => {
                            self.syntax(offset, format!("unclosed <{SLOT_TAG_PREFIX}{name}>"))
                        },
                    });
                }
                push_text(&mut content.nodes, &source[self.pos..]);
                self.pos = self.source.len();
                return Ok(content);
            };

            push_text(&mut content.nodes, &source[self.pos..at]);
            self.pos = at;

            match mark {
                Mark::Comment => {
                    let end = self.source[at..]
                        .find("-->")
                        .map_or(self.source.len(), |i| at + i + "-->".len());
                    push_text(&mut content.nodes, &source[at..end]);
                    self.pos = end;
                },
                Mark::OpenComponent(tag) => {
                    if depth >= self.max_depth {
                        return Err(EngineError::NestingTooDeep {
                            limit: self.max_depth,
                            context: Some(self.position(at).into()),
                        });
                    }
                    self.pos = at + 1 + tag.len();
                    let (attributes, self_closing) = self.tag_head(tag, at)?;
                    let inner = if self_closing {
                        Content::default()
                    } else {
                        self.content(Some(Close::Component { tag, offset: at }), depth + 1, true)?
                    };
                    content.nodes.push(Node::Element(Element {
                        tag,
                        attributes,
                        children: inner.nodes,
                        named_slots: inner.named,
                        offset: at,
                    }));
                },
                Mark::OpenSlot(name) => {
                    let label = &source[at + 1..at + 1 + SLOT_TAG_PREFIX.len() + name.len()];
                    if !in_component {
                        return Err(self.syntax(at, format!("<{label}> outside a component")));
                    }
                    self.pos = at + 1 + label.len();
                    let (_, self_closing) = self.tag_head(label, at)?;
                    let inner = if self_closing {
                        Content::default()
                    } else {
                        self.content(Some(Close::Slot { name, offset: at }), depth, false)?
                    };
                    content.named.push((name, inner.nodes));
                },
                Mark::CloseComponent(found) | Mark::CloseSlot(found) => {
                    let matches = match (close, mark) {
                        (Some(Close::Component { tag, .. }), Mark::CloseComponent(_)) => {
                            tag == found
                        },
                        (Some(Close::Slot { name, .. }), Mark::CloseSlot(_)) => name == found,
                        _ => false,
                    };
                    let written = &source[at + 2..at + 2 + mark_len(mark)];
                    if !matches {
                        return Err(self.syntax(at, format!("unexpected </{written}>")));
                    }
                    let end = self.source[at..]
                        .find('>')
                        .map(|i| at + i + 1)
                        .ok_or_else(|| self.syntax(at, format!("unterminated </{written}>")))?;
                    if !self.source[at + 2 + written.len()..end - 1].trim().is_empty() {
                        return Err(self.syntax(at, format!("malformed </{written}>")));
                    }
                    self.pos = end;
                    return Ok(content);
                },
            }
        }
    }

    /// Finds the next component tag, slot tag or HTML comment at or after `pos`.
    fn next_mark(&self) -> Option<(usize, Mark<'a>)> {
        let source = self.source;
        let mut from = self.pos;
        while let Some(i) = source[from..].find('<') {
            let at = from + i;
            let rest = &source[at + 1..];
            if rest.starts_with("!--") {
                return Some((at, Mark::Comment));
            }
            let (closing, rest) = match rest.strip_prefix('/') {
                Some(rest) => (true, rest),
                None => (false, rest),
            };
            let slot = rest.strip_prefix(SLOT_TAG_PREFIX).map(name_at).filter(|n| !n.is_empty());
            if let Some(name) = slot {
                let mark = if closing { Mark::CloseSlot(name) } else { Mark::OpenSlot(name) };
                return Some((at, mark));
            }
            let tag = name_at(rest);
            if tag.len() > self.prefix.len() && tag.starts_with(self.prefix) {
                let mark =
                    if closing { Mark::CloseComponent(tag) } else { Mark::OpenComponent(tag) };
                return Some((at, mark));
            }
            from = at + 1;
        }
        None
    }

    /// Attributes of an opening tag up to `>` or `/>`; `pos` must be just past the name.
    fn tag_head(&mut self, label: &str, at: usize) -> Result<(AttributeSet, bool), EngineError> {
        let source = self.source;
        let mut attributes = AttributeSet::new();

        loop {
            self.skip_whitespace();
            let rest = &source[self.pos..];
            if rest.starts_with("/>") {
                self.pos += 2;
                return Ok((attributes, true));
            }
            if rest.starts_with('>') {
                self.pos += 1;
                return Ok((attributes, false));
            }
            if rest.is_empty() {
                return Err(self.syntax(at, format!("unterminated <{label}> tag")));
            }

            let name_len = rest
                .find(|c: char| c.is_whitespace() || matches!(c, '=' | '>' | '/' | '"' | '\''))
                .unwrap_or(rest.len());
            if name_len == 0 {
                let c = rest.chars().next().unwrap_or_default();
                return Err(self.syntax(self.pos, format!("unexpected '{c}' in <{label}> tag")));
            }
            let name = &rest[..name_len];
            self.pos += name_len;

            self.skip_whitespace();
            let value = if self.source[self.pos..].starts_with('=') {
                self.pos += 1;
                self.skip_whitespace();
                self.attribute_value(name)?
            } else {
                Cow::Borrowed("")
            };
            attributes.insert(name, value.into_owned());
        }
    }

    fn attribute_value(&mut self, name: &str) -> Result<Cow<'a, str>, EngineError> {
        let start = self.pos;
        let source = self.source;
        let rest = &source[start..];

        match rest.chars().next() {
            Some(quote @ ('"' | '\'')) => {
                let Some(len) = rest[1..].find(quote) else {
                    return Err(self.syntax(start, format!("unterminated value of '{name}'")));
                };
                self.pos = start + 1 + len + 1;
                Ok(html::unescape(&rest[1..=len]))
            },
            Some(_) => {
                let len = rest
                    .char_indices()
                    .find(|&(i, c)| c.is_whitespace() || c == '>' || rest[i..].starts_with("/>"))
                    .map_or(rest.len(), |(i, _)| i);
                if len == 0 {
                    return Err(self.syntax(start, format!("missing value of '{name}'")));
                }
                self.pos = start + len;
                Ok(html::unescape(&rest[..len]))
            },
            None => Err(self.syntax(start, format!("missing value of '{name}'"))),
        }
    }

    fn skip_whitespace(&mut self) {
        let rest = &self.source[self.pos..];
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn position(&self, offset: usize) -> String {
        let (line, column) = line_col(self.source, offset);
        format!("at {line}:{column}")
    }

    fn syntax(&self, offset: usize, message: impl Into<Cow<'static, str>>) -> EngineError {
        let (line, column) = line_col(self.source, offset);
        EngineError::MarkupSyntax { message: message.into(), line, column, context: None }
    }
}

/// Length of the tag label (`ds-card`, `slot:footer`) a mark was found with.
const fn mark_len(mark: Mark<'_>) -> usize {
    match mark {
        Mark::CloseSlot(name) | Mark::OpenSlot(name) => SLOT_TAG_PREFIX.len() + name.len(),
        Mark::CloseComponent(tag) | Mark::OpenComponent(tag) => tag.len(),
        Mark::Comment => 0,
    }
}

fn push_text<'a>(nodes: &mut Vec<Node<'a>>, text: &'a str) {
    if !text.is_empty() {
        nodes.push(Node::Text(text));
    }
}

/// Leading run of tag-name characters.
fn name_at(rest: &str) -> &str {
    let end = rest
        .find(|c: char| !(c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_'))
        .unwrap_or(rest.len());
    &rest[..end]
}
