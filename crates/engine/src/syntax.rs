//! Scanning helpers shared by the directive, template and markup parsers.

pub(crate) const COMMENT_OPEN: &str = "{{--";
pub(crate) const COMMENT_CLOSE: &str = "--}}";

/// 1-based line and column (in characters) of a byte offset.
pub(crate) fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(source.len());
    let before = source.get(..offset).unwrap_or(source);
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}

pub(crate) const fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// `@` at `at` starts a directive only when not glued to a preceding word (`a@b.com`).
pub(crate) fn at_word_boundary(source: &str, at: usize) -> bool {
    source[..at].chars().next_back().is_none_or(|c| !is_word_char(c))
}

/// The run of word characters starting at `from`.
pub(crate) fn word_at(source: &str, from: usize) -> &str {
    let rest = &source[from..];
    let end = rest.find(|c: char| !is_word_char(c)).unwrap_or(rest.len());
    &rest[..end]
}

/// Offset of the first non-blank character at or after `from`.
pub(crate) fn skip_blanks(source: &str, from: usize) -> usize {
    source[from..].find(|c: char| c != ' ' && c != '\t').map_or(source.len(), |i| from + i)
}

/// A failed scan: what went wrong and where (byte offset into the scanned source).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ScanError {
    pub(crate) message: String,
    pub(crate) offset: usize,
}

/// Finds the `)` closing the `(` at `open`, honouring nested brackets and
/// quoted strings (`'`, `"`, `` ` `` with backslash escapes).
pub(crate) fn find_closing_paren(source: &str, open: usize) -> Result<usize, ScanError> {
    debug_assert_eq!(source.as_bytes().get(open), Some(&b'('));

    let mut expected: Vec<(char, usize)> = Vec::new();
    let mut quote: Option<(char, usize)> = None;
    let mut escaped = false;

    for (i, c) in source[open..].char_indices() {
        let at = open + i;
        if let Some((q, _)) = quote {
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
            '\'' | '"' | '`' => quote = Some((c, at)),
            '(' => expected.push((')', at)),
            '[' => expected.push((']', at)),
            '{' => expected.push(('}', at)),
            ')' | ']' | '}' => match expected.pop() {
                Some((want, _)) if want == c => {
                    if expected.is_empty() {
                        return Ok(at);
                    }
                },
                Some((want, _)) => {
                    return Err(ScanError {
                        message: format!("expected '{want}' but found '{c}'"),
                        offset: at,
                    });
                },
                None => {
                    return Err(ScanError { message: format!("unbalanced '{c}'"), offset: at });
                },
            },
            _ => {},
        }
    }

    if let Some((q, at)) = quote {
        return Err(ScanError {
            message: format!("unterminated string starting with {q}"),
            offset: at,
        });
    }
    let at = expected.last().map_or(open, |(_, at)| *at);
    Err(ScanError { message: "unclosed '('".to_owned(), offset: at })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_col_counts_lines_and_chars() {
        let src = "ab\ncdé\nf";
        assert_eq!(line_col(src, 0), (1, 1));
        assert_eq!(line_col(src, 3), (2, 1));
        assert_eq!(line_col(src, src.len()), (3, 2));
    }

    #[test]
    fn closing_paren_skips_nested_and_quoted() {
        let src = "(a, {b: (1)}, ')', \"(\")tail";
        let close = find_closing_paren(src, 0).unwrap();
        assert_eq!(&src[close + 1..], "tail");
    }

    #[test]
    fn closing_paren_reports_mismatch_and_eof() {
        let err = find_closing_paren("(a, {b: 1)", 0).unwrap_err();
        assert_eq!(err.message, "expected '}' but found ')'");

        let err = find_closing_paren("(a, 'b", 0).unwrap_err();
        assert!(err.message.starts_with("unterminated string"));
        assert_eq!(err.offset, 4);

        let err = find_closing_paren("(a, (b)", 0).unwrap_err();
        assert_eq!(err.message, "unclosed '('");
        assert_eq!(err.offset, 0);
    }

    #[test]
    fn word_boundary_rules() {
        assert!(at_word_boundary("@if", 0));
        assert!(at_word_boundary("<b @click", 3));
        assert!(!at_word_boundary("me@example", 2));
        assert_eq!(word_at("@dsState(x)", 1), "dsState");
    }
}
