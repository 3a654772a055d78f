//! Template scanner
//!
//! Recognized syntax:
//!
//! - `$(Name)` and `$(Name:modifier)` keyword references
//! - `%NAME%` environment variable references, where `NAME` is one or more
//!   letters, digits, `_`, `(` or `)` (so `%ProgramFiles(x86)%` works)
//! - `$$` and `%%` for a literal `$` or `%`
//!
//! A `$` that is not followed by `(` or `$`, and a `%` that does not start a
//! well-formed `%NAME%`, are plain text. Any other character ends the
//! candidate name, so in `100%/50%` both `%` are text and in `%x$(Name)%`
//! the keyword is scanned on its own. There is exactly one level of
//! references: `$(` inside an open reference is an error.
//!
//! The scanner yields tokens that borrow from the template and carry byte
//! spans. It stops after the first error.

use crate::error::{ErrorSpan, SyntaxIssue, ValidationError};
use std::iter::FusedIterator;

/// A `$(name:modifier)` reference as written in the template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordRef<'a> {
    pub name: &'a str,
    pub modifier: Option<&'a str>,
    pub span: ErrorSpan,
}

/// A `%NAME%` reference as written in the template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvRef<'a> {
    pub name: &'a str,
    pub span: ErrorSpan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Text copied to the output unchanged (escapes arrive already unescaped)
    Literal(&'a str),
    Keyword(KeywordRef<'a>),
    EnvVar(EnvRef<'a>),
}

/// Parsed keyword modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    /// `:max` - pad to the widest value seen in this column
    Max,
    /// `:N` - pad to a fixed width
    Width(usize),
}

impl Modifier {
    pub fn parse(text: &str) -> Option<Self> {
        if text.eq_ignore_ascii_case("max") {
            return Some(Modifier::Max);
        }
        if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        text.parse::<usize>()
            .ok()
            .filter(|width| *width > 0)
            .map(Modifier::Width)
    }
}

/// Iterator over the tokens of a template
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    text: &'a str,
    pos: usize,
    failed: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            failed: false,
        }
    }

    fn fail(&mut self, issue: SyntaxIssue, start: usize, end: usize) -> ValidationError {
        self.failed = true;
        ValidationError::MalformedSyntax {
            issue,
            span: ErrorSpan::new(start, end),
        }
    }

    fn literal(&mut self, start: usize, len: usize, consumed: usize) -> Token<'a> {
        self.pos = start + consumed;
        Token::Literal(&self.text[start..start + len])
    }

    fn keyword(&mut self, start: usize) -> Result<Token<'a>, ValidationError> {
        let body_start = start + 2;
        let body_rest = &self.text[body_start..];
        let close = body_rest.find(')');
        let nested = body_rest.find("$(");

        let close = match (close, nested) {
            (close, Some(inner)) if close.map_or(true, |c| inner < c) => {
                return Err(self.fail(SyntaxIssue::Nested, start, body_start + inner + 2));
            }
            (Some(close), _) => close,
            (None, _) => return Err(self.fail(SyntaxIssue::Unterminated, start, self.text.len())),
        };

        let end = body_start + close + 1;
        let body = &body_rest[..close];
        let (name, modifier) = match body.split_once(':') {
            Some((name, modifier)) => (name, Some(modifier)),
            None => (body, None),
        };

        if name.is_empty() {
            return Err(self.fail(SyntaxIssue::EmptyName, start, end));
        }
        if modifier == Some("") {
            return Err(self.fail(SyntaxIssue::EmptyModifier, start, end));
        }

        self.pos = end;
        Ok(Token::Keyword(KeywordRef {
            name,
            modifier,
            span: ErrorSpan::new(start, end),
        }))
    }
}

fn is_env_name_char(ch: char) -> bool {
    ch.is_alphanumeric() || matches!(ch, '_' | '(' | ')')
}

/// Length of the variable name after an opening `%`, if a closing `%`
/// follows before any character a name cannot contain
fn env_name_len(after_open: &str) -> Option<usize> {
    for (idx, ch) in after_open.char_indices() {
        if ch == '%' {
            return (idx > 0).then_some(idx);
        }
        if !is_env_name_char(ch) {
            return None;
        }
    }
    None
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Result<Token<'a>, ValidationError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.pos >= self.text.len() {
            return None;
        }

        let start = self.pos;
        let rest = &self.text[start..];
        let bytes = rest.as_bytes();

        let token = match bytes[0] {
            b'$' => match bytes.get(1) {
                Some(b'$') => self.literal(start, 1, 2),
                Some(b'(') => return Some(self.keyword(start)),
                _ => self.literal(start, 1, 1),
            },
            b'%' => {
                if bytes.get(1) == Some(&b'%') {
                    self.literal(start, 1, 2)
                } else if let Some(len) = env_name_len(&rest[1..]) {
                    let end = start + len + 2;
                    self.pos = end;
                    Token::EnvVar(EnvRef {
                        name: &rest[1..1 + len],
                        span: ErrorSpan::new(start, end),
                    })
                } else {
                    self.literal(start, 1, 1)
                }
            }
            _ => {
                let len = rest.find(['$', '%']).unwrap_or(rest.len());
                self.literal(start, len, len)
            }
        };

        Some(Ok(token))
    }
}

impl FusedIterator for Scanner<'_> {}

/// Tokenize a template
pub fn scan(text: &str) -> Scanner<'_> {
    Scanner::new(text)
}
