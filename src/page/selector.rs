//! # Selector Subset
//!
//! Just enough CSS to express the candidate lists TV pages need:
//!
//! | Syntax          | Matches                                   |
//! |-----------------|-------------------------------------------|
//! | `tag`, `*`      | element name                              |
//! | `#id`           | id attribute                              |
//! | `.class`        | one entry of the class list               |
//! | `[attr]`        | attribute present                         |
//! | `[attr="v"]`    | attribute equals `v` (quotes optional)    |
//! | `[attr*="v"]`   | attribute contains `v`                    |
//!
//! Parts compound (`div[class*="play"].big`), and a comma separates
//! alternatives. Combinators (descendant, child, sibling) are not supported
//! and are rejected at parse time.

use std::fmt;

use crate::page::document::Node;

#[derive(Debug, Clone, PartialEq, Eq)]
enum AttrOp {
    Exists,
    Equals(String),
    Contains(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Id(String),
    Class(String),
    Attr { name: String, op: AttrOp },
}

/// One compound selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    tag: Option<String>,
    parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorError {
    pub input: String,
    pub reason: &'static str,
}

impl fmt::Display for SelectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid selector {:?}: {}", self.input, self.reason)
    }
}

impl std::error::Error for SelectorError {}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

/// Parses a comma-separated selector list.
pub fn parse_list(input: &str) -> Result<Vec<Selector>, SelectorError> {
    input.split(',').map(|s| Selector::parse(s.trim())).collect()
}

impl Selector {
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let err = |reason| SelectorError {
            input: input.to_string(),
            reason,
        };
        if input.is_empty() {
            return Err(err("empty selector"));
        }

        let mut chars = input.chars().peekable();
        let mut tag = None;
        let mut parts = Vec::new();

        if chars.peek() == Some(&'*') {
            chars.next();
        } else if chars.peek().is_some_and(|c| is_ident_char(*c)) {
            let mut name = String::new();
            while let Some(c) = chars.next_if(|c| is_ident_char(*c)) {
                name.push(c.to_ascii_lowercase());
            }
            tag = Some(name);
        }

        while let Some(c) = chars.next() {
            match c {
                '#' | '.' => {
                    let mut name = String::new();
                    while let Some(c) = chars.next_if(|c| is_ident_char(*c)) {
                        name.push(c);
                    }
                    if name.is_empty() {
                        return Err(err("expected a name after '#' or '.'"));
                    }
                    parts.push(if c == '#' {
                        Part::Id(name)
                    } else {
                        Part::Class(name)
                    });
                }
                '[' => {
                    let mut body = String::new();
                    loop {
                        match chars.next() {
                            Some(']') => break,
                            Some(c) => body.push(c),
                            None => return Err(err("unterminated '['")),
                        }
                    }
                    parts.push(parse_attr(body.trim()).ok_or_else(|| err("bad attribute test"))?);
                }
                c if c.is_whitespace() || matches!(c, '>' | '+' | '~') => {
                    return Err(err("combinators are not supported"));
                }
                _ => return Err(err("unexpected character")),
            }
        }

        Ok(Self { tag, parts })
    }

    pub fn matches(&self, node: &Node) -> bool {
        if let Some(tag) = &self.tag
            && !node.tag.eq_ignore_ascii_case(tag)
        {
            return false;
        }
        self.parts.iter().all(|part| match part {
            Part::Id(id) => node.id.as_deref() == Some(id.as_str()),
            Part::Class(class) => node.classes.iter().any(|c| c == class),
            Part::Attr { name, op } => match (node.attr(name), op) {
                (None, _) => false,
                (Some(_), AttrOp::Exists) => true,
                (Some(v), AttrOp::Equals(want)) => v == *want,
                (Some(v), AttrOp::Contains(want)) => !want.is_empty() && v.contains(want.as_str()),
            },
        })
    }
}

fn parse_attr(body: &str) -> Option<Part> {
    let (name, op) = match body.find('=') {
        None => (body, AttrOp::Exists),
        Some(eq) => {
            let value = unquote(body[eq + 1..].trim())?;
            match body[..eq].strip_suffix('*') {
                Some(name) => (name, AttrOp::Contains(value)),
                None => (&body[..eq], AttrOp::Equals(value)),
            }
        }
    };
    let name = name.trim();
    if name.is_empty() || !name.chars().all(is_ident_char) {
        return None;
    }
    Some(Part::Attr {
        name: name.to_ascii_lowercase(),
        op,
    })
}

fn unquote(raw: &str) -> Option<String> {
    for q in ['"', '\''] {
        if let Some(inner) = raw.strip_prefix(q) {
            return inner.strip_suffix(q).map(str::to_string);
        }
    }
    (!raw.is_empty() && raw.chars().all(is_ident_char)).then(|| raw.to_string())
}
