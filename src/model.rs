//! Object values and the Info bundle read shape.
//!
//! A flat-text value is classified exactly once, at parse time, into a
//! [`Value`]: either a URI reference or a literal with an optional language
//! tag. Values render to and parse from N3 notation (`<uri>`, `"text"`,
//! `"text"@en`), which is how language tags and multi-valued predicates
//! survive a dump/reload cycle.

use indexmap::IndexMap;
use oxrdf::{Literal, NamedNode, Term, TermRef};

use crate::error::Result;

/// All information known about one subject: compressed predicate key mapped
/// to the ordered list of object values sharing that predicate.
///
/// Predicates appear in first-seen order; values follow the graph's triple
/// iteration order. Lists are never empty — a predicate with no values is
/// simply absent.
pub type Info = IndexMap<String, Vec<Value>>;

/// A single RDF object value.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Value {
    /// A reference to another resource by URI.
    UriRef(String),
    /// A textual value, optionally tagged with a language code.
    Literal {
        /// The literal text, unescaped.
        text: String,
        /// Language tag such as `en`, if any.
        lang: Option<String>,
    },
}

impl Value {
    /// Builds a value from a graph term. Blank nodes keep their `_:id`
    /// label; the flat format cannot reference them across sections.
    #[must_use]
    pub fn from_term(term: TermRef<'_>) -> Self {
        match term {
            TermRef::NamedNode(node) => Value::UriRef(node.as_str().to_owned()),
            TermRef::BlankNode(node) => Value::UriRef(node.to_string()),
            TermRef::Literal(literal) => Value::Literal {
                text: literal.value().to_owned(),
                lang: literal.language().map(str::to_owned),
            },
        }
    }

    /// Converts the value into a graph term.
    ///
    /// # Errors
    ///
    /// Returns an error when a URI reference is not a valid IRI or a
    /// language tag is not well-formed.
    pub fn to_term(&self) -> Result<Term> {
        match self {
            Value::UriRef(uri) => Ok(NamedNode::new(uri.as_str())?.into()),
            Value::Literal {
                text,
                lang: Some(lang),
            } => Ok(Literal::new_language_tagged_literal(text.as_str(), lang.as_str())?.into()),
            Value::Literal { text, lang: None } => {
                Ok(Literal::new_simple_literal(text.as_str()).into())
            }
        }
    }

    /// The language tag, for literals that carry one.
    #[must_use]
    pub fn lang(&self) -> Option<&str> {
        match self {
            Value::Literal { lang, .. } => lang.as_deref(),
            Value::UriRef(_) => None,
        }
    }

    /// Renders the value in N3 notation: `<uri>`, `"text"` or `"text"@lang`.
    /// Blank-node labels (`_:id`) render as-is.
    #[must_use]
    pub fn n3(&self) -> String {
        match self {
            Value::UriRef(uri) if uri.starts_with("_:") => uri.clone(),
            Value::UriRef(uri) => format!("<{uri}>"),
            Value::Literal { text, lang } => {
                let escaped = escape(text);
                match lang {
                    Some(lang) => format!("\"{escaped}\"@{lang}"),
                    None => format!("\"{escaped}\""),
                }
            }
        }
    }
}

/// Classifies one raw flat-text value into its object values.
///
/// Rules, in order:
/// 1. A value that is a whole N3 sequence — comma-separated quoted literals
///    and/or `<uri>` references — yields one value per element. This is the
///    form the dumper emits, so dumped documents reload losslessly.
/// 2. A value starting with `<` is a URI reference; every `<` and `>` is
///    stripped wherever it occurs, so unbalanced brackets are accepted
///    leniently.
/// 3. Anything else is a plain literal with no language tag.
#[must_use]
pub fn parse_values(raw: &str) -> Vec<Value> {
    let trimmed = raw.trim();
    if let Some(values) = parse_n3_sequence(trimmed) {
        return values;
    }
    if trimmed.starts_with('<') {
        return vec![Value::UriRef(trimmed.replace(['<', '>'], ""))];
    }
    vec![Value::Literal {
        text: trimmed.to_owned(),
        lang: None,
    }]
}

/// Parses `trimmed` as a full comma-separated sequence of N3 tokens.
/// Returns `None` unless the entire input matches.
fn parse_n3_sequence(trimmed: &str) -> Option<Vec<Value>> {
    let mut values = Vec::new();
    let mut rest = trimmed;
    loop {
        let (value, tail) = parse_n3_token(rest)?;
        values.push(value);
        rest = tail.trim_start();
        if rest.is_empty() {
            return Some(values);
        }
        rest = rest.strip_prefix(',')?.trim_start();
    }
}

/// Parses one leading N3 token (`<uri>` or a quoted literal with optional
/// `@lang`), returning it with the unconsumed tail.
fn parse_n3_token(input: &str) -> Option<(Value, &str)> {
    if let Some(rest) = input.strip_prefix('<') {
        let end = rest.find('>')?;
        if end == 0 {
            return None;
        }
        return Some((Value::UriRef(rest[..end].to_owned()), &rest[end + 1..]));
    }
    let rest = input.strip_prefix('"')?;
    let mut text = String::new();
    let mut chars = rest.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => match chars.next()?.1 {
                '\\' => text.push('\\'),
                '"' => text.push('"'),
                'n' => text.push('\n'),
                'r' => text.push('\r'),
                't' => text.push('\t'),
                other => {
                    text.push('\\');
                    text.push(other);
                }
            },
            '"' => {
                let tail = &rest[i + 1..];
                if let Some(lang_tail) = tail.strip_prefix('@') {
                    let end = lang_tail
                        .find(|ch: char| !ch.is_ascii_alphanumeric() && ch != '-')
                        .unwrap_or(lang_tail.len());
                    if end == 0 {
                        return None;
                    }
                    return Some((
                        Value::Literal {
                            text,
                            lang: Some(lang_tail[..end].to_owned()),
                        },
                        &lang_tail[end..],
                    ));
                }
                return Some((Value::Literal { text, lang: None }, tail));
            }
            other => text.push(other),
        }
    }
    None
}

/// Escapes a literal for N3 rendering.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}
