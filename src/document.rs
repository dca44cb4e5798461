//! Flat-text document parser and writer.
//!
//! A document is an ordered mapping of `[section]` names to ordered
//! `key = value` pairs, in the INI-like syntax the ontology format uses.
//! Parsing performs no URI resolution; that is the loader's job.

use std::fmt;
use std::io::{self, Write};

use indexmap::IndexMap;

use crate::error::{Error, Result};

/// A parsed flat-text document: ordered sections of ordered key/value pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    sections: IndexMap<String, IndexMap<String, String>>,
}

impl Document {
    /// Returns an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses flat text into a document.
    ///
    /// Per line, in order: blank lines and lines starting with `#` or `;`
    /// are skipped; a line starting with `[` opens a section (a repeated
    /// header re-opens the existing section and merges into it); any other
    /// line is split at its first `=` into a trimmed key and value, so
    /// values may themselves contain `=`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedDocument`] for an unterminated section
    /// header, a line without `=`, or a key/value pair before any section
    /// header.
    pub fn parse(input: &str) -> Result<Self> {
        let mut doc = Self::new();
        let mut current: Option<String> = None;
        for (idx, raw_line) in input.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }
            if let Some(header) = line.strip_prefix('[') {
                let Some(name) = header.strip_suffix(']') else {
                    return Err(Error::MalformedDocument {
                        line: idx + 1,
                        reason: "unterminated section header".to_owned(),
                    });
                };
                let name = name.trim().to_owned();
                doc.sections.entry(name.clone()).or_default();
                current = Some(name);
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                return Err(Error::MalformedDocument {
                    line: idx + 1,
                    reason: "expected `key = value`".to_owned(),
                });
            };
            let Some(section) = current.as_deref() else {
                return Err(Error::MalformedDocument {
                    line: idx + 1,
                    reason: "key/value pair before any section header".to_owned(),
                });
            };
            if let Some(entries) = doc.sections.get_mut(section) {
                entries.insert(key.trim().to_owned(), value.trim().to_owned());
            }
        }
        Ok(doc)
    }

    /// Ensures a section exists, creating it empty if needed.
    pub fn add_section(&mut self, name: &str) {
        self.sections.entry(name.to_owned()).or_default();
    }

    /// Sets `key = value` in `section`, creating the section if needed.
    /// A repeated key overwrites the earlier value in place.
    pub fn insert(&mut self, section: &str, key: &str, value: String) {
        self.sections
            .entry(section.to_owned())
            .or_default()
            .insert(key.to_owned(), value);
    }

    /// Returns a section's key/value pairs, if the section exists.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&IndexMap<String, String>> {
        self.sections.get(name)
    }

    /// Iterates over sections in document order.
    pub fn sections(&self) -> impl Iterator<Item = (&str, &IndexMap<String, String>)> {
        self.sections.iter().map(|(n, e)| (n.as_str(), e))
    }

    /// Number of sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether the document has no sections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Writes the document in flat-text syntax.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying writer.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        write!(writer, "{self}")
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, entries)) in self.sections.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "[{name}]")?;
            for (key, value) in entries {
                writeln!(f, "{key} = {value}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# leading comment
; alternative comment style

[Namespace]
feddoap = http://fedoraproject.org/ontologies/feddoap#

[feddoap:Package]
rdf:type = <http://www.w3.org/2000/01/rdf-schema#Class>
rdfs:label = \"Package\"@en
";

    #[test]
    fn parses_sections_in_order() {
        let doc = Document::parse(SAMPLE).unwrap();
        let names: Vec<&str> = doc.sections().map(|(n, _)| n).collect();
        assert_eq!(names, ["Namespace", "feddoap:Package"]);
        assert_eq!(
            doc.section("Namespace").unwrap()["feddoap"],
            "http://fedoraproject.org/ontologies/feddoap#"
        );
    }

    #[test]
    fn skips_comments_and_blanks() {
        let doc = Document::parse("# only\n; comments\n\n").unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn splits_at_first_equals_only() {
        let doc = Document::parse("[s]\nkey = a = b\n").unwrap();
        assert_eq!(doc.section("s").unwrap()["key"], "a = b");
    }

    #[test]
    fn key_value_before_section_is_fatal() {
        let err = Document::parse("key = value\n").unwrap_err();
        assert!(matches!(err, crate::Error::MalformedDocument { line: 1, .. }));
    }

    #[test]
    fn unterminated_header_is_fatal() {
        let err = Document::parse("[broken\n").unwrap_err();
        assert!(matches!(err, crate::Error::MalformedDocument { line: 1, .. }));
    }

    #[test]
    fn line_without_equals_is_fatal() {
        let err = Document::parse("[s]\njust words\n").unwrap_err();
        assert!(matches!(err, crate::Error::MalformedDocument { line: 2, .. }));
    }

    #[test]
    fn duplicate_section_headers_merge() {
        let doc = Document::parse("[s]\na = 1\n[t]\nx = 9\n[s]\nb = 2\na = 3\n").unwrap();
        let s = doc.section("s").unwrap();
        assert_eq!(s["a"], "3");
        assert_eq!(s["b"], "2");
        // order of sections is first-seen
        let names: Vec<&str> = doc.sections().map(|(n, _)| n).collect();
        assert_eq!(names, ["s", "t"]);
    }

    #[test]
    fn display_round_trips() {
        let doc = Document::parse(SAMPLE).unwrap();
        let rendered = doc.to_string();
        assert_eq!(Document::parse(&rendered).unwrap(), doc);
    }
}
