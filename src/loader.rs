//! Flat-text document → graph loader.
//!
//! Runs two passes over a parsed [`Document`]: the reserved namespace
//! section first, so every prefix used elsewhere in the document can
//! resolve, then every other section in document order, one triple per
//! section/key/value combination.

use oxrdf::{Graph, NamedNode, TripleRef};

use crate::document::Document;
use crate::error::Result;
use crate::model;
use crate::namespace::NamespaceRegistry;

/// The reserved section spellings holding `prefix = base_uri` pairs.
/// `Namespace` is what hand-written files use; `Namespaces` is what the
/// dumper emits, accepted here so dumped documents reload.
pub const NAMESPACE_SECTIONS: &[&str] = &["Namespace", "Namespaces"];

/// Loads a parsed document into `graph`, registering its namespace section
/// into `registry` first.
///
/// Section names become subjects, keys become predicates, and each value is
/// classified by [`model::parse_values`] into one or more objects. Inserting
/// a triple that is already present is a no-op.
///
/// # Errors
///
/// Returns [`crate::Error::UnknownPrefix`] for an unregistered prefix,
/// [`crate::Error::PrefixCollision`] from the namespace pass, or an IRI /
/// language-tag error from term construction. Triples inserted before the
/// failing line remain in the graph.
pub fn load_document(
    document: &Document,
    registry: &mut NamespaceRegistry,
    graph: &mut Graph,
) -> Result<()> {
    for section in NAMESPACE_SECTIONS {
        if let Some(entries) = document.section(section) {
            for (prefix, base) in entries {
                registry.register(prefix, base)?;
            }
        }
    }

    for (name, entries) in document.sections() {
        if NAMESPACE_SECTIONS.contains(&name) {
            continue;
        }
        let subject = NamedNode::new(registry.expand(name)?)?;
        for (key, raw_value) in entries {
            let predicate = NamedNode::new(registry.expand(key)?)?;
            for value in model::parse_values(raw_value) {
                let object = value.to_term()?;
                graph.insert(TripleRef::new(
                    subject.as_ref(),
                    predicate.as_ref(),
                    object.as_ref(),
                ));
            }
        }
    }
    Ok(())
}
