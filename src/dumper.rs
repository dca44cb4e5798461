//! Graph → flat-text dumper.
//!
//! Walks the class and property subjects of a graph and rebuilds a
//! [`Document`]: one `Namespaces` section listing the registry, then one
//! section per subject with one key per predicate. Multi-valued predicates
//! fold into comma-separated N3 lists; a single value collapses to a bare
//! scalar; a predicate whose values were all filtered out is omitted.

use oxrdf::vocab::{rdf, rdfs};
use oxrdf::{Graph, NamedNodeRef, SubjectRef};

use crate::document::Document;
use crate::error::Result;
use crate::model::{Info, Value};
use crate::namespace::NamespaceRegistry;

/// Section name the dumper emits for the registry listing.
pub const NAMESPACES_SECTION: &str = "Namespaces";

/// Dumps `graph` into a flat-text document.
///
/// When `all_lang` is false, literals are filtered per predicate to those
/// whose language tag is absent or `en`; URI references always pass.
///
/// # Errors
///
/// Returns [`crate::Error::MalformedUri`] when a subject or predicate URI
/// has no `#` or `/` separator to compress at.
pub fn dump(graph: &Graph, registry: &NamespaceRegistry, all_lang: bool) -> Result<Document> {
    let mut document = Document::new();
    document.add_section(NAMESPACES_SECTION);
    for (prefix, base) in registry.iter() {
        document.insert(NAMESPACES_SECTION, prefix, base.to_owned());
    }
    dump_subjects_of_type(graph, registry, rdfs::CLASS, all_lang, &mut document)?;
    dump_subjects_of_type(graph, registry, rdf::PROPERTY, all_lang, &mut document)?;
    Ok(document)
}

/// Emits one section per named subject carrying `rdf:type <type_object>`.
fn dump_subjects_of_type(
    graph: &Graph,
    registry: &NamespaceRegistry,
    type_object: NamedNodeRef<'_>,
    all_lang: bool,
    document: &mut Document,
) -> Result<()> {
    for subject in graph.subjects_for_predicate_object(rdf::TYPE, type_object) {
        let SubjectRef::NamedNode(node) = subject else {
            // Blank-node subjects have no stable name in the flat format.
            continue;
        };
        let section = registry.compress(node.as_str())?;
        document.add_section(&section);
        for (key, values) in subject_info(graph, registry, subject)? {
            let rendered: Vec<String> = values
                .iter()
                .filter(|value| all_lang || value.lang().is_none_or(|lang| lang == "en"))
                .map(Value::n3)
                .collect();
            match rendered.as_slice() {
                [] => {}
                [single] => document.insert(&section, &key, single.clone()),
                _ => document.insert(&section, &key, rendered.join(", ")),
            }
        }
    }
    Ok(())
}

/// Collects everything known about `subject` as an [`Info`] bundle:
/// compressed predicate key → objects in triple iteration order.
///
/// # Errors
///
/// Returns [`crate::Error::MalformedUri`] when a predicate URI cannot be
/// split for compression.
pub fn subject_info(
    graph: &Graph,
    registry: &NamespaceRegistry,
    subject: SubjectRef<'_>,
) -> Result<Info> {
    let mut info = Info::new();
    for triple in graph.triples_for_subject(subject) {
        let key = registry.compress(triple.predicate.as_str())?;
        info.entry(key)
            .or_default()
            .push(Value::from_term(triple.object));
    }
    Ok(info)
}
