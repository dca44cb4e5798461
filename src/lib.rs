//! Bidirectional converter between a compact flat-text ontology format and
//! RDF/OWL graphs.
//!
//! The flat format is an INI-like text file: `[section]` headers name
//! subjects as prefixed names, `key = value` lines name predicates and
//! objects, and a reserved `Namespace` section declares the prefix
//! abbreviations the rest of the document uses. Loading turns each
//! section/key/value into an RDF triple; dumping walks the graph's classes
//! and properties and rebuilds the text, filtering literals by language and
//! collapsing single-valued lists to scalars.
//!
//! Triple storage and RDF/XML are delegated to the `oxrdf` and `oxrdfxml`
//! crates; this crate owns the text format, the namespace registry, and the
//! mapping between the two representations.
//!
//! # Entry Point
//!
//! ```
//! let text = r#"
//! [Namespace]
//! ex = http://example.org/ns#
//!
//! [ex:Widget]
//! rdf:type = <http://www.w3.org/2000/01/rdf-schema#Class>
//! rdfs:label = "Widget"@en
//! "#;
//!
//! let mut ontology = semon::SemanticOntology::new();
//! ontology.load_text_str("example", text).expect("well-formed ontology text");
//! assert_eq!(
//!     ontology.get_class_names().expect("known prefixes"),
//!     ["ex:Widget"]
//! );
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod document;
pub mod dumper;
pub mod error;
pub mod loader;
pub mod model;
pub mod namespace;
pub mod ontology;

pub use document::Document;
pub use error::{Error, Result};
pub use model::{Info, Value};
pub use namespace::NamespaceRegistry;
pub use ontology::SemanticOntology;
