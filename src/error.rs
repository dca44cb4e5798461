//! Crate-wide error type.
//!
//! Every fallible operation returns [`crate::Result`]. Errors are raised at
//! the point of detection and propagate to the caller; there is no recovery
//! and no rollback of triples already inserted into the graph.

use thiserror::Error;

/// Errors produced while parsing, loading, dumping, or serializing an
/// ontology.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Structural violation in a flat-text document.
    #[error("malformed document at line {line}: {reason}")]
    MalformedDocument {
        /// 1-based line number of the offending line.
        line: usize,
        /// What the parser expected or found.
        reason: String,
    },

    /// A prefixed name used a short name that is not in the registry.
    #[error("unknown namespace prefix in `{0}`")]
    UnknownPrefix(String),

    /// A URI given to `compress` has no `#` or `/` separator after its scheme.
    #[error("URI `{0}` has no `#` or `/` separator")]
    MalformedUri(String),

    /// Attempted to rebind a registered prefix to a different base URI.
    #[error("prefix `{prefix}` is already bound to `{existing}`, refusing `{proposed}`")]
    PrefixCollision {
        /// The short prefix under dispute.
        prefix: String,
        /// Base URI the prefix is currently bound to.
        existing: String,
        /// Base URI the caller tried to bind.
        proposed: String,
    },

    /// Tried to serialize an ontology before any load gave it a name.
    #[error("ontology has no name; load an ontology before serializing it")]
    MissingName,

    /// The graph engine rejected an expanded URI.
    #[error(transparent)]
    InvalidIri(#[from] oxrdf::IriParseError),

    /// The graph engine rejected a literal's language tag.
    #[error(transparent)]
    InvalidLanguageTag(#[from] oxrdf::LanguageTagParseError),

    /// The RDF/XML source handed to `load_owl` could not be parsed.
    #[error(transparent)]
    RdfXml(#[from] oxrdfxml::RdfXmlParseError),

    /// File or stream I/O failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Alias for `std::result::Result` with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;
