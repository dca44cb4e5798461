//! Namespace registry and URI codec.
//!
//! The registry maps short prefixes (`rdfs`) to base URIs and back. It is
//! what makes the flat-text format human-writable: section names and keys
//! are prefixed names that [`NamespaceRegistry::expand`] resolves to full
//! URIs, and the dumper runs every URI through
//! [`NamespaceRegistry::compress`] before emitting it.
//!
//! Each [`crate::SemanticOntology`] owns its registry; there is no
//! process-wide table, so loading one ontology can never change how another
//! is abbreviated. Construct via [`Default`] to get the core vocabulary
//! seed set.

use indexmap::IndexMap;
use oxrdf::NamedNodeRef;

use crate::error::{Error, Result};

/// `owl:Ontology`, the type of an ontology's own header subject.
pub const OWL_ONTOLOGY: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#Ontology");

/// The well-known vocabularies every registry starts with.
pub const CORE_NAMESPACES: &[(&str, &str)] = &[
    ("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
    ("rdfs", "http://www.w3.org/2000/01/rdf-schema#"),
    ("owl", "http://www.w3.org/2002/07/owl#"),
    ("vs", "http://www.w3.org/2003/06/sw-vocab-status/ns#"),
    ("dc", "http://purl.org/dc/elements/1.1/"),
    ("foaf", "http://xmlns.com/foaf/0.1/"),
];

/// Append-only mapping between short prefixes and namespace base URIs.
///
/// Prefixes are unique. Base URIs are unique as well: the first prefix bound
/// to a base wins, and later bindings of the same base under a new prefix
/// are ignored. Entries iterate in registration order.
#[derive(Debug, Clone)]
pub struct NamespaceRegistry {
    /// prefix -> base URI, in registration order.
    entries: IndexMap<String, String>,
}

impl Default for NamespaceRegistry {
    fn default() -> Self {
        let mut entries = IndexMap::with_capacity(CORE_NAMESPACES.len());
        for (prefix, base) in CORE_NAMESPACES {
            entries.insert((*prefix).to_owned(), (*base).to_owned());
        }
        Self { entries }
    }
}

impl NamespaceRegistry {
    /// Returns a registry seeded with [`CORE_NAMESPACES`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a registry with no entries at all, not even the seed set.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Binds `prefix` to `base`.
    ///
    /// Re-registering an existing pair is a no-op, as is binding a second
    /// prefix to an already-registered base (the first prefix wins).
    ///
    /// # Errors
    ///
    /// Returns [`Error::PrefixCollision`] if `prefix` is already bound to a
    /// different base URI.
    pub fn register(&mut self, prefix: &str, base: &str) -> Result<()> {
        if let Some(existing) = self.entries.get(prefix) {
            if existing == base {
                return Ok(());
            }
            return Err(Error::PrefixCollision {
                prefix: prefix.to_owned(),
                existing: existing.clone(),
                proposed: base.to_owned(),
            });
        }
        if self.prefix_for(base).is_some() {
            return Ok(());
        }
        self.entries.insert(prefix.to_owned(), base.to_owned());
        Ok(())
    }

    /// Returns the base URI bound to `prefix`, if any.
    #[must_use]
    pub fn base_for(&self, prefix: &str) -> Option<&str> {
        self.entries.get(prefix).map(String::as_str)
    }

    /// Returns the prefix bound to `base`, if any.
    #[must_use]
    pub fn prefix_for(&self, base: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, b)| b.as_str() == base)
            .map(|(p, _)| p.as_str())
    }

    /// Expands a prefixed name (`ns:local`) to a full URI.
    ///
    /// Absolute URIs (`scheme://...`) pass through unchanged, so subjects the
    /// dumper could not abbreviate still reload.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownPrefix`] when the prefix is not registered or
    /// the name has no `:` at all. Silently passing the unresolved name
    /// through would corrupt the URI, so this fails loudly instead.
    pub fn expand(&self, name: &str) -> Result<String> {
        match name.split_once(':') {
            Some((_, rest)) if rest.starts_with("//") => Ok(name.to_owned()),
            Some((prefix, local)) => match self.entries.get(prefix) {
                Some(base) => Ok(format!("{base}{local}")),
                None => Err(Error::UnknownPrefix(name.to_owned())),
            },
            None => Err(Error::UnknownPrefix(name.to_owned())),
        }
    }

    /// Compresses a full URI to `prefix:local` when its base is registered,
    /// otherwise returns the URI unchanged.
    ///
    /// The URI is split at the last `#`, or failing that the last `/` after
    /// the scheme; the base keeps its trailing separator for the registry
    /// lookup.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedUri`] when the URI has neither separator
    /// after its scheme.
    pub fn compress(&self, uri: &str) -> Result<String> {
        let split = match uri.rfind('#') {
            Some(pos) => Some(pos),
            None => {
                let start = uri.find("://").map_or(0, |i| i + 3);
                uri[start..].rfind('/').map(|p| start + p)
            }
        };
        let Some(pos) = split else {
            return Err(Error::MalformedUri(uri.to_owned()));
        };
        let (base, local) = uri.split_at(pos + 1);
        match self.prefix_for(base) {
            Some(prefix) => Ok(format!("{prefix}:{local}")),
            None => Ok(uri.to_owned()),
        }
    }

    /// Iterates over `(prefix, base)` entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, b)| (p.as_str(), b.as_str()))
    }

    /// Number of registered namespaces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn seeded_with_core_vocabularies() {
        let registry = NamespaceRegistry::new();
        assert_eq!(registry.len(), 6);
        assert_eq!(
            registry.base_for("rdfs"),
            Some("http://www.w3.org/2000/01/rdf-schema#")
        );
        assert_eq!(registry.prefix_for("http://xmlns.com/foaf/0.1/"), Some("foaf"));
    }

    #[test]
    fn expand_resolves_registered_prefix() {
        let registry = NamespaceRegistry::new();
        assert_eq!(
            registry.expand("rdfs:label").unwrap(),
            "http://www.w3.org/2000/01/rdf-schema#label"
        );
    }

    #[test]
    fn expand_passes_absolute_uris_through() {
        let registry = NamespaceRegistry::new();
        let uri = "http://example.org/ns#Thing";
        assert_eq!(registry.expand(uri).unwrap(), uri);
    }

    #[test]
    fn expand_fails_on_unknown_prefix() {
        let registry = NamespaceRegistry::new();
        let err = registry.expand("nope:Thing").unwrap_err();
        assert!(matches!(err, Error::UnknownPrefix(name) if name == "nope:Thing"));
    }

    #[test]
    fn expand_fails_without_colon() {
        let registry = NamespaceRegistry::new();
        assert!(matches!(
            registry.expand("Thing"),
            Err(Error::UnknownPrefix(_))
        ));
    }

    #[test]
    fn compress_prefers_hash_over_slash() {
        let registry = NamespaceRegistry::new();
        assert_eq!(
            registry
                .compress("http://www.w3.org/2000/01/rdf-schema#label")
                .unwrap(),
            "rdfs:label"
        );
        assert_eq!(
            registry.compress("http://purl.org/dc/elements/1.1/title").unwrap(),
            "dc:title"
        );
    }

    #[test]
    fn compress_leaves_unregistered_base_alone() {
        let registry = NamespaceRegistry::new();
        let uri = "http://example.org/other#Thing";
        assert_eq!(registry.compress(uri).unwrap(), uri);
    }

    #[test]
    fn compress_rejects_uri_without_separator() {
        let registry = NamespaceRegistry::new();
        assert!(matches!(
            registry.compress("urn:isbn"),
            Err(Error::MalformedUri(_))
        ));
    }

    #[test]
    fn compress_ignores_scheme_slashes() {
        // The `//` of the scheme must not count as a separator.
        let registry = NamespaceRegistry::new();
        assert!(matches!(
            registry.compress("http://no-path-here"),
            Err(Error::MalformedUri(_))
        ));
    }

    #[test]
    fn register_is_idempotent() {
        let mut registry = NamespaceRegistry::new();
        registry.register("ex", "http://example.org/ns#").unwrap();
        registry.register("ex", "http://example.org/ns#").unwrap();
        assert_eq!(registry.base_for("ex"), Some("http://example.org/ns#"));
    }

    #[test]
    fn register_rejects_prefix_collision() {
        let mut registry = NamespaceRegistry::new();
        let err = registry
            .register("rdfs", "http://example.org/impostor#")
            .unwrap_err();
        assert!(matches!(err, Error::PrefixCollision { prefix, .. } if prefix == "rdfs"));
    }

    #[test]
    fn first_prefix_for_a_base_wins() {
        let mut registry = NamespaceRegistry::new();
        registry
            .register("alias", "http://www.w3.org/2002/07/owl#")
            .unwrap();
        assert_eq!(registry.base_for("alias"), None);
        assert_eq!(
            registry.prefix_for("http://www.w3.org/2002/07/owl#"),
            Some("owl")
        );
    }

    #[test]
    fn expand_compress_round_trip() {
        let mut registry = NamespaceRegistry::new();
        registry
            .register("feddoap", "http://fedoraproject.org/ontologies/feddoap#")
            .unwrap();
        let uri = registry.expand("feddoap:Package").unwrap();
        assert_eq!(uri, "http://fedoraproject.org/ontologies/feddoap#Package");
        assert_eq!(registry.compress(&uri).unwrap(), "feddoap:Package");
    }
}
