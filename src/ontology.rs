//! The ontology facade.
//!
//! [`SemanticOntology`] owns one graph and one namespace registry, loads
//! flat-text or RDF/XML sources into the graph (additively), answers
//! queries about classes, properties and arbitrary subjects, and writes the
//! graph back out in either format.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use oxrdf::vocab::{rdf, rdfs};
use oxrdf::{Graph, NamedNode, NamedNodeRef, SubjectRef};
use oxrdfxml::{RdfXmlParser, RdfXmlSerializer};

use crate::document::Document;
use crate::dumper;
use crate::error::{Error, Result};
use crate::loader;
use crate::model::Info;
use crate::namespace::{NamespaceRegistry, OWL_ONTOLOGY};

/// A named RDF graph with flat-text and OWL load/dump operations.
///
/// The graph starts empty; every load merges into it. The `name` given to
/// the most recent load identifies the ontology and names the files written
/// by [`to_owl`](Self::to_owl) and [`to_text`](Self::to_text).
#[derive(Default)]
pub struct SemanticOntology {
    name: Option<String>,
    graph: Graph,
    registry: NamespaceRegistry,
}

impl SemanticOntology {
    /// Returns an empty ontology with the core namespace seed set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns an empty ontology using the given registry, for callers that
    /// want to share one abbreviation table across several ontologies.
    #[must_use]
    pub fn with_registry(registry: NamespaceRegistry) -> Self {
        Self {
            name: None,
            graph: Graph::new(),
            registry,
        }
    }

    /// The display name set by the most recent load.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The underlying triple graph.
    #[must_use]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// The namespace registry this ontology abbreviates with.
    #[must_use]
    pub fn registry(&self) -> &NamespaceRegistry {
        &self.registry
    }

    /// Mutable access to the registry, for pre-registering namespaces.
    pub fn registry_mut(&mut self) -> &mut NamespaceRegistry {
        &mut self.registry
    }

    /// Loads a flat-text ontology file, merging its triples into the graph.
    ///
    /// # Errors
    ///
    /// Returns an I/O error for an unreadable file, or any parse/load error
    /// from [`load_text_str`](Self::load_text_str).
    pub fn load_text(&mut self, name: &str, path: impl AsRef<Path>) -> Result<()> {
        let text = fs::read_to_string(path)?;
        self.load_text_str(name, &text)
    }

    /// Loads flat-text ontology source from a string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedDocument`] for structural violations,
    /// [`Error::UnknownPrefix`] for unresolvable names, or an IRI /
    /// language-tag error from the graph engine. Triples inserted before
    /// the failing line remain in the graph.
    pub fn load_text_str(&mut self, name: &str, text: &str) -> Result<()> {
        self.name = Some(name.to_owned());
        let document = Document::parse(text)?;
        loader::load_document(&document, &mut self.registry, &mut self.graph)
    }

    /// Loads an RDF/XML (OWL) ontology from a reader, merging its triples
    /// into the graph. The ontology's own declared URI, if present, is
    /// registered under `name` as its prefix so later queries and dumps use
    /// the short form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RdfXml`] for unparsable input, or
    /// [`Error::PrefixCollision`] when `name` is already bound to a
    /// different base URI.
    pub fn load_owl<R: Read>(&mut self, name: &str, source: R) -> Result<()> {
        self.name = Some(name.to_owned());
        for triple in RdfXmlParser::new().for_reader(source) {
            let triple = triple?;
            self.graph.insert(&triple);
        }
        if let Some(uri) = self.get_uri() {
            self.registry.register(name, &uri)?;
        }
        Ok(())
    }

    /// Loads an RDF/XML (OWL) ontology file.
    ///
    /// # Errors
    ///
    /// As [`load_owl`](Self::load_owl), plus an I/O error for an unreadable
    /// file.
    pub fn load_owl_path(&mut self, name: &str, path: impl AsRef<Path>) -> Result<()> {
        let file = fs::File::open(path)?;
        self.load_owl(name, io::BufReader::new(file))
    }

    /// The URI of the ontology itself: the subject declared as
    /// `rdf:type owl:Ontology`. Absent when no such triple exists; that is
    /// not an error.
    #[must_use]
    pub fn get_uri(&self) -> Option<String> {
        self.graph
            .subjects_for_predicate_object(rdf::TYPE, OWL_ONTOLOGY)
            .find_map(|subject| match subject {
                SubjectRef::NamedNode(node) => Some(node.as_str().to_owned()),
                _ => None,
            })
    }

    /// Everything known about the ontology header subject, or `None` when
    /// the graph declares no `owl:Ontology`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedUri`] when a predicate URI cannot be
    /// compressed.
    pub fn get_ontology_info(&self) -> Result<Option<Info>> {
        match self.get_uri() {
            Some(uri) => Ok(Some(self.get_info(&uri)?)),
            None => Ok(None),
        }
    }

    /// Everything known about `subject`, given as an absolute URI or a
    /// prefixed name, grouped by compressed predicate key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownPrefix`] for an unresolvable prefixed name,
    /// an IRI error for an invalid subject, or [`Error::MalformedUri`] from
    /// predicate compression.
    pub fn get_info(&self, subject: &str) -> Result<Info> {
        let uri = self.registry.expand(subject)?;
        let node = NamedNode::new(uri)?;
        dumper::subject_info(&self.graph, &self.registry, node.as_ref().into())
    }

    /// Compressed names of every subject typed `rdfs:Class`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedUri`] when a subject URI cannot be
    /// compressed.
    pub fn get_class_names(&self) -> Result<Vec<String>> {
        self.subject_names(rdfs::CLASS)
    }

    /// Every class subject with its full Info bundle, keyed by compressed
    /// name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedUri`] when a subject or predicate URI
    /// cannot be compressed.
    pub fn get_classes(&self) -> Result<IndexMap<String, Info>> {
        self.subject_infos(rdfs::CLASS)
    }

    /// Compressed names of every subject typed `rdf:Property`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedUri`] when a subject URI cannot be
    /// compressed.
    pub fn get_property_names(&self) -> Result<Vec<String>> {
        self.subject_names(rdf::PROPERTY)
    }

    /// Every property subject with its full Info bundle, keyed by
    /// compressed name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedUri`] when a subject or predicate URI
    /// cannot be compressed.
    pub fn get_properties(&self) -> Result<IndexMap<String, Info>> {
        self.subject_infos(rdf::PROPERTY)
    }

    fn subject_names(&self, type_object: NamedNodeRef<'_>) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for subject in self
            .graph
            .subjects_for_predicate_object(rdf::TYPE, type_object)
        {
            if let SubjectRef::NamedNode(node) = subject {
                names.push(self.registry.compress(node.as_str())?);
            }
        }
        Ok(names)
    }

    fn subject_infos(&self, type_object: NamedNodeRef<'_>) -> Result<IndexMap<String, Info>> {
        let mut infos = IndexMap::new();
        for subject in self
            .graph
            .subjects_for_predicate_object(rdf::TYPE, type_object)
        {
            if let SubjectRef::NamedNode(node) = subject {
                let key = self.registry.compress(node.as_str())?;
                let info = dumper::subject_info(&self.graph, &self.registry, subject)?;
                infos.insert(key, info);
            }
        }
        Ok(infos)
    }

    /// Serializes the whole graph as RDF/XML to any writer.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the writer.
    pub fn write_owl<W: Write>(&self, writer: W) -> Result<()> {
        let mut serializer = RdfXmlSerializer::new().for_writer(writer);
        for triple in self.graph.iter() {
            serializer.serialize_triple(triple)?;
        }
        serializer.finish()?.flush()?;
        Ok(())
    }

    /// Writes the graph as RDF/XML to `<name>.owl` and returns the path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingName`] when nothing has been loaded yet, or
    /// any I/O error from file creation and writing.
    pub fn to_owl(&self) -> Result<PathBuf> {
        let name = self.name.as_deref().ok_or(Error::MissingName)?;
        let path = PathBuf::from(format!("{name}.owl"));
        let file = fs::File::create(&path)?;
        self.write_owl(io::BufWriter::new(file))?;
        Ok(path)
    }

    /// Dumps classes and properties as flat text to any writer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedUri`] from URI compression or any I/O
    /// error from the writer.
    pub fn write_text<W: Write>(&self, writer: &mut W, all_lang: bool) -> Result<()> {
        let document = dumper::dump(&self.graph, &self.registry, all_lang)?;
        document.write_to(writer)?;
        Ok(())
    }

    /// Writes the flat-text dump to `<name>.onto` and returns the path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingName`] when nothing has been loaded yet, or
    /// any error from [`write_text`](Self::write_text).
    pub fn to_text(&self, all_lang: bool) -> Result<PathBuf> {
        let name = self.name.as_deref().ok_or(Error::MissingName)?;
        let path = PathBuf::from(format!("{name}.onto"));
        let mut file = io::BufWriter::new(fs::File::create(&path)?);
        self.write_text(&mut file, all_lang)?;
        file.flush()?;
        Ok(path)
    }
}
