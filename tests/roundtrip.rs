//! End-to-end round-trip tests across both serialization formats.
//!
//! A flat-text document loaded, dumped with `all_lang = true`, and reloaded
//! must reproduce an equivalent triple set; the same holds for RDF/XML via
//! `write_owl`/`load_owl`.

use std::collections::BTreeSet;

use anyhow::Result;
use semon::SemanticOntology;

const FEDDOAP: &str = r#"
# The Fedora DOAP extension, as flat text.
[Namespace]
feddoap = http://fedoraproject.org/ontologies/feddoap#

[feddoap:Package]
rdf:type = <http://www.w3.org/2000/01/rdf-schema#Class>
rdfs:label = "Package"@en, "Paquet"@fr
rdfs:comment = "A package is a pre-built, distributable, project."@en

[feddoap:maintainer]
rdf:type = <http://www.w3.org/1999/02/22-rdf-syntax-ns#Property>
rdfs:label = "maintainer"@en
rdfs:domain = <http://fedoraproject.org/ontologies/feddoap#Package>
"#;

/// Canonical, order-independent view of a graph for equivalence checks.
fn triple_set(ontology: &SemanticOntology) -> BTreeSet<String> {
    ontology.graph().iter().map(|t| t.to_string()).collect()
}

#[test]
fn flat_text_round_trip_preserves_the_triple_set() -> Result<()> {
    let mut first = SemanticOntology::new();
    first.load_text_str("feddoap", FEDDOAP)?;

    let mut dumped = Vec::new();
    first.write_text(&mut dumped, true)?;

    let mut second = SemanticOntology::new();
    second.load_text_str("feddoap", &String::from_utf8(dumped)?)?;

    assert_eq!(triple_set(&first), triple_set(&second));
    Ok(())
}

#[test]
fn owl_round_trip_preserves_the_triple_set() -> Result<()> {
    let mut first = SemanticOntology::new();
    first.load_text_str("feddoap", FEDDOAP)?;

    let mut owl = Vec::new();
    first.write_owl(&mut owl)?;

    let mut second = SemanticOntology::new();
    second.load_owl("feddoap", owl.as_slice())?;

    assert_eq!(triple_set(&first), triple_set(&second));
    Ok(())
}

#[test]
fn feddoap_projections_match_the_source() -> Result<()> {
    let mut ontology = SemanticOntology::new();
    ontology.load_text_str("feddoap", FEDDOAP)?;

    assert_eq!(ontology.get_class_names()?, ["feddoap:Package"]);
    assert_eq!(ontology.get_property_names()?, ["feddoap:maintainer"]);

    let classes = ontology.get_classes()?;
    let labels: BTreeSet<String> = classes["feddoap:Package"]["rdfs:label"]
        .iter()
        .map(semon::Value::n3)
        .collect();
    let expected: BTreeSet<String> = ["\"Package\"@en", "\"Paquet\"@fr"]
        .into_iter()
        .map(str::to_owned)
        .collect();
    assert_eq!(labels, expected);
    Ok(())
}

#[test]
fn language_filtered_dump_reloads_without_french() -> Result<()> {
    let mut first = SemanticOntology::new();
    first.load_text_str("feddoap", FEDDOAP)?;

    let mut dumped = Vec::new();
    first.write_text(&mut dumped, false)?;
    let text = String::from_utf8(dumped)?;
    assert!(!text.contains("Paquet"));

    let mut second = SemanticOntology::new();
    second.load_text_str("feddoap", &text)?;
    let classes = second.get_classes()?;
    let labels = &classes["feddoap:Package"]["rdfs:label"];
    assert_eq!(labels.len(), 1);
    assert_eq!(labels[0].n3(), "\"Package\"@en");
    Ok(())
}

#[test]
fn load_owl_registers_the_ontology_uri_under_its_name() -> Result<()> {
    let owl = r#"<?xml version="1.0" encoding="UTF-8"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:rdfs="http://www.w3.org/2000/01/rdf-schema#"
         xmlns:owl="http://www.w3.org/2002/07/owl#">
  <owl:Ontology rdf:about="http://example.org/vocab#">
    <rdfs:label xml:lang="en">Example vocabulary</rdfs:label>
  </owl:Ontology>
  <rdfs:Class rdf:about="http://example.org/vocab#Gadget">
    <rdfs:label xml:lang="en">Gadget</rdfs:label>
  </rdfs:Class>
</rdf:RDF>
"#;

    let mut ontology = SemanticOntology::new();
    ontology.load_owl("vocab", owl.as_bytes())?;

    assert_eq!(ontology.get_uri().as_deref(), Some("http://example.org/vocab#"));
    assert_eq!(
        ontology.registry().prefix_for("http://example.org/vocab#"),
        Some("vocab")
    );
    assert_eq!(ontology.get_class_names()?, ["vocab:Gadget"]);

    let info = ontology
        .get_ontology_info()?
        .expect("ontology header present");
    assert_eq!(info["rdfs:label"][0].n3(), "\"Example vocabulary\"@en");
    Ok(())
}

#[test]
fn to_text_and_to_owl_write_named_files() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let name = dir.path().join("feddoap").to_string_lossy().into_owned();

    let mut ontology = SemanticOntology::new();
    ontology.load_text_str(&name, FEDDOAP)?;

    let onto_path = ontology.to_text(true)?;
    assert_eq!(onto_path.extension().and_then(|e| e.to_str()), Some("onto"));
    let text = std::fs::read_to_string(&onto_path)?;
    assert!(text.contains("[feddoap:Package]"));
    assert!(text.contains("[Namespaces]"));

    let owl_path = ontology.to_owl()?;
    assert_eq!(owl_path.extension().and_then(|e| e.to_str()), Some("owl"));
    let owl = std::fs::read_to_string(&owl_path)?;
    assert!(owl.contains("rdf:RDF"));

    // The dumped file must itself be loadable.
    let mut reloaded = SemanticOntology::new();
    reloaded.load_text("feddoap", &onto_path)?;
    assert_eq!(triple_set(&ontology), triple_set(&reloaded));
    Ok(())
}
