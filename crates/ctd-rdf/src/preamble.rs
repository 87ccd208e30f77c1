//! Static vocabulary preamble.
//!
//! A fixed block of vocabulary-definition statements precedes the
//! per-record output: labels and descriptions for the annotation classes
//! and properties the generated graph uses, followed by the annotation-set
//! block for this run.

use ctd_types::vocab;

use crate::sink::TripleSink;
use crate::triple::{Node, Triple};
use ctd_loader::CtdResult;

/// Number of the single annotation set emitted per run.
const ANNOTATION_SET_NUMBER: u64 = 1;

/// Writes the vocabulary definitions and the annotation-set block.
///
/// `annotated_at` is the run date in `YYYY-MM-DD` form.
pub fn write_preamble(sink: &mut dyn TripleSink, annotated_at: &str) -> CtdResult<()> {
    sink.emit(&vocabulary_triples())?;
    sink.emit(&annotation_set_triples(annotated_at))
}

/// Label and description pair for one vocabulary term.
fn describe(node: &Node, label: &str, description: &str) -> [Triple; 2] {
    [
        Triple::new(
            node.clone(),
            Node::ns(vocab::RDFS, "label"),
            Node::literal(label),
        ),
        Triple::new(
            node.clone(),
            Node::ns(vocab::DCTERMS, "description"),
            Node::literal(description),
        ),
    ]
}

/// The fixed vocabulary-definition block.
pub fn vocabulary_triples() -> Vec<Triple> {
    let mut triples = Vec::new();

    // Used in lieu of an annotation-set class until Open Annotation grows one
    triples.extend(describe(
        &Node::ns(vocab::DCTYPES, "Collection"),
        "Collection",
        "A collection is described as a group; its parts may also be separately described. \
         See http://dublincore.org/documents/dcmi-type-vocabulary/#H7",
    ));

    triples.extend(describe(
        &Node::ns(vocab::OA, "Annotation"),
        "Annotation",
        "Typically an Annotation has a single Body (oa:hasBody), which is the comment or other \
         descriptive resource, and a single Target (oa:hasTarget) that the Body is somehow \
         'about'. The Body provides the information which is annotating the Target. \
         See http://www.w3.org/ns/oa#Annotation",
    ));

    let annotated_by = Node::ns(vocab::OA, "annotatedBy");
    triples.push(Triple::new(
        annotated_by.clone(),
        Node::ns(vocab::RDFS, "label"),
        Node::literal("annotatedBy"),
    ));
    triples.push(Triple::new(
        annotated_by,
        Node::ns(vocab::RDF, "type"),
        Node::ns(vocab::OA, "objectproperties"),
    ));

    let annotated_at = Node::ns(vocab::OA, "annotatedAt");
    triples.push(Triple::new(
        annotated_at.clone(),
        Node::ns(vocab::RDFS, "label"),
        Node::literal("annotatedAt"),
    ));
    triples.push(Triple::new(
        annotated_at,
        Node::ns(vocab::RDF, "type"),
        Node::ns(vocab::OA, "dataproperties"),
    ));

    triples.extend(describe(
        &Node::ns(vocab::OA, "TextQuoteSelector"),
        "TextQuoteSelector",
        "A Selector that describes a textual segment by means of quoting it, plus passages \
         before or after it. See http://www.w3.org/ns/oa#TextQuoteSelector",
    ));

    triples.extend(describe(
        &Node::ns(vocab::OA, "hasSelector"),
        "hasSelector",
        "The relationship between a oa:SpecificResource and a oa:Selector. \
         See http://www.w3.org/ns/oa#hasSelector",
    ));

    triples.extend(describe(
        &Node::ns(vocab::OA, "SpecificResource"),
        "SpecificResource",
        "A resource identifies part of another Source resource, a particular representation of \
         a resource, a resource with styling hints for renders, or any combination of these. \
         See http://www.w3.org/ns/oa#SpecificResource",
    ));

    triples.extend(describe(
        &Node::ns(vocab::SIO, "SIO_000628"),
        "refers to",
        "refers to is a relation between one entity and the entity that it makes reference to.",
    ));

    triples.extend(describe(
        &Node::ns(vocab::SIO, "SIO_000563"),
        "describes",
        "describes is a relation between one entity and another entity that it provides a \
         description (detailed account of)",
    ));

    triples.extend(describe(
        &Node::ns(vocab::SIO, "SIO_000338"),
        "specifies",
        "A relation between an information content entity and a product that it \
         (directly/indirectly) specifies",
    ));

    triples.extend(describe(
        &Node::ns(vocab::POC, "MeshDrug"),
        "MeSH Drug code",
        "Drug code in the MeSH vocabulary.",
    ));

    triples.extend(describe(
        &Node::ns(vocab::POC, "RxnormDrug"),
        "Rxnorm Drug code",
        "Drug code in the Rxnorm vocabulary.",
    ));

    triples.extend(describe(
        &Node::ns(vocab::POC, "ImedsDrug"),
        "IMEDS Drug code",
        "Drug code in the IMEDS standard vocabulary.",
    ));

    triples.extend(describe(
        &Node::ns(vocab::POC, "MeshHoi"),
        "MeSH HOI code",
        "HOI code in the MeSH vocabulary.",
    ));

    triples.extend(describe(
        &Node::ns(vocab::POC, "ImedsHoi"),
        "Imeds HOI code",
        "HOI code in the IMEDS vocabulary.",
    ));

    triples
}

/// The annotation-set block for this run.
pub fn annotation_set_triples(annotated_at: &str) -> Vec<Triple> {
    let set = Node::ns(
        vocab::POC,
        &format!("ohdsi-ctd-annotation-set-{ANNOTATION_SET_NUMBER}"),
    );
    vec![
        Triple::new(
            set.clone(),
            Node::ns(vocab::RDF, "type"),
            Node::ns(vocab::OA, "DataAnnotation"),
        ),
        Triple::new(
            set.clone(),
            Node::ns(vocab::OA, "annotatedAt"),
            Node::literal(annotated_at),
        ),
        Triple::new(
            set,
            Node::ns(vocab::OA, "annotatedBy"),
            Node::iri(vocab::ANNOTATED_BY),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;

    #[test]
    fn test_preamble_precedes_set_block() {
        let mut sink = MemorySink::new();
        write_preamble(&mut sink, "2016-01-15").unwrap();

        let vocabulary = vocabulary_triples();
        assert!(sink.len() > vocabulary.len());
        assert_eq!(&sink.triples()[..vocabulary.len()], &vocabulary[..]);

        let set = &sink.triples()[vocabulary.len()..];
        assert_eq!(set.len(), 3);
        assert!(set
            .iter()
            .any(|t| t.object == Node::literal("2016-01-15")));
    }

    #[test]
    fn test_vocabulary_block_is_deterministic() {
        assert_eq!(vocabulary_triples(), vocabulary_triples());
    }

    #[test]
    fn test_set_iri_is_numbered() {
        let triples = annotation_set_triples("2016-01-15");
        let subject = &triples[0].subject;
        match subject {
            Node::Iri(iri) => assert!(iri.ends_with("ohdsi-ctd-annotation-set-1")),
            Node::Literal(_) => panic!("set subject must be an IRI"),
        }
    }
}
