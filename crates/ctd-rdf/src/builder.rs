//! Annotation graph builder.
//!
//! Turns normalized associations into Open Annotation statements. Each
//! source row yields one annotation item whose target references the row's
//! OMIM record or PubMed article; every association that resolves through
//! the terminology maps contributes one body carrying the standardized
//! chemical and disease codes plus the copied evidence fields.

use std::collections::HashMap;

use ctd_loader::{strip_vocab_prefix, CtdResult, TerminologyMaps};
use ctd_types::{vocab, CtdAssociation, SourceId};

use crate::sink::TripleSink;
use crate::triple::{Node, Triple};

/// What happened to one association.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Statements were emitted.
    Emitted,
    /// Skipped: the chemical id has no RxNorm/OMOP mapping.
    UnmappedChemical,
    /// Skipped: the disease id has no OMOP mapping.
    UnmappedDisease,
}

/// Running totals for one build pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Associations consumed.
    pub associations: usize,
    /// Annotation items created (one per distinct emitted source row).
    pub items_created: usize,
    /// Annotation bodies created (one per emitted association).
    pub bodies_created: usize,
    /// Associations skipped on a chemical-map miss.
    pub unmapped_chemicals: usize,
    /// Associations skipped on a disease-map miss.
    pub unmapped_diseases: usize,
}

/// Builds annotation items, targets, and bodies from associations.
///
/// Owns the item cache and the two identifier counters, so a builder value
/// is one run: counters increase monotonically across its whole lifetime
/// and are never reused or reset. Associations sharing a row ordinal reuse
/// the row's cached item — the first one emits the item and target block,
/// later ones attach additional bodies only.
pub struct AnnotationBuilder<'a> {
    maps: &'a TerminologyMaps,
    annotated_at: String,
    /// Next item number to allocate.
    item_counter: u64,
    /// Next body number to allocate.
    body_counter: u64,
    /// Row ordinal to allocated item number.
    item_cache: HashMap<usize, u64>,
    stats: BuildStats,
}

impl<'a> AnnotationBuilder<'a> {
    /// Creates a builder over loaded terminology maps.
    ///
    /// `annotated_at` is the run date in `YYYY-MM-DD` form, recorded on
    /// every emitted item.
    pub fn new(maps: &'a TerminologyMaps, annotated_at: impl Into<String>) -> Self {
        Self {
            maps,
            annotated_at: annotated_at.into(),
            item_counter: 1,
            body_counter: 1,
            item_cache: HashMap::new(),
            stats: BuildStats::default(),
        }
    }

    /// Processes one association, emitting its statements as one batch.
    ///
    /// A resolution miss against either terminology map is recoverable: the
    /// association is skipped with a warning, nothing is emitted, and no
    /// counter moves.
    pub fn process(
        &mut self,
        assoc: &CtdAssociation,
        sink: &mut dyn TripleSink,
    ) -> CtdResult<Outcome> {
        self.stats.associations += 1;

        let Some(chemical) = self.maps.chemicals.resolve(&assoc.chemical_id) else {
            tracing::warn!(
                "skipping record: no RxNorm/OMOP mapping for chemical {}",
                assoc.chemical_id
            );
            self.stats.unmapped_chemicals += 1;
            return Ok(Outcome::UnmappedChemical);
        };

        let mesh_hoi = strip_vocab_prefix(&assoc.disease_id);
        let Some(omop_hoi) = self.maps.diseases.resolve(mesh_hoi) else {
            tracing::warn!(
                "skipping record: chemical {} + MeSH HOI {}: unable to map HOI to OMOP",
                assoc.chemical_id,
                mesh_hoi
            );
            self.stats.unmapped_diseases += 1;
            return Ok(Outcome::UnmappedDisease);
        };

        tracing::debug!(
            "chemical {} mapped to rxnorm {} and omop {}; HOI {} mapped to {}",
            assoc.chemical_id,
            chemical.rxnorm_code,
            chemical.omop_code,
            mesh_hoi,
            omop_hoi
        );

        let mut triples = Vec::new();

        let item = match self.item_cache.get(&assoc.row) {
            Some(&number) => item_node(number),
            None => {
                let number = self.item_counter;
                self.item_counter += 1;
                self.item_cache.insert(assoc.row, number);
                self.stats.items_created += 1;

                let item = item_node(number);
                self.push_item_block(&mut triples, &item, number, &assoc.source);
                item
            }
        };

        let body_number = self.body_counter;
        self.body_counter += 1;
        self.stats.bodies_created += 1;
        self.push_body_block(
            &mut triples,
            &item,
            body_number,
            assoc,
            &chemical.rxnorm_code,
            &chemical.omop_code,
            mesh_hoi,
            omop_hoi,
        );

        sink.emit(&triples)?;
        Ok(Outcome::Emitted)
    }

    /// Returns the running totals.
    pub fn stats(&self) -> &BuildStats {
        &self.stats
    }

    /// Consumes the builder and returns the final totals.
    pub fn finish(self) -> BuildStats {
        self.stats
    }

    /// Statements introducing a new item and its target.
    fn push_item_block(
        &self,
        triples: &mut Vec<Triple>,
        item: &Node,
        number: u64,
        source: &SourceId,
    ) {
        let rdf_type = Node::ns(vocab::RDF, "type");

        triples.push(Triple::new(
            item.clone(),
            rdf_type.clone(),
            Node::ns(vocab::OA, "DataAnnotation"),
        ));
        triples.push(Triple::new(
            item.clone(),
            rdf_type.clone(),
            Node::ns(vocab::OHDSI, "ADRAnnotation"),
        ));
        triples.push(Triple::new(
            item.clone(),
            Node::ns(vocab::OA, "annotatedAt"),
            Node::literal(self.annotated_at.as_str()),
        ));
        triples.push(Triple::new(
            item.clone(),
            Node::ns(vocab::OA, "annotatedBy"),
            Node::iri(vocab::ANNOTATED_BY),
        ));
        triples.push(Triple::new(
            item.clone(),
            Node::ns(vocab::OA, "motivatedBy"),
            Node::ns(vocab::OA, "tagging"),
        ));

        let target = target_node(number);
        triples.push(Triple::new(
            item.clone(),
            Node::ns(vocab::OA, "hasTarget"),
            target.clone(),
        ));
        triples.push(Triple::new(
            target.clone(),
            rdf_type,
            Node::ns(vocab::OA, "SpecificResource"),
        ));

        let external = match source {
            SourceId::Omim(id) => Node::ns(vocab::OMIM, id),
            SourceId::Pubmed(id) => Node::ns(vocab::PUBMED, id),
        };
        triples.push(Triple::new(
            target,
            Node::ns(vocab::OA, "hasSource"),
            external,
        ));
    }

    /// Statements for one body, linked to its item.
    #[allow(clippy::too_many_arguments)]
    fn push_body_block(
        &self,
        triples: &mut Vec<Triple>,
        item: &Node,
        number: u64,
        assoc: &CtdAssociation,
        rxnorm_drug: &str,
        omop_drug: &str,
        mesh_hoi: &str,
        omop_hoi: &str,
    ) {
        let body = body_node(number);

        triples.push(Triple::new(
            item.clone(),
            Node::ns(vocab::OA, "hasBody"),
            body.clone(),
        ));
        triples.push(Triple::new(
            body.clone(),
            Node::ns(vocab::RDFS, "label"),
            Node::literal(format!(
                "Drug-HOI tag for {omop_drug}-{omop_hoi} (mesh: {}-{mesh_hoi})",
                assoc.chemical_id
            )),
        ));
        triples.push(Triple::new(
            body.clone(),
            Node::ns(vocab::RDF, "type"),
            Node::ns(vocab::OHDSI, "adrAnnotationBody"),
        ));
        triples.push(Triple::new(
            body.clone(),
            Node::ns(vocab::DCTERMS, "description"),
            Node::literal(format!(
                "Drug-HOI tag for {} - {}",
                assoc.chemical_name, assoc.disease_name
            )),
        ));
        triples.push(Triple::new(
            body.clone(),
            Node::ns(vocab::OHDSI, "MeshDrug"),
            Node::ns(vocab::MESH, &assoc.chemical_id),
        ));
        triples.push(Triple::new(
            body.clone(),
            Node::ns(vocab::OHDSI, "RxnormDrug"),
            Node::ns(vocab::RXNORM, rxnorm_drug),
        ));
        triples.push(Triple::new(
            body.clone(),
            Node::ns(vocab::OHDSI, "ImedsDrug"),
            Node::ns(vocab::OHDSI, omop_drug),
        ));
        triples.push(Triple::new(
            body.clone(),
            Node::ns(vocab::OHDSI, "ImedsHoi"),
            Node::ns(vocab::OHDSI, omop_hoi),
        ));
        triples.push(Triple::new(
            body.clone(),
            Node::ns(vocab::OHDSI, "MeshHoi"),
            Node::ns(vocab::MESH, mesh_hoi),
        ));
        triples.push(Triple::new(
            body.clone(),
            Node::ns(vocab::OHDSI, "DirectEvidence"),
            Node::literal(assoc.direct_evidence.as_str()),
        ));
        triples.push(Triple::new(
            body.clone(),
            Node::ns(vocab::OHDSI, "InferenceGeneSymbol"),
            Node::literal(assoc.inference_gene_symbol.as_str()),
        ));
        triples.push(Triple::new(
            body,
            Node::ns(vocab::OHDSI, "InferenceScore"),
            Node::literal(assoc.inference_score.as_str()),
        ));
    }
}

fn item_node(number: u64) -> Node {
    Node::ns(vocab::POC, &format!("ohdsi-ctd-annotation-item-{number}"))
}

/// The target shares its item's number; an item has exactly one target.
fn target_node(number: u64) -> Node {
    Node::ns(vocab::POC, &format!("ohdsi-ctd-annotation-target-{number}"))
}

fn body_node(number: u64) -> Node {
    Node::ns(vocab::POC, &format!("ohdsi-ctd-annotation-body-{number}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;
    use ctd_loader::{ChemicalMap, DiseaseMap};

    const CHEMICAL_TABLE: &str = "\
mesh|pt|rxcui|concept_name|ohdsiID|conceptClassId
D001241|Aspirin|1191|aspirin|1112807|Ingredient
";

    const DISEASE_TABLE: &str = "\
omop|concept_name|mesh
201820|Diabetes mellitus|D003920
";

    fn make_maps() -> TerminologyMaps {
        TerminologyMaps {
            chemicals: ChemicalMap::from_reader(CHEMICAL_TABLE.as_bytes()).unwrap(),
            diseases: DiseaseMap::from_reader(DISEASE_TABLE.as_bytes()).unwrap(),
        }
    }

    fn make_assoc(row: usize, chemical_id: &str, source: SourceId) -> CtdAssociation {
        CtdAssociation {
            row,
            chemical_name: "Aspirin".to_string(),
            chemical_id: chemical_id.to_string(),
            cas_rn: "50-78-2".to_string(),
            disease_name: "Diabetes Mellitus".to_string(),
            disease_id: "MESH:D003920".to_string(),
            direct_evidence: "marker/mechanism".to_string(),
            inference_gene_symbol: String::new(),
            inference_score: String::new(),
            source,
        }
    }

    fn count_predicate(sink: &MemorySink, namespace: &str, local: &str) -> usize {
        let predicate = Node::ns(namespace, local);
        sink.triples()
            .iter()
            .filter(|t| t.predicate == predicate)
            .count()
    }

    #[test]
    fn test_single_association_emits_item_target_body() {
        let maps = make_maps();
        let mut builder = AnnotationBuilder::new(&maps, "2016-01-15");
        let mut sink = MemorySink::new();

        let assoc = make_assoc(0, "D001241", SourceId::Pubmed("12345678".to_string()));
        let outcome = builder.process(&assoc, &mut sink).unwrap();
        assert_eq!(outcome, Outcome::Emitted);

        assert_eq!(count_predicate(&sink, vocab::OA, "hasTarget"), 1);
        assert_eq!(count_predicate(&sink, vocab::OA, "hasBody"), 1);

        let source_triple = sink
            .triples()
            .iter()
            .find(|t| t.predicate == Node::ns(vocab::OA, "hasSource"))
            .unwrap();
        assert_eq!(source_triple.object, Node::ns(vocab::PUBMED, "12345678"));

        // resolved codes land on the body
        let imeds_drug = Node::ns(vocab::OHDSI, "ImedsDrug");
        let drug_triple = sink
            .triples()
            .iter()
            .find(|t| t.predicate == imeds_drug)
            .unwrap();
        assert_eq!(drug_triple.object, Node::ns(vocab::OHDSI, "1112807"));

        let imeds_hoi = Node::ns(vocab::OHDSI, "ImedsHoi");
        let hoi_triple = sink
            .triples()
            .iter()
            .find(|t| t.predicate == imeds_hoi)
            .unwrap();
        assert_eq!(hoi_triple.object, Node::ns(vocab::OHDSI, "201820"));

        let stats = builder.finish();
        assert_eq!(stats.items_created, 1);
        assert_eq!(stats.bodies_created, 1);
    }

    #[test]
    fn test_shared_row_reuses_item_and_target() {
        let maps = make_maps();
        let mut builder = AnnotationBuilder::new(&maps, "2016-01-15");
        let mut sink = MemorySink::new();

        // two expansions of one source row
        let first = make_assoc(0, "D001241", SourceId::Omim("100300".to_string()));
        let second = make_assoc(0, "D001241", SourceId::Pubmed("12345678".to_string()));
        builder.process(&first, &mut sink).unwrap();
        builder.process(&second, &mut sink).unwrap();

        assert_eq!(count_predicate(&sink, vocab::OA, "hasTarget"), 1);
        assert_eq!(count_predicate(&sink, vocab::OA, "hasBody"), 2);

        // the target reflects the row's FIRST association; later expansions
        // of the row attach bodies to it without a second target
        let source_triple = sink
            .triples()
            .iter()
            .find(|t| t.predicate == Node::ns(vocab::OA, "hasSource"))
            .unwrap();
        assert_eq!(source_triple.object, Node::ns(vocab::OMIM, "100300"));

        // both bodies hang off the same item
        let has_body = Node::ns(vocab::OA, "hasBody");
        let body_subjects: Vec<_> = sink
            .triples()
            .iter()
            .filter(|t| t.predicate == has_body)
            .map(|t| t.subject.clone())
            .collect();
        assert_eq!(body_subjects[0], body_subjects[1]);
        assert_eq!(body_subjects[0], item_node(1));

        let stats = builder.finish();
        assert_eq!(stats.items_created, 1);
        assert_eq!(stats.bodies_created, 2);
    }

    #[test]
    fn test_distinct_rows_get_distinct_items() {
        let maps = make_maps();
        let mut builder = AnnotationBuilder::new(&maps, "2016-01-15");
        let mut sink = MemorySink::new();

        builder
            .process(
                &make_assoc(0, "D001241", SourceId::Omim("100300".to_string())),
                &mut sink,
            )
            .unwrap();
        builder
            .process(
                &make_assoc(1, "D001241", SourceId::Pubmed("12345678".to_string())),
                &mut sink,
            )
            .unwrap();

        let rdf_type = Node::ns(vocab::RDF, "type");
        let item_type = Node::ns(vocab::OA, "DataAnnotation");
        let items: Vec<_> = sink
            .triples()
            .iter()
            .filter(|t| t.predicate == rdf_type && t.object == item_type)
            .map(|t| t.subject.clone())
            .collect();
        assert_eq!(items, vec![item_node(1), item_node(2)]);

        let stats = builder.finish();
        assert_eq!(stats.items_created, 2);
        assert_eq!(stats.bodies_created, 2);
    }

    #[test]
    fn test_unmapped_chemical_skips_without_output() {
        let maps = make_maps();
        let mut builder = AnnotationBuilder::new(&maps, "2016-01-15");
        let mut sink = MemorySink::new();

        let assoc = make_assoc(0, "D999999", SourceId::Pubmed("12345678".to_string()));
        let outcome = builder.process(&assoc, &mut sink).unwrap();
        assert_eq!(outcome, Outcome::UnmappedChemical);
        assert!(sink.is_empty());

        // the skip must not move the item or body counters
        let mapped = make_assoc(1, "D001241", SourceId::Pubmed("12345678".to_string()));
        builder.process(&mapped, &mut sink).unwrap();
        let has_body = Node::ns(vocab::OA, "hasBody");
        let body_triple = sink
            .triples()
            .iter()
            .find(|t| t.predicate == has_body)
            .unwrap();
        assert_eq!(body_triple.subject, item_node(1));
        assert_eq!(body_triple.object, body_node(1));

        let stats = builder.finish();
        assert_eq!(stats.unmapped_chemicals, 1);
        assert_eq!(stats.items_created, 1);
        assert_eq!(stats.bodies_created, 1);
    }

    #[test]
    fn test_unmapped_disease_skips_without_output() {
        let maps = make_maps();
        let mut builder = AnnotationBuilder::new(&maps, "2016-01-15");
        let mut sink = MemorySink::new();

        let mut assoc = make_assoc(0, "D001241", SourceId::Omim("100300".to_string()));
        assoc.disease_id = "MESH:D999999".to_string();
        let outcome = builder.process(&assoc, &mut sink).unwrap();
        assert_eq!(outcome, Outcome::UnmappedDisease);
        assert!(sink.is_empty());

        let stats = builder.finish();
        assert_eq!(stats.unmapped_diseases, 1);
        assert_eq!(stats.items_created, 0);
        assert_eq!(stats.bodies_created, 0);
    }

    #[test]
    fn test_output_is_deterministic_across_runs() {
        let maps = make_maps();
        let assocs = [
            make_assoc(0, "D001241", SourceId::Omim("100300".to_string())),
            make_assoc(0, "D001241", SourceId::Pubmed("12345678".to_string())),
            make_assoc(1, "D001241", SourceId::Pubmed("22222222".to_string())),
        ];

        let run = || {
            let mut builder = AnnotationBuilder::new(&maps, "2016-01-15");
            let mut sink = MemorySink::new();
            for assoc in &assocs {
                builder.process(assoc, &mut sink).unwrap();
            }
            sink.triples().to_vec()
        };

        assert_eq!(run(), run());
    }
}
