//! Normalized chemical-disease association types.
//!
//! A raw CTD record can reference several OMIM records and several PubMed
//! articles at once. Normalization expands such a record into one
//! [`CtdAssociation`] per identifier, so every association references exactly
//! one external source.

use crate::CtdRecord;

/// The external record an association is evidenced by.
///
/// Exactly one of an OMIM record id or a PubMed id; a normalized association
/// can never carry both or neither.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SourceId {
    /// An OMIM record identifier, e.g. `100300`.
    Omim(String),
    /// A PubMed identifier, e.g. `12345678`.
    Pubmed(String),
}

impl SourceId {
    /// Returns the OMIM id if this source is an OMIM record.
    pub fn as_omim(&self) -> Option<&str> {
        match self {
            SourceId::Omim(id) => Some(id),
            SourceId::Pubmed(_) => None,
        }
    }

    /// Returns the PubMed id if this source is a PubMed article.
    pub fn as_pubmed(&self) -> Option<&str> {
        match self {
            SourceId::Pubmed(id) => Some(id),
            SourceId::Omim(_) => None,
        }
    }
}

/// One normalized chemical-disease association.
///
/// Produced by expanding a [`CtdRecord`]; carries the descriptive fields of
/// its source row plus exactly one [`SourceId`]. The `row` ordinal is the
/// position of the originating raw record before expansion and groups the
/// associations that came from one source row.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CtdAssociation {
    /// Ordinal of the originating raw record (0-based, pre-expansion).
    pub row: usize,
    /// Chemical display name.
    pub chemical_name: String,
    /// Chemical identifier in the MeSH vocabulary.
    pub chemical_id: String,
    /// CAS Registry Number, if available.
    pub cas_rn: String,
    /// Disease display name.
    pub disease_name: String,
    /// Disease identifier with vocabulary prefix.
    pub disease_id: String,
    /// Direct evidence codes.
    pub direct_evidence: String,
    /// Gene symbol supporting an inferred association.
    pub inference_gene_symbol: String,
    /// Inference score for an inferred association.
    pub inference_score: String,
    /// The single external record this association is evidenced by.
    pub source: SourceId,
}

impl CtdAssociation {
    /// Builds an association from a raw record and one of its identifiers.
    pub fn from_record(record: &CtdRecord, row: usize, source: SourceId) -> Self {
        Self {
            row,
            chemical_name: record.chemical_name.clone(),
            chemical_id: record.chemical_id.clone(),
            cas_rn: record.cas_rn.clone(),
            disease_name: record.disease_name.clone(),
            disease_id: record.disease_id.clone(),
            direct_evidence: record.direct_evidence.clone(),
            inference_gene_symbol: record.inference_gene_symbol.clone(),
            inference_score: record.inference_score.clone(),
            source,
        }
    }
}
