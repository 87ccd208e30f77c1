//! CTD chemical-disease association record type.
//!
//! This module provides the `CtdRecord` struct representing one row of the
//! `CTD_chemicals_diseases.tsv` dump before identifier expansion.

/// A raw chemical-disease association from the CTD dump.
///
/// Represents one tab-delimited row of `CTD_chemicals_diseases.tsv`. The
/// `omim_ids` and `pubmed_ids` fields hold `|`-delimited identifier lists as
/// they appear in the source file; use [`CtdRecord::omim_ids`] and
/// [`CtdRecord::pubmed_ids`] to iterate the non-empty elements.
///
/// # Examples
///
/// ```
/// use ctd_types::CtdRecord;
///
/// let record = CtdRecord {
///     chemical_name: "Aspirin".to_string(),
///     chemical_id: "D001241".to_string(),
///     cas_rn: "50-78-2".to_string(),
///     disease_name: "Diabetes Mellitus".to_string(),
///     disease_id: "MESH:D003920".to_string(),
///     direct_evidence: "marker/mechanism".to_string(),
///     inference_gene_symbol: String::new(),
///     inference_score: String::new(),
///     omim_ids: "100300|100301".to_string(),
///     pubmed_ids: String::new(),
/// };
///
/// assert_eq!(record.omim_ids().count(), 2);
/// assert_eq!(record.pubmed_ids().count(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CtdRecord {
    /// Chemical display name.
    pub chemical_name: String,
    /// Chemical identifier in the MeSH vocabulary (no prefix).
    pub chemical_id: String,
    /// CAS Registry Number, if available.
    pub cas_rn: String,
    /// Disease display name.
    pub disease_name: String,
    /// Disease identifier with vocabulary prefix (`MESH:` or `OMIM:`).
    pub disease_id: String,
    /// Direct evidence codes (`|`-delimited in the source).
    pub direct_evidence: String,
    /// Gene symbol supporting an inferred association.
    pub inference_gene_symbol: String,
    /// Inference score for an inferred association.
    pub inference_score: String,
    /// `|`-delimited OMIM record identifiers, each element optional.
    pub omim_ids: String,
    /// `|`-delimited PubMed identifiers, each element optional.
    pub pubmed_ids: String,
}

impl CtdRecord {
    /// Number of tab-delimited fields in a complete source row.
    pub const FIELD_COUNT: usize = 10;

    /// Iterates the non-empty OMIM identifiers of this record.
    pub fn omim_ids(&self) -> impl Iterator<Item = &str> {
        split_id_list(&self.omim_ids)
    }

    /// Iterates the non-empty PubMed identifiers of this record.
    pub fn pubmed_ids(&self) -> impl Iterator<Item = &str> {
        split_id_list(&self.pubmed_ids)
    }
}

/// Splits a `|`-delimited identifier list, dropping empty elements.
fn split_id_list(list: &str) -> impl Iterator<Item = &str> {
    list.split('|').map(str::trim).filter(|id| !id.is_empty())
}
