//! Record normalization.
//!
//! A raw CTD record may reference several OMIM records and several PubMed
//! articles at once. Downstream, every annotation target must reference
//! exactly one external record, so each raw record is expanded into one
//! [`CtdAssociation`] per identifier: `m` OMIM ids and `n` PubMed ids yield
//! `m + n` associations, never crossing the two lists.

use ctd_types::{CtdAssociation, CtdRecord, SourceId};

use crate::types::{CtdError, CtdResult};

/// Expands raw records into single-identifier associations.
///
/// The returned iterator is lazy across records and a pure function of its
/// input: iterating it twice yields identical results. Each association
/// carries the ordinal of its originating record, which the graph builder
/// uses to attach all of a row's associations to one annotation item.
///
/// A record with neither an OMIM nor a PubMed id yields a fatal
/// [`CtdError::NoIdentifier`]; a source record must reference at least one
/// external record.
pub fn expand(records: &[CtdRecord]) -> impl Iterator<Item = CtdResult<CtdAssociation>> + '_ {
    records
        .iter()
        .enumerate()
        .flat_map(|(row, record)| expand_record(record, row))
}

fn expand_record(record: &CtdRecord, row: usize) -> Vec<CtdResult<CtdAssociation>> {
    let sources: Vec<SourceId> = record
        .omim_ids()
        .map(|id| SourceId::Omim(id.to_string()))
        .chain(record.pubmed_ids().map(|id| SourceId::Pubmed(id.to_string())))
        .collect();

    if sources.is_empty() {
        return vec![Err(CtdError::NoIdentifier { row })];
    }

    sources
        .into_iter()
        .map(|source| Ok(CtdAssociation::from_record(record, row, source)))
        .collect()
}
