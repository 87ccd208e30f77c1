//! # ctd-loader
//!
//! Loader for CTD chemical-disease dumps and terminology mapping tables.
//!
//! This crate covers everything between the files on disk and the
//! annotation graph builder:
//!
//! - the two pipe-delimited terminology mapping tables (MeSH to RxNorm/OMOP
//!   for chemicals, MeSH to OMOP for diseases), loaded into in-memory maps,
//! - the tab-delimited source dump, read into typed records past its
//!   release-specific boilerplate header,
//! - the normalizer that expands multi-identifier records into one
//!   association per OMIM or PubMed id.
//!
//! Malformed mapping rows and malformed source records are fatal; an
//! unmapped code is not an error here — resolution misses are handled by
//! the consumer, which skips the record and keeps going.

#![warn(missing_docs)]

mod mapping;
mod normalize;
mod source;
mod types;

// Re-export ctd-types for convenience
pub use ctd_types;

pub use mapping::{
    strip_vocab_prefix, ChemicalMap, ChemicalMapping, DiseaseMap, TerminologyMaps,
};
pub use normalize::expand;
pub use source::{read_source_records, source_records_from_reader};
pub use types::{CtdError, CtdResult, SourceConfig};
