//! # ctd-types
//!
//! Type definitions for CTD chemical-disease association data.
//!
//! This crate provides the record types shared by the CTD loading and RDF
//! emission crates: the raw tab-delimited source record, the normalized
//! single-identifier association, and the vocabulary namespace constants
//! used by the annotation output.
//!
//! ## Features
//!
//! - `serde` (default): Enables serialization/deserialization support via
//!   serde. Disable this feature for zero-dependency usage.
//!
//! ## Usage
//!
//! ```rust
//! use ctd_types::{CtdAssociation, CtdRecord, SourceId};
//!
//! let record = CtdRecord {
//!     chemical_name: "Aspirin".to_string(),
//!     chemical_id: "D001241".to_string(),
//!     cas_rn: "50-78-2".to_string(),
//!     disease_name: "Diabetes Mellitus".to_string(),
//!     disease_id: "MESH:D003920".to_string(),
//!     direct_evidence: "marker/mechanism".to_string(),
//!     inference_gene_symbol: String::new(),
//!     inference_score: String::new(),
//!     omim_ids: String::new(),
//!     pubmed_ids: "12345678".to_string(),
//! };
//!
//! let assoc = CtdAssociation::from_record(
//!     &record,
//!     0,
//!     SourceId::Pubmed("12345678".to_string()),
//! );
//! assert_eq!(assoc.source.as_pubmed(), Some("12345678"));
//! ```

#![warn(missing_docs)]

mod association;
mod record;
pub mod vocab;

// Re-export all public types at crate root
pub use association::{CtdAssociation, SourceId};
pub use record::CtdRecord;
