//! # ctd-rdf
//!
//! Open Annotation RDF emission for CTD chemical-disease associations.
//!
//! This crate turns the normalized associations produced by `ctd-loader`
//! into an annotation graph: one annotation item per source row, one target
//! referencing the row's OMIM record or PubMed article, and one body per
//! association carrying the standardized chemical and disease codes. The
//! statements stream through a [`TripleSink`] as N-Triples lines, preceded
//! by a fixed vocabulary preamble.
//!
//! The `ctd2rdf` binary wires the loader and the builder together into the
//! full conversion run.

#![warn(missing_docs)]

mod builder;
mod preamble;
mod sink;
mod triple;

pub use builder::{AnnotationBuilder, BuildStats, Outcome};
pub use preamble::{annotation_set_triples, vocabulary_triples, write_preamble};
pub use sink::{MemorySink, NtWriter, TripleSink};
pub use triple::{Node, Triple};
