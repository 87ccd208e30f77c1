//! Statement emission sinks.
//!
//! The graph builder hands statements over in ordered batches; a sink
//! decides where they go. Production output uses [`NtWriter`] over a
//! buffered file, tests and inspection use [`MemorySink`].

use std::io::Write;

use ctd_loader::CtdResult;

use crate::triple::Triple;

/// Accepts ordered batches of statements.
pub trait TripleSink {
    /// Emits one batch of statements, preserving order.
    fn emit(&mut self, triples: &[Triple]) -> CtdResult<()>;
}

/// Writes statements as N-Triples lines to an underlying writer.
pub struct NtWriter<W: Write> {
    writer: W,
}

impl<W: Write> NtWriter<W> {
    /// Creates a writer sink.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Flushes the underlying writer.
    pub fn flush(&mut self) -> CtdResult<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Consumes the sink and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> TripleSink for NtWriter<W> {
    fn emit(&mut self, triples: &[Triple]) -> CtdResult<()> {
        for triple in triples {
            writeln!(self.writer, "{triple}")?;
        }
        Ok(())
    }
}

/// Collects statements in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    triples: Vec<Triple>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the collected statements in emission order.
    pub fn triples(&self) -> &[Triple] {
        &self.triples
    }

    /// Returns the number of collected statements.
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Returns true if nothing has been emitted.
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }
}

impl TripleSink for MemorySink {
    fn emit(&mut self, triples: &[Triple]) -> CtdResult<()> {
        self.triples.extend_from_slice(triples);
        Ok(())
    }
}
