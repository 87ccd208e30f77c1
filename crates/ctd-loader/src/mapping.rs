//! Terminology mapping tables.
//!
//! Two pipe-delimited tables translate the MeSH codes of the source dump
//! into standard vocabulary concepts: one for chemicals (MeSH to RxNorm and
//! OMOP) and one for diseases (MeSH to OMOP). Both are loaded fully into
//! memory before any record is processed; a malformed mapping row aborts the
//! load, because an incomplete vocabulary would silently drop associations
//! for every record that hits the gap.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;

use crate::types::{CtdError, CtdResult};

/// Columns required in a chemical mapping row. Extra columns are ignored.
const CHEMICAL_COLUMNS: usize = 6;

/// Columns required in a disease mapping row.
const DISEASE_COLUMNS: usize = 3;

/// The standard-vocabulary translation of one MeSH chemical code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChemicalMapping {
    /// RxNorm concept code (RXCUI).
    pub rxnorm_code: String,
    /// Preferred-term synonyms, in file order.
    pub synonyms: Vec<String>,
    /// OMOP standard concept id (OHDSI vocabulary).
    pub omop_code: String,
}

/// Lookup table from MeSH chemical ids to standard vocabulary codes.
///
/// Built from the `mesh-to-rxnorm` mapping table. A repeated MeSH key
/// appends the new preferred term to the existing entry's synonym list; the
/// code columns of later rows are not re-validated against the first.
#[derive(Debug, Default)]
pub struct ChemicalMap {
    entries: HashMap<String, ChemicalMapping>,
}

impl ChemicalMap {
    /// Loads the chemical mapping table from a file.
    ///
    /// # Errors
    /// Returns [`CtdError::FileNotFound`] if the path does not exist and
    /// [`CtdError::MappingLoad`] on a row with fewer than six columns.
    pub fn from_path<P: AsRef<Path>>(path: P) -> CtdResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CtdError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let bytes = fs::read(path)?;
        Self::parse(&String::from_utf8_lossy(&bytes))
    }

    /// Loads the chemical mapping table from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> CtdResult<Self> {
        let mut buf = String::new();
        reader.read_to_string(&mut buf)?;
        Self::parse(&buf)
    }

    fn parse(text: &str) -> CtdResult<Self> {
        let mut entries: HashMap<String, ChemicalMapping> = HashMap::new();

        for (line, record) in mapping_records(text)? {
            if record.len() < CHEMICAL_COLUMNS {
                return Err(CtdError::MappingLoad {
                    line,
                    expected: CHEMICAL_COLUMNS,
                    found: record.len(),
                });
            }
            let mesh = record[0].clone();
            let preferred_term = record[1].clone();
            match entries.entry(mesh) {
                // repeated key: the new row contributes a synonym only
                Entry::Occupied(mut entry) => entry.get_mut().synonyms.push(preferred_term),
                Entry::Vacant(entry) => {
                    entry.insert(ChemicalMapping {
                        rxnorm_code: record[2].clone(),
                        synonyms: vec![preferred_term],
                        omop_code: record[4].clone(),
                    });
                }
            }
        }

        Ok(Self { entries })
    }

    /// Resolves a MeSH chemical id to its standard vocabulary codes.
    pub fn resolve(&self, mesh_id: &str) -> Option<&ChemicalMapping> {
        self.entries.get(mesh_id)
    }

    /// Returns the number of distinct MeSH keys in the map.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Lookup table from prefix-stripped MeSH disease ids to OMOP concept ids.
///
/// Built from the `mesh-to-standard-vocab` mapping table. A repeated MeSH
/// key overwrites the earlier entry silently (last wins).
#[derive(Debug, Default)]
pub struct DiseaseMap {
    entries: HashMap<String, String>,
}

impl DiseaseMap {
    /// Loads the disease mapping table from a file.
    ///
    /// # Errors
    /// Returns [`CtdError::FileNotFound`] if the path does not exist and
    /// [`CtdError::MappingLoad`] on a row without exactly three columns.
    pub fn from_path<P: AsRef<Path>>(path: P) -> CtdResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CtdError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let bytes = fs::read(path)?;
        Self::parse(&String::from_utf8_lossy(&bytes))
    }

    /// Loads the disease mapping table from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> CtdResult<Self> {
        let mut buf = String::new();
        reader.read_to_string(&mut buf)?;
        Self::parse(&buf)
    }

    fn parse(text: &str) -> CtdResult<Self> {
        let mut entries = HashMap::new();

        for (line, record) in mapping_records(text)? {
            if record.len() != DISEASE_COLUMNS {
                return Err(CtdError::MappingLoad {
                    line,
                    expected: DISEASE_COLUMNS,
                    found: record.len(),
                });
            }
            // last occurrence of a key wins
            entries.insert(record[2].clone(), record[0].clone());
        }

        Ok(Self { entries })
    }

    /// Resolves a MeSH disease id (vocabulary prefix already stripped) to an
    /// OMOP concept id.
    pub fn resolve(&self, mesh_id: &str) -> Option<&str> {
        self.entries.get(mesh_id).map(String::as_str)
    }

    /// Returns the number of distinct MeSH keys in the map.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Both terminology maps, loaded together ahead of record processing.
#[derive(Debug)]
pub struct TerminologyMaps {
    /// MeSH chemical id to RxNorm/OMOP codes.
    pub chemicals: ChemicalMap,
    /// Prefix-stripped MeSH disease id to OMOP concept id.
    pub diseases: DiseaseMap,
}

impl TerminologyMaps {
    /// Loads both mapping tables sequentially.
    pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(
        chemical_path: P,
        disease_path: Q,
    ) -> CtdResult<Self> {
        Ok(Self {
            chemicals: ChemicalMap::from_path(chemical_path)?,
            diseases: DiseaseMap::from_path(disease_path)?,
        })
    }

    /// Loads both mapping tables concurrently.
    ///
    /// The two files are independent, so each is read and parsed on its own
    /// rayon worker.
    #[cfg(feature = "parallel")]
    pub fn load_parallel<P, Q>(chemical_path: P, disease_path: Q) -> CtdResult<Self>
    where
        P: AsRef<Path> + Send,
        Q: AsRef<Path> + Send,
    {
        let (chemicals, diseases) = rayon::join(
            move || ChemicalMap::from_path(chemical_path),
            move || DiseaseMap::from_path(disease_path),
        );
        Ok(Self {
            chemicals: chemicals?,
            diseases: diseases?,
        })
    }
}

/// Strips a leading `VOCAB:` prefix from an identifier.
///
/// The disease ids of the source dump carry their vocabulary as a prefix
/// (`MESH:D003920`), while the disease mapping table is keyed by the bare
/// code. Ids without a prefix pass through unchanged.
pub fn strip_vocab_prefix(id: &str) -> &str {
    match id.split_once(':') {
        Some((_, rest)) => rest,
        None => id,
    }
}

/// Parses a pipe-delimited mapping table into `(line, fields)` rows.
///
/// The first line is a header and is skipped; parsing stops at the first
/// blank line. Fields are trimmed. Line numbers are 1-based file positions.
fn mapping_records(text: &str) -> CtdResult<Vec<(usize, Vec<String>)>> {
    let body = truncate_at_blank_line(text);
    let mut reader = ReaderBuilder::new()
        .delimiter(b'|')
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let fields = record.iter().map(str::to_string).collect();
        // +2: 1-based, plus the skipped header line
        rows.push((index + 2, fields));
    }
    Ok(rows)
}

/// Returns the prefix of `text` up to (not including) its first blank line.
pub(crate) fn truncate_at_blank_line(text: &str) -> &str {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if line.trim().is_empty() {
            return &text[..offset];
        }
        offset += line.len();
    }
    text
}
