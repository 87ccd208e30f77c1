//! CTD chemical-disease to Open Annotation RDF converter binary.

use std::fs::File;
use std::io::BufWriter;

use ctd_loader::{expand, read_source_records, SourceConfig, TerminologyMaps};
use ctd_rdf::{write_preamble, AnnotationBuilder, NtWriter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_DATA_FILE: &str = "CTD_chemicals_diseases.tsv";
const DEFAULT_CHEMICAL_MAP: &str =
    "../terminology-mappings/RxNorm-to-MeSH/mesh-to-rxnorm-standard-vocab-v5.csv";
const DEFAULT_DISEASE_MAP: &str =
    "../terminology-mappings/StandardVocabToMeSH/mesh-to-standard-vocab-v5.txt";
const DEFAULT_OUTPUT_FILE: &str = "chemical-disease-ctd.nt";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Paths and the header offset come from env or compiled-in defaults
    let data_file = env_or("CTD_DATA_FILE", DEFAULT_DATA_FILE);
    let chemical_map = env_or("CTD_CHEMICAL_MAP", DEFAULT_CHEMICAL_MAP);
    let disease_map = env_or("CTD_DISEASE_MAP", DEFAULT_DISEASE_MAP);
    let output_file = env_or("CTD_OUTPUT_FILE", DEFAULT_OUTPUT_FILE);
    let header_lines = std::env::var("CTD_HEADER_LINES")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or_else(|| SourceConfig::default().header_lines);

    tracing::info!("Loading terminology maps...");
    let maps = TerminologyMaps::load(&chemical_map, &disease_map)?;
    tracing::info!(
        "Loaded {} chemical and {} disease mappings",
        maps.chemicals.len(),
        maps.diseases.len()
    );

    tracing::info!("Reading source records from: {}", data_file);
    let records = read_source_records(&data_file, &SourceConfig { header_lines })?;
    tracing::info!("Read {} source records", records.len());

    let out = File::create(&output_file)?;
    let mut sink = NtWriter::new(BufWriter::new(out));

    let today = chrono::Local::now().date_naive().to_string();
    write_preamble(&mut sink, &today)?;

    let mut builder = AnnotationBuilder::new(&maps, today);
    for assoc in expand(&records) {
        builder.process(&assoc?, &mut sink)?;
    }
    sink.flush()?;

    let stats = builder.finish();
    tracing::info!(
        "Wrote {}: {} items, {} bodies from {} associations \
         (skipped {} unmapped chemicals, {} unmapped diseases)",
        output_file,
        stats.items_created,
        stats.bodies_created,
        stats.associations,
        stats.unmapped_chemicals,
        stats.unmapped_diseases
    );

    Ok(())
}

fn env_or(var: &str, default: &str) -> String {
    std::env::var(var).unwrap_or_else(|_| default.to_string())
}
