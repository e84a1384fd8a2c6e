// ITU-T E.212 Assignment Table Module
//
// Builds the MCC/MNC -> operator table from the published E.212 list.
//
// Data source: https://www.itu.int/pub/T-SP-E.212B (Annex to the ITU
// Operational Bulletin, distributed as a .docx file)
//
// The run is linear: unpack -> flatten -> extract -> sort -> write -> cleanup.

mod parser;
mod record;
mod writer;

pub use parser::{extract_records, Extraction, Extractor, Region, Slots};
pub use record::{split_code, Assignment};
pub use writer::{sort_records, write_records, write_table};

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::PipelineConfig;
use crate::docx;
use crate::error::{IoContext, Result};

/// Outcome of a successful table generation
#[derive(Debug, Serialize, Clone)]
pub struct RunSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Lines written, the test record included
    pub record_count: usize,
    pub main_records: usize,
    pub international_records: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Non-fatal problems hit while removing intermediate files
    pub cleanup_warnings: Vec<String>,
}

/// Generate the delimited table at `output` from the .docx at `input`
///
/// When `keep_intermediate` is set the extracted markup and the flattened
/// text are left in the working directory.
pub fn generate_table(
    input: &Path,
    output: &Path,
    config: &PipelineConfig,
    keep_intermediate: bool,
) -> Result<RunSummary> {
    let started_at = Utc::now();
    log::info!("Generating MCC/MNC table from {}", input.display());

    let markup = docx::extract_entry(input, &config.entry_name, &config.work_dir)?;
    let plaintext = config.intermediate_path();
    docx::flatten_file(&markup, &plaintext)?;

    let reader = BufReader::new(
        File::open(&plaintext).context(|| format!("Failed to open {}", plaintext.display()))?,
    );
    let extraction = extract_records(reader, config)?;

    let mut records = Vec::with_capacity(extraction.records.len() + 1);
    records.push(Assignment::from(&config.test_record));
    records.extend(extraction.records);

    let record_count = write_table(records, config.delimiter, output)?;

    let cleanup_warnings = if keep_intermediate {
        log::info!(
            "Keeping {} and {}",
            markup.display(),
            plaintext.display()
        );
        Vec::new()
    } else {
        cleanup_artifacts(&plaintext, &markup, &config.work_dir)
    };

    let summary = RunSummary {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        record_count,
        main_records: extraction.main_records,
        international_records: extraction.international_records,
        started_at,
        finished_at: Utc::now(),
        cleanup_warnings,
    };

    log::info!(
        "MCC/MNC table complete: {} records ({} main, {} international)",
        summary.record_count,
        summary.main_records,
        summary.international_records
    );
    Ok(summary)
}

/// Best-effort removal of the intermediate files
///
/// Removes the flattened text, the extracted markup, and the markup's parent
/// directory if it is left empty. `work_dir` itself is never removed.
/// Failures are logged and returned, never raised.
pub fn cleanup_artifacts(plaintext: &Path, markup: &Path, work_dir: &Path) -> Vec<String> {
    let mut warnings = Vec::new();

    let mut attempt = |what: &Path, result: std::io::Result<()>| {
        if let Err(e) = result {
            let msg = format!("Failed to remove {}: {}", what.display(), e);
            log::warn!("{}", msg);
            warnings.push(msg);
        }
    };

    attempt(plaintext, fs::remove_file(plaintext));
    attempt(markup, fs::remove_file(markup));
    if let Some(parent) = markup.parent().filter(|p| *p != work_dir) {
        attempt(parent, fs::remove_dir(parent));
    }

    warnings
}
