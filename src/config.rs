// Pipeline configuration
//
// All constants tied to the E.212 document layout live here. A JSON file can
// override any subset of them; missing keys fall back to the defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{IoContext, MccMncError, Result};
use crate::itu::Assignment;

/// Entry holding the document body inside a .docx container
pub const DOCUMENT_ENTRY: &str = "word/document.xml";

/// Heading that opens both the main listing and the international listing
pub const HEADER_MARKER: &str = "MCC + MNC codes *";

/// Prefix of the horizontal rule closing each listing
pub const RULE_PREFIX: &str = "____________";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Zip entry to extract
    pub entry_name: String,
    /// Directory receiving the extracted entry and the plaintext file
    pub work_dir: PathBuf,
    /// Name of the flattened text file inside `work_dir`
    pub intermediate_name: String,
    pub header_marker: String,
    pub rule_prefix: String,
    pub delimiter: char,
    /// Country written for rows of the international listing
    pub international_label: String,
    /// Synthetic row prepended to every table
    pub test_record: TestRecord,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TestRecord {
    pub mcc: String,
    pub mnc: String,
    pub country: String,
    pub operator: String,
}

impl Default for TestRecord {
    fn default() -> Self {
        Self {
            mcc: "001".to_string(),
            mnc: "01".to_string(),
            country: "Test".to_string(),
            operator: "Test Network".to_string(),
        }
    }
}

impl From<&TestRecord> for Assignment {
    fn from(r: &TestRecord) -> Self {
        Assignment::new(&r.mcc, &r.mnc, &r.country, &r.operator)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            entry_name: DOCUMENT_ENTRY.to_string(),
            work_dir: PathBuf::from("."),
            intermediate_name: "plaintext.txt".to_string(),
            header_marker: HEADER_MARKER.to_string(),
            rule_prefix: RULE_PREFIX.to_string(),
            delimiter: ';',
            international_label: "International".to_string(),
            test_record: TestRecord::default(),
        }
    }
}

impl PipelineConfig {
    /// Load a JSON config file, keeping defaults for absent keys
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .context(|| format!("Failed to read config {}", path.display()))?;
        let config = serde_json::from_str(&raw).map_err(|source| MccMncError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Path the document entry is extracted to
    pub fn extracted_path(&self) -> PathBuf {
        self.work_dir.join(&self.entry_name)
    }

    /// Path of the flattened plaintext file
    pub fn intermediate_path(&self) -> PathBuf {
        self.work_dir.join(&self.intermediate_name)
    }
}
