// Container Unpacking
//
// Pulls the document body (word/document.xml) out of the .docx zip
// container and writes it under the working directory, keeping the
// entry's relative path.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use zip::ZipArchive;

use crate::error::{IoContext, MccMncError, Result};

/// Extract a single named entry from the zip container at `archive_path`
///
/// Returns the path of the extracted file (`work_dir/entry_name`).
pub fn extract_entry(archive_path: &Path, entry_name: &str, work_dir: &Path) -> Result<PathBuf> {
    log::info!("Opening container {}", archive_path.display());

    let file = File::open(archive_path).map_err(|e| MccMncError::InputFormat {
        path: archive_path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let mut archive = ZipArchive::new(file).map_err(|e| MccMncError::InputFormat {
        path: archive_path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut entry = match archive.by_name(entry_name) {
        Ok(entry) => entry,
        Err(zip::result::ZipError::FileNotFound) => {
            return Err(MccMncError::MissingEntry {
                entry: entry_name.to_string(),
            })
        }
        Err(e) => {
            return Err(MccMncError::InputFormat {
                path: archive_path.to_path_buf(),
                reason: e.to_string(),
            })
        }
    };

    // Refuse entry names that would escape the working directory
    let relative = entry
        .enclosed_name()
        .ok_or_else(|| MccMncError::InputFormat {
            path: archive_path.to_path_buf(),
            reason: format!("unsafe entry path '{}'", entry_name),
        })?;
    let out_path = work_dir.join(relative);

    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent)
            .context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    log::info!(
        "Extracting {} ({} bytes compressed)",
        entry_name,
        entry.compressed_size()
    );

    let mut out = File::create(&out_path)
        .context(|| format!("Failed to create {}", out_path.display()))?;
    let written = io::copy(&mut entry, &mut out)
        .context(|| format!("Failed to write {}", out_path.display()))?;

    log::info!("Extracted {}: {} bytes", out_path.display(), written);

    Ok(out_path)
}
