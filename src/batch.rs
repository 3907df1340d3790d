use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use crate::chart::parse_medical_text;
use crate::cli::output::{format_records, OutputFormat};
use crate::config::Config;
use crate::error::Result;
use crate::ingest::scanner::{ScannedFile, Scanner, SkipReason};

/// Statistics from a batch conversion run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchResult {
    pub files_scanned: usize,
    pub files_converted: usize,
    /// Total files skipped (sum of all skip categories).
    pub files_skipped: usize,
    /// Composite records written across all files.
    pub records_written: usize,
    pub skipped_too_large: usize,
    pub skipped_non_utf8: usize,
    pub skipped_io_error: usize,
    pub skipped_no_records: usize,
    pub converted: Vec<ConvertedFile>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedFile>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConvertedFile {
    pub path: String,
    pub output: String,
    pub records: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkippedFile {
    pub path: String,
    pub reason: SkipReason,
}

impl BatchResult {
    fn skip(&mut self, path: &str, reason: SkipReason) {
        self.files_skipped += 1;
        match reason {
            SkipReason::TooLarge => self.skipped_too_large += 1,
            SkipReason::NonUtf8 => self.skipped_non_utf8 += 1,
            SkipReason::IoError => self.skipped_io_error += 1,
            SkipReason::NoRecords => self.skipped_no_records += 1,
        }
        self.skipped.push(SkippedFile {
            path: path.to_string(),
            reason,
        });
    }
}

enum FileOutcome {
    Converted { output: PathBuf, records: usize },
    Skipped(SkipReason),
}

/// Convert every chart file under `root`, writing `<stem>.<output_extension>`
/// next to each source. With `dry_run` nothing is written.
pub fn run_batch(root: &Path, config: &Config, dry_run: bool) -> Result<BatchResult> {
    let format = config.output_format()?;
    let extension = config.settings.batch.output_extension.as_str();
    let scanned = Scanner::new(root, config).scan();
    info!(root = %root.display(), files = scanned.len(), "batch scan complete");

    let outcomes: Vec<(&ScannedFile, FileOutcome)> = scanned
        .par_iter()
        .map(|file| (file, convert_file(file, format, extension, dry_run)))
        .collect();

    let mut result = BatchResult {
        files_scanned: scanned.len(),
        ..Default::default()
    };

    for (file, outcome) in outcomes {
        match outcome {
            FileOutcome::Converted { output, records } => {
                result.files_converted += 1;
                result.records_written += records;
                result.converted.push(ConvertedFile {
                    path: file.relative_path.clone(),
                    output: output.to_string_lossy().replace('\\', "/"),
                    records,
                });
            }
            FileOutcome::Skipped(reason) => {
                warn!(path = %file.relative_path, reason = reason.as_str(), "chart skipped");
                result.skip(&file.relative_path, reason);
            }
        }
    }

    info!(
        converted = result.files_converted,
        skipped = result.files_skipped,
        records = result.records_written,
        "batch conversion finished"
    );
    Ok(result)
}

fn convert_file(
    file: &ScannedFile,
    format: OutputFormat,
    extension: &str,
    dry_run: bool,
) -> FileOutcome {
    if let Some(reason) = file.skip {
        return FileOutcome::Skipped(reason);
    }

    let Ok(bytes) = std::fs::read(&file.path) else {
        return FileOutcome::Skipped(SkipReason::IoError);
    };
    let Ok(text) = String::from_utf8(bytes) else {
        return FileOutcome::Skipped(SkipReason::NonUtf8);
    };

    let records = parse_medical_text(&text);
    if records.is_empty() {
        return FileOutcome::Skipped(SkipReason::NoRecords);
    }

    let output = file.path.with_extension(extension);
    if !dry_run {
        let written = format_records(&records, format)
            .and_then(|json| std::fs::write(&output, json + "\n").map_err(Into::into));
        if let Err(e) = written {
            warn!(path = %output.display(), error = %e, "failed to write output");
            return FileOutcome::Skipped(SkipReason::IoError);
        }
    }

    FileOutcome::Converted {
        output,
        records: records.len(),
    }
}
