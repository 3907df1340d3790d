use std::path::PathBuf;

use ignore::WalkBuilder;
use rayon::prelude::*;
use serde::Serialize;

use crate::config::Config;

/// Reason why a file was skipped during batch conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// File exceeds the configured `max_file_size_mb` limit.
    TooLarge,
    /// File content is not valid UTF-8.
    NonUtf8,
    /// IO error while reading or writing.
    IoError,
    /// No encounter could be recognized in the text.
    NoRecords,
}

impl SkipReason {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::TooLarge => "too_large",
            SkipReason::NonUtf8 => "non_utf8",
            SkipReason::IoError => "io_error",
            SkipReason::NoRecords => "no_records",
        }
    }
}

/// A discovered chart text file.
#[derive(Debug, Clone)]
pub struct ScannedFile {
    pub path: PathBuf,
    /// Path relative to the scan root (forward slashes).
    pub relative_path: String,
    pub size: u64,
    /// Set when the file must not be converted.
    pub skip: Option<SkipReason>,
}

/// Chart file discovery that respects .gitignore.
pub struct Scanner<'a> {
    root: PathBuf,
    config: &'a Config,
}

impl<'a> Scanner<'a> {
    pub fn new(root: impl Into<PathBuf>, config: &'a Config) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// Find chart files under the root, sorted by relative path.
    ///
    /// Oversized files are returned with `skip` set so they can be reported.
    #[must_use]
    pub fn scan(&self) -> Vec<ScannedFile> {
        let config = self.config;
        let root = &self.root;
        let entries: Vec<PathBuf> = WalkBuilder::new(&self.root)
            .hidden(true)
            .git_ignore(true)
            .git_global(false)
            .git_exclude(true)
            .follow_links(false)
            .build()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_some_and(|ft| ft.is_file()))
            .filter(|e| {
                e.path()
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| {
                        config.is_chart_extension(ext) && !config.is_output_extension(ext)
                    })
            })
            .filter(|e| {
                let relative = e.path().strip_prefix(root).unwrap_or(e.path());
                !config.should_exclude(relative)
            })
            .map(ignore::DirEntry::into_path)
            .collect();

        let max_bytes = u64::from(config.settings.batch.max_file_size_mb) * 1024 * 1024;
        let mut files: Vec<ScannedFile> = entries
            .par_iter()
            .filter_map(|path| {
                let size = path.metadata().ok()?.len();
                let relative = path
                    .strip_prefix(root)
                    .unwrap_or(path)
                    .to_string_lossy()
                    .replace('\\', "/");
                let skip = (max_bytes > 0 && size > max_bytes).then_some(SkipReason::TooLarge);
                Some(ScannedFile {
                    path: path.clone(),
                    relative_path: relative,
                    size,
                    skip,
                })
            })
            .collect();

        files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        files
    }
}
