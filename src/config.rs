use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cli::output::OutputFormat;
use crate::error::{KarteError, Result};

/// Config filename looked up in the working directory.
pub const CONFIG_FILE: &str = "karte2json.toml";

/// Resolved configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path the settings were (or would be) loaded from.
    pub config_path: PathBuf,
    /// User settings loaded from the config file.
    pub settings: UserSettings,
}

/// User-configurable settings from `karte2json.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub output: OutputSettings,
    pub batch: BatchSettings,
}

/// Output-related settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Output format: "pretty" (default), "minified", or "jsonl".
    pub format: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: "pretty".into(),
        }
    }
}

/// Batch conversion settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchSettings {
    /// Extensions (without dot) treated as chart text.
    pub extensions: Vec<String>,
    /// Maximum file size in MB to convert (files larger are skipped).
    pub max_file_size_mb: u32,
    /// Path components (or runs of components) to exclude.
    pub exclude_patterns: Vec<String>,
    /// Extension of the JSON file written next to each chart.
    pub output_extension: String,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            extensions: vec!["txt".into()],
            max_file_size_mb: 10,
            exclude_patterns: vec![".git/".into(), "target/".into(), "node_modules/".into()],
            output_extension: "json".into(),
        }
    }
}

impl Config {
    /// Load config from an explicit path. Missing or invalid files fall back
    /// to defaults.
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        let config_path = config_path.into();
        let settings = Self::load_settings(&config_path).unwrap_or_default();
        Self {
            config_path,
            settings,
        }
    }

    /// Load `karte2json.toml` from the current working directory.
    pub fn from_cwd() -> Result<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| KarteError::Config(format!("cannot get cwd: {e}")))?;
        Ok(Self::new(cwd.join(CONFIG_FILE)))
    }

    fn load_settings(config_path: &Path) -> Option<UserSettings> {
        if !config_path.exists() {
            return None;
        }
        let content = std::fs::read_to_string(config_path).ok()?;
        match toml::from_str(&content) {
            Ok(settings) => Some(settings),
            Err(e) => {
                tracing::warn!(path = %config_path.display(), error = %e, "invalid config, using defaults");
                None
            }
        }
    }

    /// Save current settings to the config file.
    pub fn save_settings(&self) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = toml::to_string_pretty(&self.settings)
            .map_err(|e| KarteError::Config(format!("failed to serialize settings: {e}")))?;
        std::fs::write(&self.config_path, content)?;
        Ok(())
    }

    #[must_use]
    pub fn exists(&self) -> bool {
        self.config_path.exists()
    }

    /// Output format from settings.
    pub fn output_format(&self) -> Result<OutputFormat> {
        self.settings.output.format.parse()
    }

    /// Check if a path should be excluded from batch conversion.
    ///
    /// Patterns match whole path components, so `target/` excludes
    /// `target/a.txt` but not `targeted/a.txt`.
    #[must_use]
    pub fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy().replace('\\', "/");
        let segments: Vec<&str> = path_str.split('/').filter(|s| !s.is_empty()).collect();
        self.settings.batch.exclude_patterns.iter().any(|pattern| {
            let wanted: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
            !wanted.is_empty() && segments.windows(wanted.len()).any(|w| w == wanted.as_slice())
        })
    }

    /// Check whether an extension is treated as chart text.
    #[must_use]
    pub fn is_chart_extension(&self, ext: &str) -> bool {
        self.settings
            .batch
            .extensions
            .iter()
            .any(|e| e.eq_ignore_ascii_case(ext))
    }

    /// Check whether an extension is the one batch output is written with.
    #[must_use]
    pub fn is_output_extension(&self, ext: &str) -> bool {
        self.settings
            .batch
            .output_extension
            .eq_ignore_ascii_case(ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let cfg = Config::new(tmp.path().join(CONFIG_FILE));
        assert!(!cfg.exists());
        assert_eq!(cfg.settings.output.format, "pretty");
        assert_eq!(cfg.output_format().unwrap(), OutputFormat::Pretty);
    }

    #[test]
    fn default_settings() {
        let settings = UserSettings::default();
        assert_eq!(settings.output.format, "pretty");
        assert_eq!(settings.batch.extensions, vec!["txt".to_string()]);
        assert_eq!(settings.batch.max_file_size_mb, 10);
        assert_eq!(settings.batch.output_extension, "json");
        assert!(settings
            .batch
            .exclude_patterns
            .contains(&".git/".to_string()));
    }

    #[test]
    fn save_and_load_settings() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        let mut cfg = Config::new(&path);
        cfg.settings.output.format = "minified".into();
        cfg.settings.batch.extensions = vec!["txt".into(), "karte".into()];
        cfg.save_settings().unwrap();
        assert!(cfg.exists());

        let cfg2 = Config::new(&path);
        assert_eq!(cfg2.settings.output.format, "minified");
        assert!(cfg2.is_chart_extension("karte"));
        assert!(cfg2.is_chart_extension("TXT"));
        assert!(!cfg2.is_chart_extension("md"));
    }

    #[test]
    fn partial_file_fills_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        std::fs::write(&path, "[output]\nformat = \"jsonl\"\n").unwrap();
        let cfg = Config::new(&path);
        assert_eq!(cfg.output_format().unwrap(), OutputFormat::Jsonl);
        assert_eq!(cfg.settings.batch.max_file_size_mb, 10);
    }

    #[test]
    fn invalid_file_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        std::fs::write(&path, "invalid toml {{{{").unwrap();
        let cfg = Config::new(&path);
        assert_eq!(cfg.settings.output.format, "pretty");
    }

    #[test]
    fn unknown_format_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let mut cfg = Config::new(tmp.path().join(CONFIG_FILE));
        cfg.settings.output.format = "yaml".into();
        assert!(matches!(
            cfg.output_format(),
            Err(KarteError::UnknownFormat { .. })
        ));
    }

    #[test]
    fn should_exclude_patterns() {
        let cfg = Config::new("/nonexistent/karte2json.toml");
        assert!(cfg.should_exclude(Path::new("/charts/.git/notes.txt")));
        assert!(cfg.should_exclude(Path::new("/charts/target/out.txt")));
        assert!(!cfg.should_exclude(Path::new("/charts/2024/05/patient.txt")));
    }

    #[test]
    fn should_exclude_matches_whole_components() {
        let mut cfg = Config::new("/nonexistent/karte2json.toml");
        assert!(!cfg.should_exclude(Path::new("targeted_therapy/visit.txt")));
        assert!(!cfg.should_exclude(Path::new(".github/notes.txt")));
        assert!(!cfg.should_exclude(Path::new("ward/my_target/visit.txt")));
        assert!(cfg.should_exclude(Path::new("ward/target/visit.txt")));

        cfg.settings.batch.exclude_patterns = vec!["archive/2019/".into()];
        assert!(cfg.should_exclude(Path::new("ward/archive/2019/visit.txt")));
        assert!(!cfg.should_exclude(Path::new("ward/archive/2020/visit.txt")));
        assert!(!cfg.should_exclude(Path::new("archive/2019a/visit.txt")));
    }

    #[test]
    fn output_extension_check() {
        let cfg = Config::new("/nonexistent/karte2json.toml");
        assert!(cfg.is_output_extension("json"));
        assert!(cfg.is_output_extension("JSON"));
        assert!(!cfg.is_output_extension("txt"));
    }
}
