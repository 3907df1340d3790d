use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{KarteError, Result};

/// How record arrays are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Indented JSON array (two spaces).
    Pretty,
    /// Single-line JSON array.
    Minified,
    /// One JSON object per line.
    Jsonl,
}

impl OutputFormat {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pretty => "pretty",
            Self::Minified => "minified",
            Self::Jsonl => "jsonl",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = KarteError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "minified" => Ok(Self::Minified),
            "jsonl" => Ok(Self::Jsonl),
            _ => Err(KarteError::UnknownFormat { name: s.into() }),
        }
    }
}

/// Render a record sequence. Non-ASCII text is written as-is.
pub fn format_records<T: Serialize>(records: &[T], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(serde_json::to_string_pretty(records)?),
        OutputFormat::Minified => Ok(serde_json::to_string(records)?),
        OutputFormat::Jsonl => {
            let lines = records
                .iter()
                .map(serde_json::to_string)
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(lines.join("\n"))
        }
    }
}

/// Format a result as minified JSON.
pub fn format_json<T: Serialize>(result: &T) -> String {
    serde_json::to_string(result).unwrap_or_else(|e| format!("{{\"error\":\"{e}\"}}"))
}

/// Format an error as JSON.
pub fn format_error(err: &dyn std::fmt::Display) -> String {
    serde_json::json!({ "error": err.to_string() }).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct TestData {
        name: String,
        value: i32,
    }

    fn data() -> Vec<TestData> {
        vec![
            TestData {
                name: "頭痛".into(),
                value: 1,
            },
            TestData {
                name: "発熱".into(),
                value: 2,
            },
        ]
    }

    #[test]
    fn pretty_is_indented_and_keeps_japanese() {
        let out = format_records(&data(), OutputFormat::Pretty).unwrap();
        assert!(out.starts_with("[\n  {\n    \"name\": \"頭痛\""));
        assert!(!out.contains("\\u"));
    }

    #[test]
    fn minified_is_single_line() {
        let out = format_records(&data(), OutputFormat::Minified).unwrap();
        assert!(!out.contains('\n'));
        assert!(out.starts_with("[{\"name\":\"頭痛\""));
    }

    #[test]
    fn jsonl_is_one_object_per_line() {
        let out = format_records(&data(), OutputFormat::Jsonl).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], r#"{"name":"発熱","value":2}"#);
    }

    #[test]
    fn empty_records() {
        let empty: Vec<TestData> = Vec::new();
        assert_eq!(format_records(&empty, OutputFormat::Pretty).unwrap(), "[]");
        assert_eq!(format_records(&empty, OutputFormat::Jsonl).unwrap(), "");
    }

    #[test]
    fn parse_format() {
        assert_eq!("pretty".parse::<OutputFormat>().unwrap(), OutputFormat::Pretty);
        assert_eq!("Minified".parse::<OutputFormat>().unwrap(), OutputFormat::Minified);
        assert_eq!(" jsonl ".parse::<OutputFormat>().unwrap(), OutputFormat::Jsonl);
        assert!("csv".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn format_error_produces_json() {
        let json = format_error(&"nothing \"here\"");
        assert_eq!(json, r#"{"error":"nothing \"here\""}"#);
    }

    #[test]
    fn format_error_escapes_paths_and_newlines() {
        let message = "file not found: C:\\charts\\q1.txt\nsecond line";
        let json = format_error(&message);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["error"], message);
    }
}
