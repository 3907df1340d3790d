use std::io::Read;
use std::path::Path;

use crate::error::{KarteError, Result};

/// Read chart text from `path`, or from stdin when `path` is `None` or `-`.
pub fn read_chart_text(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => {
            if !p.exists() {
                return Err(KarteError::FileNotFound {
                    path: p.display().to_string(),
                });
            }
            let bytes = std::fs::read(p)?;
            String::from_utf8(bytes).map_err(|_| {
                KarteError::Other(format!("{} is not valid UTF-8 text", p.display()))
            })
        }
        _ => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}
