//! Text statistics for a chart.

use serde::Serialize;

use crate::chart;

/// Size of a chart text and how much of it was recognized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TextStats {
    /// Number of `\n` characters.
    pub lines: usize,
    /// Characters, excluding newlines.
    pub chars: usize,
    /// Distinct section records recognized.
    pub flat_records: usize,
    /// Encounters after grouping.
    pub composite_records: usize,
}

/// Count lines and characters and run the parser over `text`.
///
/// Blank text reports all zeros.
#[must_use]
pub fn get_text_stats(text: &str) -> TextStats {
    if text.trim().is_empty() {
        return TextStats::default();
    }

    let lines = text.matches('\n').count();
    let chars = text.chars().count() - lines;
    let flat = chart::parse_flat(text);
    let composite = chart::compose(&flat);

    TextStats {
        lines,
        chars,
        flat_records: flat.len(),
        composite_records: composite.len(),
    }
}
