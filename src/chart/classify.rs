//! Line patterns of the chart text.
//!
//! Classification is context-gated: an entry line is only recognized once a
//! date header has been seen, and a SOAP marker only once an entry line has
//! been seen. A date header always wins.

use std::sync::LazyLock;

use regex::Regex;

use crate::chart::scanner::ScanState;
use crate::models::soap::SoapSection;

/// `2024/05/26(日)`, optionally followed by `（入院 5 日目）`.
static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4}/\d{2}/\d{2}\(.?\))(?:\s*（入院\s*(\d+)\s*日目）)?").expect("valid regex")
});

/// `<department> <doctor> <kind> HH:MM`, four whitespace-separated fields.
static ENTRY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?)\s+(.+?)\s+(.+?)\s+(\d{2}:\d{2})").expect("valid regex")
});

/// `S >`, `O>`, `サ >` ...
static SECTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([SOAPFサ])\s*>").expect("valid regex"));

/// What a single trimmed, non-blank line means in the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Date header. The hospitalization day is parsed but not carried into
    /// any record.
    Date {
        date: &'a str,
        admission_day: Option<&'a str>,
    },
    /// Entry line opening an encounter under the current date.
    Entry { department: &'a str, time: &'a str },
    /// SOAP marker opening a section under the current entry.
    Section(SoapSection),
    /// Free text under the current section.
    Content,
    /// Anything else; dropped.
    Noise,
}

/// Classify a trimmed line against the patterns allowed by `state`.
#[must_use]
pub fn classify<'a>(line: &'a str, state: &ScanState) -> LineKind<'a> {
    if let Some((date, admission_day)) = match_date(line) {
        return LineKind::Date {
            date,
            admission_day,
        };
    }

    if state.has_date() {
        if let Some((department, time)) = match_entry(line) {
            return LineKind::Entry { department, time };
        }
    }

    if state.has_entry() {
        if let Some(section) = match_section(line) {
            return LineKind::Section(section);
        }
    }

    if state.has_section() {
        LineKind::Content
    } else {
        LineKind::Noise
    }
}

/// Match a date header, returning the date token and the hospitalization day.
#[must_use]
pub fn match_date(line: &str) -> Option<(&str, Option<&str>)> {
    let caps = DATE_RE.captures(line)?;
    let date = caps.get(1)?.as_str();
    let admission_day = caps.get(2).map(|m| m.as_str());
    Some((date, admission_day))
}

/// Match an entry line, returning `(department, time)`.
#[must_use]
pub fn match_entry(line: &str) -> Option<(&str, &str)> {
    let caps = ENTRY_RE.captures(line)?;
    let department = caps.get(1)?.as_str().trim();
    let time = caps.get(4)?.as_str().trim();
    Some((department, time))
}

#[must_use]
pub fn match_section(line: &str) -> Option<SoapSection> {
    SECTION_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| SoapSection::parse(m.as_str()))
}
