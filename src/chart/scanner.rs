//! Line-driven accumulator over chart text.
//!
//! Each state carries the fields recognized so far. Fields are only ever
//! added or replaced while scanning one text, never cleared, so a new date
//! header keeps the current entry and section.

use tracing::{debug, trace};

use crate::chart::classify::{classify, LineKind};
use crate::models::record::FlatRecord;
use crate::models::soap::SoapSection;

/// Department and time captured from an entry line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub department: String,
    pub time: String,
}

/// Pending scan state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ScanState {
    #[default]
    AwaitDate,
    AwaitEntry {
        date: String,
    },
    AwaitSection {
        date: String,
        entry: Entry,
    },
    Accumulating {
        date: String,
        entry: Entry,
        section: SoapSection,
        /// Content lines, each followed by `\n`.
        buffer: String,
    },
}

impl ScanState {
    #[must_use]
    pub fn has_date(&self) -> bool {
        !matches!(self, Self::AwaitDate)
    }

    #[must_use]
    pub fn has_entry(&self) -> bool {
        matches!(self, Self::AwaitSection { .. } | Self::Accumulating { .. })
    }

    #[must_use]
    pub fn has_section(&self) -> bool {
        matches!(self, Self::Accumulating { .. })
    }

    /// Consume one trimmed, non-blank line.
    ///
    /// Returns the next state and the section flushed by this line, if any.
    /// Any recognized header flushes the pending section before its field
    /// replaces the old one.
    #[must_use]
    pub fn step(self, line: &str) -> (Self, Option<FlatRecord>) {
        match classify(line, &self) {
            LineKind::Date {
                date,
                admission_day,
            } => {
                if let Some(day) = admission_day {
                    debug!(date, day, "hospitalization day ignored");
                }
                let (state, flushed) = self.flush();
                (state.with_date(date), flushed)
            }
            LineKind::Entry { department, time } => {
                let (state, flushed) = self.flush();
                let entry = Entry {
                    department: department.to_string(),
                    time: time.to_string(),
                };
                (state.with_entry(entry), flushed)
            }
            LineKind::Section(section) => {
                let (state, flushed) = self.flush();
                (state.with_section(section), flushed)
            }
            LineKind::Content => (self.append(line), None),
            LineKind::Noise => {
                trace!(line, "ignored line");
                (self, None)
            }
        }
    }

    /// Emit the pending section when it has non-blank content, and reset the
    /// content buffer. All other fields are kept.
    #[must_use]
    pub fn flush(self) -> (Self, Option<FlatRecord>) {
        match self {
            Self::Accumulating {
                date,
                entry,
                section,
                buffer,
            } => {
                let content = buffer.trim();
                let record = if content.is_empty() {
                    trace!(%section, "empty section dropped");
                    None
                } else {
                    Some(FlatRecord {
                        date: date.clone(),
                        department: entry.department.clone(),
                        time: entry.time.clone(),
                        soap_section: section.clone(),
                        content: content.to_string(),
                    })
                };
                let state = Self::Accumulating {
                    date,
                    entry,
                    section,
                    buffer: String::new(),
                };
                (state, record)
            }
            other => (other, None),
        }
    }

    fn with_date(self, date: &str) -> Self {
        let date = date.to_string();
        match self {
            Self::AwaitDate | Self::AwaitEntry { .. } => Self::AwaitEntry { date },
            Self::AwaitSection { entry, .. } => Self::AwaitSection { date, entry },
            Self::Accumulating {
                entry,
                section,
                buffer,
                ..
            } => Self::Accumulating {
                date,
                entry,
                section,
                buffer,
            },
        }
    }

    fn with_entry(self, entry: Entry) -> Self {
        match self {
            // Entry lines are only classified once a date is pending.
            Self::AwaitDate => Self::AwaitDate,
            Self::AwaitEntry { date } | Self::AwaitSection { date, .. } => {
                Self::AwaitSection { date, entry }
            }
            Self::Accumulating {
                date,
                section,
                buffer,
                ..
            } => Self::Accumulating {
                date,
                entry,
                section,
                buffer,
            },
        }
    }

    fn with_section(self, section: SoapSection) -> Self {
        match self {
            Self::AwaitSection { date, entry } | Self::Accumulating { date, entry, .. } => {
                Self::Accumulating {
                    date,
                    entry,
                    section,
                    buffer: String::new(),
                }
            }
            other => other,
        }
    }

    fn append(mut self, line: &str) -> Self {
        if let Self::Accumulating { buffer, .. } = &mut self {
            buffer.push_str(line);
            buffer.push('\n');
        }
        self
    }
}

/// Scan chart text into flat section records, in emission order.
///
/// Lines are trimmed and blank lines skipped. Never fails: unrecognized
/// lines are dropped and incomplete sections are never emitted.
#[must_use]
pub fn scan(text: &str) -> Vec<FlatRecord> {
    let mut state = ScanState::default();
    let mut records = Vec::new();
    let mut lines = 0usize;

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        lines += 1;
        let (next, flushed) = state.step(line);
        state = next;
        records.extend(flushed);
    }

    let (_, flushed) = state.flush();
    records.extend(flushed);

    debug!(lines, records = records.len(), "chart text scanned");
    records
}
