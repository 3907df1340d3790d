use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::models::soap::SoapSection;

/// A finalized section of one chart entry, captured when the scanner is
/// about to overwrite a pending field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FlatRecord {
    /// Raw date token, e.g. `2024/05/26(日)`.
    pub date: String,
    /// Department captured from the entry line.
    pub department: String,
    /// `HH:MM` captured from the entry line.
    pub time: String,
    pub soap_section: SoapSection,
    /// Section text, trimmed and never empty.
    pub content: String,
}

impl FlatRecord {
    #[must_use]
    pub fn key(&self) -> RecordKey {
        RecordKey {
            date: self.date.clone(),
            department: self.department.clone(),
            time: self.time.clone(),
        }
    }
}

/// Identifies one clinical encounter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordKey {
    pub date: String,
    pub department: String,
    pub time: String,
}

/// One encounter with all of its SOAP sections folded into named fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompositeRecord {
    /// `YYYY-MM-DDTHH:MM:00Z`, or `None` when the date or time was unparsable.
    pub timestamp: Option<String>,
    pub department: String,
    /// Section field name (`subject`, `object`, ...) to content, in the order
    /// sections were first seen.
    pub sections: IndexMap<String, String>,
}

impl CompositeRecord {
    #[must_use]
    pub fn new(timestamp: Option<String>, department: impl Into<String>) -> Self {
        Self {
            timestamp,
            department: department.into(),
            sections: IndexMap::new(),
        }
    }

    /// Content of a section field, by output field name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.sections.get(name).map(String::as_str)
    }

    /// Timestamp used for ordering; missing timestamps sort first.
    #[must_use]
    pub fn sort_key(&self) -> &str {
        self.timestamp.as_deref().unwrap_or("")
    }

    /// Key-sorted JSON rendering of every field.
    ///
    /// Two records are duplicates iff their canonical keys are equal,
    /// regardless of section insertion order.
    #[must_use]
    pub fn canonical_key(&self) -> String {
        let mut fields: BTreeMap<&str, Option<&str>> = BTreeMap::new();
        fields.insert("timestamp", self.timestamp.as_deref());
        fields.insert("department", Some(self.department.as_str()));
        for (name, content) in &self.sections {
            fields.insert(name.as_str(), Some(content.as_str()));
        }
        serde_json::to_string(&fields).unwrap_or_default()
    }
}

impl Serialize for CompositeRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2 + self.sections.len()))?;
        map.serialize_entry("timestamp", &self.timestamp)?;
        map.serialize_entry("department", &self.department)?;
        for (name, content) in &self.sections {
            map.serialize_entry(name, content)?;
        }
        map.end()
    }
}
