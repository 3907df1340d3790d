use std::fmt;

use serde::{Serialize, Serializer};

/// Section code of a clinical SOAP note.
///
/// The chart text marks each section with a single letter or kana followed
/// by `>`, e.g. `S >` or `サ>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SoapSection {
    Subject,
    Object,
    Assessment,
    Plan,
    Comment,
    Summary,
    Other(String),
}

impl SoapSection {
    /// The marker code as it appears in the chart text.
    #[must_use]
    pub fn as_code(&self) -> &str {
        match self {
            Self::Subject => "S",
            Self::Object => "O",
            Self::Assessment => "A",
            Self::Plan => "P",
            Self::Comment => "F",
            Self::Summary => "サ",
            Self::Other(code) => code.as_str(),
        }
    }

    #[must_use]
    pub fn parse(code: &str) -> Self {
        match code {
            "S" => Self::Subject,
            "O" => Self::Object,
            "A" => Self::Assessment,
            "P" => Self::Plan,
            "F" => Self::Comment,
            "サ" => Self::Summary,
            other => Self::Other(other.to_string()),
        }
    }

    /// Output field name used in composite records.
    ///
    /// Unknown codes map to `<code>_content`.
    #[must_use]
    pub fn field_name(&self) -> String {
        match self {
            Self::Subject => "subject".into(),
            Self::Object => "object".into(),
            Self::Assessment => "assessment".into(),
            Self::Plan => "plan".into(),
            Self::Comment => "comment".into(),
            Self::Summary => "summary".into(),
            Self::Other(code) => format!("{code}_content"),
        }
    }
}

impl fmt::Display for SoapSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}

impl Serialize for SoapSection {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_codes() {
        assert_eq!(SoapSection::parse("S"), SoapSection::Subject);
        assert_eq!(SoapSection::parse("O"), SoapSection::Object);
        assert_eq!(SoapSection::parse("A"), SoapSection::Assessment);
        assert_eq!(SoapSection::parse("P"), SoapSection::Plan);
        assert_eq!(SoapSection::parse("F"), SoapSection::Comment);
        assert_eq!(SoapSection::parse("サ"), SoapSection::Summary);
    }

    #[test]
    fn field_names() {
        assert_eq!(SoapSection::Subject.field_name(), "subject");
        assert_eq!(SoapSection::Object.field_name(), "object");
        assert_eq!(SoapSection::Assessment.field_name(), "assessment");
        assert_eq!(SoapSection::Plan.field_name(), "plan");
        assert_eq!(SoapSection::Comment.field_name(), "comment");
        assert_eq!(SoapSection::Summary.field_name(), "summary");
    }

    #[test]
    fn unknown_code_falls_back_to_content_suffix() {
        let section = SoapSection::parse("X");
        assert_eq!(section, SoapSection::Other("X".into()));
        assert_eq!(section.field_name(), "X_content");
        assert_eq!(section.as_code(), "X");
    }

    #[test]
    fn serializes_as_code() {
        let json = serde_json::to_string(&SoapSection::Summary).unwrap();
        assert_eq!(json, "\"サ\"");
    }
}
