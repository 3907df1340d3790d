//! Chart text parsing pipeline.
//!
//! raw text → [`scanner::scan`] → [`dedupe::dedupe_flat`] →
//! [`group::group_records`] → [`dedupe::dedupe_composite`].
//!
//! Nothing in here fails: unrecognized lines are dropped, incomplete
//! sections are never emitted and unparsable date/time pairs produce a
//! `null` timestamp. The worst case for bad input is an empty result.

pub mod classify;
pub mod dedupe;
pub mod group;
pub mod scanner;
pub mod timestamp;

pub use dedupe::{dedupe_composite, dedupe_flat};
pub use group::group_records;
pub use scanner::{scan, ScanState};
pub use timestamp::convert_to_timestamp;

use crate::models::record::{CompositeRecord, FlatRecord};

/// Scan chart text into deduplicated flat section records.
#[must_use]
pub fn parse_flat(text: &str) -> Vec<FlatRecord> {
    dedupe_flat(scan(text))
}

/// Group flat records into deduplicated composite records, sorted by time.
#[must_use]
pub fn compose(records: &[FlatRecord]) -> Vec<CompositeRecord> {
    dedupe_composite(group_records(records))
}

/// Convert chart text into one composite record per encounter.
#[must_use]
pub fn parse_medical_text(text: &str) -> Vec<CompositeRecord> {
    compose(&parse_flat(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_VISITS: &str = "2024/05/26(日)
内科    担当医    外来    14:30
S >
頭痛があります

2024/05/26(日)
外科    担当医    外来    15:30
S >
腹痛があります
";

    #[test]
    fn single_section_scenario() {
        let out = parse_medical_text("2024/05/26(日)\n内科 担当医 外来 14:30\nS >\n頭痛があります\n");
        assert_eq!(out.len(), 1);
        let json = serde_json::to_value(&out[0]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "timestamp": "2024-05-26T14:30:00Z",
                "department": "内科",
                "subject": "頭痛があります",
            })
        );
    }

    #[test]
    fn simple_text_with_two_sections() {
        let text = "2024/05/26(日)
内科    担当医    外来    14:30
S >
頭痛があります
O >
血圧 130/80
体温 36.5℃
";
        let out = parse_medical_text(text);
        assert_eq!(out.len(), 1);
        let r = &out[0];
        assert_eq!(r.timestamp.as_deref(), Some("2024-05-26T14:30:00Z"));
        assert_eq!(r.department, "内科");
        assert!(r.field("subject").unwrap().contains("頭痛があります"));
        assert!(r.field("object").unwrap().contains("血圧 130/80"));
        assert!(r.field("object").unwrap().contains("体温 36.5℃"));
    }

    #[test]
    fn two_visits_ordered_by_time() {
        let out = parse_medical_text(TWO_VISITS);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].department, "内科");
        assert_eq!(out[1].department, "外科");
        assert!(out[0].sort_key() <= out[1].sort_key());
    }

    #[test]
    fn later_visit_written_first_still_sorts_first() {
        let text = "2024/05/27(月)
内科 担当医 外来 10:00
S >
再診
2024/05/26(日)
内科 担当医 外来 10:00
S >
初診
";
        let out = parse_medical_text(text);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].field("subject"), Some("初診"));
        assert_eq!(out[1].field("subject"), Some("再診"));
    }

    #[test]
    fn empty_and_malformed_text() {
        assert!(parse_medical_text("").is_empty());
        let text = "これは不正な形式のテキストです\n日付がありません\nSOAPセクションもありません\n";
        assert!(parse_medical_text(text).is_empty());
    }

    #[test]
    fn hospitalization_day_annotation() {
        let text = "2024/05/26(日) （入院 5 日目）
内科    担当医    病棟    09:00
S >
体調は良好です
";
        let out = parse_medical_text(text);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].timestamp.as_deref(), Some("2024-05-26T09:00:00Z"));
    }

    #[test]
    fn repeated_visit_block_is_not_duplicated() {
        let block = "2024/05/26(日)\n内科 担当医 外来 14:30\nS >\n頭痛があります\n";
        let text = format!("{block}{block}");
        let out = parse_medical_text(&text);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].field("subject"), Some("頭痛があります"));
    }

    #[test]
    fn repeated_section_under_same_entry_is_suppressed() {
        let text = "2024/05/26(日)
内科 担当医 外来 14:30
S >
頭痛があります
O >
血圧 120/70
S >
頭痛があります
";
        let out = parse_medical_text(text);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].field("subject"), Some("頭痛があります"));
        assert_eq!(out[0].field("object"), Some("血圧 120/70"));
    }

    #[test]
    fn summary_section() {
        let text = "2024/05/26(日)\n内科 担当医 病棟 18:00\nサ >\n本日退院\n";
        let out = parse_medical_text(text);
        assert_eq!(out[0].field("summary"), Some("本日退院"));
    }

    #[test]
    fn output_never_exceeds_flushed_records() {
        for text in [TWO_VISITS, "", "2024/05/26(日)\n内科 担当医 外来 14:30\nS >\na\nS >\na\n"] {
            let flushed = scan(text).len();
            assert!(parse_medical_text(text).len() <= flushed);
        }
    }

    #[test]
    fn parse_flat_removes_repeated_sections() {
        let block = "2024/05/26(日)\n内科 担当医 外来 14:30\nS >\n頭痛\n";
        let text = format!("{block}{block}");
        assert_eq!(scan(&text).len(), 2);
        assert_eq!(parse_flat(&text).len(), 1);
    }
}
