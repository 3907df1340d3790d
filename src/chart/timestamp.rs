use std::sync::LazyLock;

use regex::Regex;

static DATE_HEAD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})/(\d{2})/(\d{2})").expect("valid regex"));

static TIME_HEAD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{2}):(\d{2})").expect("valid regex"));

/// Build a sortable `YYYY-MM-DDTHH:MM:00Z` timestamp from a chart date token
/// and an `HH:MM` time.
///
/// Only the leading `YYYY/MM/DD` of `date` is read, so weekday and
/// hospitalization-day suffixes are ignored. Fields are copied as written;
/// there is no calendar validation and no timezone handling.
///
/// Returns `None` when either input is missing or does not start with the
/// expected fixed-width fields.
#[must_use]
pub fn convert_to_timestamp(date: Option<&str>, time: Option<&str>) -> Option<String> {
    let date = DATE_HEAD_RE.captures(date?)?;
    let time = TIME_HEAD_RE.captures(time?)?;
    Some(format!(
        "{}-{}-{}T{}:{}:00Z",
        &date[1], &date[2], &date[3], &time[1], &time[2]
    ))
}
