use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// One normalized data point.
///
/// `date` is `None` when the originating key could not be parsed; the record
/// is kept as-is so callers see exactly what the payload carried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub date: Option<DateTime<Utc>>,
    pub id: String,
    pub value_bar: f64,
    pub value_area: f64,
}

impl Record {
    #[must_use]
    pub fn new(
        date: Option<DateTime<Utc>>,
        id: impl Into<String>,
        value_bar: f64,
        value_area: f64,
    ) -> Self {
        Self {
            date,
            id: id.into(),
            value_bar,
            value_area,
        }
    }

    #[must_use]
    pub fn has_valid_date(&self) -> bool {
        self.date.is_some()
    }
}

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parses a dataset key into a UTC timestamp.
///
/// Accepts RFC 3339, offset-less ISO-like date-times (read as UTC) and bare
/// calendar dates (UTC midnight).
#[must_use]
pub fn parse_record_date(key: &str) -> Option<DateTime<Utc>> {
    let key = key.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(key) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(key, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(key, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Distinct identifiers in first-occurrence order.
#[must_use]
pub fn unique_ids(records: &[Record]) -> Vec<String> {
    records
        .iter()
        .map(|record| record.id.as_str())
        .collect::<IndexSet<_>>()
        .into_iter()
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{Record, parse_record_date, unique_ids};
    use chrono::{TimeZone, Utc};

    #[test]
    fn parses_offset_and_naive_keys_as_utc() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 1, 9, 30, 0).single();
        assert_eq!(parse_record_date("2024-01-01T09:30:00Z"), expected);
        assert_eq!(parse_record_date("2024-01-01T18:30:00+09:00"), expected);
        assert_eq!(parse_record_date("2024-01-01 09:30:00"), expected);
        assert_eq!(parse_record_date("2024-01-01T09:30"), expected);
    }

    #[test]
    fn bare_date_maps_to_midnight() {
        assert_eq!(
            parse_record_date("2023-02-01"),
            Utc.with_ymd_and_hms(2023, 2, 1, 0, 0, 0).single()
        );
    }

    #[test]
    fn garbage_key_yields_sentinel() {
        assert_eq!(parse_record_date("not-a-date"), None);
        assert_eq!(parse_record_date(""), None);
    }

    #[test]
    fn unique_ids_keep_first_occurrence_order() {
        let records = vec![
            Record::new(None, "b", 1.0, 1.0),
            Record::new(None, "a", 1.0, 1.0),
            Record::new(None, "b", 2.0, 2.0),
        ];
        assert_eq!(unique_ids(&records), vec!["b".to_owned(), "a".to_owned()]);
        assert!(unique_ids(&[]).is_empty());
    }
}
