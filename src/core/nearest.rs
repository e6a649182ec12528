use chrono::{DateTime, Utc};

use crate::core::Record;

/// Record whose date is closest to `query`.
///
/// Equidistant candidates resolve to the first one in iteration order.
/// Records without a valid date never match.
pub fn closest_record<'a, I>(records: I, query: DateTime<Utc>) -> Option<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    let query_ms = query.timestamp_millis();
    let mut closest: Option<(&'a Record, u64)> = None;

    for record in records {
        let Some(date) = record.date else {
            continue;
        };
        let distance = query_ms.abs_diff(date.timestamp_millis());
        if closest.is_none_or(|(_, best)| distance < best) {
            closest = Some((record, distance));
        }
    }

    closest.map(|(record, _)| record)
}
