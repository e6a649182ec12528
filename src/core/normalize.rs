use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::core::record::{Record, parse_record_date};
use crate::error::{ChartError, ChartResult};

/// Per-key payload entry: every record field except `date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEntry {
    pub id: String,
    pub value_bar: f64,
    pub value_area: f64,
}

/// Dataset body as served by the endpoint.
///
/// `IndexMap` keeps the document order of timestamp keys.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawResponse {
    pub response: IndexMap<String, RawEntry>,
}

/// Decodes a fetched payload into records.
///
/// The empty-array fetch fallback, or any payload without a `response`
/// object, is reported as `ChartError::MissingResponse`.
pub fn normalize_payload(payload: &Value) -> ChartResult<Vec<Record>> {
    let Some(entries) = payload.get("response").and_then(Value::as_object) else {
        return Err(ChartError::MissingResponse);
    };

    let mut response = IndexMap::with_capacity(entries.len());
    for (key, entry) in entries {
        let entry = RawEntry::deserialize(entry)
            .map_err(|e| ChartError::InvalidData(format!("entry `{key}`: {e}")))?;
        response.insert(key.clone(), entry);
    }

    Ok(normalize_raw_response(RawResponse { response }))
}

/// Pure typed transform; unparseable keys become `date: None`.
#[must_use]
pub fn normalize_raw_response(raw: RawResponse) -> Vec<Record> {
    let mut invalid_dates = 0usize;
    let records: Vec<Record> = raw
        .response
        .into_iter()
        .map(|(key, entry)| {
            let date = parse_record_date(&key);
            if date.is_none() {
                invalid_dates += 1;
                warn!(key = %key, id = %entry.id, "dataset key is not a valid date");
            }
            Record {
                date,
                id: entry.id,
                value_bar: entry.value_bar,
                value_area: entry.value_area,
            }
        })
        .collect();

    debug!(
        record_count = records.len(),
        invalid_dates, "normalized dataset"
    );
    records
}
