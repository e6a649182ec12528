use chrono::{TimeZone, Utc};
use dual_axis_chart::ChartError;
use dual_axis_chart::core::{RawEntry, RawResponse, normalize_payload, normalize_raw_response, unique_ids};
use indexmap::IndexMap;
use serde_json::json;

#[test]
fn single_entry_payload_becomes_one_record() {
    let payload = json!({
        "response": {
            "2024-01-01T00:00:00Z": { "id": "a", "value_bar": 5, "value_area": 10 }
        }
    });

    let records = normalize_payload(&payload).expect("payload should normalize");
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.date, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single());
    assert_eq!(record.id, "a");
    assert_eq!(record.value_bar, 5.0);
    assert_eq!(record.value_area, 10.0);
    assert_eq!(unique_ids(&records), vec!["a".to_owned()]);
}

#[test]
fn records_follow_document_key_order() {
    let payload = json!({
        "response": {
            "2024-01-03 10:00:00": { "id": "b", "value_bar": 1, "value_area": 2 },
            "2024-01-01 10:00:00": { "id": "a", "value_bar": 3, "value_area": 4 },
            "2024-01-02 10:00:00": { "id": "b", "value_bar": 5, "value_area": 6 }
        }
    });

    let records = normalize_payload(&payload).expect("payload should normalize");
    let bars: Vec<f64> = records.iter().map(|record| record.value_bar).collect();
    assert_eq!(bars, vec![1.0, 3.0, 5.0]);
    assert_eq!(unique_ids(&records), vec!["b".to_owned(), "a".to_owned()]);
}

#[test]
fn unparseable_key_keeps_record_with_missing_date() {
    let payload = json!({
        "response": {
            "yesterday": { "id": "a", "value_bar": 1.5, "value_area": 2.5 },
            "2024-02-01": { "id": "a", "value_bar": 3.0, "value_area": 4.0 }
        }
    });

    let records = normalize_payload(&payload).expect("payload should normalize");
    assert_eq!(records.len(), 2);
    assert!(!records[0].has_valid_date());
    assert_eq!(records[0].value_bar, 1.5);
    assert_eq!(
        records[1].date,
        Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).single()
    );
}

#[test]
fn empty_array_fallback_reports_missing_response() {
    let err = normalize_payload(&json!([])).expect_err("fallback has no response");
    assert!(matches!(err, ChartError::MissingResponse));

    let err = normalize_payload(&json!({ "response": [] })).expect_err("response must be an object");
    assert!(matches!(err, ChartError::MissingResponse));
}

#[test]
fn malformed_entry_fails_whole_payload_naming_the_key() {
    let payload = json!({
        "response": {
            "2024-01-01T00:00:00Z": { "id": "a", "value_bar": 1, "value_area": 1 },
            "2024-01-02T00:00:00Z": { "id": "a", "value_bar": "high", "value_area": 1 }
        }
    });

    let err = normalize_payload(&payload).expect_err("string value_bar is malformed");
    match err {
        ChartError::InvalidData(message) => assert!(message.contains("2024-01-02T00:00:00Z")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn empty_response_object_yields_no_records() {
    let records = normalize_payload(&json!({ "response": {} })).expect("empty object is valid");
    assert!(records.is_empty());
    assert!(unique_ids(&records).is_empty());
}

#[test]
fn typed_transform_keeps_duplicates_and_order() {
    let mut response = IndexMap::new();
    for (key, id) in [("2024-01-01", "x"), ("2024-01-02", "x"), ("bogus", "y")] {
        response.insert(
            key.to_owned(),
            RawEntry {
                id: id.to_owned(),
                value_bar: 1.0,
                value_area: 2.0,
            },
        );
    }

    let records = normalize_raw_response(RawResponse { response });
    let ids: Vec<&str> = records.iter().map(|record| record.id.as_str()).collect();
    assert_eq!(ids, vec!["x", "x", "y"]);
    assert!(records[2].date.is_none());
}
