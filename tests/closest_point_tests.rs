use chrono::{DateTime, TimeZone, Utc};
use dual_axis_chart::core::{Record, closest_record};

fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, hour, 0, 0)
        .single()
        .expect("valid timestamp")
}

#[test]
fn exact_match_returns_that_record() {
    let records = vec![
        Record::new(Some(at(0)), "a", 1.0, 1.0),
        Record::new(Some(at(6)), "a", 2.0, 2.0),
        Record::new(Some(at(12)), "a", 3.0, 3.0),
    ];
    let found = closest_record(&records, at(6)).expect("non-empty input");
    assert_eq!(found.value_bar, 2.0);
}

#[test]
fn equidistant_query_returns_first_encountered() {
    let records = vec![
        Record::new(Some(at(8)), "a", 8.0, 0.0),
        Record::new(Some(at(4)), "a", 4.0, 0.0),
    ];
    let found = closest_record(&records, at(6)).expect("non-empty input");
    assert_eq!(found.value_bar, 8.0);

    let reversed: Vec<Record> = records.iter().rev().cloned().collect();
    let found = closest_record(&reversed, at(6)).expect("non-empty input");
    assert_eq!(found.value_bar, 4.0);
}

#[test]
fn nearest_neighbour_wins_regardless_of_order() {
    let records = vec![
        Record::new(Some(at(20)), "a", 20.0, 0.0),
        Record::new(Some(at(1)), "a", 1.0, 0.0),
        Record::new(Some(at(10)), "a", 10.0, 0.0),
    ];
    let found = closest_record(&records, at(9)).expect("non-empty input");
    assert_eq!(found.value_bar, 10.0);
}

#[test]
fn undated_records_never_match() {
    let records = vec![
        Record::new(None, "a", 0.0, 0.0),
        Record::new(Some(at(23)), "a", 23.0, 0.0),
    ];
    let found = closest_record(&records, at(0)).expect("one dated record");
    assert_eq!(found.value_bar, 23.0);

    assert!(closest_record(&records[..1], at(0)).is_none());
    assert!(closest_record(Vec::<Record>::new().iter(), at(0)).is_none());
}
