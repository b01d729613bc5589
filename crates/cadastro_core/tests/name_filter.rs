use cadastro_core::{filter_by_first_name, UserRecord};

fn sample_records() -> Vec<UserRecord> {
    vec![
        UserRecord::with_orders("Ana", "Silva", 30, 2),
        UserRecord::with_orders("Bruno", "Souza", 25, 1),
        UserRecord::with_orders("Mariana", "Dias", 41, 0),
    ]
}

#[test]
fn empty_search_returns_all_in_order() {
    let records = sample_records();
    let matches = filter_by_first_name(&records, "");

    assert_eq!(matches.len(), 3);
    for (expected_position, hit) in matches.iter().enumerate() {
        assert_eq!(hit.position, expected_position);
        assert_eq!(hit.record, &records[expected_position]);
    }
}

#[test]
fn matching_is_case_insensitive_substring() {
    let records = sample_records();
    let matches = filter_by_first_name(&records, "AN");

    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].record.first_name, "Ana");
    assert_eq!(matches[1].record.first_name, "Mariana");
}

#[test]
fn matches_keep_their_unfiltered_positions() {
    let records = sample_records();
    let matches = filter_by_first_name(&records, "mari");

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].position, 2);
}

#[test]
fn search_is_restricted_to_first_name() {
    let records = sample_records();

    assert!(filter_by_first_name(&records, "Silva").is_empty());
}

#[test]
fn unmatched_search_returns_empty() {
    let records = sample_records();

    assert!(filter_by_first_name(&records, "zeca").is_empty());
}
