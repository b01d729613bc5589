use cadastro_core::db::open_db_in_memory;
use cadastro_core::{
    parse_form, AgeBand, FormError, NumericField, RegistrationForm, RegistrationService,
    SlotRepository, SqliteSlotRepository, StoreError, SubmitError, SubmitOutcome, UserRecord,
    UserStore, USERS_SLOT_KEY,
};

fn form(first_name: &str, last_name: &str, age: &str, order_count: &str) -> RegistrationForm {
    RegistrationForm {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        age: age.to_string(),
        order_count: order_count.to_string(),
    }
}

#[test]
fn parse_form_trims_names_and_coerces_numbers() {
    let record = parse_form(&form(" Ana ", " Silva ", " 30 ", "2")).unwrap();

    assert_eq!(record, UserRecord::with_orders("Ana", "Silva", 30, 2));
}

#[test]
fn any_empty_field_is_reported_as_missing_fields() {
    let cases = [
        form("", "Silva", "30", "2"),
        form("Ana", "   ", "30", "2"),
        form("Ana", "Silva", "", "2"),
        form("Ana", "Silva", "30", ""),
    ];

    for case in cases {
        assert_eq!(parse_form(&case).unwrap_err(), FormError::MissingFields);
    }
}

#[test]
fn missing_fields_wins_over_numeric_errors() {
    let err = parse_form(&form("", "Silva", "abc", "2")).unwrap_err();
    assert_eq!(err, FormError::MissingFields);
}

#[test]
fn non_positive_or_unparseable_age_is_rejected() {
    for age in ["abc", "0", "-3", "3.5"] {
        assert_eq!(
            parse_form(&form("Ana", "Silva", age, "2")).unwrap_err(),
            FormError::InvalidNumber(NumericField::Age)
        );
    }
}

#[test]
fn negative_or_unparseable_order_count_is_rejected_but_zero_is_allowed() {
    for orders in ["x", "-1", "2.5"] {
        assert_eq!(
            parse_form(&form("Ana", "Silva", "30", orders)).unwrap_err(),
            FormError::InvalidNumber(NumericField::OrderCount)
        );
    }

    let record = parse_form(&form("Ana", "Silva", "30", "0")).unwrap();
    assert_eq!(record.order_count, Some(0));
}

#[test]
fn submit_appends_without_marker_and_updates_with_marker() {
    let conn = open_db_in_memory().unwrap();
    let store = UserStore::new(SqliteSlotRepository::try_new(&conn).unwrap());
    let mut service = RegistrationService::new(store);

    let outcome = service.submit(&form("Ana", "Silva", "30", "2"), None).unwrap();
    assert_eq!(outcome, SubmitOutcome::Added);
    assert_eq!(service.records().len(), 1);

    let outcome = service
        .submit(&form("Ana", "Silva", "31", "3"), Some(0))
        .unwrap();
    assert_eq!(outcome, SubmitOutcome::Updated { position: 0 });
    assert_eq!(service.records().len(), 1);
    assert_eq!(service.get(0).unwrap().age, 31);
}

#[test]
fn rejected_form_leaves_sequence_untouched() {
    let conn = open_db_in_memory().unwrap();
    let store = UserStore::new(SqliteSlotRepository::try_new(&conn).unwrap());
    let mut service = RegistrationService::new(store);

    let err = service
        .submit(&form("Ana", "Silva", "30", ""), None)
        .unwrap_err();

    assert!(matches!(err, SubmitError::Form(FormError::MissingFields)));
    assert!(service.records().is_empty());
}

#[test]
fn submit_with_stale_marker_fails_with_index_out_of_range() {
    let conn = open_db_in_memory().unwrap();
    let store = UserStore::new(SqliteSlotRepository::try_new(&conn).unwrap());
    let mut service = RegistrationService::new(store);

    let err = service
        .submit(&form("Ana", "Silva", "30", "2"), Some(7))
        .unwrap_err();

    assert!(matches!(
        err,
        SubmitError::Store(StoreError::IndexOutOfRange { index: 7, len: 0 })
    ));
}

#[test]
fn registration_lifecycle_add_edit_remove() {
    let conn = open_db_in_memory().unwrap();
    let store = UserStore::new(SqliteSlotRepository::try_new(&conn).unwrap());
    let mut service = RegistrationService::new(store);

    service.submit(&form("Ana", "Silva", "30", "2"), None).unwrap();
    assert_eq!(service.records().len(), 1);
    assert_eq!(service.get(0).unwrap().age_band(), AgeBand::Adult);

    service
        .submit(&form("Ana", "Silva", "10", "2"), Some(0))
        .unwrap();
    assert_eq!(service.records().len(), 1);
    assert_eq!(service.get(0).unwrap().age_band(), AgeBand::Minor);

    service.remove(0).unwrap();
    assert!(service.records().is_empty());

    let reader = SqliteSlotRepository::try_new(&conn).unwrap();
    assert_eq!(reader.read_slot(USERS_SLOT_KEY).unwrap(), None);
}
