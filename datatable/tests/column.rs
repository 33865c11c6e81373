use datatable::column::Accessor;
use datatable::{
    ColumnDef, ColumnDefError, PositionId, Record, Render, Value, resolve_cell, validate_columns,
};

mod common;

#[test]
fn test_key_accessor_reads_field() {
    let record = common::person("Reggie", "Watts");
    let cell = resolve_cell(&ColumnDef::key("lastName"), &record, PositionId::new(0, 1), None);
    assert_eq!(cell.value, Value::from("Watts"));
    assert_eq!(cell.id, "lastName");
    assert!(cell.cell.is_none());
}

#[test]
fn test_missing_field_uses_fallback() {
    let record = common::person("Reggie", "Watts");
    let cell = resolve_cell(&ColumnDef::key("phone"), &record, PositionId::new(0, 0), Some("--"));
    assert_eq!(cell.value, Value::from("--"));
}

#[test]
fn test_null_field_uses_fallback() {
    let record = Record::new().set("phone", Value::Null);
    let cell = resolve_cell(&ColumnDef::key("phone"), &record, PositionId::new(0, 0), Some("--"));
    assert_eq!(cell.value, Value::from("--"));
}

#[test]
fn test_missing_field_without_fallback_is_null() {
    let record = Record::new();
    let cell = resolve_cell(&ColumnDef::key("phone"), &record, PositionId::new(0, 0), None);
    assert!(cell.value.is_null());
    assert_eq!(cell.display(), "");
}

#[test]
fn test_accessor_fn_result_and_fallback() {
    let column = ColumnDef::computed(|r| {
        Value::from(format!("{} {}", r.value("firstName"), r.value("lastName")))
    });
    let record = common::person("Kurt", "Jones");
    let cell = resolve_cell(&column, &record, PositionId::new(2, 0), None);
    assert_eq!(cell.value, Value::from("Kurt Jones"));

    let empty = ColumnDef::computed(|_| Value::Null);
    let cell = resolve_cell(&empty, &record, PositionId::new(2, 1), Some("n/a"));
    assert_eq!(cell.value, Value::from("n/a"));
}

#[test]
fn test_id_precedence() {
    let record = common::person("Kurt", "Jones");

    let explicit = ColumnDef::key("lastName").with_id("surname");
    let cell = resolve_cell(&explicit, &record, PositionId::new(3, 4), None);
    assert_eq!(cell.id, "surname");

    let anonymous = ColumnDef::computed(|_| Value::from(1i64));
    let cell = resolve_cell(&anonymous, &record, PositionId::new(3, 4), None);
    assert_eq!(cell.id, "3-4");
}

#[test]
fn test_cell_fn_sees_resolved_value_and_record() {
    let column = ColumnDef::key("phone").with_cell(|cx| {
        Render::from(format!("{}:{}:{}", cx.id, cx.value, cx.record.value("firstName")))
    });
    let record = common::person("Wendy", "Watts");
    let cell = resolve_cell(&column, &record, PositionId::new(1, 0), Some("--"));
    assert_eq!(cell.cell, Some(Render::from("phone:--:Wendy")));
    assert_eq!(cell.display(), "phone:--:Wendy");
    assert_eq!(cell.value, Value::from("--"));
}

#[test]
fn test_deferred_cell_is_rendered_on_demand() {
    let column = ColumnDef::key("firstName").with_cell(|cx| {
        let name = cx.value.to_string();
        Render::deferred(move || format!("<b>{}</b>", name))
    });
    let record = common::person("Kurt", "Jones");
    let cell = resolve_cell(&column, &record, PositionId::new(0, 0), None);
    assert!(cell.cell.as_ref().is_some_and(Render::is_deferred));
    assert_eq!(cell.display(), "<b>Kurt</b>");
}

#[test]
fn test_builder_rejects_missing_accessor() {
    let err = ColumnDef::builder().id("x").build().unwrap_err();
    assert_eq!(
        err,
        ColumnDefError::MissingAccessor {
            id: Some("x".to_string())
        }
    );
}

#[test]
fn test_builder_rejects_conflicting_accessor() {
    let err = ColumnDef::builder()
        .accessor_key("firstName")
        .accessor_fn(|_| Value::Null)
        .build()
        .unwrap_err();
    assert!(matches!(err, ColumnDefError::ConflictingAccessor { id: None }));
}

#[test]
fn test_builder_rejects_empty_key() {
    let err = ColumnDef::builder().accessor_key("").build().unwrap_err();
    assert!(matches!(err, ColumnDefError::EmptyAccessorKey { .. }));
}

#[test]
fn test_builder_builds_key_column() {
    let column = ColumnDef::builder()
        .accessor_key("lastName")
        .header("Last name")
        .build()
        .unwrap();
    assert_eq!(column.id(), Some("lastName"));
    assert!(matches!(column.accessor(), Accessor::Key(k) if k == "lastName"));
}

#[test]
fn test_computed_column_has_no_id() {
    assert_eq!(ColumnDef::computed(|_| Value::Null).id(), None);
}

#[test]
fn test_validate_columns_detects_duplicates() {
    let columns = vec![
        ColumnDef::key("firstName"),
        ColumnDef::computed(|_| Value::Null),
        ColumnDef::key("lastName").with_id("firstName"),
    ];
    let err = validate_columns(&columns).unwrap_err();
    assert_eq!(
        err,
        ColumnDefError::DuplicateId {
            id: "firstName".to_string(),
            first: 0,
            second: 2,
        }
    );
    assert!(err.to_string().contains("firstName"));
}

#[test]
fn test_validate_columns_allows_anonymous_columns() {
    let columns = vec![
        ColumnDef::computed(|_| Value::Null),
        ColumnDef::computed(|_| Value::Null),
        ColumnDef::key("firstName"),
    ];
    assert!(validate_columns(&columns).is_ok());
}

#[test]
fn test_validate_columns_rejects_empty_key_shorthand() {
    let columns = vec![ColumnDef::key("firstName"), ColumnDef::key("")];
    assert_eq!(
        validate_columns(&columns),
        Err(ColumnDefError::EmptyAccessorKey { id: None })
    );

    let columns = vec![ColumnDef::key("").with_id("blank")];
    assert_eq!(
        validate_columns(&columns),
        Err(ColumnDefError::EmptyAccessorKey {
            id: Some("blank".to_string())
        })
    );
}
