use datatable::{
    ColumnDef, DeriveInput, Record, Render, SortBy, SortDirection, TableOptions, Value, derive,
};
use serde_json::json;

mod common;

#[test]
fn test_sort_by_serializes_as_single_entry_map() {
    let sort = SortBy::asc("lastName");
    assert_eq!(serde_json::to_value(&sort).unwrap(), json!({ "lastName": "asc" }));

    let parsed: SortBy = serde_json::from_value(json!({ "firstName": "desc" })).unwrap();
    assert_eq!(parsed, SortBy::new("firstName", SortDirection::Desc));
}

#[test]
fn test_sort_by_rejects_multiple_columns() {
    let result = serde_json::from_value::<SortBy>(json!({ "a": "asc", "b": "desc" }));
    assert!(result.is_err());
    let result = serde_json::from_value::<SortBy>(json!({}));
    assert!(result.is_err());
}

#[test]
fn test_table_options_from_config() {
    let options: TableOptions = serde_json::from_value(json!({ "fallback": "--" })).unwrap();
    assert_eq!(options, TableOptions::default().with_fallback("--"));

    let options: TableOptions = serde_json::from_value(json!({})).unwrap();
    assert_eq!(options.fallback, None);
}

#[test]
fn test_record_round_trips_as_plain_object() {
    let record: Record = serde_json::from_value(json!({ "name": "Kurt", "age": 40 })).unwrap();
    assert_eq!(record.get("name"), Some(&Value::from("Kurt")));
    assert_eq!(record.get("age"), Some(&Value::Int(40)));
}

#[test]
fn test_projection_skips_deferred_payloads() {
    let records = common::shared(vec![common::person("Kurt", "Jones")]);
    let columns = vec![
        ColumnDef::key("firstName")
            .with_header("First")
            .with_cell(|_| Render::deferred(|| "painted".to_string())),
        ColumnDef::key("lastName").with_cell(|cx| Render::from(cx.value.to_string().to_uppercase())),
    ];
    let sort = SortBy::asc("lastName");
    let projection = derive(DeriveInput {
        working: &[0],
        original: &records,
        columns: &columns,
        sort: Some(&sort),
        fallback: None,
        revision: 1,
    });

    let json = serde_json::to_value(&projection).unwrap();
    let cells = &json["rowGroups"][0]["cells"];
    assert_eq!(cells[0], json!({ "id": "firstName", "value": "Kurt", "cell": null }));
    assert_eq!(cells[1], json!({ "id": "lastName", "value": "Jones", "cell": "JONES" }));
    assert_eq!(json["rowGroups"][0]["original"]["firstName"], "Kurt");
    assert_eq!(json["headerGroups"][0]["header"], "First");
    assert_eq!(json["headerGroups"][1]["sortOrder"], "asc");
}

#[test]
fn test_deferred_payloads_excluded_from_equality() {
    let a = Render::deferred(|| "a".to_string());
    let b = Render::deferred(|| "b".to_string());
    assert_eq!(a, b);
    assert_ne!(Render::from("a"), Render::from("b"));
    assert_ne!(a, Render::from("a"));
}
