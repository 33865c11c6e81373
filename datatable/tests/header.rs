use datatable::{ColumnDef, Render, SortBy, SortDirection, Value, resolve_headers};

mod common;

#[test]
fn test_headers_follow_column_order() {
    let columns = vec![
        ColumnDef::key("lastName").with_header("Last"),
        ColumnDef::key("firstName").with_header("First"),
    ];
    let headers = resolve_headers(&columns, Some(&SortBy::asc("firstName")));
    let ids: Vec<&str> = headers.iter().map(|h| h.id.as_str()).collect();
    assert_eq!(ids, ["lastName", "firstName"]);
    assert_eq!(headers[0].display(), "Last");
}

#[test]
fn test_missing_header_is_none() {
    let headers = resolve_headers(&common::name_columns(), None);
    assert_eq!(headers.len(), 2);
    assert!(headers.iter().all(|h| h.header.is_none()));
    assert!(headers.iter().all(|h| h.display().is_empty()));
}

#[test]
fn test_no_sort_marks_nothing() {
    let headers = resolve_headers(&common::name_columns(), None);
    assert!(headers.iter().all(|h| !h.is_sorted_by()));
}

#[test]
fn test_sorted_column_is_marked() {
    let headers = resolve_headers(&common::name_columns(), Some(&SortBy::desc("lastName")));
    let sorted: Vec<&str> = headers
        .iter()
        .filter(|h| h.is_sorted_by())
        .map(|h| h.id.as_str())
        .collect();
    assert_eq!(sorted, ["lastName"]);
    assert_eq!(headers[1].sort_order, Some(SortDirection::Desc));
}

#[test]
fn test_header_fn_receives_sort_state() {
    let column = ColumnDef::key("lastName").with_header_fn(|cx| {
        let arrow = match cx.sort_order {
            Some(SortDirection::Asc) => " ^",
            Some(SortDirection::Desc) => " v",
            None => "",
        };
        Render::from(format!(
            "{}{} ({})",
            cx.id.unwrap_or("?"),
            arrow,
            cx.is_sorted_by
        ))
    });
    let columns = vec![column];

    let headers = resolve_headers(&columns, Some(&SortBy::asc("lastName")));
    assert_eq!(headers[0].display(), "lastName ^ (true)");

    let headers = resolve_headers(&columns, Some(&SortBy::asc("firstName")));
    assert_eq!(headers[0].display(), "lastName (false)");
}

#[test]
fn test_anonymous_column_uses_index_id() {
    let columns = vec![
        ColumnDef::key("firstName"),
        ColumnDef::computed(|_| Value::Null).with_header("Computed"),
    ];
    let headers = resolve_headers(&columns, None);
    assert_eq!(headers[1].id, "1");
    assert!(!headers[1].is_sorted_by());
}

#[test]
fn test_anonymous_header_id_avoids_declared_ids() {
    let columns = vec![
        ColumnDef::key("a").with_id("1"),
        ColumnDef::computed(|_| Value::Null),
        ColumnDef::key("b").with_id("2'"),
        ColumnDef::computed(|_| Value::Null),
        ColumnDef::key("c").with_id("2"),
    ];
    let headers = resolve_headers(&columns, None);
    let ids: Vec<&str> = headers.iter().map(|h| h.id.as_str()).collect();
    assert_eq!(ids, ["1", "1'", "2'", "3", "2"]);

    let headers = resolve_headers(&columns[..2], Some(&SortBy::asc("1")));
    assert!(headers[0].is_sorted_by());
    assert!(!headers[1].is_sorted_by());
}
