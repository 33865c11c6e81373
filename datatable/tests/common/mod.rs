#![allow(dead_code)]

use std::sync::Arc;

use datatable::{ColumnDef, Record};
use simplelog::{Config, LevelFilter, TestLogger};

pub fn init_logger() {
    let _ = TestLogger::init(LevelFilter::Debug, Config::default());
}

pub fn person(first: &str, last: &str) -> Record {
    Record::new().set("firstName", first).set("lastName", last)
}

/// Reggie Watts, Wendy Watts, Kurt Jones.
pub fn people() -> Vec<Record> {
    vec![
        person("Reggie", "Watts"),
        person("Wendy", "Watts"),
        person("Kurt", "Jones"),
    ]
}

pub fn shared(records: Vec<Record>) -> Vec<Arc<Record>> {
    records.into_iter().map(Arc::new).collect()
}

pub fn name_columns() -> Vec<ColumnDef> {
    vec![ColumnDef::key("firstName"), ColumnDef::key("lastName")]
}

pub fn first_names<'a>(rows: impl IntoIterator<Item = &'a datatable::Row>) -> Vec<String> {
    rows.into_iter()
        .map(|row| row.original.value("firstName").to_string())
        .collect()
}
