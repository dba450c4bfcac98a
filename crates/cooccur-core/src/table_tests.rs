//! Tests for the tabular input types.

use crate::error::Error;
use crate::table::{RecordTable, Value};

fn three_column_table() -> RecordTable {
    RecordTable::new(vec![
        "product_title".to_string(),
        "order_id".to_string(),
        "product_id".to_string(),
    ])
}

#[test]
fn require_columns_resolves_in_requested_order() {
    let table = three_column_table();
    let indices = table
        .require_columns(&["order_id", "product_id", "product_title"])
        .expect("all columns present");
    assert_eq!(indices, vec![1, 2, 0]);
}

#[test]
fn require_columns_lists_every_missing_name() {
    let table = RecordTable::new(vec!["product_id".to_string()]);
    let err = table
        .require_columns(&["order_id", "product_id", "product_title"])
        .unwrap_err();
    match err {
        Error::Schema { missing } => {
            assert_eq!(missing, vec!["order_id", "product_title"]);
        }
        other => panic!("expected Schema error, got {other:?}"),
    }
}

#[test]
fn push_row_rejects_wrong_arity() {
    let mut table = three_column_table();
    let err = table.push_row(vec![Value::Int(1)]).unwrap_err();
    assert!(matches!(
        err,
        Error::RowShape {
            expected: 3,
            found: 1
        }
    ));
}

#[test]
fn numeric_zero_is_type_sensitive() {
    assert!(Value::Int(0).is_numeric_zero());
    assert!(Value::Float(0.0).is_numeric_zero());
    assert!(!Value::Str("0".to_string()).is_numeric_zero());
    assert!(!Value::Null.is_numeric_zero());
    assert!(!Value::Int(7).is_numeric_zero());
}

#[test]
fn values_compare_strictly_by_variant() {
    assert_ne!(Value::Int(1), Value::Float(1.0));
    assert_ne!(Value::Int(0), Value::Str("0".to_string()));
    assert_eq!(Value::Float(1.5), Value::Float(1.5));
    assert_eq!(Value::Str("a".to_string()), Value::Str("a".to_string()));
    assert_eq!(Value::Null, Value::Null);
}

#[test]
fn value_display_renders_cells() {
    assert_eq!(Value::Int(42).to_string(), "42");
    assert_eq!(Value::Str("Widget".to_string()).to_string(), "Widget");
    assert_eq!(Value::Null.to_string(), "");
}
