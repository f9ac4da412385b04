// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde_json::Value;
use spendboard::commands::exporter::write_export;
use spendboard::models::{Category, Transaction, TransactionType};
use tempfile::tempdir;

fn snapshot() -> Vec<Transaction> {
    vec![
        Transaction {
            id: Some("a1".into()),
            title: "Corner Shop".into(),
            amount: Decimal::new(1234, 2),
            description: Some("Weekly run, milk".into()),
            date: "2025-01-02".into(),
            category: Category::Groceries,
            transaction_type: TransactionType::Expense,
            owner_id: "u1".into(),
        },
        Transaction {
            id: Some("a2".into()),
            title: "Payroll".into(),
            amount: Decimal::from(3000),
            description: None,
            date: "2025-01-31".into(),
            category: Category::SalaryWages,
            transaction_type: TransactionType::Income,
            owner_id: "u1".into(),
        },
    ]
}

#[test]
fn export_json_writes_one_object_per_transaction() {
    let snap = snapshot();
    let refs: Vec<&Transaction> = snap.iter().collect();
    let dir = tempdir().unwrap();
    let out = dir.path().join("export.json");

    assert_eq!(write_export(&refs, "json", &out).unwrap(), 2);

    let v: Value = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    let items = v.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["title"], "Corner Shop");
    assert_eq!(items[0]["category"], "Groceries");
    assert_eq!(items[1]["type"], "income");
    assert!(items[1]["description"].is_null());
}

#[test]
fn export_csv_quotes_free_text() {
    let snap = snapshot();
    let refs: Vec<&Transaction> = snap.iter().collect();
    let dir = tempdir().unwrap();
    let out = dir.path().join("export.csv");

    write_export(&refs, "csv", &out).unwrap();

    let mut rdr = csv::Reader::from_path(&out).unwrap();
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(&headers[0], "id");
    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][3], "12.34");
    assert_eq!(&rows[0][6], "Weekly run, milk");
    assert_eq!(&rows[1][4], "Salary / Wages");
}

#[test]
fn unknown_format_is_an_error() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("export.xml");
    assert!(write_export(&[], "xml", &out).is_err());
    assert!(!out.exists());
}
