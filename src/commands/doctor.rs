// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::loaded_dashboard;
use crate::models::Transaction;
use crate::utils::pretty_table;
use anyhow::Result;
use rust_decimal::Decimal;
use rusqlite::Connection;

pub fn handle(conn: &Connection) -> Result<()> {
    let dash = loaded_dashboard(conn)?;
    let owner = dash
        .session()
        .map(|s| s.owner_id().to_string())
        .unwrap_or_default();
    let rows = find_issues(dash.snapshot(), &owner);

    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

/// Records the server returned that break the local invariants.
pub fn find_issues(snapshot: &[Transaction], owner_id: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    for t in snapshot {
        if t.id.is_none() {
            rows.push(vec!["missing_id".into(), t.title.clone()]);
        }
        if t.calendar_date().is_none() {
            rows.push(vec!["bad_date".into(), format!("{} '{}'", t.label(), t.date)]);
        }
        if t.amount < Decimal::ZERO {
            rows.push(vec!["negative_amount".into(), format!("{} {}", t.label(), t.amount)]);
        }
        if t.title.trim().is_empty() {
            rows.push(vec!["empty_title".into(), t.label().to_string()]);
        }
        if t.owner_id != owner_id {
            rows.push(vec![
                "foreign_owner".into(),
                format!("{} owned by '{}'", t.label(), t.owner_id),
            ]);
        }
    }
    rows
}
