// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::loaded_dashboard;
use super::transactions::TransactionRow;
use crate::aggregate::TypeFilter;
use crate::models::Transaction;
use anyhow::{bail, Result};
use rusqlite::Connection;
use serde_json::json;
use std::path::Path;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(conn, sub),
        _ => Ok(()),
    }
}

fn export_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap().trim();
    let filter: TypeFilter = sub.get_one::<String>("type").unwrap().parse()?;

    let dash = loaded_dashboard(conn)?;
    let n = write_export(&dash.filtered(filter), &fmt, Path::new(out))?;
    println!("Exported {} transactions to {}", n, out);
    Ok(())
}

/// Writes the given transactions to `out` as `csv` or `json`; returns the
/// number of records written.
pub fn write_export(transactions: &[&Transaction], fmt: &str, out: &Path) -> Result<usize> {
    match fmt {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "id",
                "date",
                "title",
                "amount",
                "category",
                "type",
                "description",
            ])?;
            for t in transactions {
                let row = TransactionRow::from(*t);
                wtr.write_record([
                    row.id,
                    row.date,
                    row.title,
                    t.amount.to_string(),
                    row.category,
                    row.kind,
                    row.description,
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<_> = transactions
                .iter()
                .map(|t| {
                    json!({
                        "id": t.id, "date": t.date, "title": t.title, "amount": t.amount,
                        "category": t.category, "type": t.transaction_type,
                        "description": t.description
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        other => bail!("Unknown format: {} (use csv|json)", other),
    }
    Ok(transactions.len())
}
