// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{loaded_dashboard, open_dashboard};
use crate::aggregate::TypeFilter;
use crate::dashboard::Applied;
use crate::models::{Category, Transaction, TransactionDraft};
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::{Context, Result};
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(conn, sub)?,
        Some(("add", sub)) => add(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => remove(conn, sub)?,
        Some(("categories", _)) => categories(),
        _ => {}
    }
    Ok(())
}

/// Overlays whichever draft fields were given on the command line.
pub fn draft_from_matches(sub: &clap::ArgMatches, base: TransactionDraft) -> TransactionDraft {
    let mut draft = base;
    let get = |name: &str| sub.get_one::<String>(name).map(|s| s.trim().to_string());
    if let Some(v) = get("title") {
        draft = draft.title(v);
    }
    if let Some(v) = get("amount") {
        draft = draft.amount(v);
    }
    if let Some(v) = get("date") {
        draft = draft.date(v);
    }
    if let Some(v) = get("category") {
        draft = draft.category(v);
    }
    if let Some(v) = get("kind") {
        draft = draft.transaction_type(v);
    }
    if let Some(v) = get("description") {
        draft = draft.description(v);
    }
    draft
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let draft = draft_from_matches(sub, TransactionDraft::new());
    let mut dash = open_dashboard(conn)?;
    let applied = dash.submit(&draft).context("Error occurred")?;
    report_applied(&applied, None);
    if applied.reload_error.is_none() {
        println!("{} transactions loaded.", dash.snapshot().len());
    }
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().trim();
    let mut dash = loaded_dashboard(conn)?;
    let existing = dash
        .find(id)
        .with_context(|| format!("Transaction '{}' not found", id))?;
    let draft = draft_from_matches(sub, TransactionDraft::from_transaction(existing));
    let applied = dash.submit(&draft).context("Error occurred")?;
    report_applied(&applied, None);
    Ok(())
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().trim();
    let mut dash = loaded_dashboard(conn)?;
    let Some(target) = dash.find(id).cloned() else {
        println!("No transaction with id '{}'; nothing deleted.", id);
        return Ok(());
    };
    match dash.delete(&target).context("Failed to delete")? {
        Some(applied) => report_applied(&applied, Some(&target.title)),
        None => println!("Nothing to delete"),
    }
    Ok(())
}

/// The write stands even when the reload after it failed.
fn report_applied(applied: &Applied, subject: Option<&str>) {
    match subject {
        Some(s) => println!("{} ({})", applied.notice, s),
        None => println!("{}", applied.notice),
    }
    if let Some(e) = &applied.reload_error {
        eprintln!("Failed to load transactions: {}", e);
    }
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let filter: TypeFilter = sub.get_one::<String>("type").unwrap().parse()?;
    let dash = loaded_dashboard(conn)?;
    let data: Vec<TransactionRow> = dash
        .filtered(filter)
        .into_iter()
        .map(TransactionRow::from)
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        if data.is_empty() {
            println!("No transactions found.");
            return Ok(());
        }
        let rows: Vec<Vec<String>> = data
            .into_iter()
            .map(|r| vec![r.id, r.title, r.amount, r.date, r.category, r.kind])
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Title", "Amount", "Date", "Category", "Type"], rows)
        );
    }
    Ok(())
}

fn categories() {
    let rows = Category::ALL
        .iter()
        .enumerate()
        .map(|(i, c)| vec![(i + 1).to_string(), c.label().to_string()])
        .collect();
    println!("{}", pretty_table(&["#", "Category"], rows));
}

#[derive(Debug, Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub title: String,
    pub amount: String,
    pub date: String,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
}

impl From<&Transaction> for TransactionRow {
    fn from(t: &Transaction) -> Self {
        TransactionRow {
            id: t.id.clone().unwrap_or_default(),
            title: t.title.clone(),
            amount: fmt_money(&t.amount),
            date: t
                .calendar_date()
                .map(|d| d.to_string())
                .unwrap_or_else(|| t.date.clone()),
            category: t.category.label().to_string(),
            kind: t.transaction_type.as_str().to_string(),
            description: t.description.clone().unwrap_or_default(),
        }
    }
}
