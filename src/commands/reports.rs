// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::loaded_dashboard;
use crate::aggregate::{breakdown_total, share_percent, CategoryTotal, DashboardView};
use crate::utils::{fmt_money, fmt_share, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let Some((name, sub)) = m.subcommand() else {
        return Ok(());
    };
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let dash = loaded_dashboard(conn)?;
    let view = dash.view();
    match name {
        "summary" => {
            if !maybe_print_json(json_flag, jsonl_flag, view)? {
                println!("{}", view.status.message());
                println!(
                    "{}",
                    pretty_table(
                        &["Total Income", "Total Expense", "Balance", "Total Transactions"],
                        vec![summary_row(view)],
                    )
                );
            }
        }
        "monthly" => {
            if !maybe_print_json(json_flag, jsonl_flag, &view.monthly)? {
                println!(
                    "{}",
                    pretty_table(&["Month", "Income", "Expense"], monthly_rows(view))
                );
                if !view.monthly.undated.is_empty() {
                    println!(
                        "Left out (unreadable date): {}",
                        view.monthly.undated.join(", ")
                    );
                }
            }
        }
        "categories" => {
            if !maybe_print_json(json_flag, jsonl_flag, &view.categories)? {
                let values = sub.get_flag("values");
                // Empty sides are not shown at all
                for (title, items) in [
                    ("Income by Category", &view.categories.income),
                    ("Expense by Category", &view.categories.expense),
                ] {
                    if items.is_empty() {
                        continue;
                    }
                    println!("{}", title);
                    println!(
                        "{}",
                        pretty_table(&["Category", "Share"], category_rows(items, values))
                    );
                }
            }
        }
        "distribution" => {
            if !maybe_print_json(json_flag, jsonl_flag, &view.distribution)? {
                let rows = if sub.get_flag("values") {
                    vec![
                        vec!["Income".into(), fmt_money(&view.totals.total_income)],
                        vec!["Expense".into(), fmt_money(&view.totals.total_expense)],
                    ]
                } else {
                    vec![
                        vec!["Income".into(), fmt_share(view.distribution.income_share)],
                        vec!["Expense".into(), fmt_share(view.distribution.expense_share)],
                    ]
                };
                println!("{}", pretty_table(&["Type", "Share"], rows));
            }
        }
        _ => {}
    }
    Ok(())
}

pub fn summary_row(view: &DashboardView) -> Vec<String> {
    vec![
        fmt_money(&view.totals.total_income),
        fmt_money(&view.totals.total_expense),
        fmt_money(&view.totals.balance),
        view.totals.count.to_string(),
    ]
}

pub fn monthly_rows(view: &DashboardView) -> Vec<Vec<String>> {
    view.monthly
        .rows()
        .map(|(label, inc, exp)| vec![label.to_string(), fmt_money(&inc), fmt_money(&exp)])
        .collect()
}

/// One row per category: its percentage of the side's total, or the raw
/// amount when `values` is set.
pub fn category_rows(items: &[CategoryTotal], values: bool) -> Vec<Vec<String>> {
    let whole = breakdown_total(items);
    items
        .iter()
        .map(|c| {
            let shown = if values {
                fmt_money(&c.total)
            } else {
                fmt_share(share_percent(c.total, whole))
            };
            vec![c.category.label().to_string(), shown]
        })
        .collect()
}
