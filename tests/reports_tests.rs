// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use spendboard::aggregate::DashboardView;
use spendboard::commands::{doctor, reports};
use spendboard::models::{Category, Transaction, TransactionType};

fn tx(id: &str, amount: i64, kind: TransactionType, category: Category) -> Transaction {
    Transaction {
        id: Some(id.into()),
        title: id.to_uppercase(),
        amount: Decimal::from(amount),
        description: None,
        date: "2024-07-01".into(),
        category,
        transaction_type: kind,
        owner_id: "u1".into(),
    }
}

#[test]
fn summary_row_matches_cards() {
    let view = DashboardView::compute(&[
        tx("a", 500, TransactionType::Income, Category::SalaryWages),
        tx("b", 800, TransactionType::Expense, Category::RentMortgage),
    ]);
    assert_eq!(
        reports::summary_row(&view),
        vec!["$500.00", "$800.00", "-$300.00", "2"]
    );
}

#[test]
fn category_rows_toggle_between_share_and_value() {
    let view = DashboardView::compute(&[
        tx("a", 30, TransactionType::Expense, Category::Groceries),
        tx("b", 60, TransactionType::Expense, Category::Utilities),
        tx("c", 10, TransactionType::Expense, Category::Groceries),
        tx("d", 0, TransactionType::Expense, Category::Other),
    ]);
    let shares = reports::category_rows(&view.categories.expense, false);
    assert_eq!(
        shares,
        vec![vec!["Groceries", "40.0%"], vec!["Utilities", "60.0%"]]
    );
    let values = reports::category_rows(&view.categories.expense, true);
    assert_eq!(values[0], vec!["Groceries", "$40.00"]);
}

#[test]
fn monthly_rows_cover_the_whole_year() {
    let view = DashboardView::compute(&[tx("a", 5, TransactionType::Income, Category::Other)]);
    let rows = reports::monthly_rows(&view);
    assert_eq!(rows.len(), 12);
    assert_eq!(rows[6], vec!["Jul", "$5.00", "$0.00"]);
}

#[test]
fn doctor_flags_records_breaking_invariants() {
    let mut bad_date = tx("a", 5, TransactionType::Income, Category::Other);
    bad_date.date = "someday".into();
    let mut negative = tx("b", -5, TransactionType::Expense, Category::Other);
    negative.owner_id = "u2".into();
    let fine = tx("c", 5, TransactionType::Expense, Category::Other);

    let issues = doctor::find_issues(&[bad_date, negative, fine], "u1");
    let kinds: Vec<&str> = issues.iter().map(|r| r[0].as_str()).collect();
    assert_eq!(kinds, vec!["bad_date", "negative_amount", "foreign_owner"]);
}
