// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived dashboard views. Everything here is a pure function of a
//! transaction snapshot: no I/O, and input order never changes a result.

use std::str::FromStr;

use chrono::Datelike;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use tracing::warn;

use crate::error::{Error, Result};
use crate::models::{Category, Transaction, TransactionType};

pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const STRONG_BALANCE: i64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Totals {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
    pub count: usize,
}

pub fn compute_totals(transactions: &[Transaction]) -> Totals {
    let mut totals = Totals::default();
    for t in transactions {
        match t.transaction_type {
            TransactionType::Income => totals.total_income += t.amount,
            TransactionType::Expense => totals.total_expense += t.amount,
        }
    }
    totals.balance = totals.total_income - totals.total_expense;
    totals.count = transactions.len();
    totals
}

/// Income and expense per calendar month, January first. Years are folded
/// together: March 2023 and March 2024 share a bucket.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct MonthlySeries {
    pub income: [Decimal; 12],
    pub expense: [Decimal; 12],
    /// Transactions left out because their date could not be resolved.
    pub undated: Vec<String>,
}

impl MonthlySeries {
    pub fn rows(&self) -> impl Iterator<Item = (&'static str, Decimal, Decimal)> + '_ {
        MONTH_LABELS
            .iter()
            .enumerate()
            .map(|(i, label)| (*label, self.income[i], self.expense[i]))
    }
}

pub fn compute_monthly_series(transactions: &[Transaction]) -> MonthlySeries {
    let mut series = MonthlySeries::default();
    for t in transactions {
        let Some(date) = t.calendar_date() else {
            warn!(transaction = t.label(), date = %t.date, "unresolvable date, left out of monthly series");
            series.undated.push(t.label().to_string());
            continue;
        };
        let month = date.month0() as usize;
        match t.transaction_type {
            TransactionType::Income => series.income[month] += t.amount,
            TransactionType::Expense => series.expense[month] += t.amount,
        }
    }
    series
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CategoryBreakdown {
    pub income: Vec<CategoryTotal>,
    pub expense: Vec<CategoryTotal>,
}

/// Per-category totals for each transaction type. Only categories with a
/// strictly positive total are kept, in the order of `categories`.
pub fn compute_category_breakdown(
    transactions: &[Transaction],
    categories: &[Category],
) -> CategoryBreakdown {
    let mut income = vec![Decimal::ZERO; categories.len()];
    let mut expense = vec![Decimal::ZERO; categories.len()];
    for t in transactions {
        let Some(idx) = categories.iter().position(|c| *c == t.category) else {
            continue;
        };
        match t.transaction_type {
            TransactionType::Income => income[idx] += t.amount,
            TransactionType::Expense => expense[idx] += t.amount,
        }
    }
    let positive = |sums: Vec<Decimal>| -> Vec<CategoryTotal> {
        categories
            .iter()
            .zip(sums)
            .filter(|(_, total)| *total > Decimal::ZERO)
            .map(|(category, total)| CategoryTotal {
                category: *category,
                total,
            })
            .collect()
    };
    CategoryBreakdown {
        income: positive(income),
        expense: positive(expense),
    }
}

pub fn breakdown_total(items: &[CategoryTotal]) -> Decimal {
    items.iter().map(|c| c.total).sum()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    Strong,
    Positive,
    BreakEven,
    Overspending,
}

impl Status {
    pub fn message(self) -> &'static str {
        match self {
            Status::Strong => "Great job! You're saving well",
            Status::Positive => "You're doing good! Keep tracking",
            Status::BreakEven => "Break-even. Plan better!",
            Status::Overspending => "Uh-oh! Overspending. Time to save",
        }
    }
}

pub fn classify_status(balance: Decimal) -> Status {
    if balance > Decimal::from(STRONG_BALANCE) {
        Status::Strong
    } else if balance > Decimal::ZERO {
        Status::Positive
    } else if balance.is_zero() {
        Status::BreakEven
    } else {
        Status::Overspending
    }
}

/// `part` as a percentage of `whole`, one decimal place, halves rounded away
/// from zero. `None` when there is nothing to divide by.
pub fn share_percent(part: Decimal, whole: Decimal) -> Option<Decimal> {
    if whole.is_zero() {
        return None;
    }
    Some(
        (part * Decimal::ONE_HUNDRED / whole)
            .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero),
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TypeDistribution {
    pub income_share: Option<Decimal>,
    pub expense_share: Option<Decimal>,
}

pub fn type_distribution(totals: &Totals) -> TypeDistribution {
    let turnover = totals.total_income + totals.total_expense;
    TypeDistribution {
        income_share: share_percent(totals.total_income, turnover),
        expense_share: share_percent(totals.total_expense, turnover),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum TypeFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl TypeFilter {
    pub fn matches(self, t: &Transaction) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Income => t.transaction_type == TransactionType::Income,
            TypeFilter::Expense => t.transaction_type == TransactionType::Expense,
        }
    }
}

impl FromStr for TypeFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(TypeFilter::All),
            "income" => Ok(TypeFilter::Income),
            "expense" => Ok(TypeFilter::Expense),
            other => Err(Error::validation(
                "filter",
                format!("'{}', expected all|income|expense", other),
            )),
        }
    }
}

pub fn filter_by_type(transactions: &[Transaction], filter: TypeFilter) -> Vec<&Transaction> {
    transactions.iter().filter(|t| filter.matches(t)).collect()
}

/// Every derived view of one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub totals: Totals,
    pub monthly: MonthlySeries,
    pub categories: CategoryBreakdown,
    pub distribution: TypeDistribution,
    pub status: Status,
}

impl DashboardView {
    pub fn compute(transactions: &[Transaction]) -> Self {
        let totals = compute_totals(transactions);
        DashboardView {
            monthly: compute_monthly_series(transactions),
            categories: compute_category_breakdown(transactions, &Category::ALL),
            distribution: type_distribution(&totals),
            status: classify_status(totals.balance),
            totals,
        }
    }
}

impl Default for DashboardView {
    fn default() -> Self {
        DashboardView::compute(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_percent_rounds_half_away_from_zero() {
        // 6.25% -> 6.3
        assert_eq!(
            share_percent(Decimal::ONE, Decimal::from(16)),
            Some(Decimal::new(63, 1))
        );
        assert_eq!(
            share_percent(Decimal::ONE, Decimal::from(3)),
            Some(Decimal::new(333, 1))
        );
        assert_eq!(share_percent(Decimal::ONE, Decimal::ZERO), None);
    }

    #[test]
    fn empty_view_is_break_even() {
        let v = DashboardView::default();
        assert_eq!(v.status, Status::BreakEven);
        assert!(v.categories.income.is_empty());
        assert_eq!(v.distribution, TypeDistribution::default());
    }

    #[test]
    fn type_filter_parses_table_options() {
        assert_eq!("ALL".parse::<TypeFilter>().unwrap(), TypeFilter::All);
        assert_eq!(" expense".parse::<TypeFilter>().unwrap(), TypeFilter::Expense);
        assert!("transfers".parse::<TypeFilter>().is_err());
    }
}
