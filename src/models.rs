// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The closed set of reporting categories, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Groceries")]
    Groceries,
    #[serde(rename = "Salary / Wages")]
    SalaryWages,
    #[serde(rename = "Rent / Mortgage")]
    RentMortgage,
    #[serde(rename = "Shopping / Clothing")]
    ShoppingClothing,
    #[serde(rename = "Utilities")]
    Utilities,
    #[serde(rename = "Internet / Phone")]
    InternetPhone,
    #[serde(rename = "Transportation")]
    Transportation,
    #[serde(rename = "Maintenance / Repairs")]
    MaintenanceRepairs,
    #[serde(rename = "Medical / Health")]
    MedicalHealth,
    #[serde(rename = "Education / Childcare")]
    EducationChildcare,
    #[serde(rename = "Entertainment / Subscriptions")]
    EntertainmentSubscriptions,
    #[serde(rename = "Hobbies / Leisure")]
    HobbiesLeisure,
    #[serde(rename = "Travel / Vacations")]
    TravelVacations,
    #[serde(rename = "Gifts / Donations")]
    GiftsDonations,
    #[serde(rename = "Office Supplies")]
    OfficeSupplies,
    #[serde(rename = "Training / Courses")]
    TrainingCourses,
    #[serde(rename = "Emergency Fund")]
    EmergencyFund,
    #[serde(rename = "Investments")]
    Investments,
    #[serde(rename = "Retirement Contributions")]
    RetirementContributions,
    #[serde(rename = "Other")]
    Other,
}

impl Category {
    pub const ALL: [Category; 20] = [
        Category::Groceries,
        Category::SalaryWages,
        Category::RentMortgage,
        Category::ShoppingClothing,
        Category::Utilities,
        Category::InternetPhone,
        Category::Transportation,
        Category::MaintenanceRepairs,
        Category::MedicalHealth,
        Category::EducationChildcare,
        Category::EntertainmentSubscriptions,
        Category::HobbiesLeisure,
        Category::TravelVacations,
        Category::GiftsDonations,
        Category::OfficeSupplies,
        Category::TrainingCourses,
        Category::EmergencyFund,
        Category::Investments,
        Category::RetirementContributions,
        Category::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Groceries => "Groceries",
            Category::SalaryWages => "Salary / Wages",
            Category::RentMortgage => "Rent / Mortgage",
            Category::ShoppingClothing => "Shopping / Clothing",
            Category::Utilities => "Utilities",
            Category::InternetPhone => "Internet / Phone",
            Category::Transportation => "Transportation",
            Category::MaintenanceRepairs => "Maintenance / Repairs",
            Category::MedicalHealth => "Medical / Health",
            Category::EducationChildcare => "Education / Childcare",
            Category::EntertainmentSubscriptions => "Entertainment / Subscriptions",
            Category::HobbiesLeisure => "Hobbies / Leisure",
            Category::TravelVacations => "Travel / Vacations",
            Category::GiftsDonations => "Gifts / Donations",
            Category::OfficeSupplies => "Office Supplies",
            Category::TrainingCourses => "Training / Courses",
            Category::EmergencyFund => "Emergency Fund",
            Category::Investments => "Investments",
            Category::RetirementContributions => "Retirement Contributions",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::validation("category", format!("unknown category '{}'", wanted)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(Error::validation(
                "transactionType",
                format!("'{}' is neither income nor expense", other),
            )),
        }
    }
}

/// A single income or expense record as exchanged with the transactions API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub date: String,
    pub category: Category,
    pub transaction_type: TransactionType,
    #[serde(rename = "userId", default)]
    pub owner_id: String,
}

impl Transaction {
    /// Resolves the stored date to a calendar day. Accepts plain `YYYY-MM-DD`
    /// and RFC 3339 timestamps, whose date part is taken as written.
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        let raw = self.date.trim();
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
    }

    /// Identifier when stored, title otherwise.
    pub fn label(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.title)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Editable fields of a transaction, as typed by the user. Nothing reaches
/// the store until [`TransactionDraft::build`] has validated every field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDraft {
    pub id: Option<String>,
    pub title: String,
    pub amount: String,
    pub description: String,
    pub date: String,
    pub category: String,
    pub transaction_type: String,
}

impl Default for TransactionDraft {
    fn default() -> Self {
        TransactionDraft {
            id: None,
            title: String::new(),
            amount: String::new(),
            description: String::new(),
            date: String::new(),
            category: Category::ALL[0].label().to_string(),
            transaction_type: TransactionType::Income.as_str().to_string(),
        }
    }
}

impl TransactionDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an edit draft; the id is kept so the submission becomes an update.
    pub fn from_transaction(t: &Transaction) -> Self {
        TransactionDraft {
            id: t.id.clone(),
            title: t.title.clone(),
            amount: t.amount.to_string(),
            description: t.description.clone().unwrap_or_default(),
            date: t
                .calendar_date()
                .map(|d| d.to_string())
                .unwrap_or_else(|| t.date.clone()),
            category: t.category.label().to_string(),
            transaction_type: t.transaction_type.as_str().to_string(),
        }
    }

    pub fn title(mut self, v: impl Into<String>) -> Self {
        self.title = v.into();
        self
    }

    pub fn amount(mut self, v: impl Into<String>) -> Self {
        self.amount = v.into();
        self
    }

    pub fn description(mut self, v: impl Into<String>) -> Self {
        self.description = v.into();
        self
    }

    pub fn date(mut self, v: impl Into<String>) -> Self {
        self.date = v.into();
        self
    }

    pub fn category(mut self, v: impl Into<String>) -> Self {
        self.category = v.into();
        self
    }

    pub fn transaction_type(mut self, v: impl Into<String>) -> Self {
        self.transaction_type = v.into();
        self
    }

    pub fn build(&self, owner_id: &str) -> Result<Transaction> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(Error::validation("title", "must not be empty"));
        }
        let raw_amount = self.amount.trim();
        let amount = raw_amount
            .parse::<Decimal>()
            .map_err(|_| Error::validation("amount", format!("'{}' is not a number", raw_amount)))?;
        if amount < Decimal::ZERO {
            return Err(Error::validation("amount", "must not be negative"));
        }
        let raw_date = self.date.trim();
        let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d").map_err(|_| {
            Error::validation("date", format!("'{}', expected YYYY-MM-DD", raw_date))
        })?;
        if owner_id.trim().is_empty() {
            return Err(Error::Unauthenticated);
        }
        let description = self.description.trim();
        Ok(Transaction {
            id: self.id.clone(),
            title: title.to_string(),
            amount,
            description: (!description.is_empty()).then(|| description.to_string()),
            date: date.to_string(),
            category: self.category.parse()?,
            transaction_type: self.transaction_type.parse()?,
            owner_id: owner_id.to_string(),
        })
    }
}
