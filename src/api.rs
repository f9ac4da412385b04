// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::{Transaction, User};
use crate::utils::http_client;

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("static email pattern"));

/// Remote collection of a user's transactions.
pub trait TransactionStore {
    fn list(&self, owner_id: &str) -> Result<Vec<Transaction>>;
    fn create(&self, record: &Transaction) -> Result<Transaction>;
    fn update(&self, id: &str, record: &Transaction) -> Result<Transaction>;
    fn delete(&self, id: &str) -> Result<()>;
}

pub trait AuthProvider {
    fn login(&self, credentials: &Credentials) -> Result<LoginResponse>;
    fn register(&self, registration: &Registration) -> Result<RegisterResponse>;
}

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: &str, password: &str) -> Result<Self> {
        Ok(Credentials {
            email: checked_email(email)?,
            password: checked_password(password)?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Registration {
    pub fn new(name: &str, email: &str, password: &str) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::validation("name", "must not be empty"));
        }
        Ok(Registration {
            name: name.to_string(),
            email: checked_email(email)?,
            password: checked_password(password)?,
        })
    }
}

fn checked_email(email: &str) -> Result<String> {
    let email = email.trim();
    if !EMAIL.is_match(email) {
        return Err(Error::validation("email", format!("'{}' is not an email address", email)));
    }
    Ok(email.to_string())
}

fn checked_password(password: &str) -> Result<String> {
    if password.is_empty() {
        return Err(Error::validation("password", "must not be empty"));
    }
    Ok(password.to_string())
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecordEnvelope {
    Wrapped { transaction: Transaction },
    Bare(Transaction),
}

/// Blocking HTTP client for the expense API.
pub struct ApiClient {
    base: Url,
    token: Option<String>,
    http: Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut raw = base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base = Url::parse(&raw)
            .map_err(|e| Error::validation("api_url", format!("'{}': {}", base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(Error::validation("api_url", format!("'{}' cannot be a base URL", base_url)));
        }
        Ok(ApiClient {
            base,
            token: None,
            http: http_client()?,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .map_err(|e| Error::validation("api_url", e.to_string()))
    }

    pub(crate) fn record_url(&self, id: &str) -> Result<Url> {
        let mut url = self.endpoint("transactions")?;
        url.path_segments_mut()
            .map_err(|_| Error::validation("api_url", "cannot be a base URL"))?
            .push(id);
        Ok(url)
    }

    pub(crate) fn list_url(&self, owner_id: &str) -> Result<Url> {
        let mut url = self.endpoint("transactions")?;
        url.query_pairs_mut().append_pair("userId", owner_id);
        Ok(url)
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(t) => req.bearer_auth(t),
            None => req,
        }
    }

    fn send(&self, req: RequestBuilder) -> Result<String> {
        let resp = self.authorized(req).send()?;
        let body = checked(resp)?.text()?;
        Ok(body)
    }
}

fn checked(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().unwrap_or_default();
    let err = api_error(status, &body);
    warn!(status = status.as_u16(), error = %err, "request rejected");
    Err(err)
}

/// Prefers the server's own `message`, falling back to the status line.
pub(crate) fn api_error(status: StatusCode, body: &str) -> Error {
    let message = serde_json::from_str::<ApiMessage>(body)
        .ok()
        .and_then(|m| m.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("Request failed with status {}", status));
    Error::Api {
        status: status.as_u16(),
        message,
    }
}

/// A list response without a `transactions` array is an empty list.
pub(crate) fn decode_list(body: &str) -> Result<Vec<Transaction>> {
    let v: Value = serde_json::from_str(body)?;
    match v.get("transactions") {
        Some(arr @ Value::Array(_)) => Ok(serde_json::from_value(arr.clone())?),
        _ => Ok(Vec::new()),
    }
}

/// Write responses vary between servers; fall back to what was sent when the
/// body carries no record.
pub(crate) fn decode_record(body: &str, sent: &Transaction) -> Transaction {
    match serde_json::from_str::<RecordEnvelope>(body) {
        Ok(RecordEnvelope::Wrapped { transaction }) | Ok(RecordEnvelope::Bare(transaction)) => {
            transaction
        }
        Err(_) => sent.clone(),
    }
}

impl TransactionStore for ApiClient {
    fn list(&self, owner_id: &str) -> Result<Vec<Transaction>> {
        let url = self.list_url(owner_id)?;
        debug!(%url, "listing transactions");
        let body = self.send(self.http.get(url))?;
        decode_list(&body)
    }

    fn create(&self, record: &Transaction) -> Result<Transaction> {
        let url = self.endpoint("transactions")?;
        debug!(%url, title = %record.title, "creating transaction");
        let body = self.send(self.http.post(url).json(record))?;
        Ok(decode_record(&body, record))
    }

    fn update(&self, id: &str, record: &Transaction) -> Result<Transaction> {
        let url = self.record_url(id)?;
        debug!(%url, "updating transaction");
        let body = self.send(self.http.put(url).json(record))?;
        Ok(decode_record(&body, record))
    }

    fn delete(&self, id: &str) -> Result<()> {
        let url = self.record_url(id)?;
        debug!(%url, "deleting transaction");
        self.send(self.http.delete(url))?;
        Ok(())
    }
}

impl AuthProvider for ApiClient {
    fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        let url = self.endpoint("auth/login")?;
        debug!(%url, email = %credentials.email, "logging in");
        let body = self.send(self.http.post(url).json(credentials))?;
        Ok(serde_json::from_str(&body)?)
    }

    fn register(&self, registration: &Registration) -> Result<RegisterResponse> {
        let url = self.endpoint("auth/register")?;
        debug!(%url, email = %registration.email, "registering");
        let body = self.send(self.http.post(url).json(registration))?;
        match serde_json::from_str(&body) {
            Ok(resp) => Ok(resp),
            Err(e) => {
                debug!(error = %e, "register accepted without a readable body");
                Ok(RegisterResponse {
                    message: "Registered".into(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, TransactionType};
    use rust_decimal::Decimal;

    fn record() -> Transaction {
        Transaction {
            id: None,
            title: "Salary".into(),
            amount: Decimal::from(500),
            description: None,
            date: "2024-01-10".into(),
            category: Category::SalaryWages,
            transaction_type: TransactionType::Income,
            owner_id: "u1".into(),
        }
    }

    #[test]
    fn urls_are_built_under_the_base_path() {
        let c = ApiClient::new("http://localhost:5000/api").unwrap();
        assert_eq!(
            c.list_url("u 1").unwrap().as_str(),
            "http://localhost:5000/api/transactions?userId=u+1"
        );
        assert_eq!(
            c.record_url("64ab").unwrap().as_str(),
            "http://localhost:5000/api/transactions/64ab"
        );
        assert_eq!(
            c.endpoint("auth/login").unwrap().as_str(),
            "http://localhost:5000/api/auth/login"
        );
    }

    #[test]
    fn bad_base_url_is_a_validation_error() {
        assert!(matches!(
            ApiClient::new("not a url"),
            Err(Error::Validation { field: "api_url", .. })
        ));
    }

    #[test]
    fn api_error_prefers_server_message() {
        let e = api_error(StatusCode::BAD_REQUEST, r#"{"message":"Amount is required"}"#);
        assert_eq!(e.to_string(), "Amount is required");
        let e = api_error(StatusCode::BAD_GATEWAY, "<html>");
        assert!(e.to_string().contains("502"), "{e}");
    }

    #[test]
    fn list_without_array_is_empty() {
        assert!(decode_list(r#"{"message":"none"}"#).unwrap().is_empty());
        assert!(decode_list(r#"{"transactions":null}"#).unwrap().is_empty());
        let items = decode_list(
            r#"{"transactions":[{"_id":"a1","title":"Bread","amount":"3.5","date":"2024-02-01",
                "category":"Groceries","transactionType":"expense","userId":"u1"}]}"#,
        )
        .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].amount, Decimal::new(35, 1));
    }

    #[test]
    fn write_response_accepts_wrapped_bare_or_empty_bodies() {
        let sent = record();
        let wrapped = r#"{"message":"ok","transaction":{"_id":"n1","title":"Salary","amount":500,
            "date":"2024-01-10","category":"Salary / Wages","transactionType":"income","userId":"u1"}}"#;
        assert_eq!(decode_record(wrapped, &sent).id.as_deref(), Some("n1"));
        assert_eq!(decode_record("", &sent), sent);
    }

    #[test]
    fn records_serialize_with_wire_names() {
        let v = serde_json::to_value(record()).unwrap();
        assert_eq!(v["transactionType"], "income");
        assert_eq!(v["userId"], "u1");
        assert_eq!(v["category"], "Salary / Wages");
        assert_eq!(v["amount"], 500.0);
        assert!(v.get("_id").is_none());
    }

    #[test]
    fn credentials_reject_malformed_email() {
        assert!(Credentials::new("someone", "pw").is_err());
        assert!(Credentials::new(" a@b.io ", "").is_err());
        assert_eq!(Credentials::new(" a@b.io ", "pw").unwrap().email, "a@b.io");
        assert!(Registration::new("  ", "a@b.io", "pw").is_err());
    }
}
