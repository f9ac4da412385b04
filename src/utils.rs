// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

const UA: &str = concat!("spendboard/", env!("CARGO_PKG_VERSION"));

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api/";
pub const API_URL_ENV: &str = "SPENDBOARD_API_URL";

pub fn http_client() -> crate::error::Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(15))
        .user_agent(UA)
        .build()?;
    Ok(c)
}

pub fn fmt_money(d: &Decimal) -> String {
    if d.is_sign_negative() && !d.is_zero() {
        format!("-${:.2}", d.abs())
    } else {
        format!("${:.2}", d)
    }
}

pub fn fmt_share(share: Option<Decimal>) -> String {
    share.map(|s| format!("{:.1}%", s)).unwrap_or_else(|| "-".into())
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key=?1",
            params![key],
            |r| r.get(0),
        )
        .optional()
        .with_context(|| format!("Read setting '{}'", key))?;
    Ok(v)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

/// API base URL: environment override first, then the stored setting, then
/// the local default.
pub fn api_url(conn: &Connection) -> Result<String> {
    if let Ok(v) = std::env::var(API_URL_ENV) {
        if !v.trim().is_empty() {
            return Ok(v.trim().to_string());
        }
    }
    Ok(get_setting(conn, "api_url")?.unwrap_or_else(|| DEFAULT_API_URL.to_string()))
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // Arrays stream one element per line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_formats_sign_before_currency() {
        assert_eq!(fmt_money(&Decimal::new(-30050, 2)), "-$300.50");
        assert_eq!(fmt_money(&Decimal::from(500)), "$500.00");
        assert_eq!(fmt_share(None), "-");
        assert_eq!(fmt_share(Some(Decimal::new(714, 1))), "71.4%");
    }
}
