// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod auth;
pub mod config;
pub mod doctor;
pub mod exporter;
pub mod reports;
pub mod transactions;

use anyhow::{Context, Result};
use rusqlite::Connection;

use crate::api::ApiClient;
use crate::dashboard::Dashboard;
use crate::session::Session;
use crate::utils::api_url;

pub fn api_client(conn: &Connection) -> Result<ApiClient> {
    let url = api_url(conn)?;
    let client = ApiClient::new(&url).with_context(|| format!("Configure API at {}", url))?;
    Ok(client)
}

/// Dashboard bound to the configured API and the cached session, if any.
pub fn open_dashboard(conn: &Connection) -> Result<Dashboard<ApiClient>> {
    let session = Session::load(conn)?;
    let mut client = api_client(conn)?;
    if let Some(s) = &session {
        client = client.with_token(s.token.clone());
    }
    Ok(Dashboard::new(client, session))
}

pub fn loaded_dashboard(conn: &Connection) -> Result<Dashboard<ApiClient>> {
    let mut dash = open_dashboard(conn)?;
    dash.load().context("Failed to load transactions")?;
    Ok(dash)
}
