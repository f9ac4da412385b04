// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::ApiClient;
use crate::db::db_path;
use crate::session::Session;
use crate::utils::{api_url, pretty_table, set_setting, API_URL_ENV};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set-api", sub)) => {
            let url = sub.get_one::<String>("URL").unwrap().trim();
            // Reject anything the client could not use later
            let client = ApiClient::new(url)?;
            set_setting(conn, "api_url", client.base_url().as_str())?;
            println!("API base URL set to {}", client.base_url());
        }
        Some(("show", _)) => show(conn)?,
        _ => {}
    }
    Ok(())
}

fn show(conn: &Connection) -> Result<()> {
    let overridden = std::env::var(API_URL_ENV).is_ok();
    let session = Session::load(conn)?
        .map(|s| format!("{} <{}>", s.user.name, s.user.email))
        .unwrap_or_else(|| "(none)".into());
    let rows = vec![
        vec!["database".into(), db_path()?.display().to_string()],
        vec![
            "api_url".into(),
            if overridden {
                format!("{} (from {})", api_url(conn)?, API_URL_ENV)
            } else {
                api_url(conn)?
            },
        ],
        vec!["session".into(), session],
    ];
    println!("{}", pretty_table(&["Setting", "Value"], rows));
    Ok(())
}
