// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use rusqlite::Connection;

use super::api_client;
use crate::api::{AuthProvider, Credentials, Registration};
use crate::session::Session;
use crate::utils::pretty_table;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("login", sub)) => login(conn, sub)?,
        Some(("register", sub)) => register(conn, sub)?,
        Some(("logout", _)) => logout(conn)?,
        Some(("whoami", _)) => whoami(conn)?,
        _ => {}
    }
    Ok(())
}

fn login(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let credentials = Credentials::new(
        sub.get_one::<String>("email").unwrap(),
        sub.get_one::<String>("password").unwrap(),
    )?;
    let client = api_client(conn)?;
    let resp = client.login(&credentials).context("Login failed")?;
    let message = if resp.message.is_empty() {
        "Logged in".to_string()
    } else {
        resp.message.clone()
    };
    let session = Session::begin(conn, resp)?;
    println!("{} ({})", message, session.user.email);
    Ok(())
}

fn register(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let registration = Registration::new(
        sub.get_one::<String>("name").unwrap(),
        sub.get_one::<String>("email").unwrap(),
        sub.get_one::<String>("password").unwrap(),
    )?;
    let client = api_client(conn)?;
    let resp = client
        .register(&registration)
        .context("Registration failed")?;
    println!("{}", resp.message);
    println!("Sign in with `spendboard auth login`.");
    Ok(())
}

fn logout(conn: &Connection) -> Result<()> {
    if Session::end(conn)? {
        println!("Logged out");
    } else {
        println!("No active session");
    }
    Ok(())
}

fn whoami(conn: &Connection) -> Result<()> {
    match Session::load(conn)? {
        Some(s) => println!(
            "{}",
            pretty_table(
                &["User", "Name", "Email"],
                vec![vec![s.user.id, s.user.name, s.user.email]],
            )
        ),
        None => println!("Not logged in"),
    }
    Ok(())
}
