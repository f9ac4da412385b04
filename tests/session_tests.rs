// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;
use spendboard::api::LoginResponse;
use spendboard::models::User;
use spendboard::session::Session;
use spendboard::{db, utils};

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn login_as(id: &str, token: &str) -> LoginResponse {
    LoginResponse {
        token: token.into(),
        user: User {
            id: id.into(),
            name: "Grace".into(),
            email: format!("{}@example.com", id),
        },
        message: "Login successful".into(),
    }
}

#[test]
fn session_survives_reopen_and_ends_on_logout() {
    let conn = setup();
    assert!(Session::load(&conn).unwrap().is_none());

    let started = Session::begin(&conn, login_as("u7", "tok-1")).unwrap();
    let cached = Session::load(&conn).unwrap().unwrap();
    assert_eq!(cached, started);
    assert_eq!(cached.owner_id(), "u7");

    assert!(Session::end(&conn).unwrap());
    assert!(Session::load(&conn).unwrap().is_none());
    assert!(!Session::end(&conn).unwrap());
}

#[test]
fn new_login_replaces_previous_session() {
    let conn = setup();
    Session::begin(&conn, login_as("u1", "old")).unwrap();
    Session::begin(&conn, login_as("u2", "new")).unwrap();

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM session", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 1);
    let s = Session::load(&conn).unwrap().unwrap();
    assert_eq!(s.token, "new");
    assert_eq!(s.user.email, "u2@example.com");
}

#[test]
fn login_payload_decodes_user_identity() {
    let resp: LoginResponse = serde_json::from_str(
        r#"{"message":"Welcome back","token":"jwt.abc","user":{"_id":"65f0","name":"Lin","email":"lin@example.com","createdAt":"2024-01-01"}}"#,
    )
    .unwrap();
    assert_eq!(resp.user.id, "65f0");
    assert_eq!(resp.message, "Welcome back");
}

#[test]
fn api_url_setting_round_trips() {
    let conn = setup();
    assert_eq!(utils::api_url(&conn).unwrap(), utils::DEFAULT_API_URL);
    utils::set_setting(&conn, "api_url", "https://expenses.example.com/api/").unwrap();
    utils::set_setting(&conn, "api_url", "https://expenses.example.org/api/").unwrap();
    assert_eq!(
        utils::api_url(&conn).unwrap(),
        "https://expenses.example.org/api/"
    );
}
