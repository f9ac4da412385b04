// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::api::LoginResponse;
use crate::error::Result;
use crate::models::User;

/// The signed-in user and their API token. Begins on login, ends on logout;
/// transaction actions require one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

impl Session {
    pub fn owner_id(&self) -> &str {
        &self.user.id
    }

    /// Starts a session from a successful login and caches it, replacing any
    /// previous one.
    pub fn begin(conn: &Connection, login: LoginResponse) -> Result<Session> {
        let session = Session {
            token: login.token,
            user: login.user,
        };
        conn.execute(
            "INSERT INTO session(id, token, user_id, name, email) VALUES (1, ?1, ?2, ?3, ?4)
             ON CONFLICT(id) DO UPDATE SET token=excluded.token, user_id=excluded.user_id,
                 name=excluded.name, email=excluded.email, started_at=datetime('now')",
            params![
                session.token,
                session.user.id,
                session.user.name,
                session.user.email
            ],
        )?;
        info!(user = %session.user.id, "session started");
        Ok(session)
    }

    pub fn load(conn: &Connection) -> Result<Option<Session>> {
        let s = conn
            .query_row(
                "SELECT token, user_id, name, email FROM session WHERE id=1",
                [],
                |r| {
                    Ok(Session {
                        token: r.get(0)?,
                        user: User {
                            id: r.get(1)?,
                            name: r.get(2)?,
                            email: r.get(3)?,
                        },
                    })
                },
            )
            .optional()?;
        debug!(present = s.is_some(), "session cache read");
        Ok(s)
    }

    /// Drops the cached session. Returns whether one existed.
    pub fn end(conn: &Connection) -> Result<bool> {
        let n = conn.execute("DELETE FROM session", [])?;
        if n > 0 {
            info!("session ended");
        }
        Ok(n > 0)
    }
}
