// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failures surfaced by the library. Every variant renders as a single
/// human-readable line suitable for a user notification.
#[derive(Debug, Error)]
pub enum Error {
    #[error("User not logged in")]
    Unauthenticated,
    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Local storage error: {0}")]
    Storage(#[from] rusqlite::Error),
    #[error("Malformed payload: {0}")]
    Serde(#[from] serde_json::Error),
}

impl Error {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Error::Validation {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
