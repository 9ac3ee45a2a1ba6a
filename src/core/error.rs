// Pool Stats - Free and Open Source Software Statement
//
// This project, pool-stats, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/core/error.rs
// Version: 1.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file defines the error type shared by the metrics core, the upstream
// record conversion, and the snapshot source.
//
// Tree Location:
// - src/core/error.rs (library error type)
// - Depends on: thiserror, serde_json

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetricsError {
    #[error("Cannot parse magnitude {input:?}: {reason}")]
    Parse { input: String, reason: String },

    #[error("Invalid value in field {field}")]
    InvalidRecord {
        field: &'static str,
        #[source]
        source: Box<MetricsError>,
    },

    #[error("Invalid Bitcoin address {address:?}")]
    InvalidAddress { address: String },

    #[error("IO operation failed on {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode JSON document")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

impl MetricsError {
    pub(crate) fn parse(input: &str, reason: impl Into<String>) -> Self {
        MetricsError::Parse {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn in_field(self, field: &'static str) -> Self {
        MetricsError::InvalidRecord {
            field,
            source: Box::new(self),
        }
    }
}

// Changelog:
// - v1.0.0 (2025-07-02): Initial error type, modelled on the status file errors.
