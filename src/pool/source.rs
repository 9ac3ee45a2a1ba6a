// Pool Stats - Free and Open Source Software Statement
//
// This project, pool-stats, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/pool/source.rs
// Version: 1.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file reads pool documents from a directory laid out like the pool's
// HTTP API: pool/pool.status and users/<address>. The pool writes these files
// itself, and a mirror of the HTTP API can be dropped in the same shape.
//
// Tree Location:
// - src/pool/source.rs (snapshot source)
// - Depends on: tokio, pool::{messages, snapshot, address}, log

use crate::Result;
use crate::core::error::MetricsError;
use crate::pool::address::is_path_safe_address;
use crate::pool::messages::parse_pool_status;
use crate::pool::snapshot::{IngestReport, PoolSnapshot, ingest_users};
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use tokio::fs;

const LOG_TARGET: &str = "pool_stats::pool::source";

/// Everything read in one pass over the directory
#[derive(Debug)]
pub struct SourceBatch {
    pub captured_at: DateTime<Utc>,
    pub pool: Option<PoolSnapshot>,
    pub users: IngestReport,
}

/// Pool API documents on disk
#[derive(Debug, Clone)]
pub struct ApiDirectory {
    root: PathBuf,
}

impl ApiDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn pool_status_path(&self) -> PathBuf {
        self.root.join("pool").join("pool.status")
    }

    pub fn users_dir(&self) -> PathBuf {
        self.root.join("users")
    }

    /// Path of a user document; `None` unless the address is plain alphanumerics
    pub fn user_path(&self, address: &str) -> Option<PathBuf> {
        is_path_safe_address(address).then(|| self.users_dir().join(address))
    }

    async fn read(path: &Path) -> std::result::Result<String, MetricsError> {
        fs::read_to_string(path).await.map_err(|source| MetricsError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub async fn read_pool(&self, captured_at: DateTime<Utc>) -> std::result::Result<PoolSnapshot, MetricsError> {
        let text = Self::read(&self.pool_status_path()).await?;
        let record = parse_pool_status(&text)?;
        PoolSnapshot::from_record(&record, captured_at)
    }

    /// Addresses with a document under users/, sorted
    pub async fn list_users(&self) -> Result<Vec<String>> {
        let users_dir = self.users_dir();
        let mut entries = match fs::read_dir(&users_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(MetricsError::Io {
                    path: users_dir,
                    source,
                }
                .into());
            }
        };

        let mut addresses = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                addresses.push(name.to_string());
            }
        }
        addresses.sort();
        Ok(addresses)
    }

    /// Read the pool status and every user document.
    ///
    /// A missing or malformed pool status leaves `pool` empty; unreadable
    /// user documents are reported as rejected.
    pub async fn fetch(&self, captured_at: DateTime<Utc>) -> SourceBatch {
        let pool = match self.read_pool(captured_at).await {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!(target: LOG_TARGET, "⚠️ Pool status unavailable: {}", e);
                None
            }
        };

        let addresses = match self.list_users().await {
            Ok(addresses) => addresses,
            Err(e) => {
                warn!(target: LOG_TARGET, "⚠️ Cannot list users in {:?}: {}", self.users_dir(), e);
                Vec::new()
            }
        };

        let mut documents = Vec::with_capacity(addresses.len());
        let mut unreadable = IngestReport::default();
        for address in addresses {
            let Some(path) = self.user_path(&address) else {
                unreadable.reject(
                    &address,
                    &MetricsError::InvalidAddress {
                        address: address.clone(),
                    },
                );
                continue;
            };
            match Self::read(&path).await {
                Ok(body) => documents.push((address, body)),
                Err(e) => unreadable.reject(&address, &e),
            }
        }

        let mut users = ingest_users(documents, captured_at);
        users.rejected.extend(unreadable.rejected);

        info!(
            target: LOG_TARGET,
            "📥 Loaded {} from {:?}: {} users, {} rejected",
            if pool.is_some() { "pool status" } else { "no pool status" },
            self.root,
            users.accepted.len(),
            users.rejected.len()
        );
        debug!(target: LOG_TARGET, "Capture time {}", captured_at);

        SourceBatch {
            captured_at,
            pool,
            users,
        }
    }
}

// Changelog:
// - v1.0.0 (2025-07-03): Initial directory source, replacing the pool TCP
//   client.
