// Pool Stats - Free and Open Source Software Statement
//
// This project, pool-stats, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/pool/mod.rs
// Version: 1.1.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file is the module declaration for the pool-facing side of pool-stats,
// located in the pool subdirectory. It declares submodules and re-exports
// key types for use throughout the project.
//
// Tree Location:
// - src/pool/mod.rs (pool module entry point)
// - Submodules: address, messages, snapshot, source

pub mod address;
pub mod messages;
pub mod snapshot;
pub mod source;

// Re-export key types for convenience
pub use address::{is_path_safe_address, validate_bitcoin_address};
pub use messages::{PoolStatusRecord, RawValue, UserRecord, WorkerRecord, parse_pool_status, parse_user_record};
pub use snapshot::{
    HashrateWindow, IngestReport, PoolHashrates, PoolSnapshot, RejectedUser, UserHashrates, UserSnapshot,
    WorkerSnapshot, ingest_users, worker_display_name,
};
pub use source::{ApiDirectory, SourceBatch};

// Changelog:
// - v1.1.0 (2025-07-03): Pool documents, snapshots and the directory source
//   replace the stratum client and protocol submodules.
// - v1.0.0 (2025-06-14): Extracted from monolithic main.rs.
