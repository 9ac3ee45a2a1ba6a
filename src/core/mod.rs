// Pool Stats - Free and Open Source Software Statement
//
// This project, pool-stats, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/core/mod.rs
// Version: 1.0.1
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file is the module declaration for the core types of pool-stats,
// located in the core subdirectory. It declares submodules and re-exports
// key types for use throughout the project.

pub mod error;
pub mod magnitude;
pub mod types;

// Re-export the most commonly used items
pub use error::MetricsError;
pub use magnitude::{U256, UnitPrefix, magnitude_from_f64, magnitude_to_f64};
pub use types::{Args, DisplayConfig, SuffixScheme, ZeroChangePolicy};

// Changelog:
// - v1.0.1 (2025-07-09): Stopped re-exporting the Magnitude alias.
// - v1.0.0 (2025-07-02): Core now holds magnitudes, errors and configuration.
