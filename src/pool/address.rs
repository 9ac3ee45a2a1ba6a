// Pool Stats - Free and Open Source Software Statement
//
// This project, pool-stats, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/pool/address.rs
// Version: 1.1.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file validates the Bitcoin payout addresses users are keyed by.
// Decoding and checksums are delegated to the bitcoin crate; this module
// restricts which address kinds and networks the pool accepts.
//
// Tree Location:
// - src/pool/address.rs (address validation)
// - Depends on: bitcoin, log

use bitcoin::address::NetworkUnchecked;
use bitcoin::{Address, Network};
use log::debug;

const LOG_TARGET: &str = "pool_stats::pool::address";

/// P2PKH, P2SH, segwit v0 and taproot, on mainnet or testnet
const ADDRESS_PREFIXES: [&str; 6] = ["1", "3", "bc1q", "tb1q", "bc1p", "tb1p"];
const ACCEPTED_NETWORKS: [Network; 2] = [Network::Bitcoin, Network::Testnet];
const TAPROOT_ADDRESS_LEN: usize = 62;

/// Only ASCII letters and digits may reach a file path or upstream URL
pub fn is_path_safe_address(address: &str) -> bool {
    !address.is_empty() && address.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Accepts P2PKH, P2SH, segwit v0 and taproot addresses on mainnet or testnet
pub fn validate_bitcoin_address(address: &str) -> bool {
    let taproot = address.starts_with("bc1p") || address.starts_with("tb1p");
    let valid = ADDRESS_PREFIXES.iter().any(|prefix| address.starts_with(prefix))
        && (!taproot || address.len() == TAPROOT_ADDRESS_LEN)
        && parses_on_accepted_network(address);

    if !valid {
        debug!(target: LOG_TARGET, "Invalid Bitcoin address: {:?}", address);
    }
    valid
}

fn parses_on_accepted_network(address: &str) -> bool {
    match address.parse::<Address<NetworkUnchecked>>() {
        Ok(parsed) => ACCEPTED_NETWORKS
            .iter()
            .any(|network| parsed.is_valid_for_network(*network)),
        Err(e) => {
            debug!(target: LOG_TARGET, "Address {:?} does not decode: {}", address, e);
            false
        }
    }
}


// Changelog:
// - v1.0.0 (2025-07-03): Initial address validation with Base58Check,
//   bech32 and bech32m checksums.
// - v1.1.0 (2025-07-09): Decode through the bitcoin crate and check the
//   network, replacing the local Base58Check and bech32 decoders.
