// src/network/mod.rs
//
// Network Module - External Balance Provider
//
// Cung cấp:
// - Trait + JSON-RPC implementation cho read-only balance lookup
// - Amount formatting (lamports/wei → fixed 6 decimals)

pub mod amount;
pub mod provider;

// Re-export cho convenience
pub use amount::{format_lamports, format_wei_hex};
pub use provider::{
    BalanceProvider, BalanceUpdate, ProviderConfig, RpcBalanceProvider, BALANCE_ERROR_SENTINEL,
};
