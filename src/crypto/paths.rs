// src/crypto/paths.rs
//
// Derivation Paths Module - Dual-Chain HD Path Builder
// BIP-44 (Purpose), SLIP-44 (Coin Types), SLIP-0010 (hardened-only)

use serde::{Deserialize, Serialize};

// =============================================================================
// SLIP-44 COIN TYPES
// =============================================================================
/// SLIP-44 Registered Coin Types
/// Ref: https://github.com/satoshilabs/slips/blob/master/slip-0044.md
pub mod coin_type {
    /// Ethereum và mọi EVM chain (secp256k1)
    pub const ETHEREUM: u32 = 60;
    /// Solana (ed25519)
    pub const SOLANA: u32 = 501;
}

// =============================================================================
// CHAIN KIND
// =============================================================================
/// Hai chain mà engine hỗ trợ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainKind {
    /// Solana — ed25519, SLIP-0010
    Solana,
    /// Ethereum/EVM — secp256k1, BIP-32
    Evm,
}

impl ChainKind {
    /// SLIP-44 coin type của chain
    #[inline]
    pub const fn coin_type(self) -> u32 {
        match self {
            ChainKind::Solana => coin_type::SOLANA,
            ChainKind::Evm => coin_type::ETHEREUM,
        }
    }
}

// =============================================================================
// ACCOUNT PATH
// =============================================================================
/// Derivation path của một account: chain + zero-based index
///
/// Map deterministic sang path string `m/44'/<coin_type>'/<index>'/0'` —
/// hardened ở MỌI level, cho cả hai chain (convention của engine này;
/// index nằm ở account level).
///
/// # Examples
/// - Solana index 0: `m/44'/501'/0'/0'`
/// - EVM index 3:    `m/44'/60'/3'/0'`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountPath {
    pub chain: ChainKind,
    pub index: u32,
}

impl AccountPath {
    #[inline]
    pub const fn new(chain: ChainKind, index: u32) -> Self {
        Self { chain, index }
    }

    /// Solana path tại account index
    #[inline]
    pub const fn solana(index: u32) -> Self {
        Self::new(ChainKind::Solana, index)
    }

    /// EVM path tại account index
    #[inline]
    pub const fn evm(index: u32) -> Self {
        Self::new(ChainKind::Evm, index)
    }
}

impl std::fmt::Display for AccountPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "m/44'/{}'/{}'/0'", self.chain.coin_type(), self.index)
    }
}

// =============================================================================
// TESTS
// =============================================================================
