// src/crypto/mod.rs

//! Core Cryptography Module
//!
//! Đây là derivation engine của crate:
//!
//! - **Mnemonic / Seed**: BIP-39 phrase (12 words) + PBKDF2-HMAC-SHA512 seed qua [`WalletMnemonic`].
//! - **Key Derivation**: Unified interface cho Secp256k1 (EVM) và Ed25519 (Solana) qua [`KeyDeriver`].
//! - **Derivation Paths**: `m/44'/<coin>'/<index>'/0'`, hardened mọi level, qua [`AccountPath`].

pub mod key_deriver;
pub mod mnemonic;
pub mod paths;

// Re-exports for cleaner API access
pub use key_deriver::{CurveType, DerivedKey, Ed25519Deriver, KeyDeriver, Secp256k1Deriver};
pub use mnemonic::WalletMnemonic;
pub use paths::{coin_type, AccountPath, ChainKind};
