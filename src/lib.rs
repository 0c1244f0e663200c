// src/lib.rs

//! # polyvault-core
//!
//! Deterministic dual-chain HD wallet derivation engine: từ một BIP-39
//! mnemonic, derive một ordered sequence của account keypairs cho Solana
//! (ed25519, SLIP-0010) và Ethereum/EVM (secp256k1, BIP-32).
//!
//! ## Derivation flow
//!
//! ```text
//! mnemonic → seed (PBKDF2-HMAC-SHA512)
//!          → AccountPath m/44'/<coin>'/<index>'/0'  (hardened mọi level)
//!          → KeyDeriver (per curve)
//!          → chain adapter → (address, private key)
//! ```
//!
//! [`WalletRegistry`] drive flow này mỗi lần `add_wallet` và append kết quả.
//! Derivation là pure computation, synchronous; chỉ balance lookup
//! ([`network`]) là async và non-fatal.
//!
//! ## Example
//!
//! ```no_run
//! use polyvault_core::WalletRegistry;
//!
//! let mut registry = WalletRegistry::new();
//! registry.start_session(None); // generate mnemonic mới
//! let wallet = registry.add_wallet().unwrap().unwrap();
//! println!("SOL: {}  ETH: {}", wallet.solana_address, wallet.ethereum_address);
//! ```

pub mod chains;
pub mod crypto;
pub mod error;
pub mod network;
pub mod registry;

// Re-exports: public API surface của engine
pub use crypto::{AccountPath, ChainKind, WalletMnemonic};
pub use error::{CryptoError, MnemonicError, ProviderError, WalletError, WalletResult};
pub use network::{BalanceProvider, BalanceUpdate, ProviderConfig, RpcBalanceProvider};
pub use registry::{SessionState, Wallet, WalletRegistry};
