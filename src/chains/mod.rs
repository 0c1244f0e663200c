// src/chains/mod.rs
//
// Chain Adapters - Key Material → Keypair → Address
//
// Mỗi adapter consume 32-byte derived key material từ crypto::key_deriver
// và encode public key theo address format native của chain.

pub mod evm;
pub mod solana;

pub use evm::{EvmAccount, EvmAddress};
pub use solana::{SolanaAccount, SolanaAddress};
