// src/chains/solana.rs
//
// Solana Address Module - Ed25519 Keypair + Base58 Address
// Address format: base58 của 32-byte public key, KHÔNG có checksum

use crate::error::{CryptoError, WalletError, WalletResult};
use ed25519_dalek::SigningKey;

/// Kết quả derive một Solana account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolanaAccount {
    /// Base58 address (raw encoded public key)
    pub address: String,
    /// Hex của 32-byte derived seed material
    ///
    /// # ⚠ Non-standard Export Format
    /// Đây là 32-byte SEED, không phải 64-byte expanded secret key mà đa số
    /// ví Solana (Phantom, Solflare) export. Format này được giữ nguyên để
    /// tương thích với behavior gốc của engine — import vào ví khác có thể
    /// cần convert.
    pub private_key_hex: String,
}

/// Solana Address Generator
///
/// # Flow:  Seed Material (32B) → Ed25519 Keypair → Public Key (32B) → Base58
///
/// Keypair generation là deterministic: cùng 32 bytes seed luôn cho cùng
/// public/secret key pair theo construction Ed25519 chuẩn (RFC 8032).
pub struct SolanaAddress;

impl SolanaAddress {
    /// Derive Solana account (address + exported private key) từ key material
    pub fn derive_account(key_material: &[u8; 32]) -> SolanaAccount {
        SolanaAccount {
            address: Self::derive_address(key_material),
            private_key_hex: hex::encode(key_material),
        }
    }

    /// Derive base58 address từ 32-byte key material
    ///
    /// Ed25519 chấp nhận mọi 32 bytes làm seed nên hàm này không fail.
    pub fn derive_address(key_material: &[u8; 32]) -> String {
        let signing_key = SigningKey::from_bytes(key_material);
        let public_key = signing_key.verifying_key();
        bs58::encode(public_key.as_bytes()).into_string()
    }

    /// Validate chuỗi có phải Solana address hợp lệ không
    ///
    /// Kiểm tra: base58 alphabet + decode ra đúng 32 bytes
    pub fn is_valid(address: &str) -> bool {
        match bs58::decode(address).into_vec() {
            Ok(bytes) => bytes.len() == 32,
            Err(_) => false,
        }
    }

    /// Decode address về 32-byte public key
    pub fn to_public_key_bytes(address: &str) -> WalletResult<[u8; 32]> {
        let bytes = bs58::decode(address).into_vec().map_err(|e| {
            WalletError::Crypto(CryptoError::InvalidKeyFormat(format!(
                "Invalid base58 address: {}",
                e
            )))
        })?;

        bytes.as_slice().try_into().map_err(|_| {
            WalletError::Crypto(CryptoError::InvalidKeyFormat(format!(
                "Solana address must decode to 32 bytes, got {}",
                bytes.len()
            )))
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
