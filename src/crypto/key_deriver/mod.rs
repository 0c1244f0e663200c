// src/crypto/key_deriver/mod.rs
//
// Key Derivation Engine - Dual-Curve Support
//
// Kiến trúc:
// ┌────────────────────────────────────────────────┐
// │  Seed (64 bytes from BIP-39 Mnemonic)          │
// │                   │                            │
// │     ┌─────────────┴─────────────┐              │
// │     ▼                           ▼              │
// │  secp256k1 (BIP-32)      ed25519 (SLIP-0010)   │
// │  └─ Ethereum/EVM         └─ Solana             │
// └────────────────────────────────────────────────┘

pub mod ed25519;
pub mod secp256k1;

// Re-exports
pub use ed25519::Ed25519Deriver;
pub use secp256k1::Secp256k1Deriver;

use crate::crypto::paths::{AccountPath, ChainKind};
use crate::error::{CryptoError, WalletError, WalletResult};
use zeroize::Zeroizing;

// =============================================================================
// COMMON TYPES
// =============================================================================
/// Curve type cho key derivation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveType {
    /// secp256k1 — Ethereum/EVM
    Secp256k1,
    /// Ed25519 — Solana
    Ed25519,
}

impl ChainKind {
    /// Curve mà chain này sử dụng
    #[inline]
    pub const fn curve(self) -> CurveType {
        match self {
            ChainKind::Solana => CurveType::Ed25519,
            ChainKind::Evm => CurveType::Secp256k1,
        }
    }
}

/// Kết quả derivation: private key material + metadata
pub struct DerivedKey {
    /// Private key bytes (32 bytes, auto-zeroize khi drop)
    pub private_key: Zeroizing<[u8; 32]>,
    /// Curve type
    pub curve: CurveType,
    /// Derivation path đã sử dụng
    pub path: String,
}

// Custom Debug - KHÔNG BAO GIỜ hiển thị key material
impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("private_key", &"[REDACTED]")
            .field("curve", &self.curve)
            .field("path", &self.path)
            .finish()
    }
}

// =============================================================================
// UNIFIED DERIVER
// =============================================================================
/// Unified Key Deriver — entry point cho mọi derivation trong engine
///
/// Chọn deriver theo curve của chain, hoặc gọi trực tiếp
/// [`Secp256k1Deriver`] / [`Ed25519Deriver`].
pub struct KeyDeriver;

impl KeyDeriver {
    /// Derive key material cho một account path
    ///
    /// # Arguments
    /// * `seed` - BIP-39 seed (64 bytes)
    /// * `account` - Chain + index (e.g. Solana index 0 → `m/44'/501'/0'/0'`)
    pub fn derive_account(seed: &[u8], account: AccountPath) -> WalletResult<DerivedKey> {
        Self::derive(seed, &account.to_string(), account.chain.curve())
    }

    /// Derive key từ một path string tùy ý
    ///
    /// # Arguments
    /// * `seed` - BIP-39 seed (64 bytes)
    /// * `path` - Derivation path (e.g. `m/44'/60'/0'/0'`)
    /// * `curve` - Curve type (secp256k1 hoặc ed25519)
    pub fn derive(seed: &[u8], path: &str, curve: CurveType) -> WalletResult<DerivedKey> {
        Self::validate_seed(seed)?;

        let private_key = match curve {
            CurveType::Secp256k1 => Secp256k1Deriver::derive(seed, path)?,
            CurveType::Ed25519 => Ed25519Deriver::derive(seed, path)?,
        };

        Ok(DerivedKey {
            private_key,
            curve,
            path: path.to_string(),
        })
    }

    /// Validate seed length
    #[inline]
    fn validate_seed(seed: &[u8]) -> WalletResult<()> {
        if seed.len() != 64 {
            return Err(WalletError::Crypto(CryptoError::DerivationFailed(format!(
                "Invalid seed length: expected 64 bytes, got {}",
                seed.len()
            ))));
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SEED: &str = "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc19a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4";

    #[test]
    fn test_derive_account_solana() {
        let seed = hex::decode(TEST_SEED).unwrap();
        let key = KeyDeriver::derive_account(&seed, AccountPath::solana(0)).unwrap();
        assert_eq!(key.curve, CurveType::Ed25519);
        assert_eq!(key.path, "m/44'/501'/0'/0'");
        assert_eq!(key.private_key.len(), 32);
    }

    #[test]
    fn test_derive_account_evm() {
        let seed = hex::decode(TEST_SEED).unwrap();
        let key = KeyDeriver::derive_account(&seed, AccountPath::evm(0)).unwrap();
        assert_eq!(key.curve, CurveType::Secp256k1);
        assert_eq!(key.path, "m/44'/60'/0'/0'");
    }

    #[test]
    fn test_invalid_seed_length() {
        let bad_seed = [0u8; 32];
        let result = KeyDeriver::derive_account(&bad_seed, AccountPath::evm(0));
        assert!(result.is_err());
    }

    #[test]
    fn test_consistency() {
        let seed = hex::decode(TEST_SEED).unwrap();

        let k1 = KeyDeriver::derive_account(&seed, AccountPath::evm(0)).unwrap();
        let k2 = KeyDeriver::derive_account(&seed, AccountPath::evm(0)).unwrap();
        assert_eq!(&*k1.private_key, &*k2.private_key);

        let k3 = KeyDeriver::derive_account(&seed, AccountPath::solana(0)).unwrap();
        let k4 = KeyDeriver::derive_account(&seed, AccountPath::solana(0)).unwrap();
        assert_eq!(&*k3.private_key, &*k4.private_key);
    }

    #[test]
    fn test_debug_does_not_leak_key_material() {
        let seed = hex::decode(TEST_SEED).unwrap();
        let key = KeyDeriver::derive_account(&seed, AccountPath::solana(0)).unwrap();
        let debug_output = format!("{:?}", key);

        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains(&hex::encode(&*key.private_key)));
        // Không byte nào của key xuất hiện dạng decimal list
        assert!(!debug_output.contains(&format!("{:?}", &key.private_key[..4])));
    }

    #[test]
    fn test_chain_independence_at_same_index() {
        let seed = hex::decode(TEST_SEED).unwrap();
        // Cùng index, khác coin type + curve ⇒ key material độc lập
        let sol = KeyDeriver::derive_account(&seed, AccountPath::solana(0)).unwrap();
        let evm = KeyDeriver::derive_account(&seed, AccountPath::evm(0)).unwrap();
        assert_ne!(&*sol.private_key, &*evm.private_key);
    }
}
