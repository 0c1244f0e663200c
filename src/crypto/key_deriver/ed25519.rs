// src/crypto/key_deriver/ed25519.rs
//
// Ed25519 Key Derivation — SLIP-0010 Standard
//
// Dùng cho: Solana
// Algorithm: HMAC-SHA512 (khác BIP-32, chỉ hỗ trợ hardened derivation)
// Reference: https://github.com/satoshilabs/slips/blob/master/slip-0010.md
//
// QUAN TRỌNG: SLIP-0010 cho ed25519 CHỈ hỗ trợ hardened child derivation.
// Tất cả levels trong path PHẢI là hardened (có dấu ').
// VD: m/44'/501'/0'/0' (OK)    m/44'/501'/0'/0 (INVALID)

use crate::error::{CryptoError, WalletError, WalletResult};
use hmac::{Hmac, Mac};
use sha2::Sha512;
use zeroize::{Zeroize, Zeroizing};

type HmacSha512 = Hmac<Sha512>;

/// Ed25519 Key Deriver — SLIP-0010 Standard
///
/// # Khác biệt với secp256k1 (BIP-32)
/// - Master key seed: `"ed25519 seed"` (thay vì `"Bitcoin seed"`)
/// - Chỉ hỗ trợ hardened derivation (index >= 2^31)
/// - Không cần validate key range (ed25519 key là bất kỳ 32 bytes)
///
/// # Security
/// - HMAC-SHA512 cho mỗi level derivation
/// - Private key + chain code tự động zeroize
/// - Không lưu intermediate state
pub struct Ed25519Deriver;

impl Ed25519Deriver {
    /// SLIP-0010 master key seed constant
    const MASTER_SECRET: &'static [u8] = b"ed25519 seed";

    /// Derive một ed25519 private key từ seed + path
    ///
    /// # Arguments
    /// * `seed` - 64-byte BIP-39 seed
    /// * `path` - Derivation path, all levels MUST be hardened
    ///            e.g. `m/44'/501'/0'/0'`
    ///
    /// # Returns
    /// 32-byte ed25519 private key material, auto-zeroize on drop
    pub fn derive(seed: &[u8], path: &str) -> WalletResult<Zeroizing<[u8; 32]>> {
        let indices = Self::parse_path(path)?;

        // Step 1: master key
        // I = HMAC-SHA512(Key = "ed25519 seed", Data = seed)
        let (mut key, mut chain_code) = Self::master_key_generate(seed)?;

        // Step 2: child derivation cho từng level
        // I = HMAC-SHA512(Key = chain_code, Data = 0x00 || key || index)
        for index in &indices {
            let (child_key, child_chain) = Self::child_key_derive(&key, &chain_code, *index)?;
            // Zeroize old values trước khi overwrite
            key.zeroize();
            chain_code.zeroize();
            key = child_key;
            chain_code = child_chain;
        }

        // Chain code ở level cuối không cần nữa
        chain_code.zeroize();

        Ok(Zeroizing::new(key))
    }

    /// I = HMAC-SHA512(Key = "ed25519 seed", Data = seed)
    /// IL (32 bytes) = private key, IR (32 bytes) = chain code
    fn master_key_generate(seed: &[u8]) -> WalletResult<([u8; 32], [u8; 32])> {
        let mut mac = HmacSha512::new_from_slice(Self::MASTER_SECRET).map_err(|e| {
            WalletError::Crypto(CryptoError::DerivationFailed(format!(
                "HMAC init failed: {}",
                e
            )))
        })?;

        mac.update(seed);
        let result = mac.finalize().into_bytes();

        // Copy vào stack buffer mình kiểm soát, rồi zeroize
        let mut buf = [0u8; 64];
        buf.copy_from_slice(&result);

        let mut key = [0u8; 32];
        let mut chain_code = [0u8; 32];
        key.copy_from_slice(&buf[..32]);
        chain_code.copy_from_slice(&buf[32..]);

        buf.zeroize();

        Ok((key, chain_code))
    }

    /// Hardened child:
    /// I = HMAC-SHA512(Key = parent_chain_code,
    ///                 Data = 0x00 || parent_key || ser32(index | 0x80000000))
    fn child_key_derive(
        parent_key: &[u8; 32],
        parent_chain_code: &[u8; 32],
        index: u32,
    ) -> WalletResult<([u8; 32], [u8; 32])> {
        let mut mac = HmacSha512::new_from_slice(parent_chain_code).map_err(|e| {
            WalletError::Crypto(CryptoError::DerivationFailed(format!(
                "HMAC init failed: {}",
                e
            )))
        })?;

        let hardened_index = index | 0x80000000;
        mac.update(&[0x00]);
        mac.update(parent_key);
        mac.update(&hardened_index.to_be_bytes());

        let result = mac.finalize().into_bytes();

        let mut buf = [0u8; 64];
        buf.copy_from_slice(&result);

        let mut key = [0u8; 32];
        let mut chain_code = [0u8; 32];
        key.copy_from_slice(&buf[..32]);
        chain_code.copy_from_slice(&buf[32..]);

        buf.zeroize();

        Ok((key, chain_code))
    }

    /// Parse path thành list of hardened indices
    ///
    /// Input: `m/44'/501'/0'/0'` → Output: `[44, 501, 0, 0]`
    ///
    /// Mọi segment phải có dấu ' (hoặc 'h') — SLIP-0010 requirement.
    fn parse_path(path: &str) -> WalletResult<Vec<u32>> {
        let path = path.trim();

        if !path.starts_with("m/") {
            return Err(WalletError::Crypto(CryptoError::DerivationFailed(format!(
                "Path must start with 'm/': {}",
                path
            ))));
        }

        let segments = &path[2..];
        if segments.is_empty() {
            return Err(WalletError::Crypto(CryptoError::DerivationFailed(
                "Empty derivation path".to_string(),
            )));
        }

        let mut indices = Vec::new();
        for segment in segments.split('/') {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }

            if !segment.ends_with('\'') && !segment.ends_with('h') {
                return Err(WalletError::Crypto(CryptoError::DerivationFailed(
                    format!(
                        "Ed25519 SLIP-0010 requires ALL levels to be hardened (add '). Invalid segment: '{}'",
                        segment
                    ),
                )));
            }

            let num_str = &segment[..segment.len() - 1];
            let index: u32 = num_str.parse().map_err(|e| {
                WalletError::Crypto(CryptoError::DerivationFailed(format!(
                    "Invalid index '{}': {}",
                    num_str, e
                )))
            })?;

            // Hardening set bit 31, nên index phải < 2^31 — nếu không,
            // 2147483648' sẽ alias với 0'
            if index >= 0x80000000 {
                return Err(WalletError::Crypto(CryptoError::DerivationFailed(format!(
                    "Index {} out of range: hardened index must be < 2^31",
                    index
                ))));
            }

            indices.push(index);
        }

        Ok(indices)
    }

    /// Validate ed25519 path (tất cả levels phải hardened)
    pub fn is_valid_path(path: &str) -> bool {
        Self::parse_path(path).is_ok()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::paths::AccountPath;

    // Seed của mnemonic "abandon ... about", passphrase rỗng
    const TEST_SEED: &str = "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc19a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4";

    #[test]
    fn test_derive_solana_key() {
        let seed = hex::decode(TEST_SEED).unwrap();
        let key = Ed25519Deriver::derive(&seed, &AccountPath::solana(0).to_string()).unwrap();
        assert_eq!(key.len(), 32);
    }

    // Engine path index 0 cho mnemonic "abandon ... about"
    #[test]
    fn test_known_vector_engine_solana_path() {
        let seed = hex::decode(TEST_SEED).unwrap();
        let key = Ed25519Deriver::derive(&seed, "m/44'/501'/0'/0'").unwrap();
        assert_eq!(
            hex::encode(&*key),
            "37df573b3ac4ad5b522e064e25b63ea16bcbe79d449e81a0268d1047948bb445"
        );
    }

    #[test]
    fn test_consistency() {
        let seed = hex::decode(TEST_SEED).unwrap();
        let path = AccountPath::solana(0).to_string();
        let k1 = Ed25519Deriver::derive(&seed, &path).unwrap();
        let k2 = Ed25519Deriver::derive(&seed, &path).unwrap();
        assert_eq!(&*k1, &*k2);
    }

    #[test]
    fn test_different_indices_different_keys() {
        let seed = hex::decode(TEST_SEED).unwrap();
        let k0 = Ed25519Deriver::derive(&seed, &AccountPath::solana(0).to_string()).unwrap();
        let k1 = Ed25519Deriver::derive(&seed, &AccountPath::solana(1).to_string()).unwrap();
        let k2 = Ed25519Deriver::derive(&seed, &AccountPath::solana(2).to_string()).unwrap();
        assert_ne!(&*k0, &*k1);
        assert_ne!(&*k1, &*k2);
    }

    #[test]
    fn test_non_hardened_path_rejected() {
        let seed = hex::decode(TEST_SEED).unwrap();
        // Last segment không hardened = INVALID cho ed25519
        let result = Ed25519Deriver::derive(&seed, "m/44'/501'/0'/0");
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("hardened"));
    }

    #[test]
    fn test_malformed_path_rejected() {
        let seed = hex::decode(TEST_SEED).unwrap();
        assert!(Ed25519Deriver::derive(&seed, "invalid").is_err());
        assert!(Ed25519Deriver::derive(&seed, "44'/501'/0'").is_err()); // thiếu m/
        assert!(Ed25519Deriver::derive(&seed, "m/").is_err());
        assert!(Ed25519Deriver::derive(&seed, "m/abc'/501'").is_err()); // non-numeric
    }

    #[test]
    fn test_index_above_hardened_bit_rejected() {
        let seed = hex::decode(TEST_SEED).unwrap();
        // 2^31 sẽ alias với index 0 nếu không reject
        let result = Ed25519Deriver::derive(&seed, "m/2147483648'");
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("out of range"));

        // Boundary: 2^31 - 1 vẫn hợp lệ
        assert!(Ed25519Deriver::is_valid_path("m/2147483647'"));
        assert!(!Ed25519Deriver::is_valid_path("m/2147483648'"));
    }

    #[test]
    fn test_is_valid_path() {
        assert!(Ed25519Deriver::is_valid_path("m/44'/501'/0'/0'"));
        assert!(Ed25519Deriver::is_valid_path("m/44'/501'/7'/0'"));
        assert!(!Ed25519Deriver::is_valid_path("m/44'/501'/0'/0"));
        assert!(!Ed25519Deriver::is_valid_path("invalid"));
    }

    // =========================================================================
    // SLIP-0010 Official Test Vector 1 (ed25519)
    // Seed: 000102030405060708090a0b0c0d0e0f
    // =========================================================================

    #[test]
    fn test_slip0010_vector_master() {
        let seed = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
        let (key, chain_code) = Ed25519Deriver::master_key_generate(&seed).unwrap();

        assert_eq!(
            hex::encode(key),
            "2b4be7f19ee27bbf30c667b642d5f4aa69fd169872f8fc3059c08ebae2eb19e7"
        );
        assert_eq!(
            hex::encode(chain_code),
            "90046a93de5380a72b5e45010748567d5ea02bbf6522f979e05c0d8d8ca9fffb"
        );
    }

    #[test]
    fn test_slip0010_vector_child_0h() {
        let seed = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
        // Chain m/0'
        let key = Ed25519Deriver::derive(&seed, "m/0'").unwrap();
        assert_eq!(
            hex::encode(&*key),
            "68e0fe46dfb67e368c75379acec591dad19df3cde26e63b93a8e704f1dade7a3"
        );
    }

    #[test]
    fn test_slip0010_vector_chain_depth_2() {
        let seed = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
        // Chain m/0'/1'
        let key = Ed25519Deriver::derive(&seed, "m/0'/1'").unwrap();
        assert_eq!(
            hex::encode(&*key),
            "b1d0bad404bf35da785a64ca1ac54b2617211d2777696fbffaf208f746ae84f2"
        );
    }
}
