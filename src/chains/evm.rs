// src/chains/evm.rs
//
// EVM Address Module - secp256k1 Keypair + EIP-55 Checksummed Address
// EIP-55 (Checksum), Keccak-256, secp256k1

use crate::error::{CryptoError, WalletError, WalletResult};
use alloy_primitives::Address;
use k256::{elliptic_curve::sec1::ToEncodedPoint, SecretKey};
use tiny_keccak::{Hasher, Keccak};
use zeroize::{Zeroize, Zeroizing};

/// Kết quả derive một EVM account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvmAccount {
    /// EIP-55 checksummed address, prefix `0x`
    pub address: String,
}

/// EVM Address Generator
///
/// # Flow:  Private Key (32B) → Public Key (64B) → Keccak256 → Address (20B)
///
/// # Security
/// - Zeroize: intermediate data (hash, public key bytes) bị xóa sau khi dùng
/// - No Storage: module này KHÔNG lưu private key
pub struct EvmAddress;

impl EvmAddress {
    /// Derive EVM account từ 32-byte key material
    ///
    /// Fails với `InvalidKeyMaterial` nếu scalar = 0 hoặc >= curve order
    /// (astronomically unlikely từ derivation, nhưng phải check).
    pub fn derive_account(key_material: &[u8; 32]) -> WalletResult<EvmAccount> {
        Ok(EvmAccount {
            address: Self::derive_from_slice(key_material)?,
        })
    }

    /// Derive EIP-55 checksummed address string từ một **zeroizing private key**.
    ///
    /// Recommended API — takes ownership của key material wrapped trong
    /// [`Zeroizing`], đảm bảo buffer được zero khi hàm return.
    #[inline]
    pub fn derive(priv_key: Zeroizing<Vec<u8>>) -> WalletResult<String> {
        Self::derive_from_slice(&priv_key)
        // `priv_key` dropped & zeroed here
    }

    /// Derive 20-byte address từ một **borrowed byte slice**.
    ///
    /// # ⚠ Security Note
    /// Caller chịu trách nhiệm zero `priv_key` sau call này.
    ///
    /// # Algorithm (chuẩn Ethereum Yellow Paper)
    /// 1. `priv_key` (32B) → secp256k1 → `pub_key` (uncompressed, 65B)
    /// 2. Bỏ prefix byte 0x04 → `pub_key_raw` (64B)
    /// 3. Keccak-256(`pub_key_raw`) → `hash` (32B)
    /// 4. `hash[12..32]` → `address` (20B)
    pub fn derive_bytes_from_slice(priv_key: &[u8]) -> WalletResult<[u8; 20]> {
        // Parse & validate scalar range (zero / >= order bị reject tại đây)
        let secret_key = SecretKey::from_slice(priv_key).map_err(|e| {
            WalletError::Crypto(CryptoError::InvalidKeyMaterial(format!(
                "Invalid secp256k1 private key: {}",
                e
            )))
        })?;

        let public_key = secret_key.public_key();
        let encoded = Zeroizing::new(public_key.to_encoded_point(false));
        let pub_key_raw = &encoded.as_bytes()[1..]; // Bỏ 0x04 prefix

        let mut hasher = Keccak::v256();
        let mut hash = [0u8; 32];
        hasher.update(pub_key_raw);
        hasher.finalize(&mut hash);

        let mut address = [0u8; 20];
        address.copy_from_slice(&hash[12..]);

        // Hash chứa thông tin liên quan tới public key
        hash.zeroize();

        Ok(address)
    }

    /// Derive EIP-55 checksummed address từ một **borrowed byte slice**.
    ///
    /// # Returns
    /// `"0xAb5801a7D398351b8bE11C439e05C5B3259aeC9B"` (mixed-case checksum)
    #[inline]
    pub fn derive_from_slice(priv_key: &[u8]) -> WalletResult<String> {
        let bytes = Self::derive_bytes_from_slice(priv_key)?;
        Ok(Address::from_slice(&bytes).to_checksum(None))
    }

    // =========================================================================
    // UTILITIES
    // =========================================================================

    /// Validate chuỗi có phải Ethereum address hợp lệ không
    ///
    /// Kiểm tra: `0x` prefix + 40 hex chars. KHÔNG enforce EIP-55 checksum —
    /// mixed-case với checksum sai vẫn pass. Dùng
    /// [`alloy_primitives::Address::parse_checksummed`] nếu cần strict check.
    #[inline]
    pub fn is_valid(address: &str) -> bool {
        address.parse::<Address>().is_ok()
    }

    /// Normalize về EIP-55 checksum format
    ///
    /// `"0xabcd..."` → `"0xAbCd..."` (mixed-case theo checksum)
    pub fn to_checksum(address: &str) -> WalletResult<String> {
        let addr: Address = address.parse().map_err(|_| {
            WalletError::Crypto(CryptoError::InvalidKeyFormat(
                "Invalid Ethereum address format".to_string(),
            ))
        })?;
        Ok(addr.to_checksum(None))
    }

    /// So sánh 2 address (case-insensitive)
    #[inline]
    pub fn equals(addr1: &str, addr2: &str) -> bool {
        match (addr1.parse::<Address>(), addr2.parse::<Address>()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // Test vectors from well-known sources
    const TEST_PRIVATE_KEY: &str =
        "501c797c4b1fdfa88fb7efdf7c9871b8e0f46dbc44259e3e270e0d4c938165f5";
    const TEST_ADDRESS: &str = "0xb611C31e4284BF7A7daD3296e62880F14b3b15DD";

    // Anvil/Hardhat account #0
    const ANVIL_PRIVATE_KEY: &str =
        "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const ANVIL_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    // BIP-44 m/44'/60'/0'/0/0 của mnemonic "abandon ... about"
    const ABANDON_PRIVATE_KEY: &str =
        "1ab42cc412b618bdea3a599e3c9bae199ebf030895b039e9db1e30dafb12b727";
    const ABANDON_ADDRESS: &str = "0x9858EfFD232B4033E47d90003D41EC34EcaEda94";

    fn key_32(hex_str: &str) -> [u8; 32] {
        hex::decode(hex_str).unwrap().try_into().unwrap()
    }

    #[test]
    fn test_derive_account() {
        let account = EvmAddress::derive_account(&key_32(TEST_PRIVATE_KEY)).unwrap();
        assert_eq!(account.address, TEST_ADDRESS);
    }

    #[test]
    fn test_derive_anvil_vector() {
        let priv_key = Zeroizing::new(hex::decode(ANVIL_PRIVATE_KEY).unwrap());
        let address = EvmAddress::derive(priv_key).unwrap();
        assert_eq!(address, ANVIL_ADDRESS);
    }

    #[test]
    fn test_derive_abandon_vector() {
        let account = EvmAddress::derive_account(&key_32(ABANDON_PRIVATE_KEY)).unwrap();
        assert_eq!(account.address, ABANDON_ADDRESS);
    }

    #[test]
    fn test_derive_bytes_matches_string() {
        let raw = hex::decode(TEST_PRIVATE_KEY).unwrap();
        let string_addr = EvmAddress::derive_from_slice(&raw).unwrap();
        let bytes_addr = EvmAddress::derive_bytes_from_slice(&raw).unwrap();
        let reconstructed = Address::from_slice(&bytes_addr).to_checksum(None);
        assert_eq!(string_addr, reconstructed);
    }

    #[test]
    fn test_is_valid() {
        assert!(EvmAddress::is_valid(TEST_ADDRESS));
        assert!(EvmAddress::is_valid(ANVIL_ADDRESS));
        assert!(EvmAddress::is_valid(
            "0xdead000000000000000000000000000000000000"
        ));

        assert!(!EvmAddress::is_valid("0xinvalid"));
        assert!(!EvmAddress::is_valid("not an address"));
        assert!(!EvmAddress::is_valid("0x123")); // Too short
        assert!(!EvmAddress::is_valid("")); // Empty
    }

    #[test]
    fn test_is_valid_does_not_enforce_checksum() {
        // Case của chữ đầu tiên đảo ngược so với TEST_ADDRESS — checksum sai
        // nhưng vẫn là 40 hex chars hợp lệ
        let bad_checksum = "0xB611C31e4284BF7A7daD3296e62880F14b3b15DD";
        assert_ne!(bad_checksum, TEST_ADDRESS);
        assert!(EvmAddress::is_valid(bad_checksum));
        // to_checksum normalize về dạng đúng
        assert_eq!(EvmAddress::to_checksum(bad_checksum).unwrap(), TEST_ADDRESS);
    }

    #[test]
    fn test_to_checksum() {
        let lowercase = "0xb611c31e4284bf7a7dad3296e62880f14b3b15dd";
        let checksummed = EvmAddress::to_checksum(lowercase).unwrap();
        assert_eq!(checksummed, TEST_ADDRESS);
    }

    #[test]
    fn test_equals() {
        let upper = "0xABCD1234ABCD1234ABCD1234ABCD1234ABCD1234";
        let lower = "0xabcd1234abcd1234abcd1234abcd1234abcd1234";
        assert!(EvmAddress::equals(upper, lower));
        assert!(!EvmAddress::equals(upper, TEST_ADDRESS));
    }

    #[test]
    fn test_wrong_length_key_rejected() {
        assert!(EvmAddress::derive(Zeroizing::new(vec![0u8; 31])).is_err());
        assert!(EvmAddress::derive(Zeroizing::new(vec![0u8; 33])).is_err());
        assert!(EvmAddress::derive(Zeroizing::new(vec![])).is_err());
    }

    #[test]
    fn test_zero_scalar_rejected() {
        let result = EvmAddress::derive_account(&[0u8; 32]);
        assert!(matches!(
            result,
            Err(WalletError::Crypto(CryptoError::InvalidKeyMaterial(_)))
        ));
    }

    #[test]
    fn test_scalar_at_curve_order_rejected() {
        // n của secp256k1 — scalar phải < n
        let order = key_32("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141");
        assert!(EvmAddress::derive_account(&order).is_err());
    }
}
