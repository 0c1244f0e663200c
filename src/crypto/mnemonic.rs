// src/crypto/mnemonic.rs
//
// Mnemonic Module - BIP-39 Recovery Phrase + Seed Derivation
// Chuẩn: BIP-39 (Mnemonic), PBKDF2-HMAC-SHA512 (Seed Derivation)

use crate::error::{MnemonicError, WalletError, WalletResult};
use bip39::Mnemonic;
use rand::{rngs::OsRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Entropy strength cho mnemonic generation: 128 bits = 12 words.
///
/// Engine này luôn generate ở mức 12 words; restore chấp nhận mọi
/// word count hợp lệ (12/15/18/21/24).
const GENERATION_ENTROPY_BYTES: usize = 16;

/// Wallet Mnemonic — BIP-39 recovery phrase của một session
///
/// # Security
/// - **ZeroizeOnDrop**: Phrase được ghi đè bằng 0 khi struct bị drop
/// - **CSPRNG**: Entropy từ `OsRng` (OS-level cryptographically secure RNG)
/// - **No Debug Leak**: Custom Debug impl không hiển thị phrase
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct WalletMnemonic {
    phrase: String,
    word_count: usize,
}

// Custom Debug - KHÔNG BAO GIỜ hiển thị mnemonic phrase
impl std::fmt::Debug for WalletMnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletMnemonic")
            .field("word_count", &self.word_count)
            .field("phrase", &"[REDACTED]")
            .finish()
    }
}

impl WalletMnemonic {
    /// Tạo mnemonic mới: 128-bit entropy, 12 words
    pub fn generate() -> Self {
        let mut entropy = [0u8; GENERATION_ENTROPY_BYTES];
        OsRng.fill_bytes(&mut entropy);

        let mnemonic = Mnemonic::from_entropy(&entropy).expect("Valid entropy size");
        entropy.zeroize();

        Self {
            phrase: mnemonic.to_string(),
            word_count: 12,
        }
    }

    /// Khôi phục mnemonic từ phrase có sẵn
    ///
    /// # Validation
    /// - Word count phải là 12, 15, 18, 21 hoặc 24
    /// - Từng word phải nằm trong BIP-39 English wordlist
    /// - Embedded checksum phải validate
    pub fn from_phrase(phrase: &str) -> WalletResult<Self> {
        // Normalize whitespace trước khi parse
        let words = phrase.split_whitespace().collect::<Vec<_>>();
        let count = words.len();

        if !matches!(count, 12 | 15 | 18 | 21 | 24) {
            return Err(WalletError::Mnemonic(MnemonicError::InvalidWordCount(
                count,
            )));
        }

        let normalized = words.join(" ");
        Mnemonic::parse(&normalized).map_err(|e| {
            let msg = e.to_string();
            if msg.contains("invalid word") || msg.contains("unknown word") {
                WalletError::Mnemonic(MnemonicError::UnknownWord(msg))
            } else if msg.contains("checksum") {
                WalletError::Mnemonic(MnemonicError::ChecksumFailed)
            } else {
                WalletError::Mnemonic(MnemonicError::Bip39Error(msg))
            }
        })?;

        Ok(Self {
            phrase: normalized,
            word_count: count,
        })
    }

    /// Lấy mnemonic phrase
    ///
    /// # Warning
    /// Cẩn thận khi hiển thị hoặc log giá trị này!
    #[inline]
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// Số lượng words
    #[inline]
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// Tạo 64-byte seed từ mnemonic (PBKDF2-HMAC-SHA512)
    ///
    /// Pure function: cùng phrase + passphrase luôn cho cùng seed bytes.
    /// Passphrase mặc định là chuỗi rỗng (convention của engine này).
    ///
    /// # Returns
    /// `[u8; 64]` wrapped trong `Zeroizing`, tự động xóa khi drop
    pub fn to_seed(&self, passphrase: Option<&str>) -> Zeroizing<[u8; 64]> {
        let password = passphrase.unwrap_or("");
        let mnemonic = Mnemonic::parse(&self.phrase).expect("Internal phrase is valid");
        Zeroizing::new(mnemonic.to_seed(password))
    }

    /// Kiểm tra phrase có hợp lệ không (word count + wordlist + checksum)
    #[inline]
    pub fn validate(phrase: &str) -> bool {
        Self::from_phrase(phrase).is_ok()
    }
}

// =============================================================================
// TESTS
// =============================================================================
