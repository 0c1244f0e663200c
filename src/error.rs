use thiserror::Error;

pub type WalletResult<T> = std::result::Result<T, WalletError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WalletError {
    #[error("Mnemonic Error: {0}")]
    Mnemonic(#[from] MnemonicError),

    #[error("Cryptography Error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("Provider Error: {0}")]
    Provider(#[from] ProviderError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MnemonicError {
    #[error("Invalid word count: {0}. Expected 12, 15, 18, 21 or 24 words.")]
    InvalidWordCount(usize),

    #[error("Word '{0}' not found in the BIP39 wordlist.")]
    UnknownWord(String),

    #[error("Checksum validation failed.")]
    ChecksumFailed,

    #[error("BIP39 internal error: {0}")]
    Bip39Error(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    #[error("Key derivation failed: {0}")]
    DerivationFailed(String),

    #[error("Invalid key material: {0}")]
    InvalidKeyMaterial(String),

    #[error("Invalid key format: {0}")]
    InvalidKeyFormat(String),
}

/// Lỗi từ balance provider — luôn NON-FATAL.
///
/// Provider errors không bao giờ abort derivation; caller degrade về
/// sentinel `"Error"` (xem [`crate::network`]).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProviderError {
    #[error("RPC request failed: {0}")]
    Http(String),

    #[error("Malformed RPC response: {0}")]
    MalformedResponse(String),
}
