// src/registry.rs
//
// Wallet Registry - Session State Machine + Ordered Wallet Collection
//
// Hai states: EMPTY (chưa bind mnemonic) và ACTIVE (đã bind, 0+ wallets).
// Mọi mutation đi qua các operation bên dưới — không có global state.

use crate::chains::{EvmAddress, SolanaAddress};
use crate::crypto::{AccountPath, KeyDeriver, WalletMnemonic};
use crate::error::WalletResult;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use zeroize::Zeroizing;

// =============================================================================
// MODELS
// =============================================================================

/// Trạng thái session của registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// Chưa bind mnemonic, không có wallets
    Empty,
    /// Mnemonic đã bind, 0 hoặc nhiều wallets đã derive
    Active,
}

/// Một wallet đã derive — unit của registry
///
/// Immutable sau khi tạo, trừ hai balance fields (informational overlay,
/// không thuộc deterministic identity của wallet).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    /// 1-based display id, gán tại thời điểm tạo (`wallet count + 1`)
    pub id: u32,
    /// Solana base58 address
    pub solana_address: String,
    /// EVM EIP-55 checksummed address
    pub ethereum_address: String,
    /// Hex của 32-byte Solana derived seed material
    /// (xem [`crate::chains::SolanaAccount`] về export format non-standard)
    pub private_key: String,
    /// Formatted SOL balance ("1.234567" hoặc sentinel "Error")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sol_balance: Option<String>,
    /// Formatted ETH balance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eth_balance: Option<String>,
}

// =============================================================================
// REGISTRY
// =============================================================================

/// Wallet Registry — orchestrator của derivation flow
///
/// ```text
/// mnemonic → seed → AccountPath (per chain, per index) → KeyDeriver
///          → chain adapter → Wallet → append
/// ```
///
/// Registry instance thuộc sở hữu của caller (không có singleton).
/// Seed được cache transient cho lifetime của session và bị discard
/// khi `clear_all` / rebind.
pub struct WalletRegistry {
    // Zeroizing: phrase buffer được zero khi rebind/clear/drop
    mnemonic: Option<Zeroizing<String>>,
    seed: Option<Zeroizing<[u8; 64]>>,
    wallets: Vec<Wallet>,
}

// Custom Debug - không hiển thị mnemonic/seed
impl std::fmt::Debug for WalletRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletRegistry")
            .field("state", &self.state())
            .field("wallet_count", &self.wallets.len())
            .finish_non_exhaustive()
    }
}

impl Default for WalletRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl WalletRegistry {
    /// Registry mới, state EMPTY
    pub fn new() -> Self {
        Self {
            mnemonic: None,
            seed: None,
            wallets: Vec::new(),
        }
    }

    // =========================================================================
    // OPERATIONS
    // =========================================================================

    /// Bind mnemonic cho session, reset wallet collection
    ///
    /// - `None` hoặc chuỗi rỗng/whitespace → generate mnemonic mới (12 words)
    /// - Ngược lại → bind input verbatim; validation deferred tới lần
    ///   `add_wallet` đầu tiên (behavior gốc của engine)
    ///
    /// Gọi lại operation này đơn giản rebind mnemonic và clear wallets.
    ///
    /// # Returns
    /// Phrase đã bind (caller giữ để hiển thị/backup)
    pub fn start_session(&mut self, mnemonic_input: Option<&str>) -> String {
        let phrase = match mnemonic_input {
            Some(input) if !input.trim().is_empty() => input.to_string(),
            _ => WalletMnemonic::generate().phrase().to_string(),
        };

        self.mnemonic = Some(Zeroizing::new(phrase.clone()));
        self.seed = None;
        self.wallets.clear();
        debug!(wallet_count = 0, "session started");

        phrase
    }

    /// Derive wallet tiếp theo và append vào collection
    ///
    /// # Returns
    /// - `Ok(Some(wallet))` — derive thành công
    /// - `Ok(None)` — không có mnemonic bound. Silent no-op này được giữ
    ///   nguyên từ behavior gốc như một documented compatibility choice;
    ///   mọi failure mode khác đều surface qua `Err`.
    /// - `Err(_)` — mnemonic không hợp lệ hoặc derivation/key-material error
    pub fn add_wallet(&mut self) -> WalletResult<Option<Wallet>> {
        let Some(phrase) = self.mnemonic.clone() else {
            warn!("add_wallet called without a bound mnemonic; no-op");
            return Ok(None);
        };

        // Validate mnemonic + compute seed ở lần derive đầu tiên, cache lại
        if self.seed.is_none() {
            let mnemonic = WalletMnemonic::from_phrase(&phrase)?;
            self.seed = Some(mnemonic.to_seed(None));
        }
        let seed = self.seed.as_ref().expect("seed cached above");

        let index = self.wallets.len() as u32;

        // Hai chains, hai paths độc lập (coin type khác nhau) tại cùng index
        let sol_key = KeyDeriver::derive_account(&**seed, AccountPath::solana(index))?;
        let sol_account = SolanaAddress::derive_account(&sol_key.private_key);

        let evm_key = KeyDeriver::derive_account(&**seed, AccountPath::evm(index))?;
        let evm_account = EvmAddress::derive_account(&evm_key.private_key)?;

        let wallet = Wallet {
            id: index + 1,
            solana_address: sol_account.address,
            ethereum_address: evm_account.address,
            private_key: sol_account.private_key_hex,
            sol_balance: None,
            eth_balance: None,
        };

        debug!(id = wallet.id, "wallet derived");
        self.wallets.push(wallet.clone());
        Ok(Some(wallet))
    }

    /// Discard mnemonic + cached seed + toàn bộ wallets, về EMPTY
    pub fn clear_all(&mut self) {
        self.mnemonic = None;
        self.seed = None;
        self.wallets.clear();
        debug!("registry cleared");
    }

    /// Overlay balances lên wallet theo id
    ///
    /// Silent no-op nếu id không còn tồn tại — đây là discard semantics
    /// cho balance fetch resolve sau khi registry đã bị clear: wallet id
    /// là stable key, không phải direct reference.
    pub fn attach_balances(&mut self, wallet_id: u32, sol_balance: String, eth_balance: String) {
        match self.wallets.iter_mut().find(|w| w.id == wallet_id) {
            Some(wallet) => {
                wallet.sol_balance = Some(sol_balance);
                wallet.eth_balance = Some(eth_balance);
            }
            None => {
                debug!(wallet_id, "balance result discarded: wallet no longer exists");
            }
        }
    }

    // =========================================================================
    // READ ACCESS
    // =========================================================================

    /// Trạng thái session hiện tại
    #[inline]
    pub fn state(&self) -> SessionState {
        if self.mnemonic.is_some() {
            SessionState::Active
        } else {
            SessionState::Empty
        }
    }

    /// Ordered wallet collection (id tăng dần 1..N)
    #[inline]
    pub fn wallets(&self) -> &[Wallet] {
        &self.wallets
    }

    /// Zero-based index mà `add_wallet` tiếp theo sẽ dùng
    #[inline]
    pub fn next_index(&self) -> u32 {
        self.wallets.len() as u32
    }

    /// Phrase đang bind (None khi EMPTY)
    ///
    /// # Warning
    /// Cẩn thận khi hiển thị hoặc log giá trị này!
    #[inline]
    pub fn session_phrase(&self) -> Option<&str> {
        self.mnemonic.as_ref().map(|m| m.as_str())
    }
}

// =============================================================================
// TESTS
// =============================================================================
