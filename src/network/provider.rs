// src/network/provider.rs
//
// Balance Provider - Read-Only JSON-RPC 2.0 Client
//
// External collaborator duy nhất của engine. Mọi failure ở đây là
// NON-FATAL: degrade về sentinel "Error", không bao giờ abort derivation.

use crate::crypto::ChainKind;
use crate::error::{ProviderError, WalletResult};
use crate::network::amount::{format_lamports, format_wei_hex};
use crate::registry::Wallet;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

/// Sentinel trả về caller khi balance fetch thất bại
pub const BALANCE_ERROR_SENTINEL: &str = "Error";

// =============================================================================
// CONFIG
// =============================================================================

/// RPC endpoints — LUÔN do caller cung cấp.
///
/// Không có default URLs hay embedded credentials trong crate này;
/// API keys (nếu có) nằm trong URL mà caller truyền vào.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Solana JSON-RPC endpoint (e.g. mainnet-beta RPC)
    pub solana_rpc_url: String,
    /// EVM JSON-RPC endpoint
    pub evm_rpc_url: String,
}

// =============================================================================
// TRAIT
// =============================================================================

/// Read-only balance provider — boundary với chain-indexing service
///
/// Trả về balance đã format (6 decimals). Engine không phụ thuộc provider
/// cho correctness: balances là informational overlay.
#[async_trait]
pub trait BalanceProvider: Send + Sync {
    /// Query native balance của một address trên một chain
    async fn get_balance(&self, address: &str, chain: ChainKind) -> WalletResult<String>;
}

// =============================================================================
// JSON-RPC IMPLEMENTATION
// =============================================================================

/// Balance update cho một wallet — merge lại qua
/// [`WalletRegistry::attach_balances`](crate::registry::WalletRegistry::attach_balances).
///
/// Wallet id là stable key: nếu registry đã bị clear trước khi update
/// được merge, `attach_balances` sẽ discard nó.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceUpdate {
    pub wallet_id: u32,
    pub sol_balance: String,
    pub eth_balance: String,
}

/// JSON-RPC 2.0 balance provider qua HTTPS POST
///
/// - Solana: method `getBalance` → lamports (integer), ÷ 10^9
/// - EVM: method `eth_getBalance` → hex wei, ÷ 10^18
pub struct RpcBalanceProvider {
    client: reqwest::Client,
    config: ProviderConfig,
}

impl RpcBalanceProvider {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Fetch cả hai balances của một wallet, degrade từng chain về sentinel
    ///
    /// Hai requests chạy concurrent với nhau; lỗi của chain này không ảnh
    /// hưởng chain kia.
    pub async fn fetch_display_balances(&self, wallet: &Wallet) -> BalanceUpdate {
        let (sol, eth) = tokio::join!(
            self.get_balance(&wallet.solana_address, ChainKind::Solana),
            self.get_balance(&wallet.ethereum_address, ChainKind::Evm),
        );

        BalanceUpdate {
            wallet_id: wallet.id,
            sol_balance: Self::display_or_sentinel(sol, wallet.id, ChainKind::Solana),
            eth_balance: Self::display_or_sentinel(eth, wallet.id, ChainKind::Evm),
        }
    }

    fn display_or_sentinel(result: WalletResult<String>, wallet_id: u32, chain: ChainKind) -> String {
        match result {
            Ok(balance) => balance,
            Err(e) => {
                warn!(wallet_id, ?chain, error = %e, "balance fetch failed");
                BALANCE_ERROR_SENTINEL.to_string()
            }
        }
    }

    /// POST một JSON-RPC 2.0 request, trả về body đã parse
    async fn rpc_call(&self, url: &str, method: &str, params: Value) -> Result<Value, ProviderError> {
        let request = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let response = self
            .client
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ProviderError::Http(format!(
                "{} returned HTTP {}",
                method,
                response.status()
            )));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))
    }
}

#[async_trait]
impl BalanceProvider for RpcBalanceProvider {
    async fn get_balance(&self, address: &str, chain: ChainKind) -> WalletResult<String> {
        let formatted = match chain {
            ChainKind::Solana => {
                let body = self
                    .rpc_call(&self.config.solana_rpc_url, "getBalance", json!([address]))
                    .await?;
                format_lamports(parse_solana_balance(&body)?)
            }
            ChainKind::Evm => {
                let body = self
                    .rpc_call(
                        &self.config.evm_rpc_url,
                        "eth_getBalance",
                        json!([address, "latest"]),
                    )
                    .await?;
                format_wei_hex(&parse_evm_balance(&body)?)?
            }
        };

        Ok(formatted)
    }
}

// =============================================================================
// RESPONSE PARSING
// =============================================================================

/// Solana `getBalance` response: `{"result": {"value": <lamports>}}`
fn parse_solana_balance(body: &Value) -> Result<u64, ProviderError> {
    body.get("result")
        .and_then(|r| r.get("value"))
        .and_then(Value::as_u64)
        .ok_or_else(|| {
            ProviderError::MalformedResponse(format!("missing result.value in {}", body))
        })
}

/// EVM `eth_getBalance` response: `{"result": "0x<wei>"}`
fn parse_evm_balance(body: &Value) -> Result<String, ProviderError> {
    body.get("result")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            ProviderError::MalformedResponse(format!("missing hex result in {}", body))
        })
}

// =============================================================================
// TESTS
// =============================================================================
