use core_types::ContractAddress;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Cli {
    BurnTokens(BurnTokens),
    BurnTokensResult(BurnTokensResult),
    TreasuryStateRequest(TreasuryStateRequest),
    TreasuryStateResponse(TreasuryStateResponse),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BurnTokens {
    /// None means the currently active token contract.
    pub contract_address: Option<ContractAddress>,
    pub owner_address: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BurnTokensResult {
    pub burn: BurnTokens,
    pub tx_hash: Option<String>,
    pub result: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreasuryStateRequest {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreasuryStateResponse {
    pub tokens: u64,
    pub aid_tokens: u64,
    pub distributions: u64,
    pub ledger_txs: u64,
    pub total_distributed: Decimal,
}
