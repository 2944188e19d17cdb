use core_types::*;
use rust_decimal::prelude::*;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum DeployTokenResponseError {
    InvalidSupply,
    LedgerUnavailable,
    DbFailure,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum MintAidTokenResponseError {
    NoActiveToken,
    InvalidAmount,
    LedgerUnavailable,
    DbFailure,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum DistributionResponseError {
    NoActiveToken,
    InvalidAmount,
    LedgerUnavailable,
    DbFailure,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum VerificationProofResponseError {
    UnknownVerifier,
    DbFailure,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum VerifierApplicationResponseError {
    AlreadyApplied,
    DbFailure,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum TokenBalanceResponseError {
    NoActiveToken,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployTokenRequest {
    pub req_id: RequestId,
    pub uid: UserId,
    pub name: String,
    pub symbol: String,
    pub supply: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployTokenResponse {
    pub req_id: RequestId,
    pub uid: UserId,
    pub token_id: Option<EntityId>,
    pub contract_address: Option<ContractAddress>,
    pub tx_hash: Option<TxHash>,
    pub block_height: Option<u64>,
    pub error: Option<DeployTokenResponseError>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MintAidTokenRequest {
    pub req_id: RequestId,
    pub uid: UserId,
    pub recipient_uid: UserId,
    pub amount: Decimal,
    pub token_type: AidType,
    pub restrictions: Option<Vec<String>>,
    /// Epoch millis.
    pub expires_at: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MintAidTokenResponse {
    pub req_id: RequestId,
    pub uid: UserId,
    pub aid_token_id: Option<EntityId>,
    pub token_id: Option<String>,
    pub contract_address: Option<ContractAddress>,
    pub tx_hash: Option<TxHash>,
    pub error: Option<MintAidTokenResponseError>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistributionRequest {
    pub req_id: RequestId,
    pub uid: UserId,
    pub aid_request_id: EntityId,
    pub recipient_uid: UserId,
    pub amount: Decimal,
    pub shielded_memo: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistributionResponse {
    pub req_id: RequestId,
    pub uid: UserId,
    pub distribution_id: Option<EntityId>,
    pub tx_hash: Option<TxHash>,
    pub status: Option<DistributionStatus>,
    pub error: Option<DistributionResponseError>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationProofRequest {
    pub req_id: RequestId,
    pub uid: UserId,
    pub verifier_id: EntityId,
    pub verification_type: String,
    pub metadata: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationProofResponse {
    pub req_id: RequestId,
    pub uid: UserId,
    pub verification_id: Option<EntityId>,
    pub zk_proof_hash: Option<String>,
    pub midnight_proof_tx: Option<TxHash>,
    pub error: Option<VerificationProofResponseError>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifierApplicationRequest {
    pub req_id: RequestId,
    pub uid: UserId,
    pub full_name: String,
    pub motivation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifierApplicationResponse {
    pub req_id: RequestId,
    pub uid: UserId,
    pub application_id: Option<EntityId>,
    pub zk_proof_hash: Option<String>,
    pub error: Option<VerifierApplicationResponseError>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetTokenBalance {
    pub req_id: RequestId,
    pub uid: UserId,
    /// None means the currently active token contract.
    pub contract_address: Option<ContractAddress>,
    pub address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenBalance {
    pub req_id: RequestId,
    pub uid: UserId,
    pub contract_address: Option<ContractAddress>,
    pub address: String,
    pub balance: Decimal,
    pub error: Option<TokenBalanceResponseError>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Api {
    DeployTokenRequest(DeployTokenRequest),
    DeployTokenResponse(DeployTokenResponse),
    MintAidTokenRequest(MintAidTokenRequest),
    MintAidTokenResponse(MintAidTokenResponse),
    DistributionRequest(DistributionRequest),
    DistributionResponse(DistributionResponse),
    VerificationProofRequest(VerificationProofRequest),
    VerificationProofResponse(VerificationProofResponse),
    VerifierApplicationRequest(VerifierApplicationRequest),
    VerifierApplicationResponse(VerifierApplicationResponse),
    GetTokenBalance(GetTokenBalance),
    TokenBalance(TokenBalance),
}
