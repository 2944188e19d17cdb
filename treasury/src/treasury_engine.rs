use rust_decimal::prelude::*;

use bigdecimal::BigDecimal;
use uuid::Uuid;

use core_types::*;
use models::aid_tokens::AidToken;
use models::distributions::Distribution;
use models::midnight_transactions::MidnightTransaction;
use models::tokens::Token;
use models::user_verifications::UserVerification;
use models::verifier_applications::VerifierApplication;
use models::verifiers::Verifier;

use msgs::api::*;
use msgs::cli::{BurnTokens, BurnTokensResult, Cli, TreasuryStateRequest, TreasuryStateResponse};
use msgs::*;
use utils::time::time_now;
use utils::xlogging::*;
use xerror::treasury::TreasuryError;

use midnight_connector::connector::{MidnightConnector, TokenDeployment, TxReceipt};

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TreasuryEngineSettings {
    /// url to the postgres database.
    pub psql_url: String,
    pub treasury_zmq_pull_address: String,
    pub treasury_zmq_publish_address: String,
    pub treasury_cli_resp_address: String,
    pub logging_settings: LoggingSettings,
}

fn to_bigdecimal(value: Decimal) -> BigDecimal {
    BigDecimal::from_str(&value.to_string()).unwrap_or_default()
}

fn to_decimal(value: &BigDecimal) -> Decimal {
    Decimal::from_str(&value.to_string()).unwrap_or(Decimal::ZERO)
}

pub fn build_token_row(req: &DeployTokenRequest, deployment: &TokenDeployment) -> Token {
    let now = time_now() as i64;
    Token {
        id: Uuid::new_v4(),
        creator_uid: Some(req.uid as i32),
        name: req.name.clone(),
        symbol: req.symbol.clone(),
        supply: to_bigdecimal(req.supply),
        contract_address: Some(deployment.contract_address.clone()),
        midnight_tx_hash: Some(deployment.transaction_hash.clone()),
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

pub fn build_token_creation_log(req: &DeployTokenRequest, deployment: &TokenDeployment) -> MidnightTransaction {
    MidnightTransaction {
        id: Uuid::new_v4(),
        tx_hash: deployment.transaction_hash.clone(),
        tx_type: LedgerTxType::TokenCreation.to_string(),
        from_address: Some(req.uid.to_string()),
        to_address: None,
        amount: Some(to_bigdecimal(req.supply)),
        shielded: true,
        block_height: Some(deployment.block_height as i64),
        gas_used: None,
        status: LedgerTxStatus::Confirmed.to_string(),
        metadata: Some(serde_json::json!({
            "contract_address": deployment.contract_address,
            "token_name": req.name,
            "token_symbol": req.symbol,
        })),
        created_at: time_now() as i64,
    }
}

pub fn build_aid_token_row(req: &MintAidTokenRequest, contract: &str, receipt: &TxReceipt) -> AidToken {
    let now = time_now() as i64;
    AidToken {
        id: Uuid::new_v4(),
        recipient_uid: req.recipient_uid as i32,
        token_id: format!("AID_{}", time_now()),
        amount: to_bigdecimal(req.amount),
        token_type: req.token_type.to_string(),
        contract_address: contract.to_string(),
        midnight_tx_hash: Some(receipt.tx_hash.clone()),
        restrictions: req.restrictions.as_ref().map(|r| serde_json::json!(r)),
        expires_at: req.expires_at.map(|e| e as i64),
        is_active: true,
        used_amount: BigDecimal::default(),
        created_at: now,
        updated_at: now,
    }
}

pub fn build_token_mint_log(req: &MintAidTokenRequest, receipt: &TxReceipt) -> MidnightTransaction {
    MidnightTransaction {
        id: Uuid::new_v4(),
        tx_hash: receipt.tx_hash.clone(),
        tx_type: LedgerTxType::TokenMint.to_string(),
        from_address: Some(req.uid.to_string()),
        to_address: Some(req.recipient_uid.to_string()),
        amount: Some(to_bigdecimal(req.amount)),
        shielded: receipt.shielded,
        block_height: Some(receipt.block_height as i64),
        gas_used: Some(receipt.gas_used as i64),
        status: LedgerTxStatus::Confirmed.to_string(),
        metadata: None,
        created_at: time_now() as i64,
    }
}

pub fn build_distribution_row(req: &DistributionRequest, contract: &str, receipt: &TxReceipt) -> Distribution {
    let now = time_now() as i64;
    Distribution {
        id: Uuid::new_v4(),
        aid_request_id: req.aid_request_id,
        distributor_uid: req.uid as i32,
        recipient_uid: req.recipient_uid as i32,
        amount: to_bigdecimal(req.amount),
        token_contract_address: Some(contract.to_string()),
        midnight_tx_hash: Some(receipt.tx_hash.clone()),
        shielded_memo: req.shielded_memo.clone(),
        status: DistributionStatus::Completed.to_string(),
        distributed_at: Some(now),
        created_at: now,
    }
}

pub fn build_distribution_log(req: &DistributionRequest, contract: &str, receipt: &TxReceipt) -> MidnightTransaction {
    MidnightTransaction {
        id: Uuid::new_v4(),
        tx_hash: receipt.tx_hash.clone(),
        tx_type: LedgerTxType::Distribution.to_string(),
        from_address: Some(req.uid.to_string()),
        to_address: Some(req.recipient_uid.to_string()),
        amount: Some(to_bigdecimal(req.amount)),
        shielded: true,
        block_height: Some(receipt.block_height as i64),
        gas_used: Some(receipt.gas_used as i64),
        status: LedgerTxStatus::Confirmed.to_string(),
        metadata: Some(serde_json::json!({ "contract_address": contract })),
        created_at: time_now() as i64,
    }
}

pub fn build_verification_row(req: &VerificationProofRequest, zk_proof: &str, proof_tx: &str) -> UserVerification {
    UserVerification {
        id: Uuid::new_v4(),
        uid: req.uid as i32,
        verifier_id: req.verifier_id,
        verification_type: req.verification_type.clone(),
        zk_proof_hash: Some(zk_proof.to_string()),
        midnight_proof_tx: Some(proof_tx.to_string()),
        status: VerificationStatus::Pending.to_string(),
        metadata: req.metadata.as_ref().map(|m| serde_json::json!({ "note": m })),
        verified_at: None,
        expires_at: None,
        created_at: time_now() as i64,
    }
}

pub fn build_verification_proof_log(req: &VerificationProofRequest, proof_tx: &str) -> MidnightTransaction {
    MidnightTransaction {
        id: Uuid::new_v4(),
        tx_hash: proof_tx.to_string(),
        tx_type: LedgerTxType::VerificationProof.to_string(),
        from_address: Some(req.uid.to_string()),
        to_address: None,
        amount: None,
        shielded: true,
        block_height: None,
        gas_used: None,
        status: LedgerTxStatus::Confirmed.to_string(),
        metadata: Some(serde_json::json!({ "verification_type": req.verification_type })),
        created_at: time_now() as i64,
    }
}

pub fn build_application_row(req: &VerifierApplicationRequest, zk_proof: &str, tx_hash: &str) -> VerifierApplication {
    let now = time_now() as i64;
    VerifierApplication {
        id: Uuid::new_v4(),
        uid: req.uid as i32,
        full_name: req.full_name.clone(),
        motivation: req.motivation.clone(),
        status: VerificationStatus::Pending.to_string(),
        zk_verified: true,
        zk_proof_hash: Some(zk_proof.to_string()),
        midnight_tx_hash: Some(tx_hash.to_string()),
        created_at: now,
        updated_at: now,
    }
}

pub fn build_token_burn_log(burn: &BurnTokens, contract: &str, receipt: &TxReceipt) -> MidnightTransaction {
    MidnightTransaction {
        id: Uuid::new_v4(),
        tx_hash: receipt.tx_hash.clone(),
        tx_type: LedgerTxType::TokenBurn.to_string(),
        from_address: Some(burn.owner_address.clone()),
        to_address: None,
        amount: Some(to_bigdecimal(burn.amount)),
        shielded: receipt.shielded,
        block_height: Some(receipt.block_height as i64),
        gas_used: Some(receipt.gas_used as i64),
        status: LedgerTxStatus::Confirmed.to_string(),
        metadata: Some(serde_json::json!({ "contract_address": contract })),
        created_at: time_now() as i64,
    }
}

pub struct TreasuryEngine {
    /// Connection to the postgres DB.
    pub conn_pool: Option<DbPool>,
    pub midnight_connector: MidnightConnector,
    pub logger: slog::Logger,
}

impl TreasuryEngine {
    pub fn new(conn_pool: Option<DbPool>, midnight_connector: MidnightConnector, settings: TreasuryEngineSettings) -> Self {
        let logger = init_log(&settings.logging_settings);
        Self {
            conn_pool,
            midnight_connector,
            logger,
        }
    }

    /// Re-registers contracts persisted by earlier runs so the connector
    /// accepts operations against them.
    pub fn init_contracts(&mut self) {
        let conn = match self.get_conn() {
            Some(conn) => conn,
            None => return,
        };
        match Token::get_active(&conn) {
            Ok(tokens) => {
                for token in tokens {
                    if let Some(contract) = token.contract_address {
                        self.midnight_connector.register_contract(&contract);
                    }
                }
            }
            Err(err) => {
                slog::error!(self.logger, "Failed to load active tokens: {:?}", err);
            }
        }
    }

    fn get_conn(&self) -> Option<r2d2::PooledConnection<diesel::r2d2::ConnectionManager<diesel::PgConnection>>> {
        let pool = self.conn_pool.as_ref()?;
        match pool.get() {
            Ok(conn) => Some(conn),
            Err(err) => {
                slog::error!(self.logger, "Couldn't get psql connection: {:?}", err);
                None
            }
        }
    }

    /// The contract every mint and distribution runs against.
    fn active_contract(&mut self, conn: &diesel::PgConnection) -> Option<String> {
        let token = Token::get_newest_active(conn).ok()?;
        let contract = token.contract_address?;
        self.midnight_connector.register_contract(&contract);
        Some(contract)
    }

    pub fn process_msg<F: FnMut(Message, ServiceIdentity)>(&mut self, msg: Message, listener: &mut F) {
        match msg {
            Message::Api(api_msg) => match api_msg {
                Api::DeployTokenRequest(req) => self.process_deploy_token(req, listener),
                Api::MintAidTokenRequest(req) => self.process_mint_aid_token(req, listener),
                Api::DistributionRequest(req) => self.process_distribution(req, listener),
                Api::VerificationProofRequest(req) => self.process_verification_proof(req, listener),
                Api::VerifierApplicationRequest(req) => self.process_verifier_application(req, listener),
                Api::GetTokenBalance(req) => self.process_get_token_balance(req, listener),
                _ => {}
            },
            Message::Cli(cli_msg) => match cli_msg {
                Cli::BurnTokens(burn) => self.process_burn_tokens(burn, listener),
                Cli::TreasuryStateRequest(req) => self.process_treasury_state(req, listener),
                _ => {}
            },
        }
    }

    fn process_deploy_token<F: FnMut(Message, ServiceIdentity)>(&mut self, req: DeployTokenRequest, listener: &mut F) {
        let mut response = DeployTokenResponse {
            req_id: req.req_id,
            uid: req.uid,
            token_id: None,
            contract_address: None,
            tx_hash: None,
            block_height: None,
            error: None,
        };

        if req.supply <= Decimal::ZERO {
            response.error = Some(DeployTokenResponseError::InvalidSupply);
            listener(Message::Api(Api::DeployTokenResponse(response)), ServiceIdentity::Api);
            return;
        }

        let conn = match self.get_conn() {
            Some(conn) => conn,
            None => {
                response.error = Some(DeployTokenResponseError::DbFailure);
                listener(Message::Api(Api::DeployTokenResponse(response)), ServiceIdentity::Api);
                return;
            }
        };

        let deployment = match self
            .midnight_connector
            .deploy_token_contract(&req.name, &req.symbol, req.supply)
        {
            Ok(deployment) => deployment,
            Err(err) => {
                slog::error!(self.logger, "Token deployment failed: {:?}", err);
                response.error = Some(DeployTokenResponseError::LedgerUnavailable);
                listener(Message::Api(Api::DeployTokenResponse(response)), ServiceIdentity::Api);
                return;
            }
        };

        let token_row = build_token_row(&req, &deployment);
        let log_row = build_token_creation_log(&req, &deployment);

        let inserted = token_row.insert(&conn).and_then(|token_id| {
            log_row.insert(&conn)?;
            Ok(token_id)
        });

        match inserted {
            Ok(token_id) => {
                slog::info!(
                    self.logger,
                    "Deployed token {} at {}",
                    req.symbol,
                    deployment.contract_address
                );
                response.token_id = Some(token_id);
                response.contract_address = Some(deployment.contract_address);
                response.tx_hash = Some(deployment.transaction_hash);
                response.block_height = Some(deployment.block_height);
            }
            Err(err) => {
                slog::error!(self.logger, "Failed to persist token: {:?}", err);
                response.error = Some(DeployTokenResponseError::DbFailure);
            }
        }
        listener(Message::Api(Api::DeployTokenResponse(response)), ServiceIdentity::Api);
    }

    fn process_mint_aid_token<F: FnMut(Message, ServiceIdentity)>(&mut self, req: MintAidTokenRequest, listener: &mut F) {
        let mut response = MintAidTokenResponse {
            req_id: req.req_id,
            uid: req.uid,
            aid_token_id: None,
            token_id: None,
            contract_address: None,
            tx_hash: None,
            error: None,
        };

        if req.amount <= Decimal::ZERO {
            response.error = Some(MintAidTokenResponseError::InvalidAmount);
            listener(Message::Api(Api::MintAidTokenResponse(response)), ServiceIdentity::Api);
            return;
        }

        let conn = match self.get_conn() {
            Some(conn) => conn,
            None => {
                response.error = Some(MintAidTokenResponseError::DbFailure);
                listener(Message::Api(Api::MintAidTokenResponse(response)), ServiceIdentity::Api);
                return;
            }
        };

        let contract = match self.active_contract(&conn) {
            Some(contract) => contract,
            None => {
                response.error = Some(MintAidTokenResponseError::NoActiveToken);
                listener(Message::Api(Api::MintAidTokenResponse(response)), ServiceIdentity::Api);
                return;
            }
        };

        let receipt = match self
            .midnight_connector
            .mint(&contract, &req.recipient_uid.to_string(), req.amount)
        {
            Ok(receipt) => receipt,
            Err(err) => {
                slog::error!(self.logger, "Mint failed on {}: {:?}", contract, err);
                response.error = Some(MintAidTokenResponseError::LedgerUnavailable);
                listener(Message::Api(Api::MintAidTokenResponse(response)), ServiceIdentity::Api);
                return;
            }
        };

        let aid_token_row = build_aid_token_row(&req, &contract, &receipt);
        let log_row = build_token_mint_log(&req, &receipt);
        let token_id = aid_token_row.token_id.clone();

        let inserted = aid_token_row.insert(&conn).and_then(|aid_token_id| {
            log_row.insert(&conn)?;
            Ok(aid_token_id)
        });

        match inserted {
            Ok(aid_token_id) => {
                slog::info!(self.logger, "Minted {} for uid {}", token_id, req.recipient_uid);
                response.aid_token_id = Some(aid_token_id);
                response.token_id = Some(token_id);
                response.contract_address = Some(contract);
                response.tx_hash = Some(receipt.tx_hash);
            }
            Err(err) => {
                slog::error!(self.logger, "Failed to persist aid token: {:?}", err);
                response.error = Some(MintAidTokenResponseError::DbFailure);
            }
        }
        listener(Message::Api(Api::MintAidTokenResponse(response)), ServiceIdentity::Api);
    }

    fn process_distribution<F: FnMut(Message, ServiceIdentity)>(&mut self, req: DistributionRequest, listener: &mut F) {
        let mut response = DistributionResponse {
            req_id: req.req_id,
            uid: req.uid,
            distribution_id: None,
            tx_hash: None,
            status: None,
            error: None,
        };

        if req.amount <= Decimal::ZERO {
            response.error = Some(DistributionResponseError::InvalidAmount);
            listener(Message::Api(Api::DistributionResponse(response)), ServiceIdentity::Api);
            return;
        }

        let conn = match self.get_conn() {
            Some(conn) => conn,
            None => {
                response.error = Some(DistributionResponseError::DbFailure);
                listener(Message::Api(Api::DistributionResponse(response)), ServiceIdentity::Api);
                return;
            }
        };

        let contract = match self.active_contract(&conn) {
            Some(contract) => contract,
            None => {
                response.error = Some(DistributionResponseError::NoActiveToken);
                listener(Message::Api(Api::DistributionResponse(response)), ServiceIdentity::Api);
                return;
            }
        };

        let receipt = match self.midnight_connector.transfer(
            &contract,
            &req.uid.to_string(),
            &req.recipient_uid.to_string(),
            req.amount,
        ) {
            Ok(receipt) => receipt,
            Err(err) => {
                slog::error!(self.logger, "Distribution transfer failed: {:?}", err);
                response.error = Some(DistributionResponseError::LedgerUnavailable);
                listener(Message::Api(Api::DistributionResponse(response)), ServiceIdentity::Api);
                return;
            }
        };

        let distribution_row = build_distribution_row(&req, &contract, &receipt);
        let log_row = build_distribution_log(&req, &contract, &receipt);

        let inserted = distribution_row.insert(&conn).and_then(|distribution_id| {
            log_row.insert(&conn)?;
            Ok(distribution_id)
        });

        match inserted {
            Ok(distribution_id) => {
                slog::info!(
                    self.logger,
                    "Distributed {} to uid {} for request {}",
                    req.amount,
                    req.recipient_uid,
                    req.aid_request_id
                );
                response.distribution_id = Some(distribution_id);
                response.tx_hash = Some(receipt.tx_hash);
                response.status = Some(DistributionStatus::Completed);
            }
            Err(err) => {
                slog::error!(self.logger, "Failed to persist distribution: {:?}", err);
                response.error = Some(DistributionResponseError::DbFailure);
            }
        }
        listener(Message::Api(Api::DistributionResponse(response)), ServiceIdentity::Api);
    }

    fn process_verification_proof<F: FnMut(Message, ServiceIdentity)>(
        &mut self,
        req: VerificationProofRequest,
        listener: &mut F,
    ) {
        let mut response = VerificationProofResponse {
            req_id: req.req_id,
            uid: req.uid,
            verification_id: None,
            zk_proof_hash: None,
            midnight_proof_tx: None,
            error: None,
        };

        let conn = match self.get_conn() {
            Some(conn) => conn,
            None => {
                response.error = Some(VerificationProofResponseError::DbFailure);
                listener(Message::Api(Api::VerificationProofResponse(response)), ServiceIdentity::Api);
                return;
            }
        };

        if Verifier::get_by_id(&conn, req.verifier_id).is_err() {
            response.error = Some(VerificationProofResponseError::UnknownVerifier);
            listener(Message::Api(Api::VerificationProofResponse(response)), ServiceIdentity::Api);
            return;
        }

        let zk_proof = midnight_connector::connector::zk_proof_hash();
        let proof_tx = midnight_connector::connector::proof_tx_hash();

        let verification_row = build_verification_row(&req, &zk_proof, &proof_tx);
        let log_row = build_verification_proof_log(&req, &proof_tx);

        let inserted = verification_row.insert(&conn).and_then(|verification_id| {
            log_row.insert(&conn)?;
            Ok(verification_id)
        });

        match inserted {
            Ok(verification_id) => {
                if let Err(err) = Verifier::increment_verifications(&conn, req.verifier_id) {
                    slog::warn!(self.logger, "Failed to bump verifier count: {:?}", err);
                }
                slog::info!(self.logger, "Recorded verification proof for uid {}", req.uid);
                response.verification_id = Some(verification_id);
                response.zk_proof_hash = Some(zk_proof);
                response.midnight_proof_tx = Some(proof_tx);
            }
            Err(err) => {
                slog::error!(self.logger, "Failed to persist verification: {:?}", err);
                response.error = Some(VerificationProofResponseError::DbFailure);
            }
        }
        listener(Message::Api(Api::VerificationProofResponse(response)), ServiceIdentity::Api);
    }

    fn process_verifier_application<F: FnMut(Message, ServiceIdentity)>(
        &mut self,
        req: VerifierApplicationRequest,
        listener: &mut F,
    ) {
        let mut response = VerifierApplicationResponse {
            req_id: req.req_id,
            uid: req.uid,
            application_id: None,
            zk_proof_hash: None,
            error: None,
        };

        let conn = match self.get_conn() {
            Some(conn) => conn,
            None => {
                response.error = Some(VerifierApplicationResponseError::DbFailure);
                listener(Message::Api(Api::VerifierApplicationResponse(response)), ServiceIdentity::Api);
                return;
            }
        };

        match VerifierApplication::get_pending_by_uid(&conn, req.uid as i32) {
            Ok(pending) if !pending.is_empty() => {
                response.error = Some(VerifierApplicationResponseError::AlreadyApplied);
                listener(Message::Api(Api::VerifierApplicationResponse(response)), ServiceIdentity::Api);
                return;
            }
            Ok(_) => {}
            Err(err) => {
                slog::error!(self.logger, "Failed to check applications: {:?}", err);
                response.error = Some(VerifierApplicationResponseError::DbFailure);
                listener(Message::Api(Api::VerifierApplicationResponse(response)), ServiceIdentity::Api);
                return;
            }
        }

        // Applications carry fabricated identity proofs but no ledger log row.
        let zk_proof = midnight_connector::connector::zk_proof_hash();
        let tx_hash = midnight_connector::connector::midnight_tx_hash();
        let application_row = build_application_row(&req, &zk_proof, &tx_hash);

        match application_row.insert(&conn) {
            Ok(application_id) => {
                slog::info!(self.logger, "Recorded verifier application for uid {}", req.uid);
                response.application_id = Some(application_id);
                response.zk_proof_hash = Some(zk_proof);
            }
            Err(err) => {
                slog::error!(self.logger, "Failed to persist application: {:?}", err);
                response.error = Some(VerifierApplicationResponseError::DbFailure);
            }
        }
        listener(Message::Api(Api::VerifierApplicationResponse(response)), ServiceIdentity::Api);
    }

    fn process_get_token_balance<F: FnMut(Message, ServiceIdentity)>(&mut self, req: GetTokenBalance, listener: &mut F) {
        let mut response = TokenBalance {
            req_id: req.req_id,
            uid: req.uid,
            contract_address: req.contract_address.clone(),
            address: req.address.clone(),
            balance: Decimal::ZERO,
            error: None,
        };

        let contract = match req.contract_address {
            Some(contract) => Some(contract),
            None => self.get_conn().and_then(|conn| self.active_contract(&conn)),
        };

        match contract {
            Some(contract) => {
                response.balance = self.midnight_connector.token_balance(&contract, &req.address);
                response.contract_address = Some(contract);
            }
            None => {
                response.error = Some(TokenBalanceResponseError::NoActiveToken);
            }
        }
        listener(Message::Api(Api::TokenBalance(response)), ServiceIdentity::Api);
    }

    fn process_burn_tokens<F: FnMut(Message, ServiceIdentity)>(&mut self, burn: BurnTokens, listener: &mut F) {
        if burn.amount <= Decimal::ZERO {
            let result = BurnTokensResult {
                burn,
                tx_hash: None,
                result: TreasuryError::InvalidAmount.to_string(),
            };
            listener(Message::Cli(Cli::BurnTokensResult(result)), ServiceIdentity::Cli);
            return;
        }

        let contract = match burn.contract_address.clone() {
            Some(contract) => Some(contract),
            None => self.get_conn().and_then(|conn| self.active_contract(&conn)),
        };

        let contract = match contract {
            Some(contract) => contract,
            None => {
                let result = BurnTokensResult {
                    burn,
                    tx_hash: None,
                    result: TreasuryError::NoActiveToken.to_string(),
                };
                listener(Message::Cli(Cli::BurnTokensResult(result)), ServiceIdentity::Cli);
                return;
            }
        };

        match self
            .midnight_connector
            .burn(&contract, &burn.owner_address, burn.amount)
        {
            Ok(receipt) => {
                let log_row = build_token_burn_log(&burn, &contract, &receipt);
                let persisted = match self.get_conn() {
                    Some(conn) => log_row.insert(&conn).map(|_| ()),
                    None => Ok(()),
                };
                let result = BurnTokensResult {
                    burn,
                    tx_hash: Some(receipt.tx_hash),
                    result: match persisted {
                        Ok(()) => "Success".to_string(),
                        Err(err) => format!("BurnedButNotLogged: {:?}", err),
                    },
                };
                listener(Message::Cli(Cli::BurnTokensResult(result)), ServiceIdentity::Cli);
            }
            Err(err) => {
                let result = BurnTokensResult {
                    burn,
                    tx_hash: None,
                    result: format!("{}", err),
                };
                listener(Message::Cli(Cli::BurnTokensResult(result)), ServiceIdentity::Cli);
            }
        }
    }

    fn process_treasury_state<F: FnMut(Message, ServiceIdentity)>(&mut self, _req: TreasuryStateRequest, listener: &mut F) {
        let conn = match self.get_conn() {
            Some(conn) => conn,
            None => {
                let response = TreasuryStateResponse {
                    tokens: 0,
                    aid_tokens: 0,
                    distributions: 0,
                    ledger_txs: 0,
                    total_distributed: Decimal::ZERO,
                };
                listener(Message::Cli(Cli::TreasuryStateResponse(response)), ServiceIdentity::Cli);
                return;
            }
        };

        let response = TreasuryStateResponse {
            tokens: Token::count(&conn).unwrap_or(0) as u64,
            aid_tokens: AidToken::count(&conn).unwrap_or(0) as u64,
            distributions: Distribution::count(&conn).unwrap_or(0) as u64,
            ledger_txs: MidnightTransaction::count(&conn).unwrap_or(0) as u64,
            total_distributed: Distribution::total_amount(&conn)
                .ok()
                .flatten()
                .map(|total| to_decimal(&total))
                .unwrap_or(Decimal::ZERO),
        };
        listener(Message::Cli(Cli::TreasuryStateResponse(response)), ServiceIdentity::Cli);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use midnight_connector::connector::MidnightConnectorSettings;
    use rust_decimal_macros::dec;

    fn distribution_request(amount: Decimal) -> DistributionRequest {
        DistributionRequest {
            req_id: Uuid::new_v4(),
            uid: 11,
            aid_request_id: Uuid::new_v4(),
            recipient_uid: 22,
            amount,
            shielded_memo: Some("winter blankets".to_string()),
        }
    }

    fn receipt() -> TxReceipt {
        TxReceipt {
            tx_hash: "midnight_1700000000000_abc123def".to_string(),
            shielded: true,
            block_height: 1_000_001,
            gas_used: 30_000,
        }
    }

    #[test]
    fn distribution_rows_are_completed_and_shielded() {
        let req = distribution_request(dec!(1000.50));
        let receipt = receipt();

        let row = build_distribution_row(&req, "0xABC", &receipt);
        assert_eq!(row.status, "completed");
        assert!(row.distributed_at.is_some());
        assert_eq!(row.token_contract_address.as_deref(), Some("0xABC"));
        assert_eq!(row.midnight_tx_hash.as_deref(), Some(receipt.tx_hash.as_str()));
        assert_eq!(row.amount, BigDecimal::from_str("1000.50").unwrap());

        let log = build_distribution_log(&req, "0xABC", &receipt);
        assert_eq!(log.tx_type, "distribution");
        assert!(log.shielded);
        assert_eq!(log.status, "confirmed");
        assert_eq!(log.tx_hash, receipt.tx_hash);
        assert_eq!(log.from_address.as_deref(), Some("11"));
        assert_eq!(log.to_address.as_deref(), Some("22"));
    }

    #[test]
    fn token_rows_carry_deployment_details() {
        let req = DeployTokenRequest {
            req_id: Uuid::new_v4(),
            uid: 3,
            name: "AidCoin".to_string(),
            symbol: "AID".to_string(),
            supply: dec!(1000000),
        };
        let deployment = TokenDeployment {
            contract_address: "0xfeedface".to_string(),
            transaction_hash: "midnight_1700000000000_zzz999aaa".to_string(),
            block_height: 1_000_002,
        };

        let row = build_token_row(&req, &deployment);
        assert!(row.is_active);
        assert_eq!(row.contract_address.as_deref(), Some("0xfeedface"));
        assert_eq!(row.midnight_tx_hash.as_deref(), Some(deployment.transaction_hash.as_str()));

        let log = build_token_creation_log(&req, &deployment);
        assert_eq!(log.tx_type, "token_creation");
        assert!(log.shielded);
        let metadata = log.metadata.unwrap();
        assert_eq!(metadata["token_symbol"], "AID");
        assert_eq!(metadata["contract_address"], "0xfeedface");
    }

    #[test]
    fn minted_aid_tokens_get_prefixed_ids() {
        let req = MintAidTokenRequest {
            req_id: Uuid::new_v4(),
            uid: 5,
            recipient_uid: 9,
            amount: dec!(75),
            token_type: AidType::Water,
            restrictions: Some(vec!["water_purchase".to_string()]),
            expires_at: Some(1_800_000_000_000),
        };
        let receipt = receipt();

        let row = build_aid_token_row(&req, "0xABC", &receipt);
        assert!(row.token_id.starts_with("AID_"));
        assert_eq!(row.token_type, "water");
        assert!(row.is_active);
        assert_eq!(row.used_amount, BigDecimal::default());
        assert_eq!(row.expires_at, Some(1_800_000_000_000));

        let log = build_token_mint_log(&req, &receipt);
        assert_eq!(log.tx_type, "token_mint");
        assert_eq!(log.from_address.as_deref(), Some("5"));
        assert_eq!(log.to_address.as_deref(), Some("9"));
    }

    #[test]
    fn verification_rows_start_pending() {
        let req = VerificationProofRequest {
            req_id: Uuid::new_v4(),
            uid: 7,
            verifier_id: Uuid::new_v4(),
            verification_type: "identity".to_string(),
            metadata: None,
        };
        let row = build_verification_row(&req, "zk_1700000000000_aaa", "midnight_proof_1700000000000_bbb");
        assert_eq!(row.status, "pending");
        assert!(row.verified_at.is_none());
        assert_eq!(row.zk_proof_hash.as_deref(), Some("zk_1700000000000_aaa"));

        let log = build_verification_proof_log(&req, "midnight_proof_1700000000000_bbb");
        assert_eq!(log.tx_type, "verification_proof");
        assert!(log.amount.is_none());
        assert!(log.shielded);
    }

    fn test_engine() -> TreasuryEngine {
        let settings = MidnightConnectorSettings {
            network_id: "testnet".to_string(),
            node_url: "http://localhost:9944".to_string(),
            indexer_url: "http://localhost:8088".to_string(),
            proof_server_url: "http://localhost:6300".to_string(),
        };
        TreasuryEngine {
            conn_pool: None,
            midnight_connector: MidnightConnector::new(settings),
            logger: slog::Logger::root(slog::Discard, slog::o!()),
        }
    }

    #[test]
    fn burns_reject_bad_amounts_and_missing_contracts() {
        let mut engine = test_engine();
        let mut results = Vec::new();
        let mut listener = |msg: Message, _: ServiceIdentity| results.push(msg);

        let burn = BurnTokens {
            contract_address: Some("0xABC".to_string()),
            owner_address: "22".to_string(),
            amount: dec!(0),
        };
        engine.process_msg(Message::Cli(Cli::BurnTokens(burn)), &mut listener);

        let burn = BurnTokens {
            contract_address: None,
            owner_address: "22".to_string(),
            amount: dec!(10),
        };
        engine.process_msg(Message::Cli(Cli::BurnTokens(burn)), &mut listener);

        match (&results[0], &results[1]) {
            (Message::Cli(Cli::BurnTokensResult(first)), Message::Cli(Cli::BurnTokensResult(second))) => {
                assert_eq!(first.result, "InvalidAmount");
                assert!(first.tx_hash.is_none());
                assert_eq!(second.result, "NoActiveToken");
            }
            other => panic!("unexpected responses: {:?}", other),
        }
    }

    #[test]
    fn applications_are_pending_but_zk_verified() {
        let req = VerifierApplicationRequest {
            req_id: Uuid::new_v4(),
            uid: 13,
            full_name: "Amina Diallo".to_string(),
            motivation: "Community organizer for ten years".to_string(),
        };
        let row = build_application_row(&req, "zk_1700000000000_ccc", "midnight_1700000000000_ddd");
        assert_eq!(row.status, "pending");
        assert!(row.zk_verified);
        assert_eq!(row.uid, 13);
    }
}
