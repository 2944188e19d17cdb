use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use utils::time::*;
use xerror::midnight_connector::*;

use core_types::*;
use rand::Rng;

use std::collections::{HashMap, HashSet};

const HASH_SUFFIX_LEN: usize = 9;
const HASH_SUFFIX_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const BASE_BLOCK_HEIGHT: u64 = 1_000_000;

/// Fabricates a base36 suffix matching the shape of real Midnight identifiers.
fn hash_suffix() -> String {
    let mut rng = rand::thread_rng();
    (0..HASH_SUFFIX_LEN)
        .map(|_| {
            let idx = rng.gen_range(0..HASH_SUFFIX_CHARSET.len());
            HASH_SUFFIX_CHARSET[idx] as char
        })
        .collect()
}

/// Transaction identifier for a ledger operation. Every call produces a fresh
/// one, even for identical inputs.
pub fn midnight_tx_hash() -> TxHash {
    format!("midnight_{}_{}", time_now(), hash_suffix())
}

/// Identifier for a fabricated zero-knowledge proof.
pub fn zk_proof_hash() -> String {
    format!("zk_{}_{}", time_now(), hash_suffix())
}

/// Transaction identifier for a submitted proof.
pub fn proof_tx_hash() -> TxHash {
    format!("midnight_proof_{}_{}", time_now(), hash_suffix())
}

fn fabricate_contract_address() -> ContractAddress {
    let mut rng = rand::thread_rng();
    let bytes: [u8; 20] = rng.gen();
    format!("0x{}", hex::encode(bytes))
}

fn fabricate_gas() -> u64 {
    rand::thread_rng().gen_range(21_000..75_000)
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MidnightConnectorSettings {
    pub network_id: String,
    pub node_url: String,
    pub indexer_url: String,
    pub proof_server_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenDeployment {
    pub contract_address: ContractAddress,
    pub transaction_hash: TxHash,
    pub block_height: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxReceipt {
    pub tx_hash: TxHash,
    pub shielded: bool,
    pub block_height: u64,
    pub gas_used: u64,
}

/// Simulated client for the Midnight network. All operations resolve locally:
/// contract addresses, block heights and transaction hashes are fabricated,
/// and balances live in an in-process book.
pub struct MidnightConnector {
    _settings: MidnightConnectorSettings,
    block_height: u64,
    contracts: HashSet<ContractAddress>,
    balances: HashMap<(ContractAddress, String), Decimal>,
}

impl MidnightConnector {
    pub fn new(settings: MidnightConnectorSettings) -> Self {
        Self {
            _settings: settings,
            block_height: BASE_BLOCK_HEIGHT,
            contracts: HashSet::new(),
            balances: HashMap::new(),
        }
    }

    fn next_block(&mut self) -> u64 {
        self.block_height += 1;
        self.block_height
    }

    pub fn deploy_token_contract(
        &mut self,
        _name: &str,
        _symbol: &str,
        supply: Decimal,
    ) -> Result<TokenDeployment, MidnightConnectorError> {
        if supply <= Decimal::ZERO {
            return Err(MidnightConnectorError::InvalidAmount);
        }
        let contract_address = fabricate_contract_address();
        self.contracts.insert(contract_address.clone());
        Ok(TokenDeployment {
            contract_address,
            transaction_hash: midnight_tx_hash(),
            block_height: self.next_block(),
        })
    }

    /// Lets the treasury adopt contracts recorded before this process started.
    pub fn register_contract(&mut self, contract: &str) {
        self.contracts.insert(contract.to_string());
    }

    pub fn mint(
        &mut self,
        contract: &str,
        recipient: &str,
        amount: Decimal,
    ) -> Result<TxReceipt, MidnightConnectorError> {
        if amount <= Decimal::ZERO {
            return Err(MidnightConnectorError::InvalidAmount);
        }
        if !self.contracts.contains(contract) {
            return Err(MidnightConnectorError::UnknownContract);
        }
        let key = (contract.to_string(), recipient.to_string());
        *self.balances.entry(key).or_insert(Decimal::ZERO) += amount;
        Ok(self.receipt())
    }

    /// Shielded transfer. Sender balances are not enforced, amounts on the
    /// simulated network are private.
    pub fn transfer(
        &mut self,
        contract: &str,
        from: &str,
        to: &str,
        amount: Decimal,
    ) -> Result<TxReceipt, MidnightConnectorError> {
        if amount <= Decimal::ZERO {
            return Err(MidnightConnectorError::InvalidAmount);
        }
        if !self.contracts.contains(contract) {
            return Err(MidnightConnectorError::UnknownContract);
        }
        let from_key = (contract.to_string(), from.to_string());
        if let Some(balance) = self.balances.get_mut(&from_key) {
            if *balance >= amount {
                *balance -= amount;
            }
        }
        let to_key = (contract.to_string(), to.to_string());
        *self.balances.entry(to_key).or_insert(Decimal::ZERO) += amount;
        Ok(self.receipt())
    }

    pub fn burn(
        &mut self,
        contract: &str,
        owner: &str,
        amount: Decimal,
    ) -> Result<TxReceipt, MidnightConnectorError> {
        if amount <= Decimal::ZERO {
            return Err(MidnightConnectorError::InvalidAmount);
        }
        if !self.contracts.contains(contract) {
            return Err(MidnightConnectorError::UnknownContract);
        }
        let key = (contract.to_string(), owner.to_string());
        let balance = self.balances.entry(key).or_insert(Decimal::ZERO);
        if *balance < amount {
            return Err(MidnightConnectorError::InsufficientBalance);
        }
        *balance -= amount;
        Ok(self.receipt())
    }

    pub fn token_balance(&self, contract: &str, address: &str) -> Decimal {
        self.balances
            .get(&(contract.to_string(), address.to_string()))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    fn receipt(&mut self) -> TxReceipt {
        TxReceipt {
            tx_hash: midnight_tx_hash(),
            shielded: true,
            block_height: self.next_block(),
            gas_used: fabricate_gas(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn connector() -> MidnightConnector {
        MidnightConnector::new(MidnightConnectorSettings {
            network_id: "testnet-02".to_string(),
            node_url: "http://localhost:9944".to_string(),
            indexer_url: "http://localhost:8088".to_string(),
            proof_server_url: "http://localhost:6300".to_string(),
        })
    }

    #[test]
    fn deploying_twice_yields_distinct_identifiers() {
        let mut conn = connector();
        let first = conn.deploy_token_contract("AidCoin", "AID", dec!(1000000)).unwrap();
        let second = conn.deploy_token_contract("AidCoin", "AID", dec!(1000000)).unwrap();
        assert_ne!(first.transaction_hash, second.transaction_hash);
        assert_ne!(first.contract_address, second.contract_address);
        assert!(second.block_height > first.block_height);
    }

    #[test]
    fn fabricated_identifiers_have_expected_shape() {
        let tx = midnight_tx_hash();
        assert!(tx.starts_with("midnight_"));
        let zk = zk_proof_hash();
        assert!(zk.starts_with("zk_"));
        let proof = proof_tx_hash();
        assert!(proof.starts_with("midnight_proof_"));
        let suffix = tx.rsplit('_').next().unwrap();
        assert_eq!(suffix.len(), 9);
    }

    #[test]
    fn mint_transfer_burn_bookkeeping() {
        let mut conn = connector();
        let deployment = conn.deploy_token_contract("AidCoin", "AID", dec!(1000)).unwrap();
        let contract = deployment.contract_address;

        conn.mint(&contract, "alice", dec!(100)).unwrap();
        assert_eq!(conn.token_balance(&contract, "alice"), dec!(100));

        conn.transfer(&contract, "alice", "bob", dec!(40)).unwrap();
        assert_eq!(conn.token_balance(&contract, "alice"), dec!(60));
        assert_eq!(conn.token_balance(&contract, "bob"), dec!(40));

        conn.burn(&contract, "bob", dec!(15)).unwrap();
        assert_eq!(conn.token_balance(&contract, "bob"), dec!(25));

        assert_eq!(conn.token_balance(&contract, "carol"), Decimal::ZERO);
    }

    #[test]
    fn operations_reject_bad_input() {
        let mut conn = connector();
        assert!(matches!(
            conn.deploy_token_contract("AidCoin", "AID", dec!(0)),
            Err(MidnightConnectorError::InvalidAmount)
        ));
        assert!(matches!(
            conn.mint("0xdeadbeef", "alice", dec!(10)),
            Err(MidnightConnectorError::UnknownContract)
        ));
        let deployment = conn.deploy_token_contract("AidCoin", "AID", dec!(1000)).unwrap();
        conn.mint(&deployment.contract_address, "alice", dec!(5)).unwrap();
        assert!(matches!(
            conn.burn(&deployment.contract_address, "alice", dec!(6)),
            Err(MidnightConnectorError::InsufficientBalance)
        ));
    }

    #[test]
    fn transfers_tolerate_unknown_senders() {
        let mut conn = connector();
        let deployment = conn.deploy_token_contract("AidCoin", "AID", dec!(1000)).unwrap();
        let receipt = conn
            .transfer(&deployment.contract_address, "treasury", "dave", dec!(30))
            .unwrap();
        assert!(receipt.shielded);
        assert_eq!(conn.token_balance(&deployment.contract_address, "dave"), dec!(30));
    }
}
