use diesel::{r2d2::ConnectionManager, PgConnection};
use rust_decimal::prelude::*;
use uuid::Uuid;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Categories of aid a request or token can cover.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AidType {
    Food,
    Medical,
    Shelter,
    Water,
    Education,
    Emergency,
}

impl fmt::Display for AidType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = match self {
            Self::Food => "food",
            Self::Medical => "medical",
            Self::Shelter => "shelter",
            Self::Water => "water",
            Self::Education => "education",
            Self::Emergency => "emergency",
        };

        write!(f, "{sign}")
    }
}

impl FromStr for AidType {
    type Err = String;

    fn from_str(aid_type: &str) -> Result<AidType, Self::Err> {
        let aid_type = aid_type.to_lowercase();
        match &aid_type[..] {
            "food" => Ok(AidType::Food),
            "medical" => Ok(AidType::Medical),
            "shelter" => Ok(AidType::Shelter),
            "water" => Ok(AidType::Water),
            "education" => Ok(AidType::Education),
            "emergency" => Ok(AidType::Emergency),
            _ => Err("unknown aid type".to_string()),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AidRequestStatus {
    Pending,
    Approved,
    Rejected,
    Distributed,
}

impl fmt::Display for AidRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Distributed => "distributed",
        };

        write!(f, "{sign}")
    }
}

impl FromStr for AidRequestStatus {
    type Err = String;

    fn from_str(status: &str) -> Result<AidRequestStatus, Self::Err> {
        match status {
            "pending" => Ok(AidRequestStatus::Pending),
            "approved" => Ok(AidRequestStatus::Approved),
            "rejected" => Ok(AidRequestStatus::Rejected),
            "distributed" => Ok(AidRequestStatus::Distributed),
            _ => Err("unknown aid request status".to_string()),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionStatus {
    Pending,
    Completed,
    Failed,
}

impl fmt::Display for DistributionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
        };

        write!(f, "{sign}")
    }
}

impl FromStr for DistributionStatus {
    type Err = String;

    fn from_str(status: &str) -> Result<DistributionStatus, Self::Err> {
        match status {
            "pending" => Ok(DistributionStatus::Pending),
            "completed" => Ok(DistributionStatus::Completed),
            "failed" => Ok(DistributionStatus::Failed),
            _ => Err("unknown distribution status".to_string()),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Pending,
    Verified,
    Rejected,
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = match self {
            Self::Pending => "pending",
            Self::Verified => "verified",
            Self::Rejected => "rejected",
        };

        write!(f, "{sign}")
    }
}

impl FromStr for VerificationStatus {
    type Err = String;

    fn from_str(status: &str) -> Result<VerificationStatus, Self::Err> {
        match status {
            "pending" => Ok(VerificationStatus::Pending),
            "verified" => Ok(VerificationStatus::Verified),
            "rejected" => Ok(VerificationStatus::Rejected),
            _ => Err("unknown verification status".to_string()),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum VerifierRole {
    CommunityLeader,
    NgoRepresentative,
    GovernmentOfficial,
}

impl fmt::Display for VerifierRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = match self {
            Self::CommunityLeader => "community_leader",
            Self::NgoRepresentative => "ngo_representative",
            Self::GovernmentOfficial => "government_official",
        };

        write!(f, "{sign}")
    }
}

impl FromStr for VerifierRole {
    type Err = String;

    fn from_str(role: &str) -> Result<VerifierRole, Self::Err> {
        match role {
            "community_leader" => Ok(VerifierRole::CommunityLeader),
            "ngo_representative" => Ok(VerifierRole::NgoRepresentative),
            "government_official" => Ok(VerifierRole::GovernmentOfficial),
            _ => Err("unknown verifier role".to_string()),
        }
    }
}

/// Confirmation state of a ledger transaction.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerTxStatus {
    Pending,
    Confirmed,
    Failed,
}

impl fmt::Display for LedgerTxStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Failed => "failed",
        };

        write!(f, "{sign}")
    }
}

impl FromStr for LedgerTxStatus {
    type Err = String;

    fn from_str(status: &str) -> Result<LedgerTxStatus, Self::Err> {
        match status {
            "pending" => Ok(LedgerTxStatus::Pending),
            "confirmed" => Ok(LedgerTxStatus::Confirmed),
            "failed" => Ok(LedgerTxStatus::Failed),
            _ => Err("unknown ledger tx status".to_string()),
        }
    }
}

/// Kind of operation a ledger log row records.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum LedgerTxType {
    TokenCreation,
    TokenMint,
    TokenBurn,
    Distribution,
    VerificationProof,
}

impl fmt::Display for LedgerTxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = match self {
            Self::TokenCreation => "token_creation",
            Self::TokenMint => "token_mint",
            Self::TokenBurn => "token_burn",
            Self::Distribution => "distribution",
            Self::VerificationProof => "verification_proof",
        };

        write!(f, "{sign}")
    }
}

impl FromStr for LedgerTxType {
    type Err = String;

    fn from_str(tx_type: &str) -> Result<LedgerTxType, Self::Err> {
        match tx_type {
            "token_creation" => Ok(LedgerTxType::TokenCreation),
            "token_mint" => Ok(LedgerTxType::TokenMint),
            "token_burn" => Ok(LedgerTxType::TokenBurn),
            "distribution" => Ok(LedgerTxType::Distribution),
            "verification_proof" => Ok(LedgerTxType::VerificationProof),
            _ => Err("unknown ledger tx type".to_string()),
        }
    }
}

pub type RequestId = Uuid;
pub type EntityId = Uuid;
pub type UserId = u64;
pub type ContractAddress = String;
pub type TxHash = String;

pub type DbPool = r2d2::Pool<ConnectionManager<PgConnection>>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ServiceIdentity {
    Api,
    TreasuryEngine,
    Loopback,
    Cli,
}

/// Aggregate view over the ledger transaction log.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LedgerStats {
    pub total_transactions: u64,
    pub shielded_transactions: u64,
    pub total_value_transferred: Decimal,
    pub privacy_rate: Decimal,
}

impl LedgerStats {
    pub fn new(total: u64, shielded: u64, total_value: Decimal) -> Self {
        let privacy_rate = if total == 0 {
            Decimal::ZERO
        } else {
            Decimal::from(shielded) / Decimal::from(total) * Decimal::from(100)
        };
        Self {
            total_transactions: total,
            shielded_transactions: shielded,
            total_value_transferred: total_value,
            privacy_rate,
        }
    }
}

impl Default for LedgerStats {
    fn default() -> Self {
        Self::new(0, 0, Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn aid_type_round_trips_through_strings() {
        for aid_type in [
            AidType::Food,
            AidType::Medical,
            AidType::Shelter,
            AidType::Water,
            AidType::Education,
            AidType::Emergency,
        ] {
            let parsed = aid_type.to_string().parse::<AidType>().unwrap();
            assert_eq!(parsed, aid_type);
        }
        assert!("fuel".parse::<AidType>().is_err());
    }

    #[test]
    fn statuses_parse_lowercase_only() {
        assert_eq!("distributed".parse::<AidRequestStatus>().unwrap(), AidRequestStatus::Distributed);
        assert!("Distributed".parse::<AidRequestStatus>().is_err());
        assert_eq!("completed".parse::<DistributionStatus>().unwrap(), DistributionStatus::Completed);
        assert_eq!("verified".parse::<VerificationStatus>().unwrap(), VerificationStatus::Verified);
        assert_eq!(
            "ngo_representative".parse::<VerifierRole>().unwrap(),
            VerifierRole::NgoRepresentative
        );
    }

    #[test]
    fn ledger_stats_privacy_rate() {
        let stats = LedgerStats::new(4, 3, dec!(1500));
        assert_eq!(stats.privacy_rate, dec!(75));
        let empty = LedgerStats::default();
        assert_eq!(empty.privacy_rate, Decimal::ZERO);
    }
}
