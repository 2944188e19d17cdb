use crate::schema::midnight_transactions;

use bigdecimal::BigDecimal;
use diesel::dsl::sum;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One row per simulated ledger operation. Append-only.
#[derive(Queryable, Identifiable, Insertable, Debug, Clone, Serialize, Deserialize)]
#[table_name = "midnight_transactions"]
pub struct MidnightTransaction {
    pub id: Uuid,
    pub tx_hash: String,
    pub tx_type: String,
    pub from_address: Option<String>,
    pub to_address: Option<String>,
    pub amount: Option<BigDecimal>,
    pub shielded: bool,
    pub block_height: Option<i64>,
    pub gas_used: Option<i64>,
    pub status: String,
    pub metadata: Option<serde_json::Value>,
    pub created_at: i64,
}

impl MidnightTransaction {
    pub fn get_latest(conn: &diesel::PgConnection, limit: i64) -> Result<Vec<Self>, DieselError> {
        midnight_transactions::dsl::midnight_transactions
            .order(midnight_transactions::created_at.desc())
            .limit(limit)
            .load(conn)
    }

    pub fn count(conn: &diesel::PgConnection) -> Result<i64, DieselError> {
        midnight_transactions::dsl::midnight_transactions
            .count()
            .get_result(conn)
    }

    pub fn count_shielded(conn: &diesel::PgConnection) -> Result<i64, DieselError> {
        midnight_transactions::dsl::midnight_transactions
            .filter(midnight_transactions::shielded.eq(true))
            .count()
            .get_result(conn)
    }

    pub fn total_value(conn: &diesel::PgConnection) -> Result<Option<BigDecimal>, DieselError> {
        midnight_transactions::dsl::midnight_transactions
            .filter(midnight_transactions::amount.is_not_null())
            .select(sum(midnight_transactions::amount))
            .get_result(conn)
    }

    pub fn insert(&self, conn: &diesel::PgConnection) -> Result<String, DieselError> {
        diesel::insert_into(midnight_transactions::table)
            .values(self)
            .returning(midnight_transactions::tx_hash)
            .get_result(conn)
    }
}
