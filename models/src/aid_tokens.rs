use crate::schema::aid_tokens;

use bigdecimal::BigDecimal;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Queryable, Identifiable, Insertable, Debug, Clone, Serialize, Deserialize)]
#[table_name = "aid_tokens"]
pub struct AidToken {
    pub id: Uuid,
    pub recipient_uid: i32,
    pub token_id: String,
    pub amount: BigDecimal,
    pub token_type: String,
    pub contract_address: String,
    pub midnight_tx_hash: Option<String>,
    pub restrictions: Option<serde_json::Value>,
    pub expires_at: Option<i64>,
    pub is_active: bool,
    pub used_amount: BigDecimal,
    pub created_at: i64,
    pub updated_at: i64,
}

impl AidToken {
    pub fn get_by_recipient(conn: &diesel::PgConnection, recipient_uid: i32) -> Result<Vec<Self>, DieselError> {
        aid_tokens::dsl::aid_tokens
            .filter(aid_tokens::recipient_uid.eq(recipient_uid))
            .order(aid_tokens::created_at.desc())
            .load(conn)
    }

    pub fn count(conn: &diesel::PgConnection) -> Result<i64, DieselError> {
        aid_tokens::dsl::aid_tokens.count().get_result(conn)
    }

    pub fn insert(&self, conn: &diesel::PgConnection) -> Result<Uuid, DieselError> {
        diesel::insert_into(aid_tokens::table)
            .values(self)
            .returning(aid_tokens::id)
            .get_result(conn)
    }
}
