use crate::schema::tokens;

use bigdecimal::BigDecimal;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Queryable, Identifiable, Insertable, Debug, Clone, Serialize, Deserialize)]
#[table_name = "tokens"]
pub struct Token {
    pub id: Uuid,
    pub creator_uid: Option<i32>,
    pub name: String,
    pub symbol: String,
    pub supply: BigDecimal,
    pub contract_address: Option<String>,
    pub midnight_tx_hash: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Token {
    pub fn get_active(conn: &diesel::PgConnection) -> Result<Vec<Self>, DieselError> {
        tokens::dsl::tokens
            .filter(tokens::is_active.eq(true))
            .order(tokens::created_at.desc())
            .load(conn)
    }

    /// The newest active token is the one all mints and distributions run against.
    pub fn get_newest_active(conn: &diesel::PgConnection) -> Result<Self, DieselError> {
        tokens::dsl::tokens
            .filter(tokens::is_active.eq(true))
            .order(tokens::created_at.desc())
            .first::<Self>(conn)
    }

    pub fn count(conn: &diesel::PgConnection) -> Result<i64, DieselError> {
        tokens::dsl::tokens.count().get_result(conn)
    }

    pub fn insert(&self, conn: &diesel::PgConnection) -> Result<Uuid, DieselError> {
        diesel::insert_into(tokens::table)
            .values(self)
            .returning(tokens::id)
            .get_result(conn)
    }
}
