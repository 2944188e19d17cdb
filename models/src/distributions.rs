use crate::schema::distributions;

use bigdecimal::BigDecimal;
use diesel::dsl::sum;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Queryable, Identifiable, Insertable, Debug, Clone, Serialize, Deserialize)]
#[table_name = "distributions"]
pub struct Distribution {
    pub id: Uuid,
    pub aid_request_id: Uuid,
    pub distributor_uid: i32,
    pub recipient_uid: i32,
    pub amount: BigDecimal,
    pub token_contract_address: Option<String>,
    pub midnight_tx_hash: Option<String>,
    pub shielded_memo: Option<String>,
    pub status: String,
    pub distributed_at: Option<i64>,
    pub created_at: i64,
}

impl Distribution {
    pub fn get_by_uid(conn: &diesel::PgConnection, uid: i32) -> Result<Vec<Self>, DieselError> {
        let owning = distributions::distributor_uid
            .eq(uid)
            .or(distributions::recipient_uid.eq(uid));
        distributions::dsl::distributions
            .filter(owning)
            .order(distributions::created_at.desc())
            .load(conn)
    }

    pub fn count(conn: &diesel::PgConnection) -> Result<i64, DieselError> {
        distributions::dsl::distributions.count().get_result(conn)
    }

    pub fn total_amount(conn: &diesel::PgConnection) -> Result<Option<BigDecimal>, DieselError> {
        distributions::dsl::distributions
            .select(sum(distributions::amount))
            .get_result(conn)
    }

    pub fn insert(&self, conn: &diesel::PgConnection) -> Result<Uuid, DieselError> {
        diesel::insert_into(distributions::table)
            .values(self)
            .returning(distributions::id)
            .get_result(conn)
    }
}
