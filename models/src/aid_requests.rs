use crate::schema::aid_requests;
use crate::time_now_as_i64;

use bigdecimal::BigDecimal;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Queryable, Identifiable, Insertable, Debug, Clone, Serialize, Deserialize)]
#[table_name = "aid_requests"]
pub struct AidRequest {
    pub id: Uuid,
    pub uid: i32,
    pub request_type: String,
    pub amount: BigDecimal,
    pub description: Option<String>,
    pub location: String,
    pub urgency_level: i32,
    pub need_score: i32,
    pub status: String,
    pub zk_proof_hash: Option<String>,
    pub midnight_tx_hash: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl AidRequest {
    pub fn get_by_id(conn: &diesel::PgConnection, id: Uuid) -> Result<Self, DieselError> {
        aid_requests::dsl::aid_requests
            .filter(aid_requests::id.eq(id))
            .first::<Self>(conn)
    }

    pub fn get_by_uid(conn: &diesel::PgConnection, uid: i32) -> Result<Vec<Self>, DieselError> {
        aid_requests::dsl::aid_requests
            .filter(aid_requests::uid.eq(uid))
            .order(aid_requests::created_at.desc())
            .load(conn)
    }

    pub fn insert(&self, conn: &diesel::PgConnection) -> Result<Uuid, DieselError> {
        diesel::insert_into(aid_requests::table)
            .values(self)
            .returning(aid_requests::id)
            .get_result(conn)
    }

    pub fn update_status(conn: &diesel::PgConnection, id: Uuid, status: &str) -> Result<usize, DieselError> {
        diesel::update(aid_requests::dsl::aid_requests.filter(aid_requests::id.eq(id)))
            .set((
                aid_requests::status.eq(status),
                aid_requests::updated_at.eq(time_now_as_i64()),
            ))
            .execute(conn)
    }
}
