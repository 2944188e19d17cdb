use crate::schema::user_verifications;

use diesel::prelude::*;
use diesel::result::Error as DieselError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Queryable, Identifiable, Insertable, Debug, Clone, Serialize, Deserialize)]
#[table_name = "user_verifications"]
pub struct UserVerification {
    pub id: Uuid,
    pub uid: i32,
    pub verifier_id: Uuid,
    pub verification_type: String,
    pub zk_proof_hash: Option<String>,
    pub midnight_proof_tx: Option<String>,
    pub status: String,
    pub metadata: Option<serde_json::Value>,
    pub verified_at: Option<i64>,
    pub expires_at: Option<i64>,
    pub created_at: i64,
}

impl UserVerification {
    pub fn get_by_uid(conn: &diesel::PgConnection, uid: i32) -> Result<Vec<Self>, DieselError> {
        user_verifications::dsl::user_verifications
            .filter(user_verifications::uid.eq(uid))
            .order(user_verifications::created_at.desc())
            .load(conn)
    }

    pub fn insert(&self, conn: &diesel::PgConnection) -> Result<Uuid, DieselError> {
        diesel::insert_into(user_verifications::table)
            .values(self)
            .returning(user_verifications::id)
            .get_result(conn)
    }
}
