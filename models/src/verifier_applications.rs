use crate::schema::verifier_applications;
use crate::time_now_as_i64;

use diesel::prelude::*;
use diesel::result::Error as DieselError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Queryable, Identifiable, Insertable, Debug, Clone, Serialize, Deserialize)]
#[table_name = "verifier_applications"]
pub struct VerifierApplication {
    pub id: Uuid,
    pub uid: i32,
    pub full_name: String,
    pub motivation: String,
    pub status: String,
    pub zk_verified: bool,
    pub zk_proof_hash: Option<String>,
    pub midnight_tx_hash: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl VerifierApplication {
    pub fn get_by_id(conn: &diesel::PgConnection, id: Uuid) -> Result<Self, DieselError> {
        verifier_applications::dsl::verifier_applications
            .filter(verifier_applications::id.eq(id))
            .first::<Self>(conn)
    }

    pub fn get_by_uid(conn: &diesel::PgConnection, uid: i32) -> Result<Vec<Self>, DieselError> {
        verifier_applications::dsl::verifier_applications
            .filter(verifier_applications::uid.eq(uid))
            .order(verifier_applications::created_at.desc())
            .load(conn)
    }

    pub fn get_pending_by_uid(conn: &diesel::PgConnection, uid: i32) -> Result<Vec<Self>, DieselError> {
        verifier_applications::dsl::verifier_applications
            .filter(
                verifier_applications::uid
                    .eq(uid)
                    .and(verifier_applications::status.eq("pending")),
            )
            .load(conn)
    }

    pub fn insert(&self, conn: &diesel::PgConnection) -> Result<Uuid, DieselError> {
        diesel::insert_into(verifier_applications::table)
            .values(self)
            .returning(verifier_applications::id)
            .get_result(conn)
    }

    pub fn update_status(conn: &diesel::PgConnection, id: Uuid, status: &str) -> Result<usize, DieselError> {
        diesel::update(verifier_applications::dsl::verifier_applications.filter(verifier_applications::id.eq(id)))
            .set((
                verifier_applications::status.eq(status),
                verifier_applications::updated_at.eq(time_now_as_i64()),
            ))
            .execute(conn)
    }
}
