use crate::schema::verifiers;
use crate::time_now_as_i64;

use diesel::prelude::*;
use diesel::result::Error as DieselError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Queryable, Identifiable, Insertable, Debug, Clone, Serialize, Deserialize)]
#[table_name = "verifiers"]
pub struct Verifier {
    pub id: Uuid,
    pub uid: i32,
    pub role: String,
    pub organization: Option<String>,
    pub location: Option<String>,
    pub midnight_address: Option<String>,
    pub reputation_score: i32,
    pub verifications_count: i32,
    pub is_active: bool,
    pub created_at: i64,
}

impl Verifier {
    pub fn new(uid: i32, role: String, midnight_address: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            uid,
            role,
            organization: None,
            location: None,
            midnight_address,
            reputation_score: 0,
            verifications_count: 0,
            is_active: true,
            created_at: time_now_as_i64(),
        }
    }

    pub fn get_by_id(conn: &diesel::PgConnection, id: Uuid) -> Result<Self, DieselError> {
        verifiers::dsl::verifiers.filter(verifiers::id.eq(id)).first::<Self>(conn)
    }

    pub fn get_by_uid(conn: &diesel::PgConnection, uid: i32) -> Result<Self, DieselError> {
        verifiers::dsl::verifiers.filter(verifiers::uid.eq(uid)).first::<Self>(conn)
    }

    pub fn get_active(conn: &diesel::PgConnection) -> Result<Vec<Self>, DieselError> {
        verifiers::dsl::verifiers
            .filter(verifiers::is_active.eq(true))
            .order(verifiers::created_at.desc())
            .load(conn)
    }

    pub fn insert(&self, conn: &diesel::PgConnection) -> Result<Uuid, DieselError> {
        diesel::insert_into(verifiers::table)
            .values(self)
            .returning(verifiers::id)
            .get_result(conn)
    }

    pub fn increment_verifications(conn: &diesel::PgConnection, id: Uuid) -> Result<usize, DieselError> {
        diesel::update(verifiers::dsl::verifiers.filter(verifiers::id.eq(id)))
            .set(verifiers::verifications_count.eq(verifiers::verifications_count + 1))
            .execute(conn)
    }
}
