use crate::schema::profiles;
use crate::time_now_as_i64;

use diesel::prelude::*;
use diesel::result::Error as DieselError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Queryable, Identifiable, Insertable, Debug, Clone, Serialize, Deserialize)]
#[table_name = "profiles"]
pub struct Profile {
    pub id: Uuid,
    pub uid: i32,
    pub username: Option<String>,
    pub wallet_address: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Default, AsChangeset, Debug, Deserialize)]
#[table_name = "profiles"]
pub struct UpdateProfile {
    pub username: Option<String>,
    pub wallet_address: Option<String>,
    pub updated_at: Option<i64>,
}

impl Profile {
    pub fn new(uid: i32) -> Self {
        let now = time_now_as_i64();
        Self {
            id: Uuid::new_v4(),
            uid,
            username: None,
            wallet_address: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn get_by_uid(conn: &diesel::PgConnection, uid: i32) -> Result<Self, DieselError> {
        profiles::dsl::profiles.filter(profiles::uid.eq(uid)).first::<Self>(conn)
    }

    pub fn get_all(conn: &diesel::PgConnection) -> Result<Vec<Self>, DieselError> {
        profiles::dsl::profiles.order(profiles::created_at.asc()).load(conn)
    }

    pub fn insert(&self, conn: &diesel::PgConnection) -> Result<Uuid, DieselError> {
        diesel::insert_into(profiles::table)
            .values(self)
            .returning(profiles::id)
            .get_result(conn)
    }
}

impl UpdateProfile {
    pub fn update(&self, conn: &diesel::PgConnection, uid: i32) -> Result<usize, DieselError> {
        diesel::update(profiles::dsl::profiles.filter(profiles::uid.eq(uid)))
            .set(self)
            .execute(conn)
    }
}
