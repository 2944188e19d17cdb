use crate::schema::reports;

use diesel::prelude::*;
use diesel::result::Error as DieselError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Queryable, Identifiable, Insertable, Debug, Clone, Serialize, Deserialize)]
#[table_name = "reports"]
pub struct Report {
    pub id: Uuid,
    pub generated_by: i32,
    pub report_type: String,
    pub title: String,
    pub description: Option<String>,
    pub data: Option<serde_json::Value>,
    pub date_range_start: Option<i64>,
    pub date_range_end: Option<i64>,
    pub privacy_level: String,
    pub midnight_hash: Option<String>,
    pub created_at: i64,
}

impl Report {
    pub fn get_by_generator(conn: &diesel::PgConnection, uid: i32) -> Result<Vec<Self>, DieselError> {
        reports::dsl::reports
            .filter(reports::generated_by.eq(uid))
            .order(reports::created_at.desc())
            .load(conn)
    }

    pub fn insert(&self, conn: &diesel::PgConnection) -> Result<Uuid, DieselError> {
        diesel::insert_into(reports::table)
            .values(self)
            .returning(reports::id)
            .get_result(conn)
    }
}
