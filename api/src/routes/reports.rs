use actix_web::{get, post, web::Json, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;
use xerror::api::*;

use models::reports::Report;
use utils::time::time_now;

use crate::jwt::*;
use crate::WebDbPool;

#[get("/reports")]
pub async fn get_reports(pool: WebDbPool, auth_data: AuthData) -> Result<HttpResponse, ApiError> {
    let conn = pool.get().map_err(|_| ApiError::Db(DbError::DbConnectionError))?;

    let reports = Report::get_by_generator(&conn, auth_data.uid).map_err(|_| ApiError::Db(DbError::CouldNotFetchData))?;

    Ok(HttpResponse::Ok().json(&reports))
}

#[derive(Deserialize)]
pub struct CreateReportData {
    pub report_type: String,
    pub title: String,
    pub description: Option<String>,
    pub data: Option<serde_json::Value>,
    pub date_range_start: Option<i64>,
    pub date_range_end: Option<i64>,
    pub privacy_level: Option<String>,
}

#[post("/reports")]
pub async fn create_report(
    pool: WebDbPool,
    auth_data: AuthData,
    report_data: Json<CreateReportData>,
) -> Result<HttpResponse, ApiError> {
    let conn = pool.get().map_err(|_| ApiError::Db(DbError::DbConnectionError))?;

    if report_data.report_type.trim().is_empty() || report_data.title.trim().is_empty() {
        return Err(ApiError::Request(RequestError::MissingField));
    }

    let report = Report {
        id: Uuid::new_v4(),
        generated_by: auth_data.uid,
        report_type: report_data.report_type.clone(),
        title: report_data.title.clone(),
        description: report_data.description.clone(),
        data: report_data.data.clone(),
        date_range_start: report_data.date_range_start,
        date_range_end: report_data.date_range_end,
        privacy_level: report_data.privacy_level.clone().unwrap_or_else(|| "public".to_string()),
        midnight_hash: None,
        created_at: time_now() as i64,
    };

    report.insert(&conn).map_err(|_| ApiError::Db(DbError::CouldNotInsertData))?;

    Ok(HttpResponse::Ok().json(&report))
}
