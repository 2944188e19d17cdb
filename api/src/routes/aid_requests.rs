use actix_web::{
    get, post,
    web::{Data, Json},
    HttpResponse,
};
use bigdecimal::BigDecimal;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use serde_json::json;
use std::collections::HashSet;
use std::str::FromStr;
use uuid::Uuid;
use xerror::api::*;

use core_types::{AidRequestStatus, AidType, UserId};
use models::aid_requests::AidRequest;
use models::verifiers::Verifier;
use utils::time::time_now;

use crate::jwt::*;
use crate::WebDbPool;

#[get("/aid_requests")]
pub async fn get_aid_requests(pool: WebDbPool, auth_data: AuthData) -> Result<HttpResponse, ApiError> {
    let conn = pool.get().map_err(|_| ApiError::Db(DbError::DbConnectionError))?;

    let requests =
        AidRequest::get_by_uid(&conn, auth_data.uid).map_err(|_| ApiError::Db(DbError::CouldNotFetchData))?;

    Ok(HttpResponse::Ok().json(&requests))
}

#[derive(Deserialize)]
pub struct CreateAidRequestData {
    pub request_type: String,
    pub amount: Decimal,
    pub description: Option<String>,
    pub location: String,
    pub urgency_level: Option<i32>,
}

#[post("/aid_requests")]
pub async fn create_aid_request(
    pool: WebDbPool,
    auth_data: AuthData,
    request_data: Json<CreateAidRequestData>,
) -> Result<HttpResponse, ApiError> {
    let conn = pool.get().map_err(|_| ApiError::Db(DbError::DbConnectionError))?;

    if request_data.amount <= dec!(0) {
        return Err(ApiError::Request(RequestError::InvalidAmount));
    }

    if request_data.location.trim().is_empty() {
        return Err(ApiError::Request(RequestError::MissingField));
    }

    let aid_type = request_data
        .request_type
        .parse::<AidType>()
        .map_err(|_| ApiError::Request(RequestError::InvalidValue))?;

    let urgency_level = request_data.urgency_level.unwrap_or(3).clamp(1, 5);

    let now = time_now() as i64;
    let aid_request = AidRequest {
        id: Uuid::new_v4(),
        uid: auth_data.uid,
        request_type: aid_type.to_string(),
        amount: BigDecimal::from_str(&request_data.amount.to_string()).unwrap_or_default(),
        description: request_data.description.clone(),
        location: request_data.location.clone(),
        urgency_level,
        need_score: urgency_level * 20,
        status: AidRequestStatus::Pending.to_string(),
        zk_proof_hash: None,
        midnight_tx_hash: None,
        created_at: now,
        updated_at: now,
    };

    aid_request
        .insert(&conn)
        .map_err(|_| ApiError::Db(DbError::CouldNotInsertData))?;

    Ok(HttpResponse::Ok().json(&aid_request))
}

#[derive(Deserialize)]
pub struct UpdateAidRequestStatusData {
    pub id: Uuid,
    pub status: String,
}

#[post("/aid_requests/status")]
pub async fn update_aid_request_status(
    pool: WebDbPool,
    admin_uids: Data<HashSet<UserId>>,
    auth_data: AuthData,
    update_data: Json<UpdateAidRequestStatusData>,
) -> Result<HttpResponse, ApiError> {
    let conn = pool.get().map_err(|_| ApiError::Db(DbError::DbConnectionError))?;

    let status = update_data
        .status
        .parse::<AidRequestStatus>()
        .map_err(|_| ApiError::Request(RequestError::InvalidValue))?;

    // Only admins and registered verifiers may move a request through its lifecycle.
    let is_admin = admin_uids.contains(&(auth_data.uid as u64));
    if !is_admin && Verifier::get_by_uid(&conn, auth_data.uid).is_err() {
        return Err(ApiError::Auth(AuthError::NotAnAdmin));
    }

    if AidRequest::get_by_id(&conn, update_data.id).is_err() {
        return Err(ApiError::Db(DbError::RecordDoesNotExist));
    }

    AidRequest::update_status(&conn, update_data.id, &status.to_string())
        .map_err(|_| ApiError::Db(DbError::CouldNotInsertData))?;

    Ok(HttpResponse::Ok().json(json!({"id": update_data.id, "status": status})))
}
