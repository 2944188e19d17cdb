use actix_web::{
    post,
    web::{Data, Json},
    HttpResponse,
};
use serde::Deserialize;
use serde_json::json;
use std::collections::HashSet;
use uuid::Uuid;
use xerror::api::*;

use core_types::{UserId, VerifierRole};
use models::verifier_applications::VerifierApplication;
use models::verifiers::Verifier;

use crate::jwt::*;
use crate::WebDbPool;

#[derive(Deserialize)]
pub struct ApproveApplicationData {
    pub application_id: Uuid,
    pub role: String,
    pub midnight_address: Option<String>,
}

#[post("/verifiers/applications/approve")]
pub async fn approve_verifier_application(
    pool: WebDbPool,
    admin_uids: Data<HashSet<UserId>>,
    auth_data: AuthData,
    approve_data: Json<ApproveApplicationData>,
) -> Result<HttpResponse, ApiError> {
    let conn = pool.get().map_err(|_| ApiError::Db(DbError::DbConnectionError))?;

    if !admin_uids.contains(&(auth_data.uid as u64)) {
        return Err(ApiError::Auth(AuthError::NotAnAdmin));
    }

    let role = approve_data
        .role
        .parse::<VerifierRole>()
        .map_err(|_| ApiError::Request(RequestError::InvalidValue))?;

    let application = match VerifierApplication::get_by_id(&conn, approve_data.application_id) {
        Ok(a) => a,
        Err(_) => return Err(ApiError::Db(DbError::RecordDoesNotExist)),
    };

    if application.status != "pending" {
        return Err(ApiError::Request(RequestError::InvalidValue));
    }

    VerifierApplication::update_status(&conn, application.id, "approved")
        .map_err(|_| ApiError::Db(DbError::CouldNotInsertData))?;

    let verifier = Verifier::new(application.uid, role.to_string(), approve_data.midnight_address.clone());
    let verifier_id = verifier
        .insert(&conn)
        .map_err(|_| ApiError::Db(DbError::CouldNotInsertData))?;

    Ok(HttpResponse::Ok().json(json!({
        "application_id": application.id,
        "verifier_id": verifier_id,
        "role": role,
    })))
}
