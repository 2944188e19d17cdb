use actix_web::{get, post, web::Json, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;
use uuid::Uuid;
use xerror::api::*;

use models::user_verifications::UserVerification;
use models::verifier_applications::VerifierApplication;
use models::verifiers::Verifier;
use msgs::api::{Api, VerificationProofRequest, VerifierApplicationRequest};
use msgs::Message;

use crate::comms::Envelope;
use crate::jwt::*;
use crate::{WebDbPool, WebSender, WebStatsCache};

#[get("/verifications")]
pub async fn get_verifications(pool: WebDbPool, auth_data: AuthData) -> Result<HttpResponse, ApiError> {
    let conn = pool.get().map_err(|_| ApiError::Db(DbError::DbConnectionError))?;

    let verifications =
        UserVerification::get_by_uid(&conn, auth_data.uid).map_err(|_| ApiError::Db(DbError::CouldNotFetchData))?;

    Ok(HttpResponse::Ok().json(&verifications))
}

#[derive(Deserialize)]
pub struct CreateVerificationData {
    pub verifier_id: Uuid,
    pub verification_type: String,
    pub metadata: Option<String>,
}

#[post("/verifications")]
pub async fn create_verification(
    auth_data: AuthData,
    web_sender: WebSender,
    stats_cache: WebStatsCache,
    verification_data: Json<CreateVerificationData>,
) -> Result<HttpResponse, ApiError> {
    let req_id = Uuid::new_v4();

    let uid = auth_data.uid as u64;

    if verification_data.verification_type.trim().is_empty() {
        return Err(ApiError::Request(RequestError::MissingField));
    }

    let proof_request = VerificationProofRequest {
        req_id,
        uid,
        verifier_id: verification_data.verifier_id,
        verification_type: verification_data.verification_type.clone(),
        metadata: verification_data.metadata.clone(),
    };

    let response_filter: Box<dyn Send + Fn(&Message) -> bool> = Box::new(
        move |message| matches!(message, Message::Api(Api::VerificationProofResponse(response)) if response.req_id == req_id),
    );

    let (response_tx, mut response_rx) = mpsc::channel(1);

    let message = Message::Api(Api::VerificationProofRequest(proof_request));

    Arc::make_mut(&mut web_sender.into_inner())
        .send(Envelope {
            message,
            response_tx: Some(response_tx),
            response_filter: Some(response_filter),
        })
        .await
        .map_err(|_| ApiError::Comms(CommsError::FailedToSendMessage))?;

    if let Ok(Some(Ok(Message::Api(Api::VerificationProofResponse(response))))) =
        timeout(Duration::from_secs(5), response_rx.recv()).await
    {
        if response.error.is_none() {
            stats_cache.write().await.invalidate();
        }
        return Ok(HttpResponse::Ok().json(&response));
    }
    Ok(HttpResponse::InternalServerError().json(json!({"status": "timeout"})))
}

#[get("/verifiers")]
pub async fn get_verifiers(pool: WebDbPool, _auth_data: AuthData) -> Result<HttpResponse, ApiError> {
    let conn = pool.get().map_err(|_| ApiError::Db(DbError::DbConnectionError))?;

    let verifiers = Verifier::get_active(&conn).map_err(|_| ApiError::Db(DbError::CouldNotFetchData))?;

    Ok(HttpResponse::Ok().json(&verifiers))
}

#[derive(Deserialize)]
pub struct VerifierApplicationData {
    pub full_name: String,
    pub motivation: String,
}

#[post("/verifiers/apply")]
pub async fn apply_as_verifier(
    auth_data: AuthData,
    web_sender: WebSender,
    application_data: Json<VerifierApplicationData>,
) -> Result<HttpResponse, ApiError> {
    let req_id = Uuid::new_v4();

    let uid = auth_data.uid as u64;

    if application_data.full_name.trim().is_empty() || application_data.motivation.trim().is_empty() {
        return Err(ApiError::Request(RequestError::MissingField));
    }

    let application_request = VerifierApplicationRequest {
        req_id,
        uid,
        full_name: application_data.full_name.clone(),
        motivation: application_data.motivation.clone(),
    };

    let response_filter: Box<dyn Send + Fn(&Message) -> bool> = Box::new(
        move |message| matches!(message, Message::Api(Api::VerifierApplicationResponse(response)) if response.req_id == req_id),
    );

    let (response_tx, mut response_rx) = mpsc::channel(1);

    let message = Message::Api(Api::VerifierApplicationRequest(application_request));

    Arc::make_mut(&mut web_sender.into_inner())
        .send(Envelope {
            message,
            response_tx: Some(response_tx),
            response_filter: Some(response_filter),
        })
        .await
        .map_err(|_| ApiError::Comms(CommsError::FailedToSendMessage))?;

    if let Ok(Some(Ok(Message::Api(Api::VerifierApplicationResponse(response))))) =
        timeout(Duration::from_secs(5), response_rx.recv()).await
    {
        return Ok(HttpResponse::Ok().json(&response));
    }
    Ok(HttpResponse::InternalServerError().json(json!({"status": "timeout"})))
}

#[get("/verifiers/applications")]
pub async fn get_verifier_applications(pool: WebDbPool, auth_data: AuthData) -> Result<HttpResponse, ApiError> {
    let conn = pool.get().map_err(|_| ApiError::Db(DbError::DbConnectionError))?;

    let applications =
        VerifierApplication::get_by_uid(&conn, auth_data.uid).map_err(|_| ApiError::Db(DbError::CouldNotFetchData))?;

    Ok(HttpResponse::Ok().json(&applications))
}
