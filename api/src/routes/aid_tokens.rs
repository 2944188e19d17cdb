use actix_web::{get, post, web::Json, HttpResponse};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;
use uuid::Uuid;
use xerror::api::*;

use core_types::AidType;
use models::aid_tokens::AidToken;
use msgs::api::{Api, MintAidTokenRequest};
use msgs::Message;

use crate::comms::Envelope;
use crate::jwt::*;
use crate::{WebDbPool, WebSender, WebStatsCache};

#[get("/aid_tokens")]
pub async fn get_aid_tokens(pool: WebDbPool, auth_data: AuthData) -> Result<HttpResponse, ApiError> {
    let conn = pool.get().map_err(|_| ApiError::Db(DbError::DbConnectionError))?;

    let aid_tokens =
        AidToken::get_by_recipient(&conn, auth_data.uid).map_err(|_| ApiError::Db(DbError::CouldNotFetchData))?;

    Ok(HttpResponse::Ok().json(&aid_tokens))
}

#[derive(Deserialize)]
pub struct MintAidTokenData {
    pub recipient_uid: u64,
    pub amount: Decimal,
    pub token_type: String,
    pub restrictions: Option<Vec<String>>,
    /// Epoch millis.
    pub expires_at: Option<u64>,
}

#[post("/aid_tokens")]
pub async fn create_aid_token(
    auth_data: AuthData,
    web_sender: WebSender,
    stats_cache: WebStatsCache,
    mint_data: Json<MintAidTokenData>,
) -> Result<HttpResponse, ApiError> {
    let req_id = Uuid::new_v4();

    let uid = auth_data.uid as u64;

    if mint_data.amount <= dec!(0) {
        return Err(ApiError::Request(RequestError::InvalidAmount));
    }

    let token_type = mint_data
        .token_type
        .parse::<AidType>()
        .map_err(|_| ApiError::Request(RequestError::InvalidValue))?;

    let mint_request = MintAidTokenRequest {
        req_id,
        uid,
        recipient_uid: mint_data.recipient_uid,
        amount: mint_data.amount,
        token_type,
        restrictions: mint_data.restrictions.clone(),
        expires_at: mint_data.expires_at,
    };

    let response_filter: Box<dyn Send + Fn(&Message) -> bool> = Box::new(
        move |message| matches!(message, Message::Api(Api::MintAidTokenResponse(response)) if response.req_id == req_id),
    );

    let (response_tx, mut response_rx) = mpsc::channel(1);

    let message = Message::Api(Api::MintAidTokenRequest(mint_request));

    Arc::make_mut(&mut web_sender.into_inner())
        .send(Envelope {
            message,
            response_tx: Some(response_tx),
            response_filter: Some(response_filter),
        })
        .await
        .map_err(|_| ApiError::Comms(CommsError::FailedToSendMessage))?;

    if let Ok(Some(Ok(Message::Api(Api::MintAidTokenResponse(response))))) =
        timeout(Duration::from_secs(5), response_rx.recv()).await
    {
        if response.error.is_none() {
            stats_cache.write().await.invalidate();
        }
        return Ok(HttpResponse::Ok().json(&response));
    }
    Ok(HttpResponse::InternalServerError().json(json!({"status": "timeout"})))
}
