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

use models::distributions::Distribution;
use msgs::api::{Api, DistributionRequest};
use msgs::Message;

use crate::comms::Envelope;
use crate::jwt::*;
use crate::{WebDbPool, WebSender, WebStatsCache};

#[get("/distributions")]
pub async fn get_distributions(pool: WebDbPool, auth_data: AuthData) -> Result<HttpResponse, ApiError> {
    let conn = pool.get().map_err(|_| ApiError::Db(DbError::DbConnectionError))?;

    let distributions =
        Distribution::get_by_uid(&conn, auth_data.uid).map_err(|_| ApiError::Db(DbError::CouldNotFetchData))?;

    Ok(HttpResponse::Ok().json(&distributions))
}

#[derive(Deserialize)]
pub struct CreateDistributionData {
    pub aid_request_id: Uuid,
    pub recipient_uid: u64,
    pub amount: Decimal,
    pub shielded_memo: Option<String>,
}

#[post("/distributions")]
pub async fn create_distribution(
    auth_data: AuthData,
    web_sender: WebSender,
    stats_cache: WebStatsCache,
    distribution_data: Json<CreateDistributionData>,
) -> Result<HttpResponse, ApiError> {
    let req_id = Uuid::new_v4();

    let uid = auth_data.uid as u64;

    if distribution_data.amount <= dec!(0) {
        return Err(ApiError::Request(RequestError::InvalidAmount));
    }

    if let Some(memo) = &distribution_data.shielded_memo {
        if memo.len() > 1024 {
            return Err(ApiError::Request(RequestError::InvalidValue));
        }
    }

    let distribution_request = DistributionRequest {
        req_id,
        uid,
        aid_request_id: distribution_data.aid_request_id,
        recipient_uid: distribution_data.recipient_uid,
        amount: distribution_data.amount,
        shielded_memo: distribution_data.shielded_memo.clone(),
    };

    let response_filter: Box<dyn Send + Fn(&Message) -> bool> = Box::new(
        move |message| matches!(message, Message::Api(Api::DistributionResponse(response)) if response.req_id == req_id),
    );

    let (response_tx, mut response_rx) = mpsc::channel(1);

    let message = Message::Api(Api::DistributionRequest(distribution_request));

    Arc::make_mut(&mut web_sender.into_inner())
        .send(Envelope {
            message,
            response_tx: Some(response_tx),
            response_filter: Some(response_filter),
        })
        .await
        .map_err(|_| ApiError::Comms(CommsError::FailedToSendMessage))?;

    if let Ok(Some(Ok(Message::Api(Api::DistributionResponse(response))))) =
        timeout(Duration::from_secs(5), response_rx.recv()).await
    {
        if response.error.is_none() {
            stats_cache.write().await.invalidate();
        }
        return Ok(HttpResponse::Ok().json(&response));
    }
    Ok(HttpResponse::InternalServerError().json(json!({"status": "timeout"})))
}
