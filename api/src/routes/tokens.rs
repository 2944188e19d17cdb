use actix_web::{
    get, post,
    web::{Json, Query},
    HttpResponse,
};
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

use models::tokens::Token;
use msgs::api::{Api, DeployTokenRequest, GetTokenBalance};
use msgs::Message;

use crate::comms::Envelope;
use crate::jwt::*;
use crate::{WebDbPool, WebSender, WebStatsCache};

#[get("/tokens")]
pub async fn get_tokens(pool: WebDbPool, _auth_data: AuthData) -> Result<HttpResponse, ApiError> {
    let conn = pool.get().map_err(|_| ApiError::Db(DbError::DbConnectionError))?;

    let tokens = Token::get_active(&conn).map_err(|_| ApiError::Db(DbError::CouldNotFetchData))?;

    Ok(HttpResponse::Ok().json(&tokens))
}

#[derive(Deserialize)]
pub struct CreateTokenData {
    pub name: String,
    pub symbol: String,
    pub supply: Decimal,
}

#[post("/tokens")]
pub async fn create_token(
    auth_data: AuthData,
    web_sender: WebSender,
    stats_cache: WebStatsCache,
    token_data: Json<CreateTokenData>,
) -> Result<HttpResponse, ApiError> {
    let req_id = Uuid::new_v4();

    let uid = auth_data.uid as u64;

    if token_data.name.trim().is_empty() || token_data.symbol.trim().is_empty() {
        return Err(ApiError::Request(RequestError::MissingField));
    }

    if token_data.supply <= dec!(0) {
        return Err(ApiError::Request(RequestError::InvalidAmount));
    }

    let deploy_token = DeployTokenRequest {
        req_id,
        uid,
        name: token_data.name.clone(),
        symbol: token_data.symbol.clone(),
        supply: token_data.supply,
    };

    let response_filter: Box<dyn Send + Fn(&Message) -> bool> = Box::new(
        move |message| matches!(message, Message::Api(Api::DeployTokenResponse(response)) if response.req_id == req_id),
    );

    let (response_tx, mut response_rx) = mpsc::channel(1);

    let message = Message::Api(Api::DeployTokenRequest(deploy_token));

    Arc::make_mut(&mut web_sender.into_inner())
        .send(Envelope {
            message,
            response_tx: Some(response_tx),
            response_filter: Some(response_filter),
        })
        .await
        .map_err(|_| ApiError::Comms(CommsError::FailedToSendMessage))?;

    if let Ok(Some(Ok(Message::Api(Api::DeployTokenResponse(response))))) =
        timeout(Duration::from_secs(5), response_rx.recv()).await
    {
        if response.error.is_none() {
            stats_cache.write().await.invalidate();
        }
        return Ok(HttpResponse::Ok().json(&response));
    }
    Ok(HttpResponse::InternalServerError().json(json!({"status": "timeout"})))
}

#[derive(Deserialize, Debug)]
pub struct TokenBalanceParams {
    pub contract_address: Option<String>,
    pub address: String,
}

#[get("/tokens/balance")]
pub async fn get_token_balance(
    auth_data: AuthData,
    web_sender: WebSender,
    query: Query<TokenBalanceParams>,
) -> Result<HttpResponse, ApiError> {
    let req_id = Uuid::new_v4();

    let uid = auth_data.uid as u64;

    if query.address.trim().is_empty() {
        return Err(ApiError::Request(RequestError::MissingField));
    }

    let get_balance = GetTokenBalance {
        req_id,
        uid,
        contract_address: query.contract_address.clone(),
        address: query.address.clone(),
    };

    let response_filter: Box<dyn Send + Fn(&Message) -> bool> = Box::new(
        move |message| matches!(message, Message::Api(Api::TokenBalance(balance)) if balance.req_id == req_id),
    );

    let (response_tx, mut response_rx) = mpsc::channel(1);

    let message = Message::Api(Api::GetTokenBalance(get_balance));

    Arc::make_mut(&mut web_sender.into_inner())
        .send(Envelope {
            message,
            response_tx: Some(response_tx),
            response_filter: Some(response_filter),
        })
        .await
        .map_err(|_| ApiError::Comms(CommsError::FailedToSendMessage))?;

    if let Ok(Some(Ok(Message::Api(Api::TokenBalance(balance))))) =
        timeout(Duration::from_secs(5), response_rx.recv()).await
    {
        return Ok(HttpResponse::Ok().json(&balance));
    }
    Ok(HttpResponse::InternalServerError().json(json!({"status": "timeout"})))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LedgerStatsCache;
    use actix_web::http::StatusCode;
    use actix_web::{test, web::Data, App};
    use tokio::sync::RwLock;

    #[actix_web::test]
    async fn mutations_fail_with_401_before_reaching_the_treasury() {
        std::env::set_var("SECRET_KEY", "MYSECRET");

        let (tx, mut rx) = mpsc::channel::<Envelope>(8);
        let stats_cache = Arc::new(RwLock::new(LedgerStatsCache::default()));

        let app = test::init_service(
            App::new()
                .app_data(Data::new(tx))
                .app_data(Data::new(stats_cache))
                .service(create_token),
        )
        .await;

        let body = json!({"name": "AidCoin", "symbol": "AID", "supply": "1000"});

        let req = test::TestRequest::post().uri("/tokens").set_json(&body).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::post()
            .uri("/tokens")
            .insert_header(("authorization", "not-a-jwt"))
            .set_json(&body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        // Neither request may put an envelope on the treasury channel.
        assert!(rx.try_recv().is_err());
    }
}
