use actix_web::{get, post, web::Json, HttpResponse};
use diesel::result::DatabaseErrorKind;
use diesel::result::Error as DieselError;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;
use xerror::api::*;

use models::users::*;

use crate::jwt::*;
use crate::WebDbPool;

static ACCESS_EXPIRY: i64 = 60 * 60 * 12;
static REFRESH_EXPIRY: i64 = 60 * 60 * 24 * 3;

#[derive(Deserialize)]
pub struct RegisterData {
    /// Username field on supplied json.
    pub username: Option<String>,
    /// Password field on supplied json.
    pub password: String,
}

#[post("/create")]
pub async fn create(pool: WebDbPool, register_data: Json<RegisterData>) -> Result<HttpResponse, ApiError> {
    let conn = pool.get().map_err(|_| ApiError::Db(DbError::DbConnectionError))?;

    let username = match &register_data.username {
        Some(un) => un.clone(),
        None => Uuid::new_v4().to_string(),
    };

    let hashed_password = hash(&username, &register_data.password);

    let user = InsertableUser {
        username,
        password: hashed_password,
    };

    if let Err(error) = user.insert(&conn) {
        match error {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                return Err(ApiError::Db(DbError::UserAlreadyExists))
            }
            _ => return Err(ApiError::Db(DbError::Unknown)),
        }
    }

    Ok(HttpResponse::Ok().json(json!({"username": user.username})))
}

#[derive(Deserialize)]
pub struct LoginData {
    /// Username field on supplied json.
    pub username: String,
    /// Password field on supplied json.
    pub password: String,
}

#[post("/auth")]
pub async fn auth(pool: WebDbPool, login_data: Json<LoginData>) -> Result<HttpResponse, ApiError> {
    let conn = pool.get().map_err(|_| ApiError::Db(DbError::DbConnectionError))?;

    let user = match User::get_by_username(&conn, login_data.username.clone()) {
        Ok(u) => u,
        Err(_) => return Err(ApiError::Db(DbError::UserDoesNotExist)),
    };

    if !verify(&user.username, &user.password, &login_data.password) {
        return Err(ApiError::Auth(AuthError::IncorrectPassword));
    }

    let token = jwt_generate(user.uid, ACCESS_EXPIRY);
    let refresh_token = jwt_generate_refresh_token(user.uid, REFRESH_EXPIRY);

    Ok(HttpResponse::Ok().json(json!({"token": token, "refresh": refresh_token})))
}

#[get("/whoami")]
pub async fn whoami(pool: WebDbPool, auth_data: AuthData) -> Result<HttpResponse, ApiError> {
    let conn = pool.get().map_err(|_| ApiError::Db(DbError::DbConnectionError))?;

    let user = match User::get_by_id(&conn, auth_data.uid) {
        Ok(u) => u,
        Err(_) => return Err(ApiError::Db(DbError::UserDoesNotExist)),
    };

    Ok(HttpResponse::Ok().json(json!({"username": user.username, "uid": user.uid})))
}

#[derive(Deserialize)]
pub struct RefreshData {
    /// Refresh token handed out by /auth.
    pub refresh: String,
}

#[post("/refresh")]
pub async fn refresh(refresh_data: Json<RefreshData>) -> Result<HttpResponse, ApiError> {
    let claims = jwt_check_refresh_token(&refresh_data.refresh)?.claims;

    let token = jwt_generate(claims.get_user(), ACCESS_EXPIRY);

    Ok(HttpResponse::Ok().json(json!({"token": token})))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};

    #[actix_web::test]
    async fn refresh_exchanges_a_refresh_token_for_an_access_token() {
        std::env::set_var("SECRET_KEY", "MYSECRET");
        let app = test::init_service(App::new().service(refresh)).await;

        let refresh_token = jwt_generate_refresh_token(42, REFRESH_EXPIRY);
        let req = test::TestRequest::post()
            .uri("/refresh")
            .set_json(json!({ "refresh": refresh_token }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        let claims = jwt_check(body["token"].as_str().unwrap()).unwrap().claims;
        assert!(claims.is_claimed_user(42));
    }

    #[actix_web::test]
    async fn refresh_rejects_garbage_tokens() {
        std::env::set_var("SECRET_KEY", "MYSECRET");
        let app = test::init_service(App::new().service(refresh)).await;

        let req = test::TestRequest::post()
            .uri("/refresh")
            .set_json(json!({ "refresh": "not-a-refresh-token" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
