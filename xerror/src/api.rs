use err_derive::Error;
use serde::Serialize;

use actix_web::{error, http::StatusCode, HttpResponse};

#[derive(Debug, Error, Serialize)]
#[error(display = "An Error has occured when authenticating.")]
pub enum AuthError {
    #[error(display = "User already exists.")]
    UserExists,
    #[error(display = "Incorrect password supplied.")]
    IncorrectPassword,
    #[error(display = "Admin privileges required.")]
    NotAnAdmin,
    #[error(display = "Internal Error.")]
    InternalError,
}

#[derive(Debug, Error, Serialize)]
#[error(display = "An Error has occured when authenticating.")]
pub enum JWTError {
    #[error(display = "No authorization header supplied.")]
    NotSupplied,
    #[error(display = "Jwt token that was supplied is invalid.")]
    Invalid,
    #[error(display = "Jwt token that was supplied is invalid.")]
    Expired,
}

#[derive(Debug, Error, Serialize)]
#[error(display = "An Error has occured when accessing the database.")]
pub enum DbError {
    #[error(display = "Unable to get connection to Db.")]
    DbConnectionError,
    #[error(display = "User already exists.")]
    UserAlreadyExists,
    #[error(display = "User does not exist.")]
    UserDoesNotExist,
    #[error(display = "Record does not exist.")]
    RecordDoesNotExist,
    #[error(display = "Couldn't fetch data.")]
    CouldNotFetchData,
    #[error(display = "Couldn't insert data.")]
    CouldNotInsertData,
    #[error(display = "An unknown error has occured.")]
    Unknown,
}

#[derive(Debug, Error, Serialize)]
#[error(display = "An Error has occured when talking to the treasury.")]
pub enum CommsError {
    #[error(display = "Unable to send message.")]
    FailedToSendMessage,
    #[error(display = "Treasury did not respond in time.")]
    TreasuryTimeout,
}

#[derive(Debug, Error, Serialize)]
#[error(display = "The request was malformed.")]
pub enum RequestError {
    #[error(display = "A required field was missing or empty.")]
    MissingField,
    #[error(display = "Amount must be positive.")]
    InvalidAmount,
    #[error(display = "Unknown enumerated value.")]
    InvalidValue,
}

#[derive(Debug, Error, Serialize)]
pub enum ApiError {
    #[error(display = "Auth error.")]
    Auth(AuthError),
    #[error(display = "Db error.")]
    Db(DbError),
    #[error(display = "Comms error.")]
    Comms(CommsError),
    #[error(display = "JWT error.")]
    JWT(JWTError),
    #[error(display = "Request error.")]
    Request(RequestError),
}

impl error::ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::Auth(auth) => match auth {
                AuthError::UserExists => HttpResponse::Conflict().json("There was a conflict with your request."),
                AuthError::IncorrectPassword => {
                    HttpResponse::Unauthorized().json("You have supplied the wrong password.")
                }
                AuthError::NotAnAdmin => HttpResponse::Unauthorized().json("Admin privileges required."),
                AuthError::InternalError => HttpResponse::BadRequest().json("Internal server error."),
            },
            ApiError::Db(db) => match db {
                DbError::DbConnectionError => HttpResponse::InternalServerError().json("Couldn't connect to Db."),
                DbError::UserAlreadyExists => HttpResponse::Conflict().json("User already exists."),
                DbError::UserDoesNotExist => HttpResponse::InternalServerError().json("User does not exist."),
                DbError::RecordDoesNotExist => HttpResponse::NotFound().json("Record does not exist."),
                DbError::CouldNotFetchData => HttpResponse::InternalServerError().json("Could not fetch data."),
                DbError::CouldNotInsertData => HttpResponse::InternalServerError().json("Could not insert data."),
                DbError::Unknown => HttpResponse::InternalServerError().json("An unknown error has occured."),
            },
            ApiError::Comms(comms) => match comms {
                CommsError::FailedToSendMessage => HttpResponse::InternalServerError().json("Couldn't send message."),
                CommsError::TreasuryTimeout => HttpResponse::InternalServerError().json("Treasury timed out."),
            },
            ApiError::JWT(jwt) => match jwt {
                JWTError::Invalid => HttpResponse::Unauthorized().json("Jwt token is invalid."),
                JWTError::Expired => HttpResponse::Unauthorized().json("Jwt token is expired."),
                JWTError::NotSupplied => HttpResponse::Unauthorized().json("Jwt token is not supplied."),
            },
            ApiError::Request(request) => match request {
                RequestError::MissingField => HttpResponse::BadRequest().json("A required field was missing."),
                RequestError::InvalidAmount => HttpResponse::BadRequest().json("Amount must be positive."),
                RequestError::InvalidValue => HttpResponse::BadRequest().json("Unknown enumerated value."),
            },
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Auth(auth) => match auth {
                AuthError::UserExists => StatusCode::CONFLICT,
                AuthError::IncorrectPassword => StatusCode::UNAUTHORIZED,
                AuthError::NotAnAdmin => StatusCode::UNAUTHORIZED,
                AuthError::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Db(db) => match db {
                DbError::DbConnectionError => StatusCode::INTERNAL_SERVER_ERROR,
                DbError::UserAlreadyExists => StatusCode::CONFLICT,
                DbError::UserDoesNotExist => StatusCode::INTERNAL_SERVER_ERROR,
                DbError::RecordDoesNotExist => StatusCode::NOT_FOUND,
                DbError::CouldNotFetchData => StatusCode::INTERNAL_SERVER_ERROR,
                DbError::CouldNotInsertData => StatusCode::INTERNAL_SERVER_ERROR,
                DbError::Unknown => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Comms(comms) => match comms {
                CommsError::FailedToSendMessage => StatusCode::INTERNAL_SERVER_ERROR,
                CommsError::TreasuryTimeout => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::JWT(jwt) => match jwt {
                JWTError::Invalid => StatusCode::UNAUTHORIZED,
                JWTError::Expired => StatusCode::UNAUTHORIZED,
                JWTError::NotSupplied => StatusCode::UNAUTHORIZED,
            },
            ApiError::Request(request) => match request {
                RequestError::MissingField => StatusCode::BAD_REQUEST,
                RequestError::InvalidAmount => StatusCode::BAD_REQUEST,
                RequestError::InvalidValue => StatusCode::BAD_REQUEST,
            },
        }
    }
}
