pub mod admin;
pub mod aid_requests;
pub mod aid_tokens;
pub mod auth;
pub mod distributions;
pub mod ledger;
pub mod profile;
pub mod reports;
pub mod tokens;
pub mod verifications;
