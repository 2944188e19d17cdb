#[macro_use]
extern crate diesel;
#[macro_use]
extern crate diesel_migrations;

pub mod aid_requests;
pub mod aid_tokens;
pub mod distributions;
mod error;
pub mod midnight_transactions;
pub mod profiles;
pub mod reports;
mod schema;
pub mod tokens;
pub mod user_verifications;
pub mod users;
pub mod verifier_applications;
pub mod verifiers;

pub(crate) fn time_now_as_i64() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::SystemTime::UNIX_EPOCH)
        .expect("System time should not be earlier than epoch start")
        .as_millis() as i64
}

embed_migrations!("./migrations");

/// Must be called once at the startup of any program using this crate.
/// Brings the schema up to date.
pub fn init(conn: &diesel::PgConnection) -> Result<(), error::GeneralError> {
    Ok(embedded_migrations::run(conn)?)
}
