use actix_web::{get, post, web::Json, HttpResponse};
use serde::Deserialize;
use xerror::api::*;

use models::profiles::{Profile, UpdateProfile};
use utils::time::time_now;

use crate::jwt::*;
use crate::WebDbPool;

pub const IDENTITY_EXPORT_HEADER: &str = "ID,Username,Wallet Address,Created At,Updated At";

/// Renders profiles into the identity export CSV. One row per profile,
/// empty cells for fields the holder never filled in.
pub fn profiles_to_csv(profiles: &[Profile]) -> String {
    let mut out = String::from(IDENTITY_EXPORT_HEADER);
    out.push('\n');
    for profile in profiles {
        out.push_str(&format!(
            "{},{},{},{},{}\n",
            profile.id,
            profile.username.as_deref().unwrap_or(""),
            profile.wallet_address.as_deref().unwrap_or(""),
            profile.created_at,
            profile.updated_at,
        ));
    }
    out
}

#[get("/profile")]
pub async fn get_profile(pool: WebDbPool, auth_data: AuthData) -> Result<HttpResponse, ApiError> {
    let conn = pool.get().map_err(|_| ApiError::Db(DbError::DbConnectionError))?;

    let profile = match Profile::get_by_uid(&conn, auth_data.uid) {
        Ok(p) => p,
        Err(_) => {
            let profile = Profile::new(auth_data.uid);
            profile
                .insert(&conn)
                .map_err(|_| ApiError::Db(DbError::CouldNotInsertData))?;
            profile
        }
    };

    Ok(HttpResponse::Ok().json(&profile))
}

#[derive(Deserialize)]
pub struct UpdateProfileData {
    pub username: Option<String>,
    pub wallet_address: Option<String>,
}

#[post("/profile")]
pub async fn update_profile(
    pool: WebDbPool,
    auth_data: AuthData,
    update_data: Json<UpdateProfileData>,
) -> Result<HttpResponse, ApiError> {
    let conn = pool.get().map_err(|_| ApiError::Db(DbError::DbConnectionError))?;

    if Profile::get_by_uid(&conn, auth_data.uid).is_err() {
        Profile::new(auth_data.uid)
            .insert(&conn)
            .map_err(|_| ApiError::Db(DbError::CouldNotInsertData))?;
    }

    let changes = UpdateProfile {
        username: update_data.username.clone(),
        wallet_address: update_data.wallet_address.clone(),
        updated_at: Some(time_now() as i64),
    };

    changes
        .update(&conn, auth_data.uid)
        .map_err(|_| ApiError::Db(DbError::CouldNotInsertData))?;

    let profile = Profile::get_by_uid(&conn, auth_data.uid).map_err(|_| ApiError::Db(DbError::CouldNotFetchData))?;

    Ok(HttpResponse::Ok().json(&profile))
}

#[get("/identity/export")]
pub async fn export_identities(pool: WebDbPool, _auth_data: AuthData) -> Result<HttpResponse, ApiError> {
    let conn = pool.get().map_err(|_| ApiError::Db(DbError::DbConnectionError))?;

    let profiles = Profile::get_all(&conn).map_err(|_| ApiError::Db(DbError::CouldNotFetchData))?;

    Ok(HttpResponse::Ok()
        .content_type("text/csv")
        .body(profiles_to_csv(&profiles)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn profile(username: Option<&str>, wallet: Option<&str>) -> Profile {
        Profile {
            id: Uuid::new_v4(),
            uid: 1,
            username: username.map(String::from),
            wallet_address: wallet.map(String::from),
            created_at: 1700000000000,
            updated_at: 1700000000001,
        }
    }

    #[test]
    fn export_header_is_stable() {
        let csv = profiles_to_csv(&[]);
        assert_eq!(csv, "ID,Username,Wallet Address,Created At,Updated At\n");
    }

    #[test]
    fn export_has_one_row_per_profile() {
        let profiles = vec![
            profile(Some("amina"), Some("0xabc")),
            profile(None, None),
            profile(Some("joseph"), None),
        ];
        let csv = profiles_to_csv(&profiles);
        let lines: Vec<&str> = csv.trim_end().lines().collect();
        assert_eq!(lines.len(), profiles.len() + 1);
        assert_eq!(lines[0], IDENTITY_EXPORT_HEADER);
        assert!(lines[1].contains("amina"));
        // unset fields render as empty cells
        assert!(lines[2].contains(",,"));
    }
}
