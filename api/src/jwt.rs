use actix_web::{dev::Payload, Error, FromRequest, HttpRequest};
use futures::future::{err, ok, Ready};

use jsonwebtoken::{
    decode, encode, errors as JError, Algorithm, DecodingKey, EncodingKey, Header, TokenData, Validation,
};
use serde::{Deserialize, Serialize};
use xerror::api::JWTError;

use time::get_time;

use xerror::api::*;

lazy_static::lazy_static! {
    /// This is the secret key with which we sign the JWT tokens.
    static ref KEY: Box<[u8]> = match std::env::var_os("SECRET_KEY")
        .and_then(|x| x.to_str().map(ToOwned::to_owned))
    {
        Some(x) => x.into_boxed_str().into_boxed_bytes(),
        None => {
            eprintln!("The env `SECRET_KEY` is either not set, or not valid ascii");
            b"a".repeat(32).into_boxed_slice()
        },
    };
    static ref E_KEY: EncodingKey = EncodingKey::from_secret(&KEY);
    static ref D_KEY: DecodingKey<'static> = DecodingKey::from_secret(&KEY);
}

/// Struct holds info needed for JWT to function correctly
#[derive(Debug, Eq, PartialEq, Clone, Serialize, Deserialize)]
pub struct UserRolesToken {
    /// Timestamp when the token was issued.
    iat: i64,
    /// Timestamp when the token expires.
    exp: i64,
    /// User id
    uid: i32,
}

impl UserRolesToken {
    #[inline]
    pub const fn when_expires(&self) -> i64 {
        self.exp
    }

    /// Method returns whether the token is expired or not.
    #[inline]
    pub fn is_expired(&self) -> bool {
        let now = get_time().sec;
        now >= self.exp
    }

    /// Method used to make sure that tokens are generated for different users to avoid collisions
    #[inline]
    pub const fn is_claimed_user(&self, claimed_user: i32) -> bool {
        self.uid == claimed_user
    }

    /// Method returns the user id from the token
    #[inline]
    pub const fn get_user(&self) -> i32 {
        self.uid
    }
}

/// Struct holds info needed for JWT to function correctly
#[derive(Debug, Eq, PartialEq, Clone, Serialize, Deserialize)]
pub struct RefreshToken {
    /// Timestamp when the token was issued.
    iat: i64,
    /// Timestamp when the token expires.
    exp: i64,
    /// User id
    uid: i32,
}

impl RefreshToken {
    #[inline]
    pub const fn when_expires(&self) -> i64 {
        self.exp
    }

    /// Method returns whether the token is expired or not.
    #[inline]
    pub fn is_expired(&self) -> bool {
        let now = get_time().sec;
        now >= self.exp
    }

    /// Method used to make sure that tokens are generated for different users to avoid collisions
    #[inline]
    pub const fn is_claimed_user(&self, claimed_user: i32) -> bool {
        self.uid == claimed_user
    }

    /// Method returns the user id from the token
    #[inline]
    pub const fn get_user(&self) -> i32 {
        self.uid
    }
}

/// Function generates a new JWT token and signs it with our KEY
/// # Arguments
/// * `uid` - User id for whom we want to generate a token
/// * `lifetime` - Number of seconds the token stays valid for
#[inline]
pub fn jwt_generate(uid: i32, lifetime: i64) -> String {
    let now = get_time().sec;
    let payload = UserRolesToken {
        iat: now,
        exp: now + lifetime,
        uid,
    };

    encode(&Header::new(Algorithm::HS512), &payload, &E_KEY).unwrap()
}

/// Function generates a new refresh token and signs it with our KEY
#[inline]
pub fn jwt_generate_refresh_token(uid: i32, lifetime: i64) -> String {
    let now = get_time().sec;
    let payload = RefreshToken {
        iat: now,
        exp: now + lifetime,
        uid,
    };

    encode(&Header::new(Algorithm::HS512), &payload, &E_KEY).unwrap()
}

/// Function checks the token supplied and validates it
/// # Arguments
/// * `token` - JWT token we want to validate
#[inline]
pub fn jwt_check(token: &str) -> Result<TokenData<UserRolesToken>, ApiError> {
    decode::<UserRolesToken>(token, &D_KEY, &Validation::new(Algorithm::HS512)).map_err(|e| match e.into_kind() {
        JError::ErrorKind::ExpiredSignature => ApiError::JWT(JWTError::Expired),
        _ => ApiError::JWT(JWTError::Invalid),
    })
}

/// Function checks the renew token supplied and validates it
/// # Arguments
/// * `renew_token` - JWT token we want to validate
#[inline]
pub fn jwt_check_refresh_token(renew_token: &str) -> Result<TokenData<RefreshToken>, ApiError> {
    decode::<RefreshToken>(renew_token, &D_KEY, &Validation::new(Algorithm::HS512)).map_err(|e| match e.into_kind() {
        JError::ErrorKind::ExpiredSignature => ApiError::JWT(JWTError::Expired),
        _ => ApiError::JWT(JWTError::Invalid),
    })
}

/// Auth data extracted from the authorization header of a request.
#[derive(Debug, Clone)]
pub struct AuthData {
    pub uid: i32,
    pub expiry: Option<i64>,
}

impl FromRequest for AuthData {
    type Error = Error;
    type Future = Ready<Result<Self, Error>>;

    fn from_request(request: &HttpRequest, _: &mut Payload) -> Self::Future {
        let headers = request.headers();
        if let Some(jwt) = headers.get("authorization") {
            if let Ok(k) = jwt.to_str() {
                match jwt_check(k) {
                    Ok(x) => ok(Self {
                        uid: x.claims.get_user(),
                        expiry: Some(x.claims.when_expires()),
                    }),
                    Err(e) => err(Error::from(e)),
                }
            } else {
                err(Error::from(ApiError::JWT(JWTError::Invalid)))
            }
        } else {
            err(Error::from(ApiError::JWT(JWTError::NotSupplied)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_generate_check() {
        std::env::set_var("SECRET_KEY", "MYSECRET");
        let token = jwt_generate(123, 60 * 60 * 3);
        assert!(jwt_check(&token).is_ok());
    }

    #[test]
    fn test_jwt_check_invalid() {
        std::env::set_var("SECRET_KEY", "MYSECRET");
        assert!(jwt_check("GO AWAY").is_err());
    }

    #[test]
    fn test_token_data() {
        std::env::set_var("SECRET_KEY", "MYSECRET");
        let token = jwt_generate(123, 60 * 60 * 3);
        let data = jwt_check(&token).unwrap().claims;

        assert!(data.when_expires() > get_time().sec);
        assert!(!data.is_expired());
        assert!(data.is_claimed_user(123));
        assert_eq!(data.get_user(), 123);
    }

    #[test]
    fn test_refresh_token_round_trip() {
        std::env::set_var("SECRET_KEY", "MYSECRET");
        let token = jwt_generate_refresh_token(77, 60 * 60 * 24);
        let data = jwt_check_refresh_token(&token).unwrap().claims;

        assert!(!data.is_expired());
        assert!(data.is_claimed_user(77));
        assert_eq!(data.get_user(), 77);
    }
}
