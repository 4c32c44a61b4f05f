use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2, PasswordHash, PasswordVerifier,
};
use chrono::{Duration, Local};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use poem::Request;
use poem_openapi::{auth::Bearer, SecurityScheme};
use redis::ConnectionLike;
use serde::{Deserialize, Serialize};
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::{model::account::Account, repository::account::get_account_by_id, settings::Config};

use super::session::{get_refresh_session, get_session};

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("email already registered")]
    AlreadyRegistered,
    #[error("no active session")]
    NoSession,
}

impl AuthError {
    /// Translation key of the message shown to the user.
    pub fn message_key(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "invalidCredentials",
            AuthError::AlreadyRegistered => "emailAlreadyRegistered",
            AuthError::NoSession => "sessionRequired",
        }
    }
}

/// password hashing
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);

    // Argon2id v19, default params
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)?
        .to_string();

    Ok(password_hash)
}

/// password hash verification
pub fn verify_hash_password(
    password: &str,
    password_hash: &str,
) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(password_hash)?;
    let verify = Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok();
    Ok(verify)
}

#[cfg(test)]
mod test_hash_password {
    use super::*;

    #[test]
    fn test_hashing_password() {
        let password = "secret1";
        let hash = hash_password(password);
        assert!(hash.is_ok());
        let hash = hash.unwrap();
        let verify = verify_hash_password(password, &hash);
        assert!(verify.is_ok());
        assert!(verify.unwrap());
        let verify_false = verify_hash_password("wrongpassword", &hash);
        assert!(verify_false.is_ok());
        assert!(!verify_false.unwrap());
    }

    #[test]
    fn test_error_message_keys() {
        assert_eq!(
            AuthError::AlreadyRegistered.message_key(),
            "emailAlreadyRegistered"
        );
        assert_eq!(
            AuthError::InvalidCredentials.message_key(),
            "invalidCredentials"
        );
    }
}

pub struct Keys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
}

impl Keys {
    fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub id: String,
    pub email: String,
    pub exp: i64,
    pub jti: String,
}

impl Claims {
    pub fn new(account_id: &str, email: &str, config: &Config) -> Self {
        let exp = (Local::now() + Duration::minutes(config.jwt_exp as i64)).timestamp();

        Self {
            id: account_id.to_string(),
            email: email.to_string(),
            exp,
            jti: Uuid::now_v7().to_string(),
        }
    }
}

/// Generate token
pub fn encode_token(claims: &Claims, jwt_secret: &str) -> anyhow::Result<String> {
    let keys = Keys::new(jwt_secret.as_bytes());
    let token = encode(&Header::default(), &claims, &keys.encoding)?;
    Ok(token)
}

pub fn generate_token_from_account(account: &Account, config: &Config) -> anyhow::Result<String> {
    let claims = Claims::new(account.id.to_string().as_str(), &account.email, config);
    encode_token(&claims, &config.jwt_secret)
}

/// Resolves a bearer token to its account through the Redis session. A token
/// without a live session resolves to `None`.
pub async fn get_account_from_token<C: ConnectionLike>(
    tx: &mut Transaction<'_, Postgres>,
    redis_conn: &mut C,
    jwt_token: Option<String>,
) -> anyhow::Result<Option<Account>> {
    let Some(jwt_token) = jwt_token else {
        return Ok(None);
    };
    let Some(session) = get_session(redis_conn, &jwt_token)? else {
        return Ok(None);
    };
    let account_id = Uuid::parse_str(&session.account_id)?;
    get_account_by_id(tx, &account_id).await
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ClaimsRefresh {
    pub id: String,
    pub email: String,
    pub exp: i64,
    pub jti: String,
    pub type_key: String,
}

impl ClaimsRefresh {
    pub fn new(account_id: &str, email: &str, config: &Config) -> Self {
        let exp = (Local::now() + Duration::minutes(config.jwt_refresh_exp as i64)).timestamp();

        Self {
            id: account_id.to_string(),
            email: email.to_string(),
            exp,
            jti: Uuid::now_v7().to_string(),
            type_key: "refresh".to_string(),
        }
    }
}

/// Generate refresh token
pub fn encode_refresh_token(claims: &ClaimsRefresh, jwt_secret: &str) -> anyhow::Result<String> {
    let keys = Keys::new(jwt_secret.as_bytes());
    let token = encode(&Header::default(), &claims, &keys.encoding)?;
    Ok(token)
}

/// Extract payload and Validate refresh token
pub fn decode_refresh_token(token: &str, jwt_secret: &str) -> anyhow::Result<ClaimsRefresh> {
    let keys = Keys::new(jwt_secret.as_bytes());
    let token_data = decode::<ClaimsRefresh>(token, &keys.decoding, &Validation::default())?;
    if token_data.claims.type_key != "refresh" {
        anyhow::bail!("not a refresh token");
    }
    Ok(token_data.claims)
}

pub fn generate_refresh_token_from_account(
    account: &Account,
    config: &Config,
) -> anyhow::Result<String> {
    let claims = ClaimsRefresh::new(account.id.to_string().as_str(), &account.email, config);
    encode_refresh_token(&claims, &config.jwt_secret)
}

/// Invalid or expired refresh tokens, and refresh tokens whose session was
/// ended, resolve to `None`.
pub async fn get_account_from_refresh_token<C: ConnectionLike>(
    tx: &mut Transaction<'_, Postgres>,
    redis_conn: &mut C,
    refresh_token: &str,
    config: &Config,
) -> anyhow::Result<Option<Account>> {
    let claims = match decode_refresh_token(refresh_token, &config.jwt_secret) {
        Ok(val) => val,
        Err(err) => {
            tracing::debug!("rejected refresh token: {}", err);
            return Ok(None);
        }
    };
    let Some(session) = get_refresh_session(redis_conn, refresh_token)? else {
        tracing::debug!("refresh token of {} has no session", claims.id);
        return Ok(None);
    };
    if session.account_id != claims.id {
        return Ok(None);
    }
    let account_id = Uuid::parse_str(&claims.id)?;
    get_account_by_id(tx, &account_id).await
}


#[derive(Debug, Serialize, Deserialize)]
pub struct UserApiKey {
    pub token: Option<String>,
}

/// Bearer authorization
#[derive(SecurityScheme)]
#[oai(ty = "bearer", checker = "bearer_checker")]
pub struct BearerAuthorization(pub UserApiKey);

pub async fn bearer_checker(_req: &Request, api_key: Bearer) -> Option<UserApiKey> {
    Some(UserApiKey {
        token: Some(api_key.token),
    })
}
