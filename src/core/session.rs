use redis::ConnectionLike;
use serde::{Deserialize, Serialize};

use crate::{model::account::Account, settings::Config};

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionData {
    pub account_id: String,
    pub refresh_token: String,
}

/// Stored under the refresh token; `token` is the access token it was issued with.
#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshSessionData {
    pub account_id: String,
    pub token: String,
}

fn refresh_key(refresh_token: &str) -> String {
    format!("refresh:{}", refresh_token)
}

/// Stores the session under the access token, expiring with it, and the
/// refresh record under the refresh token, expiring with that one.
pub fn add_session<C: ConnectionLike>(
    redis_conn: &mut C,
    account: &Account,
    config: &Config,
    token: &str,
    refresh_token: &str,
) -> anyhow::Result<()> {
    let session_data = SessionData {
        account_id: account.id.to_string(),
        refresh_token: refresh_token.to_string(),
    };
    let session_json = serde_json::to_string(&session_data)?;
    redis::Cmd::set_ex(token, session_json, config.jwt_exp as u64 * 60).exec(redis_conn)?;
    let refresh_data = RefreshSessionData {
        account_id: account.id.to_string(),
        token: token.to_string(),
    };
    let refresh_json = serde_json::to_string(&refresh_data)?;
    redis::Cmd::set_ex(
        refresh_key(refresh_token),
        refresh_json,
        config.jwt_refresh_exp as u64 * 60,
    )
    .exec(redis_conn)?;
    Ok(())
}

pub fn get_session<C: ConnectionLike>(
    redis_conn: &mut C,
    token: &str,
) -> anyhow::Result<Option<SessionData>> {
    let res: Option<String> = redis::cmd("get").arg(token).query(redis_conn)?;
    let Some(res) = res else {
        return Ok(None);
    };
    let session_data: SessionData = serde_json::from_str(res.as_str())?;
    Ok(Some(session_data))
}

pub fn get_refresh_session<C: ConnectionLike>(
    redis_conn: &mut C,
    refresh_token: &str,
) -> anyhow::Result<Option<RefreshSessionData>> {
    let res: Option<String> = redis::cmd("get")
        .arg(refresh_key(refresh_token))
        .query(redis_conn)?;
    let Some(res) = res else {
        return Ok(None);
    };
    let refresh_data: RefreshSessionData = serde_json::from_str(res.as_str())?;
    Ok(Some(refresh_data))
}

/// Removes both keys of the session. Returns `false` when there was no
/// session for the token.
pub fn remove_session<C: ConnectionLike>(redis_conn: &mut C, token: &str) -> anyhow::Result<bool> {
    let Some(session_data) = get_session(redis_conn, token)? else {
        return Ok(false);
    };
    redis::cmd("del")
        .arg(refresh_key(&session_data.refresh_token))
        .exec(redis_conn)?;
    redis::cmd("del").arg(token).exec(redis_conn)?;
    Ok(true)
}

/// Ends the session a refresh token was issued with, used when the pair is
/// rotated. Returns `false` when the refresh record is gone.
pub fn remove_refresh_session<C: ConnectionLike>(
    redis_conn: &mut C,
    refresh_token: &str,
) -> anyhow::Result<bool> {
    let Some(refresh_data) = get_refresh_session(redis_conn, refresh_token)? else {
        return Ok(false);
    };
    redis::cmd("del").arg(&refresh_data.token).exec(redis_conn)?;
    redis::cmd("del")
        .arg(refresh_key(refresh_token))
        .exec(redis_conn)?;
    Ok(true)
}
