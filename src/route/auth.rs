use std::sync::Arc;

use chrono::{Duration, Local};
use poem::web::Data;
use poem_openapi::{param::Query, payload::Json, OpenApi, Tags};
use uuid::Uuid;

use crate::{
    core::{
        error::PersistenceError,
        i18n::Translator,
        onboarding::{OnboardingState, OnboardingStep},
        security::{
            generate_refresh_token_from_account, generate_token_from_account,
            get_account_from_refresh_token, hash_password, verify_hash_password, AuthError,
            BearerAuthorization,
        },
        session::{add_session, remove_refresh_session, remove_session},
        utils::datetime_to_string,
    },
    model::{account::Account, enums::Language, profile::Profile},
    repository::account::{create_account, get_account_by_email},
    schema::{
        auth::{
            RefreshTokenRequest, RefreshTokenResponses, SignInRequest, SignInResponses,
            SignOutResponses, SignUpRequest, SignUpResponses, TokenResponse,
        },
        common::{ApiError, InternalServerErrorResponse, UnauthorizedResponse},
    },
    service::onboarding::load_progress,
    AppState,
};

use super::{begin, commit};

const MODULE: &str = "route.auth";

#[derive(Tags)]
enum ApiAuthTags {
    Auth,
}

pub struct ApiAuth;

#[OpenApi]
impl ApiAuth {
    /// Create an account and open a session
    #[oai(path = "/auth/sign-up", method = "post", tag = "ApiAuthTags::Auth")]
    async fn auth_sign_up(
        &self,
        json: Json<SignUpRequest>,
        lang: Query<Option<Language>>,
        state: Data<&Arc<AppState>>,
    ) -> SignUpResponses {
        let tr = Translator::resolve(None, lang.0);
        sign_up(&state, &json, &tr)
            .await
            .unwrap_or_else(Into::into)
    }

    #[oai(path = "/auth/sign-in", method = "post", tag = "ApiAuthTags::Auth")]
    async fn auth_sign_in(
        &self,
        json: Json<SignInRequest>,
        lang: Query<Option<Language>>,
        state: Data<&Arc<AppState>>,
    ) -> SignInResponses {
        sign_in(&state, &json, lang.0)
            .await
            .unwrap_or_else(Into::into)
    }

    #[oai(
        path = "/auth/refresh-token",
        method = "post",
        tag = "ApiAuthTags::Auth"
    )]
    async fn auth_refresh_token(
        &self,
        json: Json<RefreshTokenRequest>,
        lang: Query<Option<Language>>,
        state: Data<&Arc<AppState>>,
    ) -> RefreshTokenResponses {
        refresh_token(&state, &json, lang.0)
            .await
            .unwrap_or_else(Into::into)
    }

    #[oai(path = "/auth/sign-out", method = "post", tag = "ApiAuthTags::Auth")]
    async fn auth_sign_out(
        &self,
        state: Data<&Arc<AppState>>,
        lang: Query<Option<Language>>,
        auth: BearerAuthorization,
    ) -> SignOutResponses {
        let tr = Translator::resolve(None, lang.0);
        let sign_out_failed = |step: &str, err: &str| {
            let mut res = InternalServerErrorResponse::new(MODULE, "auth_sign_out", step, err);
            res.message = tr.t("errorSigningOut");
            SignOutResponses::InternalServerError(Json(res))
        };

        // get redis conn from pool
        let mut redis_conn = match state.redis_conn.get() {
            Ok(val) => val,
            Err(err) => return sign_out_failed("get redis pool connection", &err.to_string()),
        };

        let Some(token) = auth.0.token else {
            return SignOutResponses::Unauthorized(Json(UnauthorizedResponse::new(&tr)));
        };
        match remove_session(&mut redis_conn, &token) {
            Ok(true) => SignOutResponses::NoContent,
            Ok(false) => SignOutResponses::Unauthorized(Json(UnauthorizedResponse::new(&tr))),
            Err(err) => sign_out_failed("remove session", &err.to_string()),
        }
    }
}

/// Issues an access/refresh token pair and stores the session in Redis.
fn open_session(
    state: &AppState,
    account: &Account,
    function: &str,
) -> Result<(String, String), ApiError> {
    let config = &state.config;
    let token = generate_token_from_account(account, config)
        .map_err(|err| ApiError::internal(MODULE, function, "generate token", err))?;
    let refresh_token = generate_refresh_token_from_account(account, config)
        .map_err(|err| ApiError::internal(MODULE, function, "generate refresh token", err))?;
    let mut redis_conn = state
        .redis_conn
        .get()
        .map_err(|err| ApiError::internal(MODULE, function, "get redis pool connection", err))?;
    add_session(&mut redis_conn, account, config, &token, &refresh_token)
        .map_err(|err| ApiError::internal(MODULE, function, "add_session to redis", err))?;
    Ok((token, refresh_token))
}

fn token_response(
    state: &AppState,
    tokens: (String, String),
    message: String,
    onboarding: OnboardingState,
) -> TokenResponse {
    let config = &state.config;
    let now = Local::now().fixed_offset();
    let exp = now + Duration::minutes(config.jwt_exp as i64);
    let exp_refresh_token = now + Duration::minutes(config.jwt_refresh_exp as i64);
    let (token, refresh_token) = tokens;
    TokenResponse {
        exp: datetime_to_string(exp),
        exp_in: config.jwt_exp as i32 * 60,
        exp_refresh_token: datetime_to_string(exp_refresh_token),
        refresh_token,
        token,
        token_type: "Bearer".to_string(),
        message,
        state: onboarding.step(),
        redirect_to: onboarding.route().to_string(),
    }
}

async fn sign_up(
    state: &AppState,
    json: &SignUpRequest,
    tr: &Translator,
) -> Result<SignUpResponses, ApiError> {
    let function = "auth_sign_up";
    let data = json
        .validate()
        .map_err(|err| ApiError::validation(&err.0, tr))?;
    let mut tx = begin(state, MODULE, function).await?;

    let existing = get_account_by_email(&mut tx, &data.email)
        .await
        .map_err(|err| ApiError::internal(MODULE, function, "check email on database", err))?;
    if existing.is_some() {
        return Err(ApiError::conflict(
            tr.t(AuthError::AlreadyRegistered.message_key()),
            None,
        ));
    }

    let password = hash_password(&data.password)
        .map_err(|err| ApiError::internal(MODULE, function, "hash password", err))?;
    let now = Local::now().fixed_offset();
    let account = Account {
        id: Uuid::now_v7(),
        email: data.email.clone(),
        password,
        created_date: Some(now),
        updated_date: Some(now),
    };
    let profile = Profile {
        id: account.id,
        email: data.email,
        username: Some(data.username),
        account_type: None,
        language: None,
        onboarding_completed: false,
        onboarding_state: OnboardingStep::NeedsAccountType.as_str().to_string(),
        created_date: Some(now),
        updated_date: Some(now),
    };
    if let Err(err) = create_account(&mut tx, &account, &profile).await {
        let err = PersistenceError::from(err);
        // a concurrent sign-up may have taken the address since the check
        if err.is_unique_violation() {
            return Err(ApiError::conflict(
                tr.t(AuthError::AlreadyRegistered.message_key()),
                None,
            ));
        }
        return Err(ApiError::internal(MODULE, function, "create account", err));
    }
    commit(tx, MODULE, function).await?;
    tracing::info!("account {} signed up", account.id);

    let tokens = open_session(state, &account, function)?;
    Ok(SignUpResponses::Created(Json(token_response(
        state,
        tokens,
        tr.t("accountCreated"),
        OnboardingState::NeedsAccountType,
    ))))
}

async fn sign_in(
    state: &AppState,
    json: &SignInRequest,
    lang: Option<Language>,
) -> Result<SignInResponses, ApiError> {
    let function = "auth_sign_in";
    let tr = Translator::resolve(None, lang);
    let (email, password) = json
        .validate()
        .map_err(|err| ApiError::validation(&err.0, &tr))?;
    let mut tx = begin(state, MODULE, function).await?;

    let invalid = || ApiError::bad_request(tr.t(AuthError::InvalidCredentials.message_key()));
    let account = get_account_by_email(&mut tx, &email)
        .await
        .map_err(|err| ApiError::internal(MODULE, function, "check account on database", err))?
        .ok_or_else(invalid)?;
    let is_valid = verify_hash_password(&password, &account.password)
        .map_err(|err| ApiError::internal(MODULE, function, "validate password", err))?;
    if !is_valid {
        return Err(invalid());
    }

    let now = Local::now().fixed_offset();
    let progress = load_progress(&mut tx, &account.id, &now)
        .await
        .map_err(|err| ApiError::internal(MODULE, function, "load onboarding state", err))?;
    commit(tx, MODULE, function).await?;

    let tr = Translator::resolve(progress.profile.language(), lang);
    let tokens = open_session(state, &account, function)?;
    Ok(SignInResponses::Ok(Json(token_response(
        state,
        tokens,
        tr.t("welcomeToast"),
        progress.state,
    ))))
}

async fn refresh_token(
    state: &AppState,
    json: &RefreshTokenRequest,
    lang: Option<Language>,
) -> Result<RefreshTokenResponses, ApiError> {
    let function = "auth_refresh_token";
    let mut tx = begin(state, MODULE, function).await?;
    let mut redis_conn = state
        .redis_conn
        .get()
        .map_err(|err| ApiError::internal(MODULE, function, "get redis pool connection", err))?;
    let account = get_account_from_refresh_token(
        &mut tx,
        &mut redis_conn,
        &json.refresh_token,
        &state.config,
    )
    .await
    .map_err(|err| ApiError::internal(MODULE, function, "get account from refresh token", err))?;
    let Some(account) = account else {
        return Err(ApiError::unauthorized(&Translator::resolve(None, lang)));
    };
    // the pair is rotated, the old refresh token and its access token stop working
    let rotated = remove_refresh_session(&mut redis_conn, &json.refresh_token)
        .map_err(|err| ApiError::internal(MODULE, function, "remove refresh session", err))?;
    if !rotated {
        return Err(ApiError::unauthorized(&Translator::resolve(None, lang)));
    }
    drop(redis_conn);

    let now = Local::now().fixed_offset();
    let progress = load_progress(&mut tx, &account.id, &now)
        .await
        .map_err(|err| ApiError::internal(MODULE, function, "load onboarding state", err))?;
    commit(tx, MODULE, function).await?;

    let tr = Translator::resolve(progress.profile.language(), lang);
    let tokens = open_session(state, &account, function)?;
    Ok(RefreshTokenResponses::Ok(Json(token_response(
        state,
        tokens,
        tr.t("welcomeToast"),
        progress.state,
    ))))
}
