use axum::{
    extract::{FromRef, State},
    routing::{get, post},
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthResponse, LoginRequest, MeResponse, PublicUser, SignupRequest},
        extractors::CurrentUser,
        jwt::JwtKeys,
        password::{hash_password, verify_password},
        repo_types::{NewUser, User},
    },
    error::{ApiJson, AppError, AppResult},
    state::AppState,
};

const MIN_PASSWORD_LEN: usize = 8;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn normalize_email(raw: &str) -> AppResult<String> {
    let email = raw.trim().to_lowercase();
    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        return Err(AppError::Validation("Invalid email".into()));
    }
    Ok(email)
}

fn issue(state: &AppState, user: User) -> AppResult<Json<AuthResponse>> {
    let access_token = JwtKeys::from_ref(state).sign(&user.email)?;
    Ok(Json(AuthResponse {
        user: user.into(),
        access_token,
        token_type: "bearer",
    }))
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<SignupRequest>,
) -> AppResult<Json<AuthResponse>> {
    let email = normalize_email(&payload.email)?;

    if payload.password.chars().count() < MIN_PASSWORD_LEN {
        warn!("password too short");
        return Err(AppError::Validation("Password too short".into()));
    }

    if state.users.find_by_email(&email).await?.is_some() {
        warn!(email = %email, "email already registered");
        return Err(AppError::Validation("Email already registered".into()));
    }

    let name = payload
        .name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());
    let password_hash = hash_password(&payload.password)?;

    // a concurrent signup can still win between the check and the insert
    let user = state
        .users
        .create(NewUser {
            email,
            name,
            password_hash,
        })
        .await?
        .ok_or_else(|| AppError::Validation("Email already registered".into()))?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    issue(&state, user)
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    // a malformed address can't belong to any account
    let email = normalize_email(&payload.email)
        .map_err(|_| AppError::Auth("Invalid credentials".into()))?;

    let Some(user) = state.users.find_by_email(&email).await? else {
        warn!(email = %email, "login unknown email");
        return Err(AppError::Auth("Invalid credentials".into()));
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(email = %email, user_id = %user.id, "login invalid password");
        return Err(AppError::Auth("Invalid credentials".into()));
    }

    info!(user_id = %user.id, email = %user.email, "user logged in");
    issue(&state, user)
}

#[instrument(skip_all)]
pub async fn me(CurrentUser(user): CurrentUser) -> Json<MeResponse> {
    Json(MeResponse {
        user: PublicUser::from(user),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shape() {
        assert!(is_valid_email("cook@example.com"));
        assert!(!is_valid_email("cook@example"));
        assert!(!is_valid_email("cook example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn email_is_trimmed_and_lowercased() {
        assert_eq!(
            normalize_email("  Cook@Example.COM ").unwrap(),
            "cook@example.com"
        );
        assert!(matches!(
            normalize_email("nope"),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn public_user_has_no_password() {
        let user = User {
            id: uuid::Uuid::new_v4(),
            email: "test@example.com".into(),
            name: None,
            password_hash: "$argon2id$secret".into(),
            created_at: time::OffsetDateTime::now_utc(),
        };
        let json = serde_json::to_value(PublicUser::from(user)).unwrap();
        assert_eq!(json["email"], "test@example.com");
        assert!(json["name"].is_null());
        assert!(json.get("password_hash").is_none());
    }
}
