//! Membership routes: register and login.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};

use giftwise_core::MemberId;

use crate::{error::AppError, services::AuthService, state::AppState};

/// Credentials for registration and login.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

/// Issued token plus the member it identifies.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub member_id: MemberId,
    pub email: String,
}

/// `POST /api/members/register` - register a member and issue a token.
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let auth = AuthService::new(state.pool(), state.tokens(), state.kakao());
    let (member, token) = auth.register(&payload.email, &payload.password).await?;

    tracing::info!(member_id = %member.id, "member registered");

    Ok((
        StatusCode::CREATED,
        Json(TokenResponse {
            token,
            member_id: member.id,
            email: member.email.to_string(),
        }),
    ))
}

/// `POST /api/members/login` - verify credentials and issue a token.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let auth = AuthService::new(state.pool(), state.tokens(), state.kakao());
    let (member, token) = auth.login(&payload.email, &payload.password).await?;

    Ok(Json(TokenResponse {
        token,
        member_id: member.id,
        email: member.email.to_string(),
    }))
}
