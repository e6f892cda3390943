//! Kakao OAuth callback route.

use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::{error::AppError, routes::members::TokenResponse, services::AuthService, state::AppState};

/// Query parameters Kakao appends to the redirect URI.
#[derive(Debug, Deserialize)]
pub struct KakaoCallbackQuery {
    /// Authorization code to exchange for an access token.
    pub code: String,
}

/// `GET /api/oauth2/kakao` - complete the Kakao authorization-code flow.
///
/// Exchanges the code for a Kakao access token, fetches the profile, signs
/// the member in (registering them on first contact), and issues a token.
pub async fn kakao_callback(
    State(state): State<AppState>,
    Query(query): Query<KakaoCallbackQuery>,
) -> Result<impl IntoResponse, AppError> {
    let auth = AuthService::new(state.pool(), state.tokens(), state.kakao());
    let (member, token) = auth.kakao_login(&query.code).await?;

    tracing::info!(member_id = %member.id, "kakao sign-in completed");

    Ok(Json(TokenResponse {
        token,
        member_id: member.id,
        email: member.email.to_string(),
    }))
}
