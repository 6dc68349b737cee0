use axum::{RequestPartsExt, extract::FromRequestParts, http::request::Parts};
use axum_extra::TypedHeader;
use axum_extra::headers::{Authorization, authorization::Bearer};

use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::jwt::TokenClaims;

/// Verified bearer token claims.
#[derive(Debug, Clone)]
pub struct AuthClaims(pub TokenClaims);

impl AuthClaims {
    pub fn require_role(&self, allowed: &[RoleEnum]) -> Result<(), AppError> {
        if allowed.contains(&self.0.role) {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "You do not have permission to perform this action".to_string(),
            ))
        }
    }
}

impl FromRequestParts<AppState> for AuthClaims {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| AppError::Unauthorized("Missing bearer token".to_string()))?;

        let claims = state.jwt.decode_token(bearer.token())?;
        Ok(AuthClaims(claims))
    }
}
