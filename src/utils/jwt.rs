use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenClaims {
    /// Account id.
    pub sub: String,
    pub email: String,
    pub role: RoleEnum,
    pub iat: i64,
    pub exp: i64,
}

impl TokenClaims {
    pub fn account_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.sub)
            .map_err(|_| AppError::Unauthorized("Invalid token subject".to_string()))
    }
}

#[derive(Clone)]
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expires_in: i64,
}

impl JwtManager {
    pub fn new(secret: &str, expires_in: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 30;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            expires_in,
        }
    }

    pub fn expires_in(&self) -> i64 {
        self.expires_in
    }

    pub fn encode_token(
        &self,
        account_id: Uuid,
        email: &str,
        role: RoleEnum,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = TokenClaims {
            sub: account_id.to_string(),
            email: email.to_string(),
            role,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.expires_in)).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Token generation failed: {e}")))
    }

    pub fn decode_token(&self, token: &str) -> Result<TokenClaims, AppError> {
        decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::Unauthorized("Token has expired".to_string())
                }
                _ => AppError::Unauthorized("Invalid token".to_string()),
            })
    }
}
