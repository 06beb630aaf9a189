use actix_web::{HttpMessage, HttpResponse, dev::ServiceRequest};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{
    env_config::JwtConfig,
    error::{AppError, Res},
};

/// Claims of a dashboard session token. The external identity provider
/// resolves the sign-in and issues the token; this service only validates
/// it and reads the owner email out of it.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    pub email: String,
    pub exp: usize,
}

/// Generates a session token for the given owner email.
///
/// Sessions are normally issued by the external identity provider; this
/// helper exists for tests and local tooling that need a token without
/// going through the provider.
pub fn generate_session_token(email: &str, config: &JwtConfig) -> Res<String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(config.expiration_hours))
        .expect("valid timestamp")
        .timestamp();

    let claims = SessionClaims {
        email: email.to_string(),
        exp: expiration as usize,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(AppError::from)
}

/// Extracts claims from a session token. Requires the JWT secret.
pub fn validate_session_token(token: &str, secret: &str) -> Res<SessionClaims> {
    let token_data = jsonwebtoken::decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}

pub fn get_session_claims_or_error(req: &ServiceRequest) -> Result<SessionClaims, HttpResponse> {
    if let Some(claims_res) = req.extensions().get::<Res<SessionClaims>>() {
        match claims_res {
            Ok(claims) => Ok(claims.clone()),
            Err(app_error) => Err(app_error.to_http_response()),
        }
    } else {
        Err(AppError::Unauthorized("No session token provided".to_string()).to_http_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".to_string(),
            expiration_hours: 1,
        }
    }

    #[test]
    fn session_token_round_trips() {
        let config = test_config();
        let token = generate_session_token("owner@example.com", &config).unwrap();
        let claims = validate_session_token(&token, &config.secret).unwrap();

        assert_eq!(claims.email, "owner@example.com");
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let config = test_config();
        let token = generate_session_token("owner@example.com", &config).unwrap();

        assert!(validate_session_token(&token, "other-secret").is_err());
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(validate_session_token("not-a-jwt", "test-secret").is_err());
    }
}
