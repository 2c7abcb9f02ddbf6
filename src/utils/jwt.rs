use jsonwebtoken::{encode, decode, Header, Validation, EncodingKey, DecodingKey};
use serde::{Deserialize, Serialize};

use actix_web_httpauth::extractors::bearer::BearerAuth;
use actix_web::dev::ServiceRequest;
use actix_web::{web, Error, HttpMessage, HttpRequest};
use crate::config::Config;
use crate::errors::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64,
    pub exp: usize,
}

/// Generates a JWT token for the given user that expires after `ttl_minutes`.
pub fn generate_token(user_id: i64, secret: &str, ttl_minutes: i64) -> Result<String, jsonwebtoken::errors::Error> {
    let expiration = (chrono::Utc::now() + chrono::Duration::minutes(ttl_minutes)).timestamp() as usize;

    let claims = Claims {
        user_id,
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Validates a JWT token and returns the claims if valid.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(jsonwebtoken::Algorithm::HS256),
    )
    .map(|data| data.claims)
}

/// Validator function for the `HttpAuthentication` middleware.
/// On success the decoded claims are stored in the request extensions.
/// The credentials are optional so a missing header still gets a JSON error body.
pub async fn validator(
    req: ServiceRequest,
    credentials: Option<BearerAuth>,
) -> Result<ServiceRequest, (Error, ServiceRequest)> {
    let credentials = match credentials {
        Some(credentials) => credentials,
        None => return Err((AppError::Unauthorized("No token provided".to_string()).into(), req)),
    };

    let secret = match req.app_data::<web::Data<Config>>() {
        Some(config) => config.jwt_secret.clone(),
        None => {
            return Err((
                AppError::InternalServerError("Authentication is not configured".to_string()).into(),
                req,
            ))
        }
    };

    match validate_token(credentials.token(), &secret) {
        Ok(claims) => {
            req.extensions_mut().insert(claims);
            Ok(req)
        }
        Err(_) => Err((AppError::Unauthorized("Invalid token".to_string()).into(), req)),
    }
}

/// Id of the caller, as placed in the extensions by [`validator`].
pub fn authenticated_user(req: &HttpRequest) -> Result<i64, AppError> {
    req.extensions()
        .get::<Claims>()
        .map(|claims| claims.user_id)
        .ok_or_else(|| AppError::Unauthorized("No token provided".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trips_user_id() {
        let token = generate_token(42, "secret", 60).unwrap();
        let claims = validate_token(&token, "secret").unwrap();
        assert_eq!(claims.user_id, 42);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = generate_token(42, "secret", 60).unwrap();
        assert!(validate_token(&token, "another-secret").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        // Past the default 60s leeway.
        let token = generate_token(42, "secret", -5).unwrap();
        assert!(validate_token(&token, "secret").is_err());
    }

    #[test]
    fn missing_claims_is_unauthorized() {
        let req = actix_web::test::TestRequest::default().to_http_request();
        assert!(matches!(authenticated_user(&req), Err(AppError::Unauthorized(_))));
    }
}
