use actix_web::HttpRequest;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

pub const ADMIN_ROLE: &str = "admin";

/// Tokens are valid for two hours from issue.
const TOKEN_TTL_HOURS: i64 = 2;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub role: String,
    pub exp: usize, // Expiration timestamp
}

pub fn generate_token(secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    let expiration = chrono::Utc::now()
        .checked_add_signed(chrono::Duration::hours(TOKEN_TTL_HOURS))
        .expect("Invalid timestamp")
        .timestamp() as usize;

    let claims = Claims {
        role: ADMIN_ROLE.to_string(),
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
}

pub fn validate_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::new(jsonwebtoken::Algorithm::HS256),
    )
    .map(|data| data.claims)
}

/// Guard for every mutating/protected handler: pulls the bearer token off
/// the Authorization header, verifies signature and expiry, and requires
/// the admin role claim. Runs before any database access.
pub fn require_admin(req: &HttpRequest, secret: &str) -> Result<Claims, AppError> {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|auth| auth.to_str().ok())
        .and_then(|auth| auth.split_whitespace().nth(1))
        .ok_or_else(|| AppError::Unauthorized("Missing token".to_string()))?;

    let claims = validate_token(token, secret)
        .map_err(|err| AppError::Unauthorized(err.to_string()))?;

    if claims.role != ADMIN_ROLE {
        return Err(AppError::Forbidden("Admin role required".to_string()));
    }

    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn round_trip_carries_the_admin_role() {
        let token = generate_token(SECRET).unwrap();
        let claims = validate_token(&token, SECRET).unwrap();
        assert_eq!(claims.role, ADMIN_ROLE);
    }

    #[test]
    fn expiry_is_two_hours_out() {
        let token = generate_token(SECRET).unwrap();
        let claims = validate_token(&token, SECRET).unwrap();
        let ttl = claims.exp as i64 - chrono::Utc::now().timestamp();
        assert!(ttl > 7100 && ttl <= 7200, "unexpected ttl: {ttl}");
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = generate_token(SECRET).unwrap();
        assert!(validate_token(&token, "other-secret").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let claims = Claims {
            role: ADMIN_ROLE.to_string(),
            // Well past the default 60s decode leeway.
            exp: (chrono::Utc::now().timestamp() - 7200) as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_ref()),
        )
        .unwrap();
        assert!(validate_token(&token, SECRET).is_err());
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(validate_token("not-a-token", SECRET).is_err());
    }
}
