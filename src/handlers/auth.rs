use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::config::AuthConfig;
use crate::errors::AppError;
use crate::utils;
use crate::utils::validation::validate_payload;

#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "password must not be empty"))]
    password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    token: String,
}

/// Exchanges the shared admin secret for a signed, expiring token. The
/// only unauthenticated mutating-adjacent endpoint; a wrong password is
/// 401 and no token is issued.
pub async fn login(
    auth: web::Data<AuthConfig>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, actix_web::Error> {
    validate_payload(&body.0)?;

    if body.password != auth.admin_password {
        return Err(AppError::Unauthorized("Invalid password".to_string()).into());
    }

    let token = utils::jwt::generate_token(&auth.jwt_secret)
        .map_err(|err| AppError::InternalServerError(err.to_string()))?;

    Ok(HttpResponse::Ok().json(LoginResponse { token }))
}
