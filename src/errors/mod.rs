use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Validation(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Conflict(String),
    /// Referential-integrity refusal: deleting a department that still
    /// has attendees. Maps to 400, not 409, so the client can surface
    /// the reason as a plain business-rule error.
    DepartmentInUse(String),
    DatabaseError(String),
    InternalServerError(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation Error: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::DepartmentInUse(msg) => write!(f, "Department In Use: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Validation(msg) => {
                HttpResponse::BadRequest().json(ErrorResponse { error: msg.clone() })
            }
            AppError::Unauthorized(msg) => {
                HttpResponse::Unauthorized().json(ErrorResponse { error: msg.clone() })
            }
            AppError::Forbidden(msg) => {
                HttpResponse::Forbidden().json(ErrorResponse { error: msg.clone() })
            }
            AppError::NotFound(msg) => {
                HttpResponse::NotFound().json(ErrorResponse { error: msg.clone() })
            }
            AppError::Conflict(msg) => {
                HttpResponse::Conflict().json(ErrorResponse { error: msg.clone() })
            }
            AppError::DepartmentInUse(msg) => {
                HttpResponse::BadRequest().json(ErrorResponse { error: msg.clone() })
            }
            AppError::DatabaseError(_) => HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Database error".to_string(),
            }),
            AppError::InternalServerError(_) => {
                HttpResponse::InternalServerError().json(ErrorResponse {
                    error: "Internal server error".to_string(),
                })
            }
        }
    }
}
