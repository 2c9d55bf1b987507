use actix_web::{web, HttpRequest, HttpResponse};
use log::error;
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;
use validator::Validate;

use crate::config::AuthConfig;
use crate::errors::AppError;
use crate::handlers::department::resolve_department;
use crate::models::attendee::{Attendee, AttendeeRow};
use crate::utils::jwt::require_admin;
use crate::utils::validation::validate_payload;

/// Full attendee field set, shared by create and update. `department` is a
/// name string; it resolves to a department id (creating the row when
/// needed) inside the same transaction as the person write.
#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AttendeeInput {
    #[validate(length(min = 1, max = 255))]
    full_name: String,
    company: Option<String>,
    #[validate(length(min = 1, max = 255))]
    department: String,
    #[validate(url)]
    linkedin: Option<String>,
    #[serde(default)]
    social_links: Vec<String>,
    #[validate(range(min = 1900, max = 2100))]
    year_graduated: Option<i64>,
    description: Option<String>,
    #[validate(url)]
    photo: Option<String>,
}

const ATTENDEE_SELECT: &str = "SELECT p.id, p.full_name, p.company, d.name AS department, \
     p.linkedin, p.social_links, p.year_graduated, p.description, p.photo_url \
     FROM people p JOIN departments d ON d.id = p.department_id";

fn map_db_error(err: sqlx::Error) -> AppError {
    error!("database failure: {}", err);
    AppError::DatabaseError(err.to_string())
}

fn map_row(row: AttendeeRow) -> Result<Attendee, AppError> {
    row.into_attendee().map_err(|err| {
        error!("stored social_links failed to deserialize: {}", err);
        AppError::InternalServerError(err.to_string())
    })
}

/// Public listing: the complete collection in one response. Shuffling and
/// pagination happen on the presentation side (see `crate::grid`), never
/// here.
pub async fn list_attendees(pool: web::Data<SqlitePool>) -> Result<HttpResponse, actix_web::Error> {
    let rows = sqlx::query_as::<_, AttendeeRow>(&format!("{} ORDER BY p.id", ATTENDEE_SELECT))
        .fetch_all(pool.get_ref())
        .await
        .map_err(map_db_error)?;

    let attendees = rows
        .into_iter()
        .map(map_row)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(HttpResponse::Ok().json(json!({ "attendees": attendees })))
}

pub async fn get_attendee(
    req: HttpRequest,
    pool: web::Data<SqlitePool>,
    auth: web::Data<AuthConfig>,
    id: web::Path<i64>,
) -> Result<HttpResponse, actix_web::Error> {
    require_admin(&req, &auth.jwt_secret)?;

    let row = sqlx::query_as::<_, AttendeeRow>(&format!("{} WHERE p.id = ?", ATTENDEE_SELECT))
        .bind(id.into_inner())
        .fetch_optional(pool.get_ref())
        .await
        .map_err(map_db_error)?
        .ok_or_else(|| AppError::NotFound("Attendee not found".to_string()))?;

    Ok(HttpResponse::Ok().json(map_row(row)?))
}

pub async fn create_attendee(
    req: HttpRequest,
    pool: web::Data<SqlitePool>,
    auth: web::Data<AuthConfig>,
    attendee: web::Json<AttendeeInput>,
) -> Result<HttpResponse, actix_web::Error> {
    require_admin(&req, &auth.jwt_secret)?;
    validate_payload(&attendee.0)?;

    let input = attendee.into_inner();
    let social_links = serde_json::to_string(&input.social_links)
        .map_err(|err| AppError::InternalServerError(err.to_string()))?;

    let mut tx = pool.begin().await.map_err(map_db_error)?;

    let department_id = resolve_department(&mut tx, &input.department)
        .await
        .map_err(map_db_error)?;

    let result = sqlx::query(
        "INSERT INTO people \
            (full_name, company, department_id, linkedin, social_links, \
             year_graduated, description, photo_url) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&input.full_name)
    .bind(&input.company)
    .bind(department_id)
    .bind(&input.linkedin)
    .bind(&social_links)
    .bind(input.year_graduated)
    .bind(&input.description)
    .bind(&input.photo)
    .execute(&mut *tx)
    .await
    .map_err(map_db_error)?;

    let id = result.last_insert_rowid();
    tx.commit().await.map_err(map_db_error)?;

    Ok(HttpResponse::Created().json(json!({ "id": id })))
}

pub async fn update_attendee(
    req: HttpRequest,
    pool: web::Data<SqlitePool>,
    auth: web::Data<AuthConfig>,
    id: web::Path<i64>,
    attendee: web::Json<AttendeeInput>,
) -> Result<HttpResponse, actix_web::Error> {
    require_admin(&req, &auth.jwt_secret)?;
    validate_payload(&attendee.0)?;

    let input = attendee.into_inner();
    let social_links = serde_json::to_string(&input.social_links)
        .map_err(|err| AppError::InternalServerError(err.to_string()))?;

    let mut tx = pool.begin().await.map_err(map_db_error)?;

    let department_id = resolve_department(&mut tx, &input.department)
        .await
        .map_err(map_db_error)?;

    let result = sqlx::query(
        "UPDATE people SET \
            full_name = ?, company = ?, department_id = ?, linkedin = ?, \
            social_links = ?, year_graduated = ?, description = ?, photo_url = ? \
         WHERE id = ?",
    )
    .bind(&input.full_name)
    .bind(&input.company)
    .bind(department_id)
    .bind(&input.linkedin)
    .bind(&social_links)
    .bind(input.year_graduated)
    .bind(&input.description)
    .bind(&input.photo)
    .bind(id.into_inner())
    .execute(&mut *tx)
    .await
    .map_err(map_db_error)?;

    tx.commit().await.map_err(map_db_error)?;

    Ok(HttpResponse::Ok().json(json!({ "updated": result.rows_affected() })))
}

pub async fn delete_attendee(
    req: HttpRequest,
    pool: web::Data<SqlitePool>,
    auth: web::Data<AuthConfig>,
    id: web::Path<i64>,
) -> Result<HttpResponse, actix_web::Error> {
    require_admin(&req, &auth.jwt_secret)?;

    let result = sqlx::query("DELETE FROM people WHERE id = ?")
        .bind(id.into_inner())
        .execute(pool.get_ref())
        .await
        .map_err(map_db_error)?;

    Ok(HttpResponse::Ok().json(json!({ "deleted": result.rows_affected() })))
}
