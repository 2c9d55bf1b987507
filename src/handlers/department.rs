use actix_web::{web, HttpRequest, HttpResponse};
use log::error;
use serde::Deserialize;
use serde_json::json;
use sqlx::{Sqlite, SqlitePool, Transaction};
use validator::Validate;

use crate::config::AuthConfig;
use crate::errors::AppError;
use crate::models::department::Department;
use crate::utils::jwt::require_admin;
use crate::utils::validation::validate_payload;

#[derive(Deserialize, Validate)]
pub struct NewDepartment {
    #[validate(length(min = 1, max = 255))]
    name: String,
    description: Option<String>,
}

#[derive(Deserialize, Validate)]
pub struct DepartmentUpdate {
    #[validate(length(min = 1, max = 255))]
    name: String,
    description: Option<String>,
}

fn map_db_error(err: sqlx::Error) -> AppError {
    error!("database failure: {}", err);
    AppError::DatabaseError(err.to_string())
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => {
            matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation)
        }
        _ => false,
    }
}

/// Looks up a department by name inside the caller's transaction, creating
/// the row if absent. The unique constraint on `name` makes this safe
/// against concurrent creators: both inserts collapse onto the same row.
pub(crate) async fn resolve_department(
    tx: &mut Transaction<'_, Sqlite>,
    name: &str,
) -> Result<i64, sqlx::Error> {
    sqlx::query("INSERT INTO departments (name) VALUES (?) ON CONFLICT (name) DO NOTHING")
        .bind(name)
        .execute(&mut **tx)
        .await?;

    sqlx::query_scalar("SELECT id FROM departments WHERE name = ?")
        .bind(name)
        .fetch_one(&mut **tx)
        .await
}

pub async fn create_department(
    req: HttpRequest,
    pool: web::Data<SqlitePool>,
    auth: web::Data<AuthConfig>,
    new_department: web::Json<NewDepartment>,
) -> Result<HttpResponse, actix_web::Error> {
    require_admin(&req, &auth.jwt_secret)?;
    validate_payload(&new_department.0)?;

    let result = sqlx::query("INSERT INTO departments (name, description) VALUES (?, ?)")
        .bind(&new_department.name)
        .bind(&new_department.description)
        .execute(pool.get_ref())
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                AppError::Conflict("Department name already exists".to_string())
            } else {
                map_db_error(err)
            }
        })?;

    Ok(HttpResponse::Created().json(json!({ "id": result.last_insert_rowid() })))
}

/// Public listing, alphabetical by name.
pub async fn list_departments(
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, actix_web::Error> {
    let departments = sqlx::query_as::<_, Department>(
        "SELECT id, name, description FROM departments ORDER BY name",
    )
    .fetch_all(pool.get_ref())
    .await
    .map_err(map_db_error)?;

    Ok(HttpResponse::Ok().json(departments))
}

pub async fn get_department(
    req: HttpRequest,
    pool: web::Data<SqlitePool>,
    auth: web::Data<AuthConfig>,
    id: web::Path<i64>,
) -> Result<HttpResponse, actix_web::Error> {
    require_admin(&req, &auth.jwt_secret)?;

    let department = sqlx::query_as::<_, Department>(
        "SELECT id, name, description FROM departments WHERE id = ?",
    )
    .bind(id.into_inner())
    .fetch_optional(pool.get_ref())
    .await
    .map_err(map_db_error)?
    .ok_or_else(|| AppError::NotFound("Department not found".to_string()))?;

    Ok(HttpResponse::Ok().json(department))
}

pub async fn update_department(
    req: HttpRequest,
    pool: web::Data<SqlitePool>,
    auth: web::Data<AuthConfig>,
    id: web::Path<i64>,
    updates: web::Json<DepartmentUpdate>,
) -> Result<HttpResponse, actix_web::Error> {
    require_admin(&req, &auth.jwt_secret)?;
    validate_payload(&updates.0)?;

    let result = sqlx::query("UPDATE departments SET name = ?, description = ? WHERE id = ?")
        .bind(&updates.name)
        .bind(&updates.description)
        .bind(id.into_inner())
        .execute(pool.get_ref())
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                AppError::Conflict("Department name already exists".to_string())
            } else {
                map_db_error(err)
            }
        })?;

    Ok(HttpResponse::Ok().json(json!({ "updated": result.rows_affected() })))
}

/// Refuses while any attendee still references the department. The count
/// check and the delete share one transaction, closing the window where a
/// reference could appear between them.
pub async fn delete_department(
    req: HttpRequest,
    pool: web::Data<SqlitePool>,
    auth: web::Data<AuthConfig>,
    id: web::Path<i64>,
) -> Result<HttpResponse, actix_web::Error> {
    require_admin(&req, &auth.jwt_secret)?;

    let id = id.into_inner();

    let mut tx = pool.begin().await.map_err(map_db_error)?;

    let referencing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM people WHERE department_id = ?")
        .bind(id)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

    if referencing > 0 {
        return Err(AppError::DepartmentInUse(format!(
            "Department is referenced by {} attendee(s) and cannot be deleted",
            referencing
        ))
        .into());
    }

    let result = sqlx::query("DELETE FROM departments WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

    tx.commit().await.map_err(map_db_error)?;

    Ok(HttpResponse::Ok().json(json!({ "deleted": result.rows_affected() })))
}
