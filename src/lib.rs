pub mod config;
pub mod db;
pub mod errors;
pub mod grid;
pub mod handlers;
pub mod models;
pub mod utils;

use actix_web::web;

/// Mounts the full API route table onto an actix service config.
///
/// Shared between `main` and the integration tests so both run the exact
/// same handlers.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/login")
            .route(web::post().to(handlers::auth::login)),
    )
    .service(
        web::resource("/api/attendees")
            .route(web::get().to(handlers::attendee::list_attendees))
            .route(web::post().to(handlers::attendee::create_attendee)),
    )
    .service(
        web::resource("/api/attendees/{id}")
            .route(web::get().to(handlers::attendee::get_attendee))
            .route(web::put().to(handlers::attendee::update_attendee))
            .route(web::delete().to(handlers::attendee::delete_attendee)),
    )
    .service(
        web::resource("/api/departments")
            .route(web::get().to(handlers::department::list_departments))
            .route(web::post().to(handlers::department::create_department)),
    )
    .service(
        web::resource("/api/departments/{id}")
            .route(web::get().to(handlers::department::get_department))
            .route(web::put().to(handlers::department::update_department))
            .route(web::delete().to(handlers::department::delete_department)),
    );
}
