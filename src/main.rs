use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use log::info;

use attendees_backend::config::Config;
use attendees_backend::{db, routes};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    // Initialize the database pool and make sure the schema exists
    let pool = db::create_pool(&config.database_url).await;
    db::init_schema(&pool)
        .await
        .expect("Failed to initialize database schema");

    info!("Starting server at {}", config.bind_addr);

    let auth = web::Data::new(config.auth.clone());

    // Start the HTTP server
    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(pool.clone()))
            .app_data(auth.clone())
            .configure(routes)
    })
    .bind(config.bind_addr.as_str())?
    .run()
    .await
}
