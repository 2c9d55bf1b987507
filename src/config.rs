use std::env;

/// Credentials shared by the login and guard paths. Read once at startup,
/// read-only afterwards.
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub admin_password: String,
}

pub struct Config {
    pub bind_addr: String,
    pub database_url: String,
    pub auth: AuthConfig,
}

impl Config {
    /// Loads configuration from the environment, panicking on anything
    /// required. Call this once in `main`, after `dotenv`.
    pub fn from_env() -> Self {
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");
        if jwt_secret.is_empty() {
            panic!("JWT_SECRET cannot be empty");
        }

        let admin_password = env::var("ADMIN_PASSWORD").expect("ADMIN_PASSWORD must be set");
        if admin_password.is_empty() {
            panic!("ADMIN_PASSWORD cannot be empty");
        }

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());

        Config {
            bind_addr,
            database_url,
            auth: AuthConfig {
                jwt_secret,
                admin_password,
            },
        }
    }
}
