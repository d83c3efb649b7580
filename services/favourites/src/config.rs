use std::time::Duration;

/// Favourites service configuration loaded from environment variables.
#[derive(Debug)]
pub struct FavouritesConfig {
    /// Database connection URL.
    pub database_url: String,
    /// TCP port for the HTTP server (default 8800). Env var: `FAVOURITES_PORT`.
    pub favourites_port: u16,
    /// Base URL of the user lookup endpoint (e.g. "http://user-service/user-service/api/users").
    pub user_service_url: String,
    /// Base URL of the product lookup endpoint (e.g. "http://product-service/product-service/api/products").
    pub product_service_url: String,
    /// Per-call timeout for peer lookups (default 5000 ms). Env var: `PEER_TIMEOUT_MS`.
    pub peer_timeout: Duration,
    /// Apply pending migrations at start-up. Env var: `RUN_MIGRATIONS`.
    pub run_migrations: bool,
}

impl FavouritesConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            favourites_port: std::env::var("FAVOURITES_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8800),
            user_service_url: std::env::var("USER_SERVICE_URL").expect("USER_SERVICE_URL"),
            product_service_url: std::env::var("PRODUCT_SERVICE_URL")
                .expect("PRODUCT_SERVICE_URL"),
            peer_timeout: Duration::from_millis(
                std::env::var("PEER_TIMEOUT_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(5000),
            ),
            run_migrations: std::env::var("RUN_MIGRATIONS")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        }
    }
}
