use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use tracing::info;

use shop_core::tracing::init_tracing;
use shop_favourites::config::FavouritesConfig;
use shop_favourites::infra::http::HttpEnrichmentClient;
use shop_favourites::router::build_router;
use shop_favourites::state::AppState;
use shop_favourites_migration::Migrator;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = FavouritesConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    if config.run_migrations {
        Migrator::up(&db, None)
            .await
            .expect("failed to apply migrations");
        info!("migrations applied");
    }

    let peers = HttpEnrichmentClient::new(
        &config.user_service_url,
        &config.product_service_url,
        config.peer_timeout,
    )
    .expect("failed to build peer HTTP client");

    let state = AppState { db, peers };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.favourites_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("favourites service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
