use sea_orm::DatabaseConnection;

use crate::infra::db::DbFavouriteRepository;
use crate::infra::http::HttpEnrichmentClient;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub peers: HttpEnrichmentClient,
}

impl AppState {
    pub fn favourite_repo(&self) -> DbFavouriteRepository {
        DbFavouriteRepository {
            db: self.db.clone(),
        }
    }

    pub fn peers(&self) -> HttpEnrichmentClient {
        self.peers.clone()
    }
}
