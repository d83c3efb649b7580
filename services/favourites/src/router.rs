use axum::{
    Router,
    routing::{delete, get},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use shop_core::health::{healthz, readyz};
use shop_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::favourite::{
    create_favourite, delete_favourite, delete_favourite_by_body, find_favourite,
    get_favourite, list_favourites, update_favourite,
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Favourites
        .route(
            "/api/favourites",
            get(list_favourites)
                .post(create_favourite)
                .put(update_favourite),
        )
        .route("/api/favourites/find", get(find_favourite))
        .route("/api/favourites/delete", delete(delete_favourite_by_body))
        .route(
            "/api/favourites/{user_id}/{product_id}/{like_date}",
            get(get_favourite).delete(delete_favourite),
        )
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(propagate_request_id_layer()),
        )
        .with_state(state)
}
