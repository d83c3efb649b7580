use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use shop_core::serde::parse_local_date_time;
use shop_domain::id::{ProductId, UserId};
use shop_domain::product::ProductSummary;
use shop_domain::user::UserSummary;

use crate::domain::types::{EnrichedFavourite, FavouriteKey};
use crate::error::FavouritesServiceError;
use crate::state::AppState;
use crate::usecase::favourite::{
    DeleteFavouriteUseCase, GetFavouriteUseCase, ListFavouritesUseCase, SaveFavouriteUseCase,
    UpdateFavouriteUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavouriteResponse {
    pub user_id: i32,
    pub product_id: i32,
    #[serde(serialize_with = "shop_core::serde::local_date_time::serialize")]
    pub like_date: NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductSummary>,
}

impl From<EnrichedFavourite> for FavouriteResponse {
    fn from(favourite: EnrichedFavourite) -> Self {
        Self {
            user_id: favourite.key.user_id.get(),
            product_id: favourite.key.product_id.get(),
            like_date: favourite.key.like_date,
            user: favourite.user,
            product: favourite.product,
        }
    }
}

#[derive(Serialize)]
pub struct CollectionResponse<T> {
    pub collection: Vec<T>,
}

// ── Request types ────────────────────────────────────────────────────────────

/// Composite key as sent in request bodies. Any `user`/`product` fields are ignored.
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FavouriteRequest {
    pub user_id: Option<i32>,
    pub product_id: Option<i32>,
    pub like_date: Option<String>,
}

impl FavouriteRequest {
    pub fn into_key(self) -> Result<FavouriteKey, FavouritesServiceError> {
        build_key(self.user_id, self.product_id, self.like_date.as_deref())
    }
}

/// Validate raw key parts, reporting the first offending field.
fn build_key(
    user_id: Option<i32>,
    product_id: Option<i32>,
    like_date: Option<&str>,
) -> Result<FavouriteKey, FavouritesServiceError> {
    let user_id = user_id.ok_or_else(|| invalid("userId must not be null"))?;
    let user_id = UserId::new(user_id).map_err(|e| invalid(&format!("userId {e}")))?;
    let product_id = product_id.ok_or_else(|| invalid("productId must not be null"))?;
    let product_id = ProductId::new(product_id).map_err(|e| invalid(&format!("productId {e}")))?;
    let like_date = like_date.ok_or_else(|| invalid("likeDate must not be null"))?;
    let like_date = parse_local_date_time(like_date)
        .map_err(|_| invalid("likeDate must match dd-MM-yyyy__HH:mm:ss:SSSSSS"))?;
    Ok(FavouriteKey::new(user_id, product_id, like_date))
}

fn key_from_path(
    (user_id, product_id, like_date): (String, String, String),
) -> Result<FavouriteKey, FavouritesServiceError> {
    let user_id = user_id
        .parse()
        .map_err(|_| invalid("userId must be an integer"))?;
    let product_id = product_id
        .parse()
        .map_err(|_| invalid("productId must be an integer"))?;
    build_key(Some(user_id), Some(product_id), Some(&like_date))
}

fn key_from_body(
    payload: Result<Json<FavouriteRequest>, JsonRejection>,
) -> Result<FavouriteKey, FavouritesServiceError> {
    let Json(body) = payload.map_err(|rejection| invalid(&rejection.body_text()))?;
    body.into_key()
}

fn invalid(message: &str) -> FavouritesServiceError {
    FavouritesServiceError::Validation(message.to_owned())
}

// ── GET /api/favourites ──────────────────────────────────────────────────────

pub async fn list_favourites(
    State(state): State<AppState>,
) -> Result<Json<CollectionResponse<FavouriteResponse>>, FavouritesServiceError> {
    let usecase = ListFavouritesUseCase {
        repo: state.favourite_repo(),
        peers: state.peers(),
    };
    let favourites = usecase.execute().await?;
    Ok(Json(CollectionResponse {
        collection: favourites.into_iter().map(FavouriteResponse::from).collect(),
    }))
}

// ── GET /api/favourites/{userId}/{productId}/{likeDate} ──────────────────────

pub async fn get_favourite(
    State(state): State<AppState>,
    Path(parts): Path<(String, String, String)>,
) -> Result<Json<FavouriteResponse>, FavouritesServiceError> {
    let key = key_from_path(parts)?;
    fetch_one(&state, key).await
}

// ── GET /api/favourites/find ─────────────────────────────────────────────────

pub async fn find_favourite(
    State(state): State<AppState>,
    payload: Result<Json<FavouriteRequest>, JsonRejection>,
) -> Result<Json<FavouriteResponse>, FavouritesServiceError> {
    let key = key_from_body(payload)?;
    fetch_one(&state, key).await
}

async fn fetch_one(
    state: &AppState,
    key: FavouriteKey,
) -> Result<Json<FavouriteResponse>, FavouritesServiceError> {
    let usecase = GetFavouriteUseCase {
        repo: state.favourite_repo(),
        peers: state.peers(),
    };
    let favourite = usecase.execute(key).await?;
    Ok(Json(favourite.into()))
}

// ── POST /api/favourites ─────────────────────────────────────────────────────

pub async fn create_favourite(
    State(state): State<AppState>,
    payload: Result<Json<FavouriteRequest>, JsonRejection>,
) -> Result<Json<FavouriteResponse>, FavouritesServiceError> {
    let key = key_from_body(payload)?;
    let usecase = SaveFavouriteUseCase {
        repo: state.favourite_repo(),
    };
    let saved = usecase.execute(key).await?;
    Ok(Json(saved.into()))
}

// ── PUT /api/favourites ──────────────────────────────────────────────────────

pub async fn update_favourite(
    State(state): State<AppState>,
    payload: Result<Json<FavouriteRequest>, JsonRejection>,
) -> Result<Json<FavouriteResponse>, FavouritesServiceError> {
    let key = key_from_body(payload)?;
    let usecase = UpdateFavouriteUseCase {
        repo: state.favourite_repo(),
    };
    let updated = usecase.execute(key).await?;
    Ok(Json(updated.into()))
}

// ── DELETE /api/favourites/{userId}/{productId}/{likeDate} ───────────────────

pub async fn delete_favourite(
    State(state): State<AppState>,
    Path(parts): Path<(String, String, String)>,
) -> Result<Json<bool>, FavouritesServiceError> {
    let key = key_from_path(parts)?;
    delete_one(&state, key).await
}

// ── DELETE /api/favourites/delete ────────────────────────────────────────────

pub async fn delete_favourite_by_body(
    State(state): State<AppState>,
    payload: Result<Json<FavouriteRequest>, JsonRejection>,
) -> Result<Json<bool>, FavouritesServiceError> {
    let key = key_from_body(payload)?;
    delete_one(&state, key).await
}

async fn delete_one(
    state: &AppState,
    key: FavouriteKey,
) -> Result<Json<bool>, FavouritesServiceError> {
    let usecase = DeleteFavouriteUseCase {
        repo: state.favourite_repo(),
    };
    Ok(Json(usecase.execute(key).await?))
}
