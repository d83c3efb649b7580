#![allow(async_fn_in_trait)]

use shop_domain::id::{ProductId, UserId};
use shop_domain::product::ProductSummary;
use shop_domain::user::UserSummary;

use crate::domain::types::FavouriteKey;
use crate::error::{FetchError, StoreError};

/// Store of favourite records, addressed by composite key.
pub trait FavouriteRepository: Send + Sync {
    /// Every stored record, in store iteration order.
    async fn find_all(&self) -> Result<Vec<FavouriteKey>, StoreError>;

    async fn find_by_key(&self, key: &FavouriteKey) -> Result<Option<FavouriteKey>, StoreError>;

    /// Insert, or overwrite the record with the same key. Returns the record as stored.
    async fn save(&self, favourite: &FavouriteKey) -> Result<FavouriteKey, StoreError>;

    /// Remove the record if present. Absence is not an error.
    async fn delete_by_key(&self, key: &FavouriteKey) -> Result<(), StoreError>;
}

/// Port for fetching user and product details from peer services.
///
/// One attempt per call. Whether a failure is tolerated is up to the caller.
pub trait EnrichmentPort: Send + Sync {
    async fn fetch_user(&self, id: UserId) -> Result<UserSummary, FetchError>;
    async fn fetch_product(&self, id: ProductId) -> Result<ProductSummary, FetchError>;
}
