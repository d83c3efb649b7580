use std::collections::HashMap;

use futures::stream::{self, StreamExt};
use tracing::{debug, error, info, warn};

use shop_domain::id::{ProductId, UserId};
use shop_domain::peer::Dependency;
use shop_domain::product::ProductSummary;
use shop_domain::user::UserSummary;

use crate::domain::repository::{EnrichmentPort, FavouriteRepository};
use crate::domain::types::{EnrichedFavourite, FavouriteKey};
use crate::error::{FavouritesServiceError, FetchError};

/// Records enriched at once while listing. Each one has a user and a product
/// lookup in flight, so at most twice this many peer calls are open.
pub const LIST_ENRICHMENT_CONCURRENCY: usize = 16;

// ── Enrichment helpers ───────────────────────────────────────────────────────

/// Fetch user and product concurrently. Each result only ever describes its own field,
/// and a payload carrying a different id than requested counts as a failure.
async fn fetch_both<P: EnrichmentPort>(
    peers: &P,
    key: &FavouriteKey,
) -> (
    Result<UserSummary, FetchError>,
    Result<ProductSummary, FetchError>,
) {
    let (user, product) = tokio::join!(
        peers.fetch_user(key.user_id),
        peers.fetch_product(key.product_id)
    );
    (
        user.and_then(|u| ensure_user_id(key.user_id, u)),
        product.and_then(|p| ensure_product_id(key.product_id, p)),
    )
}

fn ensure_user_id(expected: UserId, user: UserSummary) -> Result<UserSummary, FetchError> {
    if user.user_id != expected {
        return Err(FetchError::IdMismatch {
            expected: expected.get(),
            actual: user.user_id.get(),
        });
    }
    Ok(user)
}

fn ensure_product_id(
    expected: ProductId,
    product: ProductSummary,
) -> Result<ProductSummary, FetchError> {
    if product.product_id != expected {
        return Err(FetchError::IdMismatch {
            expected: expected.get(),
            actual: product.product_id.get(),
        });
    }
    Ok(product)
}

/// Drop entries equal to an earlier one on every field, keeping first-seen order.
///
/// Equality covers the fetched summaries too, so two entries sharing a key but
/// enriched differently are both kept. Summaries are not `Hash`, so entries are
/// bucketed by key and compared in full only within a bucket.
fn dedup_enriched(items: Vec<EnrichedFavourite>) -> Vec<EnrichedFavourite> {
    let mut by_key: HashMap<FavouriteKey, Vec<usize>> = HashMap::new();
    let mut unique: Vec<EnrichedFavourite> = Vec::with_capacity(items.len());
    for item in items {
        let slots = by_key.entry(item.key).or_default();
        if slots.iter().any(|&i| unique[i] == item) {
            continue;
        }
        slots.push(unique.len());
        unique.push(item);
    }
    unique
}

// ── ListFavourites ───────────────────────────────────────────────────────────

pub struct ListFavouritesUseCase<R: FavouriteRepository, P: EnrichmentPort> {
    pub repo: R,
    pub peers: P,
}

impl<R: FavouriteRepository, P: EnrichmentPort> ListFavouritesUseCase<R, P> {
    /// List every favourite, enriched where the peers allow.
    ///
    /// A failed lookup leaves its field empty; it never fails the entry or the list.
    pub async fn execute(&self) -> Result<Vec<EnrichedFavourite>, FavouritesServiceError> {
        info!("fetch all favourites");
        let records = self.repo.find_all().await?;
        let enriched: Vec<EnrichedFavourite> = stream::iter(records)
            .map(|key| self.enrich_or_degrade(key))
            .buffered(LIST_ENRICHMENT_CONCURRENCY)
            .collect()
            .await;
        let unique = dedup_enriched(enriched);
        debug!(count = unique.len(), "favourites listed");
        Ok(unique)
    }

    async fn enrich_or_degrade(&self, key: FavouriteKey) -> EnrichedFavourite {
        let (user, product) = fetch_both(&self.peers, &key).await;
        let user = user
            .inspect_err(|e| {
                warn!(
                    dependency = %Dependency::User,
                    id = key.user_id.get(),
                    error = %e,
                    "enrichment failed; omitting field"
                )
            })
            .ok();
        let product = product
            .inspect_err(|e| {
                warn!(
                    dependency = %Dependency::Product,
                    id = key.product_id.get(),
                    error = %e,
                    "enrichment failed; omitting field"
                )
            })
            .ok();
        EnrichedFavourite { key, user, product }
    }
}

// ── GetFavourite ─────────────────────────────────────────────────────────────

pub struct GetFavouriteUseCase<R: FavouriteRepository, P: EnrichmentPort> {
    pub repo: R,
    pub peers: P,
}

impl<R: FavouriteRepository, P: EnrichmentPort> GetFavouriteUseCase<R, P> {
    /// Fetch one favourite, fully enriched or not at all.
    pub async fn execute(
        &self,
        key: FavouriteKey,
    ) -> Result<EnrichedFavourite, FavouritesServiceError> {
        info!(%key, "fetch favourite by key");
        let record = self
            .repo
            .find_by_key(&key)
            .await?
            .ok_or(FavouritesServiceError::FavouriteNotFound(key))?;

        let (user, product) = fetch_both(&self.peers, &record).await;
        let user = user.map_err(|source| {
            error!(id = record.user_id.get(), error = %source, "failed to fetch user");
            FavouritesServiceError::FetchFailed {
                dependency: Dependency::User,
                id: record.user_id.get(),
                source,
            }
        })?;
        let product = product.map_err(|source| {
            error!(id = record.product_id.get(), error = %source, "failed to fetch product");
            FavouritesServiceError::FetchFailed {
                dependency: Dependency::Product,
                id: record.product_id.get(),
                source,
            }
        })?;

        Ok(EnrichedFavourite {
            key: record,
            user: Some(user),
            product: Some(product),
        })
    }
}

// ── SaveFavourite ────────────────────────────────────────────────────────────

pub struct SaveFavouriteUseCase<R: FavouriteRepository> {
    pub repo: R,
}

impl<R: FavouriteRepository> SaveFavouriteUseCase<R> {
    pub async fn execute(
        &self,
        key: FavouriteKey,
    ) -> Result<EnrichedFavourite, FavouritesServiceError> {
        info!(%key, "save favourite");
        let stored = self.repo.save(&key).await?;
        Ok(EnrichedFavourite::bare(stored))
    }
}

// ── UpdateFavourite ──────────────────────────────────────────────────────────

/// Same upsert as save: the record is its own key, so there is nothing to
/// check for existence against.
pub struct UpdateFavouriteUseCase<R: FavouriteRepository> {
    pub repo: R,
}

impl<R: FavouriteRepository> UpdateFavouriteUseCase<R> {
    pub async fn execute(
        &self,
        key: FavouriteKey,
    ) -> Result<EnrichedFavourite, FavouritesServiceError> {
        info!(%key, "update favourite");
        let stored = self.repo.save(&key).await?;
        Ok(EnrichedFavourite::bare(stored))
    }
}

// ── DeleteFavourite ──────────────────────────────────────────────────────────

pub struct DeleteFavouriteUseCase<R: FavouriteRepository> {
    pub repo: R,
}

impl<R: FavouriteRepository> DeleteFavouriteUseCase<R> {
    /// Idempotent: deleting an absent key still succeeds.
    pub async fn execute(&self, key: FavouriteKey) -> Result<bool, FavouritesServiceError> {
        info!(%key, "delete favourite");
        self.repo.delete_by_key(&key).await?;
        Ok(true)
    }
}
