use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, NaiveDateTime};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use shop_domain::id::{ProductId, UserId};
use shop_domain::product::ProductSummary;
use shop_domain::user::UserSummary;
use shop_favourites::domain::repository::{EnrichmentPort, FavouriteRepository};
use shop_favourites::domain::types::FavouriteKey;
use shop_favourites::error::{FetchError, StoreError};
use shop_favourites_migration::Migrator;

// ── InMemoryFavouriteRepo ────────────────────────────────────────────────────

/// Upserting in-memory store. `find_all` returns rows exactly as held, so tests
/// can seed duplicates to exercise list dedup.
pub struct InMemoryFavouriteRepo {
    pub rows: Arc<Mutex<Vec<FavouriteKey>>>,
}

impl InMemoryFavouriteRepo {
    pub fn new(rows: Vec<FavouriteKey>) -> Self {
        Self {
            rows: Arc::new(Mutex::new(rows)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Returns a shared handle to the rows for post-execution inspection.
    pub fn rows_handle(&self) -> Arc<Mutex<Vec<FavouriteKey>>> {
        Arc::clone(&self.rows)
    }

    /// A second repo over the same rows.
    pub fn share(&self) -> Self {
        Self {
            rows: self.rows_handle(),
        }
    }
}

impl FavouriteRepository for InMemoryFavouriteRepo {
    async fn find_all(&self) -> Result<Vec<FavouriteKey>, StoreError> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn find_by_key(&self, key: &FavouriteKey) -> Result<Option<FavouriteKey>, StoreError> {
        Ok(self.rows.lock().unwrap().iter().find(|r| *r == key).copied())
    }

    async fn save(&self, favourite: &FavouriteKey) -> Result<FavouriteKey, StoreError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|r| *r == favourite) {
            Some(existing) => *existing = *favourite,
            None => rows.push(*favourite),
        }
        Ok(*favourite)
    }

    async fn delete_by_key(&self, key: &FavouriteKey) -> Result<(), StoreError> {
        self.rows.lock().unwrap().retain(|r| r != key);
        Ok(())
    }
}

// ── BrokenFavouriteRepo ──────────────────────────────────────────────────────

/// Every operation fails; `save` reports a duplicate key.
pub struct BrokenFavouriteRepo;

impl FavouriteRepository for BrokenFavouriteRepo {
    async fn find_all(&self) -> Result<Vec<FavouriteKey>, StoreError> {
        Err(StoreError::Other(anyhow::anyhow!("connection refused")))
    }

    async fn find_by_key(&self, _key: &FavouriteKey) -> Result<Option<FavouriteKey>, StoreError> {
        Err(StoreError::Other(anyhow::anyhow!("connection refused")))
    }

    async fn save(&self, _favourite: &FavouriteKey) -> Result<FavouriteKey, StoreError> {
        Err(StoreError::UniqueViolation)
    }

    async fn delete_by_key(&self, _key: &FavouriteKey) -> Result<(), StoreError> {
        Err(StoreError::Other(anyhow::anyhow!("connection refused")))
    }
}

// ── MockPeers ────────────────────────────────────────────────────────────────

/// Peer lookups answered from per-id scripts. An id without a script succeeds
/// with a bare summary; a scripted id pops one answer per call and keeps
/// repeating the last one.
#[derive(Default)]
pub struct MockPeers {
    users: Mutex<HashMap<i32, VecDeque<Result<UserSummary, FetchError>>>>,
    products: Mutex<HashMap<i32, VecDeque<Result<ProductSummary, FetchError>>>>,
    pub user_calls: Arc<AtomicUsize>,
    pub product_calls: Arc<AtomicUsize>,
}

impl MockPeers {
    pub fn healthy() -> Self {
        Self::default()
    }

    pub fn with_user(self, id: i32, answers: Vec<Result<UserSummary, FetchError>>) -> Self {
        self.users.lock().unwrap().insert(id, answers.into());
        self
    }

    pub fn with_product(self, id: i32, answers: Vec<Result<ProductSummary, FetchError>>) -> Self {
        self.products.lock().unwrap().insert(id, answers.into());
        self
    }

    pub fn failing_user(self, id: i32, err: FetchError) -> Self {
        self.with_user(id, vec![Err(err)])
    }

    pub fn failing_product(self, id: i32, err: FetchError) -> Self {
        self.with_product(id, vec![Err(err)])
    }

    pub fn total_calls(&self) -> usize {
        self.user_calls.load(Ordering::SeqCst) + self.product_calls.load(Ordering::SeqCst)
    }
}

fn next_answer<T: Clone>(
    scripts: &Mutex<HashMap<i32, VecDeque<Result<T, FetchError>>>>,
    id: i32,
    default: T,
) -> Result<T, FetchError> {
    let mut scripts = scripts.lock().unwrap();
    match scripts.get_mut(&id) {
        Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
        Some(queue) => queue.front().cloned().unwrap_or(Ok(default)),
        None => Ok(default),
    }
}

impl EnrichmentPort for MockPeers {
    async fn fetch_user(&self, id: UserId) -> Result<UserSummary, FetchError> {
        self.user_calls.fetch_add(1, Ordering::SeqCst);
        next_answer(&self.users, id.get(), test_user(id.get()))
    }

    async fn fetch_product(&self, id: ProductId) -> Result<ProductSummary, FetchError> {
        self.product_calls.fetch_add(1, Ordering::SeqCst);
        next_answer(&self.products, id.get(), test_product(id.get()))
    }
}

// ── Test fixture helpers ─────────────────────────────────────────────────────

pub fn like_date() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 15)
        .unwrap()
        .and_hms_opt(10, 30, 0)
        .unwrap()
}

pub fn test_key(user_id: i32, product_id: i32) -> FavouriteKey {
    FavouriteKey::new(UserId(user_id), ProductId(product_id), like_date())
}

pub fn test_user(id: i32) -> UserSummary {
    serde_json::from_value(shop_testing::peer::user_body(id)).unwrap()
}

pub fn test_product(id: i32) -> ProductSummary {
    serde_json::from_value(shop_testing::peer::product_body(id)).unwrap()
}

/// Legacy wire form of `like_date()`.
pub const LIKE_DATE_WIRE: &str = "15-01-2024__10:30:00:000000";

/// Fresh in-memory SQLite database with migrations applied.
pub async fn sqlite_db() -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    // One connection: every pooled connection would otherwise get its own empty database.
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

// ── GaugePeers ───────────────────────────────────────────────────────────────

/// Always-succeeding peers that record the highest number of lookups in flight
/// at once. Each lookup holds its slot for `hold`.
pub struct GaugePeers {
    in_flight: AtomicUsize,
    pub peak: AtomicUsize,
    hold: std::time::Duration,
}

impl GaugePeers {
    pub fn new(hold: std::time::Duration) -> Self {
        Self {
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            hold,
        }
    }

    async fn track(&self) {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(self.hold).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

impl EnrichmentPort for GaugePeers {
    async fn fetch_user(&self, id: UserId) -> Result<UserSummary, FetchError> {
        self.track().await;
        Ok(test_user(id.get()))
    }

    async fn fetch_product(&self, id: ProductId) -> Result<ProductSummary, FetchError> {
        self.track().await;
        Ok(test_product(id.get()))
    }
}
