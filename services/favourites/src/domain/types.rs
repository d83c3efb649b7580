use std::fmt;

use chrono::{NaiveDateTime, SubsecRound};

use shop_domain::id::{ProductId, UserId};
use shop_domain::product::ProductSummary;
use shop_domain::user::UserSummary;

/// Identity of a favourite: who liked what, and when.
///
/// No field is unique on its own. The key is also the whole persisted record.
/// `like_date` is held at whole-second precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FavouriteKey {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub like_date: NaiveDateTime,
}

impl FavouriteKey {
    pub fn new(user_id: UserId, product_id: ProductId, like_date: NaiveDateTime) -> Self {
        Self {
            user_id,
            product_id,
            like_date: like_date.trunc_subsecs(0),
        }
    }
}

/// Textual form used in lookups and error messages: `1, 100, 2024-01-15T10:30:00`.
impl fmt::Display for FavouriteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}",
            self.user_id,
            self.product_id,
            self.like_date.format("%Y-%m-%dT%H:%M:%S")
        )
    }
}

/// A stored favourite together with whatever peer details could be fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedFavourite {
    pub key: FavouriteKey,
    pub user: Option<UserSummary>,
    pub product: Option<ProductSummary>,
}

impl EnrichedFavourite {
    /// The record as stored, with no enrichment.
    pub fn bare(key: FavouriteKey) -> Self {
        Self {
            key,
            user: None,
            product: None,
        }
    }
}
