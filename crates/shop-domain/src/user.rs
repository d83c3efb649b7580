//! User details as served by the user service.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::id::UserId;

/// User payload fetched from the user service.
///
/// Only `userId` is interpreted; every other field (names, email, ...) is
/// carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub user_id: UserId,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl UserSummary {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            details: Map::new(),
        }
    }
}
