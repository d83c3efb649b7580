//! Newtype wrappers for domain identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when an identifier is not a positive integer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    #[error("not an integer")]
    NotAnInteger,
    #[error("must be at least 1")]
    NotPositive,
}

/// Identifies a user account owned by the user service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub i32);

/// Identifies a product owned by the product service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductId(pub i32);

macro_rules! positive_id {
    ($name:ident) => {
        impl $name {
            /// Accept only ids `>= 1`.
            pub fn new(id: i32) -> Result<Self, IdError> {
                if id < 1 {
                    return Err(IdError::NotPositive);
                }
                Ok(Self(id))
            }

            pub fn get(self) -> i32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let id: i32 = s.trim().parse().map_err(|_| IdError::NotAnInteger)?;
                Self::new(id)
            }
        }
    };
}

positive_id!(UserId);
positive_id!(ProductId);
