//! Named record collections.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Returned when a collection name is not one of [`Collection::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown collection: {0}")]
pub struct UnknownCollection(pub String);

/// One of the four record collections, each persisted as its own JSON array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Menu,
    Orders,
    Reservations,
    Customers,
}

impl Collection {
    /// Every collection, in a fixed order.
    pub const ALL: [Self; 4] = [Self::Menu, Self::Orders, Self::Reservations, Self::Customers];

    /// Lowercase name, also used in export filenames.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Menu => "menu",
            Self::Orders => "orders",
            Self::Reservations => "reservations",
            Self::Customers => "customers",
        }
    }

    /// Name of the backing file inside the data directory.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Menu => "menu.json",
            Self::Orders => "orders.json",
            Self::Reservations => "reservations.json",
            Self::Customers => "customers.json",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Collection {
    type Err = UnknownCollection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| UnknownCollection(s.to_owned()))
    }
}
