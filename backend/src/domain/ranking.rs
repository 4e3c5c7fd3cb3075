//! Revenue rankings over completed orders.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::validation::FieldError;
use super::{Client, User};

/// Default number of ranking entries.
pub const DEFAULT_RANKING_LIMIT: u32 = 3;
/// Largest accepted ranking size.
pub const MAX_RANKING_LIMIT: u32 = 50;

/// Validated ranking size in `1..=MAX_RANKING_LIMIT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankingLimit(u32);

impl RankingLimit {
    /// Validate an optional requested limit, defaulting when absent.
    ///
    /// ```
    /// use crm_backend::domain::RankingLimit;
    ///
    /// assert_eq!(RankingLimit::try_from_query(None).unwrap().get(), 3);
    /// assert!(RankingLimit::try_from_query(Some(0)).is_err());
    /// ```
    pub fn try_from_query(raw: Option<i64>) -> Result<Self, FieldError> {
        raw.map_or(Ok(Self(DEFAULT_RANKING_LIMIT)), |requested| {
            u32::try_from(requested)
                .ok()
                .filter(|value| (1..=MAX_RANKING_LIMIT).contains(value))
                .map(Self)
                .ok_or(FieldError::OutOfRange {
                    field: "limite",
                    min: 1,
                    max: i64::from(MAX_RANKING_LIMIT),
                })
        })
    }

    /// How many entries to return.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Default for RankingLimit {
    fn default() -> Self {
        Self(DEFAULT_RANKING_LIMIT)
    }
}

/// Revenue summed for one group key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevenueGroup<K> {
    /// Client or seller the revenue belongs to.
    pub key: K,
    /// Summed order totals.
    pub total: Decimal,
}

/// Sort groups by revenue, highest first; ties fall back to the key.
///
/// Limiting is left to the caller, which drops groups whose entity no longer
/// exists while it joins.
#[must_use]
pub fn rank_by_revenue<K: Ord>(mut groups: Vec<RevenueGroup<K>>) -> Vec<RevenueGroup<K>> {
    groups.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.key.cmp(&b.key)));
    groups
}

/// Entry of `mejoresClientes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ClientRanking {
    /// Ranked client.
    pub cliente: Client,
    /// Revenue from completed orders.
    #[schema(value_type = f64)]
    pub total: Decimal,
}

/// Entry of `mejoresVendedores`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SellerRanking {
    /// Ranked seller.
    pub vendedor: User,
    /// Revenue from completed orders.
    #[schema(value_type = f64)]
    pub total: Decimal,
}
