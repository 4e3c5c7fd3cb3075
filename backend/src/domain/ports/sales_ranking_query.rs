//! Driving port for the revenue rankings.

use async_trait::async_trait;

use crate::domain::{ClientRanking, Error, RankingLimit, SellerRanking};

/// Driving port for the revenue rankings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SalesRankingQuery: Send + Sync {
    /// `mejoresClientes`: clients by completed-order revenue.
    async fn top_clients(&self, limit: RankingLimit) -> Result<Vec<ClientRanking>, Error>;

    /// `mejoresVendedores`: sellers by completed-order revenue.
    async fn top_sellers(&self, limit: RankingLimit) -> Result<Vec<SellerRanking>, Error>;
}
