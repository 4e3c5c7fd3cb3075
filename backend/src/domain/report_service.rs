//! Best clients and best sellers by completed-order revenue.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{ClientRepository, OrderRepository, SalesRankingQuery, UserRepository};
use crate::domain::service_support::{map_client_error, map_order_error, map_user_error};
use crate::domain::{ClientRanking, Error, RankingLimit, SellerRanking, rank_by_revenue};

/// Ranking service implementing [`SalesRankingQuery`].
///
/// Groups are sorted before the limit is applied; groups whose client or
/// seller has been deleted are skipped while joining.
#[derive(Clone)]
pub struct SalesRankingService<O, C, U> {
    orders: Arc<O>,
    clients: Arc<C>,
    users: Arc<U>,
}

impl<O, C, U> SalesRankingService<O, C, U> {
    /// Create the service; clients and sellers are looked up to decorate
    /// each revenue group.
    #[must_use]
    pub const fn new(orders: Arc<O>, clients: Arc<C>, users: Arc<U>) -> Self {
        Self {
            orders,
            clients,
            users,
        }
    }
}

#[async_trait]
impl<O, C, U> SalesRankingQuery for SalesRankingService<O, C, U>
where
    O: OrderRepository,
    C: ClientRepository,
    U: UserRepository,
{
    async fn top_clients(&self, limit: RankingLimit) -> Result<Vec<ClientRanking>, Error> {
        let groups = self
            .orders
            .revenue_by_client()
            .await
            .map_err(map_order_error)?;

        let mut ranking = Vec::new();
        for group in rank_by_revenue(groups) {
            if ranking.len() >= limit.get() as usize {
                break;
            }
            match self
                .clients
                .find_by_id(&group.key)
                .await
                .map_err(map_client_error)?
            {
                Some(cliente) => ranking.push(ClientRanking {
                    cliente,
                    total: group.total,
                }),
                None => debug!(cliente = %group.key, "skipping revenue of deleted client"),
            }
        }
        Ok(ranking)
    }

    async fn top_sellers(&self, limit: RankingLimit) -> Result<Vec<SellerRanking>, Error> {
        let groups = self
            .orders
            .revenue_by_seller()
            .await
            .map_err(map_order_error)?;

        let mut ranking = Vec::new();
        for group in rank_by_revenue(groups) {
            if ranking.len() >= limit.get() as usize {
                break;
            }
            match self
                .users
                .find_by_id(&group.key)
                .await
                .map_err(map_user_error)?
            {
                Some(vendedor) => ranking.push(SellerRanking {
                    vendedor,
                    total: group.total,
                }),
                None => debug!(vendedor = %group.key, "skipping revenue of unknown seller"),
            }
        }
        Ok(ranking)
    }
}
