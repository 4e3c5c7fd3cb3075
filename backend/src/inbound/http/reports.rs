//! Revenue rankings over completed orders.
//!
//! ```text
//! GET /api/v1/reportes/mejores-clientes?limite=3
//! GET /api/v1/reportes/mejores-vendedores?limite=3
//! ```

use actix_web::{get, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::{ClientRanking, Error, SellerRanking};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Actor;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_limit;

/// Query shared by both rankings.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct RankingQuery {
    /// Number of entries, 1 to 50; defaults to 3.
    #[param(example = 3)]
    pub limite: Option<i64>,
}

/// Clients by completed-order revenue (`mejoresClientes`).
#[utoipa::path(
    get,
    path = "/api/v1/reportes/mejores-clientes",
    params(RankingQuery),
    responses(
        (status = 200, description = "Highest revenue first", body = [ClientRanking]),
        (status = 400, description = "Limit out of range", body = Error),
        (status = 401, description = "Not authenticated", body = Error)
    ),
    tags = ["reportes"],
    operation_id = "mejoresClientes",
    security(("BearerToken" = []))
)]
#[get("/reportes/mejores-clientes")]
pub async fn top_clients(
    state: web::Data<HttpState>,
    actor: Actor,
    query: web::Query<RankingQuery>,
) -> ApiResult<web::Json<Vec<ClientRanking>>> {
    actor.require()?;
    let limit = parse_limit(query.into_inner().limite)?;
    Ok(web::Json(state.rankings.top_clients(limit).await?))
}

/// Sellers by completed-order revenue (`mejoresVendedores`).
#[utoipa::path(
    get,
    path = "/api/v1/reportes/mejores-vendedores",
    params(RankingQuery),
    responses(
        (status = 200, description = "Highest revenue first", body = [SellerRanking]),
        (status = 400, description = "Limit out of range", body = Error),
        (status = 401, description = "Not authenticated", body = Error)
    ),
    tags = ["reportes"],
    operation_id = "mejoresVendedores",
    security(("BearerToken" = []))
)]
#[get("/reportes/mejores-vendedores")]
pub async fn top_sellers(
    state: web::Data<HttpState>,
    actor: Actor,
    query: web::Query<RankingQuery>,
) -> ApiResult<web::Json<Vec<SellerRanking>>> {
    actor.require()?;
    let limit = parse_limit(query.into_inner().limite)?;
    Ok(web::Json(state.rankings.top_sellers(limit).await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockSalesRankingQuery;
    use crate::domain::{DEFAULT_RANKING_LIMIT, RankingLimit, UserId};
    use crate::inbound::http::test_utils::{StateBuilder, TEST_TOKEN, bearer, seller};
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;

    #[actix_web::test]
    async fn default_limit_is_three() {
        let mut rankings = MockSalesRankingQuery::new();
        rankings
            .expect_top_clients()
            .withf(|limit: &RankingLimit| limit.get() == DEFAULT_RANKING_LIMIT)
            .return_once(|_| Ok(Vec::new()));
        let state = StateBuilder::default()
            .with_actor(seller(UserId::random()))
            .rankings(rankings)
            .build();
        let app = test::init_service(App::new().app_data(state).service(top_clients)).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/reportes/mejores-clientes")
                .insert_header(bearer(TEST_TOKEN))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn explicit_limit_is_forwarded() {
        let mut rankings = MockSalesRankingQuery::new();
        rankings
            .expect_top_sellers()
            .withf(|limit: &RankingLimit| limit.get() == 10)
            .return_once(|_| Ok(Vec::new()));
        let state = StateBuilder::default()
            .with_actor(seller(UserId::random()))
            .rankings(rankings)
            .build();
        let app = test::init_service(App::new().app_data(state).service(top_sellers)).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/reportes/mejores-vendedores?limite=10")
                .insert_header(bearer(TEST_TOKEN))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
    }

    #[rstest]
    #[case("0")]
    #[case("51")]
    #[actix_web::test]
    async fn out_of_range_limit_is_bad_request(#[case] limite: &str) {
        let state = StateBuilder::default()
            .with_actor(seller(UserId::random()))
            .build();
        let app = test::init_service(App::new().app_data(state).service(top_sellers)).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/reportes/mejores-vendedores?limite={limite}"))
                .insert_header(bearer(TEST_TOKEN))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn rankings_require_actor() {
        let state = StateBuilder::default().build();
        let app = test::init_service(App::new().app_data(state).service(top_clients)).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/reportes/mejores-clientes")
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
