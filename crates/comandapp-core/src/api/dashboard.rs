//! Counts shown on the dashboard landing page.

use anyhow::Result;
use serde::Serialize;

use crate::models::{Product, ProductStatus, Table, User, Zone};

use super::ApiClient;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub zones: usize,
    pub tables: usize,
    pub tables_available: usize,
    pub products: usize,
    pub products_out_of_stock: usize,
    pub users: usize,
    pub active_users: usize,
}

impl DashboardSummary {
    pub fn from_parts(zones: &[Zone], tables: &[Table], products: &[Product], users: &[User]) -> Self {
        Self {
            zones: zones.len(),
            tables: tables.len(),
            tables_available: tables.iter().filter(|t| t.status.is_free()).count(),
            products: products.len(),
            products_out_of_stock: products
                .iter()
                .filter(|p| p.status == ProductStatus::OutOfStock)
                .count(),
            users: users.len(),
            active_users: users.iter().filter(|u| u.is_active).count(),
        }
    }
}

impl ApiClient {
    /// Fetches the four lists concurrently; any failure fails the summary.
    pub async fn fetch_dashboard_summary(&self) -> Result<DashboardSummary> {
        let (zones, tables, products, users) = futures::try_join!(
            self.fetch_zones(),
            self.fetch_tables(),
            self.fetch_products(),
            self.fetch_users(),
        )?;
        Ok(DashboardSummary::from_parts(&zones, &tables, &products, &users))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;

    use super::*;
    use crate::auth::{MemoryTokenStore, SessionStore};
    use crate::test_support::spawn_backend;

    fn lists() -> Router {
        Router::new()
            .route(
                "/api/tables-categories",
                get(|| async { Json(json!([{"id": 1, "name": "Terraza", "status": "ACTIVE"}])) }),
            )
            .route(
                "/api/tables",
                get(|| async {
                    Json(json!([
                        {"id": 1, "number": "1", "capacity": 4, "status": "AVAILABLE", "categoryId": 1},
                        {"id": 2, "number": "2", "capacity": 2, "status": "OCCUPIED", "categoryId": 1}
                    ]))
                }),
            )
            .route(
                "/api/products",
                get(|| async {
                    Json(json!([
                        {"id": 1, "name": "Café", "price": 1.5, "stock": 0, "status": "OUT_OF_STOCK", "categoryId": 1}
                    ]))
                }),
            )
    }

    fn client(base: String) -> ApiClient {
        let session = Arc::new(SessionStore::new(MemoryTokenStore::with_token("t")));
        ApiClient::new(base, session).unwrap()
    }

    #[tokio::test]
    async fn test_summary_counts() {
        let router = lists().route(
            "/api/users",
            get(|| async {
                Json(json!([
                    {"id": 1, "name": "A", "email": "a@b.com", "role": {"name": "ADMIN"}},
                    {"id": 2, "name": "B", "email": "b@b.com", "role": {"name": "USER"}, "isActive": false}
                ]))
            }),
        );
        let summary = client(spawn_backend(router).await)
            .fetch_dashboard_summary()
            .await
            .unwrap();

        assert_eq!(
            summary,
            DashboardSummary {
                zones: 1,
                tables: 2,
                tables_available: 1,
                products: 1,
                products_out_of_stock: 1,
                users: 2,
                active_users: 1,
            }
        );
    }

    #[tokio::test]
    async fn test_summary_fails_when_one_list_fails() {
        let router = lists().route(
            "/api/users",
            get(|| async { (StatusCode::FORBIDDEN, Json(json!({"message": "Sin permisos"}))) }),
        );
        let result = client(spawn_backend(router).await)
            .fetch_dashboard_summary()
            .await;
        assert!(result.is_err());
    }
}
