//! Zones (`/tables-categories`) and tables (`/tables`).

use anyhow::{Context, Result};

use crate::models::{MessageResponse, Table, TableInput, Zone, ZoneInput};

use super::ApiClient;

const ZONES: &str = "/tables-categories";
const TABLES: &str = "/tables";
const TABLES_BY_ZONE: &str = "/tables/category";

impl ApiClient {
    // ===== Zones =====

    pub async fn fetch_zones(&self) -> Result<Vec<Zone>> {
        self.get(ZONES).await.context("Failed to fetch zones")
    }

    pub async fn fetch_zone(&self, id: i64) -> Result<Zone> {
        self.get(&format!("{}/{}", ZONES, id))
            .await
            .with_context(|| format!("Failed to fetch zone {}", id))
    }

    pub async fn create_zone(&self, input: &ZoneInput) -> Result<Zone> {
        self.post(ZONES, input).await.context("Failed to create zone")
    }

    pub async fn update_zone(&self, id: i64, input: &ZoneInput) -> Result<Zone> {
        self.put(&format!("{}/{}", ZONES, id), input)
            .await
            .with_context(|| format!("Failed to update zone {}", id))
    }

    pub async fn delete_zone(&self, id: i64) -> Result<MessageResponse> {
        self.delete(&format!("{}/{}", ZONES, id))
            .await
            .with_context(|| format!("Failed to delete zone {}", id))
    }

    // ===== Tables =====

    pub async fn fetch_tables(&self) -> Result<Vec<Table>> {
        self.get(TABLES).await.context("Failed to fetch tables")
    }

    pub async fn fetch_tables_in_zone(&self, zone_id: i64) -> Result<Vec<Table>> {
        self.get(&format!("{}/{}", TABLES_BY_ZONE, zone_id))
            .await
            .with_context(|| format!("Failed to fetch tables for zone {}", zone_id))
    }

    pub async fn fetch_table(&self, id: i64) -> Result<Table> {
        self.get(&format!("{}/{}", TABLES, id))
            .await
            .with_context(|| format!("Failed to fetch table {}", id))
    }

    pub async fn create_table(&self, input: &TableInput) -> Result<Table> {
        self.post(TABLES, input).await.context("Failed to create table")
    }

    pub async fn update_table(&self, id: i64, input: &TableInput) -> Result<Table> {
        self.put(&format!("{}/{}", TABLES, id), input)
            .await
            .with_context(|| format!("Failed to update table {}", id))
    }

    pub async fn delete_table(&self, id: i64) -> Result<MessageResponse> {
        self.delete(&format!("{}/{}", TABLES, id))
            .await
            .with_context(|| format!("Failed to delete table {}", id))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::extract::Path;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    use crate::api::{ApiClient, ApiError};
    use crate::auth::{MemoryTokenStore, SessionStore};
    use crate::models::{TableInput, TableStatus};
    use crate::test_support::spawn_backend;

    fn table_json(id: i64, zone: i64) -> Value {
        json!({"id": id, "number": format!("M{}", id), "description": "", "capacity": 4,
               "status": "AVAILABLE", "categoryId": zone})
    }

    async fn client() -> ApiClient {
        let router = Router::new()
            .route("/api/tables", get(|| async { Json(json!([table_json(1, 1), table_json(2, 2)])) })
                .post(|Json(body): Json<Value>| async move {
                    (StatusCode::CREATED, Json(json!({"id": 10, "number": body["number"], "description": body["description"],
                        "capacity": body["capacity"], "status": body["status"]})))
                }))
            .route("/api/tables/category/{zone}", get(|Path(zone): Path<i64>| async move {
                Json(json!([table_json(7, zone)]))
            }))
            .route("/api/tables/{id}", get(|Path(id): Path<i64>| async move {
                if id == 1 {
                    (StatusCode::OK, Json(table_json(1, 1)))
                } else {
                    (StatusCode::NOT_FOUND, Json(json!({"message": "Mesa no encontrada"})))
                }
            }).delete(|| async { Json(json!({"message": "Mesa eliminada"})) }));
        let base = spawn_backend(router).await;
        let session = Arc::new(SessionStore::new(MemoryTokenStore::with_token("t")));
        ApiClient::new(base, session).unwrap()
    }

    #[tokio::test]
    async fn test_table_crud_paths() {
        let client = client().await;

        let tables = client.fetch_tables().await.unwrap();
        assert_eq!(tables.len(), 2);

        let in_zone = client.fetch_tables_in_zone(3).await.unwrap();
        assert_eq!(in_zone[0].category_id, Some(3));

        let created = client
            .create_table(&TableInput {
                number: "B2".into(),
                description: "Barra".into(),
                capacity: 2,
                status: TableStatus::Occupied,
                category_id: None,
            })
            .await
            .unwrap();
        assert_eq!(created.id, 10);
        assert_eq!(created.status, TableStatus::Occupied);

        let deleted = client.delete_table(1).await.unwrap();
        assert_eq!(deleted.message, "Mesa eliminada");
    }

    #[tokio::test]
    async fn test_missing_table_keeps_api_error() {
        let client = client().await;
        let err = client.fetch_table(42).await.unwrap_err();
        assert!(err.to_string().contains("Failed to fetch table 42"));
        let api_err = err.downcast_ref::<ApiError>().expect("root cause is an ApiError");
        assert!(matches!(api_err, ApiError::NotFound(m) if m == "Mesa no encontrada"));
    }
}
