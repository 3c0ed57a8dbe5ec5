//! Roles and permissions (`/roles`).

use anyhow::{Context, Result};

use crate::models::{MessageResponse, Permission, Role, RoleInput, RoleMutation};

use super::ApiClient;

const ROLES: &str = "/roles";
const PERMISSIONS: &str = "/roles/permissions";

impl ApiClient {
    pub async fn fetch_roles(&self) -> Result<Vec<Role>> {
        self.get(ROLES).await.context("Failed to fetch roles")
    }

    /// Permissions the backend knows about.
    pub async fn fetch_permissions(&self) -> Result<Vec<Permission>> {
        self.get(PERMISSIONS)
            .await
            .context("Failed to fetch permissions")
    }

    pub async fn fetch_role(&self, id: i64) -> Result<Role> {
        self.get(&format!("{}/{}", ROLES, id))
            .await
            .with_context(|| format!("Failed to fetch role {}", id))
    }

    pub async fn create_role(&self, input: &RoleInput) -> Result<RoleMutation> {
        self.post(ROLES, input).await.context("Failed to create role")
    }

    pub async fn update_role(&self, id: i64, input: &RoleInput) -> Result<RoleMutation> {
        self.put(&format!("{}/{}", ROLES, id), input)
            .await
            .with_context(|| format!("Failed to update role {}", id))
    }

    pub async fn delete_role(&self, id: i64) -> Result<MessageResponse> {
        self.delete(&format!("{}/{}", ROLES, id))
            .await
            .with_context(|| format!("Failed to delete role {}", id))
    }
}
