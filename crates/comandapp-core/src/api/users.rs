//! Staff accounts (`/users`).

use anyhow::{Context, Result};

use crate::models::{MessageResponse, User, UserInput, UserMutation, UserUpdate};

use super::ApiClient;

const USERS: &str = "/users";

impl ApiClient {
    pub async fn fetch_users(&self) -> Result<Vec<User>> {
        self.get(USERS).await.context("Failed to fetch users")
    }

    pub async fn fetch_user(&self, id: i64) -> Result<User> {
        self.get(&format!("{}/{}", USERS, id))
            .await
            .with_context(|| format!("Failed to fetch user {}", id))
    }

    pub async fn create_user(&self, input: &UserInput) -> Result<UserMutation> {
        self.post(USERS, input).await.context("Failed to create user")
    }

    pub async fn update_user(&self, id: i64, update: &UserUpdate) -> Result<UserMutation> {
        self.put(&format!("{}/{}", USERS, id), update)
            .await
            .with_context(|| format!("Failed to update user {}", id))
    }

    /// The backend never hard-deletes users; `DELETE` deactivates.
    pub async fn deactivate_user(&self, id: i64) -> Result<MessageResponse> {
        self.delete(&format!("{}/{}", USERS, id))
            .await
            .with_context(|| format!("Failed to deactivate user {}", id))
    }
}
