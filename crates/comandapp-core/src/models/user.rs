use serde::{Deserialize, Serialize};

/// Role as embedded in a user record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct UserRole {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
}

/// Staff account as returned by `/users`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role_id: i64,
}

/// Partial update; only the fields that are set are sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl UserUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.role_id.is_none()
            && self.is_active.is_none()
    }
}

/// Body of create/update responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserMutation {
    pub message: String,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_without_role_id() {
        let json = r#"{"id": 5, "name": "Ana", "email": "ana@pp.com", "role": {"name": "USER"}, "isActive": false}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.role.id, None);
        assert!(!user.is_active);
    }

    #[test]
    fn test_update_sends_only_set_fields() {
        let update = UserUpdate {
            is_active: Some(true),
            role_id: Some(2),
            ..Default::default()
        };
        assert!(!update.is_empty());
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value, serde_json::json!({"roleId": 2, "isActive": true}));
        assert!(UserUpdate::default().is_empty());
    }
}
