use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{parse_wire_enum, ParseEnumError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub enum Permission {
    ManageUsers,
    ManageRoles,
    ManageTables,
    ManageCategories,
    ManageProducts,
    ManageOrders,
    ManageReservations,
    ViewReports,
    ProcessPayments,
    KitchenAccess,
}

impl Permission {
    pub const ALL: [(Permission, &'static str); 10] = [
        (Permission::ManageUsers, "MANAGE_USERS"),
        (Permission::ManageRoles, "MANAGE_ROLES"),
        (Permission::ManageTables, "MANAGE_TABLES"),
        (Permission::ManageCategories, "MANAGE_CATEGORIES"),
        (Permission::ManageProducts, "MANAGE_PRODUCTS"),
        (Permission::ManageOrders, "MANAGE_ORDERS"),
        (Permission::ManageReservations, "MANAGE_RESERVATIONS"),
        (Permission::ViewReports, "VIEW_REPORTS"),
        (Permission::ProcessPayments, "PROCESS_PAYMENTS"),
        (Permission::KitchenAccess, "KITCHEN_ACCESS"),
    ];

    pub fn as_wire(&self) -> &'static str {
        Self::ALL
            .iter()
            .find(|(permission, _)| permission == self)
            .map(|(_, wire)| *wire)
            .unwrap_or("UNKNOWN")
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_wire())
    }
}

impl FromStr for Permission {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_wire_enum("permission", s, &Self::ALL)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Role {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

impl Role {
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleInput {
    pub name: String,
    pub description: String,
    pub permissions: Vec<Permission>,
}

/// Body of create/update responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleMutation {
    pub message: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_role() {
        let json = r#"{"id": 2, "name": "COCINA", "description": "Cocina",
            "permissions": ["KITCHEN_ACCESS", "MANAGE_ORDERS"]}"#;
        let role: Role = serde_json::from_str(json).unwrap();
        assert!(role.has_permission(Permission::KitchenAccess));
        assert!(!role.has_permission(Permission::ManageUsers));
    }

    #[test]
    fn test_permission_wire_names_match_serde() {
        for (permission, wire) in Permission::ALL {
            assert_eq!(serde_json::to_value(permission).unwrap(), wire);
            assert_eq!(permission.as_wire(), wire);
            assert_eq!(wire.parse::<Permission>().unwrap(), permission);
        }
    }

    #[test]
    fn test_permission_from_str_lenient() {
        assert_eq!("view-reports".parse::<Permission>().unwrap(), Permission::ViewReports);
        assert!("ROOT".parse::<Permission>().is_err());
    }
}
