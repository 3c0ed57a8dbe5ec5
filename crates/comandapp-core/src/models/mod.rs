//! Data models for the restaurant dashboard entities.
//!
//! - `Zone`, `Table`: dining room layout ("mesas" and their zones)
//! - `Product`, `Category`: the menu
//! - `User`, `Role`, `Permission`: staff accounts and access control
//!
//! Wire names are camelCase; enum values are SCREAMING_SNAKE_CASE.

pub mod product;
pub mod role;
pub mod table;
pub mod user;

use serde::{Deserialize, Serialize};

pub use product::{Category, CategoryInput, Product, ProductInput, ProductStatus};
pub use role::{Permission, Role, RoleInput, RoleMutation};
pub use table::{Table, TableInput, TableStatus, Zone, ZoneInput, ZoneStatus, ZoneSummary};
pub use user::{User, UserInput, UserMutation, UserRole, UserUpdate};

/// Acknowledgement returned by delete endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Error for parsing an enum value typed on the command line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}', expected one of: {expected}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
    pub expected: String,
}

/// Shared `FromStr` for the wire enums: accepts `BILL_PENDING`,
/// `bill-pending` or `bill_pending`.
pub(crate) fn parse_wire_enum<T: Copy>(
    kind: &'static str,
    value: &str,
    variants: &[(T, &'static str)],
) -> Result<T, ParseEnumError> {
    let normalized = value.trim().to_ascii_uppercase().replace('-', "_");
    variants
        .iter()
        .find(|(_, wire)| *wire == normalized)
        .map(|(variant, _)| *variant)
        .ok_or_else(|| ParseEnumError {
            kind,
            value: value.to_string(),
            expected: variants
                .iter()
                .map(|(_, wire)| *wire)
                .collect::<Vec<_>>()
                .join(", "),
        })
}
