use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{parse_wire_enum, ParseEnumError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub enum TableStatus {
    Available,
    Occupied,
    BillPending,
    Disabled,
}

impl TableStatus {
    const WIRE: [(TableStatus, &'static str); 4] = [
        (TableStatus::Available, "AVAILABLE"),
        (TableStatus::Occupied, "OCCUPIED"),
        (TableStatus::BillPending, "BILL_PENDING"),
        (TableStatus::Disabled, "DISABLED"),
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TableStatus::Available => "Disponible",
            TableStatus::Occupied => "Ocupada",
            TableStatus::BillPending => "Pendiente de Pago",
            TableStatus::Disabled => "Deshabilitada",
        }
    }

    /// Tables that can be seated right now.
    pub fn is_free(&self) -> bool {
        matches!(self, TableStatus::Available)
    }
}

impl fmt::Display for TableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for TableStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_wire_enum("table status", s, &Self::WIRE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub enum ZoneStatus {
    Active,
    Inactive,
}

impl ZoneStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ZoneStatus::Active => "Activa",
            ZoneStatus::Inactive => "Inactiva",
        }
    }
}

impl FromStr for ZoneStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_wire_enum(
            "zone status",
            s,
            &[(ZoneStatus::Active, "ACTIVE"), (ZoneStatus::Inactive, "INACTIVE")],
        )
    }
}

/// A dining area grouping tables. Served from `/tables-categories`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Zone {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub status: ZoneStatus,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub tables: Option<Vec<Table>>,
}

impl Zone {
    pub fn table_count(&self) -> usize {
        self.tables.as_ref().map(Vec::len).unwrap_or(0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneInput {
    pub name: String,
    pub description: String,
    pub status: ZoneStatus,
}

/// Zone as embedded in a table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct ZoneSummary {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Table {
    pub id: i64,
    pub number: String,
    #[serde(default)]
    pub description: String,
    pub capacity: u32,
    pub status: TableStatus,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub category: Option<ZoneSummary>,
}

impl Table {
    pub fn zone_name(&self) -> Option<&str> {
        self.category.as_ref().map(|zone| zone.name.as_str())
    }

    pub fn capacity_display(&self) -> String {
        match self.capacity {
            1 => "1 persona".to_string(),
            n => format!("{} personas", n),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableInput {
    pub number: String,
    pub description: String,
    pub capacity: u32,
    pub status: TableStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
}

impl From<&Table> for TableInput {
    fn from(table: &Table) -> Self {
        Self {
            number: table.number.clone(),
            description: table.description.clone(),
            capacity: table.capacity,
            status: table.status,
            category_id: table.category_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_table_response() {
        let json = r#"{"id": 4, "number": "A4", "description": "Ventana", "capacity": 6,
            "status": "BILL_PENDING", "categoryId": 2, "createdAt": "2025-01-10T12:00:00Z",
            "updatedAt": "2025-01-10T12:00:00Z", "category": {"id": 2, "name": "Terraza", "description": ""}}"#;
        let table: Table = serde_json::from_str(json).unwrap();
        assert_eq!(table.status, TableStatus::BillPending);
        assert_eq!(table.zone_name(), Some("Terraza"));
        assert_eq!(table.capacity_display(), "6 personas");
        assert_eq!(table.status.label(), "Pendiente de Pago");
    }

    #[test]
    fn test_parse_zone_with_tables() {
        let json = r#"{"id": 2, "name": "Terraza", "description": "Exterior", "status": "ACTIVE",
            "tables": [{"id": 1, "number": "T1", "description": "", "capacity": 1, "status": "AVAILABLE"}]}"#;
        let zone: Zone = serde_json::from_str(json).unwrap();
        assert_eq!(zone.table_count(), 1);
        assert_eq!(zone.tables.unwrap()[0].capacity_display(), "1 persona");
    }

    #[test]
    fn test_table_input_omits_missing_zone() {
        let input = TableInput {
            number: "B1".into(),
            description: "Barra".into(),
            capacity: 2,
            status: TableStatus::Available,
            category_id: None,
        };
        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value["status"], "AVAILABLE");
        assert!(value.get("categoryId").is_none());
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("bill-pending".parse::<TableStatus>().unwrap(), TableStatus::BillPending);
        assert_eq!("OCCUPIED".parse::<TableStatus>().unwrap(), TableStatus::Occupied);
        assert_eq!("inactive".parse::<ZoneStatus>().unwrap(), ZoneStatus::Inactive);

        let err = "broken".parse::<TableStatus>().unwrap_err();
        assert!(err.to_string().contains("AVAILABLE, OCCUPIED, BILL_PENDING, DISABLED"));
    }
}
