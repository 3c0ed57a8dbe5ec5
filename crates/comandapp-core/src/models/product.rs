use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{parse_wire_enum, ParseEnumError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub enum ProductStatus {
    Active,
    Inactive,
    OutOfStock,
}

impl ProductStatus {
    const WIRE: [(ProductStatus, &'static str); 3] = [
        (ProductStatus::Active, "ACTIVE"),
        (ProductStatus::Inactive, "INACTIVE"),
        (ProductStatus::OutOfStock, "OUT_OF_STOCK"),
    ];

    pub fn as_wire(&self) -> &'static str {
        match self {
            ProductStatus::Active => "ACTIVE",
            ProductStatus::Inactive => "INACTIVE",
            ProductStatus::OutOfStock => "OUT_OF_STOCK",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProductStatus::Active => "Activo",
            ProductStatus::Inactive => "Inactivo",
            ProductStatus::OutOfStock => "Agotado",
        }
    }

    /// Status after pressing the activate/deactivate toggle.
    pub fn toggled(&self) -> Self {
        match self {
            ProductStatus::Active => ProductStatus::Inactive,
            ProductStatus::Inactive | ProductStatus::OutOfStock => ProductStatus::Active,
        }
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for ProductStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_wire_enum("product status", s, &Self::WIRE)
    }
}

/// Menu category. Served from `/categories`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryInput {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub stock: i64,
    pub status: ProductStatus,
    pub category_id: i64,
    #[serde(default)]
    pub category: Option<Category>,
}

impl Product {
    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref().map(|c| c.name.as_str())
    }
}

/// Create/update payload, sent as multipart so an image can ride along.
#[derive(Debug, Clone)]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
    pub category_id: i64,
    pub status: ProductStatus,
    /// Local image uploaded as the `image` part.
    pub image: Option<PathBuf>,
}

impl From<&Product> for ProductInput {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            stock: product.stock,
            category_id: product.category_id,
            status: product.status,
            image: None,
        }
    }
}

impl ProductInput {
    /// Text fields of the multipart form, in the order the backend expects.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("name", self.name.clone()),
            ("description", self.description.clone()),
            ("price", self.price.to_string()),
            ("stock", self.stock.to_string()),
            ("categoryId", self.category_id.to_string()),
            ("status", self.status.as_wire().to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_product_response() {
        let json = r#"{"id": 3, "name": "Lomo saltado", "description": "Clásico", "price": 32.5,
            "imageUrl": "/uploads/lomo.png", "stock": 12, "status": "OUT_OF_STOCK", "categoryId": 1,
            "category": {"id": 1, "name": "Fondos", "description": ""}}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.status, ProductStatus::OutOfStock);
        assert_eq!(product.category_name(), Some("Fondos"));
        assert_eq!(product.image_url.as_deref(), Some("/uploads/lomo.png"));
    }

    #[test]
    fn test_status_toggle() {
        assert_eq!(ProductStatus::Active.toggled(), ProductStatus::Inactive);
        assert_eq!(ProductStatus::Inactive.toggled(), ProductStatus::Active);
        assert_eq!(ProductStatus::OutOfStock.toggled(), ProductStatus::Active);
    }

    #[test]
    fn test_form_fields() {
        let input = ProductInput {
            name: "Chicha".into(),
            description: "Morada".into(),
            price: 8.0,
            stock: 40,
            category_id: 2,
            status: ProductStatus::Active,
            image: None,
        };
        let fields = input.form_fields();
        assert_eq!(fields[2], ("price", "8".to_string()));
        assert_eq!(fields[4], ("categoryId", "2".to_string()));
        assert_eq!(fields[5], ("status", "ACTIVE".to_string()));
    }
}
