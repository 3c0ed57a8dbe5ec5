//! Menu products (`/products`) and categories (`/categories`).

use std::path::Path;

use anyhow::{Context, Result};
use reqwest::multipart::{Form, Part};
use reqwest::Method;

use crate::models::{Category, CategoryInput, MessageResponse, Product, ProductInput};

use super::ApiClient;

const PRODUCTS: &str = "/products";
const CATEGORIES: &str = "/categories";

/// Build the multipart body for a product, attaching the image if one is set.
fn product_form(input: &ProductInput) -> Result<Form> {
    let mut form = Form::new();
    for (name, value) in input.form_fields() {
        form = form.text(name, value);
    }

    if let Some(ref path) = input.image {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read image {}", path.display()))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(image_mime(path))
            .context("Invalid image content type")?;
        form = form.part("image", part);
    }

    Ok(form)
}

fn image_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

impl ApiClient {
    // ===== Products =====

    pub async fn fetch_products(&self) -> Result<Vec<Product>> {
        self.get(PRODUCTS).await.context("Failed to fetch products")
    }

    pub async fn fetch_product(&self, id: i64) -> Result<Product> {
        self.get(&format!("{}/{}", PRODUCTS, id))
            .await
            .with_context(|| format!("Failed to fetch product {}", id))
    }

    pub async fn create_product(&self, input: &ProductInput) -> Result<Product> {
        let form = product_form(input)?;
        self.send_form(Method::POST, PRODUCTS, form)
            .await
            .context("Failed to create product")
    }

    pub async fn update_product(&self, id: i64, input: &ProductInput) -> Result<Product> {
        let form = product_form(input)?;
        self.send_form(Method::PUT, &format!("{}/{}", PRODUCTS, id), form)
            .await
            .with_context(|| format!("Failed to update product {}", id))
    }

    pub async fn delete_product(&self, id: i64) -> Result<MessageResponse> {
        self.delete(&format!("{}/{}", PRODUCTS, id))
            .await
            .with_context(|| format!("Failed to delete product {}", id))
    }

    /// Flip a product between active and inactive, keeping everything else.
    pub async fn toggle_product_status(&self, product: &Product) -> Result<Product> {
        let mut input = ProductInput::from(product);
        input.status = product.status.toggled();
        self.update_product(product.id, &input).await
    }

    // ===== Categories =====

    pub async fn fetch_categories(&self) -> Result<Vec<Category>> {
        self.get(CATEGORIES).await.context("Failed to fetch categories")
    }

    pub async fn fetch_category(&self, id: i64) -> Result<Category> {
        self.get(&format!("{}/{}", CATEGORIES, id))
            .await
            .with_context(|| format!("Failed to fetch category {}", id))
    }

    pub async fn create_category(&self, input: &CategoryInput) -> Result<Category> {
        self.post(CATEGORIES, input)
            .await
            .context("Failed to create category")
    }

    pub async fn update_category(&self, id: i64, input: &CategoryInput) -> Result<Category> {
        self.put(&format!("{}/{}", CATEGORIES, id), input)
            .await
            .with_context(|| format!("Failed to update category {}", id))
    }

    pub async fn delete_category(&self, id: i64) -> Result<MessageResponse> {
        self.delete(&format!("{}/{}", CATEGORIES, id))
            .await
            .with_context(|| format!("Failed to delete category {}", id))
    }
}
