//! Menu: products (`/productos`) and categories (`/productos/categorias`).

use anyhow::Result;

use comandapp_core::models::{CategoryInput, ProductInput};
use comandapp_core::routes::Route;
use comandapp_core::utils::{cmp_ignore_case, contains_ignore_case};

use crate::cli::{CategoryCommand, ProductCommand};
use crate::output;

use super::App;

pub async fn products(app: &App, command: ProductCommand) -> Result<()> {
    app.require(Route::Products)?;
    let api = &app.api;

    match command {
        ProductCommand::List { category, search } => {
            let mut products = api.fetch_products().await?;
            products.sort_by(|a, b| cmp_ignore_case(&a.name, &b.name));
            let shown: Vec<_> = products
                .iter()
                .filter(|p| category.map_or(true, |id| p.category_id == id))
                .filter(|p| search.as_deref().map_or(true, |term| contains_ignore_case(&p.name, term)))
                .collect();
            app.out.emit(&shown, |p| output::products(p))
        }
        ProductCommand::Show { id } => app.out.emit(&api.fetch_product(id).await?, output::product),
        ProductCommand::Create {
            name,
            price,
            category,
            stock,
            description,
            status,
            image,
        } => {
            let input = ProductInput {
                name,
                description,
                price,
                stock,
                category_id: category,
                status,
                image,
            };
            app.out.emit(&api.create_product(&input).await?, output::product)
        }
        ProductCommand::Update {
            id,
            name,
            price,
            category,
            stock,
            description,
            status,
            image,
        } => {
            let current = api.fetch_product(id).await?;
            let mut input = ProductInput::from(&current);
            if let Some(name) = name {
                input.name = name;
            }
            if let Some(price) = price {
                input.price = price;
            }
            if let Some(category) = category {
                input.category_id = category;
            }
            if let Some(stock) = stock {
                input.stock = stock;
            }
            if let Some(description) = description {
                input.description = description;
            }
            if let Some(status) = status {
                input.status = status;
            }
            input.image = image;
            app.out.emit(&api.update_product(id, &input).await?, output::product)
        }
        ProductCommand::Toggle { id } => {
            let current = api.fetch_product(id).await?;
            app.out.emit(&api.toggle_product_status(&current).await?, output::product)
        }
        ProductCommand::Delete { id } => app.out.message(&api.delete_product(id).await?),
    }
}

pub async fn categories(app: &App, command: CategoryCommand) -> Result<()> {
    app.require(Route::Categories)?;
    let api = &app.api;

    match command {
        CategoryCommand::List => {
            let mut categories = api.fetch_categories().await?;
            categories.sort_by(|a, b| cmp_ignore_case(&a.name, &b.name));
            app.out.emit(&categories, |c| output::categories(c))
        }
        CategoryCommand::Show { id } => {
            let category = api.fetch_category(id).await?;
            app.out.emit(&category, |c| output::categories(std::slice::from_ref(c)))
        }
        CategoryCommand::Create { name, description } => {
            let category = api.create_category(&CategoryInput { name, description }).await?;
            app.out.emit(&category, |c| output::categories(std::slice::from_ref(c)))
        }
        CategoryCommand::Update {
            id,
            name,
            description,
        } => {
            let current = api.fetch_category(id).await?;
            let input = CategoryInput {
                name: name.unwrap_or(current.name),
                description: description.unwrap_or(current.description),
            };
            let category = api.update_category(id, &input).await?;
            app.out.emit(&category, |c| output::categories(std::slice::from_ref(c)))
        }
        CategoryCommand::Delete { id } => app.out.message(&api.delete_category(id).await?),
    }
}
