//! Plain-text and JSON rendering of command results.

use anyhow::Result;
use serde::Serialize;

use comandapp_core::api::DashboardSummary;
use comandapp_core::models::{Category, MessageResponse, Product, Role, Table, User, Zone};
use comandapp_core::utils::{format_price, truncate};

// ============================================================================
// Constants
// ============================================================================

/// Width of free-text columns (names, descriptions)
const TEXT_COLUMN: usize = 28;

#[derive(Debug, Clone, Copy)]
pub struct Output {
    pub json: bool,
}

impl Output {
    /// Print `value` as pretty JSON, or as the text produced by `render`.
    pub fn emit<T, F>(&self, value: &T, render: F) -> Result<()>
    where
        T: Serialize + ?Sized,
        F: FnOnce(&T) -> String,
    {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            println!("{}", render(value));
        }
        Ok(())
    }

    /// Acknowledgement of a delete; JSON mode prints the server payload.
    pub fn message(&self, response: &MessageResponse) -> Result<()> {
        self.emit(response, |r| r.message.clone())
    }
}

fn column(text: &str) -> String {
    format!("{:<width$}", truncate(text, TEXT_COLUMN), width = TEXT_COLUMN)
}

pub fn zones(zones: &[Zone]) -> String {
    let mut out = format!("{:<6} {} {:<10} {}", "ID", column("NOMBRE"), "ESTADO", "MESAS");
    for zone in zones {
        out.push_str(&format!(
            "\n{:<6} {} {:<10} {}",
            zone.id,
            column(&zone.name),
            zone.status.label(),
            zone.table_count()
        ));
    }
    out
}

pub fn zone(zone: &Zone) -> String {
    format!(
        "Zona #{}: {}\n  Estado: {}\n  Descripción: {}\n  Mesas: {}",
        zone.id,
        zone.name,
        zone.status.label(),
        zone.description,
        zone.table_count()
    )
}

pub fn tables(tables: &[Table]) -> String {
    let mut out = format!(
        "{:<6} {:<8} {:<12} {:<18} {}",
        "ID", "MESA", "CAPACIDAD", "ESTADO", "ZONA"
    );
    for table in tables {
        out.push_str(&format!(
            "\n{:<6} {:<8} {:<12} {:<18} {}",
            table.id,
            table.number,
            table.capacity_display(),
            table.status,
            table.zone_name().unwrap_or("-")
        ));
    }
    out
}

pub fn table(table: &Table) -> String {
    format!(
        "Mesa {} (#{})\n  Capacidad: {}\n  Estado: {}\n  Zona: {}\n  Descripción: {}",
        table.number,
        table.id,
        table.capacity_display(),
        table.status,
        table.zone_name().unwrap_or("-"),
        table.description
    )
}

pub fn products(products: &[&Product]) -> String {
    let mut out = format!(
        "{:<6} {} {:>10} {:>6} {:<10} {}",
        "ID",
        column("NOMBRE"),
        "PRECIO",
        "STOCK",
        "ESTADO",
        "CATEGORÍA"
    );
    for product in products {
        out.push_str(&format!(
            "\n{:<6} {} {:>10} {:>6} {:<10} {}",
            product.id,
            column(&product.name),
            format_price(product.price),
            product.stock,
            product.status,
            product.category_name().unwrap_or("-")
        ));
    }
    out
}

pub fn product(product: &Product) -> String {
    format!(
        "{} (#{})\n  Precio: {}\n  Stock: {}\n  Estado: {}\n  Categoría: {}\n  Imagen: {}\n  Descripción: {}",
        product.name,
        product.id,
        format_price(product.price),
        product.stock,
        product.status,
        product.category_name().unwrap_or("-"),
        product.image_url.as_deref().unwrap_or("-"),
        product.description
    )
}

pub fn categories(categories: &[Category]) -> String {
    let mut out = format!("{:<6} {} {}", "ID", column("NOMBRE"), "DESCRIPCIÓN");
    for category in categories {
        out.push_str(&format!(
            "\n{:<6} {} {}",
            category.id,
            column(&category.name),
            category.description
        ));
    }
    out
}

pub fn users(users: &[&User]) -> String {
    let mut out = format!(
        "{:<6} {} {} {:<14} {}",
        "ID",
        column("NOMBRE"),
        column("EMAIL"),
        "ROL",
        "ACTIVO"
    );
    for user in users {
        out.push_str(&format!(
            "\n{:<6} {} {} {:<14} {}",
            user.id,
            column(&user.name),
            column(&user.email),
            user.role.name,
            if user.is_active { "sí" } else { "no" }
        ));
    }
    out
}

pub fn user(user: &User) -> String {
    format!(
        "{} (#{})\n  Email: {}\n  Rol: {}\n  Activo: {}",
        user.name,
        user.id,
        user.email,
        user.role.name,
        if user.is_active { "sí" } else { "no" }
    )
}

pub fn roles(roles: &[Role]) -> String {
    let mut out = format!("{:<6} {:<16} {}", "ID", "ROL", "PERMISOS");
    for role in roles {
        out.push_str(&format!(
            "\n{:<6} {:<16} {}",
            role.id,
            role.name,
            role.permissions.len()
        ));
    }
    out
}

pub fn role(role: &Role) -> String {
    let mut out = format!("{} (#{})\n  {}", role.name, role.id, role.description);
    for permission in &role.permissions {
        out.push_str(&format!("\n  - {}", permission));
    }
    out
}

pub fn dashboard(summary: &DashboardSummary) -> String {
    format!(
        "Zonas:      {}\nMesas:      {} ({} disponibles)\nProductos:  {} ({} agotados)\nUsuarios:   {} ({} activos)",
        summary.zones,
        summary.tables,
        summary.tables_available,
        summary.products,
        summary.products_out_of_stock,
        summary.users,
        summary.active_users
    )
}
