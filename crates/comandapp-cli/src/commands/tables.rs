//! Dining room: zones (`/mesas/zonas`) and tables (`/mesas`).

use anyhow::Result;

use comandapp_core::models::{TableInput, ZoneInput};
use comandapp_core::routes::Route;
use comandapp_core::utils::cmp_ignore_case;

use crate::cli::{TableCommand, ZoneCommand};
use crate::output;

use super::App;

pub async fn zones(app: &App, command: ZoneCommand) -> Result<()> {
    app.require(Route::Zones)?;
    let api = &app.api;

    match command {
        ZoneCommand::List => {
            let mut zones = api.fetch_zones().await?;
            zones.sort_by(|a, b| cmp_ignore_case(&a.name, &b.name));
            app.out.emit(&zones, |z| output::zones(z))
        }
        ZoneCommand::Show { id } => app.out.emit(&api.fetch_zone(id).await?, output::zone),
        ZoneCommand::Create {
            name,
            description,
            status,
        } => {
            let zone = api
                .create_zone(&ZoneInput {
                    name,
                    description,
                    status,
                })
                .await?;
            app.out.emit(&zone, output::zone)
        }
        ZoneCommand::Update {
            id,
            name,
            description,
            status,
        } => {
            let current = api.fetch_zone(id).await?;
            let input = ZoneInput {
                name: name.unwrap_or(current.name),
                description: description.unwrap_or(current.description),
                status: status.unwrap_or(current.status),
            };
            app.out.emit(&api.update_zone(id, &input).await?, output::zone)
        }
        ZoneCommand::Delete { id } => app.out.message(&api.delete_zone(id).await?),
    }
}

pub async fn tables(app: &App, command: TableCommand) -> Result<()> {
    app.require(Route::Tables)?;
    let api = &app.api;

    match command {
        TableCommand::List { zone } => {
            let tables = match zone {
                Some(zone_id) => api.fetch_tables_in_zone(zone_id).await?,
                None => api.fetch_tables().await?,
            };
            app.out.emit(&tables, |t| output::tables(t))
        }
        TableCommand::Show { id } => app.out.emit(&api.fetch_table(id).await?, output::table),
        TableCommand::Create {
            number,
            capacity,
            zone,
            description,
            status,
        } => {
            let input = TableInput {
                number,
                description,
                capacity,
                status,
                category_id: zone,
            };
            app.out.emit(&api.create_table(&input).await?, output::table)
        }
        TableCommand::Update {
            id,
            number,
            capacity,
            zone,
            description,
            status,
        } => {
            let current = api.fetch_table(id).await?;
            let mut input = TableInput::from(&current);
            if let Some(number) = number {
                input.number = number;
            }
            if let Some(capacity) = capacity {
                input.capacity = capacity;
            }
            if let Some(description) = description {
                input.description = description;
            }
            if let Some(status) = status {
                input.status = status;
            }
            if zone.is_some() {
                input.category_id = zone;
            }
            app.out.emit(&api.update_table(id, &input).await?, output::table)
        }
        TableCommand::Delete { id } => app.out.message(&api.delete_table(id).await?),
    }
}
