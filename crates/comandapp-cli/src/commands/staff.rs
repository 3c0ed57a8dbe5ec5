//! Staff: users (`/usuarios`), roles and permissions (`/usuarios/roles`).

use anyhow::{bail, Context, Result};

use comandapp_core::models::{Permission, RoleInput, UserInput, UserUpdate};
use comandapp_core::routes::Route;
use comandapp_core::utils::filter_users;

use crate::cli::{RoleCommand, UserCommand};
use crate::output;

use super::App;

fn new_password(password: Option<String>) -> Result<String> {
    if let Some(password) = password.filter(|p| !p.is_empty()) {
        return Ok(password);
    }
    let first = rpassword::prompt_password("Contraseña nueva: ").context("Failed to read password")?;
    let second =
        rpassword::prompt_password("Repite la contraseña: ").context("Failed to read password")?;
    if first != second {
        bail!("Passwords do not match");
    }
    Ok(first)
}

pub async fn users(app: &App, command: UserCommand) -> Result<()> {
    app.require(Route::Users)?;
    let api = &app.api;

    match command {
        UserCommand::List { search } => {
            let users = api.fetch_users().await?;
            let shown = filter_users(&users, search.as_deref().unwrap_or_default());
            app.out.emit(&shown, |u| output::users(u))
        }
        UserCommand::Show { id } => app.out.emit(&api.fetch_user(id).await?, output::user),
        UserCommand::Create {
            name,
            email,
            role_id,
            password,
        } => {
            let input = UserInput {
                name,
                email,
                password: new_password(password)?,
                role_id,
            };
            let created = api.create_user(&input).await?;
            app.out.emit(&created, |m| format!("{}\n{}", m.message, output::user(&m.user)))
        }
        UserCommand::Update {
            id,
            name,
            email,
            role_id,
            active,
            reset_password,
        } => {
            let update = UserUpdate {
                name,
                email,
                password: if reset_password {
                    Some(new_password(None)?)
                } else {
                    None
                },
                role_id,
                is_active: active,
            };
            if update.is_empty() {
                bail!("Nothing to update");
            }
            let updated = api.update_user(id, &update).await?;
            app.out.emit(&updated, |m| format!("{}\n{}", m.message, output::user(&m.user)))
        }
        UserCommand::Delete { id } => app.out.message(&api.deactivate_user(id).await?),
    }
}

pub async fn roles(app: &App, command: RoleCommand) -> Result<()> {
    app.require(Route::Roles)?;
    let api = &app.api;

    match command {
        RoleCommand::List => app.out.emit(&api.fetch_roles().await?, |r| output::roles(r)),
        RoleCommand::Show { id } => app.out.emit(&api.fetch_role(id).await?, output::role),
        RoleCommand::Create {
            name,
            description,
            permissions,
        } => {
            let created = api
                .create_role(&RoleInput {
                    name,
                    description,
                    permissions,
                })
                .await?;
            app.out.emit(&created, |m| format!("{}\n{}", m.message, output::role(&m.role)))
        }
        RoleCommand::Update {
            id,
            name,
            description,
            permissions,
        } => {
            let current = api.fetch_role(id).await?;
            let input = RoleInput {
                name: name.unwrap_or(current.name),
                description: description.unwrap_or(current.description),
                permissions: if permissions.is_empty() {
                    current.permissions
                } else {
                    permissions
                },
            };
            let updated = api.update_role(id, &input).await?;
            app.out.emit(&updated, |m| format!("{}\n{}", m.message, output::role(&m.role)))
        }
        RoleCommand::Delete { id } => app.out.message(&api.delete_role(id).await?),
    }
}

pub async fn permissions(app: &App) -> Result<()> {
    app.require(Route::Roles)?;
    let permissions: Vec<Permission> = app.api.fetch_permissions().await?;
    app.out.emit(&permissions, |list| {
        list.iter()
            .map(Permission::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    })
}
