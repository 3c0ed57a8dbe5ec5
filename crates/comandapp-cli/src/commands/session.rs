use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use serde_json::{json, Value};
use tracing::{info, warn};

use comandapp_core::auth::{LoginCredentials, RegisterUserData};
use comandapp_core::routes::{navigate, Navigation};

use super::App;

fn prompt_line(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn prompt_password(label: &str) -> Result<String> {
    rpassword::prompt_password(format!("{}: ", label)).context("Failed to read password")
}

fn password_or_prompt(password: Option<String>) -> Result<String> {
    match password {
        Some(password) if !password.is_empty() => Ok(password),
        _ => prompt_password("Contraseña"),
    }
}

pub async fn login(mut app: App, email: Option<String>, password: Option<String>) -> Result<()> {
    let email = match email.or_else(|| app.config.last_email.clone()) {
        Some(email) => email,
        None => prompt_line("Email")?,
    };
    if email.is_empty() {
        bail!("Email is required");
    }
    let password = password_or_prompt(password)?;

    app.auth
        .try_login(LoginCredentials::new(email.clone(), password))
        .await
        .context("Login failed")?;
    info!(%email, "Signed in");

    app.config.last_email = Some(email);
    if let Err(e) = app.config.save() {
        warn!(error = %e, "Failed to save config");
    }

    match app.auth.user() {
        Some(user) => println!("Sesión iniciada como {} ({})", user.name, user.role.name),
        None => println!("Sesión iniciada"),
    }
    Ok(())
}

pub async fn register(
    app: &App,
    email: String,
    name: Option<String>,
    role_id: Option<i64>,
    password: Option<String>,
) -> Result<()> {
    let password = match password {
        Some(password) if !password.is_empty() => password,
        _ => {
            let first = prompt_password("Contraseña")?;
            let second = prompt_password("Repite la contraseña")?;
            if first != second {
                bail!("Passwords do not match");
            }
            first
        }
    };

    let mut data = RegisterUserData::new(email, password);
    if let Some(name) = name {
        data = data.with_name(name);
    }
    if let Some(role_id) = role_id {
        data.extra.insert("roleId".to_string(), Value::from(role_id));
    }

    app.auth.try_register(data).await.context("Registration failed")?;
    println!("Cuenta creada, sesión iniciada");
    Ok(())
}

pub fn logout(app: &App) -> Result<()> {
    app.auth.logout();
    println!("Sesión cerrada");
    Ok(())
}

pub fn whoami(app: &App) -> Result<()> {
    let snapshot = app.auth.snapshot();
    if !snapshot.is_authenticated {
        bail!("Not signed in. Run `comandapp login`");
    }
    let Some(user) = snapshot.user else {
        bail!("The stored token could not be decoded");
    };

    app.out.emit(&user, |user| {
        let mut text = format!(
            "{} <{}>\n  Id: {}\n  Rol: {}",
            user.name, user.email, user.id, user.role.name
        );
        if let Some(issued) = user.issued_at() {
            text.push_str(&format!("\n  Emitido: {}", issued));
        }
        if let Some(expires) = user.expires_at() {
            let note = if user.is_expired() { " (expirado)" } else { "" };
            text.push_str(&format!("\n  Expira: {}{}", expires, note));
        }
        text
    })
}

pub fn route(app: &App, path: &str) -> Result<()> {
    let navigation = navigate(path, &app.auth);
    let value = match &navigation {
        Navigation::Render(route) => json!({"path": route.path(), "outcome": "render", "title": route.title()}),
        Navigation::Loading(route) => json!({"path": route.path(), "outcome": "loading"}),
        Navigation::Redirect { from, redirect } => json!({
            "path": from.path(),
            "outcome": "redirect",
            "to": redirect.to,
            "replace": redirect.replace,
        }),
        Navigation::NotFound(path) => json!({"path": path, "outcome": "not_found"}),
    };

    app.out.emit(&value, |_| match &navigation {
        Navigation::Render(route) => format!("{} -> {}", route.path(), route.title()),
        Navigation::Loading(route) => format!("{} -> cargando...", route.path()),
        Navigation::Redirect { from, redirect } => format!("{} -> redirect {}", from.path(), redirect.to),
        Navigation::NotFound(path) => format!("{} -> no encontrado", path),
    })
}
