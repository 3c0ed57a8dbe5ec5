use std::path::PathBuf;

use clap::{Parser, Subcommand};

use comandapp_core::models::{Permission, ProductStatus, TableStatus, ZoneStatus};

#[derive(Parser, Debug)]
#[command(name = "comandapp", version, about = "ComandAPP restaurant administration client")]
pub struct Cli {
    /// API base URL, overrides config and COMANDAPP_API_URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Also write logs to a daily file in the cache directory
    #[arg(long, global = true, env = "COMANDAPP_LOG_FILE")]
    pub log_file: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and store the session token
    Login {
        #[arg(long)]
        email: Option<String>,
        #[arg(long, env = "COMANDAPP_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Create an account and sign in with it
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        role_id: Option<i64>,
        #[arg(long, env = "COMANDAPP_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Forget the stored token
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Show what the app would do when navigating to a path
    Route { path: String },
    /// Summary counts for the dashboard
    Dashboard,
    Zones {
        #[command(subcommand)]
        command: ZoneCommand,
    },
    Tables {
        #[command(subcommand)]
        command: TableCommand,
    },
    Products {
        #[command(subcommand)]
        command: ProductCommand,
    },
    Categories {
        #[command(subcommand)]
        command: CategoryCommand,
    },
    Users {
        #[command(subcommand)]
        command: UserCommand,
    },
    Roles {
        #[command(subcommand)]
        command: RoleCommand,
    },
    /// List the permissions a role can be granted
    Permissions,
}

#[derive(Subcommand, Debug)]
pub enum ZoneCommand {
    List,
    Show {
        id: i64,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "active")]
        status: ZoneStatus,
    },
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        status: Option<ZoneStatus>,
    },
    Delete {
        id: i64,
    },
}

#[derive(Subcommand, Debug)]
pub enum TableCommand {
    List {
        /// Only tables in this zone
        #[arg(long)]
        zone: Option<i64>,
    },
    Show {
        id: i64,
    },
    Create {
        #[arg(long)]
        number: String,
        #[arg(long)]
        capacity: u32,
        #[arg(long)]
        zone: Option<i64>,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "available")]
        status: TableStatus,
    },
    Update {
        id: i64,
        #[arg(long)]
        number: Option<String>,
        #[arg(long)]
        capacity: Option<u32>,
        #[arg(long)]
        zone: Option<i64>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        status: Option<TableStatus>,
    },
    Delete {
        id: i64,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProductCommand {
    List {
        /// Only products in this category
        #[arg(long)]
        category: Option<i64>,
        /// Case-insensitive name filter
        #[arg(long)]
        search: Option<String>,
    },
    Show {
        id: i64,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: f64,
        #[arg(long)]
        category: i64,
        #[arg(long, default_value_t = 0)]
        stock: i64,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "active")]
        status: ProductStatus,
        /// Image file to upload
        #[arg(long)]
        image: Option<PathBuf>,
    },
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        category: Option<i64>,
        #[arg(long)]
        stock: Option<i64>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        status: Option<ProductStatus>,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Switch between active and inactive
    Toggle {
        id: i64,
    },
    Delete {
        id: i64,
    },
}

#[derive(Subcommand, Debug)]
pub enum CategoryCommand {
    List,
    Show {
        id: i64,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    Delete {
        id: i64,
    },
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    List {
        /// Match name, email or role
        #[arg(long)]
        search: Option<String>,
    },
    Show {
        id: i64,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        role_id: i64,
        #[arg(long, env = "COMANDAPP_USER_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        role_id: Option<i64>,
        #[arg(long)]
        active: Option<bool>,
        /// Prompt for a new password
        #[arg(long)]
        reset_password: bool,
    },
    /// Deactivate the account (users are never hard-deleted)
    Delete {
        id: i64,
    },
}

#[derive(Subcommand, Debug)]
pub enum RoleCommand {
    List,
    Show {
        id: i64,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Repeatable, e.g. --permission manage-users
        #[arg(long = "permission")]
        permissions: Vec<Permission>,
    },
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Replaces the role's permissions when given
        #[arg(long = "permission")]
        permissions: Vec<Permission>,
    },
    Delete {
        id: i64,
    },
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_wire_enums_from_args() {
        let cli = Cli::try_parse_from([
            "comandapp", "tables", "update", "4", "--status", "bill-pending",
        ])
        .unwrap();
        match cli.command {
            Command::Tables {
                command: TableCommand::Update { id, status, .. },
            } => {
                assert_eq!(id, 4);
                assert_eq!(status, Some(TableStatus::BillPending));
            }
            other => panic!("unexpected command {other:?}"),
        }

        let cli = Cli::try_parse_from([
            "comandapp", "roles", "create", "--name", "CAJA",
            "--permission", "process_payments", "--permission", "VIEW_REPORTS",
        ])
        .unwrap();
        match cli.command {
            Command::Roles {
                command: RoleCommand::Create { permissions, .. },
            } => assert_eq!(
                permissions,
                vec![Permission::ProcessPayments, Permission::ViewReports]
            ),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        assert!(Cli::try_parse_from(["comandapp", "zones", "create", "--name", "X", "--status", "closed"]).is_err());
    }
}
