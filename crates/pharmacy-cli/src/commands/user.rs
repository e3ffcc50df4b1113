//! Account management CLI commands.
//!
//! These talk to the database directly and act as an unrestricted
//! operator, so they work before any admin account exists.

use clap::{Args, Subcommand};
use dialoguer::Password;
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use crate::output::{self, OutputFormat};
use pharmacy_auth::AccountService;
use pharmacy_auth::accounts::NewAccount;
use pharmacy_core::config::AppConfig;
use pharmacy_core::error::AppError;
use pharmacy_database::{UserStore, open_user_store};
use pharmacy_entity::permission::PermissionSet;
use pharmacy_entity::user::{User, UserProfile, UserRole};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// List all users
    List {
        /// Filter by role
        #[arg(short, long)]
        role: Option<UserRole>,
    },
    /// Create a user (prompts for the password)
    Create {
        /// Email
        email: String,
        /// Display name
        #[arg(short, long)]
        name: String,
        /// Role
        #[arg(short, long, default_value = "staff")]
        role: UserRole,
        /// Explicit grants, comma separated; role defaults when omitted
        #[arg(short, long, value_delimiter = ',')]
        permissions: Option<Vec<String>>,
    },
    /// Add a capability to a user
    Grant {
        /// Email
        email: String,
        /// Capability, e.g. write_products
        capability: String,
    },
    /// Remove a capability from a user
    Revoke {
        /// Email
        email: String,
        /// Capability
        capability: String,
    },
    /// Deactivate a user
    Disable {
        /// Email
        email: String,
    },
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    /// User ID
    id: String,
    /// Name
    name: String,
    /// Email
    email: String,
    /// Role
    role: String,
    /// Status
    status: String,
    /// Grants
    permissions: String,
    /// Last login
    last_login: String,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.to_string(),
            name: u.name.clone(),
            email: u.email.clone(),
            role: u.role.to_string(),
            status: u.status.to_string(),
            permissions: u.permissions.join(","),
            last_login: u
                .last_login_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// The identity DB-direct commands act as.
fn operator() -> UserProfile {
    UserProfile {
        id: Uuid::nil(),
        name: "cli".to_string(),
        email: "cli@localhost".to_string(),
        role: UserRole::Admin,
        permissions: PermissionSet::new(),
    }
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let store = open_user_store(&config.database).await?;
    let accounts = AccountService::new(store.clone(), &config.auth);
    let actor = operator();

    let find = |email: &str| {
        let store = store.clone();
        let email = email.to_string();
        async move {
            store
                .find_by_email(&email)
                .await?
                .ok_or_else(|| AppError::not_found(format!("User '{email}' not found")))
        }
    };

    match &args.command {
        UserCommand::List { role } => {
            let users = accounts.list(*role).await?;
            let rows: Vec<UserRow> = users.iter().map(UserRow::from).collect();
            output::print_list(&rows, format);
        }
        UserCommand::Create {
            email,
            name,
            role,
            permissions,
        } => {
            let password = Password::new()
                .with_prompt("Password")
                .with_confirmation("Confirm password", "Passwords do not match")
                .interact()
                .map_err(|e| AppError::internal(format!("Failed to read password: {e}")))?;

            let user = accounts
                .create(
                    &actor,
                    NewAccount {
                        name: name.clone(),
                        email: email.clone(),
                        password,
                        role: *role,
                        permissions: permissions
                            .as_ref()
                            .map(|p| p.iter().map(|c| c.trim().to_string()).collect()),
                    },
                )
                .await?;
            output::print_success(&format!("User '{}' created with ID {}", user.email, user.id));
        }
        UserCommand::Grant { email, capability } => {
            let user = find(email).await?;
            accounts.grant(&actor, user.id, capability).await?;
            output::print_success(&format!("Granted {capability} to '{email}'"));
        }
        UserCommand::Revoke { email, capability } => {
            let user = find(email).await?;
            accounts.revoke(&actor, user.id, capability).await?;
            output::print_success(&format!("Revoked {capability} from '{email}'"));
        }
        UserCommand::Disable { email } => {
            let user = find(email).await?;
            accounts.deactivate(&actor, user.id).await?;
            output::print_success(&format!("User '{email}' disabled"));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(subcommand)]
        command: UserCommand,
    }

    #[test]
    fn test_create_parses_role_and_permission_list() {
        let parsed = Harness::parse_from([
            "pharmacy",
            "create",
            "sam@pharmacy.local",
            "--name",
            "Sam",
            "--role",
            "pharmacist",
            "--permissions",
            "read_products,write_orders",
        ]);

        let UserCommand::Create {
            role, permissions, ..
        } = parsed.command
        else {
            panic!("expected create");
        };
        assert_eq!(role, UserRole::Pharmacist);
        assert_eq!(
            permissions,
            Some(vec!["read_products".to_string(), "write_orders".to_string()])
        );
    }

    #[test]
    fn test_operator_is_admin() {
        assert!(operator().role.is_admin());
    }
}
