//! Sign-in, sign-out, and who-am-I.

use clap::Args;
use dialoguer::Password;

use crate::output::{self, OutputFormat};
use pharmacy_client::session::LOGIN_SUCCESS;
use pharmacy_core::config::AppConfig;
use pharmacy_core::error::AppError;

/// Arguments for the login command
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Account email
    pub email: String,
}

/// Prompt for a password and sign in
pub async fn login(args: &LoginArgs, config: &AppConfig) -> Result<(), AppError> {
    let password = Password::new()
        .with_prompt("Password")
        .interact()
        .map_err(|e| AppError::internal(format!("Failed to read password: {e}")))?;

    let console = super::resolved_console(config).await?;
    let user = console.session().login(&args.email, &password).await?;

    output::print_success(&format!("Signed in as {} ({})", user.name, user.role));
    Ok(())
}

/// Sign out
pub async fn logout(config: &AppConfig) -> Result<(), AppError> {
    let console = super::resolved_console(config).await?;
    console.session().logout().await;
    output::print_success("Signed out");
    Ok(())
}

/// Show the resolved user
pub async fn whoami(config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let console = super::resolved_console(config).await?;

    if console.session().take_flash().as_deref() == Some(LOGIN_SUCCESS) {
        output::print_success("Welcome back!");
    }

    let Some(user) = console.session().user() else {
        output::print_warning("Not signed in");
        return Ok(());
    };

    match format {
        OutputFormat::Json => output::print_json(&user),
        OutputFormat::Table => {
            output::print_kv("ID", &user.id.to_string());
            output::print_kv("Name", &user.name);
            output::print_kv("Email", &user.email);
            output::print_kv("Role", user.role.as_str());
            let grants: Vec<&str> = user.permissions.iter().collect();
            output::print_kv("Permissions", &grants.join(", "));
        }
    }
    Ok(())
}
