//! Session commands: login, logout, whoami, registration URL.

use chrono::{DateTime, Utc};
use clap::Args;
use dialoguer::{Input, Password};

use autoguide_auth::access::Permissions;
use autoguide_client::identity::keycloak::RegistrationOptions;
use autoguide_core::error::AppError;
use autoguide_core::traits::identity::Credentials;

use crate::output::{self, OutputFormat};

use super::AppContext;

/// Arguments for the login command
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Username (prompted when omitted)
    #[arg(short, long)]
    pub username: Option<String>,
}

/// Arguments for the register command
#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// Origin the browser returns to after registration
    #[arg(long, default_value = "http://localhost:5173")]
    pub origin: String,

    /// Destination to return to after login
    #[arg(long)]
    pub next: Option<String>,

    /// Pre-filled username/email hint
    #[arg(long)]
    pub login_hint: Option<String>,
}

/// Prompt for credentials and establish a session.
pub async fn login(args: &LoginArgs, ctx: &AppContext) -> Result<(), AppError> {
    let username = match &args.username {
        Some(username) => username.clone(),
        None => Input::<String>::new()
            .with_prompt("Username")
            .interact_text()
            .map_err(|e| AppError::internal(format!("Prompt failed: {e}")))?,
    };
    let password = Password::new()
        .with_prompt("Password")
        .interact()
        .map_err(|e| AppError::internal(format!("Prompt failed: {e}")))?;

    ctx.session
        .login(&Credentials { username, password })
        .await?;

    let roles = ctx.session.roles();
    output::print_success(&format!(
        "Logged in as {} [{}]",
        ctx.session.username(),
        roles.join(", ")
    ));
    Ok(())
}

/// Clear the stored session.
pub fn logout(ctx: &AppContext) -> Result<(), AppError> {
    ctx.session.logout();
    output::print_success("Session cleared");
    Ok(())
}

/// Show the current session and derived permissions.
pub fn whoami(ctx: &AppContext, format: OutputFormat) -> Result<(), AppError> {
    if !ctx.session.has_token() {
        output::print_warning("No active session.");
        return Ok(());
    }

    let session = ctx.session.session();
    let roles = session.roles();
    let permissions = Permissions::from_roles(&roles);

    if format == OutputFormat::Json {
        let json = serde_json::json!({
            "username": session.username,
            "roles": roles,
            "expiresAt": session.expires_at_ms(),
            "permissions": permissions,
        });
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    output::print_kv("Username", &session.username);
    output::print_kv("Roles", &roles.join(", "));
    output::print_kv("Expires", &format_expiry(session.expires_at_ms()));
    output::print_kv("Manage guests", yes_no(permissions.manage_guests));
    output::print_kv("Manage rooms", yes_no(permissions.manage_rooms));
    output::print_kv("Manage hotels", yes_no(permissions.manage_hotels));
    Ok(())
}

/// Print the hosted Keycloak registration URL.
pub fn register(args: &RegisterArgs, ctx: &AppContext) -> Result<(), AppError> {
    let url = ctx.keycloak.registration_url(
        &args.origin,
        &RegistrationOptions {
            next: args.next.clone(),
            login_hint: args.login_hint.clone(),
        },
    );
    println!("{url}");
    Ok(())
}

fn format_expiry(expires_at_ms: i64) -> String {
    if expires_at_ms == 0 {
        return "never".to_string();
    }
    DateTime::<Utc>::from_timestamp_millis(expires_at_ms)
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| expires_at_ms.to_string())
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
