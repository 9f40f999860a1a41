//! Guest management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use autoguide_client::api::guests::{self, CreateGuestRequest};
use autoguide_client::router::RouteName;
use autoguide_core::error::AppError;

use crate::output::{self, OutputFormat};

use super::AppContext;

/// Arguments for guest commands
#[derive(Debug, Args)]
pub struct GuestsArgs {
    /// Guest subcommand
    #[command(subcommand)]
    pub command: GuestCommand,
}

/// Guest subcommands
#[derive(Debug, Subcommand)]
pub enum GuestCommand {
    /// List registered guests
    List,
    /// Register a new guest
    Create {
        /// Full display name
        full_name: String,
        /// Contact email
        email: String,
        /// Owning hotel ID
        #[arg(long)]
        hotel: Option<String>,
    },
}

/// Guest display row
#[derive(Debug, Serialize, Tabled)]
struct GuestRow {
    /// ID
    id: String,
    /// Name
    name: String,
    /// Email
    email: String,
    /// Registered
    registered: String,
}

/// Execute guest commands
pub async fn execute(
    args: &GuestsArgs,
    ctx: &AppContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    if !ctx.enter_route(RouteName::Guests) {
        return Ok(());
    }

    match &args.command {
        GuestCommand::List => {
            let items = guests::fetch_guests(&ctx.pipeline).await?;
            let rows: Vec<GuestRow> = items
                .iter()
                .map(|g| GuestRow {
                    id: g.id.chars().take(8).collect(),
                    name: g.full_name.clone(),
                    email: g.email.clone(),
                    registered: g.created_at.format("%Y-%m-%d").to_string(),
                })
                .collect();
            output::print_list(&rows, format);
        }
        GuestCommand::Create {
            full_name,
            email,
            hotel,
        } => {
            let guest = guests::create_guest(
                &ctx.pipeline,
                &CreateGuestRequest {
                    full_name: full_name.clone(),
                    email: email.clone(),
                    hotel_id: hotel.clone(),
                },
            )
            .await?;
            output::print_success(&format!("Created guest {} ({})", guest.full_name, guest.id));
        }
    }
    Ok(())
}
