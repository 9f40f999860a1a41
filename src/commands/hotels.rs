//! Hotel management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use autoguide_client::api::hotels::{self, HotelPayload};
use autoguide_client::router::RouteName;
use autoguide_core::error::AppError;

use crate::output::{self, OutputFormat};

use super::AppContext;

/// Arguments for hotel commands
#[derive(Debug, Args)]
pub struct HotelsArgs {
    /// Hotel subcommand
    #[command(subcommand)]
    pub command: HotelCommand,
}

/// Hotel subcommands
#[derive(Debug, Subcommand)]
pub enum HotelCommand {
    /// List hotels
    List,
    /// Create a hotel
    Create {
        /// Short unique code
        code: String,
        /// Display name
        name: String,
        /// City
        city: String,
        /// Country
        country: String,
        /// Street address
        address: String,
        /// Cover image URL
        #[arg(long)]
        image_url: Option<String>,
    },
    /// Delete a hotel
    Delete {
        /// Hotel ID
        id: String,
    },
}

/// Hotel display row
#[derive(Debug, Serialize, Tabled)]
struct HotelRow {
    /// ID
    id: String,
    /// Code
    code: String,
    /// Name
    name: String,
    /// City
    city: String,
    /// Country
    country: String,
}

/// Execute hotel commands
pub async fn execute(
    args: &HotelsArgs,
    ctx: &AppContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    if !ctx.enter_route(RouteName::Hotels) {
        return Ok(());
    }

    match &args.command {
        HotelCommand::List => {
            let items = hotels::fetch_hotels(&ctx.pipeline).await?;
            let rows: Vec<HotelRow> = items
                .iter()
                .map(|h| HotelRow {
                    id: h.id.chars().take(8).collect(),
                    code: h.code.clone(),
                    name: h.name.clone(),
                    city: h.city.clone(),
                    country: h.country.clone(),
                })
                .collect();
            output::print_list(&rows, format);
        }
        HotelCommand::Create {
            code,
            name,
            city,
            country,
            address,
            image_url,
        } => {
            let hotel = hotels::create_hotel(
                &ctx.pipeline,
                &HotelPayload {
                    code: code.clone(),
                    name: name.clone(),
                    city: city.clone(),
                    country: country.clone(),
                    address_line: address.clone(),
                    image_url: image_url.clone(),
                },
            )
            .await?;
            output::print_success(&format!("Created hotel {} ({})", hotel.name, hotel.id));
        }
        HotelCommand::Delete { id } => {
            hotels::delete_hotel(&ctx.pipeline, id).await?;
            output::print_success(&format!("Deleted hotel {id}"));
        }
    }
    Ok(())
}
