//! Room management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use autoguide_client::api::rooms::{self, CreateRoomRequest};
use autoguide_client::router::RouteName;
use autoguide_core::error::AppError;

use crate::output::{self, OutputFormat};

use super::AppContext;

/// Arguments for room commands
#[derive(Debug, Args)]
pub struct RoomsArgs {
    /// Room subcommand
    #[command(subcommand)]
    pub command: RoomCommand,
}

/// Room subcommands
#[derive(Debug, Subcommand)]
pub enum RoomCommand {
    /// List rooms
    List,
    /// Create a room
    Create {
        /// Room number
        number: String,
        /// Room type (e.g., "double")
        room_type: String,
        /// Nightly rate
        rate: f64,
        /// Owning hotel ID
        #[arg(long)]
        hotel: Option<String>,
    },
    /// Delete a room
    Delete {
        /// Room ID
        id: String,
    },
}

/// Room display row
#[derive(Debug, Serialize, Tabled)]
struct RoomRow {
    /// ID
    id: String,
    /// Number
    number: String,
    /// Type
    room_type: String,
    /// Rate
    rate: String,
}

/// Execute room commands
pub async fn execute(
    args: &RoomsArgs,
    ctx: &AppContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    if !ctx.enter_route(RouteName::Rooms) {
        return Ok(());
    }

    match &args.command {
        RoomCommand::List => {
            let items = rooms::fetch_rooms(&ctx.pipeline).await?;
            let rows: Vec<RoomRow> = items
                .iter()
                .map(|r| RoomRow {
                    id: r.id.chars().take(8).collect(),
                    number: r.room_number.clone(),
                    room_type: r.room_type.clone(),
                    rate: format!("{:.2}", r.nightly_rate),
                })
                .collect();
            output::print_list(&rows, format);
        }
        RoomCommand::Create {
            number,
            room_type,
            rate,
            hotel,
        } => {
            let room = rooms::create_room(
                &ctx.pipeline,
                &CreateRoomRequest {
                    room_number: number.clone(),
                    room_type: room_type.clone(),
                    nightly_rate: *rate,
                    image_url: None,
                    short_description: None,
                    hotel_id: hotel.clone(),
                },
            )
            .await?;
            output::print_success(&format!("Created room {} ({})", room.room_number, room.id));
        }
        RoomCommand::Delete { id } => {
            rooms::delete_room(&ctx.pipeline, id).await?;
            output::print_success(&format!("Deleted room {id}"));
        }
    }
    Ok(())
}
