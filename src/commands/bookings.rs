//! Booking workflow CLI commands.

use chrono::NaiveDate;
use clap::{Args, Subcommand, ValueEnum};
use serde::Serialize;
use tabled::Tabled;

use autoguide_client::api::bookings::{self, BookingStatus, CreateBookingRequest};
use autoguide_client::router::RouteName;
use autoguide_core::error::AppError;

use crate::output::{self, OutputFormat};

use super::AppContext;

/// Arguments for booking commands
#[derive(Debug, Args)]
pub struct BookingsArgs {
    /// Booking subcommand
    #[command(subcommand)]
    pub command: BookingCommand,
}

/// Status filter for listings
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusFilter {
    Created,
    Confirmed,
    Cancelled,
}

impl From<StatusFilter> for BookingStatus {
    fn from(filter: StatusFilter) -> Self {
        match filter {
            StatusFilter::Created => Self::Created,
            StatusFilter::Confirmed => Self::Confirmed,
            StatusFilter::Cancelled => Self::Cancelled,
        }
    }
}

/// Booking subcommands
#[derive(Debug, Subcommand)]
pub enum BookingCommand {
    /// List bookings
    List {
        /// Only show bookings with this status
        #[arg(long, value_enum)]
        status: Option<StatusFilter>,
        /// Only show bookings created by the current user
        #[arg(long)]
        mine: bool,
    },
    /// Show one booking with its recommendations
    Show {
        /// Booking ID
        id: String,
    },
    /// Create a booking
    Create {
        /// Guest ID
        guest: String,
        /// Room ID
        room: String,
        /// Check-in date (YYYY-MM-DD)
        check_in: NaiveDate,
        /// Check-out date (YYYY-MM-DD)
        check_out: NaiveDate,
    },
    /// Confirm a booking
    Confirm {
        /// Booking ID
        id: String,
    },
    /// Cancel a booking
    Cancel {
        /// Booking ID
        id: String,
    },
}

/// Booking display row
#[derive(Debug, Serialize, Tabled)]
struct BookingRow {
    /// ID
    id: String,
    /// Guest
    guest: String,
    /// Room
    room: String,
    /// Check-in
    check_in: String,
    /// Check-out
    check_out: String,
    /// Status
    status: String,
}

fn row(b: &bookings::Booking) -> BookingRow {
    BookingRow {
        id: b.id.chars().take(8).collect(),
        guest: b.guest_full_name.clone(),
        room: b.room_number.clone(),
        check_in: b.check_in_date.to_string(),
        check_out: b.check_out_date.to_string(),
        status: b.status.as_str().to_string(),
    }
}

/// Execute booking commands
pub async fn execute(
    args: &BookingsArgs,
    ctx: &AppContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    if !ctx.enter_route(RouteName::Bookings) {
        return Ok(());
    }

    match &args.command {
        BookingCommand::List { status, mine } => {
            let status = status.map(BookingStatus::from);
            let items = if *mine {
                bookings::fetch_my_bookings(&ctx.pipeline, status).await?
            } else {
                bookings::fetch_bookings(&ctx.pipeline, status).await?
            };
            let rows: Vec<BookingRow> = items.iter().map(row).collect();
            output::print_list(&rows, format);
        }
        BookingCommand::Show { id } => {
            let booking = bookings::fetch_booking_by_id(&ctx.pipeline, id).await?;
            output::print_list(&[row(&booking)], format);

            let recommendations =
                bookings::fetch_booking_recommendations(&ctx.pipeline, &booking.id).await?;
            for rec in &recommendations {
                println!("  • {} ({:.0}%)", rec.suggestion, rec.confidence * 100.0);
            }
        }
        BookingCommand::Create {
            guest,
            room,
            check_in,
            check_out,
        } => {
            let booking = bookings::create_booking(
                &ctx.pipeline,
                &CreateBookingRequest {
                    guest_id: guest.clone(),
                    room_id: room.clone(),
                    check_in_date: *check_in,
                    check_out_date: *check_out,
                },
            )
            .await?;
            output::print_success(&format!("Created booking {}", booking.id));
        }
        BookingCommand::Confirm { id } => {
            let booking =
                bookings::update_booking_status(&ctx.pipeline, id, BookingStatus::Confirmed)
                    .await?;
            output::print_success(&format!("Booking {} confirmed", booking.id));
        }
        BookingCommand::Cancel { id } => {
            let booking =
                bookings::update_booking_status(&ctx.pipeline, id, BookingStatus::Cancelled)
                    .await?;
            output::print_success(&format!("Booking {} cancelled", booking.id));
        }
    }
    Ok(())
}
