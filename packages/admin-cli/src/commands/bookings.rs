//! `limpiar bookings` — read-only booking listing.

use anyhow::Result;
use clap::{Subcommand, ValueEnum};
use limpiar_api::BookingStatus;

use crate::context::AppContext;
use crate::render;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum BookingStatusArg {
    Pending,
    OnHold,
    Completed,
    Failed,
    Refund,
    NotStarted,
}

impl From<BookingStatusArg> for BookingStatus {
    fn from(arg: BookingStatusArg) -> Self {
        match arg {
            BookingStatusArg::Pending => BookingStatus::Pending,
            BookingStatusArg::OnHold => BookingStatus::OnHold,
            BookingStatusArg::Completed => BookingStatus::Completed,
            BookingStatusArg::Failed => BookingStatus::Failed,
            BookingStatusArg::Refund => BookingStatus::Refund,
            BookingStatusArg::NotStarted => BookingStatus::NotStarted,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum BookingsCommand {
    /// List bookings; omit --status for all of them
    List {
        #[arg(long, value_enum)]
        status: Option<BookingStatusArg>,
    },
}

pub async fn run(ctx: &AppContext, command: BookingsCommand) -> Result<()> {
    let client = ctx.authenticated_client()?;
    match command {
        BookingsCommand::List { status } => {
            let mut bookings = client.list_bookings().await?;
            if let Some(status) = status {
                let status: BookingStatus = status.into();
                bookings.retain(|b| b.status == status);
            }
            let rows: Vec<Vec<String>> = bookings
                .iter()
                .map(|b| {
                    vec![
                        b.property.clone(),
                        b.cleaning_business.clone().unwrap_or_else(|| "—".into()),
                        b.service.clone(),
                        b.amount.clone(),
                        format!("{} {}", b.date, b.time),
                        render::booking_status(b.status),
                    ]
                })
                .collect();
            render::table(
                &["PROPERTY", "BUSINESS", "SERVICE", "AMOUNT", "WHEN", "STATUS"],
                &rows,
            );
        }
    }
    Ok(())
}
