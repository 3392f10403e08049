//! `limpiar payments` — transaction listing with status and search filters.

use anyhow::Result;
use clap::{Subcommand, ValueEnum};
use limpiar_api::{Payment, PaymentStatus};

use crate::context::AppContext;
use crate::render;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PaymentStatusArg {
    Pending,
    Succeeded,
    Failed,
}

impl From<PaymentStatusArg> for PaymentStatus {
    fn from(arg: PaymentStatusArg) -> Self {
        match arg {
            PaymentStatusArg::Pending => PaymentStatus::Pending,
            PaymentStatusArg::Succeeded => PaymentStatus::Succeeded,
            PaymentStatusArg::Failed => PaymentStatus::Failed,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum PaymentsCommand {
    /// List transactions; omit --status for all of them
    List {
        #[arg(long, value_enum)]
        status: Option<PaymentStatusArg>,
        /// Case-insensitive reference/payer filter, applied client-side
        #[arg(long)]
        search: Option<String>,
    },
}

pub async fn run(ctx: &AppContext, command: PaymentsCommand) -> Result<()> {
    let client = ctx.authenticated_client()?;
    match command {
        PaymentsCommand::List { status, search } => {
            let mut payments = client.list_payments().await?;
            if let Some(status) = status {
                let status: PaymentStatus = status.into();
                payments.retain(|p| p.status == status);
            }
            if let Some(query) = search {
                filter_payments(&mut payments, &query);
            }
            let rows: Vec<Vec<String>> = payments
                .iter()
                .map(|p| {
                    vec![
                        p.reference.clone(),
                        p.payer.full_name.clone(),
                        p.payer.email.clone(),
                        format!("{:.2} {}", p.amount, p.currency.to_uppercase()),
                        render::payment_status(p.status),
                        p.created_at.format("%Y-%m-%d").to_string(),
                    ]
                })
                .collect();
            render::table(
                &["REFERENCE", "PAYER", "EMAIL", "AMOUNT", "STATUS", "DATE"],
                &rows,
            );
        }
    }
    Ok(())
}

fn filter_payments(payments: &mut Vec<Payment>, query: &str) {
    let query = query.to_lowercase();
    payments.retain(|p| {
        p.reference.to_lowercase().contains(&query)
            || p.payer.full_name.to_lowercase().contains(&query)
            || p.payer.email.to_lowercase().contains(&query)
    });
}
