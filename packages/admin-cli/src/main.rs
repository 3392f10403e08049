//! `limpiar` — terminal admin dashboard for the Limpiar platform.
//!
//! Sign in with email + password, verify the phone OTP, then manage users,
//! properties, bookings and payments against the hosted backend.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod context;
mod otp;
mod render;

use context::AppContext;

#[derive(Parser)]
#[command(name = "limpiar", version, about = "Limpiar admin dashboard")]
struct Cli {
    /// Backend API origin (defaults to the hosted backend)
    #[arg(long, env = "LIMPIAR_API_URL", global = true)]
    api_url: Option<String>,

    /// Session state file (defaults to the platform config dir)
    #[arg(long, global = true)]
    state_file: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in with email and password, then verify the OTP
    Login,
    /// Create an account through the onboarding wizard
    Register,
    /// Request or complete a password reset
    ResetPassword {
        /// Reset token from the email; omit to request one
        #[arg(long)]
        token: Option<String>,
    },
    /// Clear the stored session (best-effort server notify)
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Manage user accounts
    Users {
        #[command(subcommand)]
        command: commands::users::UsersCommand,
    },
    /// Manage properties
    Properties {
        #[command(subcommand)]
        command: commands::properties::PropertiesCommand,
    },
    /// Inspect bookings
    Bookings {
        #[command(subcommand)]
        command: commands::bookings::BookingsCommand,
    },
    /// Inspect payment transactions
    Payments {
        #[command(subcommand)]
        command: commands::payments::PaymentsCommand,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,limpiar_api=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        // Server-reported failures surface in the server's own words; the
        // operator can always retry the action.
        let message = match err.downcast_ref::<limpiar_api::ApiError>() {
            Some(api) => api.user_message(),
            None => format!("{err:#}"),
        };
        eprintln!("{}", console::style(format!("✗ {message}")).red());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut ctx = AppContext::new(cli.api_url, cli.state_file)?;
    match cli.command {
        Command::Login => commands::auth::login(&mut ctx).await,
        Command::Register => commands::auth::register(&mut ctx).await,
        Command::ResetPassword { token } => commands::auth::reset_password(&ctx, token).await,
        Command::Logout => commands::auth::logout(&mut ctx).await,
        Command::Whoami => commands::auth::whoami(&ctx).await,
        Command::Users { command } => commands::users::run(&ctx, command).await,
        Command::Properties { command } => commands::properties::run(&ctx, command).await,
        Command::Bookings { command } => commands::bookings::run(&ctx, command).await,
        Command::Payments { command } => commands::payments::run(&ctx, command).await,
    }
}
