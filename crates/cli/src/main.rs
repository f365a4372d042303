//! Crew Lounge CLI - sign in and browse the crew marketplace from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Sign in (the token is kept in CREW_LOUNGE_TOKEN_FILE)
//! crew-cli login -e pilot@example.com -p hunter22
//!
//! # Create a host account (starts out pending approval)
//! crew-cli register -n "Sam Pilot" -e sam@example.com -p hunter22 -r host --airline Delta
//!
//! # Who am I, and what may I do?
//! crew-cli whoami
//!
//! # Browse
//! crew-cli properties --category crashpad
//! crew-cli layovers --city London
//! crew-cli gigs --airport ATL
//!
//! # Messages
//! crew-cli conversations
//! crew-cli send -t 64f0c2 -m "Is the crashpad free next week?"
//!
//! crew-cli logout
//! ```
//!
//! # Environment Variables
//!
//! - `CREW_LOUNGE_API_URL` and friends - see `ClientConfig::from_env`
//! - `CREW_LOUNGE_LOG_JSON` - emit JSON logs instead of text
//! - `SENTRY_DSN` - report warnings and errors to Sentry
//! - `RUST_LOG` - log filter (default `crew_lounge=info`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use crew_lounge_core::{PropertyCategory, UserRole};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;

#[derive(Parser)]
#[command(name = "crew-cli")]
#[command(author, version, about = "Crew Lounge command-line client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the token
    Login {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long, env = "CREW_LOUNGE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account (new accounts await admin approval)
    Register {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long, env = "CREW_LOUNGE_PASSWORD", hide_env_values = true)]
        password: String,

        /// Account role (`user`, `host`, `employer`)
        #[arg(short, long)]
        role: Option<UserRole>,

        /// Airline you fly for
        #[arg(long)]
        airline: Option<String>,

        /// Crew position, e.g. "First Officer"
        #[arg(long)]
        position: Option<String>,
    },
    /// Sign out and forget the stored token
    Logout,
    /// Show the signed-in member and their permissions
    Whoami,
    /// List crashpads and vacation rentals
    Properties {
        /// Only this category (`crashpad`, `vacation`)
        #[arg(long)]
        category: Option<PropertyCategory>,
    },
    /// List layover city guides
    Layovers {
        /// Only guides for this city
        #[arg(long)]
        city: Option<String>,
    },
    /// List gigs
    Gigs {
        /// Only gigs at this airport (IATA code)
        #[arg(long)]
        airport: Option<String>,
    },
    /// Show your conversations
    Conversations,
    /// Send a message to another member
    Send {
        /// Receiving member's id
        #[arg(short, long)]
        to: String,

        /// Message text
        #[arg(short, long)]
        message: String,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry() -> Option<sentry::ClientInitGuard> {
    let dsn = std::env::var("SENTRY_DSN").ok().filter(|v| !v.trim().is_empty())?;

    let guard = sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "crew_lounge=info".into());

    let json = std::env::var("CREW_LOUNGE_LOG_JSON").is_ok();
    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() {
    // Load .env before reading SENTRY_DSN / RUST_LOG
    let _ = dotenvy::dotenv();

    let _sentry_guard = init_sentry();
    init_tracing();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    let session = commands::connect().await?;

    match cli.command {
        Commands::Login { email, password } => {
            commands::auth::login(&session, &email, password).await?;
        }
        Commands::Register {
            name,
            email,
            password,
            role,
            airline,
            position,
        } => {
            let profile = commands::auth::NewAccount {
                name,
                email,
                password,
                role,
                airline,
                position,
            };
            commands::auth::register(&session, profile).await?;
        }
        Commands::Logout => commands::auth::logout(&session).await,
        Commands::Whoami => commands::auth::whoami(&session),
        Commands::Properties { category } => {
            commands::browse::properties(&session, category).await?;
        }
        Commands::Layovers { city } => commands::browse::layovers(&session, city).await?,
        Commands::Gigs { airport } => commands::browse::gigs(&session, airport).await?,
        Commands::Conversations => commands::messages::conversations(&session).await?,
        Commands::Send { to, message } => commands::messages::send(&session, &to, message).await?,
    }
    Ok(())
}
