//! Panier CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! panier-cli migrate
//!
//! # Seed demo data (suppliers, products, clients, partners)
//! panier-cli seed
//!
//! # Create a partner
//! panier-cli partner create -n "Awa D." -c AWA2026
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Seed database with demo data
//! - `partner create` - Create a referral partner

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "panier-cli")]
#[command(author, version, about = "Panier CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed database with demo data
    Seed,
    /// Manage referral partners
    Partner {
        #[command(subcommand)]
        action: PartnerAction,
    },
}

#[derive(Subcommand)]
enum PartnerAction {
    /// Create a new partner
    Create {
        /// Partner display name
        #[arg(short, long)]
        name: String,

        /// Promo code (uppercased; generated when omitted)
        #[arg(short, long)]
        code: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed => commands::seed::run().await?,
        Commands::Partner { action } => match action {
            PartnerAction::Create { name, code } => {
                commands::partner::create(&name, code.as_deref()).await?;
            }
        },
    }
    Ok(())
}
