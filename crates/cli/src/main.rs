//! Tangerine Cart CLI - drives a file-backed cart from the command line.
//!
//! Plays the role the surrounding page plays in a browser: it runs the
//! init hook on every invocation (badge refresh, greeting for a known
//! user), forwards commands to the cart store, and presents the UI
//! events the store emits.
//!
//! # Usage
//!
//! ```bash
//! # Mark the session authenticated (the cart gates mutation on this)
//! tg-cart session login --name Ada
//!
//! # Add items; repeat adds of the same name merge by quantity
//! tg-cart add Burger 5.99
//! tg-cart add Burger 5.99 --image burger.png
//!
//! # Add and simulate the checkout redirect
//! tg-cart order Pizza 9.99
//!
//! # Inspect
//! tg-cart show
//! tg-cart count
//! tg-cart session whoami
//!
//! # Clear the session flag (the cart itself is kept)
//! tg-cart session logout
//! ```
//!
//! # Environment Variables
//!
//! - `TANGERINE_STATE_PATH` - State file path (default: `tangerine-state.json`)
//! - `RUST_LOG` - Tracing filter (default: `info` for Tangerine crates)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

mod commands;
mod config;

use config::CliConfig;

#[derive(Parser)]
#[command(name = "tg-cart")]
#[command(author, version, about = "Tangerine cart command-line front end")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add one unit of a product to the cart
    Add {
        /// Product name (case-sensitive merge key)
        name: String,

        /// Unit price, e.g. 5.99
        price: Decimal,

        /// Optional product image reference
        #[arg(short, long)]
        image: Option<String>,
    },
    /// Add a product and simulate the checkout redirect
    Order {
        /// Product name
        name: String,

        /// Unit price, e.g. 9.99
        price: Decimal,
    },
    /// List the cart contents
    Show,
    /// Print the badge count (sum of quantities)
    Count,
    /// Manage the local session flag
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
}

#[derive(Subcommand)]
enum SessionAction {
    /// Mark the session authenticated
    Login {
        /// Display name used for the greeting
        #[arg(short, long)]
        name: String,

        /// Optional email to record alongside
        #[arg(short, long)]
        email: Option<String>,
    },
    /// Clear the session flag (keeps the cart)
    Logout,
    /// Show the current profile, if any
    Whoami,
}

#[tokio::main]
async fn main() {
    // Initialize tracing; default to info for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tangerine_cart=info,tangerine_cli=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::from_env()?;
    let ctx = commands::Context::new(&config);

    // The page-load hook: badge refresh plus a greeting for known users.
    ctx.store.bootstrap()?;

    match cli.command {
        Commands::Add { name, price, image } => {
            commands::cart::add(&ctx, &name, price, image)?;
        }
        Commands::Order { name, price } => {
            commands::cart::order(&ctx, &name, price).await?;
        }
        Commands::Show => commands::cart::show(&ctx)?,
        Commands::Count => commands::cart::count(&ctx)?,
        Commands::Session { action } => match action {
            SessionAction::Login { name, email } => {
                commands::session::login(&ctx, &name, email)?;
            }
            SessionAction::Logout => commands::session::logout(&ctx)?,
            SessionAction::Whoami => commands::session::whoami(&ctx)?,
        },
    }

    // Remaining auto-dismiss timers are cancelled when the adapter drops.
    ctx.ui.shutdown();
    Ok(())
}
