//! Storefront CLI - inspect and edit the local cart and wishlist.
//!
//! Commands:
//! - `storefront cart` - List, add, remove, set quantities, clear, total
//! - `storefront wishlist` - List, toggle, add, remove
//! - `storefront checkout` - Build the order number and WhatsApp handoff
//! - `storefront image` - Resolve a product image locator
//! - `storefront config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use storefront_commerce::Currency;
use tracing_subscriber::EnvFilter;

use commands::{CartArgs, CheckoutArgs, ConfigArgs, ImageArgs, WishlistArgs};

/// Storefront CLI - manage the visitor's cart and wishlist from a shell
#[derive(Parser)]
#[command(name = "storefront")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Directory holding the cart and wishlist files
    #[arg(short, long, global = true)]
    data_dir: Option<String>,

    /// Currency code for totals and checkout (overrides the config file)
    #[arg(long, global = true, value_parser = parse_currency)]
    currency: Option<Currency>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Work with the cart
    Cart(CartArgs),

    /// Work with the wishlist
    Wishlist(WishlistArgs),

    /// Prepare the checkout handoff for the current cart
    Checkout(CheckoutArgs),

    /// Resolve a product image locator to a URL
    Image(ImageArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    let mut ctx =
        context::Context::load(cli.config.as_deref(), cli.data_dir.as_deref(), output)?;
    if let Some(currency) = cli.currency {
        ctx.config.store.currency = currency;
    }

    let result = match cli.command {
        Commands::Cart(args) => commands::cart::run(args, &ctx),
        Commands::Wishlist(args) => commands::wishlist::run(args, &ctx),
        Commands::Checkout(args) => commands::checkout::run(args, &ctx),
        Commands::Image(args) => commands::image::run(args, &ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

fn parse_currency(code: &str) -> Result<Currency, String> {
    Currency::from_code(code).ok_or_else(|| format!("unknown currency code: {}", code))
}

/// Log to stderr. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
