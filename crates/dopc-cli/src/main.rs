mod quote;
mod venue;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "dopc")]
#[command(about = "Delivery order price calculator")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Price an order for delivery from a venue
    Quote {
        /// Venue slug (e.g., home-assignment-venue-helsinki)
        #[arg(long, conflicts_with = "request")]
        venue: Option<String>,
        /// Cart value in euros (e.g., 10.00)
        #[arg(long, allow_hyphen_values = true, conflicts_with = "request")]
        cart_value: Option<String>,
        /// User latitude with five decimals (e.g., 60.17094)
        #[arg(long, allow_hyphen_values = true, conflicts_with = "request")]
        lat: Option<String>,
        /// User longitude with five decimals (e.g., 24.94018)
        #[arg(long, allow_hyphen_values = true, conflicts_with = "request")]
        lon: Option<String>,
        /// Read the form fields from a JSON file instead of flags
        #[arg(long)]
        request: Option<PathBuf>,
        /// Print the breakdown as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the pricing data of a venue
    Venue {
        /// Venue slug (e.g., home-assignment-venue-helsinki)
        #[arg(long)]
        venue: String,
        /// Print the pricing as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the known venue slugs
    Venues,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = dopc_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Quote {
            venue,
            cart_value,
            lat,
            lon,
            request,
            json,
        }) => {
            let input = match request {
                Some(path) => quote::read_request_file(&path)?,
                None => quote::input_from_flags(venue, cart_value, lat, lon),
            };
            quote::run_quote(&config, &input, json).await?;
        }
        Some(Commands::Venue { venue, json }) => venue::run_venue(&config, &venue, json).await?,
        Some(Commands::Venues) => venue::run_venues(),
        None => println!("dopc: run `dopc --help` for usage"),
    }

    Ok(())
}
