use chrono::Local;
use clap::{Parser, Subcommand};
use flyttdata::{info_time, process::run_sold, Result};

/// Flyttdata
#[derive(Parser)]
#[command(name = "flyttdata", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sold houses data
    Sold {
        /// Scrape a single results page and echo the table to stdout
        #[arg(long, default_value_t = false)]
        debug: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let start_time = Local::now();
    match cli.command {
        Commands::Sold { debug } => run_sold(debug).await?,
    }
    info_time!(start_time, "Full program time:");

    Ok(())
}
