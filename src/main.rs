use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use comedor_shared::DayFilter;

/// comedor - School dining room menu planning
#[derive(Parser)]
#[command(name = "comedor")]
#[command(about = "Weekly menus, ingredient orders and monthly logs for a school dining room", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate,
    /// Drop database if exists and recreate with migrations
    Reset,
    /// Compute an ingredient order from a menu file
    Order {
        /// Weekly menu JSON, keyed by weekday
        #[arg(long)]
        menu: PathBuf,

        /// Number of diners
        #[arg(long)]
        headcount: u32,

        /// "semana" or a weekday (lunes..viernes)
        #[arg(long, default_value = "semana")]
        day: DayFilter,

        /// Spreadsheet to write (defaults to pedido_comedor.xlsx)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the recipe catalog
    Recipes,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = comedor::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    comedor::observability::init_observability(
        "comedor",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Serve { host, port } => comedor::cli::server::serve(config, host, port).await,
        Commands::Migrate => comedor::migrate::migrate(&config).await,
        Commands::Reset => comedor::migrate::reset(&config).await,
        Commands::Order {
            menu,
            headcount,
            day,
            out,
        } => comedor::cli::order::order(config, menu, headcount, day, out).await,
        Commands::Recipes => comedor::cli::order::recipes(config).await,
    }
}
