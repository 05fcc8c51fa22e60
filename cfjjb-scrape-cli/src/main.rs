mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cfjjb-scrape")]
#[command(about = "CFJJB competition calendar scraper")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the calendar and generate the Elm data module
    Generate {
        /// Calendar page URL (defaults to the CFJJB calendar)
        #[arg(short, long)]
        url: Option<String>,

        /// Output path for the generated Elm module
        #[arg(short, long, default_value = "src/Data/CFJJBEvents.elm")]
        output: String,

        /// Path for the diagnostic JSON snapshot
        #[arg(long, default_value = "scripts/cfjjb-events.json")]
        snapshot: String,
    },

    /// Fetch and parse the calendar without writing any files
    Check {
        /// Calendar page URL (defaults to the CFJJB calendar)
        #[arg(short, long)]
        url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    format!("cfjjb_scrape_cli={log_level},cfjjb_scrape_core={log_level}").into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Generate {
            url,
            output,
            snapshot,
        } => {
            commands::generate_command(commands::GenerateParams {
                url,
                output,
                snapshot,
            })
            .await
        }

        Commands::Check { url } => commands::check_command(url).await,
    }
}
