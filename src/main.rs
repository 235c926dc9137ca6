//! OpenSearch query - Entry Point

use clap::Parser;
use osq::gateway::{Gateway, HttpGateway};
use osq::view::{ColorConfig, StartupOptions};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};

/// OpenSearch query - terminal front end for the OpenSearch web search service
#[derive(Parser, Debug)]
#[command(name = "osq")]
#[command(version)]
#[command(about = "Search the web through an OpenSearch service from your terminal")]
pub struct Args {
    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Root URL of the search service (e.g. http://localhost:8080)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Results per page (must be positive)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub page_size: Option<u32>,

    /// Submit this query on startup
    #[arg(short, long)]
    pub query: Option<String>,

    /// Open the crawler metrics view on startup
    #[arg(long)]
    pub metrics: bool,

    /// Show relevance scores on result cards
    #[arg(long)]
    pub show_scores: bool,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Check that the service is reachable, then exit
    #[arg(long)]
    pub check: bool,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = osq::config::load_config_with_precedence(args.config.clone())?;
        let merged = osq::config::merge_config(config_file);
        let with_env = osq::config::apply_env_overrides(merged);

        // Flags only override when explicitly set
        let page_size_override = args.page_size.map(|n| n as usize);
        let show_scores_override = if args.show_scores { Some(true) } else { None };

        osq::config::apply_cli_overrides(
            with_env,
            args.base_url.clone(),
            page_size_override,
            show_scores_override,
        )
    };
    let settings = config.validate()?;

    osq::logging::init(&settings.log_file_path)?;

    info!(settings = ?settings, "Configuration loaded and resolved");

    if args.check {
        return check_service(&settings);
    }

    let startup = StartupOptions {
        query: args.query.clone(),
        metrics: args.metrics,
    };
    osq::view::run_app(&settings, &startup, ColorConfig::from_env_and_args(args.no_color))?;

    Ok(ExitCode::SUCCESS)
}

/// Call the health endpoint and report the result on the console.
fn check_service(settings: &osq::config::Settings) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let gateway = HttpGateway::new(&settings.base_url, settings.request_timeout)?;

    match gateway.health() {
        Ok(()) => {
            info!(base_url = %settings.base_url, "health check passed");
            println!("{} is up", settings.base_url);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            warn!(base_url = %settings.base_url, error = %e, "health check failed");
            eprintln!("{} is not healthy: {}", settings.base_url, e);
            Ok(ExitCode::FAILURE)
        }
    }
}
