use clap::Parser;
use gamefinder::core::config::{load_config, resolve};
use gamefinder::core::route::Route;
use gamefinder::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "gamefinder", about = "Vibe-based game discovery in your terminal")]
struct Args {
    /// Base URL of the recommendation/chat API (overrides config and GAMEFINDER_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Page to start on: /, /chat or /game/<id>
    #[arg(long, default_value = "/")]
    open: String,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to gamefinder.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("gamefinder.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Using default config: {}", e);
            Default::default()
        }
    };
    let resolved = resolve(&config, args.api_url.as_deref());

    let start = Route::parse(&args.open).unwrap_or_else(|| {
        log::warn!("Unknown start route {:?}, opening search", args.open);
        Route::Search
    });

    log::info!(
        "GameFinder starting up against {} on {}",
        resolved.api_base,
        start
    );

    tui::run(resolved, start)
}
