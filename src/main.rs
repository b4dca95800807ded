use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use smalltalk_admin::core::config::{self, CliOverrides};
use smalltalk_admin::tui;
use std::fs::File;

#[derive(Parser)]
#[command(name = "smalltalk-admin", about = "Terminal admin client for the small talk bot")]
struct Args {
    /// Backend base URL (overrides SMALLTALK_API_URL and the config file)
    #[arg(long)]
    base_url: Option<String>,

    /// Backend port (overrides SMALLTALK_API_PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Small talks per page
    #[arg(long)]
    page_size: Option<u32>,

    /// Seconds between bot status polls
    #[arg(long)]
    poll_interval: Option<u64>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to smalltalk-admin.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("smalltalk-admin.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Ignoring config file: {}", e);
        config::AdminConfig::default()
    });
    let cli = CliOverrides {
        base_url: args.base_url,
        port: args.port,
        page_size: args.page_size,
        poll_interval_secs: args.poll_interval,
    };
    let resolved = config::resolve(&file_config, &cli);

    log::info!("smalltalk-admin starting against {}", resolved.base_url);

    tui::run(resolved)
}
