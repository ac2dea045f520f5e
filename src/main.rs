use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::io;
use std::path::PathBuf;

use spatnav::core::Engine;
use spatnav::core::config::{load_config, load_config_from, resolve};
use spatnav::page::{Page, validate_selectors};

#[derive(Parser)]
#[command(name = "spatnav", about = "Arrow-key focus navigation for pointer-first pages")]
struct Args {
    /// Page file to open (overrides SPATNAV_PAGE and the config file)
    #[arg(short, long)]
    page: Option<String>,

    /// Config file to use instead of ~/.spatnav/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();

    // Initialize file logger - writes to spatnav.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("spatnav.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let config = match &args.config {
        Some(path) => load_config_from(path),
        None => load_config(),
    }
    .map_err(io::Error::other)?;
    let resolved = resolve(&config, args.page.as_deref());
    validate_selectors(&resolved.engine.registry.candidates).map_err(io::Error::other)?;

    let Some(page_path) = resolved.page else {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "no page given: pass --page, set SPATNAV_PAGE, or set general.page in the config",
        ));
    };
    log::info!("spatnav starting up with page {}", page_path.display());

    let page = Page::load(&page_path).map_err(io::Error::other)?;
    let engine = Engine::new(page, resolved.engine);
    spatnav::tui::run(engine, resolved.timing).await
}
