use clap::Parser;
use meganav::core::config::{self, CliOverrides};
use meganav::core::content;
use meganav::core::responsive::ViewportClass;
use meganav::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "meganav", about = "Responsive mega menu navigator for the terminal")]
struct Args {
    /// Menu content file (.toml or .json); defaults to the built-in sample
    #[arg(short, long)]
    content: Option<PathBuf>,

    /// Pin the viewport class instead of deriving it from the terminal width
    #[arg(short, long, value_enum)]
    viewport: Option<ViewportClass>,

    /// Print followed links to stdout on exit instead of opening a browser
    #[arg(long)]
    print_links: bool,

    /// Log level written to meganav.log
    #[arg(long, default_value = "debug")]
    log_level: LevelFilter,
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to meganav.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("meganav.log") {
        let _ = WriteLogger::init(args.log_level, log_config, log_file);
    }

    log::info!("meganav starting up");

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("{}, using defaults", e);
            config::MeganavConfig::default()
        }
    };
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            content: args.content,
            viewport: args.viewport,
            print_links: args.print_links,
        },
    );

    let menu = match content::load(resolved.content_file.as_deref()) {
        Ok(menu) => menu,
        Err(e) => {
            log::error!("Failed to load content: {}", e);
            eprintln!("meganav: {e}");
            std::process::exit(1);
        }
    };

    let links = tui::run(resolved, menu)?;
    for link in links {
        println!("{link}");
    }
    Ok(())
}
