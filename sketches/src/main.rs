use std::path::PathBuf;

use clap::Parser;
use easel::prelude::*;

mod demos;
use demos::{bouncer, painter, stars};

#[derive(Parser, Debug)]
#[command(name = "sketches", version, about = "Run an easel sketch")]
struct Args {
    /// Sketch to open. Defaults to the first one listed.
    name: Option<String>,

    /// Print the registered sketches and exit.
    #[arg(long)]
    list: bool,

    /// JSON file with base settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run without a window for this many frames.
    #[arg(long, value_name = "FRAMES")]
    headless: Option<u64>,
}

fn main() {
    let args = Args::parse();

    let registry = easel::register_sketches![bouncer, painter, stars]
        .unwrap_or_else(|err| {
            eprintln!("easel sketch registry failed: {}", err);
            std::process::exit(1);
        });

    if args.list {
        for entry in registry.entries() {
            let config = entry.config();
            println!(
                "{:<10} {} ({}x{}, {}/s)",
                config.name,
                config.display_name,
                config.w,
                config.h,
                config.steps_per_second
            );
        }
        return;
    }

    let config = match &args.config {
        Some(path) => AppConfig::load(path),
        None => Ok(AppConfig::default()),
    }
    .unwrap_or_else(|err| {
        eprintln!("easel config failed: {}", err);
        std::process::exit(1);
    });

    let options = LaunchOptions {
        config: config.with_env(),
        headless_frames: args.headless,
    };

    if let Err(err) =
        run_registry_with(registry, args.name.as_deref(), &options)
    {
        eprintln!("easel runtime failed: {}", err);
        std::process::exit(1);
    }
}
