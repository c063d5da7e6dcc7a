use super::app::App;
use super::registry::SketchRegistry;
use super::runner::Runner;
use super::sketch::Sketch;
use super::update::{self, UpdateStatus};
use crate::backend::{HeadlessBackend, WinitBackend};
use crate::core::config::AppConfig;
use crate::core::error::Result;
use crate::core::logging::{self, debug, info, warn};

/// How [`run_registry_with`] opens its program.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LaunchOptions {
    /// Settings the chosen program's own window settings are layered over.
    pub config: AppConfig,
    /// Run without a window and quit after this many frames.
    pub headless_frames: Option<u64>,
}

/// Runs one program in a window until it quits.
pub fn run_sketch<S: Sketch>(config: &AppConfig, sketch: S) -> Result<()> {
    logging::init_logger();
    check_for_update(config);
    launch(config, sketch, None)
}

/// Runs `initial` from the registry, or the first registered program.
pub fn run_registry(
    registry: SketchRegistry,
    initial: Option<&str>,
) -> Result<()> {
    run_registry_with(registry, initial, &LaunchOptions::default())
}

pub fn run_registry_with(
    registry: SketchRegistry,
    initial: Option<&str>,
    options: &LaunchOptions,
) -> Result<()> {
    logging::init_logger();

    let entry = registry.resolve(initial)?;
    let config = entry.config().apply(&options.config);
    if options.headless_frames.is_none() {
        check_for_update(&config);
    }

    info!("Loading {}", entry.config().display_name);
    launch(&config, entry.instantiate(), options.headless_frames)
}

fn launch<S: Sketch>(
    config: &AppConfig,
    sketch: S,
    headless_frames: Option<u64>,
) -> Result<()> {
    let app = App::new(config)?;

    match headless_frames {
        Some(frames) => {
            let backend = HeadlessBackend::new().quit_after_frames(frames);
            Runner::new(app, backend, sketch).run()
        }
        None => {
            let backend =
                WinitBackend::new(app.title(), app.width(), app.height())?;
            Runner::new(app, backend, sketch).run()
        }
    }
}

/// Exits the process when the updater takes over; any failure is only
/// logged.
fn check_for_update(config: &AppConfig) {
    match update::check_for_update(&config.update) {
        Ok(UpdateStatus::Updating { remote }) => {
            info!("Updating to {}", remote);
            std::process::exit(0);
        }
        Ok(status) => debug!("Update check: {:?}", status),
        Err(e) => warn!("{}", e),
    }
}
