//! A small retained-mode 2D graphics runtime for teaching.
//!
//! Programs build a tree of [`Shape`]s on the [`App`] and react to ticks,
//! keys and the mouse through the [`Sketch`] callbacks.

pub mod backend;
pub mod core;
pub mod prelude;
pub mod render;
pub mod runtime;
pub mod shapes;

pub use crate::core::error::{Error, Result};
pub use crate::core::logging::init_logger;
pub use runtime::app::App;
pub use runtime::launch::{
    LaunchOptions, run_registry, run_registry_with, run_sketch,
};
pub use runtime::runner::Runner;
pub use runtime::sketch::{Sketch, SketchConfig};
pub use shapes::{Color, Shape, Value};
