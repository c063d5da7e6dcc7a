pub use crate::backend::{Backend, HeadlessBackend, WinitBackend};
pub use crate::core::config::AppConfig;
pub use crate::core::error::{Error, Result};
pub use crate::core::logging::init_logger;
pub use crate::core::logging::{debug, error, info, trace, warn};
pub use crate::register_sketches;
pub use crate::runtime::app::App;
pub use crate::runtime::launch::{
    LaunchOptions, run_registry, run_registry_with, run_sketch,
};
pub use crate::runtime::registry::{SketchEntry, SketchRegistry};
pub use crate::runtime::runner::Runner;
pub use crate::runtime::sketch::{Sketch, SketchConfig};
pub use crate::shapes::{Color, Shape, ShapeKind, Value, rgb};
