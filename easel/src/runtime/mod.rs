pub mod app;
pub mod dispatch;
pub mod events;
pub mod frame_clock;
pub mod keys;
pub mod launch;
pub mod modal;
#[cfg(feature = "modal")]
pub mod modal_process;
mod registration_macros;
pub mod registry;
pub mod runner;
pub mod sketch;
pub mod state;
pub mod storage;
pub mod update;
