pub mod canvas;
pub mod inspector;
pub mod pipeline;
pub mod present;
