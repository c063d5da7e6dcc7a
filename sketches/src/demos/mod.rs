pub mod bouncer;
pub mod painter;
pub mod stars;
