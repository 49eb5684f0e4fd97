pub mod config;
pub mod gui;
pub mod logging;
pub mod overlay;
