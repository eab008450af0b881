pub mod actions;
pub mod common;
pub mod launcher;
pub mod logging;
pub mod plugin;
pub mod plugins;
pub mod session;
pub mod settings;
