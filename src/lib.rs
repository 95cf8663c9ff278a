pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod host;
pub mod logging;
pub mod playground;
pub mod project;
pub mod theme;
