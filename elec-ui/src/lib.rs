pub mod app;
pub mod config;
pub mod csv_loader;
pub mod logging;
pub mod submit;
pub mod utils;
pub mod view;
pub mod widgets;
