// Library surface for the binary and the integration tests.
pub mod app;
pub mod app_dirs;
pub mod cli;
pub mod config;
pub mod error;
pub mod history;
pub mod logging;
pub mod model;
pub mod parser;
pub mod session;
pub mod source;
pub mod state;
pub mod store;
pub mod timer;
pub mod tui;
pub mod ui;
