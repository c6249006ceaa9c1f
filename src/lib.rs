pub mod api;
pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod flow;
pub mod logging;
pub mod model;
pub mod state;
pub mod tui;
pub mod ui;
pub mod view;
pub mod worker;
