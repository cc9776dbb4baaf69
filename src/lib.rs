#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod components;
pub mod config;
pub mod metrics;
pub mod ui;
pub use app::DashboardApp;
