pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod ui;

pub use config::Config;
pub use error::{AppError, Result};
