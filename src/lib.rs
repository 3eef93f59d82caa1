pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{console::ConsoleRenderer, http::HttpClient};
pub use config::toml_config::AppConfig;
pub use crate::core::{join::fail_fast_join, lifecycle::RequestLifecycle, sunrise::SunriseComparator};
pub use utils::error::{AppError, Result};
