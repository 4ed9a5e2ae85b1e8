// src/config/mod.rs
pub mod app;

pub use app::{
    AppConfig, LexiconConfig, ServerConfig, DEFAULT_CONFIG_PATH, ENV_CONFIG_PATH,
    ENV_PACING_DELAY_MS,
};
