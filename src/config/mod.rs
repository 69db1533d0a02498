/// Database configuration and connection management
pub mod database;

/// Split policy settings loaded from config.toml
pub mod settings;
