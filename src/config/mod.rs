/// Database connection and schema creation
pub mod database;

/// Server, database and dashboard settings from config.toml and the environment
pub mod settings;
