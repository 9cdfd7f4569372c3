use clap::{Parser, command};
use serde::{Deserialize, Serialize};

/**
 * Command-line arguments for the application.
 */
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct ApplicationArguments {
    /**
     * Path to the configuration file. When omitted the built-in defaults
     * are used.
     */
    #[arg(short, long)]
    pub config_file: Option<String>,
}

/**
 * Represents the configuration for the application.
 */
#[derive(Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /**
     * Logging configuration for the application.
     */
    #[serde(default)]
    pub logging: LoggingConfig,
    /**
     * Server configuration for the application.
     */
    #[serde(default)]
    pub server: Server,
    /**
     * Database configuration for the application.
     */
    #[serde(default)]
    pub database: Database,
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /**
     * Whether to log the target of the log message.
     */
    pub target: bool,
    /**
     * Whether to log thread IDs.
     */
    pub thread_ids: bool,
    /**
     * Whether to log thread names.
     */
    pub thread_names: bool,
    /**
     * Whether to log line numbers.
     */
    pub line_number: bool,
    /**
     * Whether to log the log level.
     */
    pub level: bool,
    /**
     * Whether to use ANSI colors in logs.
     */
    pub ansi: bool,
    /**
     * Additional directives for logging configuration.
     */
    pub directives: Vec<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig { target: true, thread_ids: true, thread_names: true, line_number: true, level: true, ansi: true, directives: vec![] }
    }
}

#[derive(Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Database {
    /**
     * Type of the database (e.g., `Sqlite`).
     */
    pub db_type: DatabaseType,
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DatabaseType {
    /**
     * `SQLite` database type. The connection string points at the
     * database file holding the state and district tables.
     */
    #[serde(rename_all = "camelCase")]
    Sqlite { connection_string: String, max_connections: u32, acquire_timeout: u64, idle_timeout: u64 },
}

impl Default for DatabaseType {
    fn default() -> Self {
        DatabaseType::Sqlite { connection_string: "sqlite:covid19India.db".to_string(), max_connections: 5, acquire_timeout: 30_000, idle_timeout: 300_000 }
    }
}

/**
 * Represents the server configuration for the application.
 */
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Server {
    /**
     * Number of worker threads for the server.
     */
    pub workers: usize,
    /**
     * HTTP port for the server. Falls back to the PORT environment
     * variable, then 3000.
     */
    pub http_port: Option<u16>,
}

impl Default for Server {
    fn default() -> Self {
        Server { workers: 4, http_port: None }
    }
}
