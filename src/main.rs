mod api;
mod dao;
mod model;
mod service;

use std::thread;
use std::time::Duration;

use crate::api::endpoints::{district_add, district_delete, district_details, district_get, district_update, state_get, state_stats, states_list};
use crate::api::middleware::timing_middleware;
use crate::api::state::AppState;
use crate::dao::covid::CovidDao;
use crate::model::apperror::{ApplicationError, ErrorType};
use crate::model::config::{ApplicationArguments, DatabaseType, LoggingConfig};
use crate::service::covid::CovidService;

use actix_web::middleware::from_fn;
use actix_web::{App, HttpServer, web};
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use clap::Parser;
use prometheus::IntGauge;
use sqlx::{Pool, Sqlite, pool};
use tracing_subscriber::EnvFilter;

/**
 * Main entry point for the application.
 */
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let args = ApplicationArguments::parse();

    let config = get_config(args.config_file.as_deref())?;

    init_tracing(&config.logging).map_err(|err| std::io::Error::other(format!("Failed to initialize logging: {err}")))?;

    let connection_pool: Pool<Sqlite> = match config.clone().database.db_type {
        DatabaseType::Sqlite { connection_string, max_connections, acquire_timeout, idle_timeout } => pool::PoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_millis(acquire_timeout))
            .idle_timeout(Duration::from_millis(idle_timeout))
            .connect(connection_string.as_str())
            .await
            .map_err(|err| std::io::Error::other(format!("Failed to create database pool: {err}")))?,
    };

    let covid_service = CovidService::new(CovidDao::new(), connection_pool.clone());

    let state = web::Data::new(AppState::new(covid_service));

    let prometheus = PrometheusMetricsBuilder::new("")
        .endpoint("/metrics")
        .mask_unmatched_patterns("UNKNOWN")
        .build()
        .map_err(|err| std::io::Error::other(format!("Failed to create Prometheus metrics: {err}")))?;

    // Initialize custom metrics
    let max_connections_gauge = IntGauge::new("max_connections", "Connection pool maximum").map_err(|err| std::io::Error::other(format!("Failed to create max_connections gauge: {err}")))?;
    let active_connections_gauge = IntGauge::new("active_connections", "Connection pool active").map_err(|err| std::io::Error::other(format!("Failed to create active_connections gauge: {err}")))?;
    let idle_connections_gauge = IntGauge::new("idle_connections", "Connection pool idle").map_err(|err| std::io::Error::other(format!("Failed to create idle_connections gauge: {err}")))?;
    //Register custom prometheus metrics
    register_prometheus_metrics(&prometheus, &max_connections_gauge)?;
    register_prometheus_metrics(&prometheus, &active_connections_gauge)?;
    register_prometheus_metrics(&prometheus, &idle_connections_gauge)?;

    gather_db_metrics(max_connections_gauge, active_connections_gauge, idle_connections_gauge, connection_pool);

    let server_init = HttpServer::new(move || {
        App::new()
            .wrap(prometheus.clone())
            .wrap(from_fn(timing_middleware))
            .app_data(state.clone())
            .service(states_list)
            .service(state_get)
            .service(state_stats)
            .service(district_add)
            .service(district_get)
            .service(district_delete)
            .service(district_update)
            .service(district_details)
    });

    let http_port = get_port(&config);
    server_init.bind(("127.0.0.1", http_port))?.workers(config.server.workers).run().await
}

/**
 * Initializes logging for the application.
 *
 * #Arguments
 * `logging_config`: Logging configuration controlling the output format.
 *
 * #Returns
 * A `Result` indicating success or failure.
 */
fn init_tracing(logging_config: &LoggingConfig) -> Result<(), ApplicationError> {
    let mut env_filter = EnvFilter::from_default_env();
    for directive in &logging_config.directives {
        env_filter = env_filter.add_directive(directive.parse().map_err(|err| ApplicationError::new(ErrorType::Initialization, format!("Failed to parse logging directive {directive}: {err}")))?);
    }
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(logging_config.target)
        .with_thread_ids(logging_config.thread_ids)
        .with_thread_names(logging_config.thread_names)
        .with_line_number(logging_config.line_number)
        .with_level(logging_config.level)
        .with_ansi(logging_config.ansi)
        .init();
    Ok(())
}

/**
 * Registers custom Prometheus metrics.
 *
 * #Arguments
 * `prometheus_metrics`: The Prometheus metrics instance to register the gauge with.
 * `gauge`: The gauge to register.
 */
fn register_prometheus_metrics(prometheus_metrics: &PrometheusMetrics, gauge: &IntGauge) -> Result<(), std::io::Error> {
    prometheus_metrics.registry.register(Box::new(gauge.clone())).map_err(|err| std::io::Error::other(format!("Failed to register Prometheus gauge: {err}")))?;
    Ok(())
}

/**
 * Gathers database metrics in a separate thread.
 *
 * #Arguments
 * `max_connections_gauge`: Gauge for maximum connections.
 * `active_connections_gauge`: Gauge for active connections.
 * `idle_connections_gauge`: Gauge for idle connections.
 * `connection_pool`: The connection pool to gather metrics from.
 */
fn gather_db_metrics(max_connections_gauge: IntGauge, active_connections_gauge: IntGauge, idle_connections_gauge: IntGauge, connection_pool: Pool<Sqlite>) {
    thread::spawn(move || {
        loop {
            max_connections_gauge.set(i64::from(connection_pool.options().get_max_connections()));
            active_connections_gauge.set(i64::from(connection_pool.size()));
            #[allow(clippy::cast_possible_wrap)]
            idle_connections_gauge.set(connection_pool.num_idle() as i64);
            thread::sleep(Duration::from_secs(1));
        }
    });
}

/**
 * Reads the configuration from the specified file. When no file is given the
 * built-in defaults are used.
 *
 * #Arguments
 * `config_file`: Optional path to the configuration file.
 *
 * #Returns
 * A `Result` containing the parsed `Config` or an `std::io::Error` if reading or parsing fails.
*/
fn get_config(config_file: Option<&str>) -> Result<model::config::Config, std::io::Error> {
    let Some(config_file) = config_file else {
        return Ok(model::config::Config::default());
    };
    let config_str: String = std::fs::read_to_string(config_file).map_err(|err| std::io::Error::other(format!("Failed to read config file: {err}")))?;
    let config: model::config::Config = toml::from_str(&config_str).map_err(|err| std::io::Error::other(format!("Failed to parse config file: {err}")))?;
    Ok(config)
}

/**
 * Resolves the listen port: configuration value, then the PORT environment
 * variable, then 3000.
 *
 * #Arguments
 * `config`: The application configuration.
 *
 * #Returns
 * The port to bind the HTTP server to.
 */
fn get_port(config: &model::config::Config) -> u16 {
    config.server.http_port.or_else(|| std::env::var("PORT").ok().and_then(|port| port.parse().ok())).unwrap_or(3000)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::config::{Config, Server};

    #[test]
    fn test_get_port_prefers_config() {
        let config = Config { server: Server { workers: 4, http_port: Some(8080) }, ..Config::default() };
        assert_eq!(get_port(&config), 8080);
    }

    #[test]
    fn test_get_port_defaults_to_3000() {
        let config = Config::default();
        std::env::remove_var("PORT");
        assert_eq!(get_port(&config), 3000);
    }

    #[test]
    fn test_get_config_defaults_without_file() {
        let config = get_config(None).unwrap();
        assert_eq!(config.server.workers, 4);
    }
}
