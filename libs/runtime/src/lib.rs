//! Process-level plumbing for the Buildezy server: layered configuration,
//! logging setup and shutdown signals.

pub mod config;
pub mod logging;
pub mod shutdown;

pub use config::{
    default_logging_config, AppConfig, CliArgs, CorsConfig, LoggingConfig, Section,
    ServerConfig, DEFAULT_ALLOWED_ORIGINS,
};
pub use shutdown::wait_for_shutdown;
