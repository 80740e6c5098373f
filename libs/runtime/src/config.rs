use anyhow::{bail, Context, Result};
use db::DbConnConfig;
use figment::value::{Uncased, UncasedStr};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Application configuration with strongly-typed sections.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Listener and filesystem settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection. An empty section falls back to the `PG*` environment.
    #[serde(default)]
    pub database: DbConnConfig,
    /// Browser origin allow-list.
    #[serde(default)]
    pub cors: CorsConfig,
    /// Per-subsystem log sinks; console-only `info` when absent.
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct ServerConfig {
    /// Base directory for relative log paths; normalized to an absolute path on load.
    pub home_dir: String,
    pub host: String,
    pub port: u16,
    /// Largest accepted request body.
    pub body_limit_bytes: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct CorsConfig {
    /// Exact origins (scheme, host and port) allowed to call the API from a browser.
    pub allowed_origins: Vec<String>,
}

/// Subsystem name (a tracing target prefix such as `vendors`) to its sinks.
/// `default` covers every target without a section of its own.
pub type LoggingConfig = HashMap<String, Section>;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Section {
    /// trace | debug | info | warn | error | off
    pub console_level: String,
    #[serde(default)]
    pub file: String, // "logs/api.log", empty disables the file sink
    #[serde(default)]
    pub file_level: String,
    #[serde(default)]
    pub max_backups: Option<usize>, // How many rotated files to keep
    #[serde(default)]
    /// Rotate once the file grows past this many MiB.
    pub max_size_mb: Option<u64>,
}

pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost:5173",
    "http://127.0.0.1:5173",
    "http://192.168.1.10:5173",
    "https://buildezyservices.sbs",
    "https://www.buildezyservices.sbs",
    "https://buildezy-frontend.vercel.app",
    "https://buildezy-frontend-o9sypvabb-buildezy-devs-projects.vercel.app",
];

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            home_dir: ".".to_string(),
            host: "0.0.0.0".to_string(),
            port: 5000,
            body_limit_bytes: 100 * 1024,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|o| o.to_string())
                .collect(),
        }
    }
}

/// Create a default logging configuration: console only, `info` and up.
pub fn default_logging_config() -> LoggingConfig {
    let mut logging = HashMap::new();
    logging.insert(
        "default".to_string(),
        Section {
            console_level: "info".to_string(),
            file: String::new(),
            file_level: "debug".to_string(),
            max_backups: Some(3),
            max_size_mb: Some(100),
        },
    );
    logging
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DbConnConfig::default(),
            cors: CorsConfig::default(),
            logging: Some(default_logging_config()),
        }
    }
}

/// Conventional hosting variables holding numbers, and the config keys they populate.
const CONVENTIONAL_NUMERIC_ENV: &[(&str, &str)] = &[
    ("PORT", "server.port"),
    ("PGPORT", "database.port"),
];

/// Conventional variables taken verbatim, so `PGPASSWORD=123456` stays a string.
const CONVENTIONAL_STRING_ENV: &[(&str, &str)] = &[
    ("DATABASE_URL", "database.url"),
    ("PGHOST", "database.host"),
    ("PGUSER", "database.user"),
    ("PGPASSWORD", "database.password"),
    ("PGDATABASE", "database.dbname"),
];

fn conventional_env_key(key: &UncasedStr) -> Uncased<'_> {
    CONVENTIONAL_NUMERIC_ENV
        .iter()
        .find(|(var, _)| key.as_str().eq_ignore_ascii_case(var))
        .map(|(_, path)| Uncased::from(*path))
        .unwrap_or_else(|| key.into())
}

impl AppConfig {
    /// Load configuration with layered loading:
    /// defaults → YAML file → `APP__*` variables → conventional variables (`PORT`, `DATABASE_URL`, `PG*`).
    /// `server.home_dir` comes back absolute and already created.
    pub fn load_layered(config_path: Option<&Path>) -> Result<Self> {
        use figment::{
            providers::{Env, Format, Serialized, Yaml},
            Figment,
        };

        let base = AppConfig {
            logging: None,
            ..AppConfig::default()
        };

        let mut figment = Figment::new().merge(Serialized::defaults(base));

        if let Some(path) = config_path {
            if !path.is_file() {
                bail!("config file not found: {}", path.display());
            }
            figment = figment.merge(Yaml::file(path));
        }

        let numeric: Vec<&str> = CONVENTIONAL_NUMERIC_ENV.iter().map(|(var, _)| *var).collect();
        let figment = figment
            // APP__CORS__ALLOWED_ORIGINS=[...] -> cors.allowed_origins
            .merge(Env::prefixed("APP__").split("__"))
            .merge(Env::raw().only(&numeric).map(conventional_env_key));

        // `Env` guesses value types; these must reach `String` fields untouched.
        let figment = CONVENTIONAL_STRING_ENV
            .iter()
            .fold(figment, |figment, (var, key)| match std::env::var(var) {
                Ok(value) if !value.is_empty() => figment.merge(Serialized::default(key, value)),
                _ => figment,
            });

        let mut config: AppConfig = figment
            .extract()
            .context("Failed to extract config from figment")?;

        normalize_home_dir_inplace(&mut config.server)
            .context("Failed to resolve server.home_dir")?;

        Ok(config)
    }

    /// Serialize configuration to YAML with database credentials masked.
    pub fn to_yaml(&self) -> Result<String> {
        let shown = AppConfig {
            database: self.database.redacted(),
            ..self.clone()
        };
        serde_yaml::to_string(&shown).context("Failed to serialize config to YAML")
    }

    /// CLI flags win over every other layer.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(port) = args.port {
            self.server.port = port;
        }

        if args.mock {
            self.database = DbConnConfig::in_memory();
        }

        let logging = self.logging.get_or_insert_with(default_logging_config);
        if let Some(default_section) = logging.get_mut("default") {
            default_section.console_level = match args.verbose {
                0 => default_section.console_level.clone(),
                1 => "debug".to_string(),
                _ => "trace".to_string(),
            };
        }
    }

    /// Listen address as `host:port`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Flags the binary forwards into configuration loading.
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub config: Option<String>,
    pub port: Option<u16>,
    pub print_config: bool,
    pub verbose: u8,
    pub mock: bool,
}

fn normalize_home_dir_inplace(server: &mut ServerConfig) -> Result<()> {
    let raw = server.home_dir.trim();
    let raw = if raw.is_empty() { "." } else { raw };

    let path = PathBuf::from(raw);
    let resolved = if path.is_absolute() {
        path
    } else {
        std::env::current_dir()
            .context("cannot read current directory")?
            .join(path)
    };

    std::fs::create_dir_all(&resolved)
        .with_context(|| format!("cannot create {}", resolved.display()))?;

    server.home_dir = resolved.to_string_lossy().to_string();
    Ok(())
}
