use crate::config::LogConfig;
use crate::error::{AppError, ConfigError, Result};
use std::path::PathBuf;
use tracing::Level;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::LevelFilter, fmt, layer::SubscriberExt, EnvFilter, Registry};

#[derive(Debug)]
pub struct LoggerConfig {
    pub directory: PathBuf,
    pub file_name: String,
    pub rotation: Rotation,
    pub level: Level,
}

impl LoggerConfig {
    pub fn from_config(config: &LogConfig) -> Result<Self> {
        Ok(Self {
            directory: PathBuf::from(&config.directory),
            file_name: config.filename.clone(),
            rotation: Rotation::DAILY,
            level: parse_log_level(&config.level)?,
        })
    }
}

/// Installs the global subscriber: a daily rolling file plus the console.
///
/// `RUST_LOG` overrides the configured level when set.
pub fn init_logging(config: LoggerConfig) -> Result<()> {
    std::fs::create_dir_all(&config.directory).map_err(ConfigError::FileRead)?;

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(config.level).into())
        .from_env_lossy();

    let file_appender =
        RollingFileAppender::new(config.rotation, &config.directory, &config.file_name);
    let file_layer = fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_writer(file_appender)
        .with_ansi(false);

    let stdout_layer = fmt::layer().with_target(false).compact();

    let subscriber = Registry::default()
        .with(filter)
        .with(file_layer)
        .with(stdout_layer);

    tracing::subscriber::set_global_default(subscriber).map_err(|e| {
        AppError::Config(ConfigError::InvalidValue(format!(
            "Failed to set global subscriber: {}",
            e
        )))
    })
}

pub fn parse_log_level(level: &str) -> Result<Level> {
    level.trim().parse::<Level>().map_err(|_| {
        ConfigError::InvalidValue(format!("Invalid log level: {}", level)).into()
    })
}

// Helper macros for consistent logging with error handling
#[macro_export]
macro_rules! log_error {
    // Tag AppError values with their kind
    ($err:expr => $($arg:tt)*) => {{
        use $crate::error::AppError;

        match &$err {
            err @ AppError::Config(_) => tracing::error!(error = %err, kind = "config", $($arg)*),
            err @ AppError::Client(_) => tracing::error!(error = %err, kind = "client", $($arg)*),
            err @ AppError::Browser(_) => tracing::error!(error = %err, kind = "browser", $($arg)*),
            err @ AppError::Scraper(_) => tracing::error!(error = %err, kind = "scraper", $($arg)*),
            err @ AppError::Io(_) => tracing::error!(error = %err, kind = "io", $($arg)*),
            err @ AppError::Csv(_) => tracing::error!(error = %err, kind = "csv", $($arg)*),
            err @ AppError::WebDriver(_) => tracing::error!(error = %err, kind = "webdriver", $($arg)*),
        }
    }};
    ($($arg:tt)*) => {
        tracing::error!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        tracing::warn!($($arg)*);
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        tracing::info!($($arg)*);
    };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*);
    };
}
