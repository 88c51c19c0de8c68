use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    #[error("Browser error: {0}")]
    Browser(#[from] BrowserError),

    #[error("Scraping error: {0}")]
    Scraper(#[from] ScraperError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("WebDriver error: {0}")]
    WebDriver(#[from] thirtyfour::error::WebDriverError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Missing required configuration: {0}")]
    MissingField(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Failed to build client: {0}")]
    BuildError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Response error {status_code}")]
    ResponseError { status_code: u16, url: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

#[derive(Error, Debug)]
pub enum BrowserError {
    #[error("Navigation to {url} failed: {reason}")]
    NavigationFailed { url: String, reason: String },

    #[error("Timed out after {seconds}s waiting for selector `{selector}`")]
    Timeout { selector: String, seconds: u64 },

    #[error("No page loaded")]
    NoPage,

    #[error("Operation not supported by this backend: {0}")]
    Unsupported(&'static str),

    #[error("Failed to save screenshot {path}: {reason}")]
    Screenshot { path: String, reason: String },
}

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("Selector error: {0}")]
    SelectorError(String),

    #[error("Invalid extraction pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("No rows found in table")]
    NoRows,

    #[error("No data was extracted from {0}")]
    NoFields(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
