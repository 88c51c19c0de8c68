use crate::error::{ConfigError, Result};
use crate::logging::parse_log_level;
use clap::ValueEnum;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use url::Url;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct League {
    /// Competition code used in URLs, e.g. `TR1`.
    pub code: String,
    /// Slug used in URLs and output file names, e.g. `super-lig`.
    pub name: String,
}

impl League {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Headless Chrome over WebDriver
    #[value(name = "webdriver")]
    WebDriver,
    /// Plain HTTP fetch, pages parsed as static HTML
    Http,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_directory")]
    pub directory: String,
    #[serde(default = "default_log_filename")]
    pub filename: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UrlTemplates {
    #[serde(default = "default_standings_url")]
    pub standings: String,
    #[serde(default = "default_transfers_url")]
    pub transfers: String,
    #[serde(default = "default_uefa_url")]
    pub uefa: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_screenshot_dir")]
    pub screenshot_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BrowserConfig {
    #[serde(default = "default_backend")]
    pub backend: Backend,
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,
    #[serde(default = "default_headless")]
    pub headless: bool,
    #[serde(default = "default_viewport_width")]
    pub viewport_width: u32,
    #[serde(default = "default_viewport_height")]
    pub viewport_height: u32,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_accept_language")]
    pub accept_language: String,
    /// Seconds to wait for a page's anchor selector.
    #[serde(default = "default_wait_timeout")]
    pub wait_timeout: u64,
    #[serde(default = "default_consent_selectors")]
    pub consent_selectors: Vec<String>,
    #[serde(default)]
    pub proxy: Option<String>,
}

/// Where a loaded [`Config`] came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_leagues")]
    pub leagues: Vec<League>,

    #[serde(default = "default_seasons")]
    pub seasons: Vec<u32>,

    #[serde(default = "default_uefa_season")]
    pub uefa_season: u32,

    /// Seconds between re-fetches while the HTTP backend waits for a selector.
    #[serde(default = "default_retry_delay")]
    pub retry_delay: u64,

    #[serde(default)]
    pub urls: UrlTemplates,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub logging: LogConfig,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: default_log_directory(),
            filename: default_log_filename(),
        }
    }
}

impl Default for UrlTemplates {
    fn default() -> Self {
        Self {
            standings: default_standings_url(),
            transfers: default_transfers_url(),
            uefa: default_uefa_url(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            screenshot_dir: default_screenshot_dir(),
        }
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            webdriver_url: default_webdriver_url(),
            headless: default_headless(),
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
            user_agent: default_user_agent(),
            accept_language: default_accept_language(),
            wait_timeout: default_wait_timeout(),
            consent_selectors: default_consent_selectors(),
            proxy: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            leagues: default_leagues(),
            seasons: default_seasons(),
            uefa_season: default_uefa_season(),
            retry_delay: default_retry_delay(),
            urls: UrlTemplates::default(),
            output: OutputConfig::default(),
            browser: BrowserConfig::default(),
            logging: LogConfig::default(),
        }
    }
}

impl Config {
    /// Reads `path` if it exists, otherwise falls back to the built-in defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<(Self, ConfigSource)> {
        let path = path.as_ref();
        if !path.exists() {
            let config = Config::default();
            config.validate()?;
            return Ok((config, ConfigSource::Defaults));
        }
        let config = Self::from_file(path)?;
        Ok((config, ConfigSource::File(path.to_path_buf())))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::FileRead)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Keeps only the named leagues and listed seasons. Empty filters keep everything.
    pub fn retain(&mut self, leagues: &[String], seasons: &[u32]) {
        if !leagues.is_empty() {
            self.leagues
                .retain(|league| leagues.iter().any(|name| *name == league.name));
        }
        if !seasons.is_empty() {
            self.seasons.retain(|season| seasons.contains(season));
        }
    }

    /// Fails when no league or no season is left to scrape.
    pub fn ensure_selection(&self) -> Result<()> {
        if self.leagues.is_empty() {
            return Err(ConfigError::MissingField("leagues".to_string()).into());
        }
        if self.seasons.is_empty() {
            return Err(ConfigError::MissingField("seasons".to_string()).into());
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.ensure_selection()?;
        if let Some(league) = self
            .leagues
            .iter()
            .find(|l| l.code.trim().is_empty() || l.name.trim().is_empty())
        {
            return Err(ConfigError::InvalidValue(format!(
                "league entries need both code and name: {:?}",
                league
            ))
            .into());
        }

        for (name, template) in [
            ("urls.standings", &self.urls.standings),
            ("urls.transfers", &self.urls.transfers),
            ("urls.uefa", &self.urls.uefa),
        ] {
            if !template.starts_with("http") {
                return Err(ConfigError::InvalidValue(format!(
                    "{} must start with http(s): {}",
                    name, template
                ))
                .into());
            }
        }

        if self.retry_delay == 0 {
            return Err(ConfigError::InvalidValue(
                "retry_delay must be greater than 0".to_string(),
            )
            .into());
        }

        let browser = &self.browser;
        if browser.backend == Backend::WebDriver {
            Url::parse(&browser.webdriver_url).map_err(|e| {
                ConfigError::InvalidValue(format!(
                    "browser.webdriver_url is not a valid URL ({}): {}",
                    e, browser.webdriver_url
                ))
            })?;
        }

        if browser.wait_timeout == 0 {
            return Err(ConfigError::InvalidValue(
                "browser.wait_timeout must be greater than 0".to_string(),
            )
            .into());
        }

        if browser.viewport_width == 0 || browser.viewport_height == 0 {
            return Err(ConfigError::InvalidValue(
                "browser viewport dimensions must be greater than 0".to_string(),
            )
            .into());
        }

        parse_log_level(&self.logging.level)?;

        Ok(())
    }
}

/// Fills `{league_name}`, `{league_code}` and `{season}` in a URL template.
pub fn render_url(template: &str, league: Option<&League>, season: u32) -> String {
    let url = template.replace("{season}", &season.to_string());
    match league {
        Some(league) => url
            .replace("{league_name}", &league.name)
            .replace("{league_code}", &league.code),
        None => url,
    }
}

fn default_leagues() -> Vec<League> {
    [
        ("TS1", "chance-liga"),
        ("L1", "bundesliga"),
        ("BE1", "jupiler-pro-league"),
        ("FR1", "ligue-1"),
        ("NL1", "eredivisie"),
        ("GB1", "premier-league"),
        ("ES1", "laliga"),
        ("IT1", "serie-a"),
        ("PO1", "liga-portugal"),
        ("TR1", "super-lig"),
    ]
    .into_iter()
    .map(|(code, name)| League::new(code, name))
    .collect()
}

fn default_seasons() -> Vec<u32> {
    vec![2024, 2023, 2022, 2021, 2020]
}

fn default_uefa_season() -> u32 {
    2024
}

fn default_retry_delay() -> u64 {
    5
}

fn default_standings_url() -> String {
    "https://www.transfermarkt.com.tr/super-lig/spieltagtabelle/wettbewerb/{league_code}/saison_id/{season}".to_string()
}

fn default_transfers_url() -> String {
    "https://www.transfermarkt.com.tr/{league_name}/transfers/wettbewerb/{league_code}/plus/?saison_id={season}&s_w=&leihe=1&intern=0&intern=1".to_string()
}

fn default_uefa_url() -> String {
    "https://www.transfermarkt.com.tr/uefa/5jahreswertung/statistik/stat/saison_id/{season}/plus/1"
        .to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_screenshot_dir() -> PathBuf {
    PathBuf::from("screenshots")
}

fn default_backend() -> Backend {
    Backend::WebDriver
}

fn default_webdriver_url() -> String {
    "http://localhost:9515".to_string()
}

fn default_headless() -> bool {
    true
}

fn default_viewport_width() -> u32 {
    1920
}

fn default_viewport_height() -> u32 {
    1080
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36".to_string()
}

fn default_accept_language() -> String {
    "tr-TR,tr;q=0.9,en-US;q=0.8,en;q=0.7".to_string()
}

fn default_wait_timeout() -> u64 {
    30
}

fn default_consent_selectors() -> Vec<String> {
    [
        "button#onetrust-accept-btn-handler",
        "button.sp_choice_type_11",
        "button[title='Accept']",
        "button[title='Kabul']",
        "#sp_message_iframe_575846",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_directory() -> String {
    "logs".to_string()
}

fn default_log_filename() -> String {
    "scraper.log".to_string()
}
