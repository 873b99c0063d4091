//! [`Config`]-related definitions.

use std::time;

use common::pagination::Mode;
use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use derive_more::{Display, Error};
use roster::read::user::list::PageSize;
use serde::Deserialize;
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    /// Remote record service configuration.
    pub remote: Remote,

    /// Users view configuration.
    pub view: View,

    /// Log configuration.
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// Remote record service configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Remote {
    /// Base URL of the REST API.
    #[default("https://jsonplaceholder.typicode.com".to_owned())]
    pub base_url: String,

    /// Timeout of a single request.
    #[default(time::Duration::from_secs(10))]
    #[serde(with = "humantime_serde")]
    pub timeout: time::Duration,
}

impl From<Remote> for roster::infra::http::Config {
    fn from(value: Remote) -> Self {
        let Remote { base_url, timeout } = value;
        Self { base_url, timeout }
    }
}

/// Users view configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct View {
    /// Number of users on a page, one of `10`, `25`, `50` or `100`.
    #[default(10)]
    pub page_size: u8,

    /// Indicator whether the view grows on demand instead of paging.
    pub infinite: bool,

    /// Quiet period after the last search input before it becomes active.
    #[default(time::Duration::from_millis(300))]
    #[serde(with = "humantime_serde")]
    pub debounce: time::Duration,

    /// Display duration of notifications.
    #[default(time::Duration::from_secs(3))]
    #[serde(with = "humantime_serde")]
    pub notification_duration: time::Duration,
}

impl TryFrom<View> for roster::Config {
    type Error = InvalidPageSize;

    fn try_from(value: View) -> Result<Self, Self::Error> {
        let View {
            page_size,
            infinite,
            debounce,
            notification_duration,
        } = value;

        Ok(Self {
            page_size: PageSize::try_from(page_size).map_err(InvalidPageSize)?,
            mode: if infinite { Mode::Growing } else { Mode::Paged },
            debounce,
            notification_duration,
        })
    }
}

/// Error of a [`View::page_size`] not being one of the supported ones.
#[derive(Clone, Copy, Debug, Display, Error)]
#[display("`{_0}` is not a supported page size (10, 25, 50 or 100)")]
pub struct InvalidPageSize(#[error(not(source))] pub u8);

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}
