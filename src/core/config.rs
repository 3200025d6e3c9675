//! Sink configuration types
//!
//! Configurations are plain serde types whose field names follow the
//! PascalCase names used in configuration documents (`ApplicationName`,
//! `FolderScheme`, ...). A document describing one sink carries a `Type` tag
//! selecting the variant; see [`SinkConfiguration::from_value`].

use super::error::{LoggerError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Subdirectory used when a file sink has no explicit `FilePath`
pub const DEFAULT_LOG_FOLDER: &str = "log";

/// How log files are nested into dated subdirectories
///
/// Deserializes from a name (any spelling [`FromStr`] accepts) or a numeric
/// code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum FolderScheme {
    AllInOne = 0,
    ByYear = 1,
    #[default]
    ByMonth = 2,
    ByDay = 3,
    ByHour = 4,
    /// One unique folder per file sink instance
    ByRequest = 5,
}

/// How often a new log file is started
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum SplitLevel {
    Request = 0,
    Hour = 1,
    #[default]
    Day = 2,
    Month = 3,
    Year = 4,
}

impl FolderScheme {
    pub const ALL: [FolderScheme; 6] = [
        FolderScheme::AllInOne,
        FolderScheme::ByYear,
        FolderScheme::ByMonth,
        FolderScheme::ByDay,
        FolderScheme::ByHour,
        FolderScheme::ByRequest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FolderScheme::AllInOne => "AllInOne",
            FolderScheme::ByYear => "ByYear",
            FolderScheme::ByMonth => "ByMonth",
            FolderScheme::ByDay => "ByDay",
            FolderScheme::ByHour => "ByHour",
            FolderScheme::ByRequest => "ByRequest",
        }
    }
}

impl SplitLevel {
    pub const ALL: [SplitLevel; 5] = [
        SplitLevel::Request,
        SplitLevel::Hour,
        SplitLevel::Day,
        SplitLevel::Month,
        SplitLevel::Year,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SplitLevel::Request => "Request",
            SplitLevel::Hour => "Hour",
            SplitLevel::Day => "Day",
            SplitLevel::Month => "Month",
            SplitLevel::Year => "Year",
        }
    }
}

impl fmt::Display for FolderScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SplitLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lowercase and drop `_`, `-` and spaces so `by_month`, `By-Month` and
/// `ByMonth` all compare equal
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

impl FromStr for FolderScheme {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = normalize(s);
        FolderScheme::ALL
            .into_iter()
            .find(|scheme| normalize(scheme.as_str()) == wanted)
            .ok_or_else(|| LoggerError::out_of_range("FolderScheme", s))
    }
}

impl FromStr for SplitLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = normalize(s);
        SplitLevel::ALL
            .into_iter()
            .find(|level| normalize(level.as_str()) == wanted)
            .ok_or_else(|| LoggerError::out_of_range("SplitLevel", s))
    }
}

impl TryFrom<u8> for FolderScheme {
    type Error = LoggerError;

    fn try_from(code: u8) -> Result<Self> {
        FolderScheme::ALL
            .get(usize::from(code))
            .copied()
            .ok_or_else(|| LoggerError::out_of_range("FolderScheme", code))
    }
}

impl TryFrom<u8> for SplitLevel {
    type Error = LoggerError;

    fn try_from(code: u8) -> Result<Self> {
        SplitLevel::ALL
            .get(usize::from(code))
            .copied()
            .ok_or_else(|| LoggerError::out_of_range("SplitLevel", code))
    }
}

/// A scheme or split level as written in a configuration document
#[derive(Deserialize)]
#[serde(untagged)]
enum CodeOrName {
    Code(i64),
    Name(String),
}

impl CodeOrName {
    fn parse<T>(self, name: &str) -> Result<T>
    where
        T: FromStr<Err = LoggerError> + TryFrom<u8, Error = LoggerError>,
    {
        match self {
            CodeOrName::Code(code) => u8::try_from(code)
                .map_err(|_| LoggerError::out_of_range(name, code))
                .and_then(T::try_from),
            CodeOrName::Name(text) => text.parse(),
        }
    }
}

impl<'de> Deserialize<'de> for FolderScheme {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        CodeOrName::deserialize(deserializer)?
            .parse("FolderScheme")
            .map_err(serde::de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for SplitLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        CodeOrName::deserialize(deserializer)?
            .parse("SplitLevel")
            .map_err(serde::de::Error::custom)
    }
}

/// Parse `key` of a file document up front so a bad value is reported as
/// [`LoggerError::OutOfRange`] rather than a JSON error
fn check_field<T>(fields: &Map<String, Value>, key: &str, name: &str) -> Result<()>
where
    T: FromStr<Err = LoggerError> + TryFrom<u8, Error = LoggerError>,
{
    if let Some(value) = fields.get(key) {
        serde_json::from_value::<CodeOrName>(value.clone())?.parse::<T>(name)?;
    }
    Ok(())
}

/// Console sink settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ConsoleConfiguration {
    pub use_colors: bool,
}

impl ConsoleConfiguration {
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }
}

impl Default for ConsoleConfiguration {
    fn default() -> Self {
        Self::new()
    }
}

/// File sink settings
///
/// # Example
///
/// ```
/// use rust_multisink_logger::{FileConfiguration, FolderScheme, SplitLevel};
///
/// let config = FileConfiguration::new("billing")
///     .with_folder_scheme(FolderScheme::ByDay)
///     .with_split_level(SplitLevel::Hour)
///     .with_file_path("/var/log/billing");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FileConfiguration {
    pub application_name: String,
    #[serde(default)]
    pub folder_scheme: FolderScheme,
    #[serde(default)]
    pub file_split_level: SplitLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<PathBuf>,
}

impl FileConfiguration {
    pub fn new(application_name: impl Into<String>) -> Self {
        Self {
            application_name: application_name.into(),
            folder_scheme: FolderScheme::default(),
            file_split_level: SplitLevel::default(),
            file_path: None,
        }
    }

    #[must_use]
    pub fn with_folder_scheme(mut self, scheme: FolderScheme) -> Self {
        self.folder_scheme = scheme;
        self
    }

    #[must_use]
    pub fn with_split_level(mut self, level: SplitLevel) -> Self {
        self.file_split_level = level;
        self
    }

    #[must_use]
    pub fn with_file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    /// `ApplicationName` must be non-blank
    pub fn validate(&self) -> Result<()> {
        if self.application_name.trim().is_empty() {
            return Err(LoggerError::config(
                "FileConfiguration",
                "ApplicationName must not be empty",
            ));
        }
        Ok(())
    }

    /// The configured `FilePath`, or [`default_log_directory`]
    pub fn base_directory(&self) -> PathBuf {
        self.file_path.clone().unwrap_or_else(default_log_directory)
    }
}

/// `log/` next to the running executable, or a relative `log/` when the
/// executable location cannot be determined
pub fn default_log_directory() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_default()
        .join(DEFAULT_LOG_FOLDER)
}

/// Configuration of one sink; exactly one variant per sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "Type")]
pub enum SinkConfiguration {
    Console(ConsoleConfiguration),
    File(FileConfiguration),
}

impl SinkConfiguration {
    /// Variant name as used by the `Type` tag
    pub fn type_name(&self) -> &'static str {
        match self {
            SinkConfiguration::Console(_) => "Console",
            SinkConfiguration::File(_) => "File",
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            SinkConfiguration::Console(_) => Ok(()),
            SinkConfiguration::File(file) => file.validate(),
        }
    }

    /// Parse one untyped sink document.
    ///
    /// `null` is an invalid argument; a `Type` tag naming neither `Console`
    /// nor `File` (case-insensitive) is an unsupported configuration.
    ///
    /// ```
    /// use rust_multisink_logger::{LoggerError, SinkConfiguration};
    /// use serde_json::json;
    ///
    /// let config = SinkConfiguration::from_value(&json!({
    ///     "Type": "File",
    ///     "ApplicationName": "App",
    ///     "FolderScheme": "ByDay"
    /// }))
    /// .unwrap();
    /// assert_eq!(config.type_name(), "File");
    ///
    /// let err = SinkConfiguration::from_value(&json!({ "Type": "Syslog" })).unwrap_err();
    /// assert!(matches!(err, LoggerError::UnsupportedConfiguration { .. }));
    /// ```
    pub fn from_value(value: &Value) -> Result<Self> {
        let document = match value {
            Value::Null => {
                return Err(LoggerError::invalid_argument(
                    "configuration",
                    "sink configuration is null",
                ))
            }
            Value::Object(document) => document,
            other => return Err(LoggerError::unsupported(json_type_name(other))),
        };

        let type_name = document
            .get("Type")
            .or_else(|| document.get("type"))
            .and_then(Value::as_str)
            .ok_or_else(|| LoggerError::config("SinkConfiguration", "missing 'Type' tag"))?;

        let mut fields = document.clone();
        fields.remove("Type");
        fields.remove("type");

        if type_name.eq_ignore_ascii_case("Console") {
            Ok(SinkConfiguration::Console(serde_json::from_value(Value::Object(fields))?))
        } else if type_name.eq_ignore_ascii_case("File") {
            check_field::<FolderScheme>(&fields, "FolderScheme", "FolderScheme")?;
            check_field::<SplitLevel>(&fields, "FileSplitLevel", "SplitLevel")?;
            Ok(SinkConfiguration::File(serde_json::from_value(Value::Object(fields))?))
        } else {
            Err(LoggerError::unsupported(type_name))
        }
    }

    /// Parse a JSON array of sink documents
    pub fn list_from_json_str(json: &str) -> Result<Vec<Self>> {
        let value: Value = serde_json::from_str(json)?;
        match &value {
            Value::Array(items) => items.iter().map(Self::from_value).collect(),
            other => Err(LoggerError::config(
                "SinkConfiguration",
                format!("expected an array of sinks, found {}", json_type_name(other)),
            )),
        }
    }
}

impl From<ConsoleConfiguration> for SinkConfiguration {
    fn from(config: ConsoleConfiguration) -> Self {
        SinkConfiguration::Console(config)
    }
}

impl From<FileConfiguration> for SinkConfiguration {
    fn from(config: FileConfiguration) -> Self {
        SinkConfiguration::File(config)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
