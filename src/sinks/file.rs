//! File sink with date-partitioned placement
//!
//! Every write derives its target from the current UTC time:
//!
//! ```text
//! <base>/<folder scheme directories>/<application>[_<split suffix>].log
//! ```
//!
//! The file is opened in append mode, written and closed again; no handle is
//! kept between writes.

use crate::core::{
    CallerInfo, FileConfiguration, FolderScheme, LogEntry, LogLevel, LoggerError, Result, Sink,
    SplitLevel,
};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const FILE_EXTENSION: &str = "log";

/// Pure mapping from a timestamp to a log file path
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use rust_multisink_logger::{FolderScheme, SplitLevel};
/// use rust_multisink_logger::sinks::FilePlacement;
/// use std::path::Path;
///
/// let placement = FilePlacement::new("/logs", "App", FolderScheme::ByMonth, SplitLevel::Day);
/// let at = Utc.with_ymd_and_hms(2024, 3, 15, 8, 0, 0).unwrap();
/// assert_eq!(placement.path(&at), Path::new("/logs/2024/03/App_2024_03_15.log"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePlacement {
    base_directory: PathBuf,
    application_name: String,
    folder_scheme: FolderScheme,
    split_level: SplitLevel,
    request_id: String,
}

impl FilePlacement {
    pub fn new(
        base_directory: impl Into<PathBuf>,
        application_name: impl Into<String>,
        folder_scheme: FolderScheme,
        split_level: SplitLevel,
    ) -> Self {
        Self {
            base_directory: base_directory.into(),
            application_name: application_name.into(),
            folder_scheme,
            split_level,
            request_id: Uuid::new_v4().to_string(),
        }
    }

    pub fn from_config(config: &FileConfiguration) -> Self {
        Self::new(
            config.base_directory(),
            config.application_name.clone(),
            config.folder_scheme,
            config.file_split_level,
        )
    }

    /// Use a fixed folder name for [`FolderScheme::ByRequest`]
    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = request_id.into();
        self
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Folder used by [`FolderScheme::ByRequest`]; fixed for this placement
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn directory(&self, timestamp: &DateTime<Utc>) -> PathBuf {
        let base = self.base_directory.clone();
        match self.folder_scheme {
            FolderScheme::AllInOne => base,
            FolderScheme::ByYear => base.join(timestamp.format("%Y").to_string()),
            FolderScheme::ByMonth => base
                .join(timestamp.format("%Y").to_string())
                .join(timestamp.format("%m").to_string()),
            FolderScheme::ByDay => base
                .join(timestamp.format("%Y").to_string())
                .join(timestamp.format("%m").to_string())
                .join(timestamp.format("%d").to_string()),
            FolderScheme::ByHour => base
                .join(timestamp.format("%Y").to_string())
                .join(timestamp.format("%m").to_string())
                .join(timestamp.format("%d").to_string())
                .join(timestamp.format("%H").to_string()),
            FolderScheme::ByRequest => base.join(&self.request_id),
        }
    }

    pub fn file_stem(&self, timestamp: &DateTime<Utc>) -> String {
        let name = &self.application_name;
        match self.split_level {
            SplitLevel::Request => name.clone(),
            SplitLevel::Year => format!("{}_{}", name, timestamp.format("%Y")),
            SplitLevel::Month => format!("{}_{}", name, timestamp.format("%Y_%m")),
            SplitLevel::Day => format!("{}_{}", name, timestamp.format("%Y_%m_%d")),
            SplitLevel::Hour => format!("{}_{}", name, timestamp.format("%Y_%m_%d_%H")),
        }
    }

    pub fn path(&self, timestamp: &DateTime<Utc>) -> PathBuf {
        self.directory(timestamp)
            .join(format!("{}.{}", self.file_stem(timestamp), FILE_EXTENSION))
    }
}

/// Appends formatted lines to files laid out by [`FilePlacement`]
pub struct FileSink {
    placement: FilePlacement,
    write_lock: Mutex<()>,
}

impl FileSink {
    pub fn new(config: &FileConfiguration) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_placement(FilePlacement::from_config(config)))
    }

    pub fn with_placement(placement: FilePlacement) -> Self {
        Self {
            placement,
            write_lock: Mutex::new(()),
        }
    }

    pub fn placement(&self) -> &FilePlacement {
        &self.placement
    }

    /// Folder name this sink uses under [`FolderScheme::ByRequest`]
    pub fn request_id(&self) -> &str {
        self.placement.request_id()
    }

    /// Path the next write would go to
    pub fn current_path(&self) -> PathBuf {
        self.placement.path(&Utc::now())
    }

    /// Place and stamp the line from the same instant so it always lands in
    /// the file of the period its timestamp names
    fn write_at(
        &self,
        level: LogLevel,
        message: &str,
        caller: &CallerInfo,
        timestamp: &DateTime<Utc>,
    ) -> Result<()> {
        let _guard = self.write_lock.lock();

        let path = self.placement.path(timestamp);
        let line = LogEntry::format_at(
            level,
            &caller.source_location,
            &caller.operation_name,
            message,
            timestamp,
        );
        Self::append(&path, &line)
    }

    fn append(path: &Path, line: &str) -> Result<()> {
        if let Some(directory) = path.parent() {
            fs::create_dir_all(directory).map_err(|e| {
                LoggerError::io_operation(
                    "creating log directory",
                    directory.display().to_string(),
                    e,
                )
            })?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                LoggerError::io_operation("opening log file", path.display().to_string(), e)
            })?;

        file.write_all(line.as_bytes()).map_err(|e| {
            LoggerError::io_operation("appending to log file", path.display().to_string(), e)
        })
    }
}

impl Sink for FileSink {
    fn write(&self, level: LogLevel, message: &str, caller: &CallerInfo) -> Result<()> {
        self.write_at(level, message, caller, &Utc::now())
    }

    fn name(&self) -> &str {
        "file"
    }
}
