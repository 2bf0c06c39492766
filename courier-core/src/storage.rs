//! Naming and persisting received files.
//!
//! Files land in one directory per local calendar date under the
//! storage root, named `file{N}{extension}` where `N` counts up from 1
//! for the lifetime of the namer.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{Local, NaiveDate};
use tracing::debug;

use crate::codec::extension::validate_extension;
use crate::error::CourierError;

/// Default strftime pattern for the per-day directory.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Where a received file is stored, relative to the storage root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Formatted date of reception.
    pub directory: String,
    /// `file{sequence}{extension}`.
    pub name: String,
    pub sequence: u64,
}

impl StoredFile {
    pub fn relative_path(&self) -> PathBuf {
        Path::new(&self.directory).join(&self.name)
    }
}

/// Hands out dated, uniquely numbered file names.
///
/// The sequence counter lives here and nowhere else; only the file
/// listener owns a namer.
#[derive(Debug)]
pub struct StorageNamer {
    root: PathBuf,
    date_format: String,
    sequence: AtomicU64,
}

impl StorageNamer {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            sequence: AtomicU64::new(0),
        }
    }

    pub fn with_date_format(mut self, date_format: impl Into<String>) -> Self {
        self.date_format = date_format.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The highest sequence number handed out so far (0 before the first file).
    pub fn last_sequence(&self) -> u64 {
        self.sequence.load(Ordering::SeqCst)
    }

    /// Directory name for `date` under the configured format.
    pub fn directory_for(&self, date: NaiveDate) -> Result<String, CourierError> {
        let mut name = String::new();
        write!(name, "{}", date.format(&self.date_format))
            .map_err(|_| CourierError::Other(format!("invalid date format {:?}", self.date_format)))?;
        Ok(name)
    }

    /// Name the next file received today.
    pub async fn next_file_name(&self, extension: &str) -> Result<StoredFile, CourierError> {
        self.next_file_name_on(Local::now().date_naive(), extension).await
    }

    /// Name the next file as if received on `date`, creating its directory if needed.
    ///
    /// Check-then-create on the directory is only race-free because the
    /// file listener serves one connection at a time; the counter itself
    /// is atomic.
    pub async fn next_file_name_on(
        &self,
        date: NaiveDate,
        extension: &str,
    ) -> Result<StoredFile, CourierError> {
        validate_extension(extension)?;

        let directory = self.directory_for(date)?;
        let dir = self.root.join(&directory);
        if !tokio::fs::try_exists(&dir).await? {
            tokio::fs::create_dir_all(&dir).await?;
            debug!("created storage directory {}", dir.display());
        }

        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(StoredFile {
            directory,
            name: format!("file{sequence}{extension}"),
            sequence,
        })
    }

    /// Absolute (root-joined) location of a stored file.
    pub fn path_of(&self, stored: &StoredFile) -> PathBuf {
        self.root.join(stored.relative_path())
    }

    /// Name and write one received payload.
    pub async fn store(&self, extension: &str, payload: &[u8]) -> Result<StoredFile, CourierError> {
        let stored = self.next_file_name(extension).await?;
        tokio::fs::write(self.path_of(&stored), payload).await?;
        Ok(stored)
    }
}
