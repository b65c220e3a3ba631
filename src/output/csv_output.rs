//! Rotating CSV output
//!
//! URLs are appended to `<prefix>_<N>.csv`, one per row under a `URL` header.
//! The row counter is checked after every non-empty write; once it reaches the
//! cap, later writes go to file `N + 1`. A single write is never split, so a
//! file can end up above the cap by less than one batch.

use crate::config::OutputConfig;
use crate::output::traits::{OutputResult, UrlSink};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

/// Header row of every output file
pub const URL_HEADER: &str = "URL";

/// Position of the writer within the rotating file sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputFileState {
    /// Index of the file currently being written (starts at 1)
    pub file_index: u32,

    /// Rows written to the current file, header excluded
    pub current_rows: u64,
}

impl Default for OutputFileState {
    fn default() -> Self {
        Self {
            file_index: 1,
            current_rows: 0,
        }
    }
}

/// CSV writer that rolls over to a new file once a row cap is reached
#[derive(Debug)]
pub struct RotatingCsvWriter {
    directory: PathBuf,
    file_prefix: String,
    max_lines_per_file: u64,
    state: OutputFileState,
    highest_index_written: u32,
}

impl RotatingCsvWriter {
    /// Creates a writer without touching the filesystem
    pub fn new(config: &OutputConfig, max_lines_per_file: u64) -> Self {
        Self {
            directory: PathBuf::from(&config.directory),
            file_prefix: config.file_prefix.clone(),
            max_lines_per_file,
            state: OutputFileState::default(),
            highest_index_written: 0,
        }
    }

    /// Creates a writer and prepares the output directory
    ///
    /// The directory is created if missing and any existing first output file
    /// is removed. Files for later indices are left alone.
    pub fn create(config: &OutputConfig, max_lines_per_file: u64) -> OutputResult<Self> {
        let writer = Self::new(config, max_lines_per_file);

        fs::create_dir_all(&writer.directory)?;

        let first = writer.file_path(1);
        if first.exists() {
            tracing::info!("Removing existing output file {}", first.display());
            fs::remove_file(&first)?;
        }

        Ok(writer)
    }

    /// Path of the output file with the given index
    pub fn file_path(&self, index: u32) -> PathBuf {
        self.directory
            .join(format!("{}_{}.csv", self.file_prefix, index))
    }

    /// Path of the file the next batch will be written to
    pub fn current_path(&self) -> PathBuf {
        self.file_path(self.state.file_index)
    }

    /// Current file index and row count
    pub fn state(&self) -> OutputFileState {
        self.state
    }

    fn append_rows(path: &Path, urls: &[String]) -> OutputResult<()> {
        let write_header = !path.exists();

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(file);

        if write_header {
            writer.write_record([URL_HEADER])?;
        }
        for url in urls {
            writer.write_record([url.as_str()])?;
        }
        writer.flush()?;

        Ok(())
    }

    fn rotate_if_full(&mut self) {
        if self.state.current_rows >= self.max_lines_per_file {
            tracing::info!(
                "{} reached {} rows, rotating to file {}",
                self.current_path().display(),
                self.state.current_rows,
                self.state.file_index + 1
            );
            self.state.file_index += 1;
            self.state.current_rows = 0;
        }
    }
}

impl UrlSink for RotatingCsvWriter {
    fn write_batch(&mut self, urls: &[String]) -> OutputResult<usize> {
        if urls.is_empty() {
            return Ok(0);
        }

        let path = self.current_path();
        Self::append_rows(&path, urls)?;

        self.state.current_rows += urls.len() as u64;
        self.highest_index_written = self.highest_index_written.max(self.state.file_index);

        tracing::info!(
            "Saved {} URLs to {} ({} rows in file)",
            urls.len(),
            path.display(),
            self.state.current_rows
        );

        self.rotate_if_full();

        Ok(urls.len())
    }

    fn files_written(&self) -> u32 {
        self.highest_index_written
    }
}
