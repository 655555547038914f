//! JSONL file record provider.
//!
//! Each non-blank line holds one JSON object with an integer `id` field;
//! every other field is a display attribute. The file is re-read on every
//! fetch and only the requested window is decoded, so no more than one page
//! of records is held at a time.

use super::RecordProvider;
use crate::model::{total_pages, FetchError, FetchedPage, PageIndex, Record};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Serves pages of a JSONL record file.
#[derive(Debug, Clone)]
pub struct FileProvider {
    path: PathBuf,
    page_size: usize,
    latency: Duration,
}

impl FileProvider {
    /// Create a provider for the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::FileNotFound` if the file does not exist.
    pub fn new(path: impl AsRef<Path>, page_size: usize) -> Result<Self, FetchError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(FetchError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        Ok(Self {
            path: path.to_path_buf(),
            page_size: page_size.max(1),
            latency: Duration::ZERO,
        })
    }

    /// Delay every fetch by `latency`, like a network round trip would.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rows per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    fn io_error(&self, err: std::io::Error) -> FetchError {
        if err.kind() == std::io::ErrorKind::NotFound {
            FetchError::FileNotFound {
                path: self.path.clone(),
            }
        } else {
            FetchError::Io {
                path: self.path.clone(),
                reason: err.to_string(),
            }
        }
    }
}

impl RecordProvider for FileProvider {
    fn fetch_page(&self, index: PageIndex) -> Result<FetchedPage, FetchError> {
        if !self.latency.is_zero() {
            std::thread::sleep(self.latency);
        }

        let file = File::open(&self.path).map_err(|e| self.io_error(e))?;
        let reader = BufReader::new(file);

        let start = index.get().saturating_mul(self.page_size);
        let end = start.saturating_add(self.page_size);
        let mut records = Vec::with_capacity(self.page_size);
        let mut total: usize = 0;

        for (line_idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| self.io_error(e))?;
            if line.trim().is_empty() {
                continue;
            }
            if (start..end).contains(&total) {
                let record: Record =
                    serde_json::from_str(&line).map_err(|e| FetchError::Parse {
                        line: line_idx + 1,
                        reason: e.to_string(),
                    })?;
                records.push(record);
            }
            total += 1;
        }

        let total_count = total as u64;
        let pages = total_pages(total_count, self.page_size);
        if index.get() >= pages {
            return Err(FetchError::PageOutOfRange {
                index,
                total_pages: pages,
            });
        }

        debug!(
            path = %self.path.display(),
            page = %index,
            records = records.len(),
            total = total_count,
            "read page from file"
        );
        Ok(FetchedPage {
            records,
            total_count,
        })
    }
}
