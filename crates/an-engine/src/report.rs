use std::path::PathBuf;
use std::time::Duration;

use an_core::Language;

/// Outcome of annotating or clearing a single file.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: PathBuf,
    pub language: Language,
    pub units_found: usize,
    pub inserted: usize,
    /// Units skipped because a comment was already present.
    pub skipped_existing: usize,
    /// Units skipped because the provider failed.
    pub failed: usize,
    /// Comments removed by a clear run.
    pub removed: usize,
    /// Whether the file on disk was replaced.
    pub written: bool,
    /// New content, kept instead of written on dry runs.
    pub preview: Option<String>,
}

impl FileReport {
    pub(crate) fn new(path: PathBuf, language: Language) -> Self {
        Self {
            path,
            language,
            units_found: 0,
            inserted: 0,
            skipped_existing: 0,
            failed: 0,
            removed: 0,
            written: false,
            preview: None,
        }
    }
}

/// Report generated after a directory run.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub files_total: usize,
    pub files_processed: usize,
    pub files_declined: usize,
    pub files_failed: usize,
    /// (relative path, error) for each failed file.
    pub failed_details: Vec<(String, String)>,
    pub units_inserted: usize,
    pub units_skipped: usize,
    pub units_failed: usize,
    pub comments_removed: usize,
    pub files: Vec<FileReport>,
    pub duration: Duration,
}

impl BatchReport {
    pub(crate) fn record(&mut self, file: FileReport) {
        self.files_processed += 1;
        self.units_inserted += file.inserted;
        self.units_skipped += file.skipped_existing;
        self.units_failed += file.failed;
        self.comments_removed += file.removed;
        self.files.push(file);
    }

    /// Files whose content changed (or would change, on a dry run).
    pub fn files_changed(&self) -> usize {
        self.files
            .iter()
            .filter(|f| f.written || f.preview.is_some())
            .count()
    }
}
