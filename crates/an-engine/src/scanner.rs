use std::path::{Path, PathBuf};

use an_core::is_supported_file;
use ignore::WalkBuilder;

/// Generated file patterns to skip.
pub(crate) const GENERATED_PATTERNS: &[&str] = &[".generated.", ".min.js", "_pb2.py", ".pb.go"];

/// Dependency-cache directories to skip.
pub(crate) const VENDOR_DIRS: &[&str] = &["node_modules", "vendor", "__pycache__", ".venv", "venv"];

/// Result of scanning a directory for annotatable files.
pub struct ScanResult {
    /// Paths relative to the scanned root, sorted.
    pub files: Vec<PathBuf>,
    /// Total entries seen (including skipped).
    pub total_entries: usize,
}

/// List the annotatable files under `root`.
///
/// Walks with the `ignore` crate, so `.gitignore` rules apply. Hidden entries,
/// dependency caches, generated files and symlinks are left out, as is any file
/// whose extension has no registered language.
pub fn scan_files(root: &Path) -> ScanResult {
    let walker = WalkBuilder::new(root)
        .hidden(true)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .follow_links(false)
        .filter_entry(|entry| {
            let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
            !(is_dir && entry.file_name().to_str().is_some_and(|n| VENDOR_DIRS.contains(&n)))
        })
        .build();

    let mut total_entries = 0usize;
    let mut files: Vec<PathBuf> = walker
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(e) => {
                tracing::debug!(error = %e, "skipping unreadable entry");
                None
            }
        })
        .inspect(|_| total_entries += 1)
        .filter(|e| e.file_type().is_some_and(|ft| ft.is_file()))
        .filter(|e| is_supported_file(e.path()) && !is_generated_file(e.path()))
        .filter_map(|e| e.path().strip_prefix(root).ok().map(Path::to_path_buf))
        .collect();

    files.sort();
    ScanResult {
        files,
        total_entries,
    }
}

fn is_generated_file(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy())
        .is_some_and(|name| GENERATED_PATTERNS.iter().any(|p| name.contains(p)))
}
