use std::fs;
use std::path::Path;
use std::time::Instant;

use an_core::CompletionProvider;
use an_parser::{check_source, parse_source, ParserRegistry};

use crate::annotate::{annotate_source, AnnotateOptions};
use crate::error::EngineError;
use crate::report::{BatchReport, FileReport};
use crate::scanner::scan_files;
use crate::stripper::{strip_comments, StripState};
use crate::writer::{content_hash, write_atomic};

/// Blocking yes/no question asked before each file of a directory run.
pub trait Confirm {
    /// Ask `question`; `true` means go ahead.
    fn confirm(&mut self, question: &str) -> bool;
}

/// Accepts every file without asking.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm(&mut self, _question: &str) -> bool {
        true
    }
}

/// Read a file once, returning its bytes and the hash used to guard the write.
fn read_source(path: &Path) -> Result<(Vec<u8>, u64), EngineError> {
    let content = fs::read(path).map_err(|source| EngineError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let hash = content_hash(&content);
    Ok((content, hash))
}

fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Annotate one file: extract units, request a comment for each uncommented
/// one, and atomically replace the file if anything was inserted.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn annotate_file<P>(path: &Path, provider: &P, options: &AnnotateOptions) -> Result<FileReport, EngineError>
where
    P: CompletionProvider + ?Sized,
{
    let path_str = display_path(path);
    let (language, ext) = ParserRegistry::resolve(path)?;
    let (content, hash) = read_source(path)?;
    let source = check_source(&path_str, &content)?;
    let parsed = parse_source(&path_str, source, language, &ext)?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path_str.clone());
    let annotation = annotate_source(source, &file_name, language, &parsed.units, provider, options);

    let mut report = FileReport::new(path.to_path_buf(), language);
    report.units_found = annotation.units_found;
    report.inserted = annotation.inserted;
    report.skipped_existing = annotation.skipped_existing;
    report.failed = annotation.failed;

    if annotation.changed() {
        if options.dry_run {
            report.preview = Some(annotation.content);
        } else {
            write_atomic(path, &annotation.content, Some(hash))?;
            report.written = true;
        }
    }

    tracing::info!(
        units = report.units_found,
        inserted = report.inserted,
        skipped = report.skipped_existing,
        failed = report.failed,
        "file annotated"
    );
    Ok(report)
}

/// Strip comments from one file, replacing it only when something was removed.
#[tracing::instrument(skip_all, fields(path = %path.display(), dry_run = dry_run))]
pub fn clear_file(path: &Path, dry_run: bool) -> Result<FileReport, EngineError> {
    let path_str = display_path(path);
    let (language, _) = ParserRegistry::resolve(path)?;
    let (content, hash) = read_source(path)?;
    let source = check_source(&path_str, &content)?;

    let outcome = strip_comments(source, language);
    if outcome.final_state == StripState::InsideBlockComment {
        tracing::warn!("unterminated block comment, dropped everything after it");
    }

    let mut report = FileReport::new(path.to_path_buf(), language);
    report.removed = outcome.removed;

    if outcome.removed > 0 {
        if dry_run {
            report.preview = Some(outcome.content);
        } else {
            write_atomic(path, &outcome.content, Some(hash))?;
            report.written = true;
        }
    }

    tracing::info!(removed = report.removed, "file cleared");
    Ok(report)
}

/// Annotate every supported file under `root`, asking `confirm` before each.
///
/// A failing file is recorded and the run moves on.
#[tracing::instrument(skip_all, fields(root = %root.display()))]
pub fn annotate_directory<P, C>(root: &Path, provider: &P, options: &AnnotateOptions, confirm: &mut C) -> BatchReport
where
    P: CompletionProvider + ?Sized,
    C: Confirm + ?Sized,
{
    run_batch(root, confirm, "Process", |path| annotate_file(path, provider, options))
}

/// Strip comments from every supported file under `root`, asking `confirm`
/// before each.
#[tracing::instrument(skip_all, fields(root = %root.display(), dry_run = dry_run))]
pub fn clear_directory<C>(root: &Path, dry_run: bool, confirm: &mut C) -> BatchReport
where
    C: Confirm + ?Sized,
{
    run_batch(root, confirm, "Clear comments from", |path| clear_file(path, dry_run))
}

fn run_batch<C, F>(root: &Path, confirm: &mut C, verb: &str, mut process: F) -> BatchReport
where
    C: Confirm + ?Sized,
    F: FnMut(&Path) -> Result<FileReport, EngineError>,
{
    let start = Instant::now();
    let scan = scan_files(root);
    let mut report = BatchReport {
        files_total: scan.files.len(),
        ..BatchReport::default()
    };
    tracing::info!(files = report.files_total, entries = scan.total_entries, "batch started");

    for rel in &scan.files {
        let rel_str = display_path(rel);
        if !confirm.confirm(&format!("{verb} {rel_str}?")) {
            tracing::debug!(path = %rel_str, "declined");
            report.files_declined += 1;
            continue;
        }

        match process(&root.join(rel)) {
            Ok(file) => report.record(file),
            Err(e) => {
                tracing::warn!(path = %rel_str, error = %e, "file failed");
                report.files_failed += 1;
                report.failed_details.push((rel_str, e.to_string()));
            }
        }
    }

    report.duration = start.elapsed();
    tracing::info!(
        processed = report.files_processed,
        declined = report.files_declined,
        failed = report.files_failed,
        duration_secs = %format!("{:.2}", report.duration.as_secs_f64()),
        "batch completed"
    );
    report
}
