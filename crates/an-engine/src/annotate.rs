use an_core::{CommentStyle, CompletionProvider, Language, SyntaxUnit};
use an_parser::{build_context, extract_imports, DEFAULT_WINDOW};

use crate::buffer::LineBuffer;
use crate::formatter::{clean_completion, format_for};
use crate::prompt::{build_comment_prompt, CommentTarget};

/// Tunables for one annotation run.
#[derive(Debug, Clone)]
pub struct AnnotateOptions {
    pub style: CommentStyle,
    /// Lines of surrounding code on each side of a unit.
    pub context_lines: usize,
    pub max_tokens: u32,
    /// Compute the result but never write it.
    pub dry_run: bool,
}

impl Default for AnnotateOptions {
    fn default() -> Self {
        Self {
            style: CommentStyle::Line,
            context_lines: DEFAULT_WINDOW,
            max_tokens: 256,
            dry_run: false,
        }
    }
}

/// Result of annotating one buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub content: String,
    pub units_found: usize,
    pub inserted: usize,
    pub skipped_existing: usize,
    pub failed: usize,
}

impl Annotation {
    /// Whether anything was inserted. A zero count means the file must not be
    /// written.
    pub fn changed(&self) -> bool {
        self.inserted > 0
    }
}

/// Order units for insertion: one unit per start line (the first in document
/// order wins), highest start line first.
pub fn insertion_order(units: &[SyntaxUnit]) -> Vec<&SyntaxUnit> {
    let mut ordered: Vec<&SyntaxUnit> = Vec::with_capacity(units.len());
    for unit in units {
        if !ordered.iter().any(|u| u.start_line == unit.start_line) {
            ordered.push(unit);
        }
    }
    ordered.sort_by(|a, b| b.start_line.cmp(&a.start_line));
    ordered
}

/// Generate and insert a comment above every unit of `source` that does not
/// already have one.
///
/// `units` must have been extracted from `source`. Context is always built
/// from `source`; insertions go into a separate buffer, bottom-up, so every
/// stored start line stays valid. Provider failures skip the unit.
#[tracing::instrument(skip_all, fields(file = file_name, units = units.len()))]
pub fn annotate_source<P>(
    source: &str,
    file_name: &str,
    language: Language,
    units: &[SyntaxUnit],
    provider: &P,
    options: &AnnotateOptions,
) -> Annotation
where
    P: CompletionProvider + ?Sized,
{
    let imports = extract_imports(source, language);
    let mut buffer = LineBuffer::from_source(source);
    let mut inserted = 0usize;
    let mut skipped_existing = 0usize;
    let mut failed = 0usize;

    for unit in insertion_order(units) {
        if buffer.has_comment_above(unit.start_line) {
            tracing::debug!(unit = unit.display_name(), line = unit.start_line + 1, "already commented");
            skipped_existing += 1;
            continue;
        }

        let context = build_context(source, unit, options.context_lines);
        let messages = build_comment_prompt(&CommentTarget {
            language,
            file_name,
            code: &unit.text,
            context: &context,
            imports: &imports,
            style: options.style,
        });

        let text = match provider.complete(&messages, options.max_tokens) {
            Ok(raw) => clean_completion(&raw),
            Err(e) => {
                tracing::warn!(
                    unit = unit.display_name(),
                    line = unit.start_line + 1,
                    provider = provider.name(),
                    error = %e,
                    "completion failed, skipping unit"
                );
                failed += 1;
                continue;
            }
        };
        if text.is_empty() {
            tracing::warn!(
                unit = unit.display_name(),
                line = unit.start_line + 1,
                provider = provider.name(),
                "empty completion, skipping unit"
            );
            failed += 1;
            continue;
        }

        let comment = format_for(&text, language, options.style);
        if buffer.insert_comment(unit.start_line, &comment) {
            inserted += 1;
        }
    }

    Annotation {
        content: buffer.into_string(),
        units_found: units.len(),
        inserted,
        skipped_existing,
        failed,
    }
}
