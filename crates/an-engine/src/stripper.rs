use an_core::{CommentDialect, Language};
use regex::Regex;

use crate::buffer::leading_indent;

/// Stripper state between lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripState {
    OutsideComment,
    InsideBlockComment,
}

/// Result of stripping one buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripOutcome {
    pub content: String,
    /// Comments removed; a multi-line block counts once.
    pub removed: usize,
    /// State at end of input. `InsideBlockComment` means the last block was
    /// never closed and everything after its opener was dropped.
    pub final_state: StripState,
}

/// Remove every line and block comment of `language` from `source`.
pub fn strip_comments(source: &str, language: Language) -> StripOutcome {
    strip_with_dialect(source, language.dialect())
}

/// Remove comments using the tokens of `dialect`.
pub fn strip_with_dialect(source: &str, dialect: &CommentDialect) -> StripOutcome {
    let line_pattern = dialect
        .has_line_comments
        .then(|| Regex::new(&format!(r"^\s*{}", regex::escape(dialect.line_token))).ok())
        .flatten();
    let block = dialect.block_delimiters();

    if line_pattern.is_none() && block.is_none() {
        return StripOutcome {
            content: source.to_string(),
            removed: 0,
            final_state: StripState::OutsideComment,
        };
    }

    // Python reuses its block delimiter for ordinary string literals; a kept
    // line that opens one must not have its body read as comments.
    let literal_quotes: &[&str] = match block {
        Some((open, close)) if open == close => &["\"\"\"", "'''"],
        _ => &[],
    };
    let mut in_literal: Option<&str> = None;

    let mut state = StripState::OutsideComment;
    let mut removed = 0usize;
    let mut kept: Vec<String> = Vec::new();

    for line in source.split('\n') {
        let trimmed = line.trim();

        if let Some(quote) = in_literal {
            kept.push(line.to_string());
            if line.matches(quote).count() % 2 == 1 {
                in_literal = None;
            }
            continue;
        }

        match state {
            StripState::InsideBlockComment => {
                let Some((_, close)) = block else {
                    continue;
                };
                if let Some(pos) = trimmed.find(close) {
                    state = StripState::OutsideComment;
                    let rest = trimmed[pos + close.len()..].trim();
                    if !rest.is_empty() {
                        kept.push(reindent(line, rest));
                    }
                }
            }
            StripState::OutsideComment => {
                if dialect.is_directive(trimmed) {
                    kept.push(line.to_string());
                    continue;
                }

                if let Some((open, close)) = block.filter(|(open, _)| trimmed.starts_with(open)) {
                    removed += 1;
                    let after_open = &trimmed[open.len()..];
                    match after_open.find(close) {
                        Some(pos) => {
                            let rest = after_open[pos + close.len()..].trim();
                            let rest_is_comment = line_pattern.as_ref().is_some_and(|p| p.is_match(rest));
                            if !rest.is_empty() && !rest_is_comment {
                                kept.push(reindent(line, rest));
                            }
                        }
                        None => state = StripState::InsideBlockComment,
                    }
                    continue;
                }

                if line_pattern.as_ref().is_some_and(|p| p.is_match(line)) {
                    removed += 1;
                    continue;
                }

                in_literal = opened_literal(line, literal_quotes);
                kept.push(line.to_string());
            }
        }
    }

    StripOutcome {
        content: collapse_blank_lines(&kept.join("\n")),
        removed,
        final_state: state,
    }
}

/// The quote left open at the end of `line`, taking the earliest unbalanced
/// one when more than one kind appears.
fn opened_literal<'q>(line: &str, quotes: &[&'q str]) -> Option<&'q str> {
    quotes
        .iter()
        .copied()
        .filter(|q| line.matches(q).count() % 2 == 1)
        .min_by_key(|q| line.find(q))
}

/// Keep `rest` at the indentation of `line`, preserving a CR terminator.
fn reindent(line: &str, rest: &str) -> String {
    let eol = if line.ends_with('\r') { "\r" } else { "" };
    format!("{}{rest}{eol}", leading_indent(line))
}

/// Collapse each run of two or more blank (whitespace-only) lines to a single
/// empty line. A final newline terminator is kept as is.
pub fn collapse_blank_lines(text: &str) -> String {
    let terminated = text.ends_with('\n');
    let body = if terminated { &text[..text.len() - 1] } else { text };

    let lines: Vec<&str> = body.split('\n').collect();
    let mut out: Vec<&str> = Vec::with_capacity(lines.len());
    let mut i = 0;
    while i < lines.len() {
        if !lines[i].trim().is_empty() {
            out.push(lines[i]);
            i += 1;
            continue;
        }
        let run_start = i;
        while i < lines.len() && lines[i].trim().is_empty() {
            i += 1;
        }
        if i - run_start == 1 {
            out.push(lines[run_start]);
        } else if lines[run_start].ends_with('\r') {
            out.push("\r");
        } else {
            out.push("");
        }
    }

    let mut joined = out.join("\n");
    if terminated {
        joined.push('\n');
    }
    joined
}
