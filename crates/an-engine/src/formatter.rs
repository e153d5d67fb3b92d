use an_core::{starts_with_comment_marker, CommentDialect, CommentStyle, DocStrategy, Language};

/// Render free text as a comment for a language identified by name.
///
/// Pure function; unknown language names get C-style tokens.
pub fn format_comment(text: &str, language: &str, style: CommentStyle) -> String {
    render(text, CommentDialect::lookup(language), style)
}

/// Render free text as a comment for a registered language.
pub fn format_for(text: &str, language: Language, style: CommentStyle) -> String {
    render(text, language.dialect(), style)
}

/// Render `text` in `style` using the tokens of `dialect`.
pub fn render(text: &str, dialect: &CommentDialect, style: CommentStyle) -> String {
    let text = text.trim();
    match style {
        CommentStyle::Line => line_comment(text, dialect),
        CommentStyle::Block => block_comment(text, dialect),
        CommentStyle::Doc => match dialect.doc {
            DocStrategy::TripleQuote => triple_quoted(text),
            DocStrategy::LinePrefixed => line_comment(text, dialect),
            DocStrategy::Block => block_comment(text, dialect),
        },
    }
}

fn line_comment(text: &str, dialect: &CommentDialect) -> String {
    let token = dialect.line_token;
    text.split('\n')
        .map(|line| {
            let line = line.trim();
            if line.is_empty() {
                return token.to_string();
            }
            let rendered = format!("{token} {line}");
            // Text like `@ts-ignore` or `type: int` would become a live
            // directive that the stripper also refuses to remove.
            if dialect.is_directive(&rendered) {
                format!("{token} - {line}")
            } else {
                rendered
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn block_comment(text: &str, dialect: &CommentDialect) -> String {
    match dialect.block_delimiters() {
        Some((open, close)) => format!("{open} {} {close}", defuse(text, close)),
        // No block syntax (shell, yaml): line comments are the only safe form.
        None => line_comment(text, dialect),
    }
}

fn triple_quoted(text: &str) -> String {
    let body = defuse(text, "\"\"\"");
    // A trailing quote or backslash would merge with the closing delimiter.
    let pad = if body.ends_with('"') || body.ends_with('\\') { " " } else { "" };
    format!("\"\"\"{body}{pad}\"\"\"")
}

/// Break up any occurrence of the close delimiter inside the body so the
/// comment cannot end early.
fn defuse(text: &str, close: &str) -> String {
    if close == "\"\"\"" {
        return text.replace("\"\"\"", "\\\"\\\"\\\"");
    }
    let mut chars = close.chars();
    let Some(first) = chars.next() else {
        return text.to_string();
    };
    let broken = format!("{first} {}", chars.as_str());
    text.replace(close, &broken)
}

/// Clean a raw completion before rendering: drop surrounding Markdown code
/// fences and comment delimiters the model echoed despite instructions.
pub fn clean_completion(raw: &str) -> String {
    let mut lines: Vec<&str> = raw.trim().lines().collect();
    if lines.first().is_some_and(|l| l.trim_start().starts_with("```")) {
        lines.remove(0);
    }
    if lines.last().is_some_and(|l| l.trim() == "```") {
        lines.pop();
    }

    lines
        .iter()
        .map(|line| strip_echoed_delimiters(line.trim()))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

fn strip_echoed_delimiters(line: &str) -> &str {
    let mut line = line;
    for close in ["*/", "\"\"\"", "'''", "-->"] {
        if let Some(rest) = line.strip_suffix(close) {
            line = rest.trim_end();
        }
    }
    if !starts_with_comment_marker(line) {
        return line;
    }
    for open in ["/**", "///", "//", "/*", "\"\"\"", "'''", "<!--", "*/", "#", "*"] {
        if let Some(rest) = line.strip_prefix(open) {
            return rest.trim_start();
        }
    }
    line
}
