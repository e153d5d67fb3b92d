/// How a language renders a documentation-style comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocStrategy {
    /// A triple-quoted string block (`"""text"""`).
    TripleQuote,
    /// Repeated line-comment lines, the way Go and JSDoc-less C-family code reads.
    LinePrefixed,
    /// Same as the block style.
    Block,
}

/// Comment syntax capabilities of one language dialect.
///
/// This is the single table consulted by the formatter, the stripper and the
/// "already commented" check.
#[derive(Debug, PartialEq, Eq)]
pub struct CommentDialect {
    pub line_token: &'static str,
    /// Whether `line_token` is a real comment token in this dialect. Markup has
    /// no line comments; the token is only a rendering fallback there.
    pub has_line_comments: bool,
    pub block_open: Option<&'static str>,
    pub block_close: Option<&'static str>,
    pub doc: DocStrategy,
    /// Comment-looking prefixes the toolchain treats as directives.
    pub directives: &'static [&'static str],
}

static GO: CommentDialect = CommentDialect {
    line_token: "//",
    has_line_comments: true,
    block_open: Some("/*"),
    block_close: Some("*/"),
    doc: DocStrategy::LinePrefixed,
    directives: &["//go:", "// +build", "//line ", "//export ", "//nolint"],
};

static ECMASCRIPT: CommentDialect = CommentDialect {
    line_token: "//",
    has_line_comments: true,
    block_open: Some("/*"),
    block_close: Some("*/"),
    doc: DocStrategy::LinePrefixed,
    directives: &["///", "#!", "// @ts-", "//# sourceMappingURL"],
};

static PYTHON: CommentDialect = CommentDialect {
    line_token: "#",
    has_line_comments: true,
    block_open: Some("\"\"\""),
    block_close: Some("\"\"\""),
    doc: DocStrategy::TripleQuote,
    directives: &["#!", "# -*- coding", "# coding:", "# coding=", "# type:"],
};

static SCRIPT: CommentDialect = CommentDialect {
    line_token: "#",
    has_line_comments: true,
    block_open: None,
    block_close: None,
    doc: DocStrategy::LinePrefixed,
    directives: &["#!"],
};

static MARKUP: CommentDialect = CommentDialect {
    line_token: "//",
    has_line_comments: false,
    block_open: Some("<!--"),
    block_close: Some("-->"),
    doc: DocStrategy::Block,
    directives: &[],
};

static FALLBACK: CommentDialect = CommentDialect {
    line_token: "//",
    has_line_comments: true,
    block_open: Some("/*"),
    block_close: Some("*/"),
    doc: DocStrategy::Block,
    directives: &[],
};

/// Tokens that mark a line as an existing comment, for any dialect.
///
/// A bare `*` is only honoured when followed by whitespace, `/` or the end of
/// the line (see [`starts_with_comment_marker`]).
pub const COMMENT_MARKERS: &[&str] = &["//", "#", "/*", "*/", "\"\"\"", "'''", "<!--"];

impl CommentDialect {
    /// Look up a dialect by language identifier. Unknown names get C-style
    /// tokens with block-style documentation.
    pub fn lookup(name: &str) -> &'static CommentDialect {
        match name.to_ascii_lowercase().as_str() {
            "go" => &GO,
            "javascript" | "typescript" | "js" | "ts" => &ECMASCRIPT,
            "python" | "py" => &PYTHON,
            "ruby" | "shell" | "bash" | "sh" | "yaml" | "toml" | "perl" | "r" => &SCRIPT,
            "html" | "xml" | "svg" | "markdown" => &MARKUP,
            _ => &FALLBACK,
        }
    }

    /// Both block delimiters, when the dialect has block comments.
    pub fn block_delimiters(&self) -> Option<(&'static str, &'static str)> {
        self.block_open.zip(self.block_close)
    }

    /// Returns `true` if the trimmed line is a toolchain directive that only
    /// looks like a comment.
    pub fn is_directive(&self, trimmed: &str) -> bool {
        self.directives.iter().any(|d| trimmed.starts_with(d))
    }
}

/// Returns `true` if a (trimmed) line starts with any recognised comment marker.
pub fn starts_with_comment_marker(trimmed: &str) -> bool {
    if COMMENT_MARKERS.iter().any(|m| trimmed.starts_with(m)) {
        return true;
    }
    match trimmed.strip_prefix('*') {
        Some(rest) => rest.is_empty() || rest.starts_with(char::is_whitespace) || rest.starts_with('/'),
        None => false,
    }
}

/// Block comment delimiter pairs of every dialect, as (open, close).
pub const BLOCK_PAIRS: &[(&str, &str)] = &[
    ("/*", "*/"),
    ("\"\"\"", "\"\"\""),
    ("'''", "'''"),
    ("<!--", "-->"),
];

/// The delimiter pair whose close ends a (trimmed) line, if any.
///
/// A match only says the line could be the last line of a block; callers
/// decide whether a block actually opened above it.
pub fn trailing_block_close(trimmed: &str) -> Option<(&'static str, &'static str)> {
    BLOCK_PAIRS
        .iter()
        .copied()
        .find(|(_, close)| trimmed.ends_with(close))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(CommentDialect::lookup("Python"), CommentDialect::lookup("python"));
        assert_eq!(CommentDialect::lookup("GO").line_token, "//");
    }

    #[test]
    fn script_languages_use_hash() {
        for name in ["python", "ruby", "shell", "bash", "yaml"] {
            assert_eq!(CommentDialect::lookup(name).line_token, "#", "{name}");
        }
    }

    #[test]
    fn markup_uses_html_delimiters() {
        let d = CommentDialect::lookup("html");
        assert_eq!(d.block_delimiters(), Some(("<!--", "-->")));
        assert!(!d.has_line_comments);
        assert_eq!(d.doc, DocStrategy::Block);
    }

    #[test]
    fn unknown_language_falls_back_to_c_style_block_docs() {
        let d = CommentDialect::lookup("cobol");
        assert_eq!(d.line_token, "//");
        assert_eq!(d.block_delimiters(), Some(("/*", "*/")));
        assert_eq!(d.doc, DocStrategy::Block);
    }

    #[test]
    fn directives() {
        assert!(CommentDialect::lookup("go").is_directive("//go:build linux"));
        assert!(CommentDialect::lookup("typescript").is_directive("/// <reference types=\"node\" />"));
        assert!(!CommentDialect::lookup("go").is_directive("// plain comment"));
    }

    #[test]
    fn comment_markers() {
        assert!(starts_with_comment_marker("// hi"));
        assert!(starts_with_comment_marker("# hi"));
        assert!(starts_with_comment_marker("/* hi"));
        assert!(starts_with_comment_marker("*/"));
        assert!(starts_with_comment_marker("* continued"));
        assert!(starts_with_comment_marker("*"));
        assert!(starts_with_comment_marker("\"\"\"Docstring\"\"\""));
        assert!(starts_with_comment_marker("'''"));
        assert!(!starts_with_comment_marker("*ptr = 5"));
        assert!(!starts_with_comment_marker("x := 1"));
        assert!(!starts_with_comment_marker(""));
    }

    #[test]
    fn block_close_lines() {
        assert_eq!(trailing_block_close("the sum. */"), Some(("/*", "*/")));
        assert_eq!(trailing_block_close("end of doc\"\"\""), Some(("\"\"\"", "\"\"\"")));
        assert_eq!(trailing_block_close("-->"), Some(("<!--", "-->")));
        assert_eq!(trailing_block_close("return a * b;"), None);
    }
}
