use std::fmt;

use serde::{Deserialize, Serialize};

/// Rendering style for generated comments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CommentStyle {
    /// Every line prefixed with the line-comment token.
    #[default]
    Line,
    /// One run wrapped in block delimiters.
    Block,
    /// Documentation block; rendering depends on the language.
    Doc,
}

impl CommentStyle {
    /// Parse a style name. Unknown names fall back to [`CommentStyle::Line`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "block" => Self::Block,
            "doc" | "docstring" => Self::Doc,
            _ => Self::Line,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Block => "block",
            Self::Doc => "doc",
        }
    }
}

impl From<String> for CommentStyle {
    fn from(s: String) -> Self {
        Self::from_name(&s)
    }
}

impl From<CommentStyle> for String {
    fn from(style: CommentStyle) -> Self {
        style.name().to_string()
    }
}

impl fmt::Display for CommentStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
