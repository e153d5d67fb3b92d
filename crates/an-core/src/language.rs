use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dialect::CommentDialect;

/// Supported programming languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    TypeScript,
    JavaScript,
    Go,
}

/// File extensions accepted by the registry, without the leading dot.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["go", "py", "js", "ts", "tsx"];

impl Language {
    /// Map a file extension (without the dot, any case) to a Language.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "py" => Some(Self::Python),
            "ts" | "tsx" => Some(Self::TypeScript),
            "js" => Some(Self::JavaScript),
            "go" => Some(Self::Go),
            _ => None,
        }
    }

    /// Resolve the language of a file from its extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::TypeScript => "typescript",
            Self::JavaScript => "javascript",
            Self::Go => "go",
        }
    }

    /// Comment syntax for this language.
    pub fn dialect(self) -> &'static CommentDialect {
        CommentDialect::lookup(self.name())
    }
}

/// Returns `true` if the path carries one of the supported extensions.
pub fn is_supported_file(path: &Path) -> bool {
    Language::from_path(path).is_some()
}
