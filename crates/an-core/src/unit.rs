use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Semantic category of a commentable unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    Function,
    Method,
    Class,
    Type,
    Interface,
    Struct,
    AnonymousFunction,
    /// A top-level variable/lexical binding whose value is a function.
    Binding,
}

impl UnitKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::Method => "method",
            Self::Class => "class",
            Self::Type => "type",
            Self::Interface => "interface",
            Self::Struct => "struct",
            Self::AnonymousFunction => "anonymous function",
            Self::Binding => "binding",
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A syntactic construct eligible to receive a generated comment.
///
/// All positions refer to the original, unmodified source buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxUnit {
    pub kind: UnitKind,
    /// Identifier text, empty for anonymous units.
    pub name: String,
    /// 0-indexed, inclusive.
    pub start_line: usize,
    /// 0-indexed, inclusive.
    pub end_line: usize,
    pub byte_range: Range<usize>,
    /// Verbatim source slice for `byte_range`.
    pub text: String,
}

impl SyntaxUnit {
    /// Name for log output; anonymous units render as `<anonymous>`.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "<anonymous>"
        } else {
            &self.name
        }
    }

    pub fn line_count(&self) -> usize {
        self.end_line - self.start_line + 1
    }
}
