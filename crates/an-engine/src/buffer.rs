use an_core::{starts_with_comment_marker, trailing_block_close};

/// The buffer being mutated, held as an owned line array.
///
/// Built by copying the original source; unit positions are always computed
/// against the original, never against this buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBuffer {
    lines: Vec<String>,
}

impl LineBuffer {
    pub fn from_source(source: &str) -> Self {
        Self {
            lines: source.split('\n').map(str::to_string).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, idx: usize) -> Option<&str> {
        self.lines.get(idx).map(String::as_str)
    }

    /// Returns `true` if the line directly above `line` is a comment: it starts
    /// with a comment marker, or it ends a block comment whose opener starts an
    /// earlier line.
    pub fn has_comment_above(&self, line: usize) -> bool {
        let Some(prev) = line.checked_sub(1).filter(|&i| i < self.lines.len()) else {
            return false;
        };
        starts_with_comment_marker(self.lines[prev].trim()) || self.closes_block_comment(prev)
    }

    fn closes_block_comment(&self, idx: usize) -> bool {
        let last = self.lines[idx].trim();
        let Some((open, close)) = trailing_block_close(last) else {
            return false;
        };
        // `x = """hi"""` or `f() /* why */`: opened and closed on a code line.
        if last[..last.len() - close.len()].contains(open) {
            return false;
        }
        self.lines[..idx]
            .iter()
            .rev()
            .map(|l| l.trim())
            .find(|l| l.contains(open) || l.contains(close))
            .and_then(|l| l.strip_prefix(open))
            .is_some_and(|rest| !rest.contains(close))
    }

    /// Splice `comment` in above `line`, re-indented with the target line's
    /// leading whitespace. Returns `false` (and leaves the buffer untouched)
    /// when `line` is past the end of the buffer.
    pub fn insert_comment(&mut self, line: usize, comment: &str) -> bool {
        if line > self.lines.len() {
            return false;
        }

        let target = self.lines.get(line).or_else(|| self.lines.last());
        let indent = self.lines.get(line).map_or("", |l| leading_indent(l)).to_string();
        let eol = if target.is_some_and(|l| l.ends_with('\r')) { "\r" } else { "" };

        let rendered: Vec<String> = comment
            .split('\n')
            .map(|c| format!("{indent}{}{eol}", c.trim_end_matches('\r')))
            .collect();
        self.lines.splice(line..line, rendered);
        true
    }

    pub fn into_string(self) -> String {
        self.lines.join("\n")
    }
}

/// Leading run of spaces and tabs, verbatim.
pub fn leading_indent(line: &str) -> &str {
    let end = line
        .find(|c: char| c != ' ' && c != '\t')
        .unwrap_or(line.len());
    &line[..end]
}
