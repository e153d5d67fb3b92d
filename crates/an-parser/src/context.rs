use an_core::{Language, SyntaxUnit};

/// Default number of lines taken on each side of a unit.
pub const DEFAULT_WINDOW: usize = 5;

/// Build the text surrounding a unit: up to `window` lines before its first
/// line and up to `window` lines after its last line, clipped to the buffer.
///
/// Operates on the original buffer only. Each segment is omitted when empty;
/// with neither present the result is empty.
pub fn build_context(source: &str, unit: &SyntaxUnit, window: usize) -> String {
    let lines: Vec<&str> = source.split('\n').collect();
    let start = unit.start_line.min(lines.len());
    let after_start = (unit.end_line + 1).min(lines.len());
    let after_end = (unit.end_line + 1 + window).min(lines.len());

    let before = &lines[start.saturating_sub(window)..start];
    let after = &lines[after_start..after_end];

    let mut parts = Vec::with_capacity(2);
    if !before.is_empty() {
        parts.push(format!("// Before:\n{}", before.join("\n")));
    }
    if !after.is_empty() {
        parts.push(format!("// After:\n{}", after.join("\n")));
    }
    parts.join("\n\n")
}

/// Collect the import lines of a file, used as extra grounding in prompts.
pub fn extract_imports(source: &str, language: Language) -> String {
    let mut imports = Vec::new();

    match language {
        Language::Go => {
            let mut in_block = false;
            for line in source.lines() {
                let trimmed = line.trim();
                if trimmed.starts_with("import (") {
                    in_block = true;
                    imports.push(line);
                } else if in_block {
                    imports.push(line);
                    if trimmed == ")" {
                        in_block = false;
                    }
                } else if trimmed.starts_with("import ") {
                    imports.push(line);
                }
            }
        }
        Language::Python => {
            imports.extend(source.lines().filter(|line| {
                let trimmed = line.trim();
                trimmed.starts_with("import ") || trimmed.starts_with("from ")
            }));
        }
        Language::JavaScript | Language::TypeScript => {
            imports.extend(source.lines().filter(|line| {
                let trimmed = line.trim();
                trimmed.starts_with("import ")
                    || (trimmed.starts_with("const ") && trimmed.contains("require("))
            }));
        }
    }

    imports.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use an_core::UnitKind;

    fn unit(start_line: usize, end_line: usize) -> SyntaxUnit {
        SyntaxUnit {
            kind: UnitKind::Function,
            name: "f".to_string(),
            start_line,
            end_line,
            byte_range: 0..0,
            text: String::new(),
        }
    }

    fn numbered(n: usize) -> String {
        (0..n).map(|i| format!("l{i}")).collect::<Vec<_>>().join("\n")
    }

    #[test]
    fn window_in_the_middle() {
        let src = numbered(20);
        let ctx = build_context(&src, &unit(8, 10), 2);
        assert_eq!(ctx, "// Before:\nl6\nl7\n\n// After:\nl11\nl12");
    }

    #[test]
    fn clipped_at_start() {
        let src = numbered(10);
        let ctx = build_context(&src, &unit(1, 1), 5);
        assert!(ctx.starts_with("// Before:\nl0\n\n// After:\nl2"));
        assert!(ctx.ends_with("l6"));
    }

    #[test]
    fn no_before_segment_on_first_line() {
        let src = numbered(4);
        let ctx = build_context(&src, &unit(0, 1), 5);
        assert_eq!(ctx, "// After:\nl2\nl3");
    }

    #[test]
    fn no_after_segment_on_last_line() {
        let src = numbered(4);
        let ctx = build_context(&src, &unit(2, 3), 1);
        assert_eq!(ctx, "// Before:\nl1");
    }

    #[test]
    fn whole_file_unit_has_empty_context() {
        let src = numbered(3);
        assert_eq!(build_context(&src, &unit(0, 2), 5), "");
    }

    #[test]
    fn zero_window_is_empty() {
        let src = numbered(10);
        assert_eq!(build_context(&src, &unit(4, 5), 0), "");
    }

    #[test]
    fn go_imports() {
        let src = "package main\n\nimport (\n\t\"fmt\"\n\t\"os\"\n)\n\nimport \"strings\"\n\nfunc main() {}\n";
        let imports = extract_imports(src, Language::Go);
        assert_eq!(imports, "import (\n\t\"fmt\"\n\t\"os\"\n)\nimport \"strings\"");
    }

    #[test]
    fn python_imports() {
        let src = "import os\nfrom sys import argv\n\ndef main():\n    pass\n";
        assert_eq!(extract_imports(src, Language::Python), "import os\nfrom sys import argv");
    }

    #[test]
    fn script_imports_and_requires() {
        let src = "import fs from 'fs';\nconst path = require('path');\nconst x = 1;\n";
        assert_eq!(
            extract_imports(src, Language::JavaScript),
            "import fs from 'fs';\nconst path = require('path');"
        );
    }
}
