use std::ops::Range;
use std::path::Path;

use an_core::{Language, SyntaxUnit, UnitKind};

use crate::error::ParserError;
use crate::file_check::check_source;
use crate::registry::ParserRegistry;

/// The node capabilities the extractor depends on. Implemented for
/// tree-sitter nodes; any other concrete syntax tree can plug in.
pub trait SyntaxNode: Copy {
    fn kind(&self) -> &str;
    fn byte_range(&self) -> Range<usize>;
    /// 0-indexed first row.
    fn start_row(&self) -> usize;
    /// 0-indexed last row that holds part of the node.
    fn end_row(&self) -> usize;
    fn children(&self) -> Vec<Self>;
    fn parent(&self) -> Option<Self>;
}

impl SyntaxNode for tree_sitter::Node<'_> {
    fn kind(&self) -> &str {
        tree_sitter::Node::kind(self)
    }

    fn byte_range(&self) -> Range<usize> {
        self.start_byte()..self.end_byte()
    }

    fn start_row(&self) -> usize {
        self.start_position().row
    }

    fn end_row(&self) -> usize {
        // A node that swallows its trailing newline ends at column 0 of the
        // following row; that row holds none of its text.
        let end = self.end_position();
        if end.column == 0 && end.row > self.start_position().row {
            end.row - 1
        } else {
            end.row
        }
    }

    fn children(&self) -> Vec<Self> {
        let mut cursor = self.walk();
        tree_sitter::Node::children(self, &mut cursor).collect()
    }

    fn parent(&self) -> Option<Self> {
        tree_sitter::Node::parent(self)
    }
}

/// Output of parsing a single file.
#[derive(Debug)]
pub struct ParseOutput {
    pub language: Language,
    /// Commentable units in document (pre-order) order.
    pub units: Vec<SyntaxUnit>,
    /// The tree contained ERROR or MISSING nodes.
    pub has_errors: bool,
}

/// Value kinds that make a variable binding a function binding.
const FUNCTION_VALUES: &[&str] = &[
    "arrow_function",
    "function_expression",
    "function",
    "generator_function",
];

/// Child kinds that carry a unit's identifier.
const NAME_KINDS: &[&str] = &[
    "identifier",
    "name",
    "type_identifier",
    "property_identifier",
    "field_identifier",
];

/// Wrappers the name lookup descends through, one level deep.
const DECLARATOR_KINDS: &[&str] = &[
    "function_declarator",
    "declarator",
    "variable_declarator",
    "type_spec",
    "type_alias",
];

/// Parse a source file and extract its commentable units.
///
/// The language is resolved from `file_path` before the content is looked at,
/// so unsupported files fail with `UnsupportedLanguage` first.
pub fn parse_file(file_path: &str, content: &[u8]) -> Result<ParseOutput, ParserError> {
    let (language, ext) = ParserRegistry::resolve(Path::new(file_path))?;
    let source = check_source(file_path, content)?;
    parse_source(file_path, source, language, &ext)
}

/// Parse already-validated UTF-8 source with the grammar for `ext`.
pub fn parse_source(
    file_path: &str,
    source: &str,
    language: Language,
    ext: &str,
) -> Result<ParseOutput, ParserError> {
    let mut parser = ParserRegistry::parser_for(language, ext, file_path)?;
    let tree = parser
        .parse(source, None)
        .ok_or_else(|| ParserError::ParseFailed {
            path: file_path.to_string(),
            reason: "tree-sitter returned no tree".to_string(),
        })?;

    let root = tree.root_node();
    let has_errors = root.has_error();
    if has_errors {
        tracing::debug!(path = file_path, "syntax tree contains errors");
    }

    let units = extract_units(root, source, language);
    tracing::debug!(path = file_path, units = units.len(), "units extracted");

    Ok(ParseOutput {
        language,
        units,
        has_errors,
    })
}

/// Node kinds whose interior is literal text: a line that begins inside one
/// cannot take a line comment without changing the string or the markup.
const LITERAL_KINDS: &[&str] = &[
    "string",
    "template_string",
    "raw_string_literal",
    "interpreted_string_literal",
    "jsx_element",
    "jsx_fragment",
    "jsx_opening_element",
    "jsx_self_closing_element",
    "jsx_text",
];

/// Kinds that switch back to code inside a literal (`{..}` in JSX, `${..}`).
const EMBEDDED_CODE_KINDS: &[&str] = &["jsx_expression", "template_substitution", "interpolation"];

/// Walk the tree in pre-order and collect every node that qualifies as a unit.
///
/// Descendants of a qualifying node are still visited, so methods inside a
/// class are extracted alongside the class itself. A unit whose first line
/// begins inside string or JSX text is dropped, since nothing can be inserted
/// above it.
pub fn extract_units<N: SyntaxNode>(root: N, source: &str, language: Language) -> Vec<SyntaxUnit> {
    let mut units = Vec::new();
    let mut spans: Vec<(Range<usize>, bool)> = Vec::new();
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        let kind = node.kind();
        if LITERAL_KINDS.contains(&kind) {
            spans.push((node.byte_range(), true));
        } else if EMBEDDED_CODE_KINDS.contains(&kind) {
            spans.push((node.byte_range(), false));
        }
        if let Some(kind) = classify(node, language) {
            units.push(build_unit(node, kind, source, language));
        }
        stack.extend(node.children().into_iter().rev());
    }

    units.retain(|unit| {
        let line_start = first_code_byte(source, unit.byte_range.start);
        let inside = inside_literal(line_start, &spans);
        if inside {
            tracing::debug!(
                unit = unit.display_name(),
                line = unit.start_line + 1,
                "line starts inside literal text, not commentable"
            );
        }
        !inside
    });
    units
}

/// Offset of the first non-blank byte on the line holding `offset`.
fn first_code_byte(source: &str, offset: usize) -> usize {
    let head = source.get(..offset).unwrap_or(source);
    let line_start = head.rfind('\n').map_or(0, |i| i + 1);
    let indent = source[line_start..]
        .bytes()
        .take_while(|b| *b == b' ' || *b == b'\t')
        .count();
    line_start + indent
}

/// Whether `pos` lies strictly inside a literal span, with no embedded-code
/// span nested closer around it.
fn inside_literal(pos: usize, spans: &[(Range<usize>, bool)]) -> bool {
    spans
        .iter()
        .filter(|(range, _)| range.start < pos && pos < range.end)
        .min_by_key(|(range, _)| range.end - range.start)
        .is_some_and(|(_, literal)| *literal)
}

fn classify<N: SyntaxNode>(node: N, language: Language) -> Option<UnitKind> {
    match node.kind() {
        "function_declaration" | "function_definition" | "generator_function_declaration" => {
            if language == Language::Python && is_python_method(node) {
                Some(UnitKind::Method)
            } else {
                Some(UnitKind::Function)
            }
        }
        "method_declaration" | "method_definition" => Some(UnitKind::Method),
        "class_definition" | "class_declaration" | "abstract_class_declaration" => {
            Some(UnitKind::Class)
        }
        "type_declaration" | "type_alias_declaration" => Some(UnitKind::Type),
        "interface_declaration" => Some(UnitKind::Interface),
        "struct_type" => Some(UnitKind::Struct),
        "function" | "function_expression" | "arrow_function" | "generator_function" => {
            Some(UnitKind::AnonymousFunction)
        }
        "lexical_declaration" | "variable_declaration"
            if is_top_level(node) && binds_function(node) =>
        {
            Some(UnitKind::Binding)
        }
        _ => None,
    }
}

/// A Python def whose nearest enclosing definition is a class.
fn is_python_method<N: SyntaxNode>(node: N) -> bool {
    let mut current = node.parent();
    while let Some(parent) = current {
        match parent.kind() {
            "class_definition" => return true,
            "function_definition" => return false,
            _ => current = parent.parent(),
        }
    }
    false
}

fn is_top_level<N: SyntaxNode>(node: N) -> bool {
    matches!(
        node.parent().map(|p| p.kind() == "program" || p.kind() == "export_statement"),
        Some(true)
    )
}

fn binds_function<N: SyntaxNode>(node: N) -> bool {
    node.children()
        .into_iter()
        .filter(|c| c.kind() == "variable_declarator")
        .any(|decl| {
            decl.children()
                .iter()
                .any(|v| FUNCTION_VALUES.contains(&v.kind()))
        })
}

fn build_unit<N: SyntaxNode>(node: N, kind: UnitKind, source: &str, language: Language) -> SyntaxUnit {
    // Decorators belong to the definition; anchor above the first one.
    let anchor = match node.parent() {
        Some(p) if language == Language::Python && p.kind() == "decorated_definition" => p,
        _ => node,
    };

    let start = anchor.byte_range().start;
    let end = node.byte_range().end;
    let start_line = anchor.start_row();

    let name = if node.kind() == "arrow_function" {
        String::new()
    } else {
        extract_name(node, source, 0)
    };

    SyntaxUnit {
        kind,
        name,
        start_line,
        end_line: node.end_row().max(start_line),
        byte_range: start..end,
        text: source.get(start..end).unwrap_or("").to_string(),
    }
}

/// Find the identifier among the immediate children, descending through a
/// declarator wrapper at most once.
fn extract_name<N: SyntaxNode>(node: N, source: &str, depth: usize) -> String {
    for child in node.children() {
        let kind = child.kind();
        if NAME_KINDS.contains(&kind) {
            return source.get(child.byte_range()).unwrap_or("").to_string();
        }
        if depth == 0 && DECLARATOR_KINDS.contains(&kind) {
            return extract_name(child, source, depth + 1);
        }
    }
    String::new()
}
