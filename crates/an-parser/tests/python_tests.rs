#[cfg(test)]
mod python_tests {
    use an_core::UnitKind;
    use an_parser::parse_file;
    use an_parser::error::ParserError;

    fn parse(source: &str) -> an_parser::ParseOutput {
        parse_file("src/example.py", source.as_bytes()).expect("parse should succeed")
    }

    const SOURCE: &str = r#"import os

class Greeter:
    def __init__(self, name):
        self.name = name

    @staticmethod
    def hello():
        return "hi"

def main():
    pass
"#;

    #[test]
    fn extracts_class_and_methods() {
        let out = parse(SOURCE);
        let summary: Vec<_> = out.units.iter().map(|u| (u.kind, u.name.as_str())).collect();
        assert_eq!(
            summary,
            vec![
                (UnitKind::Class, "Greeter"),
                (UnitKind::Method, "__init__"),
                (UnitKind::Method, "hello"),
                (UnitKind::Function, "main"),
            ]
        );
    }

    #[test]
    fn line_ranges_are_zero_based_inclusive() {
        let out = parse(SOURCE);
        let class = &out.units[0];
        assert_eq!((class.start_line, class.end_line), (2, 8));
        let init = &out.units[1];
        assert_eq!((init.start_line, init.end_line), (3, 4));
        let main = &out.units[3];
        assert_eq!((main.start_line, main.end_line), (10, 11));
    }

    #[test]
    fn decorated_definition_anchors_at_decorator() {
        let out = parse(SOURCE);
        let hello = &out.units[2];
        assert_eq!(hello.start_line, 6);
        assert!(hello.text.starts_with("@staticmethod"));
    }

    #[test]
    fn nested_function_is_not_a_method() {
        let source = "class A:\n    def outer(self):\n        def inner():\n            pass\n        return inner\n";
        let out = parse(source);
        let inner = out.units.iter().find(|u| u.name == "inner").unwrap();
        assert_eq!(inner.kind, UnitKind::Function);
        let outer = out.units.iter().find(|u| u.name == "outer").unwrap();
        assert_eq!(outer.kind, UnitKind::Method);
    }

    #[test]
    fn lambdas_and_assignments_are_not_units() {
        let out = parse("square = lambda x: x * x\ncount = 0\n");
        assert!(out.units.is_empty());
    }

    #[test]
    fn unsupported_extension_rejected_before_content_checks() {
        let err = parse_file("notes.txt", b"\x00\x01").unwrap_err();
        assert!(matches!(err, ParserError::UnsupportedLanguage { .. }));
    }

    #[test]
    fn binary_content_rejected() {
        let err = parse_file("bin.py", b"x = 1\x00").unwrap_err();
        assert!(matches!(err, ParserError::InvalidEncoding { .. }));
    }
}
