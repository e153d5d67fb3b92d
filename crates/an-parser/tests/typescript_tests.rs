#[cfg(test)]
mod typescript_tests {
    use an_core::UnitKind;
    use an_parser::parse_file;

    fn parse_ts(source: &str) -> an_parser::ParseOutput {
        parse_file("src/app.ts", source.as_bytes()).expect("parse should succeed")
    }

    fn parse_tsx(source: &str) -> an_parser::ParseOutput {
        parse_file("src/App.tsx", source.as_bytes()).expect("parse should succeed")
    }

    const SOURCE: &str = "interface Config {
  host: string;
}

export class Server {
  start(): void {}
}

export const handler = async (req: Request) => {
  return req;
};

type Id = string;
";

    #[test]
    fn extracts_units_in_document_order() {
        let out = parse_ts(SOURCE);
        let summary: Vec<_> = out
            .units
            .iter()
            .map(|u| (u.kind, u.name.as_str(), u.start_line))
            .collect();
        assert_eq!(
            summary,
            vec![
                (UnitKind::Interface, "Config", 0),
                (UnitKind::Class, "Server", 4),
                (UnitKind::Method, "start", 5),
                (UnitKind::Binding, "handler", 8),
                (UnitKind::AnonymousFunction, "", 8),
                (UnitKind::Type, "Id", 12),
            ]
        );
    }

    #[test]
    fn non_function_bindings_are_skipped() {
        let out = parse_ts("export const MAX_SIZE: number = 100;\nlet count = 0;\n");
        assert!(out.units.is_empty());
    }

    #[test]
    fn nested_bindings_only_yield_the_function() {
        let source = "function outer() {\n  const inner = () => 1;\n  return inner;\n}\n";
        let out = parse_ts(source);
        let kinds: Vec<_> = out.units.iter().map(|u| u.kind).collect();
        assert_eq!(kinds, vec![UnitKind::Function, UnitKind::AnonymousFunction]);
        assert_eq!(out.units[1].start_line, 1);
    }

    #[test]
    fn tsx_parses_without_error() {
        let source = "function App(): JSX.Element {\n    return <div>Hello</div>;\n}\n";
        let out = parse_tsx(source);
        assert!(!out.has_errors);
        assert_eq!(out.units.len(), 1);
        assert_eq!(out.units[0].name, "App");
    }

    const LIST_COMPONENT: &str = "export function List({ items }: Props) {
  return (
    <ul>
      {items.map((item) => {
        const label = () => item.toUpperCase();
        return <li key={item}>{label()}</li>;
      })}
    </ul>
  );
}
";

    #[test]
    fn units_opening_in_jsx_children_are_not_extracted() {
        let out = parse_tsx(LIST_COMPONENT);
        assert!(!out.has_errors);
        let summary: Vec<_> = out.units.iter().map(|u| (u.kind, u.name.as_str(), u.start_line)).collect();
        // The map callback starts on a line that begins in the <ul> children;
        // the binding inside its body is ordinary code again.
        assert_eq!(
            summary,
            vec![(UnitKind::Function, "List", 0), (UnitKind::AnonymousFunction, "", 4)]
        );
    }

    #[test]
    fn exported_function() {
        let out = parse_ts("export function doStuff(): void {}\n");
        assert_eq!(out.units.len(), 1);
        assert_eq!(out.units[0].kind, UnitKind::Function);
        assert_eq!(out.units[0].name, "doStuff");
    }
}
