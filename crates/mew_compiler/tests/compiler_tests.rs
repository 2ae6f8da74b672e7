//! Compiler integration tests.
//!
//! End-to-end tests for the compilation pipeline: parse -> declare -> bind
//! -> lower -> flatten, observed through the semantic model.

use mew_binder::{BoundStatement, LabelMap, SymbolRef, TreeId};
use mew_compiler::printer::print_statements;
use mew_compiler::{Compilation, CompilationOptions, SemanticModel};
use mew_parser::SyntaxTree;
use std::sync::Arc;

/// Helper: build a compilation from one source file.
fn compile(source: &str) -> Compilation {
    Compilation::new("test").add_syntax_tree(Arc::new(SyntaxTree::parse("test.mew", source)))
}

/// Helper: compile a source and return the diagnostic summaries.
fn compile_errors(source: &str) -> Vec<String> {
    compile(source).diagnostics().iter().map(|d| d.summary()).collect()
}

/// Helper: assert that `source` compiles with exactly one diagnostic.
fn assert_single_error(source: &str, message: &str) {
    assert_eq!(compile_errors(source), vec![format!("Error: {message}")], "source: {:?}", source);
}

/// Helper: every goto in a flattened list targets a label of that list.
fn assert_gotos_resolve(statements: &[BoundStatement]) {
    let labels = LabelMap::new(statements);
    for statement in statements {
        let label = match statement {
            BoundStatement::Goto(n) => &n.label,
            BoundStatement::ConditionalGoto(n) => &n.label,
            _ => continue,
        };
        assert!(labels.position(label).is_ok(), "unresolved goto {}", label);
    }
}

const PROGRAM: &str = r#"
extern fn print(value: string);
extern fn print(value: int);

fn fib(n: int) -> int {
    if n < 2 {
        return n;
    }
    return fib(n - 1) + fib(n - 2);
}

fn first_multiple(limit: int, of: int) -> int {
    let i = 1;
    loop {
        if i > limit {
            break;
        }
        if i % of == 0 {
            return i;
        }
        i = i + 1;
    }
    return 0;
}

let total = 0;
let i = 0;
while i < 10 {
    total = total + fib(i);
    i = i + 1;
}
print(total);
print("done");
"#;

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_binary_operator_scenario() {
    assert_single_error(
        "let foo = 1 + false;",
        "Binary operator '+' is not defined for types 'int' and 'bool'",
    );
}

#[test]
fn test_unreachable_while_scenario() {
    assert_single_error("while(false) { }", "Unreachable code detected");
}

#[test]
fn test_break_scenario() {
    assert_single_error("break;", "No enclosing loop out of which to break");
}

#[test]
fn test_redeclaration_scenario() {
    assert_single_error("let foo = 1; let foo = 32;", "Variable 'foo' has already been declared");
}

#[test]
fn test_overload_scenario() {
    let compilation = compile("fn bar(baz: int, qux: string) {} bar(32, \"hello\");");
    assert!(compilation.diagnostics().is_empty());
}

#[test]
fn test_lowering_scenario() {
    let compilation = compile(
        "extern fn print(value: string); let corgi = 3; \
         if corgi == 3 { print(\"Three\"); } else { print(\"Not three!\"); }",
    );
    let model = compilation.semantic_model();
    assert!(model.diagnostics().is_empty());

    let printed = print_statements(model.symbols(), model.statements());
    let lines: Vec<&str> = printed.lines().map(str::trim).collect();
    assert_eq!(
        lines,
        vec![
            "let corgi: int = 3",
            "gotoFalse Label1 (corgi == 3)",
            "print(\"Three\")",
            "goto Label2",
            "Label1:",
            "print(\"Not three!\")",
            "Label2:",
        ]
    );
}

// ============================================================================
// Whole programs
// ============================================================================

#[test]
fn test_program_compiles_cleanly() {
    let model = compile(PROGRAM).semantic_model();
    assert!(model.diagnostics().is_empty(), "{:#?}", model.diagnostics());
    assert_eq!(model.external_functions().len(), 2);
    assert_eq!(model.functions().len(), 2);

    for body in model.functions().values() {
        assert_gotos_resolve(&body.statements);
    }
    assert_gotos_resolve(model.statements());
}

#[test]
fn test_no_structured_statements_survive() {
    let model = compile(PROGRAM).semantic_model();
    let all = model
        .functions()
        .values()
        .flat_map(|body| body.statements.iter())
        .chain(model.statements());
    for statement in all {
        assert!(
            !matches!(
                statement,
                BoundStatement::Block(_) | BoundStatement::If(_) | BoundStatement::While(_) | BoundStatement::Loop(_)
            ),
            "unexpected {}",
            statement.kind_name()
        );
    }
}

#[test]
fn test_external_overloads_resolve_by_type() {
    let model = compile(PROGRAM).semantic_model();
    let tree = &model.syntax_trees()[0];
    let calls: Vec<String> = tree
        .root()
        .statements
        .iter()
        .filter_map(|statement| match statement {
            mew_syntax::Statement::Expression(s) => match &s.expression {
                mew_syntax::Expression::FunctionCall(call) => Some(call.name.data.id),
                _ => None,
            },
            _ => None,
        })
        .filter_map(|node| match model.get_symbol(TreeId(0), node) {
            Some(SymbolRef::Function(id)) => Some(model.symbols().function_signature(id)),
            _ => None,
        })
        .collect();
    assert_eq!(
        calls,
        vec!["print(value: int) -> void", "print(value: string) -> void"]
    );
}

#[test]
fn test_binding_is_deterministic() {
    let source = "fn f(a: nope) -> int { return \"x\"; } let y = missing + 1; break; f(1, 2);";
    let summaries = |model: &SemanticModel| -> Vec<(u32, String, u32)> {
        model
            .diagnostics()
            .iter()
            .map(|d| (d.code, d.message_text.clone(), d.span().start))
            .collect()
    };
    let first = compile(source).semantic_model();
    let second = compile(source).semantic_model();
    assert!(!first.diagnostics().is_empty());
    assert_eq!(summaries(&first), summaries(&second));
}

#[test]
fn test_errors_block_a_clean_model() {
    let model = compile("let a = undefined_name;").semantic_model();
    assert!(model.diagnostics().has_errors());
}

#[test]
fn test_long_operator_chains_are_rejected_once() {
    let sum = vec!["1"; 100_000].join(" + ");
    let either = vec!["true"; 20_000].join(" or ");
    let source = format!("let total = {sum};\nlet flag = {either};\nlet ok = 1 + 2;");
    let compilation = compile(&source);
    let codes: Vec<u32> = compilation.diagnostics().iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![1039, 1039]);

    let model = compilation.semantic_model();
    assert_eq!(model.global_scope().variables().len(), 3);
}

// ============================================================================
// Multiple files
// ============================================================================

#[test]
fn test_multiple_files_share_functions() {
    let compilation = Compilation::parse_sources(
        "app",
        vec![
            ("main.mew".to_string(), "let x = square(4);".to_string()),
            ("math.mew".to_string(), "fn square(n: int) -> int { return n * n; }".to_string()),
        ],
        CompilationOptions::default(),
    );
    assert!(compilation.diagnostics().is_empty());
    assert_eq!(compilation.semantic_model().global_scope().variables().len(), 1);
}

#[test]
fn test_diagnostics_carry_their_file() {
    let compilation = Compilation::parse_sources(
        "app",
        vec![
            ("ok.mew".to_string(), "let x = 1;".to_string()),
            ("bad.mew".to_string(), "let y = nope;".to_string()),
        ],
        CompilationOptions::default(),
    );
    let paths: Vec<&str> = compilation.diagnostics().iter().map(|d| &*d.location.path).collect();
    assert_eq!(paths, vec!["bad.mew"]);
}

#[test]
fn test_top_level_labels_do_not_collide_across_files() {
    let compilation = Compilation::parse_sources(
        "app",
        vec![
            ("a.mew".to_string(), "if true { }".to_string()),
            ("b.mew".to_string(), "if true { }".to_string()),
        ],
        CompilationOptions::default(),
    );
    let model = compilation.semantic_model();
    let labels: Vec<String> = model
        .statements()
        .iter()
        .filter_map(|s| match s {
            BoundStatement::Label(n) => Some(n.label.to_string()),
            _ => None,
        })
        .collect();
    assert_eq!(labels, vec!["Label1", "Label2"]);
}

#[test]
fn test_custom_library_name() {
    let options = CompilationOptions {
        library: "host".to_string(),
        ..CompilationOptions::default()
    };
    let compilation = Compilation::with_options("app", options)
        .add_syntax_tree(Arc::new(SyntaxTree::parse("a.mew", "extern fn now() -> int;")));
    let model = compilation.semantic_model();
    let now = model.symbols().function(model.external_functions()[0]);
    assert_eq!(now.library.as_deref(), Some("host"));
}
