//! Binder integration tests.
//!
//! Runs the parse -> declare -> bind pipeline over small Mew programs and
//! checks the semantic diagnostics, the resolved symbols and the lowered
//! control flow.

use mew_binder::*;
use mew_diagnostics::DiagnosticCollection;
use mew_parser::SyntaxTree;
use mew_syntax::Statement;
use std::sync::Arc;

/// Everything the binder produced for one program.
struct Bound {
    symbols: SymbolArena,
    global: BoundGlobalScope,
    bodies: Vec<(FunctionId, BoundStatement)>,
    statements: Vec<BoundStatement>,
    diagnostics: DiagnosticCollection,
}

/// Helper: parse `source` and bind it the way a compilation does.
fn bind(source: &str) -> Bound {
    let trees = vec![Arc::new(SyntaxTree::parse("test.mew", source))];
    let mut symbols = SymbolArena::default();
    let mut global = bind_global_scope(&trees, &mut symbols, DEFAULT_LIBRARY);

    let mut diagnostics = trees[0].diagnostics().clone();
    diagnostics.extend(global.diagnostics().clone());

    let functions: Vec<FunctionId> = symbols
        .functions()
        .filter(|(_, symbol)| !symbol.is_external())
        .map(|(id, _)| id)
        .collect();

    let mut bodies = Vec::new();
    for id in functions {
        let Some(declaration) = function_declaration(&trees, symbols.function(id)) else {
            continue;
        };
        let mut binder = Binder::for_function(&global, &mut symbols, id, Arc::clone(trees[0].path()));
        let body = binder.bind_statement(&declaration.body);
        diagnostics.extend(binder.take_diagnostics());
        bodies.push((id, body));
    }

    let mut binder = Binder::new(&global, &mut symbols);
    binder.set_tree(TreeId(0), Arc::clone(trees[0].path()));
    let statements: Vec<BoundStatement> = trees[0]
        .root()
        .statements
        .iter()
        .filter(|s| {
            !matches!(
                s,
                Statement::FunctionDeclaration(_) | Statement::ExternalFunctionDeclaration(_)
            )
        })
        .map(|s| binder.bind_statement(s))
        .collect();
    diagnostics.extend(binder.take_diagnostics());
    let variables = binder.root_variables();
    drop(binder);
    global.set_variables(variables);

    Bound {
        symbols,
        global,
        bodies,
        statements,
        diagnostics,
    }
}

/// Helper: the diagnostic summaries of a program.
fn errors(source: &str) -> Vec<String> {
    bind(source).diagnostics.iter().map(|d| d.summary()).collect()
}

/// Helper: assert that `source` binds with exactly one diagnostic, `message`.
fn assert_single_error(source: &str, message: &str) {
    assert_eq!(errors(source), vec![format!("Error: {message}")], "source: {:?}", source);
}

/// Helper: assert that `source` binds without diagnostics.
fn assert_no_errors(source: &str) {
    let errors = errors(source);
    assert!(errors.is_empty(), "source: {:?}\nerrors: {:#?}", source, errors);
}

/// Helper: one line per statement of a lowered, flattened body.
fn outline(statements: &[BoundStatement]) -> Vec<String> {
    flatten_all(&lower_all(statements))
        .iter()
        .map(|s| match s {
            BoundStatement::Goto(n) => format!("goto {}", n.label),
            BoundStatement::ConditionalGoto(n) if n.jump_if_true => format!("gotoTrue {}", n.label),
            BoundStatement::ConditionalGoto(n) => format!("gotoFalse {}", n.label),
            BoundStatement::Label(n) => format!("{}:", n.label),
            other => other.kind_name().to_string(),
        })
        .collect()
}

/// Helper: the initializer of the `index`th top-level statement, a `let`.
fn initializer(bound: &Bound, index: usize) -> &BoundExpression {
    match &bound.statements[index] {
        BoundStatement::Let(statement) => &statement.initializer,
        other => panic!("expected a let statement, got {}", other.kind_name()),
    }
}

// ============================================================================
// Operators
// ============================================================================

#[test]
fn test_binary_operator_type_mismatch() {
    let bound = bind("let foo = 1 + false;");
    assert_eq!(bound.diagnostics.len(), 1);

    let diagnostic = &bound.diagnostics.diagnostics()[0];
    assert_eq!(
        diagnostic.summary(),
        "Error: Binary operator '+' is not defined for types 'int' and 'bool'"
    );
    assert_eq!(diagnostic.code_string(), "MEW1105");
    let notes: Vec<&str> = diagnostic.notes.iter().map(|n| n.message.as_str()).collect();
    assert_eq!(notes, vec!["This is of type 'int'", "This is of type 'bool'"]);
    assert!(initializer(&bound, 0).is_error());
}

#[test]
fn test_binary_operators_are_typed() {
    let bound = bind("let a = 1 + 2 * 3; let b = 1 < 2; let c = \"a\" + \"b\"; let d = true == false;");
    assert!(bound.diagnostics.is_empty());
    let types: Vec<TypeId> = (0..4).map(|i| initializer(&bound, i).ty()).collect();
    assert_eq!(types, vec![TypeId::INT, TypeId::BOOL, TypeId::STRING, TypeId::BOOL]);
}

#[test]
fn test_logical_operator_type_mismatch() {
    assert_single_error(
        "let a = 1 && true;",
        "Logical operator '&&' is not defined for types 'int' and 'bool'",
    );
}

#[test]
fn test_unary_operator_type_mismatch() {
    assert_single_error("let a = -true;", "Unary operator '-' is not defined for type 'bool'");
    assert_single_error("let a = !1;", "Unary operator '!' is not defined for type 'int'");
}

#[test]
fn test_errors_are_reported_once() {
    assert_single_error("let a = (1 + true) * 2;", "Binary operator '+' is not defined for types 'int' and 'bool'");
    assert_single_error("let b = -missing;", "Undeclared variable 'missing'");
    assert_single_error("let c = missing && true;", "Undeclared variable 'missing'");
    assert_single_error("let d = missing + 1 + 2;", "Undeclared variable 'missing'");
}

// ============================================================================
// Variables and scopes
// ============================================================================

#[test]
fn test_variable_redeclaration() {
    let bound = bind("let foo = 1; let foo = 32;");
    let summaries: Vec<String> = bound.diagnostics.iter().map(|d| d.summary()).collect();
    assert_eq!(summaries, vec!["Error: Variable 'foo' has already been declared"]);
    // The span points at the second name.
    assert_eq!(bound.diagnostics.diagnostics()[0].span().start, 17);
}

#[test]
fn test_undeclared_variable() {
    assert_single_error("let a = b;", "Undeclared variable 'b'");
}

#[test]
fn test_initializer_does_not_see_its_own_variable() {
    assert_single_error("let x = x;", "Undeclared variable 'x'");
}

#[test]
fn test_inner_scope_shadows_outer() {
    assert_no_errors("let x = 1; { let x = \"s\"; let y = x + \"t\"; } let z = x + 1;");
}

#[test]
fn test_block_variables_are_not_visible_outside() {
    assert_single_error("{ let inner = 1; } let outer = inner;", "Undeclared variable 'inner'");
}

#[test]
fn test_function_used_as_variable() {
    assert_single_error("fn f() {} let y = f;", "'f' is not a variable");
}

#[test]
fn test_assignment_type_mismatch() {
    assert_single_error("let x = 1; x = \"s\";", "Cannot convert type 'string' to 'int'");
}

#[test]
fn test_assignment_to_undeclared_variable() {
    assert_single_error("y = 1;", "Undeclared variable 'y'");
}

#[test]
fn test_top_level_variables_are_published() {
    let bound = bind("let a = 1; { let b = 2; } let c = true;");
    let names: Vec<&str> = bound
        .global
        .variables()
        .iter()
        .map(|&v| bound.symbols.variable(v).name_text.as_str())
        .collect();
    assert_eq!(names, vec!["a", "c"]);
    assert_eq!(bound.symbols.variable(bound.global.variables()[1]).ty, TypeId::BOOL);
}

// ============================================================================
// Functions
// ============================================================================

#[test]
fn test_overload_resolution_by_argument_types() {
    let bound = bind("fn bar(baz: int) {} fn bar(baz: int, qux: string) {} bar(32, \"hello\");");
    assert!(bound.diagnostics.is_empty());

    let BoundStatement::Expression(statement) = &bound.statements[0] else {
        panic!("expected an expression statement");
    };
    let BoundExpression::FunctionCall(call) = &statement.expression else {
        panic!("expected a function call");
    };
    assert_eq!(bound.symbols.function_signature(call.function), "bar(baz: int, qux: string) -> void");
    assert_eq!(call.ty, TypeId::VOID);
}

#[test]
fn test_duplicate_function_signature() {
    assert_single_error("fn f(a: int) {} fn f(b: int) {}", "Function 'f' has already been declared");
}

#[test]
fn test_functions_can_be_called_before_their_declaration() {
    let bound = bind("let r = later(1); fn later(a: int) -> int { return a; }");
    assert!(bound.diagnostics.is_empty());
    assert_eq!(initializer(&bound, 0).ty(), TypeId::INT);
}

#[test]
fn test_undeclared_parameter_type() {
    let bound = bind("fn f(a: foo, b: foo) {}");
    let summaries: Vec<String> = bound.diagnostics.iter().map(|d| d.summary()).collect();
    assert_eq!(
        summaries,
        vec!["Error: Undeclared type 'foo'", "Error: Undeclared type 'foo'"]
    );

    let (function, _) = &bound.bodies[0];
    let types: Vec<TypeId> = bound
        .symbols
        .function(*function)
        .parameters
        .iter()
        .map(|&p| bound.symbols.variable(p).ty)
        .collect();
    assert_eq!(types[0], types[1]);
    assert!(bound.symbols.is_error_type(types[0]));
}

#[test]
fn test_duplicate_parameter_name() {
    assert_single_error("fn f(a: int, a: int) {}", "Variable 'a' has already been declared");
}

#[test]
fn test_recovered_parameter_names_are_not_redeclared() {
    for source in ["fn f(: int, : int) {}", "fn f(let: int, if: int) {}"] {
        let bound = bind(source);
        assert!(!bound.diagnostics.is_empty(), "source: {:?}", source);
        assert!(
            bound.diagnostics.iter().all(|d| d.code != 1103),
            "source: {:?}\nerrors: {:#?}",
            source,
            bound.diagnostics.iter().map(|d| d.summary()).collect::<Vec<_>>()
        );

        let arities: Vec<usize> = bound
            .symbols
            .functions()
            .filter(|(_, symbol)| !symbol.is_external())
            .map(|(_, symbol)| symbol.parameters.len())
            .collect();
        assert_eq!(arities, vec![2], "source: {:?}", source);
    }
}

#[test]
fn test_undefined_function() {
    assert_single_error("foo();", "Undefined function 'foo'");
}

#[test]
fn test_variable_called_as_function() {
    assert_single_error("let x = 1; x();", "'x' is not a function");
}

#[test]
fn test_no_overload_with_argument_count() {
    assert_single_error("fn f(a: int) {} f();", "No overload for function 'f' takes 0 arguments");
}

#[test]
fn test_argument_type_mismatch() {
    assert_single_error(
        "fn f(a: int) {} fn f(a: int, b: int) {} f(\"x\");",
        "Cannot convert type 'string' to 'int'",
    );
}

#[test]
fn test_erroneous_argument_is_not_converted() {
    assert_single_error("fn f(a: int) {} f(missing);", "Undeclared variable 'missing'");
}

#[test]
fn test_external_functions() {
    let bound = bind("extern fn print(value: string); print(\"hi\");");
    assert!(bound.diagnostics.is_empty());
    let (_, print) = bound.symbols.functions().next().expect("print is declared");
    assert!(print.is_external());
    assert_eq!(print.library.as_deref(), Some(DEFAULT_LIBRARY));
}

#[test]
fn test_nested_function_declaration() {
    assert_single_error("fn outer() { fn inner() {} }", "Functions can only be declared at the top level");
    assert_single_error("{ extern fn inner(); }", "Functions can only be declared at the top level");
}

// ============================================================================
// Returns
// ============================================================================

#[test]
fn test_return_value_from_void_function() {
    assert_single_error("fn f() { return 1; }", "Enclosing function does not return a value");
}

#[test]
fn test_wrong_return_type() {
    assert_single_error(
        "fn f() -> int { return \"x\"; }",
        "Wrong return type. Expected 'int' but was given 'string'",
    );
}

#[test]
fn test_missing_return_expression() {
    assert_single_error("fn f() -> int { return; }", "An expression of type 'int' was expected");
}

#[test]
fn test_return_uses_parameters() {
    assert_no_errors("fn add(a: int, b: int) -> int { return a + b; }");
}

#[test]
fn test_top_level_return_is_not_checked() {
    assert_no_errors("return 1;");
}

// ============================================================================
// Control flow
// ============================================================================

#[test]
fn test_while_false_is_unreachable() {
    assert_single_error("while(false) { }", "Unreachable code detected");
}

#[test]
fn test_if_with_constant_condition() {
    assert_single_error("if false { }", "Unreachable code detected");
    assert_single_error("if true { } else { }", "Unreachable code detected");
    assert_no_errors("if true { }");
}

#[test]
fn test_condition_must_be_bool() {
    assert_single_error("if 1 { }", "Cannot convert type 'int' to 'bool'");
    assert_single_error("while \"s\" { }", "Cannot convert type 'string' to 'bool'");
}

#[test]
fn test_break_outside_of_loop() {
    assert_single_error("break;", "No enclosing loop out of which to break");
}

#[test]
fn test_continue_outside_of_loop() {
    assert_single_error("continue;", "No enclosing loop out of which to continue");
}

#[test]
fn test_break_in_function_called_from_loop() {
    assert_single_error(
        "fn f() { break; } loop { f(); break; }",
        "No enclosing loop out of which to break",
    );
}

#[test]
fn test_loop_labels_are_numbered_per_context() {
    let bound = bind("while true { break; } loop { continue; }");
    assert!(bound.diagnostics.is_empty());
    let labels: Vec<String> = bound
        .statements
        .iter()
        .map(|s| match s {
            BoundStatement::While(n) => format!("{} {}", n.break_label, n.continue_label),
            BoundStatement::Loop(n) => format!("{} {}", n.break_label, n.continue_label),
            other => other.kind_name().to_string(),
        })
        .collect();
    assert_eq!(labels, vec!["break1 continue1", "break2 continue2"]);
}

// ============================================================================
// Lowering
// ============================================================================

#[test]
fn test_lower_if_else() {
    let bound = bind("let x = 1; if x == 1 { x = 2; } else { x = 3; }");
    assert!(bound.diagnostics.is_empty());
    assert_eq!(
        outline(&bound.statements),
        vec![
            "BoundLetStatement",
            "gotoFalse Label1",
            "BoundExpressionStatement",
            "goto Label2",
            "Label1:",
            "BoundExpressionStatement",
            "Label2:",
        ]
    );
}

#[test]
fn test_lower_loop_with_break() {
    let bound = bind("loop { break; }");
    assert_eq!(
        outline(&bound.statements),
        vec!["continue1:", "goto break1", "goto continue1", "break1:"]
    );
}

#[test]
fn test_lowered_gotos_have_targets() {
    let bound = bind("fn f(n: int) -> int { let i = 0; while i < n { if i == 3 { break; } i = i + 1; } return i; }");
    assert!(bound.diagnostics.is_empty());

    let (_, body) = &bound.bodies[0];
    let flat = flatten(&lower(body));
    let labels = LabelMap::new(&flat.statements);
    for statement in &flat.statements {
        let target = match statement {
            BoundStatement::Goto(n) => &n.label,
            BoundStatement::ConditionalGoto(n) => &n.label,
            _ => continue,
        };
        assert!(labels.position(target).is_ok(), "no label for {}", target);
    }
}
