//! Unit tests for the parser module.

use crate::{
    ast::{
        ast::Module,
        expressions::ExprKind,
        statements::StmtKind,
    },
    config::CompileOptions,
    errors::errors::Diagnostics,
    lexer::lexer::tokenize,
};

use super::{
    expr::parse_expr,
    parser::{parse, Parser},
};

/// Parses `source` as a single expression and renders it fully
/// parenthesized. Fails the test on any diagnostic.
fn expr(source: &str) -> String {
    let (tokens, _) = tokenize(source, Some("test.c".to_string()));
    let mut diagnostics = Diagnostics::default();
    let mut parser = Parser::new(&tokens, &mut diagnostics, false);
    let rendered = parse_expr(&mut parser).map(|e| e.to_string());
    assert!(parser.is_next(crate::lexer::tokens::TokenKind::EOF));

    assert!(
        !diagnostics.has_errors(),
        "unexpected diagnostics: {:?}",
        diagnostics.errors()
    );
    rendered.unwrap()
}

fn module(source: &str) -> (Module, Diagnostics) {
    let (tokens, _) = tokenize(source, Some("test.c".to_string()));
    let mut diagnostics = Diagnostics::default();
    let module = parse(&tokens, &mut diagnostics, &CompileOptions::default());
    (module, diagnostics)
}

#[test]
fn test_left_associativity() {
    assert_eq!(expr("1 - 2 - 3"), "((1 - 2) - 3)");
    assert_eq!(expr("8 / 4 / 2"), "((8 / 4) / 2)");
}

#[test]
fn test_unary_binds_tighter_than_binary() {
    assert_eq!(expr("-1 + 2"), "((-1) + 2)");
    assert_eq!(expr("!a && b"), "((!a) && b)");
}

#[test]
fn test_precedence_levels() {
    assert_eq!(expr("1 + 2 * 3"), "(1 + (2 * 3))");
    assert_eq!(expr("(1 + 2) * 3"), "((1 + 2) * 3)");
    assert_eq!(expr("x << 2 < y"), "((x << 2) < y)");
    assert_eq!(expr("a < b == c"), "((a < b) == c)");
    assert_eq!(expr("a || b && c"), "(a || (b && c))");
}

#[test]
fn test_bitwise_operator_order() {
    // `&` binds tightest, then `|`, then `^`
    assert_eq!(expr("a & b | c ^ d"), "(((a & b) | c) ^ d)");
    assert_eq!(expr("a ^ b | c"), "(a ^ (b | c))");
}

#[test]
fn test_assignment_is_right_associative() {
    assert_eq!(expr("a = b = c"), "(a = (b = c))");
    assert_eq!(expr("a += b * 2"), "(a += (b * 2))");
}

#[test]
fn test_conditional() {
    assert_eq!(expr("a ? b : c"), "(a ? b : c)");
    assert_eq!(expr("a ? b : c ? d : e"), "(a ? b : (c ? d : e))");
    assert_eq!(expr("x = a ? b : c"), "(x = (a ? b : c))");
    assert_eq!(expr("a || b ? 1 : 2"), "((a || b) ? 1 : 2)");
}

#[test]
fn test_comma_chain_leans_right() {
    assert_eq!(expr("1, 2, 3"), "1, 2, 3");
}

#[test]
fn test_postfix_and_prefix_forms() {
    assert_eq!(expr("*p++"), "(*(p++))");
    assert_eq!(expr("-a[1]"), "(-a[1])");
    assert_eq!(expr("&x"), "(&x)");
    assert_eq!(expr("++i"), "(++i)");
    assert_eq!(expr("a[i + 1]"), "a[(i + 1)]");
    assert_eq!(expr("s.field"), "s.field");
    assert_eq!(expr("p->next"), "p->next");
}

#[test]
fn test_calls() {
    assert_eq!(expr("f()"), "f()");
    assert_eq!(expr("f(1, 2 + 3, g())"), "f(1, (2 + 3), g())");
}

#[test]
fn test_call_arguments_are_flattened() {
    let (tokens, _) = tokenize("sum(a, b * 2, c)", None);
    let mut diagnostics = Diagnostics::default();
    let mut parser = Parser::new(&tokens, &mut diagnostics, false);
    let call = parse_expr(&mut parser).unwrap();

    let args: Vec<String> = call.call_arguments().iter().map(|a| a.to_string()).collect();
    assert_eq!(args, vec!["a", "(b * 2)", "c"]);
}

#[test]
fn test_casts_and_sizeof() {
    assert_eq!(expr("(int) x + 1"), "(((int) x) + 1)");
    assert_eq!(expr("(char*) p"), "((char*) p)");
    assert_eq!(expr("sizeof(int)"), "sizeof(int)");
    assert_eq!(expr("sizeof x"), "(sizeof x)");
    assert_eq!(expr("sizeof(x)"), "(sizeof x)");
}

#[test]
fn test_literals() {
    assert_eq!(expr("0x123"), "291");
    assert_eq!(expr("017"), "15");
    assert_eq!(expr("0"), "0");
    assert_eq!(expr("1.5"), "1.5");
    assert_eq!(expr("'a'"), "'a'");
    assert_eq!(expr("\"hi\""), "\"hi\"");
    assert_eq!(expr("true"), "true");
}

#[test]
fn test_global_with_hex_initializer() {
    let (module, diagnostics) = module("int a = 0x123;");

    assert!(!diagnostics.has_errors());
    assert_eq!(module.globals.len(), 1);

    let global = &module.globals[0];
    assert_eq!(global.name, "a");
    assert_eq!(global.data_type.name(), "int");
    assert!(matches!(
        global.initializer.as_ref().map(|e| &e.kind),
        Some(ExprKind::Number(291))
    ));
}

#[test]
fn test_pointer_and_array_declarations() {
    let (module, diagnostics) = module("char *ptr; int grid[4][2];");

    assert!(!diagnostics.has_errors());
    assert_eq!(module.globals[0].data_type.name(), "char*");

    let grid = &module.globals[1].data_type;
    assert_eq!(grid.length(), 4);
    assert_eq!(grid.nested().map(|n| n.length()), Some(2));
}

#[test]
fn test_array_lengths_use_integer_literal_forms() {
    let (module, diagnostics) = module("int a[0x10]; int b[010]; char c[7][0X2];");

    assert!(!diagnostics.has_errors(), "{:?}", diagnostics.errors());
    assert_eq!(module.globals[0].data_type.length(), 16);
    assert_eq!(module.globals[1].data_type.length(), 8);
    assert_eq!(module.globals[2].data_type.name(), "char[7][2]");
}

#[test]
fn test_oversized_array_is_rejected() {
    let (parsed, diagnostics) = module("int a[2305843009213693952];");
    assert_eq!(diagnostics.error_count(), 1);
    assert_eq!(
        diagnostics.errors()[0].to_string(),
        "test.c:1: parsing error: invalid numeric literal '2305843009213693952'"
    );
    assert_eq!(parsed.globals[0].data_type.name(), "int");

    // each dimension fits on its own, their product does not
    let (_, diagnostics) = module("char b[4294967296][4294967296];");
    assert_eq!(diagnostics.error_count(), 1);
    assert_eq!(
        diagnostics.errors()[0].get_internal_error().to_string(),
        "invalid numeric literal '4294967296'"
    );

    let (_, diagnostics) = module("char c[9223372036854775808];");
    assert_eq!(diagnostics.error_count(), 1);

    let (parsed, diagnostics) = module("char d[9223372036854775807];");
    assert!(!diagnostics.has_errors());
    assert_eq!(parsed.globals[0].data_type.length(), 9223372036854775807);
}

#[test]
fn test_multibyte_character_literal() {
    let (_, diagnostics) = module("char c = '\u{e9}';");

    assert_eq!(diagnostics.error_count(), 1);
    assert_eq!(
        diagnostics.errors()[0].to_string(),
        "test.c:1: parsing error: character literal '\u{e9}' does not fit in a char"
    );
}

#[test]
fn test_function_definition() {
    let (module, diagnostics) = module("int sum(int a, int b) { return a + b; }");

    assert!(!diagnostics.has_errors());
    assert_eq!(module.functions.len(), 1);

    let function = &module.functions[0];
    assert_eq!(function.name, "sum");
    assert_eq!(function.signature(), "int(int, int)");

    let body = function.body.as_ref().unwrap();
    assert_eq!(body.len(), 1);
    match &body[0].kind {
        StmtKind::Return(Some(value)) => assert_eq!(value.to_string(), "(a + b)"),
        other => panic!("expected return, got {:?}", other),
    }
}

#[test]
fn test_prototypes() {
    let (module, diagnostics) = module("int f(void); char *g(int x, char *s);");

    assert!(!diagnostics.has_errors());
    assert!(!module.functions[0].is_definition());
    assert!(module.functions[0].parameters.is_empty());
    assert_eq!(module.functions[1].signature(), "char*(int, char*)");
}

#[test]
fn test_control_flow_statements() {
    let source = "
        void f(int n) {
            int i = 0;
            while (i < n) {
                if (i == 3) break; else { continue; }
                i++;
            }
            ;
            return;
        }
    ";
    let (module, diagnostics) = module(source);

    assert!(!diagnostics.has_errors());
    let body = module.functions[0].body.as_ref().unwrap();
    assert_eq!(body.len(), 3);
    assert!(matches!(body[0].kind, StmtKind::VarDecl(_)));
    assert!(matches!(body[2].kind, StmtKind::Return(None)));

    let StmtKind::While { body: loop_body, .. } = &body[1].kind else {
        panic!("expected while");
    };
    assert_eq!(loop_body.len(), 2);
    match &loop_body[0].kind {
        StmtKind::If {
            body, else_body, ..
        } => {
            assert!(matches!(body[0].kind, StmtKind::Break));
            let else_body = else_body.as_ref().unwrap();
            assert!(matches!(else_body[0].kind, StmtKind::Continue));
        }
        other => panic!("expected if, got {:?}", other),
    }
}

#[test]
fn test_missing_semicolon() {
    let (_, diagnostics) = module("int a = 1");

    assert_eq!(diagnostics.error_count(), 1);
    assert_eq!(
        diagnostics.errors()[0].to_string(),
        "test.c:1: parsing error: expected ';', but found end of file"
    );
}

#[test]
fn test_top_level_stops_at_first_error() {
    let (module, diagnostics) = module("int a = ;\nint b;\nint c;");

    assert_eq!(diagnostics.error_count(), 1);
    assert_eq!(module.globals.len(), 1);
    assert_eq!(module.globals[0].name, "a");
}

#[test]
fn test_block_recovers_after_error() {
    let (module, diagnostics) = module("int f() { x = ; y = 1; }");

    assert_eq!(diagnostics.error_count(), 1);
    let body = module.functions[0].body.as_ref().unwrap();
    match &body.last().unwrap().kind {
        StmtKind::Expression(e) => assert_eq!(e.to_string(), "(y = 1)"),
        other => panic!("expected expression statement, got {:?}", other),
    }
}

#[test]
fn test_stray_token_in_block_terminates() {
    let (module, diagnostics) = module("int f() { ) }");

    assert_eq!(diagnostics.error_count(), 1);
    assert_eq!(
        diagnostics.errors()[0].to_string(),
        "test.c:1: parsing error: expected '(', unary operator, or terminal, but found ')'"
    );
    assert!(module.functions[0].body.as_ref().unwrap().is_empty());
}

#[test]
fn test_if_with_broken_condition_is_dropped() {
    let (module, diagnostics) = module("void f() { if () { g(); } h(); }");

    assert!(diagnostics.has_errors());
    let body = module.functions[0].body.as_ref().unwrap();
    assert_eq!(body.len(), 1);
    assert!(matches!(body[0].kind, StmtKind::Expression(_)));
}

#[test]
fn test_missing_type_specifier() {
    let (module, diagnostics) = module("x = 1;");

    assert_eq!(diagnostics.error_count(), 1);
    assert!(module.globals.is_empty());
}

#[test]
fn test_empty_input() {
    let (module, diagnostics) = module("");

    assert!(!diagnostics.has_errors());
    assert!(module.globals.is_empty());
    assert!(module.functions.is_empty());
}
