use monkey_ast::ast::{Expr, Stmt};
use monkey_parse::parse_str;

#[test]
fn let_statements_bind_names_in_order() {
    let m = parse_str("<mem>", "let a = 5; let b = true; let foo = 10;").unwrap();
    assert_eq!(m.statements.len(), 3);

    let names: Vec<&str> = m
        .statements
        .iter()
        .map(|s| {
            let Stmt::Let(ld) = s else {
                panic!("expected Let statement, got {:?}", s);
            };
            assert_eq!(ld.token.literal, "let");
            ld.name.name.as_str()
        })
        .collect();
    assert_eq!(names, ["a", "b", "foo"]);
}

#[test]
fn let_values_are_parsed() {
    let m = parse_str("<mem>", "let x = 1 + 2; let y = x;").unwrap();
    let Stmt::Let(x) = &m.statements[0] else {
        panic!("expected Let statement");
    };
    assert!(matches!(x.value, Expr::Infix { .. }));
    let Stmt::Let(y) = &m.statements[1] else {
        panic!("expected Let statement");
    };
    assert!(matches!(&y.value, Expr::Ident(id) if id.name == "x"));
}

#[test]
fn return_statements() {
    let m = parse_str("<mem>", "return 5;\nreturn true;\nreturn 10;").unwrap();
    assert_eq!(m.statements.len(), 3);
    for s in &m.statements {
        let Stmt::Return(r) = s else {
            panic!("expected Return statement, got {:?}", s);
        };
        assert_eq!(s.token_literal(), "return");
        assert!(matches!(r.value, Expr::Int { .. } | Expr::Bool { .. }));
    }
    assert_eq!(m.to_string(), "return 5;return true;return 10;");
}

#[test]
fn trailing_semicolons_are_optional() {
    let m = parse_str("<mem>", "let a = 1 let b = 2\nreturn a").unwrap();
    assert_eq!(m.statements.len(), 3);
    assert_eq!(m.to_string(), "let a = 1;let b = 2;return a;");
}

#[test]
fn statement_order_is_preserved() {
    let m = parse_str("<mem>", "x; let y = 1; return y; z;").unwrap();
    let tags: Vec<&str> = m
        .statements
        .iter()
        .map(|s| match s {
            Stmt::Let(_) => "let",
            Stmt::Return(_) => "return",
            Stmt::Expr(_) => "expr",
        })
        .collect();
    assert_eq!(tags, ["expr", "let", "return", "expr"]);
    assert_eq!(m.token_literal(), "x");
}

#[test]
fn empty_source_is_empty_program() {
    let m = parse_str("<mem>", "  \n").unwrap();
    assert!(m.statements.is_empty());
    assert_eq!(m.token_literal(), "");
}
