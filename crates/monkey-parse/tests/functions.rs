use monkey_ast::ast::{Expr, InfixOp, Stmt};
use monkey_parse::parse_str;

fn first_expr(src: &str) -> Expr {
    let m = parse_str("<mem>", src).expect("parse ok");
    match m.statements.into_iter().next() {
        Some(Stmt::Expr(es)) => es.expr,
        Some(Stmt::Let(ld)) => ld.value,
        other => panic!("unexpected statement {:?}", other),
    }
}

#[test]
fn function_definition_shape() {
    let Expr::Fn {
        token,
        params,
        body,
    } = first_expr("fn(x, y) { x + y; }")
    else {
        panic!("expected function definition");
    };
    assert_eq!(token.literal, "fn");
    let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["x", "y"]);

    assert_eq!(body.statements.len(), 1);
    let Stmt::Expr(es) = &body.statements[0] else {
        panic!("body should hold an expression statement");
    };
    let Expr::Infix { lhs, op, rhs, .. } = &es.expr else {
        panic!("body should be an infix expression");
    };
    assert_eq!(*op, InfixOp::Add);
    assert!(matches!(&**lhs, Expr::Ident(id) if id.name == "x"));
    assert!(matches!(&**rhs, Expr::Ident(id) if id.name == "y"));
}

#[test]
fn function_canonical_form() {
    let m = parse_str("<mem>", "fn(x, y) { x + y; }").unwrap();
    assert_eq!(m.to_string(), "fn (x, y) { (x + y); };");
}

#[test]
fn parameter_lists_of_any_length() {
    for (src, expected) in [
        ("fn() {};", Vec::<&str>::new()),
        ("fn(x) {};", vec!["x"]),
        ("fn(x, y, z) {};", vec!["x", "y", "z"]),
        ("fn(x y) {};", vec!["x", "y"]),
    ] {
        let Expr::Fn { params, .. } = first_expr(src) else {
            panic!("expected function definition for {src}");
        };
        let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, expected, "params of {src}");
    }
}

#[test]
fn function_body_may_hold_any_statement() {
    let src = "let add = fn(a, b) { let c = a + b; return c; };";
    let Expr::Fn { body, .. } = first_expr(src) else {
        panic!("expected function definition");
    };
    assert!(matches!(body.statements[0], Stmt::Let(_)));
    assert!(matches!(body.statements[1], Stmt::Return(_)));
    assert_eq!(
        parse_str("<mem>", src).unwrap().to_string(),
        "let add = fn (a, b) { let c = (a + b);return c; };"
    );
}

#[test]
fn nested_function_definitions() {
    let src = "fn(x) { fn(y) { x + y; }; }";
    let m = parse_str("<mem>", src).unwrap();
    assert_eq!(m.to_string(), "fn (x) { fn (y) { (x + y); }; };");
}

#[test]
fn call_with_identifier_arguments() {
    let Expr::Call { callee, args } = first_expr("add(five, ten);") else {
        panic!("expected function call");
    };
    assert_eq!(callee.name, "add");
    assert_eq!(args.len(), 2);
    assert!(matches!(&args[0], Expr::Ident(id) if id.name == "five"));
    assert!(matches!(&args[1], Expr::Ident(id) if id.name == "ten"));
}

#[test]
fn call_arguments_are_full_expressions() {
    let Expr::Call { args, .. } = first_expr("add(1, 2 * 3, 4 + 5);") else {
        panic!("expected function call");
    };
    assert!(matches!(args[0], Expr::Int { value: 1, .. }));
    assert!(matches!(args[1], Expr::Infix { op: InfixOp::Mul, .. }));
    assert!(matches!(args[2], Expr::Infix { op: InfixOp::Add, .. }));
}

#[test]
fn call_without_arguments() {
    let e = first_expr("tick();");
    assert!(matches!(&e, Expr::Call { args, .. } if args.is_empty()));
    assert_eq!(e.to_string(), "tick()");
}

#[test]
fn call_binds_tighter_than_infix() {
    // (f(1)) + 2
    let Expr::Infix { lhs, .. } = first_expr("let x = f(1) + 2;") else {
        panic!("expected infix");
    };
    assert!(matches!(*lhs, Expr::Call { .. }));
}

#[test]
fn identifier_without_paren_is_not_a_call() {
    let e = first_expr("add + 1;");
    assert!(matches!(e, Expr::Infix { .. }));
}
