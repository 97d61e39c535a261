//! Syntax tree produced by the parser.
//!
//! Every node keeps the token it was built from so `token_literal()` can
//! report the source text that introduced it. `Display` renders the canonical
//! form: fully parenthesized operators, single spaces around infix operators,
//! and a `;` after every statement. Parsing a canonical string yields the same
//! canonical string again.

use crate::token::{Token, TokenKind};
use serde::Serialize;
use std::fmt;

/// Ordered statement list. The root of a parse and the body of a function.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

/// A function body has the same shape as a whole program.
pub type Compound = Program;

impl Program {
    pub fn new(statements: Vec<Stmt>) -> Self {
        Self { statements }
    }

    pub fn token_literal(&self) -> &str {
        self.statements
            .first()
            .map(Stmt::token_literal)
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Stmt {
    Let(LetStmt),
    Return(ReturnStmt),
    Expr(ExprStmt),
}

impl Stmt {
    pub fn token_literal(&self) -> &str {
        match self {
            Stmt::Let(s) => &s.token.literal,
            Stmt::Return(s) => &s.token.literal,
            Stmt::Expr(s) => &s.token.literal,
        }
    }
}

/// `let <name> = <value>;`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LetStmt {
    pub token: Token,
    pub name: Ident,
    pub value: Expr,
}

/// `return <value>;`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnStmt {
    pub token: Token,
    pub value: Expr,
}

/// A bare expression used as a statement. `token` is the expression's first token.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExprStmt {
    pub token: Token,
    pub expr: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ident {
    pub token: Token,
    pub name: String,
}

impl Ident {
    pub fn new(token: Token) -> Self {
        let name = token.literal.clone();
        Self { token, name }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    Ident(Ident),
    Int {
        token: Token,
        value: i64,
    },
    Bool {
        token: Token,
        value: bool,
    },
    Prefix {
        token: Token,
        op: PrefixOp,
        right: Box<Expr>,
    },
    Infix {
        token: Token,
        lhs: Box<Expr>,
        op: InfixOp,
        rhs: Box<Expr>,
    },
    /// Calls only bind to a named callee: `add(1, 2)`.
    Call {
        callee: Ident,
        args: Vec<Expr>,
    },
    Fn {
        token: Token,
        params: Vec<Ident>,
        body: Compound,
    },
}

impl Expr {
    pub fn token_literal(&self) -> &str {
        match self {
            Expr::Ident(id) => &id.token.literal,
            Expr::Int { token, .. }
            | Expr::Bool { token, .. }
            | Expr::Prefix { token, .. }
            | Expr::Infix { token, .. }
            | Expr::Fn { token, .. } => &token.literal,
            Expr::Call { callee, .. } => &callee.token.literal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PrefixOp {
    Neg,
    Not,
}

impl PrefixOp {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Minus => Some(PrefixOp::Neg),
            TokenKind::Bang => Some(PrefixOp::Not),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PrefixOp::Neg => "-",
            PrefixOp::Not => "!",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InfixOp {
    // equality
    Eq,
    Ne,
    // relational
    Lt,
    Gt,
    // arithmetic
    Add,
    Sub,
    Mul,
    Div,
}

impl InfixOp {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Equals => Some(InfixOp::Eq),
            TokenKind::NotEquals => Some(InfixOp::Ne),
            TokenKind::LessThan => Some(InfixOp::Lt),
            TokenKind::GreaterThan => Some(InfixOp::Gt),
            TokenKind::Plus => Some(InfixOp::Add),
            TokenKind::Minus => Some(InfixOp::Sub),
            TokenKind::Asterisk => Some(InfixOp::Mul),
            TokenKind::Slash => Some(InfixOp::Div),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            InfixOp::Eq => "==",
            InfixOp::Ne => "!=",
            InfixOp::Lt => "<",
            InfixOp::Gt => ">",
            InfixOp::Add => "+",
            InfixOp::Sub => "-",
            InfixOp::Mul => "*",
            InfixOp::Div => "/",
        }
    }
}

// ======= canonical printing =======

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.statements {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Let(s) => write!(f, "{} {} = {};", s.token.literal, s.name, s.value),
            Stmt::Return(s) => write!(f, "{} {};", s.token.literal, s.value),
            Stmt::Expr(s) => write!(f, "{};", s.expr),
        }
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Display for PrefixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for InfixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Ident(id) => write!(f, "{}", id),
            // source text, so `007` stays `007` across a reparse
            Expr::Int { token, .. } | Expr::Bool { token, .. } => f.write_str(&token.literal),
            Expr::Prefix { op, right, .. } => write!(f, "({}{})", op, right),
            Expr::Infix { lhs, op, rhs, .. } => write!(f, "({} {} {})", lhs, op, rhs),
            Expr::Call { callee, args } => {
                write!(f, "{}(", callee)?;
                write_joined(f, args)?;
                f.write_str(")")
            }
            Expr::Fn {
                token,
                params,
                body,
            } => {
                write!(f, "{} (", token.literal)?;
                write_joined(f, params)?;
                write!(f, ") {{ {} }}", body)
            }
        }
    }
}

fn write_joined<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Ident {
        Ident::new(Token::new(TokenKind::Identifier, name))
    }

    fn int(v: i64) -> Expr {
        Expr::Int {
            token: Token::new(TokenKind::Integer, v.to_string()),
            value: v,
        }
    }

    #[test]
    fn let_statement_prints_canonically() {
        let program = Program::new(vec![Stmt::Let(LetStmt {
            token: Token::new(TokenKind::Let, "let"),
            name: ident("myVar"),
            value: Expr::Ident(ident("anotherVar")),
        })]);
        assert_eq!(program.to_string(), "let myVar = anotherVar;");
        assert_eq!(program.token_literal(), "let");
    }

    #[test]
    fn empty_program_has_empty_literal() {
        let program = Program::default();
        assert_eq!(program.token_literal(), "");
        assert_eq!(program.to_string(), "");
    }

    #[test]
    fn operators_are_parenthesized() {
        let expr = Expr::Infix {
            token: Token::new(TokenKind::Plus, "+"),
            lhs: Box::new(int(1)),
            op: InfixOp::Add,
            rhs: Box::new(Expr::Prefix {
                token: Token::new(TokenKind::Minus, "-"),
                op: PrefixOp::Neg,
                right: Box::new(int(2)),
            }),
        };
        assert_eq!(expr.to_string(), "(1 + (-2))");
        assert_eq!(expr.token_literal(), "+");
    }

    #[test]
    fn function_and_call_print_argument_lists() {
        let body = Program::new(vec![Stmt::Return(ReturnStmt {
            token: Token::new(TokenKind::Return, "return"),
            value: Expr::Ident(ident("x")),
        })]);
        let func = Expr::Fn {
            token: Token::new(TokenKind::Function, "fn"),
            params: vec![ident("x"), ident("y")],
            body,
        };
        assert_eq!(func.to_string(), "fn (x, y) { return x; }");

        let call = Expr::Call {
            callee: ident("add"),
            args: vec![int(1), Expr::Ident(ident("b"))],
        };
        assert_eq!(call.to_string(), "add(1, b)");
        assert_eq!(call.token_literal(), "add");
    }

    #[test]
    fn operator_lookup_covers_table() {
        assert_eq!(InfixOp::from_token(TokenKind::NotEquals), Some(InfixOp::Ne));
        assert_eq!(InfixOp::from_token(TokenKind::Assignment), None);
        assert_eq!(PrefixOp::from_token(TokenKind::Bang), Some(PrefixOp::Not));
        assert_eq!(PrefixOp::from_token(TokenKind::Plus), None);
    }
}
