use crate::error::{LexError, ParseError, ParseErrors};
use crate::lexer::Lexer;
use anyhow::{Context, Result};
use monkey_ast::ast::{
    Compound, Expr, ExprStmt, Ident, InfixOp, LetStmt, PrefixOp, Program, ReturnStmt, Stmt,
};
use monkey_ast::token::{Token, TokenKind};

/// Maximum height of an expression tree. Deeper statements are rejected.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Recursion bound for the expression parser. The canonical form of a tree of
/// height `h` reparses within `2 * h + 1` nested calls, so this never rejects
/// a reprinted tree while still bounding stack use on redundant parentheses.
const MAX_RECURSION: usize = 2 * MAX_NESTING_DEPTH + 1;

type PResult<T> = std::result::Result<T, ParseError>;

/// A node and the height of the expression tree below it.
type Nested<T> = (T, usize);

/// Parse a whole source string, failing if any error was recorded.
///
/// The returned error wraps a [`ParseErrors`] and can be downcast to it.
pub fn parse_str(file: &str, src: &str) -> Result<Program> {
    let mut p = Parser::new(Lexer::new(src));
    let program = p.parse_program();
    if p.errors.is_empty() {
        return Ok(program);
    }
    Err(ParseErrors(p.into_errors())).with_context(|| format!("failed to parse {}", file))
}

// ======= precedence table =======

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Lowest,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
}

/// Binding power of a token in infix position. Non-operators bind at `Lowest`
/// and so never continue an expression.
pub const fn precedence_of(kind: TokenKind) -> Precedence {
    match kind {
        TokenKind::Equals | TokenKind::NotEquals => Precedence::Equals,
        TokenKind::LessThan | TokenKind::GreaterThan => Precedence::LessGreater,
        TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
        TokenKind::Asterisk | TokenKind::Slash => Precedence::Product,
        _ => Precedence::Lowest,
    }
}

// ======= parser =======

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    errors: Vec<ParseError>,
}

impl Parser {
    /// Drains `lex` completely before any parsing happens.
    pub fn new(lex: Lexer<'_>) -> Self {
        Self {
            tokens: lex.into_tokens(),
            pos: 0,
            depth: 0,
            errors: Vec::new(),
        }
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ParseError> {
        self.errors
    }

    fn cur(&self) -> &Token {
        // the buffer always ends with Eof and `bump` never moves past it
        &self.tokens[self.pos]
    }

    fn peek(&self) -> &Token {
        if self.at(TokenKind::Eof) {
            self.cur()
        } else {
            &self.tokens[self.pos + 1]
        }
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.cur().is(kind)
    }

    fn bump(&mut self) {
        if !self.at(TokenKind::Eof) {
            self.pos += 1;
        }
    }

    /// Consume the current token if it has `kind`.
    fn eat(&mut self, kind: TokenKind) -> bool {
        let hit = self.at(kind);
        if hit {
            self.bump();
        }
        hit
    }

    fn expect(&mut self, kind: TokenKind) -> PResult<Token> {
        if self.at(kind) {
            let t = self.cur().clone();
            self.bump();
            Ok(t)
        } else {
            Err(self.unexpected(kind))
        }
    }

    fn unexpected(&self, expected: TokenKind) -> ParseError {
        let found = self.cur();
        if found.is(TokenKind::Illegal) {
            // report the bad byte rather than what we hoped to see
            return LexError::from_token(found).into();
        }
        ParseError::UnexpectedToken {
            expected,
            found: found.clone(),
        }
    }

    // ======= program / statements =======
    //
    // Rules return the node together with the height of its expression tree.
    // Heights are bounded by `MAX_NESTING_DEPTH`, so everything the parser
    // accepts prints to a canonical string it will accept again.

    /// Parse everything up to `Eof`. Errors are collected, not returned.
    pub fn parse_program(&mut self) -> Program {
        self.parse_compound(false).0
    }

    /// Statements until `Eof`, or until `}` when parsing a function body.
    fn parse_compound(&mut self, nested: bool) -> Nested<Compound> {
        let mut statements = Vec::new();
        let mut height = 0;
        while !self.at(TokenKind::Eof) && !(nested && self.at(TokenKind::CloseBrace)) {
            match self.parse_statement() {
                Ok((stmt, h)) => {
                    statements.push(stmt);
                    height = height.max(h);
                }
                Err(e) => {
                    self.errors.push(e);
                    self.synchronize(nested);
                }
            }
        }
        (Compound::new(statements), height)
    }

    /// Panic-mode recovery: skip to the end of the broken statement, stepping
    /// over balanced `{ ... }` blocks on the way.
    fn synchronize(&mut self, nested: bool) {
        let mut braces = 0usize;
        loop {
            match self.cur().kind {
                TokenKind::Eof => return,
                TokenKind::Semicolon if braces == 0 => {
                    self.bump();
                    return;
                }
                TokenKind::OpenBrace => braces += 1,
                TokenKind::CloseBrace if braces > 0 => braces -= 1,
                TokenKind::CloseBrace => {
                    // a stray `}` at top level closes nothing; drop it so we make progress
                    if !nested {
                        self.bump();
                    }
                    return;
                }
                _ => {}
            }
            self.bump();
        }
    }

    fn parse_statement(&mut self) -> PResult<Nested<Stmt>> {
        match self.cur().kind {
            TokenKind::Let => {
                let (stmt, h) = self.parse_let_stmt()?;
                Ok((Stmt::Let(stmt), h))
            }
            TokenKind::Return => {
                let (stmt, h) = self.parse_return_stmt()?;
                Ok((Stmt::Return(stmt), h))
            }
            _ => {
                let (stmt, h) = self.parse_expr_stmt()?;
                Ok((Stmt::Expr(stmt), h))
            }
        }
    }

    /// `let name = expr [;]`
    fn parse_let_stmt(&mut self) -> PResult<Nested<LetStmt>> {
        let token = self.expect(TokenKind::Let)?;
        let name = self.parse_ident()?;
        self.expect(TokenKind::Assignment)?;
        let (value, h) = self.parse_expression(Precedence::Lowest)?;
        self.eat(TokenKind::Semicolon);
        Ok((LetStmt { token, name, value }, h))
    }

    /// `return expr [;]`
    fn parse_return_stmt(&mut self) -> PResult<Nested<ReturnStmt>> {
        let token = self.expect(TokenKind::Return)?;
        let (value, h) = self.parse_expression(Precedence::Lowest)?;
        self.eat(TokenKind::Semicolon);
        Ok((ReturnStmt { token, value }, h))
    }

    fn parse_expr_stmt(&mut self) -> PResult<Nested<ExprStmt>> {
        let token = self.cur().clone();
        let (expr, h) = self.parse_expression(Precedence::Lowest)?;
        self.eat(TokenKind::Semicolon);
        Ok((ExprStmt { token, expr }, h))
    }

    fn parse_ident(&mut self) -> PResult<Ident> {
        let tok = self.expect(TokenKind::Identifier)?;
        Ok(Ident::new(tok))
    }

    // ======= expressions (precedence climbing) =======
    //
    // Precedence (low -> high):
    //   Lowest < Equals (== !=) < LessGreater (< >) < Sum (+ -) < Product (* /) < Prefix
    //
    // The right operand of an infix operator is parsed with that operator's own
    // precedence as the floor, so equal-precedence operators associate left.

    fn parse_expression(&mut self, min: Precedence) -> PResult<Nested<Expr>> {
        if self.depth >= MAX_RECURSION {
            return Err(ParseError::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
            });
        }
        self.depth += 1;
        let result = self.parse_expression_inner(min);
        self.depth -= 1;
        result
    }

    fn parse_expression_inner(&mut self, min: Precedence) -> PResult<Nested<Expr>> {
        let (mut lhs, mut height) = self.parse_prefix()?;

        loop {
            let tok = self.cur();
            if matches!(tok.kind, TokenKind::Semicolon | TokenKind::Eof) {
                break;
            }
            let prec = precedence_of(tok.kind);
            if prec <= min {
                break;
            }
            let Some(op) = InfixOp::from_token(tok.kind) else {
                break;
            };
            let token = tok.clone();
            self.bump(); // consume operator
            let (rhs, rhs_height) = self.parse_expression(prec)?;
            height = nest(height.max(rhs_height))?;
            lhs = Expr::Infix {
                token,
                lhs: Box::new(lhs),
                op,
                rhs: Box::new(rhs),
            };
        }

        Ok((lhs, height))
    }

    fn parse_prefix(&mut self) -> PResult<Nested<Expr>> {
        let tok = self.cur().clone();

        if let Some(op) = PrefixOp::from_token(tok.kind) {
            self.bump();
            let (right, h) = self.parse_expression(Precedence::Prefix)?;
            let expr = Expr::Prefix {
                token: tok,
                op,
                right: Box::new(right),
            };
            return Ok((expr, nest(h)?));
        }

        match tok.kind {
            TokenKind::Integer => {
                let value = tok
                    .literal
                    .parse::<i64>()
                    .map_err(|_| ParseError::InvalidIntegerLiteral {
                        text: tok.literal.clone(),
                    })?;
                self.bump();
                Ok((Expr::Int { token: tok, value }, 0))
            }
            TokenKind::True | TokenKind::False => {
                self.bump();
                let value = tok.is(TokenKind::True);
                Ok((Expr::Bool { token: tok, value }, 0))
            }

            // grouping resets precedence and leaves no node behind
            TokenKind::OpenParen => {
                self.bump();
                let inner = self.parse_expression(Precedence::Lowest)?;
                self.expect(TokenKind::CloseParen)?;
                Ok(inner)
            }

            TokenKind::Identifier => {
                if self.peek().is(TokenKind::OpenParen) {
                    self.parse_call()
                } else {
                    Ok((Expr::Ident(self.parse_ident()?), 0))
                }
            }

            TokenKind::Function => self.parse_fn(),

            TokenKind::Illegal => Err(LexError::from_token(&tok).into()),

            _ => Err(ParseError::NoPrefixRule { found: tok }),
        }
    }

    /// `name(arg, arg, ...)`; commas between arguments are optional.
    fn parse_call(&mut self) -> PResult<Nested<Expr>> {
        let callee = self.parse_ident()?;
        self.expect(TokenKind::OpenParen)?;
        let mut args = Vec::new();
        let mut height = 0;
        while !self.at(TokenKind::CloseParen) && !self.at(TokenKind::Eof) {
            let (arg, h) = self.parse_expression(Precedence::Lowest)?;
            args.push(arg);
            height = height.max(h);
            self.eat(TokenKind::Comma);
        }
        self.expect(TokenKind::CloseParen)?;
        Ok((Expr::Call { callee, args }, nest(height)?))
    }

    /// `fn(param, ...) { body }`
    fn parse_fn(&mut self) -> PResult<Nested<Expr>> {
        let token = self.expect(TokenKind::Function)?;
        self.expect(TokenKind::OpenParen)?;
        let mut params = Vec::new();
        while !self.at(TokenKind::CloseParen) && !self.at(TokenKind::Eof) {
            params.push(self.parse_ident()?);
            self.eat(TokenKind::Comma);
        }
        self.expect(TokenKind::CloseParen)?;
        self.expect(TokenKind::OpenBrace)?;
        let (body, height) = self.parse_compound(true);
        self.expect(TokenKind::CloseBrace)?;
        let expr = Expr::Fn {
            token,
            params,
            body,
        };
        Ok((expr, nest(height)?))
    }
}

/// Height of a node wrapping a child of height `child`.
fn nest(child: usize) -> PResult<usize> {
    if child >= MAX_NESTING_DEPTH {
        return Err(ParseError::NestingTooDeep {
            limit: MAX_NESTING_DEPTH,
        });
    }
    Ok(child + 1)
}
