use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    // error / eof
    Illegal,
    Eof,
    // identifiers
    Identifier,
    // operators
    Assignment,
    Plus,
    Minus,
    Bang,
    Asterisk,
    Slash,
    LessThan,
    GreaterThan,
    Equals,
    NotEquals,
    // punctuation
    Comma,
    Semicolon,
    OpenParen,
    CloseParen,
    OpenBrace,
    CloseBrace,
    // literals
    Integer,
    // keywords
    Function,
    Let,
    True,
    False,
    If,
    Else,
    Return,
}

impl TokenKind {
    /// Human-readable label used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Illegal => "Illegal",
            TokenKind::Eof => "Eof",
            TokenKind::Identifier => "Identifier",
            TokenKind::Assignment => "Assignment",
            TokenKind::Plus => "Plus",
            TokenKind::Minus => "Minus",
            TokenKind::Bang => "Bang",
            TokenKind::Asterisk => "Asterisk",
            TokenKind::Slash => "Slash",
            TokenKind::LessThan => "Less Than",
            TokenKind::GreaterThan => "Greater Than",
            TokenKind::Equals => "Equals",
            TokenKind::NotEquals => "Not Equals",
            TokenKind::Comma => "Comma",
            TokenKind::Semicolon => "Semicolon",
            TokenKind::OpenParen => "Open Paren",
            TokenKind::CloseParen => "Close Paren",
            TokenKind::OpenBrace => "Open Brace",
            TokenKind::CloseBrace => "Close Brace",
            TokenKind::Integer => "Integer",
            TokenKind::Function => "Function",
            TokenKind::Let => "Let",
            TokenKind::True => "True",
            TokenKind::False => "False",
            TokenKind::If => "If",
            TokenKind::Else => "Else",
            TokenKind::Return => "Return",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reserved words. Anything else made of identifier characters is an `Identifier`.
pub const KEYWORDS: [(&str, TokenKind); 7] = [
    ("fn", TokenKind::Function),
    ("let", TokenKind::Let),
    ("true", TokenKind::True),
    ("false", TokenKind::False),
    ("if", TokenKind::If),
    ("else", TokenKind::Else),
    ("return", TokenKind::Return),
];

pub fn lookup_ident(text: &str) -> TokenKind {
    KEYWORDS
        .iter()
        .find(|(kw, _)| *kw == text)
        .map(|&(_, kind)| kind)
        .unwrap_or(TokenKind::Identifier)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>) -> Self {
        Self {
            kind,
            literal: literal.into(),
        }
    }

    /// End-of-input marker; its literal is a single NUL character.
    pub fn eof() -> Self {
        Self::new(TokenKind::Eof, "\0")
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => f.write_str("end of input"),
            kind => write!(f, "{} `{}`", kind, self.literal),
        }
    }
}
