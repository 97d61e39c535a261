use monkey_ast::token::{Token, TokenKind};
use std::fmt;

/// A byte no lexing rule accepts. The lexer itself never fails; it emits an
/// `Illegal` token and the parser turns it into this error when it has to
/// interpret the token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    IllegalByte { byte: u8 },
}

impl LexError {
    pub(crate) fn from_token(tok: &Token) -> Self {
        // Illegal literals hold exactly one char in U+0000..=U+00FF
        let byte = tok.literal.chars().next().map(|c| c as u32 as u8).unwrap_or(0);
        LexError::IllegalByte { byte }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LexError::IllegalByte { byte } if byte.is_ascii_graphic() => {
                write!(f, "illegal character '{}'", char::from(*byte))
            }
            LexError::IllegalByte { byte } => write!(f, "illegal byte 0x{:02x}", byte),
        }
    }
}

impl std::error::Error for LexError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A rule required a specific token and found another
    UnexpectedToken { expected: TokenKind, found: Token },
    /// No expression can start with this token
    NoPrefixRule { found: Token },
    /// Digits that do not fit in an i64
    InvalidIntegerLiteral { text: String },
    /// An `Illegal` token reached the parser
    Illegal(LexError),
    /// Expression nesting exceeded the parser's limit
    NestingTooDeep { limit: usize },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseError::UnexpectedToken { expected, found } => {
                write!(f, "expected {}, found {}", expected, found)
            }
            ParseError::NoPrefixRule { found } => {
                write!(f, "no prefix parse rule for {}", found)
            }
            ParseError::InvalidIntegerLiteral { text } => {
                write!(f, "integer literal out of range: {}", text)
            }
            ParseError::Illegal(e) => write!(f, "Lexer error: {}", e),
            ParseError::NestingTooDeep { limit } => {
                write!(f, "expression nesting depth exceeds limit of {}", limit)
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Illegal(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LexError> for ParseError {
    fn from(e: LexError) -> Self {
        ParseError::Illegal(e)
    }
}

/// Every error recorded during one parse, in the order encountered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrors(pub Vec<ParseError>);

impl ParseErrors {
    pub fn iter(&self) -> std::slice::Iter<'_, ParseError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ParseErrors {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0.as_slice() {
            [] => write!(f, "no parse errors"),
            [only] => write!(f, "{}", only),
            [first, rest @ ..] => write!(f, "{} (and {} more)", first, rest.len()),
        }
    }
}

impl std::error::Error for ParseErrors {}

impl<'a> IntoIterator for &'a ParseErrors {
    type Item = &'a ParseError;
    type IntoIter = std::slice::Iter<'a, ParseError>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
