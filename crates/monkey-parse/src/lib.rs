#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(clippy::dbg_macro, clippy::todo, clippy::unimplemented)]

mod error;
mod lexer;
mod parser;

pub use error::{LexError, ParseError, ParseErrors};
pub use lexer::{tokenize, Lexer};
pub use monkey_ast::token::{Token, TokenKind};
pub use parser::{parse_str, precedence_of, Parser, Precedence, MAX_NESTING_DEPTH};
