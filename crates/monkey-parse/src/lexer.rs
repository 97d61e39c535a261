use monkey_ast::token::{lookup_ident, Token, TokenKind};

/// Pull-based tokenizer over the raw bytes of a source string.
///
/// Once the input is exhausted every further call to `next_token` returns
/// `Eof` without moving.
pub struct Lexer<'a> {
    src: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src: src.as_bytes(),
            pos: 0,
        }
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.bump();
        }
    }

    /// Consume bytes while `pred` holds and return them as text.
    fn take_while(&mut self, start: usize, pred: impl Fn(u8) -> bool) -> String {
        while matches!(self.peek(), Some(b) if pred(b)) {
            self.bump();
        }
        // only ASCII bytes pass the predicates used here
        String::from_utf8_lossy(&self.src[start..self.pos]).into_owned()
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();
        let start = self.pos;
        let Some(b) = self.bump() else {
            return Token::eof();
        };

        // 2-char operators first; lookahead inspects exactly one byte
        if b == b'=' && self.peek() == Some(b'=') {
            self.bump();
            return Token::new(TokenKind::Equals, "==");
        }
        if b == b'!' && self.peek() == Some(b'=') {
            self.bump();
            return Token::new(TokenKind::NotEquals, "!=");
        }

        // 1-char punctuation/operators
        let single = match b {
            b'=' => Some(TokenKind::Assignment),
            b'!' => Some(TokenKind::Bang),
            b'+' => Some(TokenKind::Plus),
            b'-' => Some(TokenKind::Minus),
            b'*' => Some(TokenKind::Asterisk),
            b'/' => Some(TokenKind::Slash),
            b'<' => Some(TokenKind::LessThan),
            b'>' => Some(TokenKind::GreaterThan),
            b',' => Some(TokenKind::Comma),
            b';' => Some(TokenKind::Semicolon),
            b'(' => Some(TokenKind::OpenParen),
            b')' => Some(TokenKind::CloseParen),
            b'{' => Some(TokenKind::OpenBrace),
            b'}' => Some(TokenKind::CloseBrace),
            _ => None,
        };
        if let Some(kind) = single {
            return Token::new(kind, char::from(b));
        }

        // integer: decimal digits only, no sign
        if b.is_ascii_digit() {
            let text = self.take_while(start, |p| p.is_ascii_digit());
            return Token::new(TokenKind::Integer, text);
        }

        // ident / keywords
        if is_ident_byte(b) {
            let text = self.take_while(start, is_ident_byte);
            return Token::new(lookup_ident(&text), text);
        }

        // fallback: one byte, rendered as its Latin-1 char, so lexing always advances
        Token::new(TokenKind::Illegal, char::from(b))
    }

    /// Drain the lexer, keeping the terminating `Eof`.
    pub fn into_tokens(mut self) -> Vec<Token> {
        let mut toks = Vec::new();
        loop {
            let tok = self.next_token();
            let done = tok.is(TokenKind::Eof);
            toks.push(tok);
            if done {
                return toks;
            }
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    /// Yields tokens up to, not including, `Eof`.
    fn next(&mut self) -> Option<Token> {
        let tok = self.next_token();
        (!tok.is(TokenKind::Eof)).then_some(tok)
    }
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Lex all of `src`. The returned buffer always ends with exactly one `Eof`.
pub fn tokenize(src: &str) -> Vec<Token> {
    Lexer::new(src).into_tokens()
}
