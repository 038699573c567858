use std::fmt::Display;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

/// The enum variants are in SCREAMING_SNAKE_CASE as they technically
/// represent constants, but Rust does not allow const enum variants.
#[allow(nonstandard_style)]
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TokenKind {
    NUMBER(f64),
    PLUS,
    MINUS,
    STAR,
    SLASH,
    LPAREN,
    RPAREN,
    EOF,
}

impl TokenKind {
    pub fn from_char(c: char) -> Option<Self> {
        let token = match c {
            '+' => Self::PLUS,
            '-' => Self::MINUS,
            '*' => Self::STAR,
            '/' => Self::SLASH,
            '(' => Self::LPAREN,
            ')' => Self::RPAREN,
            _ => return None,
        };
        Some(token)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub range: TextRange,
    pub line: usize,
    pub lexeme: String,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.lexeme)
    }
}

impl Token {
    pub fn new(kind: TokenKind, range: TextRange, line: usize, lexeme: String) -> Self {
        Self {
            kind,
            range,
            line,
            lexeme,
        }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::EOF
    }
}
