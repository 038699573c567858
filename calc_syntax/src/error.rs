use std::fmt::Display;

/// Failure of any pipeline stage. The payload is the human readable
/// message, already prefixed with the stage that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    Lex(String),
    Syntax(String),
    Runtime(String),
    Aborted,
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Lex(e) | Self::Syntax(e) | Self::Runtime(e) => e,
            Self::Aborted => "Aborted",
        })
    }
}

impl std::error::Error for Error {}

#[derive(Debug)]
pub enum ErrorMsg {
    // Lex errors
    UnexpectedChar,
    InvalidNumber,
    // Parse errors
    UnexpectedToken,
    MissingClosingParen,
    TrailingToken,
    TooDeep,
}

impl Display for ErrorMsg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::UnexpectedChar => "unexpected character",
            Self::InvalidNumber => "invalid number",
            Self::UnexpectedToken => "unexpected token",
            Self::MissingClosingParen => "missing closing parenthesis at",
            Self::TrailingToken => "expected end of input, found",
            Self::TooDeep => "nesting too deep at",
        })
    }
}
