pub mod ast;
pub mod context;
pub mod error;
pub mod lex;
pub mod parse;
pub mod token;

use ast::Expr;
use context::Context;
use error::Error;
use lex::Lexer;
use parse::Parser;
use token::Token;

/// Lexes `text` into tokens terminated by a single `EOF` token.
/// Illegal characters are reported into `ctx` and skipped unless
/// the context is strict.
pub fn tokenize(text: &str, ctx: &mut Context) -> Result<Vec<Token>, Error> {
    Lexer::new(text).lex_all(ctx)
}

/// Parses a token stream into a complete expression tree. The run
/// is abandoned with `Error::Aborted` once `ctx` is cancelled.
pub fn parse(tokens: &[Token], ctx: &Context) -> Result<Expr, Error> {
    Parser::new(tokens, ctx).parse()
}
