use std::{iter::Peekable, slice::Iter};

use log::trace;

use crate::{
    ast::{BinOp, Expr, UnaryOp},
    context::Context,
    error::{Error, ErrorMsg},
    token::{Token, TokenKind},
};

/// How many groups and unary operators may nest inside each other.
pub const MAX_DEPTH: usize = 256;

/// Precedence-climbing parser over a lexed token stream.
#[derive(Debug)]
pub struct Parser<'a> {
    stream: Peekable<Iter<'a, Token>>,
    ctx: &'a Context,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(stream: &'a [Token], ctx: &'a Context) -> Self {
        Self {
            stream: stream.iter().peekable(),
            ctx,
            depth: 0,
        }
    }

    /// Parses a single expression spanning the whole stream.
    /// Anything left over apart from the end marker is an error.
    pub fn parse(mut self) -> Result<Expr, Error> {
        let expr = self.parse_expr(0)?;
        match self.stream.peek() {
            Some(&t) if !t.is_eof() => Err(Self::error(t, ErrorMsg::TrailingToken)),
            _ => {
                self.ctx.check()?;
                trace!("statement: expression");
                Ok(expr)
            }
        }
    }

    fn parse_expr(&mut self, min_precedence: u8) -> Result<Expr, Error> {
        let mut lhs = self.parse_unary()?;
        while let Some(op) = self
            .stream
            .peek()
            .and_then(|t| BinOp::from_token(t.kind))
            .filter(|op| op.precedence() >= min_precedence)
        {
            self.advance();
            // Operands on the right must bind strictly tighter,
            // which makes every level left-associative
            let rhs = self.parse_expr(op.precedence() + 1)?;
            self.ctx.check()?;
            trace!("expression: expression {op} expression");
            lhs = Expr::binary(lhs, op, rhs);
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<Expr, Error> {
        let Some(t) = self.advance_if(|t| t.kind == TokenKind::MINUS) else {
            return self.parse_primary();
        };
        let Some(op) = UnaryOp::from_token(t.kind) else {
            return Err(Self::error(t, ErrorMsg::UnexpectedToken));
        };
        self.enter(t)?;
        let expr = self.parse_unary()?;
        self.depth -= 1;
        self.ctx.check()?;
        trace!("expression: {op} expression");
        Ok(Expr::unary(op, expr))
    }

    fn parse_primary(&mut self) -> Result<Expr, Error> {
        match self.advance() {
            Some(t) => match t.kind {
                TokenKind::NUMBER(n) => {
                    self.ctx.check()?;
                    trace!("expression: NUMBER");
                    Ok(Expr::Operand(n))
                }
                TokenKind::LPAREN => {
                    self.enter(t)?;
                    let expr = self.parse_group()?;
                    self.depth -= 1;
                    Ok(expr)
                }
                _ => Err(Self::error(t, ErrorMsg::UnexpectedToken)),
            },
            None => Err(Self::eof_error(ErrorMsg::UnexpectedToken)),
        }
    }

    fn parse_group(&mut self) -> Result<Expr, Error> {
        let expr = self.parse_expr(0)?;
        match self.stream.peek() {
            Some(&t) if t.kind == TokenKind::RPAREN => {
                self.advance();
                self.ctx.check()?;
                trace!("expression: ( expression )");
                Ok(expr)
            }
            Some(&t) => Err(Self::error(t, ErrorMsg::MissingClosingParen)),
            None => Err(Self::eof_error(ErrorMsg::MissingClosingParen)),
        }
    }

    /// Descends one nesting level at `token`, bounding the recursion.
    fn enter(&mut self, token: &Token) -> Result<(), Error> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(Self::error(token, ErrorMsg::TooDeep));
        }
        Ok(())
    }

    fn advance(&mut self) -> Option<&'a Token> {
        self.stream.next()
    }

    fn advance_if<F>(&mut self, cond: F) -> Option<&'a Token>
    where
        F: FnOnce(&Token) -> bool,
    {
        if self.stream.peek().filter(|&&t| cond(t)).is_some() {
            self.advance()
        } else {
            None
        }
    }

    fn error(token: &Token, msg: ErrorMsg) -> Error {
        Error::Syntax(format!(
            "Parse error at line {}: {} {}",
            token.line + 1,
            msg,
            token
        ))
    }

    fn eof_error(msg: ErrorMsg) -> Error {
        Error::Syntax(format!("Parse error: {} end of input", msg))
    }
}
