use crate::{
    context::Context,
    error::{Error, ErrorMsg},
    token::{TextRange, Token, TokenKind},
};
use log::trace;
use std::{iter::Peekable, str::Chars};

#[derive(Debug)]
pub struct Lexer<'a> {
    source: &'a str,
    stream: Peekable<Chars<'a>>,
    line: usize,
    start: usize,
    current: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            stream: source.chars().peekable(),
            line: 0,
            start: 0,
            current: 0,
        }
    }

    /// Lexes the whole source. The returned tokens always end
    /// with exactly one `EOF` token.
    pub fn lex_all(mut self, ctx: &mut Context) -> Result<Vec<Token>, Error> {
        let mut tokens: Vec<Token> = Vec::default();
        loop {
            let t = self.lex(ctx)?;
            let eof = t.is_eof();
            tokens.push(t);
            if eof {
                return Ok(tokens);
            }
        }
    }

    pub fn lex(&mut self, ctx: &mut Context) -> Result<Token, Error> {
        loop {
            ctx.check()?;
            self.start = self.current;
            let Some(c) = self.advance() else {
                return Ok(Token::new(
                    TokenKind::EOF,
                    self.text_range(),
                    self.line,
                    "end of input".to_string(),
                ));
            };
            match c {
                ' ' | '\t' => continue,
                '\n' => self.line += 1,
                _ if c.is_ascii_digit() => return self.lex_number(),
                _ => {
                    if let Some(t) = TokenKind::from_char(c) {
                        return Ok(self.make_token(t));
                    }
                    let e = self.error(ErrorMsg::UnexpectedChar);
                    if ctx.is_strict() {
                        return Err(Error::Lex(e));
                    }
                    // The character is skipped and lexing carries on
                    ctx.warn(e);
                }
            }
        }
    }

    fn lex_number(&mut self) -> Result<Token, Error> {
        // Consume the integral part
        self.advance_while(|c| c.is_ascii_digit());
        // A dot only belongs to the number if digits follow it
        let mut ahead = self.stream.clone();
        if ahead.next() == Some('.') && ahead.next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            self.advance_while(|c| c.is_ascii_digit());
        }
        let lexeme = self.lexeme_from_range();
        trace!("NUMBER \"{lexeme}\"");
        let value = lexeme
            .parse::<f64>()
            .map_err(|_| Error::Lex(self.error(ErrorMsg::InvalidNumber)))?;
        Ok(self.make_token(TokenKind::NUMBER(value)))
    }

    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.text_range(), self.line, self.lexeme_from_range())
    }

    fn lexeme_from_range(&self) -> String {
        self.source[self.start..self.current].to_string()
    }

    fn text_range(&self) -> TextRange {
        TextRange {
            start: self.start,
            end: self.current,
        }
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.stream.next()?;
        self.current += c.len_utf8();
        Some(c)
    }

    fn advance_while<F>(&mut self, cond: F) -> Option<usize>
    where
        F: Fn(char) -> bool,
    {
        let mut count: usize = 0;
        while self.stream.peek().filter(|&&c| cond(c)).is_some() {
            count += 1;
            self.advance();
        }
        count.ne(&0).then_some(count)
    }

    fn error(&self, msg: ErrorMsg) -> String {
        format!(
            "Lex error at line {}: {} {}",
            self.line + 1,
            msg,
            self.lexeme_from_range()
        )
    }
}
