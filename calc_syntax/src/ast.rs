use std::{fmt::Display, mem};

use crate::token::TokenKind;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Negate,
}

impl UnaryOp {
    pub fn from_token(t: TokenKind) -> Option<Self> {
        let op = match t {
            TokenKind::MINUS => Self::Negate,
            _ => return None,
        };
        Some(op)
    }
}

impl Display for UnaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Negate => "-",
        })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl Display for BinOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
        })
    }
}

impl BinOp {
    pub fn from_token(t: TokenKind) -> Option<Self> {
        let op = match t {
            TokenKind::PLUS => Self::Add,
            TokenKind::MINUS => Self::Sub,
            TokenKind::STAR => Self::Mul,
            TokenKind::SLASH => Self::Div,
            _ => return None,
        };
        Some(op)
    }

    /// Binding power of the operator. Higher binds tighter, and
    /// all binary operators are left-associative.
    pub fn precedence(self) -> u8 {
        match self {
            Self::Add | Self::Sub => 1,
            Self::Mul | Self::Div => 2,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Operand(f64),
    Unary {
        op: UnaryOp,
        expr: Box<Expr>,
    },
    Binary {
        lhs: Box<Expr>,
        op: BinOp,
        rhs: Box<Expr>,
    },
}

impl Expr {
    pub fn unary(op: UnaryOp, expr: Expr) -> Self {
        Self::Unary {
            op,
            expr: Box::new(expr),
        }
    }

    pub fn binary(lhs: Expr, op: BinOp, rhs: Expr) -> Self {
        Self::Binary {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
        }
    }
}

impl Expr {
    /// Moves the children out of the node, leaving operands behind.
    fn take_children(&mut self, out: &mut Vec<Expr>) {
        match self {
            Self::Operand(_) => {}
            Self::Unary { expr, .. } => {
                out.push(mem::replace(expr.as_mut(), Self::Operand(0.0)));
            }
            Self::Binary { lhs, rhs, .. } => {
                out.push(mem::replace(lhs.as_mut(), Self::Operand(0.0)));
                out.push(mem::replace(rhs.as_mut(), Self::Operand(0.0)));
            }
        }
    }
}

// Long operator chains build trees deep enough to overflow
// the stack with the default recursive drop
impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.take_children(&mut pending);
        while let Some(mut child) = pending.pop() {
            child.take_children(&mut pending);
        }
    }
}

enum Piece<'a> {
    Expr(&'a Expr),
    Text(&'static str),
    UnaryOp(UnaryOp),
    BinOp(BinOp),
}

/// Prints the tree fully parenthesised, e.g. `((10 - 3) * (-4))`.
impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut pending = vec![Piece::Expr(self)];
        while let Some(piece) = pending.pop() {
            match piece {
                Piece::Expr(Self::Operand(n)) => write!(f, "{n}")?,
                Piece::Expr(Self::Unary { op, expr }) => pending.extend([
                    Piece::Text(")"),
                    Piece::Expr(expr),
                    Piece::UnaryOp(*op),
                    Piece::Text("("),
                ]),
                Piece::Expr(Self::Binary { lhs, op, rhs }) => pending.extend([
                    Piece::Text(")"),
                    Piece::Expr(rhs),
                    Piece::Text(" "),
                    Piece::BinOp(*op),
                    Piece::Text(" "),
                    Piece::Expr(lhs),
                    Piece::Text("("),
                ]),
                Piece::Text(s) => f.write_str(s)?,
                Piece::UnaryOp(op) => write!(f, "{op}")?,
                Piece::BinOp(op) => write!(f, "{op}")?,
            }
        }
        Ok(())
    }
}
