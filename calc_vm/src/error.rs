use std::fmt::Display;

pub use calc_syntax::error::Error;

#[derive(Debug)]
pub enum ErrorMsg {
    EmptyStack,
    UnbalancedStack,
    InvalidOpcode,
    MissingOperand,
    InvalidConstant,
    TooManyConstants,
}

impl Display for ErrorMsg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::EmptyStack => "stack underflow at",
            Self::UnbalancedStack => "expected a single value on the stack, found",
            Self::InvalidOpcode => "invalid opcode",
            Self::MissingOperand => "missing operand for",
            Self::InvalidConstant => "invalid constant pool offset",
            Self::TooManyConstants => "too many constants in chunk, limit is",
        })
    }
}

pub fn runtime_error(msg: ErrorMsg, ctx: impl Display) -> Error {
    Error::Runtime(format!("Runtime error: {} {}", msg, ctx))
}
