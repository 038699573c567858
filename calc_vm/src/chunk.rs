use std::fmt::Display;

use calc_syntax::ast::{BinOp, UnaryOp};
use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::error::{runtime_error, Error, ErrorMsg};

#[derive(Copy, Clone, Debug, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum Op {
    Push,
    Add,
    Sub,
    Mul,
    Div,
    Negate,
}

impl Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&format!("{self:?}").to_uppercase())
    }
}

/// A single stack machine instruction.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Instruction {
    Push(f64),
    Add,
    Sub,
    Mul,
    Div,
    Negate,
}

impl Instruction {
    pub fn op(&self) -> Op {
        match self {
            Self::Push(_) => Op::Push,
            Self::Add => Op::Add,
            Self::Sub => Op::Sub,
            Self::Mul => Op::Mul,
            Self::Div => Op::Div,
            Self::Negate => Op::Negate,
        }
    }
}

impl From<BinOp> for Instruction {
    fn from(op: BinOp) -> Self {
        match op {
            BinOp::Add => Self::Add,
            BinOp::Sub => Self::Sub,
            BinOp::Mul => Self::Mul,
            BinOp::Div => Self::Div,
        }
    }
}

impl From<UnaryOp> for Instruction {
    fn from(op: UnaryOp) -> Self {
        match op {
            UnaryOp::Negate => Self::Negate,
        }
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Push(v) => write!(f, "{} {v}", Op::Push),
            _ => write!(f, "{}", self.op()),
        }
    }
}

/// Byte encoding of an instruction sequence, suitable for handing
/// compiled code to another worker. `PUSH` is followed by a one byte
/// index into the constant pool.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Chunk {
    pub constants: Vec<f64>,
    pub ops: Vec<u8>,
}

impl Chunk {
    pub fn encode(code: &[Instruction]) -> Result<Self, Error> {
        let mut chunk = Self::default();
        for instruction in code {
            match instruction {
                Instruction::Push(v) => chunk.add_constant(*v)?,
                _ => chunk.add_op(instruction.op()),
            }
        }
        Ok(chunk)
    }

    pub fn add_constant(&mut self, v: f64) -> Result<(), Error> {
        // Identical constants share a pool slot
        let index = match self
            .constants
            .iter()
            .position(|c| c.to_bits() == v.to_bits())
        {
            Some(i) => i,
            None => {
                if self.constants.len() > u8::MAX.into() {
                    return Err(runtime_error(
                        ErrorMsg::TooManyConstants,
                        usize::from(u8::MAX) + 1,
                    ));
                }
                self.constants.push(v);
                self.constants.len() - 1
            }
        };
        self.add_op(Op::Push);
        self.add_op(index as u8);
        Ok(())
    }

    pub fn add_op<T: Into<u8>>(&mut self, op: T) {
        self.ops.push(op.into());
    }

    /// Decodes the chunk back into the instruction sequence it encodes.
    pub fn instructions(&self) -> Result<Vec<Instruction>, Error> {
        let mut code = Vec::default();
        let mut offset = 0;
        while offset < self.ops.len() {
            let byte = self.ops[offset];
            let op =
                Op::try_from(byte).map_err(|_| runtime_error(ErrorMsg::InvalidOpcode, byte))?;
            code.push(match op {
                Op::Push => {
                    offset += 1;
                    let index = *self
                        .ops
                        .get(offset)
                        .ok_or_else(|| runtime_error(ErrorMsg::MissingOperand, op))?;
                    let value = self
                        .constants
                        .get(index as usize)
                        .ok_or_else(|| runtime_error(ErrorMsg::InvalidConstant, index))?;
                    Instruction::Push(*value)
                }
                Op::Add => Instruction::Add,
                Op::Sub => Instruction::Sub,
                Op::Mul => Instruction::Mul,
                Op::Div => Instruction::Div,
                Op::Negate => Instruction::Negate,
            });
            offset += 1;
        }
        Ok(code)
    }

    /// Decodes the instruction at the given offset and pretty prints it with some metadata
    pub fn decode(&self, offset: usize) -> (String, usize) {
        let mut s = format!("{offset:0>4} ");

        let Some(&byte) = self.ops.get(offset) else {
            s.push_str("end of chunk");
            return (s, offset + 1);
        };
        match Op::try_from(byte) {
            Ok(op @ Op::Push) => {
                // The operand is printed as the constant pool index
                match self.ops.get(offset + 1) {
                    Some(&index) => match self.constants.get(index as usize) {
                        Some(v) => s.push_str(&format!("{op} {index:0>4} '{v}'")),
                        None => s.push_str(&format!("{op} {index:0>4} invalid constant")),
                    },
                    None => s.push_str(&format!("{op} missing operand")),
                }
                return (s, offset + 2);
            }
            Ok(op) => s.push_str(&format!("{op}")),
            Err(_) => s.push_str(&format!("{byte} invalid opcode")),
        }
        (s, offset + 1)
    }

    pub fn disassemble(&self) -> Vec<String> {
        let mut lines = Vec::default();
        let mut offset = 0;
        while offset < self.ops.len() {
            let (s, new_offset) = self.decode(offset);
            lines.push(s);
            offset = new_offset;
        }
        lines
    }
}
