use std::fmt::Display;

use calc_syntax::context::Cancel;
use log::{debug, trace};

use crate::{
    chunk::{Chunk, Instruction, Op},
    error::{runtime_error, Error, ErrorMsg},
};

#[derive(Debug, Default)]
struct Stack {
    values: Vec<f64>,
}

impl Stack {
    fn push(&mut self, v: f64) {
        self.values.push(v);
    }

    fn pop(&mut self, op: Op) -> Result<f64, Error> {
        self.values
            .pop()
            .ok_or_else(|| runtime_error(ErrorMsg::EmptyStack, op))
    }

    /// Pops the right then the left operand and pushes `apply(left, right)`.
    fn binary(&mut self, op: Op, apply: fn(f64, f64) -> f64) -> Result<(), Error> {
        let right = self.pop(op)?;
        let left = self.pop(op)?;
        self.push(apply(left, right));
        Ok(())
    }

    /// Consumes the stack, which must hold exactly the result.
    fn finish(self) -> Result<f64, Error> {
        match self.values.as_slice() {
            [result] => Ok(*result),
            values => Err(runtime_error(ErrorMsg::UnbalancedStack, values.len())),
        }
    }
}

impl Display for Stack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values: Vec<String> = self.values.iter().map(f64::to_string).collect();
        f.write_str(&values.join(", "))
    }
}

/// Stack machine. Every call to [`Vm::exec`] starts from an empty stack.
#[derive(Debug, Default)]
pub struct Vm {
    cancel: Cancel,
}

impl Vm {
    pub fn new(cancel: Cancel) -> Self {
        Self { cancel }
    }

    pub fn exec(&self, code: &[Instruction]) -> Result<f64, Error> {
        if code.is_empty() {
            return Ok(0.0);
        }
        let mut stack = Stack::default();
        debug!("Virtual machine start");
        for instruction in code {
            self.cancel.check()?;
            let op = instruction.op();
            match *instruction {
                Instruction::Push(v) => stack.push(v),
                Instruction::Negate => {
                    let v = stack.pop(op)?;
                    stack.push(-v);
                }
                Instruction::Add => stack.binary(op, |l, r| l + r)?,
                Instruction::Sub => stack.binary(op, |l, r| l - r)?,
                Instruction::Mul => stack.binary(op, |l, r| l * r)?,
                Instruction::Div => stack.binary(op, |l, r| l / r)?,
            }
            trace!("{op:8} [{stack}]");
        }
        let result = stack.finish()?;
        debug!("Virtual machine end ({result})");
        Ok(result)
    }

    pub fn exec_chunk(&self, chunk: &Chunk) -> Result<f64, Error> {
        self.exec(&chunk.instructions()?)
    }
}
