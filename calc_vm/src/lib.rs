pub mod chunk;
pub mod codegen;
pub mod error;
pub mod vm;

use calc_syntax::{ast::Expr, context::Context};
use chunk::Instruction;
use error::Error;
use log::trace;
use vm::Vm;

use crate::codegen::Generator;

/// Expression evaluated when no input is given.
pub const DEFAULT_INPUT: &str = "(10 - 3) * (4 + 5)";

pub fn generate(expr: &Expr) -> Vec<Instruction> {
    Generator::default().generate(expr)
}

pub fn execute(code: &[Instruction]) -> Result<f64, Error> {
    Vm::default().exec(code)
}

/// Compiles source text down to instructions that can be executed
/// any number of times.
pub fn compile(source: &str, ctx: &mut Context) -> Result<Vec<Instruction>, Error> {
    ctx.check()?;
    trace!("Lexing {source}");
    let tokens = calc_syntax::tokenize(source, ctx)?;
    ctx.check()?;
    trace!("Parsing {tokens:#?}");
    let root = calc_syntax::parse(&tokens, ctx)?;
    ctx.check()?;
    trace!("Generating bytecode for {root}");
    Ok(generate(&root))
}

pub fn run(source: &str, ctx: &mut Context) -> Result<f64, Error> {
    let code = compile(source, ctx)?;
    ctx.check()?;
    trace!("Executing {code:?}");
    Vm::new(ctx.cancel().clone()).exec(&code)
}

pub fn compile_and_run(source: &str) -> Result<f64, Error> {
    run(source, &mut Context::default())
}
