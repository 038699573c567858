use calc_syntax::ast::Expr;
use log::debug;

use crate::chunk::Instruction;

/// Work item of the post-order walk.
enum Visit<'a> {
    Enter(&'a Expr),
    Exit(Instruction),
}

/// Flattens an expression tree into post-fix instructions.
#[derive(Default, Debug)]
pub struct Generator {
    code: Vec<Instruction>,
}

impl Generator {
    pub fn generate(&mut self, expr: &Expr) -> Vec<Instruction> {
        debug!("Instruction block begin");
        self.generate_expr(expr);
        debug!("Instruction block end");
        std::mem::take(&mut self.code)
    }

    fn generate_expr(&mut self, expr: &Expr) {
        let mut pending = vec![Visit::Enter(expr)];
        while let Some(visit) = pending.pop() {
            match visit {
                Visit::Enter(Expr::Operand(n)) => self.emit(Instruction::Push(*n)),
                Visit::Enter(Expr::Unary { op, expr }) => {
                    pending.push(Visit::Exit((*op).into()));
                    pending.push(Visit::Enter(expr));
                }
                Visit::Enter(Expr::Binary { lhs, op, rhs }) => {
                    // Popped in reverse, so the left operand is emitted first
                    // and the right operand ends up on top of the stack
                    pending.push(Visit::Exit((*op).into()));
                    pending.push(Visit::Enter(rhs));
                    pending.push(Visit::Enter(lhs));
                }
                Visit::Exit(instruction) => self.emit(instruction),
            }
        }
    }

    fn emit(&mut self, instruction: Instruction) {
        debug!("[{:0>4}] {instruction}", self.code.len());
        self.code.push(instruction);
    }
}
