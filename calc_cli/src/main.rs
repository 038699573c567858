use calc_syntax::context::Context;
use calc_vm::{run, DEFAULT_INPUT};
use log::{debug, info};
use std::io::{self, Write};

fn main() {
    pretty_env_logger::init();
    info!("Empty lines evaluate {DEFAULT_INPUT}");
    let (stdin, mut stdout) = (io::stdin(), io::stdout());
    loop {
        let mut line = String::default();
        print!(">>> ");
        stdout.flush().expect("Failed to flush stdout");
        let n = stdin.read_line(&mut line).expect("Failed to read line");
        // If zero bytes are read, then exit (usually triggered by Ctrl-D)
        if n == 0 {
            break;
        }
        let source = match line.trim() {
            "" => DEFAULT_INPUT,
            s => s,
        };
        debug!("Evaluating {source}");
        let mut ctx = Context::default();
        let result = run(source, &mut ctx);
        ctx.diagnostics().iter().for_each(|d| eprintln!("{d}"));
        match result {
            Ok(value) => println!("{value}"),
            Err(e) => eprintln!("{e}"),
        }
    }
}
