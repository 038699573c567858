use calc_syntax::{
    context::{Cancel, Context},
    parse::MAX_DEPTH,
    tokenize,
};
use calc_vm::{
    chunk::{Chunk, Instruction},
    compile, compile_and_run,
    error::Error,
    execute, run,
    vm::Vm,
    DEFAULT_INPUT,
};
use test_case::test_case;

#[test_case("42", 42.0 ; "number")]
#[test_case("2 + 3 * 4", 2.0 + 3.0 * 4.0 ; "precedence")]
#[test_case("(2 + 3) * 4", (2.0 + 3.0) * 4.0 ; "grouping")]
#[test_case("-3 * 4", -3.0 * 4.0 ; "unary minus binds tighter")]
#[test_case("-(3 + 4)", -(3.0 + 4.0) ; "negated group")]
#[test_case("10 - 3 - 2", 10.0 - 3.0 - 2.0 ; "subtraction is left associative")]
#[test_case("100 / 10 / 5", 100.0 / 10.0 / 5.0 ; "division is left associative")]
#[test_case("(10 - 3) * (4 + 5)", 63.0 ; "default input")]
#[test_case("1.5 * 4 / 3", 1.5 * 4.0 / 3.0 ; "decimals")]
#[test_case("0.1 + 0.2", 0.1 + 0.2 ; "float addition")]
#[test_case("1 / 3 * 3", 1.0 / 3.0 * 3.0 ; "float division")]
#[test_case("2 - -3", 2.0 - -3.0 ; "binary then unary minus")]
#[test_case("--4", 4.0 ; "double negation")]
#[test_case("8 - 2 * 3 + 12 / 4", 8.0 - 2.0 * 3.0 + 12.0 / 4.0 ; "mixed")]
#[test_case("\t12\n+ 30 ", 42.0 ; "whitespace and newlines")]
#[test_case("1 $ + 2", 3.0 ; "illegal character skipped")]
fn evaluates(input: &str, expected: f64) {
    assert_eq!(compile_and_run(input), Ok(expected));
}

#[test_case("(1 + 2" ; "unmatched paren")]
#[test_case("1 + " ; "missing operand")]
#[test_case("" ; "empty input")]
#[test_case("()" ; "empty group")]
#[test_case("1 2" ; "trailing number")]
#[test_case("1 + 2)" ; "trailing paren")]
#[test_case("* 3" ; "leading operator")]
#[test_case("?" ; "only illegal characters")]
fn syntax_errors(input: &str) {
    assert!(matches!(compile_and_run(input), Err(Error::Syntax(_))));
}

#[test]
fn default_input() {
    assert_eq!(compile_and_run(DEFAULT_INPUT), Ok(63.0));
}

#[test]
fn error_names_the_offending_token() {
    assert_eq!(
        compile_and_run("(1 + 2").unwrap_err().to_string(),
        "Parse error at line 1: missing closing parenthesis at end of input"
    );
    assert_eq!(
        compile_and_run("1 + )").unwrap_err().to_string(),
        "Parse error at line 1: unexpected token )"
    );
}

#[test]
fn strict_context_rejects_illegal_characters() {
    let mut ctx = Context::default().strict(true);
    assert_eq!(
        run("1 $ 2", &mut ctx),
        Err(Error::Lex(
            "Lex error at line 1: unexpected character $".to_string()
        ))
    );
}

#[test]
fn diagnostics_are_reported() {
    let mut ctx = Context::default();
    assert_eq!(run("1 + 2 ?", &mut ctx), Ok(3.0));
    assert_eq!(
        ctx.diagnostics(),
        ["Lex error at line 1: unexpected character ?"]
    );
}

#[test]
fn cancelled_run_is_aborted() {
    let cancel = Cancel::new();
    let mut ctx = Context::new(cancel.clone());
    cancel.cancel();
    assert_eq!(run(DEFAULT_INPUT, &mut ctx), Err(Error::Aborted));
    assert_eq!(compile(DEFAULT_INPUT, &mut ctx), Err(Error::Aborted));
}

#[test]
fn repeated_execution_is_idempotent() {
    let code = compile("(1.5 - 4) / 3 * -2", &mut Context::default()).unwrap();
    let first = execute(&code).unwrap();
    for _ in 0..3 {
        assert_eq!(execute(&code), Ok(first));
    }
}

#[test]
fn chunk_round_trip_executes() {
    let code = compile(DEFAULT_INPUT, &mut Context::default()).unwrap();
    let chunk = Chunk::encode(&code).unwrap();
    assert_eq!(chunk.instructions().unwrap(), code);
    assert_eq!(Vm::default().exec_chunk(&chunk), Ok(63.0));
}

#[test]
fn empty_code_executes_to_zero() {
    assert_eq!(execute(&[]), Ok(0.0));
}

#[test]
fn malformed_code_is_a_runtime_error() {
    assert!(matches!(
        execute(&[Instruction::Push(1.0), Instruction::Mul]),
        Err(Error::Runtime(_))
    ));
    assert!(matches!(
        execute(&[Instruction::Push(1.0), Instruction::Push(2.0)]),
        Err(Error::Runtime(_))
    ));
}

#[test]
fn division_by_zero_is_not_an_error() {
    assert_eq!(compile_and_run("1 / 0"), Ok(f64::INFINITY));
    assert!(compile_and_run("0 / 0").unwrap().is_nan());
}

#[test]
fn long_flat_expressions() {
    let terms = 50_000;
    assert_eq!(
        compile_and_run(&vec!["1"; terms].join(" + ")),
        Ok(terms as f64)
    );
    assert_eq!(
        compile_and_run(&format!("0{}", " - 2 * 3".repeat(terms))),
        Ok(-6.0 * terms as f64)
    );
}

#[test]
fn nesting_within_the_limit() {
    let depth = MAX_DEPTH / 2;
    let nested = format!("{}1{}", "(-".repeat(depth), ")".repeat(depth));
    assert_eq!(compile_and_run(&nested), Ok(1.0));
}

#[test]
fn deep_nesting_is_a_syntax_error() {
    let depth = 20_000;
    let groups = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
    assert_eq!(
        compile_and_run(&groups).unwrap_err().to_string(),
        "Parse error at line 1: nesting too deep at ("
    );
    assert!(matches!(
        compile_and_run(&format!("{}1", "-".repeat(depth))),
        Err(Error::Syntax(_))
    ));
}

#[test]
fn cancelled_parse_is_aborted() {
    let mut ctx = Context::default();
    let tokens = tokenize(DEFAULT_INPUT, &mut ctx).unwrap();
    ctx.cancel().cancel();
    assert_eq!(calc_syntax::parse(&tokens, &ctx), Err(Error::Aborted));
}
