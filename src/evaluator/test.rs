use super::*;
use crate::ast::Reference;
use crate::config::Config;
use crate::diagnostic::Collector;
use crate::lexer::lex;
use crate::parser::Parser;
use crate::value::format;
use crate::{run, Interpreter};
use indexmap::IndexMap;
use pretty_assertions::assert_eq;

fn run_clean(input: &str) -> Value {
    let outcome = run(input);
    assert_eq!(
        outcome.messages(),
        Vec::<String>::new(),
        "diagnostics for {:?}",
        input
    );
    outcome.value
}

fn run_eval_tests(cases: Vec<(&str, Value)>) {
    for (input, expected) in cases {
        assert_eq!(run_clean(input), expected, "input: {:?}", input);
    }
}

fn numbers(ns: &[f64]) -> Value {
    Value::Collection(ns.iter().map(|n| Value::Number(*n)).collect())
}

#[test]
fn test_literals_round_trip() {
    let cases = vec![
        ("42", "42"),
        ("-2.5", "-2.5"),
        ("0.5", "0.5"),
        ("0x1F", "31"),
        ("0b101", "5"),
        ("ok", "ok"),
        ("no", "no"),
        ("'hi there'", "hi there"),
    ];

    for (input, expected) in cases {
        assert_eq!(format(&run_clean(input)), expected, "input: {:?}", input);
    }
}

#[test]
fn test_arithmetic() {
    let cases = vec![
        ("+ 1 2 3", 6.0.into()),
        ("- 5", (-5.0).into()),
        ("/ 4", 0.25.into()),
        ("- 10 2 3", 5.0.into()),
        ("* 2 3 4", 24.0.into()),
        ("/ 12 3 2", 2.0.into()),
        ("% 7 3", 1.0.into()),
        ("** 2 10", 1024.0.into()),
        ("// 7 2", 3.0.into()),
        ("+ [1 2 3]", 6.0.into()),
        ("+ 1 * 2 3", 7.0.into()),
        ("+", Value::Nothing),
        ("|| -3", 3.0.into()),
        ("|^ 2.1", 3.0.into()),
        ("|^ 1 5 3", 5.0.into()),
        ("|_ 2.9", 2.0.into()),
        ("|_ 4 -1 3", (-1.0).into()),
        ("+- -7", (-1.0).into()),
        ("+- 0", 0.0.into()),
    ];

    run_eval_tests(cases);
}

#[test]
fn test_concatenation() {
    let cases = vec![
        ("+ 'ab' 'cd'", "abcd".into()),
        ("+ [1] [2 3]", numbers(&[1.0, 2.0, 3.0])),
    ];

    run_eval_tests(cases);
}

#[test]
fn test_type_mismatch_skips_operand() {
    let outcome = run("+ 1 'x'");
    assert_eq!(outcome.value, Value::Number(1.0));
    assert_eq!(
        outcome.messages(),
        vec!["[*] type mismatch at function '+': Number and String (line 1)"]
    );

    let outcome = run("- 'x'");
    assert_eq!(outcome.value, Value::Nothing);
    assert_eq!(outcome.diagnostics.len(), 1);
}

#[test]
fn test_comparisons() {
    let cases = vec![
        ("< 1 2 3", 1.0.into()),
        ("< 1 3 2", 0.0.into()),
        ("= 2 2 2", 1.0.into()),
        ("!= 1 2", 1.0.into()),
        (">= 3 3 1", 1.0.into()),
        ("<= 2 1", 0.0.into()),
        ("> 'b' 'a'", 1.0.into()),
        ("= 'ab' ['a' 'b']", 1.0.into()),
        ("= 1 'a'", 0.0.into()),
        ("! 0", 1.0.into()),
        ("! 'x'", 0.0.into()),
        ("& 1 'a' ok", 1.0.into()),
        ("& 1 no", 0.0.into()),
        ("| 0 '' 3", 1.0.into()),
        ("| 0 no", 0.0.into()),
    ];

    run_eval_tests(cases);
}

#[test]
fn test_comparison_stops_at_first_failure() {
    let outcome = run("< 2 1 (; 'never')");
    assert_eq!(outcome.value, Value::Number(0.0));
    assert!(outcome.output.is_empty());

    let outcome = run("< 1 'a'");
    assert_eq!(outcome.value, Value::Number(0.0));
    assert_eq!(outcome.diagnostics.len(), 1);
}

#[test]
fn test_conditionals() {
    let cases = vec![
        ("? 0 'a' 1 'b' 'c'", "b".into()),
        ("? 0 'a'", Value::Nothing),
        ("? 0 'a' 'c'", "c".into()),
        ("? ok 1 2", 1.0.into()),
    ];

    run_eval_tests(cases);

    let outcome = run("? 1 'a' (; 'skipped')");
    assert!(outcome.output.is_empty());
}

#[test]
fn test_bindings() {
    let cases = vec![
        (": x 5\n; x", 5.0.into()),
        (": x 1 y 2\n+ x y", 3.0.into()),
        (": x 1\n. x 7", 1.0.into()),
        (": x 1\n. x 7\n+ x 0", 7.0.into()),
        (": n 1\n++ n\n++ n", 3.0.into()),
        (": n 1\n-- n", 0.0.into()),
    ];

    run_eval_tests(cases);
}

#[test]
fn test_bound_reference_evaluates_to_its_value() {
    let mut env = Environment::with_builtins();
    let mut collector = Collector::default();
    let mut rng = Config::with_seed(0).rng();

    let tokens = lex(": x 5").expect("lex errors found");
    let (program, errors) = Parser::new(&tokens).parse_program();
    assert_eq!(errors, vec![]);

    let mut evaluator = Evaluator::new(&mut env, &mut collector, &mut rng);
    evaluator.evaluate_statements(&program.statements);
    let value = evaluator.evaluate(&Reference::new("x", 2).into());

    assert_eq!(value, Value::Number(5.0));
    assert!(collector.diagnostics.is_empty());
}

#[test]
fn test_binding_errors() {
    let cases = vec![
        (
            ": _k 1\n: _k 2",
            "[!] words starting with '_' can't be modified: '_k' (line 2)",
        ),
        (
            ": _k 1\n. _k 2",
            "[!] words starting with '_' can't be modified: '_k' (line 2)",
        ),
        (
            ". nope 1",
            "[*] couldn't modify 'nope' because it wasn't declared (line 1)",
        ),
        (": 1 2", "[*] invalid name for ':' (line 1)"),
        (
            ": s 'a'\n++ s",
            "[*] argument to '++' not supported, got String (line 2)",
        ),
        ("g 1", "[*] couldn't find function 'g' (line 1)"),
        (": x 5\nx", "[*] not a function: Number (line 2)"),
        (
            "; nope",
            "[*] couldn't find 'nope', returning nothing instead (line 1)",
        ),
    ];

    for (input, message) in cases {
        assert_eq!(run(input).messages(), vec![message], "input: {:?}", input);
    }
}

#[test]
fn test_scopes() {
    let cases = vec![
        ("(: y 2\n+ y 1)", 3.0.into()),
        ("(1\n+ ^ 1\n* ^ 10)", 20.0.into()),
        ("()", Value::Nothing),
    ];

    run_eval_tests(cases);

    let outcome = run("(: y 2\n+ y 1)\n; y");
    assert_eq!(outcome.value, Value::Nothing);
    assert_eq!(outcome.output, vec!["∅"]);
    assert_eq!(
        outcome.messages(),
        vec!["[*] couldn't find 'y', returning nothing instead (line 3)"]
    );
}

#[test]
fn test_functions() {
    let cases = vec![
        (": add ~ a b (+ a b)\nadd 2 3", 5.0.into()),
        (": f ~ a b b\nf 1", Value::Nothing),
        (": f ~ 7\nf", 7.0.into()),
        (": twice ~ g x (g (g x))\n: inc ~ n (+ n 1)\ntwice inc 5", 7.0.into()),
    ];

    run_eval_tests(cases);
}

#[test]
fn test_arguments_are_bound_in_the_callee_frame() {
    let cases = vec![
        (": a 10\n: f ~ a b (+ a b)\nf 1 a", 2.0.into()),
        (": f ~ x y (+ x y)\nf 3 (* x 2)", 9.0.into()),
    ];

    run_eval_tests(cases);
}

#[test]
fn test_extra_arguments_are_not_evaluated() {
    let outcome = run(": f ~ a a\nf 1 (; 'side')");
    assert_eq!(outcome.value, Value::Number(1.0));
    assert!(outcome.output.is_empty());
    assert!(outcome.diagnostics.is_empty());
}

#[test]
fn test_functions_see_the_callers_frames() {
    let cases = vec![
        (": show ~ (+ z 1)\n(: z 41\nshow)", 42.0.into()),
        (": get ~ local\n: wrap ~ (: local 'inner'\nget)\nwrap", "inner".into()),
    ];

    run_eval_tests(cases);
}

#[test]
fn test_factorial() {
    let input = ": fact ~ n (
    ? (< n 1) 1 * n (fact - n 1)
)
; (fact 5)";

    let outcome = run(input);
    assert_eq!(outcome.messages(), Vec::<String>::new());
    assert_eq!(outcome.value, Value::Number(120.0));
    assert_eq!(outcome.output, vec!["120"]);
}

#[test]
fn test_loops() {
    let cases = vec![
        (
            ": total 0\n@ [10 20 30] i v (. total (+ total v))\n; total",
            60.0.into(),
        ),
        (": s 0\n@ [5 5 5] i (. s (+ s i))\n; s", 3.0.into()),
        (": out ''\n@ 'abc' i c (. out (+ c out))\n; out", "cba".into()),
        (
            ": m {a 1 b 2}\n: keys ''\n@ m k (. keys (+ keys k))\n; keys",
            "ab".into(),
        ),
        ("@ [1 2 3] i (+ i 1)", 3.0.into()),
        ("@ [1 2 3] i v (? ^ (+ ^ v) v)", 6.0.into()),
        (": n 0\n@ (< n 3) (++ n)", 3.0.into()),
        (": n 0\n@ (< (++ n) 4)\n; n", 4.0.into()),
    ];

    run_eval_tests(cases);
}

#[test]
fn test_loop_frame_is_dropped() {
    let outcome = run("@ [1] i i\n; i");
    assert_eq!(outcome.value, Value::Nothing);
    assert_eq!(outcome.diagnostics.len(), 1);

    let outcome = run("@ 5 i i");
    assert_eq!(
        outcome.messages(),
        vec!["[*] argument to '@' not supported, got Number (line 1)"]
    );
}

#[test]
fn test_collections() {
    let cases = vec![
        (".. 4", numbers(&[0.0, 1.0, 2.0, 3.0])),
        (".. 2 5", numbers(&[2.0, 3.0, 4.0])),
        (".. 0 1 0.25", numbers(&[0.0, 0.25, 0.5, 0.75])),
        ("..", numbers(&[])),
        ("# 'hello'", 5.0.into()),
        ("# [1 2]", 2.0.into()),
        ("# {a 1}", 1.0.into()),
        ("[]", numbers(&[])),
    ];

    run_eval_tests(cases);
}

#[test]
fn test_collection_errors() {
    let cases = vec![
        (
            ".. 5 2",
            "[*] range '..' can't go from 5 to 2 by 1 (line 1)",
            numbers(&[]),
        ),
        (
            ".. 1 2 3 4",
            "[*] wrong number of arguments to '..'. got=4, want=0 to 3 (line 1)",
            numbers(&[]),
        ),
        (
            "[1 'a']",
            "[*] collections should store only one type of value, found Number and String (line 1)",
            numbers(&[]),
        ),
        (
            "# 5",
            "[*] argument to '#' not supported, got Number (line 1)",
            Value::Nothing,
        ),
    ];

    for (input, message, value) in cases {
        let outcome = run(input);
        assert_eq!(outcome.messages(), vec![message], "input: {:?}", input);
        assert_eq!(outcome.value, value, "input: {:?}", input);
    }
}

#[test]
fn test_mappings() {
    let mut expected = IndexMap::new();
    expected.insert("a".to_owned(), Value::Number(1.0));
    expected.insert("b c".to_owned(), Value::Number(3.0));

    assert_eq!(
        run_clean("{a 1 'b c' (+ 1 2)}"),
        Value::Mapping(expected.clone())
    );

    let outcome = run("{1 2\na 1 'b c' 3}");
    assert_eq!(outcome.value, Value::Mapping(expected));
    assert_eq!(outcome.diagnostics.len(), 1);
}

#[test]
fn test_print() {
    let outcome = run("; 1 'a' [1 2]\n; ok");
    assert_eq!(outcome.output, vec!["1\ta\t[ 1 2 ]", "ok"]);
    assert_eq!(outcome.value, Value::Boolean(true));
}

#[test]
fn test_random() {
    let mut interpreter = Interpreter::with_config(Config::with_seed(3));
    for _ in 0..20 {
        match interpreter.run("??").value {
            Value::Number(n) => assert!((0.0..1.0).contains(&n)),
            other => panic!("expected a number, got {:?}", other),
        }

        let outcome = interpreter.run("?? 'a' 'b' 'c'");
        assert!(["a", "b", "c"]
            .iter()
            .any(|s| outcome.value == Value::from(*s)));
        assert!(outcome.diagnostics.is_empty());
    }
}

#[test]
fn test_random_evaluates_only_the_pick() {
    let mut interpreter = Interpreter::with_config(Config::with_seed(11));
    for _ in 0..20 {
        let outcome = interpreter.run("?? (; 'a') (; 'b') (; 'c')");
        assert_eq!(outcome.output.len(), 1);
        assert_eq!(Value::from(outcome.output[0].as_str()), outcome.value);
    }
}

#[test]
fn test_large_numbers_print_in_exponent_form() {
    let outcome = run("; * 100000000000 10000000000\n; / 10000000");
    assert_eq!(outcome.output, vec!["1e+21", "1e-7"]);
}
