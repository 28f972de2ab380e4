use super::{arity_error, name_of};
use crate::ast::Node;
use crate::evaluator::{Evaluator, PREVIOUS};
use crate::value::{format, EvalError, Value};
use rand::Rng;

/// `; values...` prints every value on one tab-separated line.
pub fn print(evaluator: &mut Evaluator, args: &[Node], _line: usize) -> Value {
    let values: Vec<Value> = args.iter().map(|arg| evaluator.evaluate(arg)).collect();
    let text: Vec<String> = values.iter().map(format).collect();
    evaluator.print(&text.join("\t"));
    values.into_iter().last().unwrap_or_default()
}

/// `? cond result ... [default]` evaluates only the branch it picks.
pub fn conditional(evaluator: &mut Evaluator, args: &[Node], _line: usize) -> Value {
    let mut pairs = args.chunks_exact(2);
    for pair in pairs.by_ref() {
        if evaluator.evaluate(&pair[0]).truth_value() {
            return evaluator.evaluate(&pair[1]);
        }
    }
    match pairs.remainder() {
        [default] => evaluator.evaluate(default),
        _ => Value::Nothing,
    }
}

/// `@` has three forms:
///
/// * `@ expr` repeats `expr` while it is truthy,
/// * `@ cond body` repeats `body` while `cond` is truthy,
/// * `@ source index [value] body` runs `body` once per entry of `source`.
pub fn repeat(evaluator: &mut Evaluator, args: &[Node], line: usize) -> Value {
    match args {
        [expr] => loop {
            let result = evaluator.evaluate(expr);
            if !result.truth_value() {
                return result;
            }
        },
        [cond, body] => {
            let mut result = Value::Nothing;
            while evaluator.evaluate(cond).truth_value() {
                result = evaluator.evaluate(body);
            }
            result
        }
        [source, index, body] => iterate(evaluator, line, source, index, None, body),
        [source, index, value, body] => iterate(evaluator, line, source, index, Some(value), body),
        _ => arity_error(evaluator, line, "@", args.len(), "1 to 4"),
    }
}

fn iterate(
    evaluator: &mut Evaluator,
    line: usize,
    source: &Node,
    index: &Node,
    value: Option<&Node>,
    body: &Node,
) -> Value {
    let source = evaluator.evaluate(source);
    let entries = match source.entries() {
        Some(entries) => entries,
        None => {
            evaluator.report(
                line,
                EvalError::UnsupportedArgType {
                    operator: "@",
                    kind: source.kind(),
                },
            );
            return Value::Nothing;
        }
    };

    let index = match name_of(evaluator, index, "@") {
        Some(name) => name,
        None => return Value::Nothing,
    };
    let value = match value.map(|node| name_of(evaluator, node, "@")) {
        Some(None) => return Value::Nothing,
        Some(name) => name,
        None => None,
    };

    let mut result = Value::Nothing;
    let mut frame = evaluator.enter();
    for (key, item) in entries {
        frame.env().set(PREVIOUS, result);
        frame.env().set(index, key);
        if let Some(value) = value {
            frame.env().set(value, item);
        }
        result = frame.evaluate(body);
    }
    result
}

/// `??` draws from `[0, 1)`; with arguments it evaluates one of them at
/// random.
pub fn random(evaluator: &mut Evaluator, args: &[Node], _line: usize) -> Value {
    if args.is_empty() {
        return Value::Number(evaluator.rng().gen());
    }
    let pick = evaluator.rng().gen_range(0..args.len());
    evaluator.evaluate(&args[pick])
}
