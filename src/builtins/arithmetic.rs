use super::arity_error;
use crate::ast::Node;
use crate::evaluator::Evaluator;
use crate::value::{EvalError, Value};

type Binary = fn(&Value, &Value) -> Option<Value>;
type Unary = fn(Value) -> Option<Value>;

/// Folds the evaluated arguments left to right. A single collection argument
/// is folded element by element, any other single argument goes through
/// `unary`. An operand the fold can't combine is reported and skipped.
fn reduce(
    evaluator: &mut Evaluator,
    args: &[Node],
    line: usize,
    operator: &'static str,
    binary: Binary,
    unary: Unary,
) -> Value {
    let mut values: Vec<Value> = args.iter().map(|arg| evaluator.evaluate(arg)).collect();
    if values.len() == 1 {
        match values.pop() {
            Some(Value::Collection(items)) => values = items,
            Some(single) => {
                let kind = single.kind();
                return match unary(single) {
                    Some(result) => result,
                    None => {
                        evaluator.report(line, EvalError::UnsupportedArgType { operator, kind });
                        Value::Nothing
                    }
                };
            }
            None => {}
        }
    }

    let mut operands = values.into_iter();
    let mut acc = match operands.next() {
        Some(first) => first,
        None => return Value::Nothing,
    };
    for operand in operands {
        let combined = if acc.kind() == operand.kind() {
            binary(&acc, &operand)
        } else {
            None
        };
        match combined {
            Some(result) => acc = result,
            None => evaluator.report(
                line,
                EvalError::binary_op_error(operator, acc.kind(), operand.kind()),
            ),
        }
    }
    acc
}

fn numbers(left: &Value, right: &Value) -> Option<(f64, f64)> {
    match (left, right) {
        (Value::Number(x), Value::Number(y)) => Some((*x, *y)),
        _ => None,
    }
}

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => Some(*n),
        _ => None,
    }
}

fn identity(value: Value) -> Option<Value> {
    Some(value)
}

pub fn add(evaluator: &mut Evaluator, args: &[Node], line: usize) -> Value {
    reduce(
        evaluator,
        args,
        line,
        "+",
        |left, right| match (left, right) {
            (Value::Number(x), Value::Number(y)) => Some((x + y).into()),
            (Value::String(x), Value::String(y)) => Some(format!("{}{}", x, y).into()),
            (Value::Collection(x), Value::Collection(y)) => {
                Some(x.iter().chain(y.iter()).cloned().collect::<Vec<_>>().into())
            }
            _ => None,
        },
        identity,
    )
}

pub fn subtract(evaluator: &mut Evaluator, args: &[Node], line: usize) -> Value {
    reduce(
        evaluator,
        args,
        line,
        "-",
        |left, right| numbers(left, right).map(|(x, y)| (x - y).into()),
        |value| number(&value).map(|n| (-n).into()),
    )
}

pub fn multiply(evaluator: &mut Evaluator, args: &[Node], line: usize) -> Value {
    reduce(
        evaluator,
        args,
        line,
        "*",
        |left, right| numbers(left, right).map(|(x, y)| (x * y).into()),
        identity,
    )
}

pub fn divide(evaluator: &mut Evaluator, args: &[Node], line: usize) -> Value {
    reduce(
        evaluator,
        args,
        line,
        "/",
        |left, right| numbers(left, right).map(|(x, y)| (x / y).into()),
        |value| number(&value).map(|n| (1.0 / n).into()),
    )
}

pub fn remainder(evaluator: &mut Evaluator, args: &[Node], line: usize) -> Value {
    reduce(
        evaluator,
        args,
        line,
        "%",
        |left, right| numbers(left, right).map(|(x, y)| (x % y).into()),
        identity,
    )
}

pub fn power(evaluator: &mut Evaluator, args: &[Node], line: usize) -> Value {
    reduce(
        evaluator,
        args,
        line,
        "**",
        |left, right| numbers(left, right).map(|(x, y)| x.powf(y).into()),
        identity,
    )
}

pub fn floor_divide(evaluator: &mut Evaluator, args: &[Node], line: usize) -> Value {
    reduce(
        evaluator,
        args,
        line,
        "//",
        |left, right| numbers(left, right).map(|(x, y)| (x / y).floor().into()),
        identity,
    )
}

/// `|^` takes the ceiling of one number, or the maximum of several.
pub fn max_or_ceil(evaluator: &mut Evaluator, args: &[Node], line: usize) -> Value {
    reduce(
        evaluator,
        args,
        line,
        "|^",
        |left, right| numbers(left, right).map(|(x, y)| x.max(y).into()),
        |value| number(&value).map(|n| n.ceil().into()),
    )
}

/// `|_` takes the floor of one number, or the minimum of several.
pub fn min_or_floor(evaluator: &mut Evaluator, args: &[Node], line: usize) -> Value {
    reduce(
        evaluator,
        args,
        line,
        "|_",
        |left, right| numbers(left, right).map(|(x, y)| x.min(y).into()),
        |value| number(&value).map(|n| n.floor().into()),
    )
}

fn unary_number(
    evaluator: &mut Evaluator,
    args: &[Node],
    line: usize,
    operator: &'static str,
    func: fn(f64) -> f64,
) -> Value {
    let arg = match args {
        [arg] => arg,
        _ => return arity_error(evaluator, line, operator, args.len(), "1"),
    };
    match evaluator.evaluate(arg) {
        Value::Number(n) => func(n).into(),
        other => {
            evaluator.report(
                line,
                EvalError::UnsupportedArgType {
                    operator,
                    kind: other.kind(),
                },
            );
            Value::Nothing
        }
    }
}

pub fn abs(evaluator: &mut Evaluator, args: &[Node], line: usize) -> Value {
    unary_number(evaluator, args, line, "||", f64::abs)
}

pub fn sign(evaluator: &mut Evaluator, args: &[Node], line: usize) -> Value {
    unary_number(evaluator, args, line, "+-", |n| {
        if n == 0.0 {
            0.0
        } else {
            n.signum()
        }
    })
}
