use super::arity_error;
use crate::ast::Node;
use crate::evaluator::Evaluator;
use crate::value::{EvalError, Value};
use std::cmp::Ordering;

type Test = fn(&Value, &Value) -> Option<bool>;

fn truth(b: bool) -> Value {
    Value::Number(if b { 1.0 } else { 0.0 })
}

/// Checks `test` on each neighbouring pair, stopping at the first pair that
/// fails. Arguments after it are never evaluated.
fn chain(
    evaluator: &mut Evaluator,
    args: &[Node],
    line: usize,
    operator: &'static str,
    test: Test,
) -> Value {
    let mut previous: Option<Value> = None;
    for arg in args {
        let value = evaluator.evaluate(arg);
        if let Some(left) = &previous {
            match test(left, &value) {
                Some(true) => {}
                Some(false) => return truth(false),
                None => {
                    let err = EvalError::binary_op_error(operator, left.kind(), value.kind());
                    evaluator.report(line, err);
                    return truth(false);
                }
            }
        }
        previous = Some(value);
    }
    truth(true)
}

fn ordering(left: &Value, right: &Value, accept: fn(Ordering) -> bool) -> Option<bool> {
    match left.compare(right) {
        Some(ordering) => Some(accept(ordering)),
        // NaN
        None if matches!((left, right), (Value::Number(_), Value::Number(_))) => Some(false),
        None => None,
    }
}

pub fn equal(evaluator: &mut Evaluator, args: &[Node], line: usize) -> Value {
    chain(evaluator, args, line, "=", |left, right| Some(left == right))
}

pub fn not_equal(evaluator: &mut Evaluator, args: &[Node], line: usize) -> Value {
    chain(evaluator, args, line, "!=", |left, right| Some(left != right))
}

pub fn less(evaluator: &mut Evaluator, args: &[Node], line: usize) -> Value {
    chain(evaluator, args, line, "<", |left, right| {
        ordering(left, right, Ordering::is_lt)
    })
}

pub fn greater(evaluator: &mut Evaluator, args: &[Node], line: usize) -> Value {
    chain(evaluator, args, line, ">", |left, right| {
        ordering(left, right, Ordering::is_gt)
    })
}

pub fn less_equal(evaluator: &mut Evaluator, args: &[Node], line: usize) -> Value {
    chain(evaluator, args, line, "<=", |left, right| {
        ordering(left, right, Ordering::is_le)
    })
}

pub fn greater_equal(evaluator: &mut Evaluator, args: &[Node], line: usize) -> Value {
    chain(evaluator, args, line, ">=", |left, right| {
        ordering(left, right, Ordering::is_ge)
    })
}

pub fn not(evaluator: &mut Evaluator, args: &[Node], line: usize) -> Value {
    match args {
        [arg] => truth(!evaluator.evaluate(arg).truth_value()),
        _ => arity_error(evaluator, line, "!", args.len(), "1"),
    }
}

/// `&` is 1 when every argument is truthy.
pub fn and(evaluator: &mut Evaluator, args: &[Node], _line: usize) -> Value {
    truth(args.iter().all(|arg| evaluator.evaluate(arg).truth_value()))
}

/// `|` is 1 when any argument is truthy.
pub fn or(evaluator: &mut Evaluator, args: &[Node], _line: usize) -> Value {
    truth(args.iter().any(|arg| evaluator.evaluate(arg).truth_value()))
}
