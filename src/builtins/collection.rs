use super::arity_error;
use crate::ast::Node;
use crate::evaluator::Evaluator;
use crate::value::{EvalError, Value};

pub fn length(evaluator: &mut Evaluator, args: &[Node], line: usize) -> Value {
    let arg = match args {
        [arg] => arg,
        _ => return arity_error(evaluator, line, "#", args.len(), "1"),
    };
    let value = evaluator.evaluate(arg);
    match value.len() {
        Some(len) => Value::Number(len as f64),
        None => {
            evaluator.report(
                line,
                EvalError::UnsupportedArgType {
                    operator: "#",
                    kind: value.kind(),
                },
            );
            Value::Nothing
        }
    }
}

/// `.. to`, `.. from to` or `.. from to step`. The end is excluded.
pub fn range(evaluator: &mut Evaluator, args: &[Node], line: usize) -> Value {
    if args.len() > 3 {
        arity_error(evaluator, line, "..", args.len(), "0 to 3");
        return Value::Collection(vec![]);
    }

    let mut bounds = Vec::with_capacity(args.len());
    for arg in args {
        match evaluator.evaluate(arg) {
            Value::Number(n) => bounds.push(n),
            other => {
                evaluator.report(
                    line,
                    EvalError::UnsupportedArgType {
                        operator: "..",
                        kind: other.kind(),
                    },
                );
                return Value::Collection(vec![]);
            }
        }
    }

    let (from, to, step) = match bounds[..] {
        [] => return Value::Collection(vec![]),
        [to] => (0.0, to, 1.0),
        [from, to] => (from, to, 1.0),
        [from, to, step] => (from, to, step),
        _ => return Value::Collection(vec![]),
    };
    if from > to || step <= 0.0 || !(from.is_finite() && to.is_finite() && step.is_finite()) {
        evaluator.report(line, EvalError::InvalidRange { from, to, step });
        return Value::Collection(vec![]);
    }

    let elements = (0..)
        .map(|k| from + step * k as f64)
        .take_while(|n| *n < to)
        .map(Value::Number)
        .collect::<Vec<_>>();
    Value::Collection(elements)
}
