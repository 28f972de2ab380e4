use super::{arity_error, name_of};
use crate::ast::Node;
use crate::evaluator::Evaluator;
use crate::value::{EvalError, Function, Operator, Value};

/// `: name value ...` defines each pair in the innermost frame.
pub fn bind(evaluator: &mut Evaluator, args: &[Node], line: usize) -> Value {
    let mut result = Value::Nothing;
    for pair in args.chunks(2) {
        let name = match name_of(evaluator, &pair[0], ":") {
            Some(name) => name,
            None => continue,
        };
        let value = match pair.get(1) {
            Some(node) => evaluator.evaluate(node),
            None => Value::Nothing,
        };
        match evaluator.env().define(name, value.clone()) {
            Ok(()) => result = value,
            Err(err) => evaluator.report(line, err),
        }
    }
    result
}

/// `. name value ...` changes existing bindings, returning what the last one
/// held before.
pub fn mutate(evaluator: &mut Evaluator, args: &[Node], line: usize) -> Value {
    let mut result = Value::Nothing;
    for pair in args.chunks(2) {
        let name = match name_of(evaluator, &pair[0], ".") {
            Some(name) => name,
            None => continue,
        };
        let value = match pair.get(1) {
            Some(node) => evaluator.evaluate(node),
            None => Value::Nothing,
        };
        match evaluator.env().assign(name, value) {
            Ok(previous) => result = previous,
            Err(err) => evaluator.report(line, err),
        }
    }
    result
}

/// `~ params... body` builds a function. Parameters must be plain words.
pub fn function(evaluator: &mut Evaluator, args: &[Node], line: usize) -> Value {
    let (body, params) = match args.split_last() {
        Some(split) => split,
        None => return arity_error(evaluator, line, "~", 0, "at least 1"),
    };

    let mut parameters = Vec::with_capacity(params.len());
    for param in params {
        match name_of(evaluator, param, "~") {
            Some(name) => parameters.push(name.to_owned()),
            None => return Value::Nothing,
        }
    }

    Operator::from(Function {
        parameters,
        body: body.clone(),
    })
    .into()
}

pub fn increment(evaluator: &mut Evaluator, args: &[Node], line: usize) -> Value {
    step(evaluator, args, line, "++", 1.0)
}

pub fn decrement(evaluator: &mut Evaluator, args: &[Node], line: usize) -> Value {
    step(evaluator, args, line, "--", -1.0)
}

fn step(
    evaluator: &mut Evaluator,
    args: &[Node],
    line: usize,
    operator: &'static str,
    delta: f64,
) -> Value {
    let target = match args {
        [target] => target,
        _ => return arity_error(evaluator, line, operator, args.len(), "1"),
    };
    let name = match name_of(evaluator, target, operator) {
        Some(name) => name,
        None => return Value::Nothing,
    };

    let current = match evaluator.env().get(name) {
        Some(Value::Number(n)) => Ok(*n),
        Some(other) => Err(EvalError::UnsupportedArgType {
            operator,
            kind: other.kind(),
        }),
        None => Err(EvalError::Undeclared {
            name: name.to_owned(),
        }),
    };

    let updated = match current {
        Ok(n) => n + delta,
        Err(err) => {
            evaluator.report(line, err);
            return Value::Nothing;
        }
    };
    match evaluator.env().assign(name, updated.into()) {
        Ok(_) => updated.into(),
        Err(err) => {
            evaluator.report(line, err);
            Value::Nothing
        }
    }
}
