use crate::ast::Node;
use crate::evaluator::Evaluator;
use crate::value::{Builtin, BuiltinFn, EvalError, Value};
use lazy_static::lazy_static;
use std::collections::HashMap;

mod arithmetic;
mod binding;
mod collection;
mod compare;
mod control;

fn builtin(name: &'static str, func: BuiltinFn) -> (&'static str, Builtin) {
    (name, Builtin { name, func })
}

/// Reports a call with the wrong number of arguments.
fn arity_error(
    evaluator: &mut Evaluator,
    line: usize,
    operator: &'static str,
    got: usize,
    want: &'static str,
) -> Value {
    evaluator.report(line, EvalError::IncorrectArity { operator, got, want });
    Value::Nothing
}

/// The identifier an argument names, reporting anything else.
fn name_of<'n>(
    evaluator: &mut Evaluator,
    node: &'n Node,
    operator: &'static str,
) -> Option<&'n str> {
    let name = node.as_name();
    if name.is_none() {
        evaluator.report(node.line(), EvalError::InvalidName { operator });
    }
    name
}

lazy_static! {
    pub static ref BUILTINS: HashMap<&'static str, Builtin> = vec![
        builtin(";", control::print),
        builtin("?", control::conditional),
        builtin("@", control::repeat),
        builtin("??", control::random),
        builtin(":", binding::bind),
        builtin(".", binding::mutate),
        builtin("~", binding::function),
        builtin("++", binding::increment),
        builtin("--", binding::decrement),
        builtin("+", arithmetic::add),
        builtin("-", arithmetic::subtract),
        builtin("*", arithmetic::multiply),
        builtin("/", arithmetic::divide),
        builtin("%", arithmetic::remainder),
        builtin("**", arithmetic::power),
        builtin("//", arithmetic::floor_divide),
        builtin("||", arithmetic::abs),
        builtin("|^", arithmetic::max_or_ceil),
        builtin("|_", arithmetic::min_or_floor),
        builtin("+-", arithmetic::sign),
        builtin("=", compare::equal),
        builtin("!=", compare::not_equal),
        builtin("<", compare::less),
        builtin(">", compare::greater),
        builtin("<=", compare::less_equal),
        builtin(">=", compare::greater_equal),
        builtin("!", compare::not),
        builtin("&", compare::and),
        builtin("|", compare::or),
        builtin("#", collection::length),
        builtin("..", collection::range),
    ]
    .into_iter()
    .collect();
}
