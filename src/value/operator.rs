use super::Value;
use crate::ast::Node;
use crate::evaluator::Evaluator;
use std::fmt::{self, Debug, Display, Formatter};
use std::rc::Rc;
use tracing::trace;

/// Native operators receive their arguments unevaluated, together with the
/// caller's evaluator and the line of the call.
pub type BuiltinFn = for<'a, 'b> fn(&'b mut Evaluator<'a>, &[Node], usize) -> Value;

#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFn,
}

impl Debug for Builtin {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "Builtin({})", self.name)
    }
}

/// A user-defined operator. It captures parameter names and a body, never an
/// environment: the body runs against whatever frames are active at the call.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub parameters: Vec<String>,
    pub body: Node,
}

impl Display for Function {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "(~ {} {})", self.parameters.join(" "), self.body)
    }
}

impl Function {
    /// Pushes the call frame first, then evaluates each argument inside it
    /// and binds it before moving on, so later arguments see earlier
    /// parameters.
    fn call(&self, evaluator: &mut Evaluator, args: &[Node]) -> Value {
        let mut scope = evaluator.enter();
        for (i, name) in self.parameters.iter().enumerate() {
            let value = match args.get(i) {
                Some(arg) => scope.evaluate(arg),
                None => Value::Nothing,
            };
            if let Err(err) = scope.env().define(name, value) {
                scope.report(self.body.line(), err);
            }
        }
        scope.evaluate(&self.body)
    }
}

#[derive(Debug, Clone)]
pub enum Operator {
    Native(Builtin),
    Function(Rc<Function>),
}

impl PartialEq for Operator {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Native(x), Self::Native(y)) => x.name == y.name,
            (Self::Function(x), Self::Function(y)) => Rc::ptr_eq(x, y),
            _ => false,
        }
    }
}

impl From<Function> for Operator {
    fn from(function: Function) -> Self {
        Self::Function(Rc::new(function))
    }
}

impl From<Builtin> for Operator {
    fn from(builtin: Builtin) -> Self {
        Self::Native(builtin)
    }
}

impl Operator {
    /// Invokes the operator against the caller's frame stack.
    pub fn call(&self, evaluator: &mut Evaluator, args: &[Node], line: usize) -> Value {
        match self {
            Self::Native(builtin) => {
                trace!(operator = builtin.name, args = args.len(), line, "calling builtin");
                (builtin.func)(evaluator, args, line)
            }
            Self::Function(function) => {
                trace!(args = args.len(), line, "calling function");
                function.call(evaluator, args)
            }
        }
    }
}
