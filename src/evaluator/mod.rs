use crate::ast::{CallExpression, LiteralValue, MappingLiteral, Node};
use crate::config::DEFAULT_MAX_DEPTH;
use crate::diagnostic::{Diagnostic, Reporter};
use crate::environment::Environment;
use crate::value::{EvalError, Value};
use indexmap::IndexMap;
use rand::rngs::StdRng;
use std::ops::{Deref, DerefMut};

#[cfg(test)]
mod test;

/// Frame-local name holding the result of the previous statement.
pub const PREVIOUS: &str = "^";

/// Walks the syntax tree against a borrowed frame stack. Every problem is
/// handed to the reporter and evaluation carries on with a fallback value.
///
/// Nesting deeper than `max_depth` reports once and then winds the whole
/// evaluation down: every further node evaluates to `Nothing` and nothing
/// else is reported or printed.
pub struct Evaluator<'a> {
    env: &'a mut Environment,
    reporter: &'a mut dyn Reporter,
    rng: &'a mut StdRng,
    depth: usize,
    max_depth: usize,
    exhausted: bool,
}

/// Keeps a frame pushed for as long as it lives.
pub struct FrameGuard<'e, 'a> {
    evaluator: &'e mut Evaluator<'a>,
}

impl<'a> Deref for FrameGuard<'_, 'a> {
    type Target = Evaluator<'a>;

    fn deref(&self) -> &Self::Target {
        &*self.evaluator
    }
}

impl DerefMut for FrameGuard<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.evaluator
    }
}

impl Drop for FrameGuard<'_, '_> {
    fn drop(&mut self) {
        self.evaluator.env.pop();
    }
}

impl<'a> Evaluator<'a> {
    pub fn new(
        env: &'a mut Environment,
        reporter: &'a mut dyn Reporter,
        rng: &'a mut StdRng,
    ) -> Self {
        Self {
            env,
            reporter,
            rng,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
            exhausted: false,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn env(&mut self) -> &mut Environment {
        &mut *self.env
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut *self.rng
    }

    pub fn report(&mut self, line: usize, source: EvalError) {
        if !self.exhausted {
            self.reporter.report(Diagnostic::Eval { source, line });
        }
    }

    pub fn print(&mut self, text: &str) {
        if !self.exhausted {
            self.reporter.print(text);
        }
    }

    /// Pushes a frame that is popped when the returned guard is dropped.
    pub fn enter(&mut self) -> FrameGuard<'_, 'a> {
        self.env.push();
        FrameGuard { evaluator: self }
    }

    pub fn evaluate(&mut self, node: &Node) -> Value {
        if self.exhausted {
            return Value::Nothing;
        }
        if self.depth >= self.max_depth {
            let max_depth = self.max_depth;
            self.report(node.line(), EvalError::RecursionLimit { max_depth });
            self.exhausted = true;
            return Value::Nothing;
        }

        self.depth += 1;
        let value = self.evaluate_node(node);
        self.depth -= 1;
        value
    }

    fn evaluate_node(&mut self, node: &Node) -> Value {
        match node {
            Node::Literal(literal) => literal.value.clone().into(),
            Node::Reference(reference) => match self.env.lookup(&reference.name) {
                Ok(value) => value,
                Err(err) => {
                    self.report(reference.line, err);
                    Value::Nothing
                }
            },
            Node::Scope(scope) => {
                let mut frame = self.enter();
                frame.evaluate_statements(&scope.body)
            }
            Node::Call(call) => self.evaluate_call(call),
            Node::Collection(collection) => {
                let values: Vec<Value> = collection
                    .elements
                    .iter()
                    .map(|element| self.evaluate(element))
                    .collect();
                self.check_collection(values, collection.line)
            }
            Node::Mapping(mapping) => self.evaluate_mapping(mapping),
        }
    }

    /// Evaluates statements in order in the innermost frame, keeping the
    /// last result under `^`.
    pub fn evaluate_statements(&mut self, statements: &[Node]) -> Value {
        let mut result = Value::Nothing;
        self.env.set(PREVIOUS, Value::Nothing);
        for statement in statements {
            result = self.evaluate(statement);
            self.env.set(PREVIOUS, result.clone());
        }
        result
    }

    fn evaluate_call(&mut self, call: &CallExpression) -> Value {
        let head = match call.head.as_ref() {
            Node::Reference(reference) => match self.env.get(&reference.name) {
                Some(value) => value.clone(),
                None => {
                    self.report(
                        call.line,
                        EvalError::NotAFunction {
                            name: reference.name.clone(),
                        },
                    );
                    return Value::Nothing;
                }
            },
            other => self.evaluate(other),
        };

        match head {
            Value::Operator(operator) => operator.call(self, &call.args, call.line),
            other => {
                self.report(call.line, EvalError::NotCallable { kind: other.kind() });
                Value::Nothing
            }
        }
    }

    fn check_collection(&mut self, values: Vec<Value>, line: usize) -> Value {
        if let Some(first) = values.first() {
            let first = first.kind();
            if let Some(other) = values.iter().map(Value::kind).find(|kind| *kind != first) {
                self.report(line, EvalError::MixedCollection { first, other });
                return Value::Collection(vec![]);
            }
        }
        Value::Collection(values)
    }

    fn evaluate_mapping(&mut self, mapping: &MappingLiteral) -> Value {
        let mut map = IndexMap::new();
        for (key, value) in mapping.pairs.iter() {
            let key = match key {
                Node::Reference(reference) => reference.name.clone(),
                Node::Literal(literal) => match &literal.value {
                    LiteralValue::String(s) => s.clone(),
                    other => {
                        self.report(
                            literal.line,
                            EvalError::InvalidMappingKey {
                                found: other.to_string(),
                            },
                        );
                        continue;
                    }
                },
                other => {
                    self.report(
                        other.line(),
                        EvalError::InvalidMappingKey {
                            found: other.to_string(),
                        },
                    );
                    continue;
                }
            };
            let value = self.evaluate(value);
            map.insert(key, value);
        }
        Value::Mapping(map)
    }
}
