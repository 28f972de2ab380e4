use crate::builtins::BUILTINS;
use crate::value::{EvalError, Result, Value};
use std::collections::HashMap;
use tracing::debug;

/// Names with this prefix can be defined once and never changed.
pub const READ_ONLY_PREFIX: char = '_';

type Frame = HashMap<String, Value>;

fn is_read_only(name: &str) -> bool {
    name.starts_with(READ_ONLY_PREFIX)
}

/// A stack of frames, innermost last. Lookups walk from the innermost frame
/// outwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    frames: Vec<Frame>,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            frames: vec![Frame::new()],
        }
    }
}

impl Environment {
    pub fn new() -> Self {
        Default::default()
    }

    /// An environment whose outermost frame holds the builtin operators,
    /// with an empty frame for globals above it.
    pub fn with_builtins() -> Self {
        let builtins = BUILTINS
            .iter()
            .map(|(name, builtin)| ((*name).to_owned(), Value::Operator((*builtin).into())))
            .collect();
        Self {
            frames: vec![builtins, Frame::new()],
        }
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn push(&mut self) {
        self.frames.push(Frame::new());
        debug!(depth = self.frames.len(), "pushed frame");
    }

    /// Discards the innermost frame. The outermost frame is never popped.
    pub fn pop(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
            debug!(depth = self.frames.len(), "popped frame");
        }
    }

    fn innermost(&mut self) -> &mut Frame {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    /// Inserts into the innermost frame without any read-only check.
    pub fn set(&mut self, name: &str, val: Value) {
        self.innermost().insert(name.to_owned(), val);
    }

    pub fn define(&mut self, name: &str, val: Value) -> Result<()> {
        let frame = self.innermost();
        if is_read_only(name) && frame.contains_key(name) {
            return Err(EvalError::ReadOnly {
                name: name.to_owned(),
            });
        }
        frame.insert(name.to_owned(), val);
        Ok(())
    }

    /// Replaces the value of the nearest binding of `name`, returning the
    /// value it held before.
    pub fn assign(&mut self, name: &str, val: Value) -> Result<Value> {
        if is_read_only(name) {
            return Err(EvalError::ReadOnly {
                name: name.to_owned(),
            });
        }
        self.frames
            .iter_mut()
            .rev()
            .find_map(|frame| frame.get_mut(name))
            .map(|slot| std::mem::replace(slot, val))
            .ok_or_else(|| EvalError::Undeclared {
                name: name.to_owned(),
            })
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.frames.iter().rev().find_map(|frame| frame.get(name))
    }

    pub fn lookup(&self, name: &str) -> Result<Value> {
        self.get(name).cloned().ok_or_else(|| EvalError::NotFound {
            name: name.to_owned(),
        })
    }
}
