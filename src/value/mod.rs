use crate::ast::LiteralValue;
use indexmap::IndexMap;
use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};
use strum_macros::{Display, EnumDiscriminants};

mod eval_error;
pub use eval_error::EvalError;

mod format;
pub use format::format;

mod operator;
pub use operator::{Builtin, BuiltinFn, Function, Operator};

pub type Result<T> = std::result::Result<T, EvalError>;

#[derive(Debug, Clone, EnumDiscriminants)]
#[strum_discriminants(derive(Hash, Display))]
#[strum_discriminants(name(ValueKind))]
pub enum Value {
    Number(f64),
    String(String),
    Boolean(bool),
    Collection(Vec<Value>),
    Mapping(IndexMap<String, Value>),
    Operator(Operator),
    Nothing,
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", format(self))
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::Nothing
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        s.to_owned().into()
    }
}

impl From<Vec<Value>> for Value {
    fn from(c: Vec<Value>) -> Self {
        Self::Collection(c)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(m: IndexMap<String, Value>) -> Self {
        Self::Mapping(m)
    }
}

impl From<Operator> for Value {
    fn from(op: Operator) -> Self {
        Self::Operator(op)
    }
}

impl From<LiteralValue> for Value {
    fn from(literal: LiteralValue) -> Self {
        match literal {
            LiteralValue::Number(n) => Self::Number(n),
            LiteralValue::String(s) => Self::String(s),
            LiteralValue::Boolean(b) => Self::Boolean(b),
        }
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        ValueKind::from(self)
    }

    pub fn is_nothing(&self) -> bool {
        matches!(self, Self::Nothing)
    }

    pub fn truth_value(&self) -> bool {
        match self {
            Self::Nothing => false,
            Self::Boolean(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::String(s) => !s.is_empty(),
            Self::Collection(_) | Self::Mapping(_) | Self::Operator(_) => true,
        }
    }

    /// The text of a string, or of a non-empty collection made only of
    /// one-character strings.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::String(s) => Some(s.clone()),
            Self::Collection(items) if !items.is_empty() => items
                .iter()
                .map(|item| match item {
                    Self::String(s) if s.chars().count() == 1 => Some(s.as_str()),
                    _ => None,
                })
                .collect::<Option<String>>(),
            _ => None,
        }
    }

    pub fn len(&self) -> Option<usize> {
        match self {
            Self::String(s) => Some(s.chars().count()),
            Self::Collection(items) => Some(items.len()),
            Self::Mapping(map) => Some(map.len()),
            _ => None,
        }
    }

    /// Index/value pairs visited by a collection loop. Strings iterate by
    /// character; mappings are indexed by key.
    pub fn entries(&self) -> Option<Vec<(Value, Value)>> {
        match self {
            Self::Collection(items) => Some(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| (Value::Number(i as f64), item.clone()))
                    .collect(),
            ),
            Self::String(s) => Some(
                s.chars()
                    .enumerate()
                    .map(|(i, c)| (Value::Number(i as f64), Value::String(c.to_string())))
                    .collect(),
            ),
            Self::Mapping(map) => Some(
                map.iter()
                    .map(|(key, value)| (Value::String(key.clone()), value.clone()))
                    .collect(),
            ),
            _ => None,
        }
    }

    /// Ordering used by `<`, `>`, `<=` and `>=`. Only numbers and strings are
    /// ordered.
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Number(x), Self::Number(y)) => x.partial_cmp(y),
            (Self::String(x), Self::String(y)) => Some(x.cmp(y)),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(x), Self::Number(y)) => x == y,
            (Self::String(x), Self::String(y)) => x == y,
            (Self::Boolean(x), Self::Boolean(y)) => x == y,
            (Self::Mapping(x), Self::Mapping(y)) => x == y,
            (Self::Operator(x), Self::Operator(y)) => x == y,
            (Self::Nothing, Self::Nothing) => true,
            (Self::Collection(x), Self::Collection(y)) => x == y,
            // A string and a collection of its characters are the same value.
            (Self::String(_), Self::Collection(_)) | (Self::Collection(_), Self::String(_)) => {
                match (self.as_text(), other.as_text()) {
                    (Some(x), Some(y)) => x == y,
                    _ => false,
                }
            }
            _ => false,
        }
    }
}
