use super::ValueKind;
use custom_error::custom_error;

custom_error! {
    #[derive(Clone, PartialEq)]
    pub EvalError

    NotFound{name: String} = "couldn't find '{name}', returning nothing instead",
    NotAFunction{name: String} = "couldn't find function '{name}'",
    NotCallable{kind: ValueKind} = "not a function: {kind}",
    Undeclared{name: String} = "couldn't modify '{name}' because it wasn't declared",
    ReadOnly{name: String} = "words starting with '_' can't be modified: '{name}'",
    InvalidName{operator: &'static str} = "invalid name for '{operator}'",
    TypeMismatch{operator: &'static str, left: ValueKind, right: ValueKind} = "type mismatch at function '{operator}': {left} and {right}",
    UnsupportedOperands{operator: &'static str, left: ValueKind, right: ValueKind} = "unknown operator: {left} {operator} {right}",
    UnsupportedArgType{operator: &'static str, kind: ValueKind} = "argument to '{operator}' not supported, got {kind}",
    IncorrectArity{operator: &'static str, got: usize, want: &'static str} = "wrong number of arguments to '{operator}'. got={got}, want={want}",
    MixedCollection{first: ValueKind, other: ValueKind} = "collections should store only one type of value, found {first} and {other}",
    InvalidMappingKey{found: String} = "expected key, word or string for mapping assignment, got {found}",
    InvalidRange{from: f64, to: f64, step: f64} = "range '..' can't go from {from} to {to} by {step}",
    RecursionLimit{max_depth: usize} = "maximum nesting depth of {max_depth} exceeded, stopping evaluation",
}

impl EvalError {
    pub fn binary_op_error(operator: &'static str, left: ValueKind, right: ValueKind) -> Self {
        if left == right {
            Self::UnsupportedOperands {
                operator,
                left,
                right,
            }
        } else {
            Self::TypeMismatch {
                operator,
                left,
                right,
            }
        }
    }
}
