mod expression;
pub use expression::*;

use derive_more::{Display, From};
use std::fmt::{self, Formatter};

#[derive(Display, From, Debug, Clone, PartialEq)]
pub enum Node {
    Literal(Literal),
    Reference(Reference),
    Call(CallExpression),
    Scope(ScopeExpression),
    Collection(CollectionLiteral),
    Mapping(MappingLiteral),
}

impl Node {
    pub fn line(&self) -> usize {
        match self {
            Self::Literal(node) => node.line,
            Self::Reference(node) => node.line,
            Self::Call(node) => node.line,
            Self::Scope(node) => node.line,
            Self::Collection(node) => node.line,
            Self::Mapping(node) => node.line,
        }
    }

    /// The identifier this node names, if it is a bare reference.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Reference(reference) => Some(&reference.name),
            _ => None,
        }
    }
}

/// Top-level statements of a source text. Unlike a `Scope` it does not open
/// a frame of its own.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub statements: Vec<Node>,
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let statements: Vec<String> = self.statements.iter().map(Node::to_string).collect();
        write!(f, "{}", statements.join("\n"))
    }
}
