use super::Node;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Number(f64),
    String(String),
    Boolean(bool),
}

impl Display for LiteralValue {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::String(s) => write!(f, "'{}'", s),
            Self::Boolean(true) => write!(f, "ok"),
            Self::Boolean(false) => write!(f, "no"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub value: LiteralValue,
    pub line: usize,
}

impl Literal {
    pub fn new(value: LiteralValue, line: usize) -> Self {
        Self { value, line }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    pub name: String,
    pub line: usize,
}

impl Reference {
    pub fn new(name: &str, line: usize) -> Self {
        Self {
            name: name.to_owned(),
            line,
        }
    }
}

impl Display for Reference {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpression {
    pub head: Box<Node>,
    pub args: Vec<Node>,
    pub line: usize,
}

impl Display for CallExpression {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "({}", self.head)?;
        for arg in self.args.iter() {
            write!(f, " {}", arg)?;
        }
        write!(f, ")")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScopeExpression {
    pub body: Vec<Node>,
    pub line: usize,
}

impl Display for ScopeExpression {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let statements: Vec<String> = self.body.iter().map(Node::to_string).collect();
        write!(f, "({})", statements.join("; "))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollectionLiteral {
    pub elements: Vec<Node>,
    pub line: usize,
}

impl Display for CollectionLiteral {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let elements: Vec<String> = self.elements.iter().map(Node::to_string).collect();
        write!(f, "[{}]", elements.join(" "))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MappingLiteral {
    pub pairs: Vec<(Node, Node)>,
    pub line: usize,
}

impl Display for MappingLiteral {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let pairs: Vec<String> = self
            .pairs
            .iter()
            .map(|(key, value)| format!("{} {}", key, value))
            .collect();
        write!(f, "{{{}}}", pairs.join(", "))
    }
}

/// The kind of node a bracketed group produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum GroupKind {
    #[strum(to_string = "scope")]
    Scope,
    #[strum(to_string = "collection")]
    Collection,
    #[strum(to_string = "mapping")]
    Mapping,
}

impl GroupKind {
    pub fn closing(self) -> char {
        match self {
            Self::Scope => ')',
            Self::Collection => ']',
            Self::Mapping => '}',
        }
    }
}
