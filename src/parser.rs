use crate::ast::{
    CallExpression, CollectionLiteral, GroupKind, Literal, LiteralValue, MappingLiteral, Node,
    Program, Reference, ScopeExpression,
};
use crate::token::{Token, TokenKind, TokenType};
use custom_error::custom_error;
use tracing::debug;

custom_error! {
    #[derive(Clone, PartialEq)]
    pub ParseError

    MissingClosingBracket{bracket: char, group: GroupKind, line: usize} = "missing ending bracket '{bracket}' for {group} (starting at line {line})",
    UnclosedBracket{bracket: char, group: GroupKind, line: usize} = "unclosed {group}, expected '{bracket}' before end of input (starting at line {line})",
    MismatchedClosingBracket{found: char, expected: char, line: usize} = "unexpected closing bracket '{found}', expected '{expected}' (line {line})",
    UnexpectedClosingBracket{bracket: char, line: usize} = "unexpected closing bracket '{bracket}' (line {line})",
    InvalidMappingKey{found: String, line: usize} = "expected key, word or string for mapping assignment, got {found} (line {line})",
    MissingMappingValue{key: String, line: usize} = "missing value for mapping key '{key}' (line {line})",
}

impl ParseError {
    pub fn line(&self) -> usize {
        match self {
            Self::MissingClosingBracket { line, .. }
            | Self::UnclosedBracket { line, .. }
            | Self::MismatchedClosingBracket { line, .. }
            | Self::UnexpectedClosingBracket { line, .. }
            | Self::InvalidMappingKey { line, .. }
            | Self::MissingMappingValue { line, .. } => *line,
        }
    }

    /// Bracket mismatches that leave the top level unbalanced. The tree built
    /// around them is not worth evaluating.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::UnclosedBracket { .. } | Self::UnexpectedClosingBracket { .. }
        )
    }
}

fn closing_char(kind: &TokenKind) -> Option<char> {
    match kind {
        TokenKind::CloseParen => Some(')'),
        TokenKind::CloseBracket => Some(']'),
        TokenKind::CloseBrace => Some('}'),
        _ => None,
    }
}

pub struct Parser<'t> {
    tokens: &'t [Token],
    position: usize,
    open_groups: Vec<GroupKind>,
    errors: Vec<ParseError>,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            position: 0,
            open_groups: vec![],
            errors: vec![],
        }
    }

    fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.position)
    }

    fn next_token(&mut self) -> Option<&'t Token> {
        let token = self.tokens.get(self.position)?;
        self.position += 1;
        Some(token)
    }

    /// Returns whether any newline was skipped.
    fn skip_newlines(&mut self) -> bool {
        let start = self.position;
        while matches!(self.peek(), Some(token) if token.is(TokenType::Newline)) {
            self.position += 1;
        }
        self.position > start
    }

    /// Parses every top-level statement. Errors are collected rather than
    /// returned early, so the partial tree is always available.
    pub fn parse_program(mut self) -> (Program, Vec<ParseError>) {
        let mut program = Program::default();
        let mut head = true;

        loop {
            head |= self.skip_newlines();
            let token = match self.peek() {
                Some(token) => token,
                None => break,
            };
            if let Some(bracket) = closing_char(&token.kind) {
                self.errors.push(ParseError::UnexpectedClosingBracket {
                    bracket,
                    line: token.line,
                });
                break;
            }
            if let Some(node) = self.parse_node(head) {
                program.statements.push(node);
            }
            head = false;
        }

        debug!(
            statements = program.statements.len(),
            errors = self.errors.len(),
            "parsed program"
        );
        (program, self.errors)
    }

    /// Parses exactly one node. `head` marks the first slot of a line or
    /// group, where a word names an operator instead of a value.
    pub fn parse_node(&mut self, head: bool) -> Option<Node> {
        self.skip_newlines();
        let token = self.next_token()?;
        let line = token.line;

        let node = match &token.kind {
            TokenKind::Newline => return self.parse_node(head),
            TokenKind::Word(word) if word == "ok" || word == "no" => {
                Literal::new(LiteralValue::Boolean(word == "ok"), line).into()
            }
            TokenKind::Key(name) => self.parse_call(Reference::new(name, line)),
            TokenKind::Word(name) if head => self.parse_call(Reference::new(name, line)),
            TokenKind::Word(name) => Reference::new(name, line).into(),
            TokenKind::OpenParen => self.parse_group(GroupKind::Scope, line),
            TokenKind::OpenBracket => self.parse_group(GroupKind::Collection, line),
            TokenKind::OpenBrace => self.parse_group(GroupKind::Mapping, line),
            TokenKind::CloseParen | TokenKind::CloseBracket | TokenKind::CloseBrace => {
                self.errors.push(ParseError::UnexpectedClosingBracket {
                    bracket: closing_char(&token.kind).unwrap_or(')'),
                    line,
                });
                return None;
            }
            TokenKind::StringLit(s) => Literal::new(LiteralValue::String(s.clone()), line).into(),
            TokenKind::NumberLit(n) => Literal::new(LiteralValue::Number(*n), line).into(),
        };
        Some(node)
    }

    fn parse_call(&mut self, head: Reference) -> Node {
        let line = head.line;
        let mut args = vec![];

        while let Some(token) = self.peek() {
            if token.kind.ends_call() {
                break;
            }
            match self.parse_node(false) {
                Some(node) => args.push(node),
                None => break,
            }
        }

        CallExpression {
            head: Box::new(head.into()),
            args,
            line,
        }
        .into()
    }

    fn parse_group(&mut self, group: GroupKind, line: usize) -> Node {
        self.open_groups.push(group);
        let children = self.parse_group_children(group, line);
        self.open_groups.pop();

        match group {
            GroupKind::Scope => {
                let mut body = children;
                if body.len() == 1 {
                    body.remove(0)
                } else {
                    ScopeExpression { body, line }.into()
                }
            }
            GroupKind::Collection => CollectionLiteral {
                elements: children,
                line,
            }
            .into(),
            GroupKind::Mapping => self.pair_up(children, line),
        }
    }

    /// Collects the children of a group up to and including its closing
    /// bracket. Mapping children alternate key, value; keys are read
    /// directly from their token and validated here.
    fn parse_group_children(&mut self, group: GroupKind, line: usize) -> Vec<Node> {
        let mut children = vec![];
        let mut head = true;

        loop {
            head |= self.skip_newlines();
            let token = match self.peek() {
                Some(token) => token,
                None => {
                    // Only the innermost open group reports reaching the end.
                    let reported = self
                        .errors
                        .iter()
                        .any(|err| matches!(err, ParseError::UnclosedBracket { .. }));
                    if !reported {
                        self.errors.push(ParseError::UnclosedBracket {
                            bracket: group.closing(),
                            group,
                            line,
                        });
                    }
                    return children;
                }
            };

            if let Some(found) = closing_char(&token.kind) {
                if found == group.closing() {
                    self.position += 1;
                } else if self.encloses(found) {
                    self.errors.push(ParseError::MissingClosingBracket {
                        bracket: group.closing(),
                        group,
                        line,
                    });
                } else {
                    self.position += 1;
                    self.errors.push(ParseError::MismatchedClosingBracket {
                        found,
                        expected: group.closing(),
                        line: token.line,
                    });
                }
                return children;
            }

            let key_position = group == GroupKind::Mapping && children.len() % 2 == 0;
            let child = if key_position {
                self.parse_mapping_key()
            } else {
                self.parse_node(head && group == GroupKind::Scope)
            };
            if let Some(child) = child {
                children.push(child);
            }
            head = false;
        }
    }

    fn encloses(&self, closing: char) -> bool {
        // The innermost entry is the group currently being parsed.
        let outer = self.open_groups.len().saturating_sub(1);
        self.open_groups[..outer]
            .iter()
            .any(|group| group.closing() == closing)
    }

    fn parse_mapping_key(&mut self) -> Option<Node> {
        let token = self.peek()?;
        let line = token.line;
        match &token.kind {
            TokenKind::Key(name) | TokenKind::Word(name) => {
                self.position += 1;
                Some(Reference::new(name, line).into())
            }
            TokenKind::StringLit(s) => {
                self.position += 1;
                Some(Literal::new(LiteralValue::String(s.clone()), line).into())
            }
            _ => {
                let found = token.kind.to_string();
                // Consume the offending key and its value so parsing resyncs
                // on the next pair.
                self.parse_node(false);
                self.skip_newlines();
                if !matches!(self.peek(), Some(token) if token.kind.is_closing()) {
                    self.parse_node(false);
                }
                self.errors
                    .push(ParseError::InvalidMappingKey { found, line });
                None
            }
        }
    }

    fn pair_up(&mut self, children: Vec<Node>, line: usize) -> Node {
        let mut pairs = vec![];
        let mut children = children.into_iter();

        while let Some(key) = children.next() {
            match children.next() {
                Some(value) => pairs.push((key, value)),
                None => self.errors.push(ParseError::MissingMappingValue {
                    key: key.to_string(),
                    line: key.line(),
                }),
            }
        }

        MappingLiteral { pairs, line }.into()
    }
}
