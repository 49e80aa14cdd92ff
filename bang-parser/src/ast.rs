// Bang AST Definitions
// Binary-branching statement/expression tree, each node stamped with its source line

use crate::token::Span;
use std::fmt;

/// A tree node. Every node exclusively owns its children.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    /// Line of the defining token (keyword, operator or literal)
    pub line: usize,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Sequential composition: `left` then `right`. `left` is absent only for an empty program.
    StatementList {
        left: Option<Box<Node>>,
        right: Option<Box<Node>>,
    },
    Let {
        identifier: String,
        expression: Box<Node>,
    },
    Print(Box<Node>),
    If {
        condition: Box<Node>,
        body: Box<Node>,
    },
    /// Do/while loop, see the evaluator
    Loop {
        condition: Box<Node>,
        body: Box<Node>,
    },
    Binary {
        operator: BinaryOperator,
        left: Box<Node>,
        right: Box<Node>,
    },
    /// `!` reversal
    Bang(Box<Node>),
    IntLiteral(i64),
    StringLiteral(String),
    Identifier(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Plus,
    Minus,
    Times,
    Divide,
}

impl BinaryOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::Plus => "+",
            BinaryOperator::Minus => "-",
            BinaryOperator::Times => "*",
            BinaryOperator::Divide => "/",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl Node {
    pub fn new(kind: NodeKind, line: usize, span: Span) -> Self {
        Self { kind, line, span }
    }

    pub fn statement_list(left: Node, right: Option<Node>) -> Self {
        let line = left.line;
        let span = match &right {
            Some(right) => left.span.to(right.span),
            None => left.span,
        };
        Self::new(
            NodeKind::StatementList {
                left: Some(Box::new(left)),
                right: right.map(Box::new),
            },
            line,
            span,
        )
    }

    pub fn empty_program(line: usize, span: Span) -> Self {
        Self::new(
            NodeKind::StatementList {
                left: None,
                right: None,
            },
            line,
            span,
        )
    }

    pub fn binary(operator: BinaryOperator, left: Node, right: Node, line: usize) -> Self {
        let span = left.span.to(right.span);
        Self::new(
            NodeKind::Binary {
                operator,
                left: Box::new(left),
                right: Box::new(right),
            },
            line,
            span,
        )
    }

    /// The `left` child, if any
    pub fn left(&self) -> Option<&Node> {
        match &self.kind {
            NodeKind::StatementList { left, .. } => left.as_deref(),
            NodeKind::Let { expression, .. } => Some(expression),
            NodeKind::Print(expression) | NodeKind::Bang(expression) => Some(expression),
            NodeKind::If { condition, .. } | NodeKind::Loop { condition, .. } => Some(condition),
            NodeKind::Binary { left, .. } => Some(left),
            NodeKind::IntLiteral(_) | NodeKind::StringLiteral(_) | NodeKind::Identifier(_) => None,
        }
    }

    /// The `right` child, if any
    pub fn right(&self) -> Option<&Node> {
        match &self.kind {
            NodeKind::StatementList { right, .. } => right.as_deref(),
            NodeKind::If { body, .. } | NodeKind::Loop { body, .. } => Some(body),
            NodeKind::Binary { right, .. } => Some(right),
            _ => None,
        }
    }

    /// Children in traversal order, left before right
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.left().into_iter().chain(self.right())
    }

    pub fn is_let(&self) -> bool {
        matches!(self.kind, NodeKind::Let { .. })
    }

    pub fn is_identifier(&self) -> bool {
        matches!(self.kind, NodeKind::Identifier(_))
    }

    pub fn is_bang(&self) -> bool {
        matches!(self.kind, NodeKind::Bang(_))
    }

    /// Statements of a statement-list spine, in order
    pub fn statements(&self) -> Vec<&Node> {
        let mut statements = Vec::new();
        let mut current = Some(self);
        while let Some(node) = current {
            match &node.kind {
                NodeKind::StatementList { left, right } => {
                    statements.extend(left.as_deref());
                    current = right.as_deref();
                }
                _ => {
                    statements.push(node);
                    current = None;
                }
            }
        }
        statements
    }
}
