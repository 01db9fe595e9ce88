// Predicate Tree
//
// This module implements the boolean predicate evaluated against tuples:
// leaf qualifiers (field equals literal) combined by an AND/OR expression
// tree.

use serde;

use crate::executor::result::{FieldValue, Tuple};

/// Supported leaf comparison kinds. Only equality exists; anything else is
/// unrepresentable rather than a runtime failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum QualKind {
    Eq,
}

/// A single field-equals-literal predicate.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Qualifier {
    pub field: String,
    pub kind: QualKind,
    pub value: FieldValue,
}

impl Qualifier {
    /// Equality qualifier: matches tuples whose value at `field` is
    /// identical in type and value to `value`.
    pub fn eq(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Qualifier {
            field: field.into(),
            kind: QualKind::Eq,
            value: value.into(),
        }
    }

    fn matches(&self, tuple: &Tuple) -> bool {
        match self.kind {
            // Exact type-and-value equality; an absent field never matches.
            QualKind::Eq => tuple.get(&self.field) == Some(&self.value),
        }
    }
}

/// Combinator kind for expression nodes with two children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum ExprKind {
    #[default]
    And,
    Or,
}

/// A boolean combinator tree over qualifiers.
///
/// A node carries either an embedded qualifier, up to two children, or
/// nothing at all (the empty predicate, which matches every tuple). A node
/// with exactly one child delegates to it, ignoring the combinator kind.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Expression {
    pub kind: ExprKind,
    pub qual: Option<Qualifier>,
    pub left: Option<Box<Expression>>,
    pub right: Option<Box<Expression>>,
}

impl Expression {
    /// The empty predicate; matches every tuple.
    pub fn always() -> Self {
        Expression::default()
    }

    /// A leaf node wrapping a single qualifier.
    pub fn qualifier(qual: Qualifier) -> Self {
        Expression {
            qual: Some(qual),
            ..Expression::default()
        }
    }

    pub fn and(left: Expression, right: Expression) -> Self {
        Expression {
            kind: ExprKind::And,
            qual: None,
            left: Some(Box::new(left)),
            right: Some(Box::new(right)),
        }
    }

    pub fn or(left: Expression, right: Expression) -> Self {
        Expression {
            kind: ExprKind::Or,
            qual: None,
            left: Some(Box::new(left)),
            right: Some(Box::new(right)),
        }
    }

    /// Evaluate the predicate against a tuple. Pure; no side effects.
    pub fn eval(&self, tuple: &Tuple) -> bool {
        match (&self.left, &self.right) {
            (None, None) => match &self.qual {
                Some(qual) => qual.matches(tuple),
                None => true,
            },
            (Some(left), None) => left.eval(tuple),
            (None, Some(right)) => right.eval(tuple),
            (Some(left), Some(right)) => {
                // Both operands are evaluated before the combinator is
                // applied; there is no short-circuit skip of the second.
                let l = left.eval(tuple);
                let r = right.eval(tuple);
                match self.kind {
                    ExprKind::And => l && r,
                    ExprKind::Or => l || r,
                }
            }
        }
    }
}
