use std::fmt::{self, Display};

use super::Expression;

/// `<left>[<index>]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexExpression {
    pub left: Box<Expression>,
    pub index: Box<Expression>,
}

impl Display for IndexExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}[{}])", self.left, self.index)
    }
}
