use std::fmt::{self, Display};

use crate::ast::Expression;

/// `return <value>;` — `value` is absent for a bare `return;`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnStatement {
    pub value: Option<Expression>,
}

impl Display for ReturnStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "return {value};"),
            None => write!(f, "return;"),
        }
    }
}
