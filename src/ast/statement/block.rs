use std::fmt::{self, Display};

use super::Statement;

/// `{ <statements...> }`, the body of an `if`, `else`, or function literal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BlockStatement {
    pub statements: Vec<Statement>,
}

impl Display for BlockStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.statements {
            write!(f, "{stmt}")?;
        }
        Ok(())
    }
}
