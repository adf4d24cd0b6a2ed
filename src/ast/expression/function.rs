use std::fmt::{self, Display};

use crate::ast::{statement::BlockStatement, Identifier};

/// `fn(<params, ...>) { <body> }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionLiteral {
    pub params: Vec<Identifier>,
    pub body: BlockStatement,
}

impl Display for FunctionLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params = self
            .params
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "fn({params}) {{ {} }}", self.body)
    }
}
