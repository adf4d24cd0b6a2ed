use std::fmt::{self, Display};

use super::Expression;

/// `{<key>: <value>, ...}`. Pairs are stored in source order so that repeated
/// `Display` calls and parse-error reporting are deterministic; the evaluator's
/// runtime hash does not preserve this order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashLiteral {
    pub pairs: Vec<(Expression, Expression)>,
}

impl Display for HashLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let items = self
            .pairs
            .iter()
            .map(|(k, v)| format!("{k}: {v}"))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{{{items}}}")
    }
}
