//! Runtime values and the hashing machinery that lets `Integer`, `Boolean`,
//! and `StringLit` values act as hash keys.

mod hash_key;

pub use hash_key::{HashKey, Hashable};

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::{self, Display};
use std::rc::Rc;

use crate::ast::{statement::BlockStatement, Identifier};
use crate::environment::Environment;

/// A builtin's Rust implementation: takes the already-evaluated arguments and
/// returns either a value or an [`Value::Error`].
pub type BuiltinFn = fn(&[Value]) -> Value;

/// Every kind of value the evaluator can produce.
///
/// [`Value::ReturnValue`] and [`Value::Error`] are control values: they carry
/// no user-facing meaning on their own, they exist so `return` and error
/// propagation can be modeled as ordinary data flowing up through `eval`
/// instead of host-language exceptions or panics.
#[derive(Debug, Clone)]
pub enum Value {
    Integer(i64),
    Boolean(bool),
    StringLit(String),
    Null,
    Array(Vec<Value>),
    Hash(HashMap<HashKey, (Value, Value)>),
    Function {
        params: Vec<Identifier>,
        body: BlockStatement,
        env: Rc<RefCell<Environment>>,
    },
    Builtin(BuiltinFn),
    ReturnValue(Box<Value>),
    Error(String),
}

impl Value {
    /// The name used in `ERROR: type mismatch` and similar diagnostics, and as
    /// the discriminant in [`HashKey`].
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "INTEGER",
            Value::Boolean(_) => "BOOLEAN",
            Value::StringLit(_) => "STRING",
            Value::Null => "NULL",
            Value::Array(_) => "ARRAY",
            Value::Hash(_) => "HASH",
            Value::Function { .. } => "FUNCTION",
            Value::Builtin(_) => "BUILTIN",
            Value::ReturnValue(_) => "RETURN_VALUE",
            Value::Error(_) => "ERROR",
        }
    }

    /// Everything except `false` and `Null` is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Boolean(false) | Value::Null)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    pub fn hash_key(&self) -> Option<HashKey> {
        match self {
            Value::Integer(i) => Some(i.hash_key()),
            Value::Boolean(b) => Some(b.hash_key()),
            Value::StringLit(s) => Some(s.hash_key()),
            _ => None,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{i}"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::StringLit(s) => write!(f, "\"{s}\""),
            Value::Null => write!(f, "null"),
            Value::Array(elements) => {
                let items = elements
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "[{items}]")
            }
            Value::Hash(pairs) => {
                let items = pairs
                    .values()
                    .map(|(k, v)| format!("{k}: {v}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "{{{items}}}")
            }
            Value::Function { params, body, .. } => {
                let params = params
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "fn({params}) {{\n{body}\n}}")
            }
            Value::Builtin(_) => write!(f, "builtin function"),
            Value::ReturnValue(v) => write!(f, "{v}"),
            Value::Error(msg) => write!(f, "ERROR:{msg}"),
        }
    }
}
