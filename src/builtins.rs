//! The fixed set of native functions available to Monkey code, consulted
//! only when an identifier isn't bound in any enclosing [`Environment`].
//!
//! A name-keyed map built once and read many times.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::object::{BuiltinFn, Value};

static BUILTINS: Lazy<HashMap<&'static str, BuiltinFn>> = Lazy::new(|| {
    let mut m: HashMap<&'static str, BuiltinFn> = HashMap::new();
    m.insert("len", len);
    m.insert("typeOf", type_of);
    m.insert("print", print);
    m
});

pub fn lookup_builtin(name: &str) -> Option<Value> {
    BUILTINS.get(name).copied().map(Value::Builtin)
}

fn wrong_arg_count(got: usize, want: usize) -> Value {
    Value::Error(format!(
        "wrong number of arguments. got={got}, want={want}"
    ))
}

fn len(args: &[Value]) -> Value {
    if args.len() != 1 {
        return wrong_arg_count(args.len(), 1);
    }
    match &args[0] {
        Value::StringLit(s) => Value::Integer(s.len() as i64),
        Value::Array(elements) => Value::Integer(elements.len() as i64),
        Value::Hash(pairs) => Value::Integer(pairs.len() as i64),
        other => Value::Error(format!(
            "argument to `len` not supported, got {}",
            other.type_name()
        )),
    }
}

fn type_of(args: &[Value]) -> Value {
    if args.len() != 1 {
        return wrong_arg_count(args.len(), 1);
    }
    Value::StringLit(args[0].type_name().to_string())
}

fn print(args: &[Value]) -> Value {
    let rendered = args
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    println!("{rendered}");
    Value::Null
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn len_reports_byte_count_for_strings() {
        match len(&[Value::StringLit("hello".into())]) {
            Value::Integer(n) => assert_eq!(n, 5),
            other => panic!("expected integer, got {other:?}"),
        }
    }

    #[test]
    fn len_rejects_unsupported_types() {
        match len(&[Value::Integer(1)]) {
            Value::Error(msg) => {
                assert_eq!(msg, "argument to `len` not supported, got INTEGER")
            }
            other => panic!("expected error, got {other:?}"),
        }
    }

    #[test]
    fn len_rejects_wrong_arity() {
        match len(&[]) {
            Value::Error(msg) => assert_eq!(msg, "wrong number of arguments. got=0, want=1"),
            other => panic!("expected error, got {other:?}"),
        }
    }

    #[test]
    fn type_of_reports_the_type_tag() {
        match type_of(&[Value::Boolean(true)]) {
            Value::StringLit(tag) => assert_eq!(tag, "BOOLEAN"),
            other => panic!("expected string, got {other:?}"),
        }
    }

    #[test]
    fn lookup_builtin_only_resolves_known_names() {
        assert!(lookup_builtin("len").is_some());
        assert!(lookup_builtin("not_a_builtin").is_none());
    }
}
