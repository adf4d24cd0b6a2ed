//! Lexically-scoped variable bindings.
//!
//! Each [`Environment`] is a node in a tree: a function literal captures the
//! environment it was defined in, and every call to it opens a fresh child
//! scope enclosing that captured one. Because closures need to hold onto a
//! *specific* environment node independently of whatever the interpreter is
//! doing elsewhere, scopes are reference-counted and interior-mutable rather
//! than frames on a single shared stack.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::object::Value;

#[derive(Debug, Default)]
pub struct Environment {
    store: HashMap<String, Value>,
    outer: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    pub fn new() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::default()))
    }

    /// A child scope that falls back to `outer` for names it doesn't bind
    /// itself — used for function-call frames and block-local closures.
    pub fn enclosed(outer: Rc<RefCell<Environment>>) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            store: HashMap::new(),
            outer: Some(outer),
        }))
    }

    /// Look up `name` in this scope, then in each enclosing scope in turn.
    pub fn get(&self, name: &str) -> Option<Value> {
        match self.store.get(name) {
            Some(value) => Some(value.clone()),
            None => self
                .outer
                .as_ref()
                .and_then(|outer| outer.borrow().get(name)),
        }
    }

    /// Bind `name` in this scope. `let` always creates a new binding in the
    /// current scope rather than mutating an outer one, matching lexical
    /// shadowing semantics.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.store.insert(name.into(), value);
    }
}
