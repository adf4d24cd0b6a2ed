//! Tree-walking evaluator.
//!
//! `Error` and `ReturnValue` are ordinary [`Value`] variants rather than host
//! exceptions: every `eval_*` function returns a plain `Value`, and callers
//! that need to short-circuit check `is_error()`/match on the variant
//! themselves. This keeps control flow visible in the match arms instead of
//! hidden behind `?`/`panic!`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::{debug, trace};

use crate::ast::{
    expression::{BooleanLiteral, IntegerLiteral, StringLiteral},
    statement::BlockStatement,
    Expression, Program, Statement,
};
use crate::builtins::lookup_builtin;
use crate::environment::Environment;
use crate::object::Value;

pub const TRUE: Value = Value::Boolean(true);
pub const FALSE: Value = Value::Boolean(false);
pub const NULL: Value = Value::Null;

fn native_bool(value: bool) -> Value {
    if value {
        TRUE
    } else {
        FALSE
    }
}

fn error(msg: impl Into<String>) -> Value {
    let msg = msg.into();
    debug!("eval error: {msg}");
    Value::Error(msg)
}

pub fn eval_program(program: &Program, env: &Rc<RefCell<Environment>>) -> Value {
    let mut result = NULL;

    for stmt in &program.statements {
        result = eval_statement(stmt, env);
        match result {
            Value::ReturnValue(v) => return *v,
            Value::Error(_) => return result,
            _ => {}
        }
    }

    result
}

fn eval_block_statement(block: &BlockStatement, env: &Rc<RefCell<Environment>>) -> Value {
    let mut result = NULL;

    for stmt in &block.statements {
        result = eval_statement(stmt, env);
        if matches!(result, Value::ReturnValue(_) | Value::Error(_)) {
            return result;
        }
    }

    result
}

fn eval_statement(stmt: &Statement, env: &Rc<RefCell<Environment>>) -> Value {
    match stmt {
        Statement::Expression(expr) => eval_expression(expr, env),
        Statement::Block(block) => eval_block_statement(block, env),
        Statement::Let(let_stmt) => {
            let value = eval_expression(&let_stmt.value, env);
            if value.is_error() {
                return value;
            }
            env.borrow_mut().set(let_stmt.name.value.clone(), value);
            NULL
        }
        Statement::Return(ret) => {
            let value = match &ret.value {
                Some(expr) => eval_expression(expr, env),
                None => NULL,
            };
            if value.is_error() {
                return value;
            }
            Value::ReturnValue(Box::new(value))
        }
    }
}

fn eval_expression(expr: &Expression, env: &Rc<RefCell<Environment>>) -> Value {
    match expr {
        Expression::Integer(IntegerLiteral { value }) => Value::Integer(*value),
        Expression::Boolean(BooleanLiteral { value }) => native_bool(*value),
        Expression::StringLit(StringLiteral { value }) => Value::StringLit(value.clone()),
        Expression::Identifier(ident) => eval_identifier(&ident.value, env),
        Expression::Prefix(p) => {
            let right = eval_expression(&p.right, env);
            if right.is_error() {
                return right;
            }
            eval_prefix_expression(&p.operator, right)
        }
        Expression::Infix(i) => {
            let left = eval_expression(&i.left, env);
            if left.is_error() {
                return left;
            }
            let right = eval_expression(&i.right, env);
            if right.is_error() {
                return right;
            }
            eval_infix_expression(&i.operator, left, right)
        }
        Expression::If(if_expr) => {
            let condition = eval_expression(&if_expr.condition, env);
            if condition.is_error() {
                return condition;
            }
            if condition.is_truthy() {
                eval_block_statement(&if_expr.consequence, env)
            } else if let Some(alt) = &if_expr.alternative {
                eval_block_statement(alt, env)
            } else {
                NULL
            }
        }
        Expression::Function(f) => Value::Function {
            params: f.params.clone(),
            body: f.body.clone(),
            env: Rc::clone(env),
        },
        Expression::Call(call) => {
            let callee = eval_expression(&call.callee, env);
            if callee.is_error() {
                return callee;
            }
            let args = match eval_expressions(&call.args, env) {
                Ok(args) => args,
                Err(e) => return e,
            };
            apply_function(callee, args)
        }
        Expression::Array(arr) => match eval_expressions(&arr.elements, env) {
            Ok(elements) => Value::Array(elements),
            Err(e) => e,
        },
        Expression::Index(idx) => {
            let left = eval_expression(&idx.left, env);
            if left.is_error() {
                return left;
            }
            let index = eval_expression(&idx.index, env);
            if index.is_error() {
                return index;
            }
            eval_index_expression(left, index)
        }
        Expression::Hash(hash) => eval_hash_literal(hash, env),
    }
}

fn eval_identifier(name: &str, env: &Rc<RefCell<Environment>>) -> Value {
    if let Some(value) = env.borrow().get(name) {
        return value;
    }
    if let Some(builtin) = lookup_builtin(name) {
        return builtin;
    }
    error(format!("identifier not found: {name}"))
}

fn eval_prefix_expression(operator: &str, right: Value) -> Value {
    match operator {
        "!" => native_bool(!right.is_truthy()),
        "-" => match right {
            Value::Integer(i) => Value::Integer(i.wrapping_neg()),
            other => error(format!("unknown operator: -{}", other.type_name())),
        },
        other => error(format!("unknown operator: {other}{}", right.type_name())),
    }
}

fn eval_infix_expression(operator: &str, left: Value, right: Value) -> Value {
    match (&left, &right) {
        (Value::Integer(l), Value::Integer(r)) => eval_integer_infix(operator, *l, *r),
        (Value::StringLit(l), Value::StringLit(r)) => eval_string_infix(operator, l, r),
        _ if operator == "==" => native_bool(values_ref_equal(&left, &right)),
        _ if operator == "!=" => native_bool(!values_ref_equal(&left, &right)),
        _ if left.type_name() != right.type_name() => error(format!(
            "type mismatch: {} {operator} {}",
            left.type_name(),
            right.type_name()
        )),
        _ => error(format!(
            "unknown operator: {} {operator} {}",
            left.type_name(),
            right.type_name()
        )),
    }
}

/// `==`/`!=` on non-primitive values compare by identity, which is exactly
/// "are both the TRUE singleton" / "are both the FALSE singleton" / "are both
/// Null" for the value kinds that reach this arm, since nothing else here
/// implements structural equality.
fn values_ref_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Boolean(l), Value::Boolean(r)) => l == r,
        (Value::Null, Value::Null) => true,
        _ => false,
    }
}

fn eval_integer_infix(operator: &str, l: i64, r: i64) -> Value {
    match operator {
        "+" => Value::Integer(l.wrapping_add(r)),
        "-" => Value::Integer(l.wrapping_sub(r)),
        "*" => Value::Integer(l.wrapping_mul(r)),
        "/" => {
            if r == 0 {
                error("division by zero")
            } else {
                Value::Integer(l.wrapping_div(r))
            }
        }
        "<" => native_bool(l < r),
        ">" => native_bool(l > r),
        "==" => native_bool(l == r),
        "!=" => native_bool(l != r),
        other => error(format!("unknown operator: INTEGER {other} INTEGER")),
    }
}

fn eval_string_infix(operator: &str, l: &str, r: &str) -> Value {
    match operator {
        "+" => Value::StringLit(format!("{l}{r}")),
        "==" => native_bool(l == r),
        "!=" => native_bool(l != r),
        other => error(format!("unknown operator: STRING {other} STRING")),
    }
}

fn eval_expressions(
    exprs: &[Expression],
    env: &Rc<RefCell<Environment>>,
) -> Result<Vec<Value>, Value> {
    let mut values = Vec::with_capacity(exprs.len());
    for expr in exprs {
        let value = eval_expression(expr, env);
        if value.is_error() {
            return Err(value);
        }
        values.push(value);
    }
    Ok(values)
}

fn apply_function(callee: Value, args: Vec<Value>) -> Value {
    match callee {
        Value::Function { params, body, env } => {
            if params.len() != args.len() {
                return error(format!(
                    "wrong number of arguments. got={}, want={}",
                    args.len(),
                    params.len()
                ));
            }
            trace!("calling function with {} argument(s)", args.len());
            let call_env = Environment::enclosed(env);
            for (param, arg) in params.iter().zip(args) {
                call_env.borrow_mut().set(param.value.clone(), arg);
            }
            let result = eval_block_statement(&body, &call_env);
            match result {
                Value::ReturnValue(v) => *v,
                other => other,
            }
        }
        Value::Builtin(f) => f(&args),
        other => error(format!("not a function: {}", other.type_name())),
    }
}

fn eval_index_expression(left: Value, index: Value) -> Value {
    match (&left, &index) {
        (Value::Array(elements), Value::Integer(i)) => {
            if *i < 0 || *i as usize >= elements.len() {
                error(format!(
                    "index out of bounds. index={i}, size={}",
                    elements.len()
                ))
            } else {
                elements[*i as usize].clone()
            }
        }
        (Value::Hash(pairs), _) => match index.hash_key() {
            Some(key) => pairs.get(&key).map(|(_, v)| v.clone()).unwrap_or(NULL),
            None => error(format!("unusable as hash key: {}", index.type_name())),
        },
        _ => error(format!("index operator not supported: {}", left.type_name())),
    }
}

fn eval_hash_literal(
    hash: &crate::ast::expression::HashLiteral,
    env: &Rc<RefCell<Environment>>,
) -> Value {
    let mut pairs = HashMap::with_capacity(hash.pairs.len());

    for (key_expr, value_expr) in &hash.pairs {
        let key = eval_expression(key_expr, env);
        if key.is_error() {
            return key;
        }
        let hash_key = match key.hash_key() {
            Some(k) => k,
            None => return error(format!("unusable as hash key: {}", key.type_name())),
        };

        let value = eval_expression(value_expr, env);
        if value.is_error() {
            return value;
        }

        pairs.insert(hash_key, (key, value));
    }

    Value::Hash(pairs)
}
