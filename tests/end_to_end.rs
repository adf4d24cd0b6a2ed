//! End-to-end lex -> parse -> eval scenarios, run against the public API the
//! way the REPL drives it.

use monkey_lang::environment::Environment;
use monkey_lang::evaluator::eval_program;
use monkey_lang::lexer::Lexer;
use monkey_lang::object::Value;
use monkey_lang::parser::Parser;

fn run(input: &str) -> Value {
    let mut parser = Parser::new(Lexer::new(input));
    let program = parser.parse_program();
    assert!(
        parser.errors().is_empty(),
        "unexpected parse errors for {input:?}: {:?}",
        parser.errors()
    );
    let env = Environment::new();
    eval_program(&program, &env)
}

#[test]
fn calls_a_two_argument_function() {
    let result = run("let add = fn(x, y) { x + y }; add(2, 3);");
    assert_eq!(result.to_string(), "5");
}

#[test]
fn closures_over_an_outer_parameter() {
    let result = run("let newAdder = fn(x) { fn(y) { x + y } }; let addTwo = newAdder(2); addTwo(3);");
    assert_eq!(result.to_string(), "5");
}

#[test]
fn recursive_factorial() {
    let result = run(
        "let fact = fn(n) { if (n < 2) { 1 } else { n * fact(n - 1) } }; fact(5);",
    );
    assert_eq!(result.to_string(), "120");
}

#[test]
fn nested_return_escapes_only_the_enclosing_function_like_program() {
    let result = run("if (10 > 1) { if (10 > 1) { return 10; } return 1; }");
    assert_eq!(result.to_string(), "10");
}

#[test]
fn hash_indexing_hits_and_misses() {
    let env = Environment::new();
    let mut parser = Parser::new(Lexer::new(
        r#"let h = {"name": "Alice", "age": 30}; h["name"];"#,
    ));
    let program = parser.parse_program();
    assert!(parser.errors().is_empty());
    let hit = eval_program(&program, &env);
    assert_eq!(hit.to_string(), "\"Alice\"");

    let mut parser = Parser::new(Lexer::new(r#"h["missing"];"#));
    let program = parser.parse_program();
    assert!(parser.errors().is_empty());
    let miss = eval_program(&program, &env);
    assert_eq!(miss.to_string(), "null");
}

#[test]
fn adding_integer_and_boolean_is_a_type_mismatch() {
    let result = run("5 + true;");
    assert_eq!(result.to_string(), "ERROR:type mismatch: INTEGER + BOOLEAN");
}

#[test]
fn unbound_identifier_is_reported_by_name() {
    let result = run("foobar;");
    assert_eq!(result.to_string(), "ERROR:identifier not found: foobar");
}

#[test]
fn len_dispatches_by_argument_type() {
    assert_eq!(run(r#"len("hello")"#).to_string(), "5");
    assert_eq!(run("len([1,2,3])").to_string(), "3");
    assert_eq!(
        run("len(1)").to_string(),
        "ERROR:argument to `len` not supported, got INTEGER"
    );
}

#[test]
fn program_display_round_trips_through_reparsing() {
    let input = "let x = 5; let add = fn(a, b) { a + b }; add(x, 10);";
    let mut first = Parser::new(Lexer::new(input));
    let first_program = first.parse_program();
    assert!(first.errors().is_empty());

    let rendered = first_program.to_string();

    let mut second = Parser::new(Lexer::new(&rendered));
    let second_program = second.parse_program();
    assert!(second.errors().is_empty());

    assert_eq!(first_program.statements.len(), second_program.statements.len());
    for (a, b) in first_program.statements.iter().zip(&second_program.statements) {
        assert_eq!(a.to_string(), b.to_string());
    }
}

#[test]
fn closures_over_the_global_scope_see_later_top_level_bindings() {
    let env = Environment::new();

    let mut parser = Parser::new(Lexer::new("let late = fn() { y }; "));
    let program = parser.parse_program();
    assert!(parser.errors().is_empty());
    eval_program(&program, &env);

    let mut parser = Parser::new(Lexer::new("let y = 99; late();"));
    let program = parser.parse_program();
    assert!(parser.errors().is_empty());
    let result = eval_program(&program, &env);

    assert_eq!(result.to_string(), "99");
}
