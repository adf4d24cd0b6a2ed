//! Interactive REPL for Monkey.

mod cli;

use std::io::{self, BufRead, Write};

use colored::Colorize;
use log::debug;

use cli::Cli;
use monkey_lang::environment::Environment;
use monkey_lang::evaluator::eval_program;
use monkey_lang::lexer::Lexer;
use monkey_lang::object::Value;
use monkey_lang::parser::Parser;

const PROMPT: &str = ">> ";

fn main() {
    let args = Cli::init();
    simple_logger::init_with_level(args.verbosity.into()).expect("failed to initialize logger");

    let username = whoami_fallback();
    println!("Hello {username}! This is the Monkey programming language.");
    println!("Feel free to type in commands.");

    let env = Environment::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{PROMPT}");
        if stdout.flush().is_err() {
            return;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => return, // EOF (Ctrl-D)
            Ok(_) => {}
            Err(_) => return,
        }

        let mut parser = Parser::new(Lexer::new(&line));
        let program = parser.parse_program();

        if !parser.errors().is_empty() {
            println!("{}", "Error:".bold().red());
            for msg in parser.errors() {
                println!("\t{msg}");
            }
            continue;
        }

        let result = eval_program(&program, &env);
        if result.is_error() {
            debug!("repl produced an error value: {result}");
        }
        if !matches!(result, Value::Null) {
            println!("{result}");
        }
    }
}

fn whoami_fallback() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "there".to_string())
}
