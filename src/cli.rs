//! Command-line argument parsing for the `monkey` REPL binary.

use clap::{Parser, ValueEnum};

/// Struct containing the CLI configuration for the Monkey REPL.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Specify the log level of the interpreter.
    #[arg(value_enum, short, long, default_value_t = LogLevel::default())]
    pub verbosity: LogLevel,
}

impl Cli {
    pub fn init() -> Self {
        Cli::parse()
    }
}

/// Enum for specifying the log level of the interpreter.
#[derive(ValueEnum, Clone, Default, Debug)]
pub enum LogLevel {
    /// The default log level. Only critical errors will be logged.
    #[default]
    #[value(alias("0"))]
    Error,

    /// Also logs warnings.
    #[value(alias("1"))]
    Warn,

    /// Also logs general informational messages.
    #[value(alias("2"))]
    Info,

    /// Logs every lexed token, parsed statement, and evaluated call.
    #[value(alias("3"))]
    Debug,

    /// Logs everything, including per-token lexer trace output.
    #[value(alias("4"))]
    Trace,
}

impl From<LogLevel> for log::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}
