pub mod ast;
mod builtins;
pub mod config;
pub mod diagnostic;
mod environment;
pub mod evaluator;
mod lexer;
mod parser;
pub mod repl;
mod token;
pub mod value;

pub use config::Config;
pub use diagnostic::{Collector, Diagnostic, Reporter, Severity};
pub use environment::Environment;
pub use lexer::{lex, LexError};
pub use parser::{ParseError, Parser};
pub use value::{format, EvalError, Value};

use evaluator::Evaluator;
use rand::rngs::StdRng;
use tracing::debug;

/// Everything one run of a program produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outcome {
    pub value: Value,
    pub diagnostics: Vec<Diagnostic>,
    pub output: Vec<String>,
}

impl Outcome {
    pub fn messages(&self) -> Vec<String> {
        self.diagnostics.iter().map(Diagnostic::message).collect()
    }
}

/// Keeps its globals between runs, so a REPL can define a name on one line
/// and use it on the next.
pub struct Interpreter {
    env: Environment,
    rng: StdRng,
    max_depth: usize,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            env: Environment::with_builtins(),
            rng: config.rng(),
            max_depth: config.max_depth,
        }
    }

    pub fn run(&mut self, source: &str) -> Outcome {
        let mut collector = Collector::default();
        let value = self.run_with(source, &mut collector);
        Outcome {
            value,
            diagnostics: collector.diagnostics,
            output: collector.output,
        }
    }

    /// Runs `source` against the interpreter's globals. A lex error or a
    /// bracket mismatch at the top level is reported as the only diagnostic
    /// and nothing is evaluated.
    pub fn run_with(&mut self, source: &str, reporter: &mut dyn Reporter) -> Value {
        let tokens = match lex(source) {
            Ok(tokens) => tokens,
            Err(err) => {
                reporter.report(err.into());
                return Value::Nothing;
            }
        };

        let (program, errors) = Parser::new(&tokens).parse_program();
        if let Some(fatal) = errors.iter().find(|err| err.is_fatal()) {
            reporter.report(fatal.clone().into());
            return Value::Nothing;
        }
        for err in errors {
            reporter.report(err.into());
        }
        debug!(statements = program.statements.len(), "parsed program");

        Evaluator::new(&mut self.env, reporter, &mut self.rng)
            .with_max_depth(self.max_depth)
            .evaluate_statements(&program.statements)
    }
}

/// Runs `source` in a fresh interpreter.
pub fn run(source: &str) -> Outcome {
    Interpreter::new().run(source)
}
