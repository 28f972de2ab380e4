use crate::lexer::LexError;
use crate::parser::ParseError;
use crate::value::EvalError;
use custom_error::custom_error;
use strum_macros::Display;
use tracing::debug;

custom_error! {
    #[derive(Clone, PartialEq)]
    pub Diagnostic

    Lex{source: LexError} = "{source}",
    Parse{source: ParseError} = "{source}",
    Eval{source: EvalError, line: usize} = "{source} (line {line})",
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Severity {
    #[strum(to_string = "!")]
    Error,
    #[strum(to_string = "*")]
    Warning,
}

impl Diagnostic {
    pub fn line(&self) -> usize {
        match self {
            Self::Lex { source } => source.line(),
            Self::Parse { source } => source.line(),
            Self::Eval { line, .. } => *line,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::Lex { .. } => Severity::Error,
            Self::Parse { source } if source.is_fatal() => Severity::Error,
            Self::Eval {
                source: EvalError::ReadOnly { .. } | EvalError::RecursionLimit { .. },
                ..
            } => Severity::Error,
            _ => Severity::Warning,
        }
    }

    /// The diagnostic as shown to a user, prefixed by its severity marker.
    pub fn message(&self) -> String {
        format!("[{}] {}", self.severity(), self)
    }
}

/// Receives everything a program reports while it runs: diagnostics, and the
/// lines written by the print operator.
pub trait Reporter {
    fn report(&mut self, diagnostic: Diagnostic);

    fn print(&mut self, text: &str);
}

/// Keeps diagnostics and printed output in the order they were produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collector {
    pub diagnostics: Vec<Diagnostic>,
    pub output: Vec<String>,
}

impl Reporter for Collector {
    fn report(&mut self, diagnostic: Diagnostic) {
        debug!(line = diagnostic.line(), "{}", diagnostic.message());
        self.diagnostics.push(diagnostic);
    }

    fn print(&mut self, text: &str) {
        debug!(target: "joc::print", "{}", text);
        self.output.push(text.to_owned());
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ast::GroupKind;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_messages() {
        let cases = vec![
            (
                Diagnostic::from(LexError::UnterminatedString { line: 3 }),
                "[!] unclosed string (starting at line 3)",
                3,
            ),
            (
                ParseError::UnclosedBracket {
                    bracket: ']',
                    group: GroupKind::Collection,
                    line: 1,
                }
                .into(),
                "[!] unclosed collection, expected ']' before end of input (starting at line 1)",
                1,
            ),
            (
                ParseError::MissingMappingValue {
                    key: "k".to_owned(),
                    line: 2,
                }
                .into(),
                "[*] missing value for mapping key 'k' (line 2)",
                2,
            ),
            (
                Diagnostic::Eval {
                    source: EvalError::NotAFunction {
                        name: "g".to_owned(),
                    },
                    line: 7,
                },
                "[*] couldn't find function 'g' (line 7)",
                7,
            ),
            (
                Diagnostic::Eval {
                    source: EvalError::ReadOnly {
                        name: "_x".to_owned(),
                    },
                    line: 1,
                },
                "[!] words starting with '_' can't be modified: '_x' (line 1)",
                1,
            ),
        ];

        for (diagnostic, message, line) in cases {
            assert_eq!(diagnostic.message(), message);
            assert_eq!(diagnostic.line(), line);
        }
    }

    #[test]
    fn test_collector_keeps_order() {
        let mut collector = Collector::default();
        collector.print("first");
        collector.report(LexError::UnterminatedString { line: 1 }.into());
        collector.print("second");

        assert_eq!(collector.output, vec!["first", "second"]);
        assert_eq!(collector.diagnostics.len(), 1);
    }

    #[test]
    fn test_collector_stays_quiet_at_warn_level() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_writer(move || writer.clone())
            .finish();

        let mut collector = Collector::default();
        tracing::subscriber::with_default(subscriber, || {
            collector.report(LexError::UnterminatedString { line: 1 }.into());
            collector.print("shown by the caller");
        });

        assert_eq!(collector.diagnostics.len(), 1);
        assert!(captured.0.lock().unwrap().is_empty());
    }
}
