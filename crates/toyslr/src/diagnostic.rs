//! Syntax diagnostics and engine errors.

use crate::grammar::GrammarDefError;
use std::fmt;

/// A syntax error found while parsing, together with the recovery that was
/// applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Diagnostic {
    /// A `;` was missing before the offending token and has been inserted.
    #[error("syntax error, line {line}, missing \";\"")]
    MissingSemicolon { line: usize },

    /// The offending token was not acceptable here and has been discarded.
    #[error("syntax error, line {line}, {}", Expected(.expected))]
    Unexpected {
        line: usize,
        found: String,
        expected: Vec<String>,
    },
}

impl Diagnostic {
    pub fn line(&self) -> usize {
        match self {
            Self::MissingSemicolon { line } | Self::Unexpected { line, .. } => *line,
        }
    }
}

struct Expected<'a>(&'a [String]);

impl fmt::Display for Expected<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            [] => f.write_str("no token is acceptable here"),
            [single] => write!(f, "expected \"{}\"", single),
            many => {
                f.write_str("expected one of ")?;
                for (i, t) in many.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "\"{}\"", t)?;
                }
                Ok(())
            }
        }
    }
}

/// Errors raised while constructing an [`Engine`](crate::Engine).
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to define the grammar")]
    Grammar(
        #[from]
        #[source]
        GrammarDefError,
    ),

    #[error("the grammar has no terminal `{}' required by error recovery", _0)]
    MissingTerminal(&'static str),
}
