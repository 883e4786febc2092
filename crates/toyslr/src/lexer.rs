//! Scanner for the placeholder token stream.
//!
//! The input is already a sequence of terminal-level lexemes separated by
//! blanks, e.g. `{ ID = NUM ; }`. Lines are counted from 1 and attached to
//! each token for diagnostics.

use crate::grammar::{Grammar, TerminalID};
use logos::Logos;

#[derive(Debug, Copy, Clone, Logos, PartialEq)]
#[logos(skip r"[ \t\r\f]+")]
enum Lexeme {
    #[token("\n")]
    Newline,

    #[regex(r"[^ \t\r\n\f]+")]
    Word,
}

/// A terminal read from the input, with the line it appeared on.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Token {
    pub terminal: TerminalID,
    pub line: usize,
}

impl Token {
    pub const fn new(terminal: TerminalID, line: usize) -> Self {
        Self { terminal, line }
    }
}

/// Split `source` into tokens of `grammar`.
///
/// Words that name no terminal are dropped with a warning.
pub fn tokenize(grammar: &Grammar, source: &str) -> Vec<Token> {
    let mut tokens = vec![];
    let mut line = 1;
    let mut lexer = Lexeme::lexer(source);
    while let Some(lexeme) = lexer.next() {
        match lexeme {
            Ok(Lexeme::Newline) => line += 1,
            Ok(Lexeme::Word) => match grammar.terminal_by_name(lexer.slice()) {
                Some(terminal) => tokens.push(Token::new(terminal, line)),
                None => {
                    tracing::warn!("line {}: skipping unknown lexeme {:?}", line, lexer.slice())
                }
            },
            Err(()) => {
                tracing::warn!("line {}: unreadable input {:?}", line, lexer.slice())
            }
        }
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toy;

    #[test]
    fn words_map_to_terminals_with_lines() {
        let g = toy::grammar().unwrap();
        let tokens = tokenize(&g, "{\n  ID = NUM ;\n\n}");
        let names: Vec<_> = tokens
            .iter()
            .map(|t| g.terminals[&t.terminal].name())
            .collect();
        assert_eq!(names, ["{", "ID", "=", "NUM", ";", "}"]);
        let lines: Vec<_> = tokens.iter().map(|t| t.line).collect();
        assert_eq!(lines, [1, 2, 2, 2, 2, 4]);
    }

    #[test]
    fn longest_word_wins() {
        let g = toy::grammar().unwrap();
        let tokens = tokenize(&g, "<= < == =");
        let names: Vec<_> = tokens
            .iter()
            .map(|t| g.terminals[&t.terminal].name())
            .collect();
        assert_eq!(names, ["<=", "<", "==", "="]);
    }

    #[test]
    fn unknown_words_are_dropped() {
        let g = toy::grammar().unwrap();
        let tokens = tokenize(&g, "{ foo }");
        assert_eq!(tokens.len(), 2);
        assert!(tokenize(&g, "   \n\t").is_empty());
    }
}
