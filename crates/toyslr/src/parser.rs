//! The shift-reduce driver.

use crate::{
    config::EngineConfig,
    derivation::Derivation,
    diagnostic::{Diagnostic, EngineError},
    grammar::{Grammar, NonterminalID, ProductionID, SymbolID, TerminalID},
    lexer::Token,
    lr0::StateID,
    parse_table::{Action, ParseTable},
};

/// How a parse run came to an end.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The accept action was reached. The parse may still have recorded
    /// diagnostics on the way.
    Accepted,

    /// Panic-mode recovery discarded the end of input.
    InputExhausted,

    /// The step ceiling was reached before acceptance.
    StepLimitExceeded,

    /// The table has no goto entry after a reduction.
    MissingGoto {
        state: StateID,
        nonterminal: NonterminalID,
    },

    /// A reduction would pop more symbols than the stack holds.
    StackUnderflow,
}

/// The result of a single parse run.
#[derive(Debug)]
pub struct ParseReport<'g> {
    grammar: &'g Grammar,
    outcome: Outcome,
    diagnostics: Vec<Diagnostic>,
    reductions: Vec<ProductionID>,
    steps: usize,
}

impl<'g> ParseReport<'g> {
    /// Whether the input was accepted without any syntax error.
    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Accepted && self.diagnostics.is_empty()
    }

    pub fn has_error(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// The line of the first reported syntax error.
    pub fn error_line(&self) -> Option<usize> {
        self.diagnostics.first().map(Diagnostic::line)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.len()
    }

    /// Syntax errors in order of discovery.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics[..]
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Number of driver steps taken.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// The productions reduced by, in the order the reductions happened.
    pub fn reductions(&self) -> &[ProductionID] {
        &self.reductions[..]
    }

    /// The reduced productions rendered as `lhs -> rhs`, most recent first.
    pub fn productions(&self) -> Vec<String> {
        self.reductions
            .iter()
            .rev()
            .map(|id| self.grammar.production(*id).display(self.grammar).to_string())
            .collect()
    }

    /// The rightmost derivation rebuilt from the reductions.
    pub fn derivation(&self) -> Derivation<'g> {
        Derivation::from_reductions(self.grammar, &self.reductions)
    }
}

/// Insertion of a single missing `;` in front of a token that typically
/// starts the next statement or closes a block.
#[derive(Debug, Copy, Clone)]
pub(crate) struct SemicolonRepair {
    semicolon: TerminalID,
    triggers: [TerminalID; 4],
}

impl SemicolonRepair {
    pub(crate) fn new(g: &Grammar) -> Result<Self, EngineError> {
        let lookup = |name: &'static str| {
            g.terminal_by_name(name)
                .ok_or(EngineError::MissingTerminal(name))
        };
        Ok(Self {
            semicolon: lookup(";")?,
            triggers: [lookup("}")?, lookup("ID")?, lookup("if")?, lookup("while")?],
        })
    }

    fn applies(&self, table: &ParseTable, state: StateID, lookahead: TerminalID) -> bool {
        self.triggers.contains(&lookahead) && table.action(state, self.semicolon).is_some()
    }
}

/// The configuration of one parse run. It owns its stacks and the token
/// buffer, and only borrows the tables.
pub(crate) struct Driver<'e> {
    grammar: &'e Grammar,
    table: &'e ParseTable,
    max_steps: usize,
    // consumed on first use.
    repair: Option<SemicolonRepair>,
    tokens: Vec<Token>,
    cursor: usize,
    states: Vec<StateID>,
    symbols: Vec<SymbolID>,
    reductions: Vec<ProductionID>,
    diagnostics: Vec<Diagnostic>,
}

impl<'e> Driver<'e> {
    pub(crate) fn new(
        grammar: &'e Grammar,
        table: &'e ParseTable,
        config: &EngineConfig,
        repair: SemicolonRepair,
        input: &[Token],
    ) -> Self {
        let eoi_line = input.last().map_or(1, |t| t.line);
        let mut tokens = Vec::with_capacity(input.len() + 2);
        tokens.extend_from_slice(input);
        tokens.push(Token::new(TerminalID::EOI, eoi_line));

        Self {
            grammar,
            table,
            max_steps: config.get_max_steps(),
            repair: config.is_semicolon_repair_enabled().then_some(repair),
            tokens,
            cursor: 0,
            states: vec![StateID::START],
            symbols: vec![SymbolID::T(TerminalID::EOI)],
            reductions: vec![],
            diagnostics: vec![],
        }
    }

    pub(crate) fn run(mut self) -> ParseReport<'e> {
        let (outcome, steps) = self.drive();
        tracing::debug!(
            "parse finished: {:?} after {} steps, {} diagnostic(s)",
            outcome,
            steps,
            self.diagnostics.len()
        );
        ParseReport {
            grammar: self.grammar,
            outcome,
            diagnostics: self.diagnostics,
            reductions: self.reductions,
            steps,
        }
    }

    fn drive(&mut self) -> (Outcome, usize) {
        for step in 1..=self.max_steps {
            let (current, lookahead) = match (self.states.last(), self.tokens.get(self.cursor)) {
                (Some(current), Some(lookahead)) => (*current, *lookahead),
                (None, _) => return (Outcome::StackUnderflow, step),
                (_, None) => return (Outcome::InputExhausted, step),
            };

            match self.table.action(current, lookahead.terminal) {
                Some(Action::Shift(next)) => {
                    tracing::trace!(
                        "{:?}: shift {} -> {:?}",
                        current,
                        self.name(lookahead.terminal),
                        next
                    );
                    self.states.push(next);
                    self.symbols.push(SymbolID::T(lookahead.terminal));
                    self.cursor += 1;
                }

                Some(Action::Reduce(production)) => {
                    if let Err(outcome) = self.reduce(production) {
                        return (outcome, step);
                    }
                }

                Some(Action::Accept) => return (Outcome::Accepted, step),

                None => {
                    if !self.recover(current, lookahead) {
                        return (Outcome::InputExhausted, step);
                    }
                }
            }
        }

        tracing::debug!("step ceiling of {} reached", self.max_steps);
        (Outcome::StepLimitExceeded, self.max_steps)
    }

    fn reduce(&mut self, id: ProductionID) -> Result<(), Outcome> {
        let production = self.grammar.production(id);
        let n = production.right().len();
        if self.states.len() <= n {
            return Err(Outcome::StackUnderflow);
        }
        self.states.truncate(self.states.len() - n);
        self.symbols.truncate(self.symbols.len() - n);

        let top = *self.states.last().ok_or(Outcome::StackUnderflow)?;
        let left = production.left();
        let next = self.table.goto(top, left).ok_or(Outcome::MissingGoto {
            state: top,
            nonterminal: left,
        })?;
        tracing::trace!(
            "{:?}: reduce {} -> {:?}",
            top,
            production.display(self.grammar),
            next
        );

        self.states.push(next);
        self.symbols.push(SymbolID::N(left));
        self.reductions.push(id);
        debug_assert_eq!(self.states.len(), self.symbols.len());
        Ok(())
    }

    /// Handle a missing table entry. Returns `false` when there is nothing
    /// left to continue with.
    fn recover(&mut self, state: StateID, lookahead: Token) -> bool {
        match self.repair {
            Some(repair) if repair.applies(self.table, state, lookahead.terminal) => {
                self.repair = None;

                // the `;` belongs to the end of the previous token's line.
                let line = match self.cursor.checked_sub(1) {
                    Some(prev) => self.tokens[prev].line,
                    None => lookahead.line,
                };
                tracing::debug!(
                    "{:?}: inserting `;` before {} (line {})",
                    state,
                    self.name(lookahead.terminal),
                    lookahead.line
                );
                self.diagnostics.push(Diagnostic::MissingSemicolon { line });
                self.tokens
                    .insert(self.cursor, Token::new(repair.semicolon, line));
                return true;
            }
            _ => (),
        }

        let expected = self
            .table
            .expected_terminals(state)
            .map(|t| self.name(t).to_owned())
            .collect();
        let found = self.name(lookahead.terminal).to_owned();
        self.diagnostics.push(Diagnostic::Unexpected {
            line: lookahead.line,
            found,
            expected,
        });

        if lookahead.terminal == TerminalID::EOI {
            return false;
        }
        tracing::debug!(
            "{:?}: discarding {} (line {})",
            state,
            self.name(lookahead.terminal),
            lookahead.line
        );
        self.cursor += 1;
        true
    }

    fn name(&self, terminal: TerminalID) -> &'e str {
        let g: &'e Grammar = self.grammar;
        g.terminals[&terminal].name()
    }
}
