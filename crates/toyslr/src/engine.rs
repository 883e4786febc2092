use crate::{
    config::EngineConfig,
    diagnostic::EngineError,
    first_follow::{FirstSets, FollowSets},
    grammar::Grammar,
    lexer::{self, Token},
    lr0::{self, LR0Automaton},
    parse_table::ParseTable,
    parser::{Driver, ParseReport, SemicolonRepair},
    toy,
};
use std::time::Instant;

/// The SLR(1) parser of the toy language.
///
/// All tables are computed once on construction and never change afterwards,
/// so a single engine may serve any number of parses, from any thread.
#[derive(Debug)]
pub struct Engine {
    grammar: Grammar,
    first_sets: FirstSets,
    follow_sets: FollowSets,
    automaton: LR0Automaton,
    table: ParseTable,
    repair: SemicolonRepair,
    config: EngineConfig,
}

impl Engine {
    /// Build an engine with the default configuration.
    pub fn new() -> Result<Self, EngineError> {
        Self::with_config(EngineConfig::new())
    }

    pub fn with_config(config: EngineConfig) -> Result<Self, EngineError> {
        let s = Instant::now();
        let grammar = toy::grammar()?;
        let first_sets = FirstSets::new(&grammar);
        let follow_sets = FollowSets::new(&grammar, &first_sets);
        tracing::debug!("first/follow sets: {:?} elapsed", s.elapsed());

        let automaton = lr0::lr0(&grammar);
        let table = ParseTable::generate(&grammar, &automaton, &follow_sets);
        let repair = SemicolonRepair::new(&grammar)?;
        tracing::info!(
            "construct: {} states, {:?} elapsed",
            automaton.len(),
            s.elapsed()
        );

        Ok(Self {
            grammar,
            first_sets,
            follow_sets,
            automaton,
            table,
            repair,
            config,
        })
    }

    /// Run the parser over an already tokenized program.
    pub fn parse(&self, tokens: &[Token]) -> ParseReport<'_> {
        Driver::new(
            &self.grammar,
            &self.table,
            &self.config,
            self.repair,
            tokens,
        )
        .run()
    }

    /// Tokenize `source` and parse it.
    pub fn parse_str(&self, source: &str) -> ParseReport<'_> {
        let tokens = self.tokenize(source);
        self.parse(&tokens)
    }

    pub fn tokenize(&self, source: &str) -> Vec<Token> {
        lexer::tokenize(&self.grammar, source)
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn first_sets(&self) -> &FirstSets {
        &self.first_sets
    }

    pub fn follow_sets(&self) -> &FollowSets {
        &self.follow_sets
    }

    pub fn automaton(&self) -> &LR0Automaton {
        &self.automaton
    }

    pub fn table(&self) -> &ParseTable {
        &self.table
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
