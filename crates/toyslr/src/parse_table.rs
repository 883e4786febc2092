//! SLR(1) action/goto table.

use crate::{
    first_follow::FollowSets,
    grammar::{Grammar, NonterminalID, ProductionID, TerminalID},
    lr0::{LR0Automaton, StateID},
    types::{display_fn, Map},
};
use std::fmt;

/// The action that the automaton in a state performs on a particular
/// lookahead symbol.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
    /// Read a lookahead symbol and transition to the specified state.
    Shift(StateID),

    /// Reduce by the specified production.
    Reduce(ProductionID),

    Accept,
}

#[derive(Debug)]
pub struct ParseTable {
    actions: Vec<Map<TerminalID, Action>>,
    gotos: Vec<Map<NonterminalID, StateID>>,
}

impl ParseTable {
    /// Derive the SLR(1) table from the LR(0) automaton and the Follow sets.
    ///
    /// Shift and goto entries come straight from the automaton edges. Reduce
    /// and accept entries are written afterwards and replace whatever already
    /// occupies the cell; the toy grammar has no such cell.
    pub fn generate(g: &Grammar, automaton: &LR0Automaton, follow: &FollowSets) -> Self {
        let mut actions = Vec::with_capacity(automaton.len());
        let mut gotos = Vec::with_capacity(automaton.len());

        for (id, state) in automaton.states() {
            let mut row: Map<TerminalID, Action> = state
                .shifts
                .iter()
                .map(|(t, next)| (*t, Action::Shift(*next)))
                .collect();

            for item in state.completed(g) {
                if item.production == ProductionID::ACCEPT {
                    set_action(g, &mut row, id, TerminalID::EOI, Action::Accept);
                    continue;
                }
                let left = g.production(item.production).left();
                for t in follow.get(left) {
                    set_action(g, &mut row, id, *t, Action::Reduce(item.production));
                }
            }

            // keep rows in terminal declaration order.
            row.sort_keys();
            actions.push(row);
            gotos.push(state.gotos.clone());
        }

        Self { actions, gotos }
    }

    pub fn action(&self, state: StateID, lookahead: TerminalID) -> Option<Action> {
        self.actions
            .get(state.index())
            .and_then(|row| row.get(&lookahead))
            .copied()
    }

    pub fn goto(&self, state: StateID, symbol: NonterminalID) -> Option<StateID> {
        self.gotos
            .get(state.index())
            .and_then(|row| row.get(&symbol))
            .copied()
    }

    /// The terminals for which `state` has a defined action, in terminal
    /// declaration order.
    pub fn expected_terminals(&self, state: StateID) -> impl Iterator<Item = TerminalID> + '_ {
        self.actions
            .get(state.index())
            .into_iter()
            .flat_map(|row| row.keys().copied())
    }

    pub fn num_states(&self) -> usize {
        self.actions.len()
    }

    pub fn display<'g>(&'g self, g: &'g Grammar) -> impl fmt::Display + 'g {
        display_fn(move |f| {
            for (i, (row, gotos)) in self.actions.iter().zip(&self.gotos).enumerate() {
                if i > 0 {
                    writeln!(f)?;
                }
                writeln!(f, "#### State {:02}", i)?;
                writeln!(f, "## actions")?;
                for (t, action) in row {
                    let t = &g.terminals[t];
                    match action {
                        Action::Shift(n) => writeln!(f, "- {} => shift({:02})", t, n)?,
                        Action::Reduce(p) => {
                            writeln!(f, "- {} => reduce({})", t, g.production(*p).display(g))?
                        }
                        Action::Accept => writeln!(f, "- {} => accept", t)?,
                    }
                }
                if !gotos.is_empty() {
                    writeln!(f, "## gotos")?;
                    for (n, to) in gotos {
                        writeln!(f, "- {} => goto({:02})", g.nonterminals[n], to)?;
                    }
                }
            }
            Ok(())
        })
    }
}

fn set_action(
    g: &Grammar,
    row: &mut Map<TerminalID, Action>,
    state: StateID,
    lookahead: TerminalID,
    action: Action,
) {
    if let Some(prev) = row.insert(lookahead, action) {
        if prev != action {
            tracing::debug!(
                "overwrote {:?} with {:?} at ({:?}, {})",
                prev,
                action,
                state,
                g.terminals[&lookahead]
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{first_follow::FirstSets, lr0::lr0, toy};

    fn build() -> (Grammar, LR0Automaton, ParseTable) {
        let g = toy::grammar().unwrap();
        let first = FirstSets::new(&g);
        let follow = FollowSets::new(&g, &first);
        let automaton = lr0(&g);
        let table = ParseTable::generate(&g, &automaton, &follow);
        (g, automaton, table)
    }

    #[test]
    fn start_state_expects_lbrace_only() {
        let (g, _, table) = build();
        let expected: Vec<_> = table.expected_terminals(StateID::START).collect();
        assert_eq!(expected, vec![g.terminal_by_name("{").unwrap()]);
    }

    #[test]
    fn exactly_one_accept_entry() {
        let (g, automaton, table) = build();
        let accepts: Vec<_> = automaton
            .states()
            .filter(|(id, _)| table.action(*id, TerminalID::EOI) == Some(Action::Accept))
            .map(|(id, _)| id)
            .collect();
        assert_eq!(accepts.len(), 1);

        // it is reached from the start state through `program`.
        assert_eq!(Some(accepts[0]), table.goto(StateID::START, g.start_symbol));
    }

    #[test]
    fn shifts_and_gotos_mirror_the_automaton() {
        let (_, automaton, table) = build();
        assert_eq!(table.num_states(), automaton.len());
        for (id, state) in automaton.states() {
            for (t, next) in &state.shifts {
                assert_eq!(table.action(id, *t), Some(Action::Shift(*next)));
            }
            for (n, next) in &state.gotos {
                assert_eq!(table.goto(id, *n), Some(*next));
            }
        }
    }

    #[test]
    fn toy_grammar_has_no_conflicts() {
        let (g, automaton, _) = build();
        let first = FirstSets::new(&g);
        let follow = FollowSets::new(&g, &first);
        for (_, state) in automaton.states() {
            let mut seen = Map::<TerminalID, usize>::default();
            for t in state.shifts.keys() {
                *seen.entry(*t).or_default() += 1;
            }
            for item in state.completed(&g) {
                if item.production == ProductionID::ACCEPT {
                    *seen.entry(TerminalID::EOI).or_default() += 1;
                    continue;
                }
                for t in follow.get(g.production(item.production).left()) {
                    *seen.entry(*t).or_default() += 1;
                }
            }
            assert!(seen.values().all(|n| *n == 1), "{}", state.display(&g));
        }
    }
}
