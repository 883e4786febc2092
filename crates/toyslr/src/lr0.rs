//! The canonical LR(0) automaton.

use crate::{
    grammar::{Grammar, NonterminalID, ProductionID, SymbolID, TerminalID},
    types::{display_fn, Map},
};
use std::{collections::BTreeSet, fmt};

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateID(u16);

impl StateID {
    pub const START: Self = Self(0);

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for StateID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S#{:03}", self.0)
    }
}

impl fmt::Display for StateID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// The LR(0) item: a production with a marker (the *dot*) on its
/// right-hand side.
///
/// Items are ordered by production first and dot position second, so that
/// [`ItemSet`] compares two states as sets regardless of how their items
/// were discovered.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LR0Item {
    pub production: ProductionID,
    pub dot: usize,
}

impl LR0Item {
    /// The symbol right after the dot, if any.
    pub fn next_symbol(&self, g: &Grammar) -> Option<SymbolID> {
        g.production(self.production).right().get(self.dot).copied()
    }

    pub fn is_complete(&self, g: &Grammar) -> bool {
        self.dot >= g.production(self.production).right().len()
    }

    pub fn display<'g>(&'g self, g: &'g Grammar) -> impl fmt::Display + 'g {
        display_fn(move |f| {
            let production = g.production(self.production);
            write!(f, "[{} ->", g.nonterminals[&production.left()])?;
            for (i, symbol) in production.right().iter().enumerate() {
                if i == self.dot {
                    f.write_str(" .")?;
                }
                write!(f, " {}", g.symbol_name(*symbol))?;
            }
            if self.dot == production.right().len() {
                f.write_str(" .")?;
            }
            f.write_str("]")
        })
    }
}

/// A set of LR(0) items.
pub type ItemSet = BTreeSet<LR0Item>;

/// Computes the closure of a set of items.
///
/// For every item whose dot stands before a nonterminal `N`, the items
/// `[N -> . gamma]` for all productions of `N` are added, until nothing
/// changes.
pub fn closure(g: &Grammar, items: &ItemSet) -> ItemSet {
    let mut closure = items.clone();
    let mut pending: Vec<LR0Item> = items.iter().copied().collect();
    while let Some(item) = pending.pop() {
        let n = match item.next_symbol(g) {
            Some(SymbolID::N(n)) => n,
            _ => continue,
        };
        for production in g.productions_of(n) {
            let new_item = LR0Item {
                production: production.id(),
                dot: 0,
            };
            if closure.insert(new_item) {
                pending.push(new_item);
            }
        }
    }
    closure
}

/// Computes `goto(items, symbol)`: the closure of the items whose dot has
/// been moved over `symbol`.
pub fn goto(g: &Grammar, items: &ItemSet, symbol: SymbolID) -> ItemSet {
    let moved: ItemSet = items
        .iter()
        .filter(|item| item.next_symbol(g) == Some(symbol))
        .map(|item| LR0Item {
            dot: item.dot + 1,
            ..*item
        })
        .collect();
    closure(g, &moved)
}

#[derive(Debug, Clone)]
pub struct LR0State {
    pub items: ItemSet,
    pub shifts: Map<TerminalID, StateID>,
    pub gotos: Map<NonterminalID, StateID>,
}

impl LR0State {
    /// The completed items of this state, i.e. candidates for reduction.
    pub fn completed<'g>(&'g self, g: &'g Grammar) -> impl Iterator<Item = &'g LR0Item> + 'g {
        self.items.iter().filter(move |item| item.is_complete(g))
    }

    pub fn display<'g>(&'g self, g: &'g Grammar) -> impl fmt::Display + 'g {
        display_fn(move |f| {
            writeln!(f, "## items:")?;
            for item in &self.items {
                writeln!(f, "- {}", item.display(g))?;
            }
            if !self.shifts.is_empty() {
                writeln!(f, "## shifts:")?;
                for (t, to) in &self.shifts {
                    writeln!(f, "- {} => {:?}", g.terminals[t], to)?;
                }
            }
            if !self.gotos.is_empty() {
                writeln!(f, "## gotos:")?;
                for (n, to) in &self.gotos {
                    writeln!(f, "- {} => {:?}", g.nonterminals[n], to)?;
                }
            }
            Ok(())
        })
    }
}

#[derive(Debug)]
pub struct LR0Automaton {
    pub states: Vec<LR0State>,
}

impl LR0Automaton {
    pub fn state(&self, id: StateID) -> &LR0State {
        &self.states[id.index()]
    }

    pub fn states(&self) -> impl Iterator<Item = (StateID, &LR0State)> + '_ {
        self.states
            .iter()
            .enumerate()
            .map(|(i, state)| (StateID(i as u16), state))
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn display<'g>(&'g self, g: &'g Grammar) -> impl fmt::Display + 'g {
        display_fn(move |f| {
            for (i, (id, state)) in self.states().enumerate() {
                if i > 0 {
                    writeln!(f)?;
                }
                writeln!(f, "#### State {:02}", id)?;
                write!(f, "{}", state.display(g))?;
            }
            Ok(())
        })
    }
}

/// Calculate the canonical LR(0) automaton based on the specified grammar.
///
/// States are numbered in order of discovery: state 0 is the closure of
/// `[S' -> . program]`, and each state is expanded over every grammar symbol
/// in [`Grammar::symbols`] order.
pub fn lr0(g: &Grammar) -> LR0Automaton {
    let kernel: ItemSet = Some(LR0Item {
        production: ProductionID::ACCEPT,
        dot: 0,
    })
    .into_iter()
    .collect();
    let start = closure(g, &kernel);

    let symbols: Vec<SymbolID> = g.symbols().collect();

    let mut item_sets: Vec<ItemSet> = vec![start.clone()];
    let mut known = Map::<ItemSet, StateID>::default();
    known.insert(start, StateID::START);
    let mut edges: Vec<Map<SymbolID, StateID>> = vec![];

    let mut current = 0;
    while current < item_sets.len() {
        let mut transitions = Map::default();
        for &symbol in &symbols {
            let next = goto(g, &item_sets[current], symbol);
            if next.is_empty() {
                continue;
            }
            let next_id = match known.get(&next) {
                Some(id) => *id,
                None => {
                    let id = StateID(item_sets.len() as u16);
                    known.insert(next.clone(), id);
                    item_sets.push(next);
                    id
                }
            };
            transitions.insert(symbol, next_id);
        }
        edges.push(transitions);
        current += 1;
    }

    let states = item_sets
        .into_iter()
        .zip(edges)
        .map(|(items, transitions)| {
            let mut shifts = Map::default();
            let mut gotos = Map::default();
            for (symbol, next) in transitions {
                match symbol {
                    SymbolID::T(t) => {
                        shifts.insert(t, next);
                    }
                    SymbolID::N(n) => {
                        gotos.insert(n, next);
                    }
                }
            }
            LR0State {
                items,
                shifts,
                gotos,
            }
        })
        .collect();

    LR0Automaton { states }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toy;

    #[test]
    fn start_state_is_closed() {
        let g = toy::grammar().unwrap();
        let automaton = lr0(&g);
        let start = automaton.state(StateID::START);

        // [S' -> . program], [program -> . compoundstmt], [compoundstmt -> . { stmts }]
        assert_eq!(start.items.len(), 3);
        assert!(start.items.iter().all(|item| item.dot == 0));
        let lbrace = g.terminal_by_name("{").unwrap();
        assert_eq!(start.shifts.len(), 1);
        assert!(start.shifts.contains_key(&lbrace));
    }

    #[test]
    fn item_sets_compare_as_sets() {
        let g = toy::grammar().unwrap();
        let items: Vec<_> = g
            .productions()
            .map(|p| LR0Item {
                production: p.id(),
                dot: 0,
            })
            .collect();
        let forward: ItemSet = items.iter().copied().collect();
        let backward: ItemSet = items.iter().rev().copied().collect();
        assert_eq!(forward, backward);
        assert_eq!(closure(&g, &forward), forward);
    }

    #[test]
    fn goto_moves_the_dot() {
        let g = toy::grammar().unwrap();
        let automaton = lr0(&g);
        let lbrace = g.terminal_by_name("{").unwrap();
        let after_lbrace = goto(&g, &automaton.state(StateID::START).items, SymbolID::T(lbrace));

        // the kernel plus the closure over `stmts` and `stmt`.
        let kernel = after_lbrace.iter().filter(|item| item.dot > 0).count();
        assert_eq!(kernel, 1);
        assert!(after_lbrace.iter().any(|item| item.is_complete(&g)));

        let target = automaton.state(StateID::START).shifts[&lbrace];
        assert_eq!(automaton.state(target).items, after_lbrace);
    }

    #[test]
    fn construction_is_deterministic() {
        let g = toy::grammar().unwrap();
        let a1 = lr0(&g);
        let a2 = lr0(&g);
        assert_eq!(a1.len(), a2.len());
        for ((_, s1), (_, s2)) in a1.states().zip(a2.states()) {
            assert_eq!(s1.items, s2.items);
            assert_eq!(s1.shifts, s2.shifts);
            assert_eq!(s1.gotos, s2.gotos);
        }
    }

    #[test]
    fn states_are_distinct() {
        let g = toy::grammar().unwrap();
        let automaton = lr0(&g);
        let distinct: BTreeSet<&ItemSet> = automaton.states.iter().map(|s| &s.items).collect();
        assert_eq!(distinct.len(), automaton.len());
    }
}
