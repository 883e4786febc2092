//! Calculation of First and Follow sets.

use crate::{
    grammar::{Grammar, NonterminalID, SymbolID, TerminalID},
    types::{display_fn, Map, Set},
};
use std::fmt;

/// `First(X)` for every grammar symbol, together with the nullable symbols
/// (those whose First set contains ε).
#[derive(Debug)]
pub struct FirstSets {
    nulls: Set<NonterminalID>,
    map: Map<SymbolID, Set<TerminalID>>,
}

impl FirstSets {
    pub fn new(grammar: &Grammar) -> Self {
        let nulls = nulls_set(grammar);

        // First(T) = {T}, First(N) = {} で初期化する
        let mut map: Map<SymbolID, Set<TerminalID>> = Map::default();
        for terminal in grammar.terminals() {
            map.insert(
                SymbolID::T(terminal.id()),
                Some(terminal.id()).into_iter().collect(),
            );
        }
        for nonterminal in grammar.nonterminals() {
            map.insert(SymbolID::N(nonterminal.id()), Set::default());
        }

        // For each production `X -> Y1 Y2 ... Yn`, let Yk be the first
        // non-nullable symbol. Then First(X) must include First(Yi) for every
        // i in 1..=k.
        struct Constraint {
            sup: SymbolID,
            sub: SymbolID,
        }
        let mut constraints = vec![];
        for production in grammar.productions() {
            let sup = SymbolID::N(production.left());
            for &symbol in production.right() {
                if symbol != sup {
                    constraints.push(Constraint { sup, sub: symbol });
                }
                if !is_nullable(&nulls, symbol) {
                    break;
                }
            }
        }

        // Propagate until no set grows. Sets only ever gain elements, so this
        // terminates.
        let mut changed = true;
        while changed {
            changed = false;
            for Constraint { sup, sub } in &constraints {
                let added: Vec<TerminalID> = map[sub]
                    .iter()
                    .filter(|t| !map[sup].contains(*t))
                    .copied()
                    .collect();
                if !added.is_empty() {
                    map[sup].extend(added);
                    changed = true;
                }
            }
        }

        Self { nulls, map }
    }

    /// The terminals of `First(symbol)`, without ε.
    pub fn get(&self, symbol: SymbolID) -> &Set<TerminalID> {
        &self.map[&symbol]
    }

    /// Whether `First(symbol)` contains ε.
    pub fn is_nullable(&self, symbol: SymbolID) -> bool {
        is_nullable(&self.nulls, symbol)
    }

    /// `First(symbols)` for a sequence of symbols. The returned flag reports
    /// whether the whole sequence can derive ε; the empty sequence does.
    pub fn of_sequence(&self, symbols: &[SymbolID]) -> (Set<TerminalID>, bool) {
        let mut res = Set::default();
        for &symbol in symbols {
            res.extend(self.map[&symbol].iter().copied());
            if !self.is_nullable(symbol) {
                return (res, false);
            }
        }
        (res, true)
    }

    pub fn display<'g>(&'g self, g: &'g Grammar) -> impl fmt::Display + 'g {
        display_fn(move |f| {
            for nonterminal in g.nonterminals() {
                let symbol = SymbolID::N(nonterminal.id());
                write!(f, "First({}) = {{", nonterminal)?;
                let mut sep = "";
                for t in &self.map[&symbol] {
                    write!(f, "{}{}", sep, g.terminals[t])?;
                    sep = ", ";
                }
                if self.is_nullable(symbol) {
                    write!(f, "{}ε", sep)?;
                }
                writeln!(f, "}}")?;
            }
            Ok(())
        })
    }
}

fn is_nullable(nulls: &Set<NonterminalID>, symbol: SymbolID) -> bool {
    matches!(symbol, SymbolID::N(n) if nulls.contains(&n))
}

/// Calculate the set of nullable symbols in this grammar.
fn nulls_set(grammar: &Grammar) -> Set<NonterminalID> {
    // ε-production を持つ記号は自明に nullable
    let mut nulls: Set<NonterminalID> = grammar
        .productions()
        .filter_map(|p| p.is_epsilon().then(|| p.left()))
        .collect();

    let mut changed = true;
    while changed {
        changed = false;
        for production in grammar.productions() {
            if nulls.contains(&production.left()) {
                continue;
            }
            let is_rhs_nullable = production
                .right()
                .iter()
                .all(|symbol| is_nullable(&nulls, *symbol));
            if is_rhs_nullable {
                changed = true;
                nulls.insert(production.left());
            }
        }
    }

    nulls
}

/// `Follow(N)` for every nonterminal symbol.
#[derive(Debug)]
pub struct FollowSets {
    map: Map<NonterminalID, Set<TerminalID>>,
}

impl FollowSets {
    pub fn new(grammar: &Grammar, first_sets: &FirstSets) -> Self {
        let mut map: Map<NonterminalID, Set<TerminalID>> = grammar
            .nonterminals()
            .map(|n| (n.id(), Set::default()))
            .collect();
        map[&NonterminalID::START].insert(TerminalID::EOI);

        // For each production `A -> alpha B beta`:
        //  - First(beta) \ {ε} ⊆ Follow(B)
        //  - Follow(A) ⊆ Follow(B) when beta is nullable (or empty)
        let mut changed = true;
        while changed {
            changed = false;
            for production in grammar.productions() {
                let right = production.right();
                for (i, symbol) in right.iter().enumerate() {
                    let b = match symbol {
                        SymbolID::N(b) => *b,
                        SymbolID::T(..) => continue,
                    };

                    let (mut added, beta_nullable) = first_sets.of_sequence(&right[i + 1..]);
                    if beta_nullable {
                        added.extend(map[&production.left()].iter().copied());
                    }

                    let follow_b = &mut map[&b];
                    for t in added {
                        changed |= follow_b.insert(t);
                    }
                }
            }
        }

        Self { map }
    }

    pub fn get(&self, nonterminal: NonterminalID) -> &Set<TerminalID> {
        &self.map[&nonterminal]
    }

    pub fn display<'g>(&'g self, g: &'g Grammar) -> impl fmt::Display + 'g {
        display_fn(move |f| {
            for (n, follow) in &self.map {
                write!(f, "Follow({}) = {{", g.nonterminals[n])?;
                for (i, t) in follow.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", g.terminals[t])?;
                }
                writeln!(f, "}}")?;
            }
            Ok(())
        })
    }
}
