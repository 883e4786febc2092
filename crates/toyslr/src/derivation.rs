//! Rightmost derivation rebuilt from a reduction log.

use crate::grammar::{Grammar, ProductionID, SymbolID};
use std::fmt;

/// The sequence of sentential forms from the start symbol down to the
/// accepted terminal string.
///
/// A shift-reduce parser discovers a rightmost derivation in reverse, so the
/// forms are obtained by replaying the reductions from last to first and
/// expanding the rightmost occurrence of each left-hand side.
#[derive(Debug, Clone)]
pub struct Derivation<'g> {
    grammar: &'g Grammar,
    forms: Vec<Vec<SymbolID>>,
}

impl<'g> Derivation<'g> {
    /// Replay `reductions`, given in the order the parser performed them.
    pub fn from_reductions(grammar: &'g Grammar, reductions: &[ProductionID]) -> Self {
        let mut form = vec![SymbolID::N(grammar.start_symbol)];
        let mut forms = vec![form.clone()];

        for &id in reductions.iter().rev() {
            let production = grammar.production(id);
            let left = SymbolID::N(production.left());
            let Some(pos) = form.iter().rposition(|symbol| *symbol == left) else {
                tracing::trace!(
                    "no occurrence of {} left to expand; skipping {}",
                    grammar.symbol_name(left),
                    production.display(grammar)
                );
                continue;
            };
            form.splice(pos..=pos, production.right().iter().copied());
            forms.push(form.clone());
        }

        Self { grammar, forms }
    }

    /// All sentential forms, starting with the start symbol.
    pub fn forms(&self) -> &[Vec<SymbolID>] {
        &self.forms[..]
    }

    /// The last sentential form. For an accepted parse this is the input.
    pub fn last(&self) -> &[SymbolID] {
        match self.forms.last() {
            Some(form) => form,
            None => &[],
        }
    }

    /// Number of rewriting steps.
    pub fn steps(&self) -> usize {
        self.forms.len() - 1
    }
}

impl fmt::Display for Derivation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, form) in self.forms.iter().enumerate() {
            if i > 0 {
                f.write_str(" =>\n")?;
            }
            if form.is_empty() {
                f.write_str("ε")?;
                continue;
            }
            for (j, symbol) in form.iter().enumerate() {
                if j > 0 {
                    f.write_str(" ")?;
                }
                f.write_str(self.grammar.symbol_name(*symbol))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{grammar::TerminalID, toy};

    fn ids(g: &Grammar, indices: &[usize]) -> Vec<ProductionID> {
        let all: Vec<_> = g.productions().map(|p| p.id()).collect();
        indices.iter().map(|i| all[*i]).collect()
    }

    fn names(g: &Grammar, form: &[SymbolID]) -> Vec<String> {
        form.iter().map(|s| g.symbol_name(*s).to_owned()).collect()
    }

    #[test]
    fn empty_block() {
        let g = toy::grammar().unwrap();
        // stmts -> ε, compoundstmt -> { stmts }, program -> compoundstmt
        let derivation = Derivation::from_reductions(&g, &ids(&g, &[8, 6, 1]));
        assert_eq!(derivation.steps(), 3);
        assert_eq!(
            derivation.to_string(),
            "program =>\ncompoundstmt =>\n{ stmts } =>\n{ }"
        );
        assert!(derivation.last().iter().all(SymbolID::is_terminal));
    }

    #[test]
    fn expands_the_rightmost_occurrence() {
        let g = toy::grammar().unwrap();
        // { ID = NUM ; ID = NUM ; }, in the order an LR parser reduces it.
        let assignment = [27, 25, 22, 21, 18, 11, 4];
        let mut order = vec![];
        order.extend_from_slice(&assignment);
        order.extend_from_slice(&assignment);
        order.extend_from_slice(&[8, 7, 7, 6, 1]);
        let derivation = Derivation::from_reductions(&g, &ids(&g, &order));

        assert_eq!(derivation.steps(), order.len());
        assert_eq!(
            names(&g, derivation.last()),
            ["{", "ID", "=", "NUM", ";", "ID", "=", "NUM", ";", "}"]
        );

        // after `stmts -> stmt stmts` twice and `stmts -> ε`, the second
        // statement is expanded before the first one.
        assert_eq!(
            names(&g, &derivation.forms()[7]),
            ["{", "stmt", "ID", "=", "arithexpr", ";", "}"]
        );
    }

    #[test]
    fn unmatched_steps_are_skipped() {
        let g = toy::grammar().unwrap();
        // `simpleexpr -> NUM` has nothing to expand in `program`.
        let derivation = Derivation::from_reductions(&g, &ids(&g, &[27, 1]));
        assert_eq!(derivation.steps(), 1);
        assert_eq!(names(&g, derivation.last()), ["compoundstmt"]);
        assert!(!derivation.last().contains(&SymbolID::T(TerminalID::EOI)));
    }
}
