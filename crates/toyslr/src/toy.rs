//! The fixed grammar of the toy imperative language.
//!
//! ```text
//! program        -> compoundstmt
//! stmt           -> ifstmt | whilestmt | assgstmt | compoundstmt
//! compoundstmt   -> { stmts }
//! stmts          -> stmt stmts | ε
//! ifstmt         -> if ( boolexpr ) then stmt else stmt
//! whilestmt      -> while ( boolexpr ) stmt
//! assgstmt       -> ID = arithexpr ;
//! boolexpr       -> arithexpr boolop arithexpr
//! boolop         -> < | > | <= | >= | ==
//! arithexpr      -> multexpr arithexprprime
//! arithexprprime -> + multexpr arithexprprime | - multexpr arithexprprime | ε
//! multexpr       -> simpleexpr multexprprime
//! multexprprime  -> * simpleexpr multexprprime | / simpleexpr multexprprime | ε
//! simpleexpr     -> ID | NUM | ( arithexpr )
//! ```

use crate::grammar::{Grammar, GrammarDefError, SymbolID::*};

/// Build the grammar of the toy language.
pub fn grammar() -> Result<Grammar, GrammarDefError> {
    Grammar::define(|g| {
        // declare terminal symbols.
        let lbrace = g.terminal("{")?;
        let rbrace = g.terminal("}")?;
        let if_ = g.terminal("if")?;
        let lparen = g.terminal("(")?;
        let rparen = g.terminal(")")?;
        let then = g.terminal("then")?;
        let else_ = g.terminal("else")?;
        let while_ = g.terminal("while")?;
        let ident = g.terminal("ID")?;
        let assign = g.terminal("=")?;
        let semicolon = g.terminal(";")?;
        let lt = g.terminal("<")?;
        let gt = g.terminal(">")?;
        let le = g.terminal("<=")?;
        let ge = g.terminal(">=")?;
        let eq = g.terminal("==")?;
        let plus = g.terminal("+")?;
        let minus = g.terminal("-")?;
        let star = g.terminal("*")?;
        let slash = g.terminal("/")?;
        let num = g.terminal("NUM")?;

        // declare nonterminal symbols.
        let program = g.nonterminal("program")?;
        let stmt = g.nonterminal("stmt")?;
        let compoundstmt = g.nonterminal("compoundstmt")?;
        let stmts = g.nonterminal("stmts")?;
        let ifstmt = g.nonterminal("ifstmt")?;
        let whilestmt = g.nonterminal("whilestmt")?;
        let assgstmt = g.nonterminal("assgstmt")?;
        let boolexpr = g.nonterminal("boolexpr")?;
        let boolop = g.nonterminal("boolop")?;
        let arithexpr = g.nonterminal("arithexpr")?;
        let arithexprprime = g.nonterminal("arithexprprime")?;
        let multexpr = g.nonterminal("multexpr")?;
        let multexprprime = g.nonterminal("multexprprime")?;
        let simpleexpr = g.nonterminal("simpleexpr")?;

        g.start_symbol(program)?;

        // declare syntax rules.
        g.production(program, [N(compoundstmt)])?;

        g.production(stmt, [N(ifstmt)])?;
        g.production(stmt, [N(whilestmt)])?;
        g.production(stmt, [N(assgstmt)])?;
        g.production(stmt, [N(compoundstmt)])?;

        g.production(compoundstmt, [T(lbrace), N(stmts), T(rbrace)])?;

        g.production(stmts, [N(stmt), N(stmts)])?;
        g.production(stmts, [])?;

        g.production(
            ifstmt,
            [
                T(if_),
                T(lparen),
                N(boolexpr),
                T(rparen),
                T(then),
                N(stmt),
                T(else_),
                N(stmt),
            ],
        )?;
        g.production(whilestmt, [T(while_), T(lparen), N(boolexpr), T(rparen), N(stmt)])?;
        g.production(assgstmt, [T(ident), T(assign), N(arithexpr), T(semicolon)])?;

        g.production(boolexpr, [N(arithexpr), N(boolop), N(arithexpr)])?;
        for op in [lt, gt, le, ge, eq] {
            g.production(boolop, [T(op)])?;
        }

        g.production(arithexpr, [N(multexpr), N(arithexprprime)])?;
        g.production(arithexprprime, [T(plus), N(multexpr), N(arithexprprime)])?;
        g.production(arithexprprime, [T(minus), N(multexpr), N(arithexprprime)])?;
        g.production(arithexprprime, [])?;

        g.production(multexpr, [N(simpleexpr), N(multexprprime)])?;
        g.production(multexprprime, [T(star), N(simpleexpr), N(multexprprime)])?;
        g.production(multexprprime, [T(slash), N(simpleexpr), N(multexprprime)])?;
        g.production(multexprprime, [])?;

        g.production(simpleexpr, [T(ident)])?;
        g.production(simpleexpr, [T(num)])?;
        g.production(simpleexpr, [T(lparen), N(arithexpr), T(rparen)])?;

        Ok(())
    })
}
