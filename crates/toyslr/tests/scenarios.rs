use toyslr::{grammar::SymbolID, Diagnostic, Engine, EngineConfig, Outcome, ParseReport};
use tracing_subscriber::EnvFilter;

fn engine() -> Engine {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
    Engine::new().unwrap()
}

fn count(report: &ParseReport<'_>, production: &str) -> usize {
    report
        .productions()
        .iter()
        .filter(|p| *p == production)
        .count()
}

fn assert_round_trip(engine: &Engine, source: &str) {
    let tokens = engine.tokenize(source);
    let report = engine.parse(&tokens);
    assert!(report.is_success(), "{:?}", report.diagnostics());

    let expected: Vec<SymbolID> = tokens.iter().map(|t| SymbolID::T(t.terminal)).collect();
    assert_eq!(report.derivation().last(), &expected[..]);
}

#[test]
fn empty_block() {
    let engine = engine();
    let report = engine.parse_str("{ }");
    assert!(report.is_success());
    assert_eq!(report.outcome(), Outcome::Accepted);
    assert_eq!(
        report.productions(),
        ["program -> compoundstmt", "compoundstmt -> { stmts }", "stmts -> ε"]
    );
    assert_eq!(
        report.derivation().to_string(),
        "program =>\ncompoundstmt =>\n{ stmts } =>\n{ }"
    );
}

#[test]
fn missing_semicolon_before_closing_brace() {
    let engine = engine();
    let report = engine.parse_str("{ ID = NUM }");
    assert!(!report.is_success());
    assert_eq!(report.outcome(), Outcome::Accepted);
    assert_eq!(
        report.diagnostics(),
        [Diagnostic::MissingSemicolon { line: 1 }]
    );
    assert_eq!(
        report.diagnostics()[0].to_string(),
        "syntax error, line 1, missing \";\""
    );
    assert_eq!(report.error_line(), Some(1));
}

#[test]
fn missing_semicolon_is_reported_on_the_previous_line() {
    let engine = engine();
    let report = engine.parse_str("{\n  ID = NUM\n  ID = ID + NUM ;\n}\n");
    assert_eq!(
        report.diagnostics(),
        [Diagnostic::MissingSemicolon { line: 2 }]
    );
    assert_eq!(report.error_count(), 1);
}

#[test]
fn if_then_else() {
    let engine = engine();
    let report = engine.parse_str("{ if ( ID < NUM ) then ID = NUM ; else ID = NUM ; }");
    assert!(report.is_success());
    assert_eq!(
        count(&report, "ifstmt -> if ( boolexpr ) then stmt else stmt"),
        1
    );
    assert_eq!(count(&report, "boolop -> <"), 1);
}

#[test]
fn two_assignments() {
    let engine = engine();
    let report = engine.parse_str("{ ID = NUM ; ID = NUM ; }");
    assert!(report.is_success());
    assert_eq!(count(&report, "assgstmt -> ID = arithexpr ;"), 2);
    assert_eq!(count(&report, "stmts -> stmt stmts"), 2);
    assert_eq!(count(&report, "stmts -> ε"), 1);

    // 7 reductions per assignment, 3 for the statement list, and the block.
    assert_eq!(report.reductions().len(), 19);
    assert_eq!(report.derivation().steps(), 19);
}

#[test]
fn leading_close_paren() {
    let engine = engine();
    let report = engine.parse_str(") { }");
    assert!(!report.is_success());
    match &report.diagnostics()[0] {
        Diagnostic::Unexpected {
            line,
            found,
            expected,
        } => {
            assert_eq!(*line, 1);
            assert_eq!(found, ")");
            assert!(expected.iter().any(|t| t == "{"));
        }
        d => panic!("unexpected diagnostic: {:?}", d),
    }
    assert_eq!(
        report.diagnostics()[0].to_string(),
        "syntax error, line 1, expected \"{\""
    );
}

#[test]
fn empty_input_is_rejected() {
    let engine = engine();
    let report = engine.parse(&[]);
    assert!(!report.is_success());
    assert_eq!(report.outcome(), Outcome::InputExhausted);
    assert_eq!(report.error_line(), Some(1));
    assert!(report.steps() < engine.config().get_max_steps());
}

#[test]
fn garbage_never_hits_the_step_ceiling() {
    let engine = engine();
    let source = "} ; ) else = = NUM then\n".repeat(50);
    let report = engine.parse_str(&source);
    assert!(!report.is_success());
    assert_ne!(report.outcome(), Outcome::StepLimitExceeded);
}

#[test]
fn small_step_ceiling() {
    let mut config = EngineConfig::new();
    config.max_steps(10);
    let engine = Engine::with_config(config).unwrap();
    let report = engine.parse_str("{ ID = NUM ; ID = NUM ; }");
    assert_eq!(report.outcome(), Outcome::StepLimitExceeded);
    assert!(!report.is_success());
    assert!(!report.has_error());
}

#[test]
fn parsing_is_idempotent() {
    let engine = engine();
    let source = "{ while ( ID >= NUM ) { ID = ID - NUM ; } ID = NUM }";
    let r1 = engine.parse_str(source);
    let r2 = engine.parse_str(source);
    assert_eq!(r1.outcome(), r2.outcome());
    assert_eq!(r1.diagnostics(), r2.diagnostics());
    assert_eq!(r1.reductions(), r2.reductions());
}

#[test]
fn construction_is_deterministic() {
    let e1 = engine();
    let e2 = engine();
    assert_eq!(e1.automaton().len(), e2.automaton().len());
    assert_eq!(
        e1.table().display(e1.grammar()).to_string(),
        e2.table().display(e2.grammar()).to_string()
    );
}

#[test]
fn derivation_reproduces_the_input() {
    let engine = engine();
    assert_round_trip(&engine, "{ }");
    assert_round_trip(&engine, "{ ID = ( ID + NUM ) * NUM / ID - NUM ; }");
    assert_round_trip(
        &engine,
        "{\n  while ( ID <= NUM ) {\n    if ( ID == NUM ) then { } else ID = NUM ;\n  }\n}",
    );
    assert_round_trip(&engine, "{ { { } } ID = NUM ; }");
}

#[test]
fn engine_is_shared_between_threads() {
    let engine = engine();
    let sources = ["{ }", "{ ID = NUM ; }", "{ ID = NUM }", ") { }"];
    let expected: Vec<bool> = sources
        .iter()
        .map(|s| engine.parse_str(s).is_success())
        .collect();

    let results: Vec<bool> = std::thread::scope(|scope| {
        let handles: Vec<_> = sources
            .iter()
            .map(|s| {
                let engine = &engine;
                scope.spawn(move || engine.parse_str(s).is_success())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(results, expected);
    assert_eq!(expected, [true, true, false, false]);
}
