use anyhow::Context as _;
use clap::{Parser, ValueEnum};
use std::{
    fs,
    io::{self, Read as _},
    path::PathBuf,
    process::ExitCode,
    time::Instant,
};
use toyslr::{Engine, EngineConfig, Outcome};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The program to parse, written as whitespace separated tokens.
    /// Reads from stdin when omitted.
    input: Option<PathBuf>,

    /// The maximum number of parser steps.
    #[arg(long, default_value_t = toyslr::config::DEFAULT_MAX_STEPS)]
    max_steps: usize,

    /// Do not insert a missing `;` during error recovery.
    #[arg(long)]
    no_semicolon_repair: bool,

    /// Print an intermediate artifact instead of parsing.
    #[arg(long, value_enum)]
    dump: Option<Dump>,

    /// Do not print the derivation of an accepted program.
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, ValueEnum)]
enum Dump {
    Grammar,
    Sets,
    Automaton,
    Table,
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    tracing::debug!("parsed CLI args = {:?}", args);

    let mut config = EngineConfig::new();
    config
        .max_steps(args.max_steps)
        .semicolon_repair(!args.no_semicolon_repair);
    let engine = Engine::with_config(config).context("failed to construct the parser")?;

    if let Some(dump) = args.dump {
        let g = engine.grammar();
        match dump {
            Dump::Grammar => print!("{}", g),
            Dump::Sets => {
                print!("{}", engine.first_sets().display(g));
                println!();
                print!("{}", engine.follow_sets().display(g));
            }
            Dump::Automaton => print!("{}", engine.automaton().display(g)),
            Dump::Table => print!("{}", engine.table().display(g)),
        }
        return Ok(ExitCode::SUCCESS);
    }

    let source = match &args.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| anyhow::anyhow!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    let s = Instant::now();
    let report = engine.parse_str(&source);
    tracing::info!("parse: {:?} elapsed", s.elapsed());

    for diagnostic in report.diagnostics() {
        println!("{}", diagnostic);
    }

    match report.outcome() {
        Outcome::Accepted => (),
        Outcome::InputExhausted => println!("[error] unexpected end of input"),
        Outcome::StepLimitExceeded => println!(
            "[error] gave up after {} steps",
            engine.config().get_max_steps()
        ),
        Outcome::MissingGoto { state, nonterminal } => println!(
            "[error] no goto entry for {} in state {}",
            engine.grammar().nonterminals[&nonterminal],
            state
        ),
        Outcome::StackUnderflow => println!("[error] the parser stack was exhausted"),
    }

    if !report.is_success() {
        if let Some(line) = report.error_line() {
            println!(
                "[error] {} syntax error(s), the first one on line {}",
                report.error_count(),
                line
            );
        }
        return Ok(ExitCode::FAILURE);
    }

    if !args.quiet {
        println!("{}", report.derivation());
    }

    Ok(ExitCode::SUCCESS)
}
