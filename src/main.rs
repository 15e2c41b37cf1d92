//! hornlog - interactive Horn-clause resolver
//!
//! Command-line driver: consults program files, runs one-shot queries, and
//! provides the interactive prompt.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use hornlog::{
    parse_program, parse_statement, Config, LogLevel, ProofSystem, Prop, Solution, Statement,
};

#[derive(Parser)]
#[command(name = "hornlog")]
#[command(version)]
#[command(about = "Miniature Horn-clause logic programming engine", long_about = None)]
struct Cli {
    /// Program files to consult before the session
    #[arg(value_name = "FILE")]
    inputs: Vec<PathBuf>,

    /// Run a single query and exit (e.g. "mortal(X)")
    #[arg(long, value_name = "GOAL")]
    query: Option<String>,

    /// Enter the interactive prompt even after --query
    #[arg(short, long)]
    interactive: bool,

    /// Print solutions as JSON
    #[arg(long)]
    json: bool,

    /// Maximum solutions printed per query (0 = unlimited)
    #[arg(long, value_name = "N")]
    max_solutions: Option<usize>,

    /// Enable the unification occurs check
    #[arg(long)]
    occurs_check: bool,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose diagnostics
    #[arg(short, long)]
    verbose: bool,

    /// Suppress informational messages
    #[arg(short, long)]
    quiet: bool,
}

/// Per-session output settings derived from config and flags
struct Session {
    json: bool,
    max_solutions: usize,
    log_level: LogLevel,
    prompt: String,
}

impl Session {
    fn verbose(&self) -> bool {
        self.log_level == LogLevel::Verbose
    }

    fn quiet(&self) -> bool {
        self.log_level == LogLevel::Quiet
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)
            .map_err(|e| anyhow::anyhow!("failed to load config: {}", e))?,
        None => Config::load().map_err(|e| anyhow::anyhow!("failed to load config: {}", e))?,
    };

    // CLI flags override configuration
    if cli.occurs_check {
        config.resolver.occurs_check = true;
    }
    if let Some(max) = cli.max_solutions {
        config.repl.max_solutions = max;
    }
    if cli.verbose {
        config.general.log_level = LogLevel::Verbose;
    }
    if cli.quiet {
        config.general.log_level = LogLevel::Quiet;
    }

    let session = Session {
        json: cli.json,
        max_solutions: config.repl.max_solutions,
        log_level: config.general.log_level,
        prompt: config.repl.prompt.clone(),
    };

    let opts = config.resolve_options();
    let mut system = ProofSystem::with_options(opts);

    for path in &cli.inputs {
        system = consult(system, path, &session)?;
    }

    if let Some(goal_text) = &cli.query {
        run_goal(&system, goal_text, &session)?;
        if !cli.interactive {
            return Ok(());
        }
    }

    repl(system, &session)
}

/// Load a program file: assume its rules, run its queries.
fn consult(system: ProofSystem, path: &PathBuf, session: &Session) -> Result<ProofSystem> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read file: {}", path.display()))?;
    let statements = parse_program(&text)
        .map_err(|e| anyhow::anyhow!("parse error in {}: {}", path.display(), e))?;

    let mut system = system;
    let mut rules = 0usize;
    for statement in statements {
        match statement {
            Statement::Rule(rule) => {
                system = system
                    .assume(rule)
                    .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))?;
                rules += 1;
            }
            Statement::Query(goal) => {
                run_query(&system, &goal, session)?;
            }
        }
    }

    if session.verbose() {
        eprintln!("Consulted {}: {} rules", path.display(), rules);
    }
    Ok(system)
}

/// Run a `--query` goal given without the surrounding `?- ... .`
fn run_goal(system: &ProofSystem, goal_text: &str, session: &Session) -> Result<()> {
    let wrapped = format!("?- {} .", goal_text.trim().trim_end_matches('.'));
    let goal = match parse_statement(&wrapped) {
        Ok(Statement::Query(goal)) => goal,
        Ok(_) | Err(_) => anyhow::bail!("invalid goal: {}", goal_text),
    };
    run_query(system, &goal, session)
}

/// Enumerate and print the solutions of one query
fn run_query(system: &ProofSystem, goal: &Prop, session: &Session) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut printed = 0usize;
    let mut any = false;
    for solution in system.query(goal) {
        any = true;
        print_solution(&mut out, &solution, session)?;
        printed += 1;
        if session.max_solutions > 0 && printed >= session.max_solutions {
            if session.verbose() {
                eprintln!("(stopped after {} solutions)", printed);
            }
            break;
        }
    }

    if !any {
        writeln!(out, "false.").context("failed to write to stdout")?;
    }
    Ok(())
}

fn print_solution(out: &mut impl Write, solution: &Solution, session: &Session) -> Result<()> {
    if session.json {
        let line = serde_json::to_string(solution).context("failed to serialize solution")?;
        writeln!(out, "{}", line).context("failed to write to stdout")?;
    } else if solution.is_empty() {
        writeln!(out, "true.").context("failed to write to stdout")?;
    } else {
        writeln!(out, "{}.", solution).context("failed to write to stdout")?;
    }
    Ok(())
}

/// The interactive prompt: one statement per line.
///
/// Rules extend the system, queries print their solutions, `halt.` leaves.
fn repl(mut system: ProofSystem, session: &Session) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        if !session.quiet() {
            print!("{}", session.prompt);
            io::stdout().flush().context("failed to flush stdout")?;
        }

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("failed to read from stdin")?;
        let line = line.trim();

        if line.is_empty() {
            continue;
        }
        if line == "halt." {
            break;
        }

        match parse_statement(line) {
            Ok(Statement::Rule(rule)) => match system.assume(rule) {
                Ok(extended) => {
                    system = extended;
                    if !session.quiet() {
                        println!("accepted.");
                    }
                }
                Err(e) => println!("error: {}", e),
            },
            Ok(Statement::Query(goal)) => {
                run_query(&system, &goal, session)?;
            }
            Err(e) => println!("parse error: {}", e),
        }
    }

    Ok(())
}
