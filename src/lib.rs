//! hornlog - a miniature Horn-clause logic programming engine
//!
//! Given a knowledge base of Horn-clause rules and a goal, hornlog
//! enumerates every variable assignment under which the goal follows from
//! the rules, Prolog style: depth-first, left-to-right, rules in insertion
//! order, with cut.
//!
//! # Architecture
//!
//! - [`term`] - the recursive term model: variables, atoms, unary
//!   applications, cons cells
//! - [`prop`] - propositions, rules, and parsed statements
//! - [`env`] - the substitution environment: lookup, bind, walk, unify
//! - [`kb`] - the knowledge base: rules indexed by head predicate,
//!   insertion order preserved
//! - [`resolve`] - the lazy depth-first prover with cut, the query driver,
//!   and the [`ProofSystem`] facade
//! - [`parser`] - the Prolog-flavored surface syntax
//! - [`config`] / [`error`] - configuration and structured errors
//!
//! # Example
//!
//! ```rust,ignore
//! use hornlog::{parse_statement, ProofSystem, Statement};
//!
//! let mut system = ProofSystem::new();
//! for line in ["human(socrates).", "mortal(X) :- human(X)."] {
//!     match parse_statement(line)? {
//!         Statement::Rule(rule) => system = system.assume(rule)?,
//!         Statement::Query(_) => unreachable!(),
//!     }
//! }
//!
//! if let Statement::Query(goal) = parse_statement("?- mortal(X).")? {
//!     for solution in system.query(&goal) {
//!         println!("{}", solution); // X = socrates
//!     }
//! }
//! ```

pub mod config;
pub mod env;
pub mod error;
pub mod kb;
pub mod parser;
pub mod prop;
pub mod resolve;
pub mod term;

// Re-export configuration types
pub use config::{Config, GeneralConfig, LogLevel, ReplConfig, ResolverConfig};

// Re-export error types
pub use error::{ErrorCode, ErrorContext, HornError, HornResult};

// Re-export the core model
pub use env::Env;
pub use kb::KnowledgeBase;
pub use prop::{AtomicProp, Prop, Rule, Statement};
pub use term::{fresh_id, Atom, Term, Variable, SENTINEL_ID};

// Re-export the prover and query driver
pub use resolve::query::{query, Binding, ProofSystem, Solution, Solutions};
pub use resolve::{prove, ProofStep, ResolveOptions};

// Re-export parser entry points
pub use parser::{parse_program, parse_statement, ParseError};
