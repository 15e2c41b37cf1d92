//! Query driver and the proof-system facade
//!
//! The driver renames the query to a fresh instantiation, proves it, and
//! projects each resulting environment onto the query's variables in
//! first-occurrence order. Variable names in solutions are the original
//! source names, never renamed ids.

use std::fmt;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::env::Env;
use crate::error::{HornError, HornResult};
use crate::kb::KnowledgeBase;
use crate::prop::{Prop, Rule};
use crate::resolve::{prove_prop, ProofIter, ResolveOptions};
use crate::term::{Term, Variable};

/// The value reported for one query variable in a solution.
#[derive(Clone, Debug, PartialEq)]
pub struct Binding {
    /// The variable's source-level name
    pub name: String,
    /// The bound term, or `None` when the variable is unbound
    pub term: Option<Term>,
}

impl Serialize for Binding {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("name", &self.name)?;
        match &self.term {
            Some(term) => map.serialize_entry("term", &term.to_string())?,
            None => map.serialize_entry("unbound", &true)?,
        }
        map.end()
    }
}

/// One proof of a query: bindings for its variables in first-occurrence
/// order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Solution {
    pub bindings: Vec<Binding>,
}

impl Solution {
    /// Check whether the query had no variables to report
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Look up a binding by variable name
    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.bindings.iter().find(|b| b.name == name)
    }
}

impl Serialize for Solution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.bindings.len()))?;
        for binding in &self.bindings {
            seq.serialize_element(binding)?;
        }
        seq.end()
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.bindings.is_empty() {
            return write!(f, "true");
        }
        for (i, binding) in self.bindings.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match &binding.term {
                Some(term) => write!(f, "{} = {}", binding.name, term)?,
                None => write!(f, "{} = _", binding.name)?,
            }
        }
        Ok(())
    }
}

/// Lazy stream of solutions for one query.
///
/// A cut that reaches the top level commits the whole query: the stream
/// yields that solution and then ends.
pub struct Solutions<'kb> {
    vars: Vec<Variable>,
    steps: ProofIter<'kb>,
    stopped: bool,
}

impl Iterator for Solutions<'_> {
    type Item = Solution;

    fn next(&mut self) -> Option<Solution> {
        if self.stopped {
            return None;
        }
        let step = self.steps.next()?;
        if step.cut {
            self.stopped = true;
        }
        Some(project(&self.vars, &step.env))
    }
}

/// Run a query against a knowledge base.
///
/// The query is renamed to a fresh instantiation first, so its variables
/// never collide with rule variables; solutions report the original names.
pub fn query<'kb>(
    goal: &Prop,
    env: Env,
    kb: &'kb KnowledgeBase,
    opts: ResolveOptions,
) -> Solutions<'kb> {
    let renamed = goal.refresh();

    let mut vars: Vec<Variable> = Vec::new();
    for v in renamed.vars() {
        if !vars.contains(&v) {
            vars.push(v);
        }
    }

    let steps = prove_prop(renamed, env, kb, opts);
    Solutions {
        vars,
        steps,
        stopped: false,
    }
}

fn project(vars: &[Variable], env: &Env) -> Solution {
    let bindings = vars
        .iter()
        .map(|v| {
            let walked = env.substitute(&Term::Var(v.clone()));
            Binding {
                name: v.name().to_string(),
                // After a full walk, any remaining variable is unbound
                term: match walked {
                    Term::Var(_) => None,
                    term => Some(term),
                },
            }
        })
        .collect();
    Solution { bindings }
}

/// The proof system consumed by the REPL driver: an assumable knowledge
/// base plus query execution.
///
/// Value-semantic: `assume` returns an extended system and leaves the
/// receiver untouched, so an in-flight query can never observe a mutation.
#[derive(Clone, Debug, Default)]
pub struct ProofSystem {
    kb: KnowledgeBase,
    opts: ResolveOptions,
}

impl ProofSystem {
    /// An empty proof system with default options
    pub fn new() -> Self {
        ProofSystem::default()
    }

    /// An empty proof system with explicit resolve options
    pub fn with_options(opts: ResolveOptions) -> Self {
        ProofSystem {
            kb: KnowledgeBase::empty(),
            opts,
        }
    }

    /// The underlying knowledge base
    pub fn kb(&self) -> &KnowledgeBase {
        &self.kb
    }

    /// The active resolve options
    pub fn options(&self) -> ResolveOptions {
        self.opts
    }

    /// Return a system extended with `rule`.
    ///
    /// Rejects rules whose head predicate name is empty.
    pub fn assume(&self, rule: Rule) -> HornResult<ProofSystem> {
        if rule.head.pred.name().is_empty() {
            return Err(HornError::empty_predicate());
        }
        Ok(ProofSystem {
            kb: self.kb.assume(rule),
            opts: self.opts,
        })
    }

    /// Enumerate the solutions of `goal` lazily
    pub fn query(&self, goal: &Prop) -> Solutions<'_> {
        query(goal, Env::empty(), &self.kb, self.opts)
    }
}
