//! Depth-first proof search with cut
//!
//! The prover enumerates proofs lazily: each pull from the iterator runs the
//! search just far enough to reach the next success, so the consumer drives
//! enumeration one solution at a time and can stop early at no cost. The
//! iterator structs are the explicit continuation frames of the search:
//! [`RuleChoices`] holds "next candidate rule for this goal", [`ConjChoices`]
//! holds "right conjunct still to prove under the left conjunct's bindings".
//!
//! Cut is a control signal threaded through [`ProofStep`]: proving `!` yields
//! its environment once with the flag set; conjunctions OR the flags of their
//! halves; and the rule boundary masks the flag while committing to the
//! current choice point, so a cut never prunes alternatives outside the rule
//! body it appears in.

pub mod query;

use crate::env::Env;
use crate::kb::KnowledgeBase;
use crate::prop::{AtomicProp, Prop};

/// Predicate names with built-in semantics, dispatched before the knowledge
/// base so user rules cannot override them.
const CUT: &str = "!";
const TRUE: &str = "true";

/// Options governing a proof search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Reject binds that would construct a cyclic term. Off by default.
    pub occurs_check: bool,
}

/// One success of the prover: the extended environment plus the cut signal.
///
/// `cut` is a property of how this result was produced, not of the bindings:
/// it tells the enclosing choice point to stop enumerating alternatives.
#[derive(Clone, Debug)]
pub struct ProofStep {
    pub env: Env,
    pub cut: bool,
}

/// A lazy stream of proof results.
pub type ProofIter<'kb> = Box<dyn Iterator<Item = ProofStep> + 'kb>;

/// Lazily prove `goal` under `env` against `kb`.
pub fn prove<'kb>(
    goal: &Prop,
    env: Env,
    kb: &'kb KnowledgeBase,
    opts: ResolveOptions,
) -> ProofIter<'kb> {
    prove_prop(goal.clone(), env, kb, opts)
}

pub(crate) fn prove_prop<'kb>(
    goal: Prop,
    env: Env,
    kb: &'kb KnowledgeBase,
    opts: ResolveOptions,
) -> ProofIter<'kb> {
    match goal {
        Prop::Atomic(p) => prove_atomic(p, env, kb, opts),
        Prop::Conj(left, right) => Box::new(ConjChoices {
            left: prove_prop(*left, env, kb, opts),
            right: *right,
            kb,
            opts,
            current: None,
        }),
    }
}

fn prove_atomic<'kb>(
    goal: AtomicProp,
    env: Env,
    kb: &'kb KnowledgeBase,
    opts: ResolveOptions,
) -> ProofIter<'kb> {
    if goal.term.is_nil() {
        match goal.pred.name() {
            CUT => return Box::new(std::iter::once(ProofStep { env, cut: true })),
            TRUE => return Box::new(std::iter::once(ProofStep { env, cut: false })),
            _ => {}
        }
    }
    Box::new(RuleChoices {
        goal,
        env,
        kb,
        opts,
        next_rule: 0,
        body: None,
        done: false,
    })
}

/// Choice point over the candidate rules for one atomic goal.
///
/// Rules are tried in insertion order; each candidate is renamed to a fresh
/// instantiation before its head is unified with the goal. A cut inside a
/// candidate's body ends the whole choice point, and its flag is masked on
/// the way out.
struct RuleChoices<'kb> {
    goal: AtomicProp,
    env: Env,
    kb: &'kb KnowledgeBase,
    opts: ResolveOptions,
    /// Index of the next untried rule
    next_rule: usize,
    /// Proof of the current candidate's body, if it has one
    body: Option<ProofIter<'kb>>,
    done: bool,
}

impl Iterator for RuleChoices<'_> {
    type Item = ProofStep;

    fn next(&mut self) -> Option<ProofStep> {
        loop {
            if self.done {
                return None;
            }

            // Drain the current candidate's body first
            if let Some(body) = &mut self.body {
                match body.next() {
                    Some(step) => {
                        if step.cut {
                            // Commit: no more body results, no more rules
                            self.done = true;
                            self.body = None;
                        }
                        return Some(ProofStep {
                            env: step.env,
                            cut: false,
                        });
                    }
                    None => self.body = None,
                }
                continue;
            }

            let rules = self.kb.rules(self.goal.pred.name());
            loop {
                let Some(rule) = rules.get(self.next_rule) else {
                    self.done = true;
                    return None;
                };
                self.next_rule += 1;

                let candidate = rule.refresh();
                let Some(env) =
                    self.env
                        .unify_with(&self.goal.term, &candidate.head.term, self.opts.occurs_check)
                else {
                    continue;
                };

                match candidate.goal {
                    None => {
                        return Some(ProofStep { env, cut: false });
                    }
                    Some(body) => {
                        self.body = Some(prove_prop(body, env, self.kb, self.opts));
                        break;
                    }
                }
            }
        }
    }
}

/// Conjunction frame: for each proof of the left conjunct, prove the right
/// conjunct under the resulting bindings. The cut flags of both halves are
/// ORed so a cut anywhere in the conjunction reaches the rule boundary.
struct ConjChoices<'kb> {
    left: ProofIter<'kb>,
    right: Prop,
    kb: &'kb KnowledgeBase,
    opts: ResolveOptions,
    /// Left conjunct's cut flag and the in-progress right-conjunct proof
    current: Option<(bool, ProofIter<'kb>)>,
}

impl Iterator for ConjChoices<'_> {
    type Item = ProofStep;

    fn next(&mut self) -> Option<ProofStep> {
        loop {
            if let Some((left_cut, right)) = &mut self.current {
                if let Some(step) = right.next() {
                    return Some(ProofStep {
                        env: step.env,
                        cut: *left_cut || step.cut,
                    });
                }
                self.current = None;
            }

            let step = self.left.next()?;
            self.current = Some((
                step.cut,
                prove_prop(self.right.clone(), step.env, self.kb, self.opts),
            ));
        }
    }
}
