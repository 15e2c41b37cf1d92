//! Substitution environments and unification
//!
//! An `Env` is a partial mapping from variables to terms. It is persistent:
//! `bind` returns an extended environment and leaves the receiver untouched,
//! so the prover can abandon an extension on backtracking and resume from an
//! earlier value. Environments never shrink during a proof.

use fnv::FnvHashMap;

use crate::term::{Term, Variable};

/// A substitution: a persistent mapping from variables to terms.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Env {
    bindings: FnvHashMap<Variable, Term>,
}

impl Env {
    /// The empty substitution
    pub fn empty() -> Self {
        Env::default()
    }

    /// Number of bound variables
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Check if no variable is bound
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Direct lookup by name and id. Does not walk binding chains.
    pub fn try_find(&self, var: &Variable) -> Option<&Term> {
        self.bindings.get(var)
    }

    /// Extend with `var ↦ t`, where `t` is first fully dereferenced.
    ///
    /// Precondition: `var` is unbound. If dereferencing `t` yields `var`
    /// itself the environment is returned unchanged; this no-self-binding
    /// guard is what keeps `substitute` terminating on variable chains.
    pub fn bind(&self, var: &Variable, t: &Term) -> Env {
        let walked = self.substitute(t);
        if let Term::Var(w) = &walked {
            if w == var {
                return self.clone();
            }
        }
        let mut bindings = self.bindings.clone();
        bindings.insert(var.clone(), walked);
        Env { bindings }
    }

    /// Fully dereference `t`: every bound variable is replaced by the
    /// dereferenced form of its binding, recursively through applications
    /// and cons cells. Unbound variables are left in place.
    pub fn substitute(&self, t: &Term) -> Term {
        match t {
            Term::Var(v) => match self.bindings.get(v) {
                Some(bound) => self.substitute(bound),
                None => t.clone(),
            },
            Term::Atom(_) => t.clone(),
            Term::App(functor, arg) => {
                Term::App(functor.clone(), Box::new(self.substitute(arg)))
            }
            Term::Cons(head, tail) => Term::Cons(
                Box::new(self.substitute(head)),
                Box::new(self.substitute(tail)),
            ),
        }
    }

    /// Unify `a` and `b`, returning the extended environment on success.
    ///
    /// Failure returns `None` and leaves the receiver untouched; unification
    /// is steadfast.
    pub fn unify(&self, a: &Term, b: &Term) -> Option<Env> {
        self.unify_with(a, b, false)
    }

    /// Unify with an optional occurs check. When enabled, a bind whose
    /// dereferenced right-hand side contains the variable fails instead of
    /// constructing a cyclic term.
    ///
    /// The variable cases come first so that bound variables walk
    /// transparently before any constant comparison.
    pub fn unify_with(&self, a: &Term, b: &Term, occurs_check: bool) -> Option<Env> {
        match (a, b) {
            (Term::Var(v), _) => {
                if let Some(bound) = self.try_find(v) {
                    let walked = self.substitute(bound);
                    self.unify_with(b, &walked, occurs_check)
                } else {
                    if occurs_check {
                        let walked = self.substitute(b);
                        let is_self = matches!(&walked, Term::Var(w) if w == v);
                        if !is_self && walked.contains_var(v) {
                            return None;
                        }
                    }
                    Some(self.bind(v, b))
                }
            }
            (_, Term::Var(_)) => self.unify_with(b, a, occurs_check),
            (Term::Atom(x), Term::Atom(y)) => {
                if x == y {
                    Some(self.clone())
                } else {
                    None
                }
            }
            (Term::App(f, x), Term::App(g, y)) => {
                if f == g {
                    self.unify_with(x, y, occurs_check)
                } else {
                    None
                }
            }
            (Term::Cons(h1, t1), Term::Cons(h2, t2)) => {
                let env = self.unify_with(h1, h2, occurs_check)?;
                env.unify_with(t1, t2, occurs_check)
            }
            _ => None,
        }
    }
}
