//! Term representations for the resolver
//!
//! This module defines the recursive data model the engine reasons over:
//! - Atoms (interned symbolic constants)
//! - Variables (name plus instantiation id)
//! - Unary applications of a functor atom to an argument term
//! - Cons cells, with the distinguished atom `nil` terminating lists

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

mod fresh;
mod variable;

pub use fresh::fresh_id;
pub use variable::{Variable, SENTINEL_ID};

/// Name of the atom terminating list terms.
const NIL: &str = "nil";

/// An interned symbolic constant. Two atoms are equal iff their names are.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Atom(Arc<str>);

impl Atom {
    /// Create an atom with the given name
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Atom(name.into())
    }

    /// The list-terminating atom `nil`
    pub fn nil() -> Self {
        Atom::new(NIL)
    }

    /// Get the atom's name
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Check whether this is the list terminator
    pub fn is_nil(&self) -> bool {
        &*self.0 == NIL
    }
}

impl Borrow<str> for Atom {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A term
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Term {
    /// A variable
    Var(Variable),
    /// A symbolic constant
    Atom(Atom),
    /// A unary application: functor atom applied to an argument term
    App(Atom, Box<Term>),
    /// A list cell
    Cons(Box<Term>, Box<Term>),
}

impl Term {
    /// Create a variable term
    pub fn var(name: impl Into<Arc<str>>, id: i64) -> Self {
        Term::Var(Variable::new(name, id))
    }

    /// Create an atom term
    pub fn atom(name: impl Into<Arc<str>>) -> Self {
        Term::Atom(Atom::new(name))
    }

    /// The empty list
    pub fn nil() -> Self {
        Term::Atom(Atom::nil())
    }

    /// Create an application term
    pub fn app(functor: impl Into<Arc<str>>, arg: Term) -> Self {
        Term::App(Atom::new(functor), Box::new(arg))
    }

    /// Create a cons cell
    pub fn cons(head: Term, tail: Term) -> Self {
        Term::Cons(Box::new(head), Box::new(tail))
    }

    /// Create a nil-terminated list from the given elements
    pub fn list(items: Vec<Term>) -> Self {
        let mut result = Term::nil();
        for item in items.into_iter().rev() {
            result = Term::cons(item, result);
        }
        result
    }

    /// Create a list with an explicit tail: `[h1, h2 | tail]`
    pub fn list_with_tail(heads: Vec<Term>, tail: Term) -> Self {
        let mut result = tail;
        for head in heads.into_iter().rev() {
            result = Term::cons(head, result);
        }
        result
    }

    /// Check if this term is a variable
    pub fn is_var(&self) -> bool {
        matches!(self, Term::Var(_))
    }

    /// Check if this term is the empty list
    pub fn is_nil(&self) -> bool {
        matches!(self, Term::Atom(a) if a.is_nil())
    }

    /// Check if this term is ground (contains no variables)
    pub fn is_ground(&self) -> bool {
        match self {
            Term::Var(_) => false,
            Term::Atom(_) => true,
            Term::App(_, arg) => arg.is_ground(),
            Term::Cons(head, tail) => head.is_ground() && tail.is_ground(),
        }
    }

    /// Variables in left-to-right occurrence order, duplicates included.
    ///
    /// Deduplication is the caller's responsibility.
    pub fn vars(&self) -> Vec<Variable> {
        let mut out = Vec::new();
        self.collect_vars(&mut out);
        out
    }

    pub(crate) fn collect_vars(&self, out: &mut Vec<Variable>) {
        match self {
            Term::Var(v) => out.push(v.clone()),
            Term::Atom(_) => {}
            Term::App(_, arg) => arg.collect_vars(out),
            Term::Cons(head, tail) => {
                head.collect_vars(out);
                tail.collect_vars(out);
            }
        }
    }

    /// Check if this term contains the given variable
    pub fn contains_var(&self, var: &Variable) -> bool {
        match self {
            Term::Var(v) => v == var,
            Term::Atom(_) => false,
            Term::App(_, arg) => arg.contains_var(var),
            Term::Cons(head, tail) => head.contains_var(var) || tail.contains_var(var),
        }
    }

    /// Structural copy with every variable re-tagged to `id`.
    ///
    /// Atoms and structure are unchanged; variables within one term stay
    /// coreferent because they all receive the same id.
    pub fn with_fresh_id(&self, id: i64) -> Term {
        match self {
            Term::Var(v) => Term::Var(v.with_id(id)),
            Term::Atom(_) => self.clone(),
            Term::App(f, arg) => Term::App(f.clone(), Box::new(arg.with_fresh_id(id))),
            Term::Cons(head, tail) => Term::Cons(
                Box::new(head.with_fresh_id(id)),
                Box::new(tail.with_fresh_id(id)),
            ),
        }
    }

    /// View this term as a proper (nil-terminated) list of elements.
    pub fn as_proper_list(&self) -> Option<Vec<&Term>> {
        let mut items = Vec::new();
        let mut cursor = self;
        loop {
            match cursor {
                Term::Cons(head, tail) => {
                    items.push(&**head);
                    cursor = tail;
                }
                _ if cursor.is_nil() => return Some(items),
                _ => return None,
            }
        }
    }
}

/// Format `name(arg)`, printing a proper-list argument of two or more
/// elements in the n-ary sugar `name(a, b)`.
pub(crate) fn fmt_application(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    arg: &Term,
) -> fmt::Result {
    match arg.as_proper_list() {
        Some(items) if items.len() >= 2 => {
            write!(f, "{}(", name)?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", item)?;
            }
            write!(f, ")")
        }
        _ => write!(f, "{}({})", name, arg),
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Var(v) => write!(f, "{}", v),
            Term::Atom(a) if a.is_nil() => write!(f, "[]"),
            Term::Atom(a) => write!(f, "{}", a),
            Term::App(functor, arg) => fmt_application(f, functor.name(), arg),
            Term::Cons(head, tail) => {
                write!(f, "[{}", head)?;
                let mut cursor: &Term = tail;
                loop {
                    match cursor {
                        Term::Cons(h, t) => {
                            write!(f, ", {}", h)?;
                            cursor = t;
                        }
                        _ if cursor.is_nil() => break,
                        other => {
                            write!(f, "|{}", other)?;
                            break;
                        }
                    }
                }
                write!(f, "]")
            }
        }
    }
}

impl fmt::Debug for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Var(v) => write!(f, "{:?}", v),
            Term::Atom(a) => write!(f, "{}", a),
            Term::App(functor, arg) => write!(f, "{}({:?})", functor, arg),
            Term::Cons(head, tail) => write!(f, "[{:?}|{:?}]", head, tail),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atom_equality() {
        assert_eq!(Atom::new("socrates"), Atom::new("socrates"));
        assert_ne!(Atom::new("socrates"), Atom::new("plato"));
        assert!(Atom::nil().is_nil());
    }

    #[test]
    fn test_list_construction() {
        let l = Term::list(vec![Term::atom("a"), Term::atom("b")]);
        assert_eq!(
            l,
            Term::cons(Term::atom("a"), Term::cons(Term::atom("b"), Term::nil()))
        );
        assert!(Term::list(vec![]).is_nil());
    }

    #[test]
    fn test_list_with_tail() {
        let l = Term::list_with_tail(vec![Term::atom("a")], Term::var("T", 0));
        assert_eq!(l, Term::cons(Term::atom("a"), Term::var("T", 0)));
    }

    #[test]
    fn test_vars_in_occurrence_order() {
        // f(X), then [Y, X]
        let t = Term::cons(
            Term::app("f", Term::var("X", 0)),
            Term::cons(
                Term::list(vec![Term::var("Y", 0), Term::var("X", 0)]),
                Term::nil(),
            ),
        );
        let names: Vec<String> = t.vars().iter().map(|v| v.name().to_string()).collect();
        assert_eq!(names, vec!["X", "Y", "X"]);
    }

    #[test]
    fn test_contains_var() {
        let x = Variable::new("X", 3);
        let t = Term::app("f", Term::cons(Term::atom("a"), Term::Var(x.clone())));
        assert!(t.contains_var(&x));
        assert!(!t.contains_var(&Variable::new("X", 4)));
    }

    #[test]
    fn test_with_fresh_id() {
        let t = Term::app("f", Term::cons(Term::var("X", -1), Term::var("Y", -1)));
        let renamed = t.with_fresh_id(9);
        assert_eq!(
            renamed,
            Term::app("f", Term::cons(Term::var("X", 9), Term::var("Y", 9)))
        );
        // Structure and atoms unchanged, original untouched
        assert_eq!(t.vars()[0].id(), -1);
    }

    #[test]
    fn test_as_proper_list() {
        let l = Term::list(vec![Term::atom("a"), Term::atom("b")]);
        assert_eq!(l.as_proper_list().unwrap().len(), 2);

        let improper = Term::cons(Term::atom("a"), Term::var("T", 0));
        assert!(improper.as_proper_list().is_none());
    }

    #[test]
    fn test_display_forms() {
        assert_eq!(format!("{}", Term::atom("socrates")), "socrates");
        assert_eq!(format!("{}", Term::nil()), "[]");
        assert_eq!(format!("{}", Term::var("X", 5)), "X");
        assert_eq!(
            format!("{}", Term::app("f", Term::atom("a"))),
            "f(a)"
        );
        assert_eq!(
            format!(
                "{}",
                Term::app("f", Term::list(vec![Term::atom("a"), Term::atom("b")]))
            ),
            "f(a, b)"
        );
        assert_eq!(
            format!("{}", Term::list(vec![Term::atom("a"), Term::atom("b")])),
            "[a, b]"
        );
        assert_eq!(
            format!(
                "{}",
                Term::list_with_tail(vec![Term::atom("a")], Term::var("T", 0))
            ),
            "[a|T]"
        );
    }
}
