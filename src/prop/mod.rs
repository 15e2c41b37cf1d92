//! Propositions, rules, and parsed statements
//!
//! A proposition is either a predicate application or a conjunction; a rule
//! pairs a head proposition with an optional goal. Statements are what the
//! parser hands to the proof system: a rule to assume or a query to run.

use std::fmt;
use std::sync::Arc;

use crate::term::{fmt_application, fresh_id, Atom, Term, Variable};

/// A predicate applied to its argument term.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AtomicProp {
    /// Predicate name, also the rule-index key
    pub pred: Atom,
    /// The argument term
    pub term: Term,
}

impl AtomicProp {
    /// Create a predicate application
    pub fn new(pred: impl Into<Arc<str>>, term: Term) -> Self {
        AtomicProp {
            pred: Atom::new(pred),
            term,
        }
    }

    /// A bare predicate, carrying `nil` as its argument
    pub fn bare(pred: impl Into<Arc<str>>) -> Self {
        AtomicProp::new(pred, Term::nil())
    }

    /// The cut goal `!`
    pub fn cut() -> Self {
        AtomicProp::bare("!")
    }

    /// The trivially true goal
    pub fn truth() -> Self {
        AtomicProp::bare("true")
    }

    /// Variables in left-to-right occurrence order, duplicates included
    pub fn vars(&self) -> Vec<Variable> {
        self.term.vars()
    }

    /// Copy with every variable re-tagged to `id`
    pub fn with_fresh_id(&self, id: i64) -> AtomicProp {
        AtomicProp {
            pred: self.pred.clone(),
            term: self.term.with_fresh_id(id),
        }
    }
}

impl fmt::Display for AtomicProp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.term.is_nil() {
            write!(f, "{}", self.pred)
        } else {
            fmt_application(f, self.pred.name(), &self.term)
        }
    }
}

impl fmt::Debug for AtomicProp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.pred, self.term)
    }
}

/// A proposition: a predicate application or a conjunction.
///
/// There is no disjunction node; alternatives are expressed by supplying
/// multiple rules for the same head predicate.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Prop {
    /// A predicate application
    Atomic(AtomicProp),
    /// Prove the left conjunct, then the right under the resulting bindings
    Conj(Box<Prop>, Box<Prop>),
}

impl Prop {
    /// Create an atomic proposition
    pub fn atomic(pred: impl Into<Arc<str>>, term: Term) -> Self {
        Prop::Atomic(AtomicProp::new(pred, term))
    }

    /// Create a conjunction
    pub fn conj(left: Prop, right: Prop) -> Self {
        Prop::Conj(Box::new(left), Box::new(right))
    }

    /// Variables in left-to-right occurrence order, duplicates included
    pub fn vars(&self) -> Vec<Variable> {
        let mut out = Vec::new();
        self.collect_vars(&mut out);
        out
    }

    fn collect_vars(&self, out: &mut Vec<Variable>) {
        match self {
            Prop::Atomic(p) => p.term.collect_vars(out),
            Prop::Conj(left, right) => {
                left.collect_vars(out);
                right.collect_vars(out);
            }
        }
    }

    /// Copy with every variable re-tagged to `id`
    pub fn with_fresh_id(&self, id: i64) -> Prop {
        match self {
            Prop::Atomic(p) => Prop::Atomic(p.with_fresh_id(id)),
            Prop::Conj(left, right) => Prop::Conj(
                Box::new(left.with_fresh_id(id)),
                Box::new(right.with_fresh_id(id)),
            ),
        }
    }

    /// Rename the whole proposition to a single fresh instantiation id.
    ///
    /// One id per instantiation keeps the variables of the proposition
    /// coreferent while separating them from every other instantiation.
    pub fn refresh(&self) -> Prop {
        self.with_fresh_id(fresh_id())
    }
}

impl fmt::Display for Prop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prop::Atomic(p) => write!(f, "{}", p),
            Prop::Conj(left, right) => write!(f, "{}, {}", left, right),
        }
    }
}

impl fmt::Debug for Prop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prop::Atomic(p) => write!(f, "{:?}", p),
            Prop::Conj(left, right) => write!(f, "{:?}, {:?}", left, right),
        }
    }
}

/// A Horn clause: a head and an optional goal.
///
/// A rule with no goal is an axiom: its head holds whenever it unifies.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Rule {
    /// The head predicate application
    pub head: AtomicProp,
    /// The goal that must be provable for the head to hold
    pub goal: Option<Prop>,
}

impl Rule {
    /// Create an axiom (a rule with no goal)
    pub fn fact(head: AtomicProp) -> Self {
        Rule { head, goal: None }
    }

    /// Create a rule whose head holds whenever `goal` is provable
    pub fn when(head: AtomicProp, goal: Prop) -> Self {
        Rule {
            head,
            goal: Some(goal),
        }
    }

    /// Check if this rule is an axiom
    pub fn is_fact(&self) -> bool {
        self.goal.is_none()
    }

    /// Rename head and goal to a single fresh instantiation id, so this
    /// use of the rule shares no variables with any other use.
    pub fn refresh(&self) -> Rule {
        let id = fresh_id();
        Rule {
            head: self.head.with_fresh_id(id),
            goal: self.goal.as_ref().map(|g| g.with_fresh_id(id)),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.goal {
            None => write!(f, "{}.", self.head),
            Some(goal) => write!(f, "{} :- {}.", self.head, goal),
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.goal {
            None => write!(f, "{:?}.", self.head),
            Some(goal) => write!(f, "{:?} :- {:?}.", self.head, goal),
        }
    }
}

/// A parsed input line: a rule to assume or a query to run.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Statement {
    /// Extend the knowledge base
    Rule(Rule),
    /// Enumerate solutions
    Query(Prop),
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Rule(r) => write!(f, "{}", r),
            Statement::Query(q) => write!(f, "?- {}.", q),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_prop_carries_nil() {
        let p = AtomicProp::bare("p");
        assert!(p.term.is_nil());
        assert_eq!(format!("{}", p), "p");
    }

    #[test]
    fn test_builtin_constructors() {
        assert_eq!(AtomicProp::cut().pred.name(), "!");
        assert!(AtomicProp::cut().term.is_nil());
        assert_eq!(AtomicProp::truth().pred.name(), "true");
    }

    #[test]
    fn test_prop_vars_left_to_right() {
        // p(X), q([Y, X])
        let prop = Prop::conj(
            Prop::atomic("p", Term::var("X", -1)),
            Prop::atomic("q", Term::list(vec![Term::var("Y", -1), Term::var("X", -1)])),
        );
        let names: Vec<String> = prop.vars().iter().map(|v| v.name().to_string()).collect();
        assert_eq!(names, vec!["X", "Y", "X"]);
    }

    #[test]
    fn test_refresh_uses_one_id() {
        let prop = Prop::conj(
            Prop::atomic("p", Term::var("X", -1)),
            Prop::atomic("q", Term::var("X", -1)),
        );
        let renamed = prop.refresh();
        let vars = renamed.vars();
        assert_eq!(vars.len(), 2);
        // Both occurrences stay coreferent under the new id
        assert_eq!(vars[0], vars[1]);
        assert_ne!(vars[0].id(), -1);
    }

    #[test]
    fn test_refresh_separates_instantiations() {
        let rule = Rule::when(
            AtomicProp::new("p", Term::var("X", -1)),
            Prop::atomic("q", Term::var("X", -1)),
        );
        let first = rule.refresh();
        let second = rule.refresh();
        assert_ne!(first.head.vars()[0], second.head.vars()[0]);
        // Within one instantiation, head and goal still share the variable
        assert_eq!(first.head.vars()[0], first.goal.as_ref().unwrap().vars()[0]);
    }

    #[test]
    fn test_display() {
        let rule = Rule::when(
            AtomicProp::new("mortal", Term::var("X", -1)),
            Prop::atomic("human", Term::var("X", -1)),
        );
        assert_eq!(format!("{}", rule), "mortal(X) :- human(X).");

        let fact = Rule::fact(AtomicProp::new("human", Term::atom("socrates")));
        assert_eq!(format!("{}", fact), "human(socrates).");

        let query = Statement::Query(Prop::conj(
            Prop::Atomic(AtomicProp::bare("p")),
            Prop::Atomic(AtomicProp::cut()),
        ));
        assert_eq!(format!("{}", query), "?- p, !.");
    }
}
