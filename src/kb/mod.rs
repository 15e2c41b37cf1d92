//! Knowledge base: rules indexed by head predicate
//!
//! Rules are kept in insertion order per predicate; that order is the trial
//! order during proof and therefore the solution enumeration order.

use indexmap::IndexMap;

use crate::prop::Rule;

/// An append-only collection of rules, indexed by head predicate name.
#[derive(Clone, Debug, Default)]
pub struct KnowledgeBase {
    rules: IndexMap<String, Vec<Rule>>,
}

impl KnowledgeBase {
    /// The empty knowledge base
    pub fn empty() -> Self {
        KnowledgeBase::default()
    }

    /// Return a knowledge base extended with `rule`, appended to the rule
    /// list of its head predicate. The receiver is unchanged.
    pub fn assume(&self, rule: Rule) -> KnowledgeBase {
        let mut rules = self.rules.clone();
        rules
            .entry(rule.head.pred.name().to_string())
            .or_default()
            .push(rule);
        KnowledgeBase { rules }
    }

    /// Rules for a predicate in insertion order. Unknown predicates yield
    /// an empty slice, never an error.
    pub fn rules(&self, pred: &str) -> &[Rule] {
        self.rules.get(pred).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Predicate names in first-assumption order
    pub fn preds(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// Total number of rules
    pub fn len(&self) -> usize {
        self.rules.values().map(Vec::len).sum()
    }

    /// Check if no rule has been assumed
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prop::AtomicProp;
    use crate::term::Term;

    fn fact(pred: &str, arg: &str) -> Rule {
        Rule::fact(AtomicProp::new(pred, Term::atom(arg)))
    }

    #[test]
    fn test_assume_is_value_semantic() {
        let kb = KnowledgeBase::empty();
        let kb2 = kb.assume(fact("human", "socrates"));

        assert!(kb.is_empty());
        assert_eq!(kb2.len(), 1);
    }

    #[test]
    fn test_rules_preserve_insertion_order() {
        let kb = KnowledgeBase::empty()
            .assume(fact("human", "socrates"))
            .assume(fact("human", "plato"))
            .assume(fact("human", "aristotle"));

        let args: Vec<String> = kb
            .rules("human")
            .iter()
            .map(|r| format!("{}", r.head.term))
            .collect();
        assert_eq!(args, vec!["socrates", "plato", "aristotle"]);
    }

    #[test]
    fn test_unknown_predicate_is_empty() {
        let kb = KnowledgeBase::empty().assume(fact("human", "socrates"));
        assert!(kb.rules("martian").is_empty());
    }

    #[test]
    fn test_preds_in_first_assumption_order() {
        let kb = KnowledgeBase::empty()
            .assume(fact("b", "x"))
            .assume(fact("a", "y"))
            .assume(fact("b", "z"));

        let preds: Vec<&str> = kb.preds().collect();
        assert_eq!(preds, vec!["b", "a"]);
        assert_eq!(kb.len(), 3);
    }
}
