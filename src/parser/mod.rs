//! Surface-syntax parser
//!
//! Parses the Prolog-flavored statement syntax into [`Statement`]s:
//!
//! ```text
//! human(socrates).                 % axiom
//! mortal(X) :- human(X).           % rule
//! ?- mortal(X).                    % query
//! ```
//!
//! Identifiers starting with a lowercase letter are atoms or predicate
//! names; identifiers starting with an uppercase letter or underscore are
//! variables. `%` starts a comment running to end of line. A bare predicate
//! carries `nil` as its argument; `f(t)` carries `t`; `f(t1, ..., tn)`
//! carries the list `[t1, ..., tn]`. Variables are produced with the
//! sentinel id; renaming happens inside the proof system.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while},
    character::complete::{char, multispace1, satisfy},
    combinator::{cut, map, opt, recognize, value},
    multi::many0,
    sequence::{delimited, pair, preceded},
    IResult,
};
use thiserror::Error;

use crate::error::HornError;
use crate::prop::{AtomicProp, Prop, Rule, Statement};
use crate::term::{Atom, Term, Variable};

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("syntax error at byte {position}: {message}")]
    Syntax { position: usize, message: String },

    #[error("unexpected end of input")]
    UnexpectedEof,
}

impl From<ParseError> for HornError {
    fn from(err: ParseError) -> Self {
        HornError::parse(err.to_string())
    }
}

/// Parse a single statement, requiring the whole input to be consumed.
pub fn parse_statement(input: &str) -> Result<Statement, ParseError> {
    let (rest, stmt) = statement(input).map_err(|e| convert_error(input, e))?;
    let (rest, ()) = ws(rest).map_err(|e| convert_error(input, e))?;
    if !rest.is_empty() {
        return Err(ParseError::Syntax {
            position: input.len() - rest.len(),
            message: format!("unexpected trailing input `{}`", snippet(rest)),
        });
    }
    Ok(stmt)
}

/// Parse a whole program: zero or more statements separated by whitespace
/// and comments.
pub fn parse_program(input: &str) -> Result<Vec<Statement>, ParseError> {
    let mut statements = Vec::new();
    let mut rest = input;
    loop {
        let (after_ws, ()) = ws(rest).map_err(|e| convert_error(input, e))?;
        if after_ws.is_empty() {
            break;
        }
        let (next, stmt) = statement(after_ws).map_err(|e| convert_error(input, e))?;
        statements.push(stmt);
        rest = next;
    }
    Ok(statements)
}

fn convert_error(input: &str, err: nom::Err<nom::error::Error<&str>>) -> ParseError {
    match err {
        nom::Err::Incomplete(_) => ParseError::UnexpectedEof,
        nom::Err::Error(e) | nom::Err::Failure(e) => {
            if e.input.is_empty() {
                ParseError::UnexpectedEof
            } else {
                ParseError::Syntax {
                    position: input.len() - e.input.len(),
                    message: format!("unexpected input near `{}`", snippet(e.input)),
                }
            }
        }
    }
}

fn snippet(input: &str) -> String {
    input.chars().take(12).collect()
}

/// Parse whitespace and comments
fn ws(input: &str) -> IResult<&str, ()> {
    value(
        (),
        many0(alt((
            value((), multispace1),
            value((), preceded(char('%'), take_while(|c| c != '\n'))),
        ))),
    )(input)
}

fn ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// An atom or predicate name: lowercase letter, then ident characters
fn lower_ident(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|c| c.is_ascii_lowercase()),
        take_while(ident_char),
    ))(input)
}

/// A variable name: uppercase letter or underscore, then ident characters
fn var_ident(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|c| c.is_ascii_uppercase() || c == '_'),
        take_while(ident_char),
    ))(input)
}

fn term(input: &str) -> IResult<&str, Term> {
    preceded(ws, alt((list_term, variable_term, symbol_term)))(input)
}

fn variable_term(input: &str) -> IResult<&str, Term> {
    map(var_ident, |name| Term::Var(Variable::sentinel(name)))(input)
}

/// An atom, or a compound `f(t1, ..., tn)`
fn symbol_term(input: &str) -> IResult<&str, Term> {
    let (input, name) = lower_ident(input)?;
    let (input, args) = opt(arg_list)(input)?;
    let term = match args {
        None => Term::atom(name),
        Some(args) => Term::App(Atom::new(name), Box::new(encode_args(args))),
    };
    Ok((input, term))
}

/// A parenthesized argument list; the paren must follow immediately
fn arg_list(input: &str) -> IResult<&str, Vec<Term>> {
    delimited(char('('), term_list, preceded(ws, char(')')))(input)
}

fn term_list(input: &str) -> IResult<&str, Vec<Term>> {
    let (input, first) = term(input)?;
    let (input, mut rest) = many0(preceded(preceded(ws, char(',')), term))(input)?;
    rest.insert(0, first);
    Ok((input, rest))
}

/// Encode surface arguments into the single argument term: one argument
/// is carried directly, several are carried as a list.
fn encode_args(mut args: Vec<Term>) -> Term {
    if args.len() == 1 {
        args.remove(0)
    } else {
        Term::list(args)
    }
}

fn list_term(input: &str) -> IResult<&str, Term> {
    preceded(char('['), alt((empty_list, nonempty_list)))(input)
}

fn empty_list(input: &str) -> IResult<&str, Term> {
    map(preceded(ws, char(']')), |_| Term::nil())(input)
}

fn nonempty_list(input: &str) -> IResult<&str, Term> {
    let (input, heads) = term_list(input)?;
    let (input, tail) = opt(preceded(preceded(ws, char('|')), term))(input)?;
    let (input, _) = preceded(ws, char(']'))(input)?;
    let term = match tail {
        Some(tail) => Term::list_with_tail(heads, tail),
        None => Term::list(heads),
    };
    Ok((input, term))
}

fn atomic_prop(input: &str) -> IResult<&str, AtomicProp> {
    preceded(ws, alt((cut_prop, pred_prop)))(input)
}

fn cut_prop(input: &str) -> IResult<&str, AtomicProp> {
    map(char('!'), |_| AtomicProp::cut())(input)
}

fn pred_prop(input: &str) -> IResult<&str, AtomicProp> {
    let (input, name) = lower_ident(input)?;
    let (input, args) = opt(arg_list)(input)?;
    let prop = match args {
        None => AtomicProp::bare(name),
        Some(args) => AtomicProp::new(name, encode_args(args)),
    };
    Ok((input, prop))
}

/// A conjunction of atomic propositions, folded right
fn prop(input: &str) -> IResult<&str, Prop> {
    let (input, first) = map(atomic_prop, Prop::Atomic)(input)?;
    let (input, rest) = opt(preceded(preceded(ws, char(',')), prop))(input)?;
    let combined = match rest {
        Some(rest) => Prop::conj(first, rest),
        None => first,
    };
    Ok((input, combined))
}

fn statement(input: &str) -> IResult<&str, Statement> {
    preceded(ws, alt((query_statement, clause_statement)))(input)
}

fn query_statement(input: &str) -> IResult<&str, Statement> {
    let (input, _) = tag("?-")(input)?;
    let (input, goal) = cut(prop)(input)?;
    let (input, _) = cut(end_dot)(input)?;
    Ok((input, Statement::Query(goal)))
}

fn clause_statement(input: &str) -> IResult<&str, Statement> {
    let (input, head) = atomic_prop(input)?;
    // A `:-` commits to a rule body; a missing body is a hard error
    let (input, goal) = opt(preceded(preceded(ws, tag(":-")), cut(prop)))(input)?;
    let (input, _) = end_dot(input)?;
    let rule = match goal {
        Some(goal) => Rule::when(head, goal),
        None => Rule::fact(head),
    };
    Ok((input, Statement::Rule(rule)))
}

fn end_dot(input: &str) -> IResult<&str, char> {
    preceded(ws, char('.'))(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::SENTINEL_ID;

    fn rule(input: &str) -> Rule {
        match parse_statement(input).unwrap() {
            Statement::Rule(r) => r,
            other => panic!("expected rule, got {:?}", other),
        }
    }

    fn query(input: &str) -> Prop {
        match parse_statement(input).unwrap() {
            Statement::Query(q) => q,
            other => panic!("expected query, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_fact() {
        let r = rule("human(socrates).");
        assert!(r.is_fact());
        assert_eq!(r.head.pred.name(), "human");
        assert_eq!(r.head.term, Term::atom("socrates"));
    }

    #[test]
    fn test_parse_bare_fact() {
        let r = rule("sunny.");
        assert!(r.head.term.is_nil());
    }

    #[test]
    fn test_parse_rule() {
        let r = rule("mortal(X) :- human(X).");
        assert!(!r.is_fact());
        assert_eq!(r.head.term, Term::var("X", SENTINEL_ID));
        assert_eq!(
            r.goal,
            Some(Prop::atomic("human", Term::var("X", SENTINEL_ID)))
        );
    }

    #[test]
    fn test_parse_conjunction_folds_right() {
        let r = rule("p :- q, r, s.");
        let goal = r.goal.unwrap();
        assert_eq!(
            goal,
            Prop::conj(
                Prop::Atomic(AtomicProp::bare("q")),
                Prop::conj(
                    Prop::Atomic(AtomicProp::bare("r")),
                    Prop::Atomic(AtomicProp::bare("s")),
                ),
            )
        );
    }

    #[test]
    fn test_parse_query_with_sentinel_vars() {
        let q = query("?- mortal(Who).");
        let vars = q.vars();
        assert_eq!(vars.len(), 1);
        assert_eq!(vars[0].name(), "Who");
        assert_eq!(vars[0].id(), SENTINEL_ID);
    }

    #[test]
    fn test_parse_cut_and_true() {
        let r = rule("p :- !, true.");
        assert_eq!(
            r.goal,
            Some(Prop::conj(
                Prop::Atomic(AtomicProp::cut()),
                Prop::Atomic(AtomicProp::truth()),
            ))
        );
    }

    #[test]
    fn test_nary_arguments_become_a_list() {
        let r = rule("likes(alice, bob).");
        assert_eq!(
            r.head.term,
            Term::list(vec![Term::atom("alice"), Term::atom("bob")])
        );
    }

    #[test]
    fn test_single_argument_is_carried_directly() {
        let r = rule("p(f(a)).");
        assert_eq!(r.head.term, Term::app("f", Term::atom("a")));
    }

    #[test]
    fn test_parse_lists() {
        let r = rule("p([]).");
        assert!(r.head.term.is_nil());

        let r = rule("p([a, b]).");
        assert_eq!(
            r.head.term,
            Term::list(vec![Term::atom("a"), Term::atom("b")])
        );

        let r = rule("p([H|T]).");
        assert_eq!(
            r.head.term,
            Term::cons(
                Term::var("H", SENTINEL_ID),
                Term::var("T", SENTINEL_ID)
            )
        );
    }

    #[test]
    fn test_parse_program_with_comments() {
        let program = "
            % the classical syllogism
            human(socrates).
            mortal(X) :- human(X).  % a rule

            ?- mortal(socrates).
        ";
        let statements = parse_program(program).unwrap();
        assert_eq!(statements.len(), 3);
        assert!(matches!(statements[2], Statement::Query(_)));
    }

    #[test]
    fn test_parse_empty_program() {
        assert!(parse_program("  % just a comment\n").unwrap().is_empty());
    }

    #[test]
    fn test_missing_period_is_an_error() {
        assert_eq!(
            parse_statement("human(socrates)"),
            Err(ParseError::UnexpectedEof)
        );
    }

    #[test]
    fn test_syntax_error_carries_position() {
        match parse_statement("p :- .") {
            Err(ParseError::Syntax { position, .. }) => assert_eq!(position, 5),
            other => panic!("expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_trailing_input_is_an_error() {
        assert!(matches!(
            parse_statement("p. q."),
            Err(ParseError::Syntax { .. })
        ));
    }

    #[test]
    fn test_display_roundtrip() {
        for input in [
            "human(socrates).",
            "mortal(X) :- human(X).",
            "p :- q, r.",
            "p([a, b|T]).",
            "?- likes(alice, X).",
        ] {
            let stmt = parse_statement(input).unwrap();
            assert_eq!(format!("{}", stmt), input);
            // Display output parses back to the same statement
            assert_eq!(parse_statement(&format!("{}", stmt)).unwrap(), stmt);
        }
    }
}
