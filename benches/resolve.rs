//! Benchmarks for hornlog resolution operations

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use hornlog::{
    parse_program, AtomicProp, Env, ProofSystem, Prop, Rule, Solution, Statement, Term,
};

/// Chain KB: parent(n0, n1) ... parent(n{k-1}, n{k}) plus the recursive
/// ancestor rules over pair lists.
fn chain_system(links: usize) -> ProofSystem {
    let mut system = ProofSystem::new();
    for i in 0..links {
        let fact = Rule::fact(AtomicProp::new(
            "parent",
            Term::list(vec![
                Term::atom(format!("n{}", i)),
                Term::atom(format!("n{}", i + 1)),
            ]),
        ));
        system = system.assume(fact).unwrap();
    }

    let base = Rule::when(
        AtomicProp::new(
            "ancestor",
            Term::list(vec![Term::var("X", -1), Term::var("Y", -1)]),
        ),
        Prop::atomic(
            "parent",
            Term::list(vec![Term::var("X", -1), Term::var("Y", -1)]),
        ),
    );
    let step = Rule::when(
        AtomicProp::new(
            "ancestor",
            Term::list(vec![Term::var("X", -1), Term::var("Z", -1)]),
        ),
        Prop::conj(
            Prop::atomic(
                "parent",
                Term::list(vec![Term::var("X", -1), Term::var("Y", -1)]),
            ),
            Prop::atomic(
                "ancestor",
                Term::list(vec![Term::var("Y", -1), Term::var("Z", -1)]),
            ),
        ),
    );
    system.assume(base).unwrap().assume(step).unwrap()
}

fn unify_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("unify");

    for depth in [8usize, 64] {
        let pattern = Term::list((0..depth).map(|i| Term::var(format!("X{}", i), 0)).collect());
        let ground = Term::list((0..depth).map(|i| Term::atom(format!("a{}", i))).collect());

        group.bench_with_input(
            BenchmarkId::new("list", depth),
            &(pattern, ground),
            |b, (pattern, ground)| {
                b.iter(|| {
                    let env = Env::empty().unify(black_box(pattern), black_box(ground));
                    black_box(env)
                });
            },
        );
    }

    group.finish();
}

fn query_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");

    for links in [8usize, 32] {
        let system = chain_system(links);
        let goal = Prop::atomic(
            "ancestor",
            Term::list(vec![Term::atom("n0"), Term::var("Z", -1)]),
        );

        group.bench_with_input(
            BenchmarkId::new("ancestor_all", links),
            &(system, goal),
            |b, (system, goal)| {
                b.iter(|| {
                    let solutions: Vec<Solution> = system.query(black_box(goal)).collect();
                    black_box(solutions.len())
                });
            },
        );
    }

    group.finish();
}

fn parse_benchmark(c: &mut Criterion) {
    let program = r#"
        % family tree
        parent(abe, homer).
        parent(homer, bart).
        parent(homer, lisa).
        ancestor(X, Y) :- parent(X, Y).
        ancestor(X, Z) :- parent(X, Y), ancestor(Y, Z).

        ?- ancestor(abe, Who).
    "#;

    c.bench_function("parse_program", |b| {
        b.iter(|| {
            let statements: Vec<Statement> = parse_program(black_box(program)).unwrap();
            black_box(statements.len())
        });
    });
}

criterion_group!(benches, unify_benchmark, query_benchmark, parse_benchmark);
criterion_main!(benches);
