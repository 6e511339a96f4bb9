use quickcheck::TestResult;
use quickcheck_macros::quickcheck;
use test_log::test;

use prop_cnf::classical_cnf;
use prop_cnf::core::{Cnf, Formula, Limits, DEFAULT_LIMITS};
use prop_cnf_test_utils::{equivalent, pairs_disjunction};

const CASES: &[&str] = &[
    "A",
    "!A",
    "!!A",
    "A -> B",
    "A <-> B",
    "!(A <-> B)",
    "(A & B) | C",
    "(A & B) | (C & D)",
    "A -> B -> C",
    "!(A | B) -> (C <-> !D)",
    "((A -> B) -> A) -> A",
    "(A <-> B) <-> (C <-> (D | E))",
    "!(A & (B | !(C -> D))) | F",
];

#[test]
fn test_fixed_cases_are_equivalent_cnf() {
    for s in CASES {
        let f = Formula::parse(s).unwrap();
        let cnf = classical_cnf(s).unwrap();
        assert!(cnf.is_cnf(), "{s} gave {cnf}");
        assert!(cnf.is_implication_free());
        assert!(equivalent(&f, &cnf), "{s} is not equivalent to {cnf}");
    }
}

#[test]
fn test_double_negation() {
    assert_eq!(classical_cnf("!!A").unwrap(), Formula::var("A"));
    assert_eq!(classical_cnf("!!!!!B").unwrap(), !Formula::var("B"));
}

#[test]
fn test_clause_flattening() {
    let cnf = classical_cnf("(A & B) | C").unwrap();
    let clauses = Cnf::from_formula(&cnf).unwrap();
    assert_eq!(clauses.display_inline().to_string(), "(A | C) & (B | C)");
    assert_eq!(clauses.num_fresh(), 0);
}

#[test]
fn test_exponential_growth() {
    for n in 1..=6 {
        let f = pairs_disjunction(n);
        let cnf = f.to_cnf(&DEFAULT_LIMITS).unwrap();
        let clauses = Cnf::from_formula(&cnf).unwrap();
        assert_eq!(clauses.num_clauses(), 1 << n);
    }
}

#[quickcheck]
fn prop_classical_is_equivalent(f: Formula) -> TestResult {
    let limits = Limits {
        max_nodes: 50_000,
        ..DEFAULT_LIMITS
    };
    match f.clone().to_cnf(&limits) {
        Ok(cnf) => TestResult::from_bool(cnf.is_cnf() && equivalent(&f, &cnf)),
        Err(e) if e.is_resource_exhausted() => TestResult::discard(),
        Err(e) => TestResult::error(e.to_string()),
    }
}
