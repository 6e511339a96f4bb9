use itertools::Itertools;
use log::debug;

use prop_cnf_core::eval::{assignments, extensions};
use prop_cnf_core::{Cnf, Formula};

/// Atoms of both formulas, deduplicated, in first-occurrence order.
fn joint_atoms(f: &Formula, g: &Formula) -> Vec<String> {
    f.atoms().into_iter().chain(g.atoms()).unique().collect()
}

/// Truth-table equivalence.
pub fn equivalent(f: &Formula, g: &Formula) -> bool {
    let atoms = joint_atoms(f, g);
    let result = assignments(&atoms).all(|a| {
        let same = f.eval(&a) == g.eval(&a);
        if !same {
            debug!("{f} and {g} differ on {a}");
        }
        same
    });
    result
}

pub fn is_satisfiable(f: &Formula) -> bool {
    assignments(&f.atoms()).any(|a| f.eval(&a))
}

/// Brute-force satisfiability of a clause set over all of its variables.
pub fn cnf_is_satisfiable(cnf: &Cnf) -> bool {
    assignments(&cnf.var_names()).any(|a| cnf.eval(&a))
}

/// Every model of `f` extends to a model of `cnf` by giving each fresh variable the value
/// of the subformula it stands for, and no non-model of `f` does.
pub fn models_extend(f: &Formula, cnf: &Cnf) -> bool {
    assignments(&cnf.original_names()).all(|a| {
        let same = f.eval(&a) == cnf.eval(&cnf.extend(&a));
        if !same {
            debug!("{f} and its encoding disagree on {a}");
        }
        same
    })
}

/// The models of `cnf` restricted to the original atoms are exactly the models of `f`.
///
/// Enumerates all assignments of the fresh variables, so only usable on small encodings.
pub fn projected_models_agree(f: &Formula, cnf: &Cnf) -> bool {
    let fresh = cnf.fresh.iter().map(|&v| cnf.symbols.name(v).to_string()).collect_vec();
    let names = cnf.original_names();
    let result = assignments(&names).all(|a| {
        let extends = extensions(&a, &fresh).any(|full| cnf.eval(&full));
        if extends != f.eval(&a) {
            debug!("{f} and the projection of its encoding disagree on {a}");
        }
        extends == f.eval(&a)
    });
    result
}

pub fn equisatisfiable(f: &Formula, cnf: &Cnf) -> bool {
    is_satisfiable(f) == cnf_is_satisfiable(cnf)
}

/// `A1 & A2 & ... & An`, associated to the left.
pub fn conjunction_chain(n: usize) -> Formula {
    chain(n, Formula::and)
}

/// `A1 | A2 | ... | An`, associated to the left.
pub fn disjunction_chain(n: usize) -> Formula {
    chain(n, Formula::or)
}

fn chain(n: usize, op: fn(Formula, Formula) -> Formula) -> Formula {
    (2..=n).fold(Formula::var("A1"), |acc, i| op(acc, Formula::var(format!("A{i}"))))
}

/// `(x1 & y1) | (x2 & y2) | ... | (xn & yn)`, whose classical CNF has `2^n` clauses.
pub fn pairs_disjunction(n: usize) -> Formula {
    let pair = |i: usize| Formula::and(Formula::var(format!("x{i}")), Formula::var(format!("y{i}")));
    (2..=n).fold(pair(1), |acc, i| Formula::or(acc, pair(i)))
}

/// Complete binary tree of the given depth, alternating `&` and `|` by level, over distinct atoms.
pub fn balanced(depth: usize) -> Formula {
    let mut counter = 0;
    balanced_rec(depth, &mut counter)
}

fn balanced_rec(depth: usize, counter: &mut usize) -> Formula {
    if depth <= 1 {
        *counter += 1;
        return Formula::var(format!("v{counter}"));
    }
    let lhs = balanced_rec(depth - 1, counter);
    let rhs = balanced_rec(depth - 1, counter);
    if depth % 2 == 0 {
        Formula::and(lhs, rhs)
    } else {
        Formula::or(lhs, rhs)
    }
}

/// Number of binary connectives in the tree.
pub fn binary_nodes(f: &Formula) -> usize {
    match f {
        Formula::Var(_) => 0,
        Formula::Not { arg } => binary_nodes(arg),
        Formula::And { lhs, rhs }
        | Formula::Or { lhs, rhs }
        | Formula::Implies { lhs, rhs }
        | Formula::Iff { lhs, rhs } => 1 + binary_nodes(lhs) + binary_nodes(rhs),
    }
}
