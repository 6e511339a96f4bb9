use quickcheck::{Arbitrary, Gen};

use crate::formula::expr::Formula;

const ATOMS: [&str; 4] = ["A", "B", "C", "D"];
const MAX_DEPTH: usize = 5;

impl Arbitrary for Formula {
    fn arbitrary(g: &mut Gen) -> Self {
        formula_of_depth(g, MAX_DEPTH)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        match self {
            Formula::Var(_) => quickcheck::empty_shrinker(),
            Formula::Not { arg } => quickcheck::single_shrinker(arg.as_ref().clone()),
            Formula::And { lhs, rhs }
            | Formula::Or { lhs, rhs }
            | Formula::Implies { lhs, rhs }
            | Formula::Iff { lhs, rhs } => Box::new(vec![lhs.as_ref().clone(), rhs.as_ref().clone()].into_iter()),
        }
    }
}

/// Random formula over the atoms `A..D` with depth at most `depth`.
pub fn formula_of_depth(g: &mut Gen, depth: usize) -> Formula {
    if depth <= 1 {
        return atom(g);
    }
    match u8::arbitrary(g) % 7 {
        0 => Formula::not(formula_of_depth(g, depth - 1)),
        1 => Formula::and(formula_of_depth(g, depth - 1), formula_of_depth(g, depth - 1)),
        2 => Formula::or(formula_of_depth(g, depth - 1), formula_of_depth(g, depth - 1)),
        3 => Formula::implies(formula_of_depth(g, depth - 1), formula_of_depth(g, depth - 1)),
        4 => Formula::iff(formula_of_depth(g, depth - 1), formula_of_depth(g, depth - 1)),
        _ => atom(g),
    }
}

fn atom(g: &mut Gen) -> Formula {
    Formula::var(*g.choose(&ATOMS).unwrap_or(&ATOMS[0]))
}
