use log::debug;
use tap::Tap;

use crate::formula::expr::Formula;

impl Formula {
    /// Pushes negations down to the variables using De Morgan's laws and double-negation elimination.
    ///
    /// Implications and equivalences are expanded on the way, so the pass is total,
    /// but it is meant to run after [`Formula::eliminate_implications`].
    pub fn to_nnf(self) -> Formula {
        nnf(self, false).tap(|x| debug!("Formula::to_nnf() -> {x}"))
    }

    /// Whether every negation applies directly to a variable and no implication or equivalence is left.
    pub fn is_nnf(&self) -> bool {
        match self {
            Formula::Var(_) => true,
            Formula::Not { arg } => arg.is_var(),
            Formula::And { lhs, rhs } | Formula::Or { lhs, rhs } => lhs.is_nnf() && rhs.is_nnf(),
            Formula::Implies { .. } | Formula::Iff { .. } => false,
        }
    }
}

// `negated` tracks the parity of negations above `f`.
fn nnf(f: Formula, negated: bool) -> Formula {
    match f {
        Formula::Var(_) => {
            if negated {
                Formula::not(f)
            } else {
                f
            }
        }
        // ~~A |- A
        Formula::Not { arg } => nnf(*arg, !negated),
        // ~(A & B) |- ~A | ~B
        Formula::And { lhs, rhs } => {
            let lhs = nnf(*lhs, negated);
            let rhs = nnf(*rhs, negated);
            if negated {
                Formula::or(lhs, rhs)
            } else {
                Formula::and(lhs, rhs)
            }
        }
        // ~(A | B) |- ~A & ~B
        Formula::Or { lhs, rhs } => {
            let lhs = nnf(*lhs, negated);
            let rhs = nnf(*rhs, negated);
            if negated {
                Formula::and(lhs, rhs)
            } else {
                Formula::or(lhs, rhs)
            }
        }
        f @ (Formula::Implies { .. } | Formula::Iff { .. }) => nnf(f.eliminate_implications(), negated),
    }
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;
    use test_log::test;

    use super::*;
    use crate::eval::assignments;

    fn nnf_of(s: &str) -> Formula {
        Formula::parse(s).unwrap().eliminate_implications().to_nnf()
    }

    fn parse(s: &str) -> Formula {
        Formula::parse(s).unwrap()
    }

    #[test]
    fn test_double_negation() {
        assert_eq!(nnf_of("!!A"), parse("A"));
        assert_eq!(nnf_of("!!!A"), parse("!A"));
    }

    #[test]
    fn test_de_morgan_and() {
        assert_eq!(nnf_of("!(A & B)"), parse("!A | !B"));
    }

    #[test]
    fn test_de_morgan_or() {
        assert_eq!(nnf_of("!(A | B)"), parse("!A & !B"));
    }

    #[test]
    fn test_nested_negations() {
        let f = nnf_of("!(A & !(B | !C))");
        assert_eq!(f, parse("!A | (B | !C)"));
        assert!(f.is_nnf());
    }

    #[test]
    fn test_negated_implication() {
        assert_eq!(nnf_of("!(A -> B)"), parse("A & !B"));
        // Implications left in place are expanded by the pass itself.
        assert_eq!(parse("!(A -> B)").to_nnf(), parse("A & !B"));
    }

    #[test]
    fn test_negated_literal_is_kept() {
        assert_eq!(nnf_of("!A"), parse("!A"));
        assert!(!parse("!(A & B)").is_nnf());
    }

    #[quickcheck]
    fn prop_nnf_preserves_semantics(f: Formula) -> bool {
        let nnf = f.clone().eliminate_implications().to_nnf();
        nnf.is_nnf() && assignments(&f.atoms()).all(|a| f.eval(&a) == nnf.eval(&a))
    }
}
