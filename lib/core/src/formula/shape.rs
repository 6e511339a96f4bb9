use crate::formula::expr::Formula;

impl Formula {
    /// A clause is a literal or a disjunction of clauses.
    pub fn is_clause(&self) -> bool {
        match self {
            Formula::Or { lhs, rhs } => lhs.is_clause() && rhs.is_clause(),
            f => f.is_literal(),
        }
    }

    /// A CNF is a clause or a conjunction of CNFs.
    pub fn is_cnf(&self) -> bool {
        match self {
            Formula::And { lhs, rhs } => lhs.is_cnf() && rhs.is_cnf(),
            f => f.is_clause(),
        }
    }

    /// Splits a formula in CNF into its clauses, left to right, each given as its literals.
    ///
    /// Returns `None` if the formula is not in CNF.
    pub fn clauses(&self) -> Option<Vec<Vec<&Formula>>> {
        if !self.is_cnf() {
            return None;
        }
        let mut clauses = Vec::new();
        let mut stack = vec![self];
        while let Some(f) = stack.pop() {
            match f {
                Formula::And { lhs, rhs } => {
                    stack.push(rhs);
                    stack.push(lhs);
                }
                clause => clauses.push(disjuncts(clause)),
            }
        }
        Some(clauses)
    }
}

fn disjuncts(clause: &Formula) -> Vec<&Formula> {
    let mut lits = Vec::new();
    let mut stack = vec![clause];
    while let Some(f) = stack.pop() {
        match f {
            Formula::Or { lhs, rhs } => {
                stack.push(rhs);
                stack.push(lhs);
            }
            lit => lits.push(lit),
        }
    }
    lits
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Formula {
        Formula::parse(s).unwrap()
    }

    #[test]
    fn test_is_clause() {
        assert!(parse("A").is_clause());
        assert!(parse("!A | B | !C").is_clause());
        assert!(!parse("A | (B & C)").is_clause());
    }

    #[test]
    fn test_is_cnf() {
        assert!(parse("A").is_cnf());
        assert!(parse("(A | B) & !C & (C | !A)").is_cnf());
        assert!(!parse("A | (B & C)").is_cnf());
        assert!(!parse("!(A | B)").is_cnf());
        assert!(!parse("A -> B").is_cnf());
    }

    #[test]
    fn test_clauses() {
        let f = parse("(A | !B) & C & (B | (C | A))");
        let clauses: Vec<Vec<String>> = f
            .clauses()
            .unwrap()
            .into_iter()
            .map(|c| c.into_iter().map(|l| l.to_string()).collect())
            .collect();
        assert_eq!(clauses, vec![vec!["A", "!B"], vec!["C"], vec!["B", "C", "A"]]);
    }

    #[test]
    fn test_clauses_of_non_cnf() {
        assert!(parse("A | (B & C)").clauses().is_none());
    }
}
