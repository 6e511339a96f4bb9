use log::{debug, info};

use crate::error::{ResourceExhaustedSnafu, Resource, Result};
use crate::formula::expr::Formula;
use crate::limits::Limits;

enum Task {
    Visit(Formula),
    And,
    Or,
}

struct Distributor {
    changed: bool,
    size: usize,
    max_nodes: usize,
}

impl Distributor {
    fn new(size: usize, max_nodes: usize) -> Self {
        Self {
            changed: false,
            size,
            max_nodes,
        }
    }

    // Each distribution step copies one operand and adds one connective.
    fn charge(&mut self, copied: &Formula) -> Result<()> {
        self.size += copied.size() + 1;
        if self.size > self.max_nodes {
            return ResourceExhaustedSnafu {
                resource: Resource::Nodes,
                limit: self.max_nodes,
            }
            .fail();
        }
        Ok(())
    }

    // One bottom-up pass. Freshly built disjunctions are left for the next pass.
    fn step(&mut self, f: Formula) -> Result<Formula> {
        let mut tasks = vec![Task::Visit(f)];
        let mut done: Vec<Formula> = Vec::new();
        while let Some(task) = tasks.pop() {
            match task {
                Task::Visit(Formula::And { lhs, rhs }) => {
                    tasks.extend([Task::And, Task::Visit(*rhs), Task::Visit(*lhs)]);
                }
                Task::Visit(Formula::Or { lhs, rhs }) => {
                    tasks.extend([Task::Or, Task::Visit(*rhs), Task::Visit(*lhs)]);
                }
                Task::Visit(f) => done.push(f),
                Task::And | Task::Or => {
                    let (Some(rhs), Some(lhs)) = (done.pop(), done.pop()) else {
                        unreachable!("operands are finished before their connective");
                    };
                    let f = match task {
                        Task::Or => self.distribute(lhs, rhs)?,
                        _ => Formula::and(lhs, rhs),
                    };
                    done.push(f);
                }
            }
        }
        let Some(f) = done.pop() else {
            unreachable!("the root is always finished");
        };
        Ok(f)
    }

    fn distribute(&mut self, lhs: Formula, rhs: Formula) -> Result<Formula> {
        match (lhs, rhs) {
            // (B & C) | A |- (B | A) & (C | A)
            (Formula::And { lhs: b, rhs: c }, a) => {
                self.charge(&a)?;
                self.changed = true;
                Ok(Formula::and(Formula::or(*b, a.clone()), Formula::or(*c, a)))
            }
            // A | (B & C) |- (A | B) & (A | C)
            (a, Formula::And { lhs: b, rhs: c }) => {
                self.charge(&a)?;
                self.changed = true;
                Ok(Formula::and(Formula::or(a.clone(), *b), Formula::or(a, *c)))
            }
            (lhs, rhs) => Ok(Formula::or(lhs, rhs)),
        }
    }
}

impl Formula {
    /// Distributes disjunctions over conjunctions until no `|` has a `&` operand.
    ///
    /// Expects a formula in NNF. Fails with [`Resource::Nodes`] once the result would exceed `limits.max_nodes`.
    pub fn distribute(self, limits: &Limits) -> Result<Formula> {
        debug_assert!(self.is_nnf(), "distribute expects NNF, got {self}");
        limits.check_size(self.size())?;

        let mut distributor = Distributor::new(self.size(), limits.max_nodes);
        let mut f = self;
        let mut passes = 0;
        distributor.changed = true;
        while distributor.changed {
            distributor.changed = false;
            f = distributor.step(f)?;
            passes += 1;
            debug!("distribute: pass {passes}, size {}", distributor.size);
        }
        info!("Distribution reached a fixed point after {passes} passes, {} nodes", f.size());
        Ok(f)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::error::CnfError;
    use crate::limits::DEFAULT_LIMITS;

    fn parse(s: &str) -> Formula {
        Formula::parse(s).unwrap()
    }

    fn distribute(s: &str) -> Formula {
        parse(s).distribute(&DEFAULT_LIMITS).unwrap()
    }

    #[test]
    fn test_distribute_left() {
        assert_eq!(distribute("A | (B & C)"), parse("(A | B) & (A | C)"));
    }

    #[test]
    fn test_distribute_right() {
        assert_eq!(distribute("(B & C) | A"), parse("(B | A) & (C | A)"));
    }

    #[test]
    fn test_distribute_both_sides() {
        let f = distribute("(A & B) | (C & D)");
        assert_eq!(f, parse("((A | C) & (A | D)) & ((B | C) & (B | D))"));
        assert!(f.is_cnf());
    }

    #[test]
    fn test_exposed_patterns_are_distributed() {
        // The inner distribution creates a new `&` under the outer `|`.
        let f = distribute("A | (B | (C & D))");
        assert_eq!(f, parse("(A | (B | C)) & (A | (B | D))"));
    }

    #[test]
    fn test_literals_and_clauses_are_fixed_points() {
        assert_eq!(distribute("!A"), parse("!A"));
        assert_eq!(distribute("A | !B | C"), parse("A | !B | C"));
        assert_eq!(distribute("(A | B) & !C"), parse("(A | B) & !C"));
    }

    #[test]
    fn test_long_chains_do_not_recurse() {
        // Left-associated chain, as deep as the default limit allows.
        let mut s = (1..DEFAULT_LIMITS.max_depth).map(|i| format!("A{i}")).collect::<Vec<_>>().join(" | ");
        s.push_str(" | (X & Y)");
        let f = parse(&s);
        assert_eq!(f.depth(), DEFAULT_LIMITS.max_depth);
        let cnf = f.distribute(&DEFAULT_LIMITS).unwrap();
        assert!(cnf.is_cnf());
        assert_eq!(cnf.clauses().map(|c| c.len()), Some(2));
    }

    #[test]
    fn test_node_budget() {
        // (x1 & y1) | (x2 & y2) | ... needs 2^n clauses.
        let s = (1..=12).map(|i| format!("(x{i} & y{i})")).collect::<Vec<_>>().join(" | ");
        let limits = Limits {
            max_nodes: 10_000,
            ..DEFAULT_LIMITS
        };
        let err = parse(&s).distribute(&limits).unwrap_err();
        assert_eq!(
            err,
            CnfError::ResourceExhausted {
                resource: Resource::Nodes,
                limit: 10_000
            }
        );
    }
}
