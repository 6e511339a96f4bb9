//! Tseitin transformation: replace innermost binary subformulas by fresh propositions.
//!
//! The input is brought to NNF and loaded into an [`Arena`]. Every iteration picks the leftmost
//! gate whose operands are both literals, defines a fresh proposition `p <-> (L op R)` with three
//! clauses, and collapses the gate into the literal `p`. The loop stops as soon as the remaining
//! tree is a conjunction of clauses, which are then emitted as they are. A tree that is already in
//! CNF gets no fresh propositions at all.

use std::collections::HashMap;

use log::{debug, info};

use crate::cnf::definition::{Connective, Definition};
use crate::cnf::Cnf;
use crate::error::Result;
use crate::formula::expr::Formula;
use crate::formula::var::SymbolTable;
use crate::limits::Limits;
use crate::lit::Lit;

use self::arena::{Arena, Id};
use self::fresh::FreshVars;

pub mod arena;
pub mod fresh;

pub const DEFAULT_PREFIX: &str = "p";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TseitinOptions {
    /// Prefix of the fresh proposition names.
    pub prefix: String,
}

impl Default for TseitinOptions {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

#[derive(Debug, Copy, Clone)]
enum Node {
    Lit(Lit),
    Gate { connective: Connective, lhs: Id, rhs: Id },
}

struct TseitinEncoder {
    symbols: SymbolTable,
    fresh: FreshVars,
    arena: Arena<Node>,
    substitutions: HashMap<(Connective, Lit, Lit), Lit>,
    cnf: Cnf,
}

impl TseitinEncoder {
    fn new(atoms: &[String], options: &TseitinOptions) -> Self {
        let mut symbols = SymbolTable::new();
        for atom in atoms {
            symbols.intern(atom);
        }
        Self {
            symbols,
            fresh: FreshVars::new(options.prefix.as_str(), atoms.iter().cloned()),
            arena: Arena::new(),
            substitutions: HashMap::new(),
            cnf: Cnf::default(),
        }
    }

    fn load(&mut self, f: Formula) -> Id {
        let node = match f {
            Formula::Var(name) => Node::Lit(self.symbols.intern(&name).pos()),
            Formula::Not { arg } => match *arg {
                Formula::Var(name) => Node::Lit(self.symbols.intern(&name).neg()),
                arg => return self.load(Formula::not(arg).to_nnf()),
            },
            Formula::And { lhs, rhs } => Node::Gate {
                connective: Connective::And,
                lhs: self.load(*lhs),
                rhs: self.load(*rhs),
            },
            Formula::Or { lhs, rhs } => Node::Gate {
                connective: Connective::Or,
                lhs: self.load(*lhs),
                rhs: self.load(*rhs),
            },
            f @ (Formula::Implies { .. } | Formula::Iff { .. }) => return self.load(f.to_nnf()),
        };
        self.arena.alloc(node)
    }

    fn literal(&self, id: Id) -> Option<Lit> {
        match self.arena[id] {
            Node::Lit(lit) => Some(lit),
            Node::Gate { .. } => None,
        }
    }

    /// Leftmost gate whose operands are both literals.
    fn find_reducible(&self, root: Id) -> Option<Id> {
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if let Node::Gate { lhs, rhs, .. } = self.arena[id] {
                if self.literal(lhs).is_some() && self.literal(rhs).is_some() {
                    return Some(id);
                }
                stack.push(rhs);
                stack.push(lhs);
            }
        }
        None
    }

    fn reduce(&mut self, id: Id) {
        let Node::Gate { connective, lhs, rhs } = self.arena[id] else {
            return;
        };
        let (Some(l), Some(r)) = (self.literal(lhs), self.literal(rhs)) else {
            return;
        };
        let p = match self.substitutions.get(&(connective, l, r)) {
            Some(&p) => {
                debug!("Reusing {} for ({} {} {})", self.symbols.name(p.var()), l, connective, r);
                p
            }
            None => {
                let p = self.define(connective, l, r);
                self.substitutions.insert((connective, l, r), p);
                p
            }
        };
        self.arena[id] = Node::Lit(p);
    }

    /// Whether `id` is a literal or a disjunction of literals.
    fn is_clause(&self, id: Id) -> bool {
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            match self.arena[id] {
                Node::Lit(_) => {}
                Node::Gate {
                    connective: Connective::Or,
                    lhs,
                    rhs,
                } => {
                    stack.push(rhs);
                    stack.push(lhs);
                }
                Node::Gate { .. } => return false,
            }
        }
        true
    }

    /// Operands of the conjunction spine under `root`, left to right.
    fn conjuncts(&self, root: Id) -> Vec<Id> {
        let mut result = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            match self.arena[id] {
                Node::Gate {
                    connective: Connective::And,
                    lhs,
                    rhs,
                } => {
                    stack.push(rhs);
                    stack.push(lhs);
                }
                _ => result.push(id),
            }
        }
        result
    }

    fn is_cnf(&self, root: Id) -> bool {
        self.conjuncts(root).into_iter().all(|id| self.is_clause(id))
    }

    // Literals of a clause node, left to right.
    fn clause_lits(&self, id: Id) -> Vec<Lit> {
        let mut lits = Vec::new();
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            match self.arena[id] {
                Node::Lit(lit) => lits.push(lit),
                Node::Gate { connective, lhs, rhs } => {
                    debug_assert_eq!(connective, Connective::Or);
                    stack.push(rhs);
                    stack.push(lhs);
                }
            }
        }
        lits
    }

    // Emits the clauses of `p <-> (l op r)` for a freshly minted `p`.
    fn define(&mut self, connective: Connective, l: Lit, r: Lit) -> Lit {
        let name = self.fresh.mint();
        let var = self.symbols.intern(&name);
        let p = var.pos();
        match connective {
            Connective::And => {
                self.cnf.add_clause([-p, l]);
                self.cnf.add_clause([-p, r]);
                self.cnf.add_clause([p, -l, -r]);
            }
            Connective::Or => {
                self.cnf.add_clause([-p, l, r]);
                self.cnf.add_clause([p, -l]);
                self.cnf.add_clause([p, -r]);
            }
        }
        let definition = Definition {
            var,
            connective,
            lhs: l,
            rhs: r,
        };
        debug!("Defined {}", definition.display(&self.symbols));
        self.cnf.fresh.push(var);
        self.cnf.definitions.push(definition);
        p
    }

    fn encode(mut self, nnf: Formula) -> Cnf {
        let root = self.load(nnf);
        let mut iterations = 0;
        while !self.is_cnf(root) {
            // A tree that is not CNF always contains a gate over two literals.
            let Some(id) = self.find_reducible(root) else {
                break;
            };
            self.reduce(id);
            iterations += 1;
        }

        for id in self.conjuncts(root) {
            let lits = self.clause_lits(id);
            self.cnf.add_clause(lits);
        }

        info!(
            "Tseitin: {} iterations, {} fresh variables, {} clauses",
            iterations,
            self.cnf.num_fresh(),
            self.cnf.num_clauses()
        );
        self.cnf.symbols = self.symbols;
        self.cnf
    }
}

impl Formula {
    /// Tseitin conversion. The result is equisatisfiable with `self`, with linear size.
    ///
    /// Fresh names never clash with atoms of `self`; numbering restarts on every call.
    pub fn to_tseitin(self, limits: &Limits, options: &TseitinOptions) -> Result<Cnf> {
        limits.check_formula(&self)?;
        let atoms = self.atoms();
        let nnf = self.eliminate_implications().to_nnf();
        limits.check_size(nnf.size())?;
        debug!("Tseitin input in NNF: {nnf}");
        Ok(TseitinEncoder::new(&atoms, options).encode(nnf))
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use test_log::test;

    use super::*;
    use crate::eval::assignments;
    use crate::limits::DEFAULT_LIMITS;

    fn tseitin(s: &str) -> Cnf {
        Formula::parse(s)
            .unwrap()
            .to_tseitin(&DEFAULT_LIMITS, &TseitinOptions::default())
            .unwrap()
    }

    fn lines(cnf: &Cnf) -> Vec<String> {
        cnf.iter().map(|c| c.display(&cnf.symbols).to_string()).collect()
    }

    #[test]
    fn test_single_atom() {
        let cnf = tseitin("A");
        assert_eq!(cnf.num_fresh(), 0);
        assert_eq!(lines(&cnf), vec!["A"]);
    }

    #[test]
    fn test_negated_atom() {
        let cnf = tseitin("!!!A");
        assert_eq!(lines(&cnf), vec!["!A"]);
    }

    #[test]
    fn test_conjunction() {
        let cnf = tseitin("A & B");
        assert_eq!(cnf.num_fresh(), 0);
        assert_eq!(lines(&cnf), vec!["A", "B"]);
    }

    #[test]
    fn test_disjunction() {
        let cnf = tseitin("A | !B");
        assert_eq!(cnf.num_fresh(), 0);
        assert_eq!(lines(&cnf), vec!["A | !B"]);
    }

    #[test]
    fn test_already_cnf_is_kept() {
        let cnf = tseitin("(A | !B) & (C | D)");
        assert_eq!(cnf.num_fresh(), 0);
        assert_eq!(lines(&cnf), vec!["A | !B", "C | D"]);
    }

    #[test]
    fn test_nested() {
        let cnf = tseitin("(A & B) | C");
        assert_eq!(lines(&cnf), vec!["!p1 | A", "!p1 | B", "p1 | !A | !B", "p1 | C"]);
        assert_eq!(cnf.num_fresh(), 1);
        assert_eq!(cnf.num_vars(), 4);
        assert_eq!(cnf.definitions[0].display(&cnf.symbols).to_string(), "p1 <-> (A & B)");
    }

    #[test]
    fn test_stops_once_cnf() {
        // After `A & B` becomes `p1`, `(p1 | C) & (D | E)` is already a conjunction of clauses.
        let cnf = tseitin("((A & B) | C) & (D | E)");
        assert_eq!(cnf.num_fresh(), 1);
        assert_eq!(lines(&cnf)[3..], ["p1 | C", "D | E"]);
    }

    #[test]
    fn test_leftmost_first() {
        let cnf = tseitin("(A & B) | (C & D) | E");
        let names = cnf.fresh.iter().map(|&v| cnf.symbols.name(v)).collect_vec();
        assert_eq!(names, vec!["p1", "p2"]);
        assert_eq!(cnf.definitions[0].display(&cnf.symbols).to_string(), "p1 <-> (A & B)");
        assert_eq!(cnf.definitions[1].display(&cnf.symbols).to_string(), "p2 <-> (C & D)");
        assert_eq!(lines(&cnf).last().unwrap(), "p1 | p2 | E");
    }

    #[test]
    fn test_preprocessing_eliminates_implications() {
        let cnf = tseitin("(A -> B) -> C");
        assert_eq!(cnf.definitions[0].display(&cnf.symbols).to_string(), "p1 <-> (A & !B)");
        assert_eq!(lines(&cnf).last().unwrap(), "p1 | C");
    }

    #[test]
    fn test_repeated_subformula_reuses_proxy() {
        let cnf = tseitin("(A & B) | !(!A | !B)");
        // Both operands are `A & B` after NNF.
        assert_eq!(cnf.num_fresh(), 1);
        assert_eq!(cnf.num_clauses(), 4);
        assert_eq!(lines(&cnf).last().unwrap(), "p1 | p1");
    }

    #[test]
    fn test_fresh_names_avoid_input_atoms() {
        let cnf = tseitin("p1 & p2 | p3 & p5");
        let names = cnf.fresh.iter().map(|&v| cnf.symbols.name(v)).collect_vec();
        assert_eq!(names, vec!["p4", "p6"]);
    }

    #[test]
    fn test_custom_prefix() {
        let options = TseitinOptions { prefix: "t".to_string() };
        let cnf = Formula::parse("A & B | C").unwrap().to_tseitin(&DEFAULT_LIMITS, &options).unwrap();
        assert_eq!(cnf.symbols.name(cnf.fresh[0]), "t1");
    }

    #[test]
    fn test_numbering_restarts_per_call() {
        let first = tseitin("A & B | C");
        let second = tseitin("C | D & E");
        assert_eq!(first.symbols.name(first.fresh[0]), "p1");
        assert_eq!(second.symbols.name(second.fresh[0]), "p1");
    }

    #[test]
    fn test_models_extend_to_clauses() {
        let f = Formula::parse("(A <-> B) | !(C & A)").unwrap();
        let cnf = f.clone().to_tseitin(&DEFAULT_LIMITS, &TseitinOptions::default()).unwrap();
        for a in assignments(&f.atoms()) {
            let full = cnf.extend(&a);
            assert_eq!(f.eval(&a), cnf.eval(&full), "assignment {a}");
        }
    }

    #[test]
    fn test_unsatisfiable_stays_unsatisfiable() {
        let f = Formula::parse("A & !A").unwrap();
        let cnf = f.to_tseitin(&DEFAULT_LIMITS, &TseitinOptions::default()).unwrap();
        let names = cnf.var_names();
        assert!(!assignments(&names).any(|a| cnf.eval(&a)));
        assert_eq!(cnf.original_names(), vec!["A"]);
    }
}
