use std::fmt::{Display, Formatter};
use std::slice::Iter;

use itertools::Itertools;

use clause::Clause;
use definition::Definition;

use crate::eval::Assignment;
use crate::formula::expr::Formula;
use crate::formula::var::{SymbolTable, Var};

pub mod clause;
pub mod definition;

/// Conjunction of clauses over named atoms.
///
/// For Tseitin results, `fresh` lists the introduced variables and `definitions` what each one stands for.
#[derive(Debug, Clone, Default)]
pub struct Cnf {
    pub symbols: SymbolTable,
    pub clauses: Vec<Clause>,
    pub fresh: Vec<Var>,
    pub definitions: Vec<Definition>,
}

impl Cnf {
    pub fn new(symbols: SymbolTable) -> Self {
        Self {
            symbols,
            ..Self::default()
        }
    }

    /// Collects the clauses of a formula in CNF. Returns `None` if the formula is not in CNF.
    pub fn from_formula(formula: &Formula) -> Option<Self> {
        let mut symbols = SymbolTable::new();
        for atom in formula.atoms() {
            symbols.intern(&atom);
        }
        let mut cnf = Cnf::new(symbols);
        for lits in formula.clauses()? {
            let clause = lits
                .into_iter()
                .filter_map(|lit| lit.as_literal())
                .map(|(name, negated)| {
                    let var = cnf.symbols.intern(name);
                    if negated {
                        var.neg()
                    } else {
                        var.pos()
                    }
                })
                .collect_vec();
            cnf.add_clause(clause);
        }
        Some(cnf)
    }

    pub fn iter(&self) -> Iter<'_, Clause> {
        self.clauses.iter()
    }

    pub fn add_clause(&mut self, clause: impl Into<Clause>) {
        self.clauses.push(clause.into());
    }

    pub fn num_vars(&self) -> usize {
        self.symbols.len()
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    pub fn num_fresh(&self) -> usize {
        self.fresh.len()
    }

    /// Names of all variables, in numbering order.
    pub fn var_names(&self) -> Vec<String> {
        self.symbols.iter().map(|(_, name)| name.to_string()).collect()
    }

    /// Names of the variables that are not fresh.
    pub fn original_names(&self) -> Vec<String> {
        self.symbols
            .iter()
            .filter(|(var, _)| !self.fresh.contains(var))
            .map(|(_, name)| name.to_string())
            .collect()
    }

    pub fn eval(&self, assignment: &Assignment) -> bool {
        self.clauses.iter().all(|c| c.eval(&self.symbols, assignment))
    }

    /// Assigns every fresh variable the value of the subformula it stands for.
    pub fn extend(&self, assignment: &Assignment) -> Assignment {
        let mut full = assignment.clone();
        for d in self.definitions.iter() {
            let value = d.eval(&self.symbols, &full);
            full.set(self.symbols.name(d.var), value);
        }
        full
    }

    /// Renders as a single conjunction, e.g. `A & (!B | C)`, or `TRUE` when there are no clauses.
    pub fn display_inline(&self) -> DisplayInline<'_> {
        DisplayInline { cnf: self }
    }

    /// Renders in DIMACS CNF format, preceded by comments mapping variable numbers to names.
    pub fn dimacs(&self) -> DisplayDimacs<'_> {
        DisplayDimacs { cnf: self }
    }

    pub fn to_dimacs(&self) -> String {
        self.dimacs().to_string()
    }
}

impl Display for Cnf {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for clause in self.clauses.iter() {
            writeln!(f, "{}", clause.display(&self.symbols))?;
        }
        Ok(())
    }
}

pub struct DisplayDimacs<'a> {
    cnf: &'a Cnf,
}

impl Display for DisplayDimacs<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (var, name) in self.cnf.symbols.iter() {
            writeln!(f, "c {var} {name}")?;
        }
        writeln!(f, "p cnf {} {}", self.cnf.num_vars(), self.cnf.num_clauses())?;
        for clause in self.cnf.iter() {
            writeln!(f, "{} 0", clause.iter().join(" "))?;
        }
        Ok(())
    }
}

pub struct DisplayInline<'a> {
    cnf: &'a Cnf,
}

impl Display for DisplayInline<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.cnf.clauses.is_empty() {
            return write!(f, "TRUE");
        }
        let symbols = &self.cnf.symbols;
        let clauses = self.cnf.iter().format_with(" & ", |clause, f| {
            if clause.len() == 1 {
                f(&clause.display(symbols))
            } else {
                f(&format_args!("({})", clause.display(symbols)))
            }
        });
        write!(f, "{clauses}")
    }
}
