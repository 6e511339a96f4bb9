use std::fmt::{Display, Formatter};

use crate::eval::Assignment;
use crate::formula::var::{SymbolTable, Var};
use crate::lit::Lit;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Connective {
    And,
    Or,
}

impl Display for Connective {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Connective::And => write!(f, "&"),
            Connective::Or => write!(f, "|"),
        }
    }
}

/// Records that the fresh variable `var` stands for `lhs <connective> rhs`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Definition {
    pub var: Var,
    pub connective: Connective,
    pub lhs: Lit,
    pub rhs: Lit,
}

impl Definition {
    /// Value of the defined subformula under `assignment`.
    pub fn eval(&self, symbols: &SymbolTable, assignment: &Assignment) -> bool {
        let value = |lit: Lit| lit.apply(assignment.value(symbols.name(lit.var())));
        match self.connective {
            Connective::And => value(self.lhs) && value(self.rhs),
            Connective::Or => value(self.lhs) || value(self.rhs),
        }
    }

    pub fn display<'a>(&'a self, symbols: &'a SymbolTable) -> DisplayDefinition<'a> {
        DisplayDefinition { definition: self, symbols }
    }
}

pub struct DisplayDefinition<'a> {
    definition: &'a Definition,
    symbols: &'a SymbolTable,
}

impl Display for DisplayDefinition<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let lit = |lit: Lit| {
            let name = self.symbols.name(lit.var());
            if lit.is_negated() {
                format!("!{name}")
            } else {
                name.to_string()
            }
        };
        let d = self.definition;
        write!(
            f,
            "{} <-> ({} {} {})",
            self.symbols.name(d.var),
            lit(d.lhs),
            d.connective,
            lit(d.rhs)
        )
    }
}
