use std::fmt::{Display, Formatter};
use std::slice::Iter;

use itertools::Itertools;

use crate::eval::Assignment;
use crate::formula::var::SymbolTable;
use crate::lit::Lit;

/// Disjunction of literals.
#[derive(Debug, Clone)]
pub struct Clause {
    pub lits: Vec<Lit>,
}

impl Clause {
    pub fn new(lits: Vec<Lit>) -> Self {
        debug_assert!(!lits.is_empty(), "Clause must be non-empty");
        Clause { lits }
    }

    pub fn iter(&self) -> Iter<'_, Lit> {
        self.lits.iter()
    }

    pub fn len(&self) -> usize {
        self.lits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lits.is_empty()
    }

    pub fn eval(&self, symbols: &SymbolTable, assignment: &Assignment) -> bool {
        self.lits
            .iter()
            .any(|lit| lit.apply(assignment.value(symbols.name(lit.var()))))
    }

    /// Renders the clause with atom names, e.g. `!p1 | A`.
    pub fn display<'a>(&'a self, symbols: &'a SymbolTable) -> DisplayClause<'a> {
        DisplayClause { clause: self, symbols }
    }
}

impl<I> From<I> for Clause
where
    I: IntoIterator,
    I::Item: Into<Lit>,
{
    fn from(iter: I) -> Self {
        Self::new(iter.into_iter().map_into::<Lit>().collect())
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_list();
        for lit in self.lits.iter() {
            list.entry(&format_args!("{}", lit));
        }
        list.finish()
    }
}

impl PartialEq for Clause {
    fn eq(&self, other: &Self) -> bool {
        if self.lits.len() != other.lits.len() {
            return false;
        }
        let lhs = self.lits.iter().copied().sorted_unstable();
        let rhs = other.lits.iter().copied().sorted_unstable();
        itertools::equal(lhs, rhs)
    }
}

impl Eq for Clause {}

pub struct DisplayClause<'a> {
    clause: &'a Clause,
    symbols: &'a SymbolTable,
}

pub const LIT_SEPARATOR: &str = " | ";

impl Display for DisplayClause<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let lits = self.clause.iter().format_with(LIT_SEPARATOR, |lit, f| {
            let name = self.symbols.name(lit.var());
            if lit.is_negated() {
                f(&format_args!("!{name}"))
            } else {
                f(&name)
            }
        });
        write!(f, "{lits}")
    }
}
