use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use crate::lit::Lit;

/// Propositional variable, numbered from 1 as in DIMACS.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Var(pub u32);

impl Var {
    pub const fn index(self) -> usize {
        self.0 as usize - 1
    }

    pub fn pos(self) -> Lit {
        Lit::from_var(self, false)
    }

    pub fn neg(self) -> Lit {
        Lit::from_var(self, true)
    }
}

impl Display for Var {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if f.alternate() {
            write!(f, "x{}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Bijection between atom names and variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    names: Vec<String>,
    vars: HashMap<String, Var>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the variable for `name`, allocating the next one if the name is new.
    pub fn intern(&mut self, name: &str) -> Var {
        if let Some(&var) = self.vars.get(name) {
            return var;
        }
        self.names.push(name.to_string());
        let var = Var(self.names.len() as u32);
        self.vars.insert(name.to_string(), var);
        var
    }

    pub fn var(&self, name: &str) -> Option<Var> {
        self.vars.get(name).copied()
    }

    pub fn name(&self, var: Var) -> &str {
        &self.names[var.index()]
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Var, &str)> {
        self.names.iter().enumerate().map(|(i, name)| (Var(i as u32 + 1), name.as_str()))
    }
}
