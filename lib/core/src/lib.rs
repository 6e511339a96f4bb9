//! Conversion of propositional formulas to conjunctive normal form.
//!
//! Two pipelines are provided:
//! - [`classical_cnf`]: implication elimination, negation normal form and distribution.
//!   The result is logically equivalent to the input, but may be exponentially larger.
//! - [`tseitin_cnf`]: the Tseitin transformation. The result is only equisatisfiable,
//!   but its size is linear in the size of the input.

pub mod cnf;
pub mod error;
pub mod eval;
pub mod formula;
pub mod limits;
pub mod lit;
pub mod tseitin;

pub use cnf::clause::Clause;
pub use cnf::definition::{Connective, Definition};
pub use cnf::Cnf;
pub use error::{CnfError, Resource, Result};
pub use eval::Assignment;
pub use formula::expr::Formula;
pub use formula::var::{SymbolTable, Var};
pub use limits::{Limits, DEFAULT_LIMITS};
pub use lit::Lit;
pub use tseitin::TseitinOptions;

pub fn classical_cnf(input: &str) -> Result<Formula> {
    classical_cnf_with(input, &DEFAULT_LIMITS)
}

/// Parses `input` and converts it to an equivalent formula in CNF.
pub fn classical_cnf_with(input: &str, limits: &Limits) -> Result<Formula> {
    Formula::parse_with(input, limits)?.to_cnf(limits)
}

pub fn tseitin_cnf(input: &str) -> Result<Cnf> {
    tseitin_cnf_with(input, &DEFAULT_LIMITS, &TseitinOptions::default())
}

/// Parses `input` and applies the Tseitin transformation.
pub fn tseitin_cnf_with(input: &str, limits: &Limits, options: &TseitinOptions) -> Result<Cnf> {
    Formula::parse_with(input, limits)?.to_tseitin(limits, options)
}
