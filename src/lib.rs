pub use expr_parser as parser;
pub use prop_cnf_core as core;

pub use prop_cnf_core::{classical_cnf, classical_cnf_with, tseitin_cnf, tseitin_cnf_with};
