use log::info;

use crate::error::Result;
use crate::limits::Limits;

use self::expr::Formula;

#[cfg(any(test, feature = "arbitrary"))]
pub mod arbitrary;
pub mod distribute;
pub mod eliminate;
pub mod expr;
pub mod nnf;
pub mod shape;
pub mod var;

impl Formula {
    /// Classical conversion: implication elimination, NNF, then distribution.
    ///
    /// The result is logically equivalent to `self` and may be exponentially larger.
    pub fn to_cnf(self, limits: &Limits) -> Result<Formula> {
        limits.check_formula(&self)?;
        let size = self.size();
        let cnf = self.eliminate_implications().to_nnf().distribute(limits)?;
        info!("Classical CNF: {} -> {} nodes", size, cnf.size());
        Ok(cnf)
    }
}
