use crate::error::{ResourceExhaustedSnafu, Resource, Result};
use crate::formula::expr::Formula;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum nesting of parentheses, negations and `->`/`<->` chains in the input text.
    pub max_nesting: usize,
    /// Maximum depth of a formula tree handed to the recursive passes.
    pub max_depth: usize,
    /// Maximum number of nodes the distribution pass may produce.
    pub max_nodes: usize,
}

pub const DEFAULT_LIMITS: Limits = Limits {
    max_nesting: expr_parser::DEFAULT_MAX_DEPTH,
    max_depth: 1024,
    max_nodes: 1_000_000,
};

impl Default for Limits {
    fn default() -> Self {
        DEFAULT_LIMITS
    }
}

impl Limits {
    pub fn check_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_depth {
            return ResourceExhaustedSnafu {
                resource: Resource::Depth,
                limit: self.max_depth,
            }
            .fail();
        }
        Ok(())
    }

    /// Checks `formula` and the implication-free formula it expands to.
    pub fn check_formula(&self, formula: &Formula) -> Result<()> {
        self.check_depth(formula.depth())?;
        self.check_size(formula.size())?;
        let (size, depth) = formula.eliminated_shape();
        self.check_depth(depth)?;
        self.check_size(size)
    }

    pub fn check_size(&self, size: usize) -> Result<()> {
        if size > self.max_nodes {
            return ResourceExhaustedSnafu {
                resource: Resource::Nodes,
                limit: self.max_nodes,
            }
            .fail();
        }
        Ok(())
    }
}
