use std::fmt::{Display, Formatter};

use snafu::Snafu;

use expr_parser::{LexError, ParseError};

pub type Result<T, E = CnfError> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum CnfError {
    #[snafu(context(false), display("Lexical error: {}", source))]
    Lex { source: LexError },

    #[snafu(context(false), display("Parse error: {}", source))]
    Parse { source: ParseError },

    #[snafu(display("Resource exhausted: {} exceeds the limit of {}", resource, limit))]
    ResourceExhausted { resource: Resource, limit: usize },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Resource {
    /// Nesting depth of the input or of a formula tree.
    Depth,
    /// Number of nodes produced during distribution.
    Nodes,
}

impl Display for Resource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Resource::Depth => write!(f, "formula depth"),
            Resource::Nodes => write!(f, "formula size"),
        }
    }
}

impl From<expr_parser::Error> for CnfError {
    fn from(e: expr_parser::Error) -> Self {
        match e {
            expr_parser::Error::Lex { source } => CnfError::Lex { source },
            expr_parser::Error::Parse {
                source: ParseError::TooDeep { limit, .. },
            } => CnfError::ResourceExhausted {
                resource: Resource::Depth,
                limit,
            },
            expr_parser::Error::Parse { source } => CnfError::Parse { source },
        }
    }
}

impl CnfError {
    pub fn is_resource_exhausted(&self) -> bool {
        matches!(self, CnfError::ResourceExhausted { .. })
    }

    /// Character offset in the input where lexing or parsing failed.
    pub fn position(&self) -> Option<usize> {
        match self {
            CnfError::Lex { source } => Some(source.position()),
            CnfError::Parse { source } => source.position(),
            CnfError::ResourceExhausted { .. } => None,
        }
    }
}
