use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use std::ops;

use log::debug;
use tap::Tap;

use expr_parser::expr::{BinOp, Expr};

use crate::error::Result;
use crate::eval::Assignment;
use crate::limits::{Limits, DEFAULT_LIMITS};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Formula {
    Var(String),
    Not { arg: Box<Formula> },
    And { lhs: Box<Formula>, rhs: Box<Formula> },
    Or { lhs: Box<Formula>, rhs: Box<Formula> },
    Implies { lhs: Box<Formula>, rhs: Box<Formula> },
    Iff { lhs: Box<Formula>, rhs: Box<Formula> },
}

// Constructors
impl Formula {
    pub fn var(name: impl Into<String>) -> Self {
        Formula::Var(name.into())
    }

    pub fn not(arg: Self) -> Self {
        Formula::Not { arg: Box::new(arg) }
    }

    pub fn and(lhs: Self, rhs: Self) -> Self {
        Formula::And {
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn or(lhs: Self, rhs: Self) -> Self {
        Formula::Or {
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn implies(lhs: Self, rhs: Self) -> Self {
        Formula::Implies {
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn iff(lhs: Self, rhs: Self) -> Self {
        Formula::Iff {
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }
}

impl Formula {
    pub fn parse(input: &str) -> Result<Self> {
        Self::parse_with(input, &DEFAULT_LIMITS)
    }

    /// Parses `input` and rejects trees deeper than `limits.max_depth` before converting them.
    pub fn parse_with(input: &str, limits: &Limits) -> Result<Self> {
        let parsed = expr_parser::parse_expr_with_depth(input, limits.max_nesting)?;
        limits.check_depth(expr_depth(&parsed))?;
        Ok(Formula::from(parsed))
    }
}

fn expr_depth(expr: &Expr) -> usize {
    let mut max = 0;
    let mut stack = vec![(expr, 1)];
    while let Some((e, depth)) = stack.pop() {
        max = max.max(depth);
        match e {
            Expr::Var(_) => {}
            Expr::Negation { arg } => stack.push((arg, depth + 1)),
            Expr::BinOp { lhs, rhs, .. } => {
                stack.push((rhs, depth + 1));
                stack.push((lhs, depth + 1));
            }
        }
    }
    max
}

impl From<Expr> for Formula {
    fn from(parsed: Expr) -> Self {
        match parsed {
            Expr::Var(name) => Formula::Var(name),
            Expr::Negation { arg } => Formula::not(Formula::from(*arg)),
            Expr::BinOp { op, lhs, rhs } => {
                let lhs = Formula::from(*lhs);
                let rhs = Formula::from(*rhs);
                match op {
                    BinOp::And => Formula::and(lhs, rhs),
                    BinOp::Or => Formula::or(lhs, rhs),
                    BinOp::Imply => Formula::implies(lhs, rhs),
                    BinOp::Iff => Formula::iff(lhs, rhs),
                }
            }
        }
    }
}

// Queries
impl Formula {
    pub fn is_var(&self) -> bool {
        matches!(self, Formula::Var(_))
    }

    /// A literal is a variable or a negated variable.
    pub fn is_literal(&self) -> bool {
        match self {
            Formula::Var(_) => true,
            Formula::Not { arg } => arg.is_var(),
            _ => false,
        }
    }

    /// Name and polarity of a literal: `("A", false)` for `A`, `("A", true)` for `!A`.
    pub fn as_literal(&self) -> Option<(&str, bool)> {
        match self {
            Formula::Var(name) => Some((name, false)),
            Formula::Not { arg } => match arg.as_ref() {
                Formula::Var(name) => Some((name, true)),
                _ => None,
            },
            _ => None,
        }
    }

    pub(crate) fn children(&self) -> (Option<&Formula>, Option<&Formula>) {
        match self {
            Formula::Var(_) => (None, None),
            Formula::Not { arg } => (Some(arg), None),
            Formula::And { lhs, rhs }
            | Formula::Or { lhs, rhs }
            | Formula::Implies { lhs, rhs }
            | Formula::Iff { lhs, rhs } => (Some(lhs), Some(rhs)),
        }
    }

    /// Number of nodes in the tree.
    pub fn size(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(f) = stack.pop() {
            count += 1;
            let (lhs, rhs) = f.children();
            stack.extend(rhs);
            stack.extend(lhs);
        }
        count
    }

    /// Length of the longest root-to-leaf path, counting nodes.
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut stack = vec![(self, 1)];
        while let Some((f, depth)) = stack.pop() {
            max = max.max(depth);
            let (lhs, rhs) = f.children();
            stack.extend(rhs.map(|x| (x, depth + 1)));
            stack.extend(lhs.map(|x| (x, depth + 1)));
        }
        max
    }

    /// Distinct atom names in order of first (leftmost) occurrence.
    pub fn atoms(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut atoms = Vec::new();
        let mut stack = vec![self];
        while let Some(f) = stack.pop() {
            if let Formula::Var(name) = f {
                if seen.insert(name.as_str()) {
                    atoms.push(name.clone());
                }
            }
            let (lhs, rhs) = f.children();
            stack.extend(rhs);
            stack.extend(lhs);
        }
        atoms
    }

    pub fn eval(&self, assignment: &Assignment) -> bool {
        match self {
            Formula::Var(name) => assignment.value(name),
            Formula::Not { arg } => !arg.eval(assignment),
            Formula::And { lhs, rhs } => lhs.eval(assignment) && rhs.eval(assignment),
            Formula::Or { lhs, rhs } => lhs.eval(assignment) || rhs.eval(assignment),
            Formula::Implies { lhs, rhs } => !lhs.eval(assignment) || rhs.eval(assignment),
            Formula::Iff { lhs, rhs } => lhs.eval(assignment) == rhs.eval(assignment),
        }
        .tap(|x| debug!("Formula::eval({self}) = {x}"))
    }
}

impl From<&str> for Formula {
    fn from(name: &str) -> Self {
        Formula::var(name)
    }
}

impl Display for Formula {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if f.alternate() {
            match self {
                Formula::Var(name) => write!(f, "Var({name})"),
                Formula::Not { arg } => write!(f, "Not({arg:#})"),
                Formula::And { lhs, rhs } => write!(f, "And({lhs:#}, {rhs:#})"),
                Formula::Or { lhs, rhs } => write!(f, "Or({lhs:#}, {rhs:#})"),
                Formula::Implies { lhs, rhs } => write!(f, "Implies({lhs:#}, {rhs:#})"),
                Formula::Iff { lhs, rhs } => write!(f, "Iff({lhs:#}, {rhs:#})"),
            }
        } else {
            match self {
                Formula::Var(name) => write!(f, "{name}"),
                Formula::Not { arg } => write!(f, "!{arg}"),
                Formula::And { lhs, rhs } => write!(f, "({lhs} & {rhs})"),
                Formula::Or { lhs, rhs } => write!(f, "({lhs} | {rhs})"),
                Formula::Implies { lhs, rhs } => write!(f, "({lhs} -> {rhs})"),
                Formula::Iff { lhs, rhs } => write!(f, "({lhs} <-> {rhs})"),
            }
        }
    }
}

impl ops::Not for Formula {
    type Output = Self;

    fn not(self) -> Self::Output {
        Formula::not(self)
    }
}

impl ops::BitAnd for Formula {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Formula::and(self, rhs)
    }
}

impl ops::BitOr for Formula {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Formula::or(self, rhs)
    }
}
