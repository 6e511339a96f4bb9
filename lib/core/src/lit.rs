use std::fmt::{Display, Formatter};
use std::ops::Neg;

use crate::formula::var::Var;

/// Signed reference to a variable: positive for the atom, negative for its negation.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct Lit(i32);

impl Lit {
    pub const fn new(val: i32) -> Self {
        debug_assert!(val != 0, "literal must not be zero");
        Lit(val)
    }

    pub const fn from_var(var: Var, negated: bool) -> Self {
        let v = var.0 as i32;
        Lit::new(if negated { -v } else { v })
    }

    pub const fn get(self) -> i32 {
        self.0
    }

    pub const fn var(self) -> Var {
        Var(self.0.unsigned_abs())
    }

    pub const fn is_negated(self) -> bool {
        self.0 < 0
    }

    /// Truth value of the literal given the value of its variable.
    pub const fn apply(self, value: bool) -> bool {
        value != self.is_negated()
    }
}

impl Display for Lit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.get())
    }
}

impl From<i32> for Lit {
    fn from(val: i32) -> Self {
        Self::new(val)
    }
}

impl From<Lit> for i32 {
    fn from(lit: Lit) -> Self {
        lit.get()
    }
}

impl Neg for Lit {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lit_from_var() {
        assert_eq!(Lit::from_var(Var(3), false).get(), 3);
        assert_eq!(Lit::from_var(Var(3), true).get(), -3);
        assert_eq!(Var(3).neg().var(), Var(3));
    }

    #[test]
    fn test_lit_neg() {
        let lit = Var(42).pos();
        assert!(!lit.is_negated());
        assert!((-lit).is_negated());
        assert_eq!(-(-lit), lit);
    }

    #[test]
    fn test_lit_apply() {
        assert!(Var(1).pos().apply(true));
        assert!(!Var(1).pos().apply(false));
        assert!(Var(1).neg().apply(false));
        assert!(!Var(1).neg().apply(true));
    }

    #[test]
    fn test_lit_display() {
        assert_eq!(format!("{}", Lit::new(-7)), "-7");
    }
}
