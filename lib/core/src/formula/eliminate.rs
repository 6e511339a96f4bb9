use crate::formula::expr::Formula;

enum Task<'a> {
    Visit(&'a Formula),
    Combine(&'a Formula),
}

impl Formula {
    /// Rewrites `A -> B` into `!A | B` and `A <-> B` into `(!A | B) & (!B | A)`, bottom-up.
    pub fn eliminate_implications(self) -> Formula {
        match self {
            Formula::Var(_) => self,
            Formula::Not { arg } => Formula::not(arg.eliminate_implications()),
            Formula::And { lhs, rhs } => Formula::and(lhs.eliminate_implications(), rhs.eliminate_implications()),
            Formula::Or { lhs, rhs } => Formula::or(lhs.eliminate_implications(), rhs.eliminate_implications()),
            Formula::Implies { lhs, rhs } => {
                let a = lhs.eliminate_implications();
                let b = rhs.eliminate_implications();
                Formula::or(Formula::not(a), b)
            }
            Formula::Iff { lhs, rhs } => {
                let a = lhs.eliminate_implications();
                let b = rhs.eliminate_implications();
                Formula::and(Formula::or(Formula::not(a.clone()), b.clone()), Formula::or(Formula::not(b), a))
            }
        }
    }

    /// Size and depth of `self.eliminate_implications()`, computed without building it.
    ///
    /// Every `<->` copies both operands, so a chain of equivalences grows exponentially; the
    /// arithmetic saturates instead of overflowing.
    pub fn eliminated_shape(&self) -> (usize, usize) {
        let mut results: Vec<(usize, usize)> = Vec::new();
        let mut tasks = vec![Task::Visit(self)];
        while let Some(task) = tasks.pop() {
            match task {
                Task::Visit(f) => {
                    tasks.push(Task::Combine(f));
                    let (lhs, rhs) = f.children();
                    tasks.extend(rhs.map(Task::Visit));
                    tasks.extend(lhs.map(Task::Visit));
                }
                Task::Combine(f) => {
                    let shape = match f {
                        Formula::Var(_) => (1, 1),
                        Formula::Not { .. } => {
                            let (size, depth) = results.pop().unwrap_or_default();
                            (size.saturating_add(1), depth + 1)
                        }
                        _ => {
                            let (b, bd) = results.pop().unwrap_or_default();
                            let (a, ad) = results.pop().unwrap_or_default();
                            let sum = a.saturating_add(b);
                            match f {
                                // `!A | B`
                                Formula::Implies { .. } => (sum.saturating_add(2), (ad + 2).max(bd + 1)),
                                // `(!A | B) & (!B | A)`
                                Formula::Iff { .. } => (sum.saturating_mul(2).saturating_add(5), ad.max(bd) + 3),
                                _ => (sum.saturating_add(1), ad.max(bd) + 1),
                            }
                        }
                    };
                    results.push(shape);
                }
            }
        }
        results.pop().unwrap_or_default()
    }

    /// Whether the formula uses only `!`, `&`, `|` and variables.
    pub fn is_implication_free(&self) -> bool {
        match self {
            Formula::Var(_) => true,
            Formula::Not { arg } => arg.is_implication_free(),
            Formula::And { lhs, rhs } | Formula::Or { lhs, rhs } => lhs.is_implication_free() && rhs.is_implication_free(),
            Formula::Implies { .. } | Formula::Iff { .. } => false,
        }
    }
}
