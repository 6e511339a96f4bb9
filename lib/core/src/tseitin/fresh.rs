use std::collections::HashSet;

/// Supply of proposition names `<prefix>1, <prefix>2, ...` that avoids a set of taken names.
#[derive(Debug)]
pub struct FreshVars {
    prefix: String,
    next: usize,
    taken: HashSet<String>,
}

impl FreshVars {
    pub fn new<I>(prefix: impl Into<String>, taken: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            prefix: prefix.into(),
            next: 1,
            taken: taken.into_iter().map(Into::into).collect(),
        }
    }

    pub fn mint(&mut self) -> String {
        loop {
            let name = format!("{}{}", self.prefix, self.next);
            self.next += 1;
            if self.taken.insert(name.clone()) {
                return name;
            }
        }
    }
}
