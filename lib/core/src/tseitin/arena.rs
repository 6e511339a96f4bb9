use std::ops::{Index, IndexMut};

pub type Id = u32;

/// Append-only node store addressed by 1-based ids.
#[derive(Debug)]
pub struct Arena<T> {
    items: Vec<T>,
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn alloc(&mut self, item: T) -> Id {
        self.items.push(item);
        self.items.len() as Id
    }

    pub fn get(&self, index: Id) -> &T {
        assert_ne!(index, 0);
        &self.items[index as usize - 1]
    }

    pub fn get_mut(&mut self, index: Id) -> &mut T {
        assert_ne!(index, 0);
        &mut self.items[index as usize - 1]
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<Id> for Arena<T> {
    type Output = T;

    fn index(&self, index: Id) -> &Self::Output {
        self.get(index)
    }
}

impl<T> IndexMut<Id> for Arena<T> {
    fn index_mut(&mut self, index: Id) -> &mut Self::Output {
        self.get_mut(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_start_at_one() {
        let mut arena = Arena::new();
        assert_eq!(arena.alloc("a"), 1);
        assert_eq!(arena.alloc("b"), 2);
        assert_eq!(arena[2], "b");
        arena[1] = "c";
        assert_eq!(arena[1], "c");
    }
}
