use std::collections::HashSet;

use gridstar_core::Cell;

/// Cells whose cost is final. Also remembers the order they were expanded in,
/// for front ends that want to animate or colour the search.
#[derive(Clone, Debug, Default)]
pub struct ClosedSet {
    members: HashSet<Cell>,
    order: Vec<Cell>,
}

impl ClosedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Close `cell`. Returns `false` if it was already closed.
    pub fn insert(&mut self, cell: Cell) -> bool {
        if !self.members.insert(cell) {
            return false;
        }
        self.order.push(cell);
        true
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        self.members.contains(&cell)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Closed cells in expansion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.order.iter()
    }

    /// Closed cells in expansion order.
    pub fn as_slice(&self) -> &[Cell] {
        &self.order
    }

    /// Membership view.
    pub fn as_set(&self) -> &HashSet<Cell> {
        &self.members
    }
}

impl<'a> IntoIterator for &'a ClosedSet {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_once() {
        let mut closed = ClosedSet::new();
        assert!(closed.insert(Cell::new(1, 2)));
        assert!(closed.insert(Cell::new(0, 0)));
        assert!(!closed.insert(Cell::new(1, 2)));
        assert_eq!(closed.len(), 2);
        assert!(closed.contains(Cell::new(0, 0)));
        assert!(!closed.contains(Cell::new(2, 2)));
        assert_eq!(closed.as_slice(), &[Cell::new(1, 2), Cell::new(0, 0)]);
    }
}
