use crate::tree::types::IndexError;
use std::iter::FusedIterator;

/// One-shot cursor over a traversal that was fully materialized up front.
///
/// The cursor only moves forward; traverse the index again for a fresh one.
#[derive(Debug, Clone)]
pub struct Traversal<'a, K> {
    entries: Vec<&'a K>,
    position: usize,
}

impl<'a, K> Traversal<'a, K> {
    pub(crate) fn new(entries: Vec<&'a K>) -> Self {
        Self {
            entries,
            position: 0,
        }
    }

    pub fn has_next(&self) -> bool {
        self.position < self.entries.len()
    }

    /// Advance the cursor, failing once every entry has been handed out
    pub fn next_entry(&mut self) -> Result<&'a K, IndexError> {
        let entry = self
            .entries
            .get(self.position)
            .copied()
            .ok_or(IndexError::Exhausted)?;
        self.position += 1;
        Ok(entry)
    }
}

impl<'a, K> Iterator for Traversal<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_entry().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.entries.len() - self.position;
        (remaining, Some(remaining))
    }
}

impl<K> ExactSizeIterator for Traversal<'_, K> {}

impl<K> FusedIterator for Traversal<'_, K> {}

#[cfg(test)]
mod tests {
    use crate::tree::{IndexError, OrderedIndex, TraversalOrder};

    #[test]
    fn test_cursor_exhaustion() {
        let index: OrderedIndex<char> = ['b', 'a', 'c'].into_iter().collect();
        let mut cursor = index.in_order();

        assert!(cursor.has_next());
        assert_eq!(cursor.next_entry(), Ok(&'a'));
        assert_eq!(cursor.next_entry(), Ok(&'b'));
        assert_eq!(cursor.next_entry(), Ok(&'c'));
        assert!(!cursor.has_next());
        assert_eq!(cursor.next_entry(), Err(IndexError::Exhausted));
        assert_eq!(cursor.next(), None);
    }

    #[test]
    fn test_empty_cursor() {
        let index: OrderedIndex<u8> = OrderedIndex::new();
        for order in [
            TraversalOrder::InOrder,
            TraversalOrder::PreOrder,
            TraversalOrder::PostOrder,
        ] {
            let mut cursor = index.traverse(order);
            assert!(!cursor.has_next());
            assert_eq!(cursor.next_entry(), Err(IndexError::Exhausted));
        }
    }

    #[test]
    fn test_cursor_is_not_restartable() {
        let index: OrderedIndex<u8> = [2, 1].into_iter().collect();
        let mut cursor = index.in_order();
        assert_eq!(cursor.len(), 2);
        cursor.by_ref().for_each(drop);
        assert_eq!(cursor.len(), 0);
        assert!(!cursor.has_next());

        // A fresh traversal starts from the beginning again
        assert_eq!(index.in_order().next(), Some(&1));
    }

    #[test]
    fn test_fresh_traversal_sees_new_keys() {
        let mut index: OrderedIndex<u8> = [5, 3].into_iter().collect();
        let keys: Vec<u8> = index.pre_order().copied().collect();
        index.add(4);
        assert_eq!(keys, vec![5, 3]);
        assert_eq!(index.pre_order().copied().collect::<Vec<_>>(), vec![5, 3, 4]);
    }
}
