use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Stable identifier for an edge in an [`EdgeRing`].
    pub struct EdgeKey;
}

/// Index of the element before `i` in a cyclic sequence of length `n`.
#[must_use]
pub fn prev_index(i: usize, n: usize) -> usize {
    if i == 0 {
        n - 1
    } else {
        i - 1
    }
}

/// Index of the element after `i` in a cyclic sequence of length `n`.
#[must_use]
pub fn next_index(i: usize, n: usize) -> usize {
    if i + 1 == n {
        0
    } else {
        i + 1
    }
}

#[derive(Debug, Clone)]
struct RingNode<T> {
    value: T,
    prev: EdgeKey,
    next: EdgeKey,
}

/// Doubly-linked cyclic arena of edges.
///
/// Keys stay valid while other edges are removed, so a pass can walk a
/// snapshot of [`keys`](Self::keys) and unlink entries as it goes without
/// any index arithmetic.
#[derive(Debug, Clone)]
pub struct EdgeRing<T> {
    nodes: SlotMap<EdgeKey, RingNode<T>>,
    head: Option<EdgeKey>,
}

impl<T> Default for EdgeRing<T> {
    fn default() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            head: None,
        }
    }
}

impl<T> EdgeRing<T> {
    /// Builds a ring linking `values` in order, the last back to the first.
    pub fn from_values(values: impl IntoIterator<Item = T>) -> Self {
        let mut nodes = SlotMap::with_key();
        let keys: Vec<EdgeKey> = values
            .into_iter()
            .map(|value| {
                nodes.insert(RingNode {
                    value,
                    prev: EdgeKey::default(),
                    next: EdgeKey::default(),
                })
            })
            .collect();

        let n = keys.len();
        for (i, &key) in keys.iter().enumerate() {
            if let Some(node) = nodes.get_mut(key) {
                node.prev = keys[prev_index(i, n)];
                node.next = keys[next_index(i, n)];
            }
        }

        Self {
            nodes,
            head: keys.first().copied(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Key of the first edge in ring order.
    #[must_use]
    pub fn head(&self) -> Option<EdgeKey> {
        self.head
    }

    #[must_use]
    pub fn get(&self, key: EdgeKey) -> Option<&T> {
        self.nodes.get(key).map(|node| &node.value)
    }

    pub fn get_mut(&mut self, key: EdgeKey) -> Option<&mut T> {
        self.nodes.get_mut(key).map(|node| &mut node.value)
    }

    /// Key of the edge after `key`, or `None` if `key` has been removed.
    #[must_use]
    pub fn next(&self, key: EdgeKey) -> Option<EdgeKey> {
        self.nodes.get(key).map(|node| node.next)
    }

    /// Key of the edge before `key`, or `None` if `key` has been removed.
    #[must_use]
    pub fn prev(&self, key: EdgeKey) -> Option<EdgeKey> {
        self.nodes.get(key).map(|node| node.prev)
    }

    /// Unlinks `key` from the ring, joining its neighbours, and returns its value.
    pub fn remove(&mut self, key: EdgeKey) -> Option<T> {
        let node = self.nodes.remove(key)?;
        if self.nodes.is_empty() {
            self.head = None;
            return Some(node.value);
        }
        if let Some(prev) = self.nodes.get_mut(node.prev) {
            prev.next = node.next;
        }
        if let Some(next) = self.nodes.get_mut(node.next) {
            next.prev = node.prev;
        }
        if self.head == Some(key) {
            self.head = Some(node.next);
        }
        Some(node.value)
    }

    /// Keys in ring order, starting at the head.
    #[must_use]
    pub fn keys(&self) -> Vec<EdgeKey> {
        let mut keys = Vec::with_capacity(self.nodes.len());
        let mut cursor = self.head;
        while let Some(key) = cursor {
            if keys.len() == self.nodes.len() {
                break;
            }
            keys.push(key);
            cursor = self.next(key);
        }
        keys
    }

    /// Iterates over the values in ring order, starting at the head.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.keys().into_iter().filter_map(move |key| self.get(key))
    }

    /// Consumes the ring, returning its values in ring order.
    #[must_use]
    pub fn into_values(mut self) -> Vec<T> {
        self.keys()
            .into_iter()
            .filter_map(|key| self.nodes.remove(key).map(|node| node.value))
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn cyclic_index_helpers() {
        assert_eq!(prev_index(0, 4), 3);
        assert_eq!(prev_index(2, 4), 1);
        assert_eq!(next_index(3, 4), 0);
        assert_eq!(next_index(0, 1), 0);
    }

    #[test]
    fn ring_links_values_in_order() {
        let ring = EdgeRing::from_values([10, 20, 30]);
        assert_eq!(ring.len(), 3);
        let keys = ring.keys();
        assert_eq!(ring.next(keys[2]), Some(keys[0]));
        assert_eq!(ring.prev(keys[0]), Some(keys[2]));
        assert_eq!(ring.iter().copied().collect::<Vec<_>>(), vec![10, 20, 30]);
    }

    #[test]
    fn remove_relinks_neighbours() {
        let mut ring = EdgeRing::from_values(['a', 'b', 'c', 'd']);
        let keys = ring.keys();
        assert_eq!(ring.remove(keys[1]), Some('b'));
        assert_eq!(ring.next(keys[0]), Some(keys[2]));
        assert_eq!(ring.prev(keys[2]), Some(keys[0]));
        assert!(ring.next(keys[1]).is_none());
        assert!(ring.remove(keys[1]).is_none());
        assert_eq!(ring.into_values(), vec!['a', 'c', 'd']);
    }

    #[test]
    fn removing_head_advances_it() {
        let mut ring = EdgeRing::from_values([1, 2, 3]);
        let keys = ring.keys();
        ring.remove(keys[0]);
        assert_eq!(ring.head(), Some(keys[1]));
        assert_eq!(ring.next(keys[2]), Some(keys[1]));
        assert_eq!(ring.into_values(), vec![2, 3]);
    }

    #[test]
    fn removing_last_edge_empties_ring() {
        let mut ring = EdgeRing::from_values([7]);
        let key = ring.head().unwrap();
        assert_eq!(ring.next(key), Some(key));
        assert_eq!(ring.remove(key), Some(7));
        assert!(ring.is_empty());
        assert!(ring.head().is_none());
        assert!(ring.keys().is_empty());
    }

    #[test]
    fn get_mut_edits_in_place() {
        let mut ring = EdgeRing::from_values([1, 2]);
        let key = ring.head().unwrap();
        *ring.get_mut(key).unwrap() = 5;
        assert_eq!(ring.into_values(), vec![5, 2]);
    }

    #[test]
    fn empty_ring() {
        let ring: EdgeRing<u8> = EdgeRing::from_values([]);
        assert!(ring.is_empty());
        assert!(ring.head().is_none());
        assert!(ring.into_values().is_empty());
    }
}
