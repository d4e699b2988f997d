//! Bidirectional id index
//!
//! A `Relation<L, R>` records links between left ids and right ids and keeps
//! both directions in one structure, so a link can only ever be added or
//! removed on both sides at once. Each side keeps its partners in insertion
//! order, and the relation as a whole remembers the order links were made.

use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct Relation<L, R> {
    forward: BTreeMap<L, Vec<R>>,
    backward: BTreeMap<R, Vec<L>>,
    order: Vec<(L, R)>,
}

impl<L, R> Default for Relation<L, R> {
    fn default() -> Self {
        Self {
            forward: BTreeMap::new(),
            backward: BTreeMap::new(),
            order: Vec::new(),
        }
    }
}

impl<L: Ord + Copy, R: Ord + Copy> Relation<L, R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Link `left` and `right`; returns false if they were already linked
    pub fn link(&mut self, left: L, right: R) -> bool {
        if self.contains(left, right) {
            return false;
        }
        self.forward.entry(left).or_default().push(right);
        self.backward.entry(right).or_default().push(left);
        self.order.push((left, right));
        true
    }

    /// Remove the link between `left` and `right`; returns false if absent
    pub fn unlink(&mut self, left: L, right: R) -> bool {
        if !self.contains(left, right) {
            return false;
        }
        remove_from(&mut self.forward, left, right);
        remove_from(&mut self.backward, right, left);
        self.order.retain(|link| *link != (left, right));
        true
    }

    pub fn contains(&self, left: L, right: R) -> bool {
        self.forward
            .get(&left)
            .map_or(false, |rights| rights.contains(&right))
    }

    /// Right-hand partners of `left`, in link order
    pub fn right_of(&self, left: L) -> &[R] {
        self.forward.get(&left).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Left-hand partners of `right`, in link order
    pub fn left_of(&self, right: R) -> &[L] {
        self.backward.get(&right).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Drop every link of `left`, returning its former partners
    pub fn remove_left(&mut self, left: L) -> Vec<R> {
        let rights = self.forward.remove(&left).unwrap_or_default();
        for right in &rights {
            remove_from(&mut self.backward, *right, left);
        }
        self.order.retain(|(l, _)| *l != left);
        rights
    }

    /// Drop every link of `right`, returning its former partners
    pub fn remove_right(&mut self, right: R) -> Vec<L> {
        let lefts = self.backward.remove(&right).unwrap_or_default();
        for left in &lefts {
            remove_from(&mut self.forward, *left, right);
        }
        self.order.retain(|(_, r)| *r != right);
        lefts
    }

    /// Total number of links
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// All links as `(left, right)` pairs in the order they were made.
    /// Relinking in this order rebuilds both sides exactly.
    pub fn pairs(&self) -> impl Iterator<Item = (L, R)> + '_ {
        self.order.iter().copied()
    }
}

fn remove_from<K: Ord, V: PartialEq>(map: &mut BTreeMap<K, Vec<V>>, key: K, value: V) {
    if let Some(values) = map.get_mut(&key) {
        values.retain(|v| *v != value);
        if values.is_empty() {
            map.remove(&key);
        }
    }
}
