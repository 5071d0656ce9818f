use std::collections::btree_map;
use std::collections::BTreeMap;

use crate::num::{Count, Pos};

/// Sparse position -> count multiset of anchors ("wig").
///
/// Only positive counts are stored. Iteration is ordered by position, which keeps every
/// downstream random draw reproducible for a fixed seed.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Wig {
    counts: BTreeMap<Pos, Count>,
}

impl Wig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `count` anchors at `pos`. Zero counts are ignored.
    pub fn add(&mut self, pos: Pos, count: Count) -> &mut Self {
        if count > 0 {
            *self.counts.entry(pos).or_insert(0) += count;
        }
        self
    }

    /// Replaces the count at `pos`. Setting zero removes the position.
    pub fn set(&mut self, pos: Pos, count: Count) -> &mut Self {
        if count == 0 {
            self.counts.remove(&pos);
        } else {
            self.counts.insert(pos, count);
        }
        self
    }

    pub fn get(&self, pos: Pos) -> Count {
        self.counts.get(&pos).copied().unwrap_or(0)
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.counts.contains_key(&pos)
    }

    /// Total number of anchors.
    pub fn mass(&self) -> Count {
        self.counts.values().sum()
    }

    /// Number of distinct positions.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Pos, Count)> + '_ {
        self.counts.iter().map(|(pos, cnt)| (*pos, *cnt))
    }

    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        self.counts.keys().copied()
    }
}

impl FromIterator<(Pos, Count)> for Wig {
    fn from_iter<T: IntoIterator<Item = (Pos, Count)>>(iter: T) -> Self {
        let mut wig = Wig::new();
        wig.extend(iter);
        wig
    }
}

impl Extend<(Pos, Count)> for Wig {
    fn extend<T: IntoIterator<Item = (Pos, Count)>>(&mut self, iter: T) {
        for (pos, cnt) in iter {
            self.add(pos, cnt);
        }
    }
}

impl IntoIterator for Wig {
    type Item = (Pos, Count);
    type IntoIter = btree_map::IntoIter<Pos, Count>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.into_iter()
    }
}
