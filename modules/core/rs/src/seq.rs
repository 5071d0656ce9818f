use ahash::AHashMap;

use crate::loc::{Contig, Interval, IntervalOp};
use crate::num::Pos;

/// Reference sequences keyed by contig. Sequences are uppercased on insertion and never change
/// afterwards.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct SequenceStore<Ctg: Contig> {
    sequences: AHashMap<Ctg, Vec<u8>>,
}

impl<Ctg: Contig> SequenceStore<Ctg> {
    pub fn new() -> Self {
        Self {
            sequences: AHashMap::new(),
        }
    }

    /// Adds a sequence, replacing any previous sequence of the same contig.
    pub fn insert(&mut self, contig: Ctg, mut sequence: Vec<u8>) -> &mut Self {
        sequence.make_ascii_uppercase();
        self.sequences.insert(contig, sequence);
        self
    }

    pub fn get(&self, contig: &Ctg) -> Option<&[u8]> {
        self.sequences.get(contig).map(|x| x.as_slice())
    }

    /// Slice of the contig sequence covered by the interval, if it's fully inside the sequence.
    pub fn fetch(&self, contig: &Ctg, interval: &Interval<Pos>) -> Option<&[u8]> {
        let sequence = self.get(contig)?;
        let bounds = Interval::new(0, sequence.len() as Pos).ok()?;
        if !bounds.envelops(interval) {
            return None;
        }
        Some(&sequence[interval.start() as usize..interval.end() as usize])
    }

    pub fn contains(&self, contig: &Ctg) -> bool {
        self.sequences.contains_key(contig)
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }
}

impl<Ctg: Contig> FromIterator<(Ctg, Vec<u8>)> for SequenceStore<Ctg> {
    fn from_iter<T: IntoIterator<Item = (Ctg, Vec<u8>)>>(iter: T) -> Self {
        let mut store = SequenceStore::new();
        for (contig, sequence) in iter {
            store.insert(contig, sequence);
        }
        store
    }
}
