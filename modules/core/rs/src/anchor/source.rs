use ahash::AHashMap;
use eyre::Result;

use crate::loc::{Contig, Interval, IntervalOp, Orientation};
use crate::num::Pos;

use super::record::AnchorRecord;

/// Anything that can answer "which reads of this orientation lie inside this window".
pub trait RecordSource<Ctg: Contig> {
    /// Appends to `into` every record of the given orientation on `contig` that lies completely
    /// inside `window`. Records are reported in a stable order.
    fn fetch(
        &mut self,
        contig: &Ctg,
        orientation: Orientation,
        window: &Interval<Pos>,
        into: &mut Vec<AnchorRecord>,
    ) -> Result<()>;
}

/// In-memory record source. Records are grouped by (contig, orientation) and sorted by start;
/// records with equal starts keep their insertion order.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct IndexedRecords<Ctg: Contig> {
    records: AHashMap<(Ctg, Orientation), Vec<AnchorRecord>>,
    sorted: bool,
}

impl<Ctg: Contig> IndexedRecords<Ctg> {
    pub fn new() -> Self {
        Self {
            records: AHashMap::new(),
            sorted: true,
        }
    }

    pub fn add(&mut self, contig: Ctg, record: AnchorRecord) -> &mut Self {
        self.records
            .entry((contig, *record.orientation()))
            .or_default()
            .push(record);
        self.sorted = false;
        self
    }

    /// Total number of stored records.
    pub fn len(&self) -> usize {
        self.records.values().map(|x| x.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.records.values().all(|x| x.is_empty())
    }

    fn sort(&mut self) {
        if !self.sorted {
            for records in self.records.values_mut() {
                records.sort_by_key(|x| x.start());
            }
            self.sorted = true;
        }
    }
}

impl<Ctg: Contig> RecordSource<Ctg> for IndexedRecords<Ctg> {
    fn fetch(
        &mut self,
        contig: &Ctg,
        orientation: Orientation,
        window: &Interval<Pos>,
        into: &mut Vec<AnchorRecord>,
    ) -> Result<()> {
        self.sort();

        let records = match self.records.get(&(contig.clone(), orientation)) {
            Some(records) => records,
            None => return Ok(()),
        };

        let first = records.partition_point(|x| x.start() < window.start());
        into.extend(
            records[first..]
                .iter()
                .take_while(|x| x.start() < window.end())
                .filter(|x| x.end() <= window.end()),
        );
        Ok(())
    }
}

impl<Ctg: Contig> FromIterator<(Ctg, AnchorRecord)> for IndexedRecords<Ctg> {
    fn from_iter<T: IntoIterator<Item = (Ctg, AnchorRecord)>>(iter: T) -> Self {
        let mut index = IndexedRecords::new();
        for (contig, record) in iter {
            index.add(contig, record);
        }
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> Result<IndexedRecords<&'static str>> {
        [
            ("chr1", Orientation::Forward, 50, 60),
            ("chr1", Orientation::Forward, 5, 15),
            ("chr1", Orientation::Forward, 10, 30),
            ("chr1", Orientation::Forward, 10, 12),
            ("chr1", Orientation::Reverse, 10, 20),
            ("chr2", Orientation::Forward, 10, 20),
        ]
        .into_iter()
        .map(|(ctg, o, s, e)| -> Result<_> { Ok((ctg, AnchorRecord::new(o, s, e)?)) })
        .collect()
    }

    #[test]
    fn test_fetch_contained_records() -> Result<()> {
        let mut index = index()?;
        assert_eq!(index.len(), 6);

        let mut fetched = Vec::new();
        index.fetch(
            &"chr1",
            Orientation::Forward,
            &Interval::new(10, 55)?,
            &mut fetched,
        )?;
        let spans: Vec<_> = fetched.iter().map(|x| (x.start(), x.end())).collect();
        assert_eq!(spans, vec![(10, 30), (10, 12)]);

        fetched.clear();
        index.fetch(
            &"chr1",
            Orientation::Reverse,
            &Interval::new(0, 100)?,
            &mut fetched,
        )?;
        assert_eq!(fetched.len(), 1);

        fetched.clear();
        index.fetch(&"chr3", Orientation::Forward, &Interval::new(0, 100)?, &mut fetched)?;
        assert!(fetched.is_empty());
        Ok(())
    }

    #[test]
    fn test_fetch_window_edges() -> Result<()> {
        let mut index = index()?;
        let mut fetched = Vec::new();
        // Window end is exclusive: [5, 15) is inside [5, 15) but [10, 30) is not.
        index.fetch(&"chr1", Orientation::Forward, &Interval::new(5, 15)?, &mut fetched)?;
        let spans: Vec<_> = fetched.iter().map(|x| (x.start(), x.end())).collect();
        assert_eq!(spans, vec![(5, 15), (10, 12)]);
        Ok(())
    }
}
