use derive_getters::{Dissolve, Getters};
use derive_more::{Add, AddAssign};
use eyre::{ensure, Result};

use crate::loc::{Contig, Feature, Interval, IntervalOp, Orientation};
use crate::num::{Count, Pos};
use crate::seq::SequenceStore;

use super::record::AnchorRecord;
use super::resolver::{Resolver, Tally};
use super::source::RecordSource;
use super::wig::Wig;

/// Per-run feature book-keeping.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Add, AddAssign, Getters)]
pub struct Census {
    /// Features offered to the selector.
    features: Count,
    /// Features whose anchors were resolved.
    processed: Count,
    /// Features shorter than the length limit.
    too_short: Count,
    /// Features located on contigs without a reference sequence.
    no_sequence: Count,
    /// Anchor resolution summed over all processed features.
    tally: Tally,
}

/// Anchors of a single feature together with the reference sequence of its contig.
#[derive(Clone, PartialEq, Eq, Debug, Dissolve, Getters)]
pub struct Selection<'a> {
    sequence: &'a [u8],
    wig: Wig,
}

/// Fetches the records around each feature and resolves them into anchors.
///
/// Records are queried in the feature window extended by `q_area` nucleotides on both sides and
/// must lie completely inside it. By default, records on the feature orientation are used;
/// `anti` switches to the opposite orientation.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Selector {
    resolver: Resolver,
    q_area: Pos,
    anti: bool,
    len_lim: Pos,
    buffer: Vec<AnchorRecord>,
    census: Census,
}

impl Selector {
    pub fn new(resolver: Resolver, q_area: Pos, anti: bool, len_lim: Pos) -> Result<Self> {
        ensure!(q_area >= 0, "Query area must be non-negative, got {q_area}");
        ensure!(len_lim >= 0, "Length limit must be non-negative, got {len_lim}");
        Ok(Self {
            resolver,
            q_area,
            anti,
            len_lim,
            buffer: Vec::new(),
            census: Census::default(),
        })
    }

    pub fn census(&self) -> &Census {
        &self.census
    }

    /// Window used to query records for the feature.
    pub fn window<Ctg: Contig>(&self, feature: &Feature<Ctg>) -> Result<Interval<Pos>> {
        feature.interval().extended(self.q_area, self.q_area)
    }

    /// Orientation of the records queried for the feature.
    pub fn orientation<Ctg: Contig>(&self, feature: &Feature<Ctg>) -> Orientation {
        if self.anti {
            feature.orientation().flipped()
        } else {
            *feature.orientation()
        }
    }

    /// Resolves anchors of the feature. Anchors rejected by `accept` are dropped.
    ///
    /// Returns `None` for features that are shorter than the length limit (zero disables the
    /// limit) or located on a contig without a sequence. Fails for features that aren't on the
    /// forward orientation or that extend beyond their sequence.
    pub fn select<'a, Ctg: Contig>(
        &mut self,
        feature: &Feature<Ctg>,
        store: &'a SequenceStore<Ctg>,
        source: &mut impl RecordSource<Ctg>,
        accept: impl Fn(Pos) -> bool,
    ) -> Result<Option<Selection<'a>>> {
        self.census.features += 1;

        if self.len_lim != 0 && feature.len() < self.len_lim {
            self.census.too_short += 1;
            return Ok(None);
        }
        feature.ensure_supported()?;

        let sequence = match store.get(feature.contig()) {
            Some(sequence) => sequence,
            None => {
                log::debug!("No reference sequence for {}, skipping", feature.describe());
                self.census.no_sequence += 1;
                return Ok(None);
            }
        };
        ensure!(
            feature.start() >= 0 && feature.end() <= sequence.len() as Pos,
            "Feature {} extends beyond its sequence (length {})",
            feature.describe(),
            sequence.len()
        );

        self.buffer.clear();
        source.fetch(
            feature.contig(),
            self.orientation(feature),
            &self.window(feature)?,
            &mut self.buffer,
        )?;

        let mut tally = Tally::default();
        let wig = self.resolver.resolve(&self.buffer, accept, &mut tally)?;
        self.census.tally += tally;
        self.census.processed += 1;

        Ok(Some(Selection { sequence, wig }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchor::{Endpoint, IndexedRecords};

    fn forward(start: Pos, end: Pos) -> Result<Feature<String>> {
        Ok(Feature::new(
            "chr1".to_string(),
            Interval::new(start, end)?,
            Orientation::Forward,
            None,
        ))
    }

    fn reads() -> Result<IndexedRecords<String>> {
        let mut reads = IndexedRecords::new();
        for (orientation, start, end) in [
            (Orientation::Forward, 10, 20),
            (Orientation::Forward, 10, 30),
            (Orientation::Forward, 0, 5),
            (Orientation::Reverse, 40, 50),
            (Orientation::Forward, 95, 120),
        ] {
            reads.add("chr1".to_string(), AnchorRecord::new(orientation, start, end)?);
        }
        Ok(reads)
    }

    fn store() -> SequenceStore<String> {
        [("chr1".to_string(), vec![b'a'; 100])].into_iter().collect()
    }

    #[test]
    fn test_select_forward() -> Result<()> {
        let store = store();
        let mut reads = reads()?;
        let mut selector = Selector::new(Resolver::new(Endpoint::Head, false), 5, false, 0)?;

        let selection = selector
            .select(&forward(10, 60)?, &store, &mut reads, |_| true)?
            .unwrap();
        // [5, 65) window: the read starting at 0 and the one ending at 120 are not fetched
        assert_eq!(selection.wig().iter().collect::<Vec<_>>(), vec![(10, 2)]);
        assert_eq!(selection.sequence().len(), 100);
        assert_eq!(selector.census().tally().records, 2);
        assert_eq!(*selector.census().processed(), 1);
        Ok(())
    }

    #[test]
    fn test_select_anti_and_accept() -> Result<()> {
        let store = store();
        let mut reads = reads()?;

        let mut selector = Selector::new(Resolver::new(Endpoint::Head, false), 5, true, 0)?;
        let selection = selector
            .select(&forward(10, 60)?, &store, &mut reads, |_| true)?
            .unwrap();
        assert_eq!(selection.wig().iter().collect::<Vec<_>>(), vec![(49, 1)]);

        let mut selector = Selector::new(Resolver::new(Endpoint::Head, false), 5, true, 0)?;
        let selection = selector
            .select(&forward(10, 60)?, &store, &mut reads, |p| p < 49)?
            .unwrap();
        assert!(selection.wig().is_empty());
        assert_eq!(selector.census().tally().out_of_bounds, 1);
        Ok(())
    }

    #[test]
    fn test_select_skips() -> Result<()> {
        let store = store();
        let mut reads = reads()?;
        let mut selector = Selector::new(Resolver::new(Endpoint::Tail, false), 0, false, 30)?;

        assert!(selector
            .select(&forward(10, 20)?, &store, &mut reads, |_| true)?
            .is_none());

        let elsewhere = Feature::new(
            "chr2".to_string(),
            Interval::new(0, 50)?,
            Orientation::Forward,
            None,
        );
        assert!(selector
            .select(&elsewhere, &store, &mut reads, |_| true)?
            .is_none());

        let census = selector.census();
        assert_eq!(
            (*census.features(), *census.too_short(), *census.no_sequence(), *census.processed()),
            (2, 1, 1, 0)
        );
        Ok(())
    }

    #[test]
    fn test_select_fails() -> Result<()> {
        let store = store();
        let mut reads = reads()?;
        let mut selector = Selector::new(Resolver::new(Endpoint::Head, false), 0, false, 0)?;

        for orientation in [Orientation::Reverse, Orientation::Dual] {
            let feature = Feature::new(
                "chr1".to_string(),
                Interval::new(0, 50)?,
                orientation,
                None,
            );
            assert!(selector.select(&feature, &store, &mut reads, |_| true).is_err());
        }

        // Longer than the sequence
        assert!(selector
            .select(&forward(50, 150)?, &store, &mut reads, |_| true)
            .is_err());

        assert!(Selector::new(Resolver::default(), -1, false, 0).is_err());
        Ok(())
    }
}
