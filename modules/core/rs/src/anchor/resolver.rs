use derive_getters::{Dissolve, Getters};
use derive_more::{Add, AddAssign, Constructor};
use eyre::Result;

use crate::num::{Count, Pos};

use super::endpoint::Endpoint;
use super::record::AnchorRecord;
use super::wig::Wig;

/// Book-keeping of the anchor resolution for one or more features.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Add, AddAssign)]
pub struct Tally {
    /// Records received from the source.
    pub records: Count,
    /// Records that contributed an anchor to the wig.
    pub kept: Count,
    /// Records whose anchor can't be expanded inside the feature.
    pub out_of_bounds: Count,
    /// Records dropped because their anchor was already seen (collapse mode).
    pub collapsed: Count,
}

/// Turns the records of a single feature into a wig of anchor positions.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Constructor, Dissolve, Getters)]
pub struct Resolver {
    endpoint: Endpoint,
    collapse: bool,
}

impl Resolver {
    /// Resolves anchors for the given records. Positions rejected by `accept` are dropped
    /// silently. With collapse enabled, only the first record of each position is counted.
    ///
    /// Fails if any record has no reading direction.
    pub fn resolve<'a>(
        &self,
        records: impl IntoIterator<Item = &'a AnchorRecord>,
        accept: impl Fn(Pos) -> bool,
        tally: &mut Tally,
    ) -> Result<Wig> {
        let mut wig = Wig::new();
        for record in records {
            tally.records += 1;

            let pos = self.endpoint.select(record)?;
            if !accept(pos) {
                tally.out_of_bounds += 1;
                continue;
            }
            if self.collapse && wig.contains(pos) {
                tally.collapsed += 1;
                continue;
            }

            wig.add(pos, 1);
            tally.kept += 1;
        }
        Ok(wig)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loc::Orientation;

    fn records() -> Result<Vec<AnchorRecord>> {
        [
            (Orientation::Forward, 10, 20),
            (Orientation::Forward, 10, 25),
            (Orientation::Reverse, 5, 20),
            (Orientation::Forward, 50, 60),
            (Orientation::Reverse, 0, 3),
        ]
        .into_iter()
        .map(|(o, s, e)| AnchorRecord::new(o, s, e))
        .collect()
    }

    #[test]
    fn test_resolve_heads() -> Result<()> {
        let records = records()?;
        let mut tally = Tally::default();
        let wig = Resolver::new(Endpoint::Head, false).resolve(&records, |p| p < 40, &mut tally)?;

        assert_eq!(wig.iter().collect::<Vec<_>>(), vec![(2, 1), (10, 2), (19, 1)]);
        assert_eq!(
            tally,
            Tally {
                records: 5,
                kept: 4,
                out_of_bounds: 1,
                collapsed: 0
            }
        );
        Ok(())
    }

    #[test]
    fn test_resolve_collapse() -> Result<()> {
        let records = records()?;
        let mut tally = Tally::default();
        let wig = Resolver::new(Endpoint::Head, true).resolve(&records, |_| true, &mut tally)?;

        assert_eq!(wig.get(10), 1);
        assert_eq!(wig.mass(), 4);
        assert_eq!(tally.collapsed, 1);
        assert_eq!(tally.kept, 4);
        Ok(())
    }

    #[test]
    fn test_resolve_tails() -> Result<()> {
        let records = records()?;
        let mut tally = Tally::default();
        let wig = Resolver::new(Endpoint::Tail, false).resolve(&records, |_| true, &mut tally)?;
        assert_eq!(
            wig.iter().collect::<Vec<_>>(),
            vec![(0, 1), (5, 1), (19, 1), (24, 1), (59, 1)]
        );
        Ok(())
    }

    #[test]
    fn test_unoriented_record_fails() -> Result<()> {
        let records = vec![AnchorRecord::new(Orientation::Dual, 1, 2)?];
        let mut tally = Tally::default();
        assert!(Resolver::new(Endpoint::Head, false)
            .resolve(&records, |_| true, &mut tally)
            .is_err());
        Ok(())
    }
}
