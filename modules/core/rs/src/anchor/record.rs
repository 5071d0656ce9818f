#[cfg(feature = "bitcode")]
use bitcode::{Decode, Encode};
use derive_getters::{Dissolve, Getters};
use eyre::Result;

use crate::loc::{Interval, IntervalOp, Orientation};
use crate::num::Pos;

/// A single aligned read, reduced to what anchor resolution needs: its orientation and its
/// half-open span on the reference.
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Dissolve, Getters)]
pub struct AnchorRecord {
    orientation: Orientation,
    interval: Interval<Pos>,
}

impl AnchorRecord {
    pub fn new(orientation: Orientation, start: Pos, end: Pos) -> Result<Self> {
        Ok(Self {
            orientation,
            interval: Interval::new(start, end)?,
        })
    }

    /// Last nucleotide covered by the record.
    pub fn last(&self) -> Pos {
        self.interval.end() - 1
    }
}

impl IntervalOp for AnchorRecord {
    type Idx = Pos;

    fn start(&self) -> Self::Idx {
        self.interval.start()
    }

    fn end(&self) -> Self::Idx {
        self.interval.end()
    }
}
