use std::fmt::Debug;
use std::hash::Hash;

use derive_getters::{Dissolve, Getters};
use derive_more::Constructor;
use eyre::{bail, Result};

use crate::num::Pos;

use super::frame::{self, Frame};
use super::interval::{Interval, IntervalOp};
use super::orientation::Orientation;

/// Contig is an object that refers to an actual assembly contig. Depending on the context, can be
/// encoded by a string, a number, etc.
pub trait Contig: Hash + PartialEq + Eq + PartialOrd + Ord + Clone + Debug {}

impl<T: Hash + PartialEq + Eq + PartialOrd + Ord + Clone + Debug> Contig for T {}

/// An annotated genomic region (e.g. a CDS) that defines the reading frame for the anchors
/// located inside it. The reading frame starts at the first nucleotide of the feature.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Dissolve, Getters, Constructor)]
pub struct Feature<Ctg: Contig> {
    contig: Ctg,
    interval: Interval<Pos>,
    orientation: Orientation,
    name: Option<String>,
}

impl<Ctg: Contig> Feature<Ctg> {
    /// First nucleotide of the reading frame.
    pub fn origin(&self) -> Pos {
        self.interval.start()
    }

    /// Reading frame of the given position relative to the feature origin.
    pub fn frame_of(&self, pos: Pos) -> Frame {
        Frame::of(pos, self.origin())
    }

    /// Start of the codon that contains the given position.
    pub fn codon_start(&self, pos: Pos) -> Pos {
        frame::codon_start(pos, self.origin())
    }

    /// Only forward features have a well-defined reading frame in reference coordinates.
    pub fn ensure_supported(&self) -> Result<()> {
        match self.orientation {
            Orientation::Forward => Ok(()),
            Orientation::Reverse => bail!(
                "Features on the reverse orientation are unsupported: {}",
                self.describe()
            ),
            Orientation::Dual => bail!(
                "Features must have a defined (forward) orientation: {}",
                self.describe()
            ),
        }
    }

    /// Human-readable location used in diagnostics.
    pub fn describe(&self) -> String {
        match &self.name {
            Some(name) => format!("{name} ({:?}:{}{})", self.contig, self.interval, self.orientation),
            None => format!("{:?}:{}{}", self.contig, self.interval, self.orientation),
        }
    }
}

impl<Ctg: Contig> IntervalOp for Feature<Ctg> {
    type Idx = Pos;

    fn start(&self) -> Self::Idx {
        self.interval.start()
    }

    fn end(&self) -> Self::Idx {
        self.interval.end()
    }
}
