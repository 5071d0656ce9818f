#[cfg(feature = "bitcode")]
use bitcode::{Decode, Encode};
use derive_getters::{Dissolve, Getters};
use eyre::{OptionExt, Result};

use framekit_core_rs::loc::{Feature, Interval, Orientation};
use framekit_core_rs::num::Pos;

use super::validate;

/// The first six BED columns: seqid, interval, name, score and strand.
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Debug, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Dissolve, Getters)]
pub struct Bed6 {
    seqid: String,
    interval: Interval<u64>,
    name: String,
    score: u16,
    orientation: Orientation,
}

impl Default for Bed6 {
    fn default() -> Self {
        Self {
            seqid: "_".to_string(),
            interval: Interval::default(),
            name: ".".to_string(),
            score: 0,
            orientation: Orientation::Dual,
        }
    }
}

impl Bed6 {
    pub fn new(
        seqid: String,
        interval: Interval<u64>,
        name: String,
        score: u16,
        orientation: Orientation,
    ) -> Result<Self> {
        validate::seqid(&seqid)?;
        validate::name(&name)?;
        validate::score(score)?;
        Ok(Self {
            seqid,
            interval,
            name,
            score,
            orientation,
        })
    }

    /// Replaces all fields at once. The record is left untouched if any field is invalid.
    pub fn set(
        &mut self,
        seqid: String,
        interval: Interval<u64>,
        name: String,
        score: u16,
        orientation: Orientation,
    ) -> Result<&mut Self> {
        *self = Self::new(seqid, interval, name, score, orientation)?;
        Ok(self)
    }

    /// Converts the record into a genomic feature. A `.` name is treated as missing.
    pub fn to_feature(&self) -> Result<Feature<String>> {
        let interval = self
            .interval
            .cast::<Pos>()
            .ok_or_eyre("BED interval doesn't fit into genomic coordinates")?;
        let name = (self.name != ".").then(|| self.name.clone());
        Ok(Feature::new(
            self.seqid.clone(),
            interval,
            self.orientation,
            name,
        ))
    }
}
