use derive_getters::{Dissolve, Getters};
use derive_more::{Add, AddAssign, Constructor};

use framekit_core_rs::anchor::Census;
use framekit_core_rs::loc::Frame;
use framekit_core_rs::num::Count;

use crate::counter::CountTable;
use crate::resample::{FrameOutcome, Resampled};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Add, AddAssign, Getters)]
pub struct ResamplingReport {
    // Features with at least one anchor to relocate
    features: Count,
    // Anchors requested and placed
    requested: Count,
    resolved: Count,
    // Frames that ran out of misses or had no candidates
    partial: Count,
    infeasible: Count,
}

impl ResamplingReport {
    pub fn record(&mut self, resampled: &Resampled) {
        self.features += 1;
        for frame in Frame::ALL {
            let requested = *resampled.requested().get(frame);
            let outcome = resampled.outcomes().get(frame);
            self.requested += requested;
            self.resolved += requested - outcome.unresolved();
            match outcome {
                FrameOutcome::Satisfied => {}
                FrameOutcome::Partial { .. } => self.partial += 1,
                FrameOutcome::Infeasible { .. } => self.infeasible += 1,
            }
        }
    }

    pub fn unresolved(&self) -> Count {
        self.requested - self.resolved
    }

    pub fn is_complete(&self) -> bool {
        self.partial == 0 && self.infeasible == 0
    }
}

#[derive(Clone, PartialEq, Debug, Constructor, Dissolve, Getters)]
pub struct Composition {
    table: CountTable,
    census: Census,
    resampling: ResamplingReport,
}
