pub use codoncomp::CodonComp;
pub use config::{Config, Unit};
pub use counter::CountTable;
pub use resample::{CompositionIndex, ContentModel, FrameOutcome, Resampled, Resampler, Window};
pub use result::{Composition, ResamplingReport};

mod codoncomp;
mod config;
pub mod counter;
pub mod resample;
mod result;
