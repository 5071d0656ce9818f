pub use feature::{Contig, Feature};
pub use frame::{codon_start, frame_offset, Frame, PerFrame, CODON};
pub use interval::{Interval, IntervalOp};
pub use orientation::Orientation;

mod feature;
pub mod frame;
mod interval;
mod orientation;
