pub mod bed;
pub mod compression;
pub mod fasta;
pub mod reads;
mod traits;

pub use traits::ReadRecord;
