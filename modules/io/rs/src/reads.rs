use std::path::Path;

use eyre::{ensure, OptionExt, Result, WrapErr};

use framekit_core_rs::anchor::{AnchorRecord, IndexedRecords};
use framekit_core_rs::loc::{IntervalOp, Orientation};
use framekit_core_rs::num::Pos;

use crate::bed::{self, Bed6};
use crate::traits::ReadRecord;

/// Converts a BED6 line describing an aligned read into an anchor record.
pub fn to_anchor(record: &Bed6) -> Result<AnchorRecord> {
    ensure!(
        *record.orientation() != Orientation::Dual,
        "Aligned reads must have a defined strand: {}:{}",
        record.seqid(),
        record.interval()
    );
    let interval = record.interval();
    let start = Pos::try_from(interval.start()).ok().ok_or_eyre("Read start is too large")?;
    let end = Pos::try_from(interval.end()).ok().ok_or_eyre("Read end is too large")?;
    AnchorRecord::new(*record.orientation(), start, end)
}

/// Loads aligned reads (one BED6 line per read) into an in-memory record source.
pub fn load_reads(path: impl AsRef<Path>) -> Result<IndexedRecords<String>> {
    let path = path.as_ref();
    let mut reader = bed::Reader::from_path(path)?;

    let mut reads = IndexedRecords::new();
    let mut record = Bed6::default();
    while reader
        .read_record(&mut record)
        .wrap_err_with(|| format!("Failed to read aligned reads from {}", path.display()))?
    {
        let anchor = to_anchor(&record)?;
        reads.add(record.seqid().clone(), anchor);
    }
    log::debug!("Loaded {} reads from {}", reads.len(), path.display());
    Ok(reads)
}
