// Format specification: https://samtools.github.io/hts-specs/BEDv1.pdf
//
// Only the first six columns are interpreted:
// 1. seqid: [[:alnum:]_]{1,255}
// 2. start: u64
// 3. end: u64
// 4. name: [\x20-\x7e]{1,255}
// 5. score: u16 [0, 1000]
// 6. orientation: [+|-|.]

use std::path::Path;

use eyre::{Result, WrapErr};

use framekit_core_rs::loc::Feature;

use crate::traits::ReadRecord;

mod reader;
mod record;
pub mod validate;

pub use reader::{parse, Reader};
pub use record::Bed6;

/// Reads all features from a BED file, keeping the file order.
pub fn load_features(path: impl AsRef<Path>) -> Result<Vec<Feature<String>>> {
    let path = path.as_ref();
    let mut reader = Reader::from_path(path)?;

    let mut features = Vec::new();
    let mut record = Bed6::default();
    while reader
        .read_record(&mut record)
        .wrap_err_with(|| format!("Failed to read BED file {}", path.display()))?
    {
        features.push(record.to_feature()?);
    }
    log::debug!("Loaded {} features from {}", features.len(), path.display());
    Ok(features)
}

#[cfg(test)]
mod tests {
    use super::*;
    use framekit_core_rs::loc::{IntervalOp, Orientation};
    use std::path::PathBuf;

    #[test]
    fn test_load_example_features() -> Result<()> {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../../resources/bed/features.bed");
        let features = load_features(path)?;
        assert_eq!(features.len(), 3);

        assert_eq!(features[0].contig(), "chr1");
        assert_eq!((features[0].start(), features[0].end()), (0, 60));
        assert_eq!(*features[0].orientation(), Orientation::Forward);
        assert_eq!(features[0].name().as_deref(), Some("orf1"));

        assert_eq!(*features[2].orientation(), Orientation::Reverse);
        Ok(())
    }
}
