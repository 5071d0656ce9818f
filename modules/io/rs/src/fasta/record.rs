use derive_getters::{Dissolve, Getters};
use eyre::{ensure, Report, Result};

/// A reference sequence as it appears in a FASTA file.
///
/// The ID is a non-empty single line of text; the sequence is non-empty and alphabetic. Case is
/// preserved: uppercasing happens when the sequence enters the store.
#[derive(Debug, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Dissolve, Getters)]
pub struct Record {
    id: String,
    seq: Vec<u8>,
}

impl Default for Record {
    fn default() -> Self {
        Self {
            id: "unnamed".to_string(),
            seq: b"N".to_vec(),
        }
    }
}

impl TryFrom<(&str, &str)> for Record {
    type Error = Report;

    fn try_from((id, seq): (&str, &str)) -> Result<Self> {
        Self::new(id.to_owned(), seq.as_bytes().to_vec())
    }
}

impl Record {
    pub fn new(id: String, seq: Vec<u8>) -> Result<Self> {
        validate_id(&id)?;
        validate_seq(&seq)?;
        Ok(Self { id, seq })
    }

    /// Name of the sequence: the ID up to the first whitespace character.
    /// This is how BED files refer to the sequence.
    pub fn name(&self) -> &str {
        self.id.split_whitespace().next().unwrap_or(&self.id)
    }

    /// # Safety
    /// The caller must validate both fields before the record is observed again.
    pub(super) unsafe fn raw(&mut self) -> (&mut String, &mut Vec<u8>) {
        (&mut self.id, &mut self.seq)
    }
}

pub fn validate_id(id: &str) -> Result<()> {
    ensure!(!id.is_empty(), "FASTA ID cannot be empty");
    ensure!(
        memchr::memchr2(b'\n', b'\r', id.as_bytes()).is_none(),
        "FASTA ID must be a single line: {id:?}"
    );
    Ok(())
}

pub fn validate_seq(seq: &[u8]) -> Result<()> {
    ensure!(!seq.is_empty(), "FASTA sequence cannot be empty");
    if let Some(pos) = seq.iter().position(|x| !x.is_ascii_alphabetic()) {
        eyre::bail!(
            "Sequence symbol {:?} at offset {pos} is not a letter",
            char::from(seq[pos])
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_record() -> Result<()> {
        for (id, seq, name) in [
            ("chr1", "ACGTACGT", "chr1"),
            ("chr1 assembled molecule", "acgtn", "chr1"),
            (" spaced", "N", "spaced"),
        ] {
            let record = Record::try_from((id, seq))?;
            assert_eq!(record.id(), id);
            assert_eq!(record.seq(), seq.as_bytes());
            assert_eq!(record.name(), name);
        }
        Ok(())
    }

    #[test]
    fn test_invalid_records() {
        for (id, seq) in [
            ("", "ACGT"),
            ("id\n", "ACGT"),
            ("id\r", "ACGT"),
            ("id", ""),
            ("id", "ACGT1"),
            ("id", "ACG T"),
        ] {
            let record = Record::try_from((id, seq));
            assert!(record.is_err(), "Record: {:?}", record);
        }
    }

    #[test]
    fn test_invalid_symbol_offset() {
        let error = validate_seq(b"ACGT-A").unwrap_err();
        assert!(error.to_string().contains("offset 4"), "{error}");
    }
}
