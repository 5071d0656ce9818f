use std::io::BufRead;
use std::path::Path;

use eyre::{bail, ensure, Result, WrapErr};

use super::record::{self, Record};
use crate::compression;
use crate::traits::ReadRecord;

/// Strict streaming FASTA reader. Carriage returns at line ends and blank lines inside a
/// sequence are tolerated. Anything before the first `>`, non-alphabetic sequence symbols and
/// records with an empty ID or sequence are errors that report the offending line.
#[derive(Debug)]
pub struct Reader<R> {
    reader: R,
    // 1-based number of the next line to be consumed
    line: usize,
}

impl Reader<()> {
    /// Create a new FASTA reader for the given file. Gzip compression is detected automatically.
    pub fn from_path(
        path: impl AsRef<Path>,
    ) -> Result<Reader<Box<dyn BufRead + Send + Sync + 'static>>> {
        let path = path.as_ref();
        let stream = compression::read_file(path)?.box_bufread();
        Reader::new(stream).wrap_err_with(|| format!("Invalid FASTA file: {}", path.display()))
    }
}

impl<R: BufRead> Reader<R> {
    pub fn new(mut reader: R) -> Result<Self> {
        let head = reader.fill_buf()?;
        ensure!(
            head.first().is_none_or(|x| *x == b'>'),
            "FASTA input must start with '>'"
        );
        Ok(Self { reader, line: 1 })
    }

    /// Reads the `>` line into `id`. Returns false at the end of the input.
    fn header(&mut self, id: &mut String) -> Result<bool> {
        let next = self.reader.fill_buf()?.first().copied();
        match next {
            None => return Ok(false),
            Some(b'>') => self.reader.consume(1),
            Some(_) => bail!("Line {}: expected '>' at the start of a FASTA record", self.line),
        }

        id.clear();
        ensure!(
            self.reader.read_line(id)? > 0 && id.ends_with('\n'),
            "Line {}: FASTA ID line is not terminated with a newline",
            self.line
        );
        let trimmed = id.trim_end_matches(['\n', '\r']).len();
        id.truncate(trimmed);
        record::validate_id(id).wrap_err_with(|| format!("Line {}", self.line))?;
        self.line += 1;
        Ok(true)
    }

    /// Appends sequence lines to `seq` until the next record or the end of the input.
    fn sequence(&mut self, seq: &mut Vec<u8>) -> Result<()> {
        let first = self.line;
        seq.clear();
        loop {
            let chunk = self.reader.fill_buf()?;
            if chunk.first().is_none_or(|x| *x == b'>') {
                break;
            }

            // A line may be split across several chunks; only a newline advances the counter
            let (line, consumed, complete) = match memchr::memchr(b'\n', chunk) {
                Some(pos) => (&chunk[..pos], pos + 1, true),
                None => (chunk, chunk.len(), false),
            };
            seq.extend_from_slice(line.strip_suffix(b"\r").unwrap_or(line));
            self.reader.consume(consumed);
            if complete {
                self.line += 1;
            }
        }
        record::validate_seq(seq).wrap_err_with(|| format!("Sequence starting at line {first}"))
    }
}

impl<R: BufRead> ReadRecord for Reader<R> {
    type Record = Record;

    fn read_record(&mut self, into: &mut Self::Record) -> Result<bool> {
        // SAFETY: both fields are validated before returning Ok(true)
        let (id, seq) = unsafe { into.raw() };
        if !self.header(id)? {
            return Ok(false);
        }
        self.sequence(seq)
            .wrap_err_with(|| format!("Invalid sequence for the FASTA record {id}"))?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eyre::Report;
    use std::io::Cursor;

    fn read_all(content: &str) -> Result<Vec<Record>> {
        let mut reader = Reader::new(Cursor::new(content))?;
        let mut records = Vec::new();
        reader.read_to_end(&mut records)?;
        Ok(records)
    }

    #[test]
    fn test_empty_fasta() -> Result<()> {
        assert!(read_all("")?.is_empty());
        Ok(())
    }

    #[test]
    fn test_invalid_fasta() {
        for content in [
            " ",
            ">",
            ">id",
            ">id\nAC GT",
            ">id\nACGT ",
            ">id\nACGT\n>ID\n",
        ] {
            let result = read_all(content);
            assert!(result.is_err(), "Content: {:?}", content);
        }
    }

    #[test]
    fn test_error_reports_lines() {
        let content = ">ok\nACGT\nAC\n>bad\nAC\nA-T\n";
        let error = read_all(content).unwrap_err();
        assert!(format!("{error:?}").contains("starting at line 5"), "{error:?}");

        let error = read_all(">ok\nACGT\n>\nAC\n").unwrap_err();
        assert!(format!("{error:?}").contains("Line 3"), "{error:?}");
    }

    #[test]
    fn test_valid_fasta() -> Result<()> {
        for (content, expected) in [
            (">id\nACGT\n", vec![("id", "ACGT")]),
            (">id\n\nACGT\n\n", vec![("id", "ACGT")]),
            (
                ">id\nACGT\n>id2\nACGT\n",
                vec![("id", "ACGT"), ("id2", "ACGT")],
            ),
            (
                ">ID\r\nACGT\r\nA\r\nGTTT\r\nA\r\n>id2\nac\n",
                vec![("ID", "ACGTAGTTTA"), ("id2", "ac")],
            ),
        ] {
            let records = read_all(content)?;
            let expected = expected
                .into_iter()
                .map(Record::try_from)
                .collect::<Result<Vec<_>, Report>>()?;
            assert_eq!(records, expected, "Content: {content:?}");
        }
        Ok(())
    }
}
