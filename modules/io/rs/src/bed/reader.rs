use std::io::BufRead;
use std::path::Path;

use eyre::{ensure, OptionExt, Result, WrapErr};

use framekit_core_rs::loc::{Interval, Orientation};

use super::record::Bed6;
use crate::compression;
use crate::traits::ReadRecord;

pub mod parse {
    use super::*;

    pub fn seqid<'a>(parts: &mut impl Iterator<Item = &'a str>) -> Result<String> {
        let seqid = parts.next().ok_or_eyre("Missing BED seqid")?;
        Ok(seqid.to_owned())
    }

    pub fn interval<'a>(parts: &mut impl Iterator<Item = &'a str>) -> Result<Interval<u64>> {
        let start = parts.next().ok_or_eyre("Missing BED start")?;
        let end = parts.next().ok_or_eyre("Missing BED end")?;

        let start = start.parse::<u64>().wrap_err("Invalid BED start")?;
        let end = end.parse::<u64>().wrap_err("Invalid BED end")?;
        Interval::new(start, end).wrap_err("Invalid BED interval")
    }

    pub fn name<'a>(parts: &mut impl Iterator<Item = &'a str>) -> Result<String> {
        let name = parts.next().ok_or_eyre("Missing BED name")?;
        Ok(name.to_owned())
    }

    pub fn score<'a>(parts: &mut impl Iterator<Item = &'a str>) -> Result<u16> {
        let score = parts.next().ok_or_eyre("Missing BED score")?;
        score.parse::<u16>().wrap_err("Invalid BED score")
    }

    pub fn orientation<'a>(parts: &mut impl Iterator<Item = &'a str>) -> Result<Orientation> {
        let orientation = parts.next().ok_or_eyre("Missing BED strand")?;
        ensure!(
            orientation.len() == 1 && orientation != "=",
            "Invalid BED strand: {orientation}"
        );
        orientation.parse()
    }

    pub fn bed6<'a>(parts: &mut impl Iterator<Item = &'a str>, into: &mut Bed6) -> Result<()> {
        into.set(
            seqid(parts)?,
            interval(parts)?,
            name(parts)?,
            score(parts)?,
            orientation(parts)?,
        )?;
        Ok(())
    }
}

/// BED reader that yields the first six columns of each record.
///
/// Empty lines, comments (`#`) and `track`/`browser` header lines are skipped. Any columns after
/// the strand are ignored, so BED12 annotations can be read as well.
pub struct Reader<R> {
    reader: R,
    buffer: String,
}

impl Reader<()> {
    /// Create a new BED reader for the given file. Gzip compression is detected automatically.
    pub fn from_path(
        path: impl AsRef<Path>,
    ) -> Result<Reader<Box<dyn BufRead + Send + Sync + 'static>>> {
        let stream = compression::read_file(path)?.box_bufread();
        Ok(Reader::new(stream))
    }
}

impl<R: BufRead> Reader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: String::new(),
        }
    }

    fn is_header(line: &str) -> bool {
        line.is_empty()
            || line.starts_with('#')
            || line.starts_with("track")
            || line.starts_with("browser")
    }
}

impl<R: BufRead> ReadRecord for Reader<R> {
    type Record = Bed6;

    fn read_record(&mut self, into: &mut Bed6) -> Result<bool> {
        loop {
            self.buffer.clear();
            if self.reader.read_line(&mut self.buffer)? == 0 {
                return Ok(false);
            }

            let line = self.buffer.trim_end_matches(['\n', '\r']);
            if Self::is_header(line) {
                continue;
            }

            let mut parts = line.split('\t');
            parse::bed6(&mut parts, into)
                .wrap_err_with(|| format!("Failed to parse BED record: {line}"))?;
            return Ok(true);
        }
    }
}
