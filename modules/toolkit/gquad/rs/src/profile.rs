use std::io::Write;

use eyre::{ensure, Result};

use framekit_core_rs::num::{Count, Pos};

/// Motif coverage at each offset `-span_up..=span_down` around the anchors.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Profile {
    span_up: Pos,
    span_down: Pos,
    values: Vec<Count>,
    records: Count,
}

impl Profile {
    pub fn new(span_up: Pos, span_down: Pos) -> Result<Self> {
        ensure!(
            span_up >= 0 && span_down >= 0,
            "Spans must be non-negative, got {span_up} and {span_down}"
        );
        Ok(Self {
            span_up,
            span_down,
            values: vec![0; (span_up + span_down + 1) as usize],
            records: 0,
        })
    }

    pub fn offsets(&self) -> impl Iterator<Item = Pos> {
        -self.span_up..=self.span_down
    }

    /// Adds `count` at the offset. Offsets outside the profile span are ignored.
    pub fn cover(&mut self, offset: Pos, count: Count) {
        if offset >= -self.span_up && offset <= self.span_down {
            self.values[(offset + self.span_up) as usize] += count;
        }
    }

    /// Registers scanned anchors.
    pub fn add_records(&mut self, count: Count) {
        self.records += count;
    }

    pub fn get(&self, offset: Pos) -> Count {
        if offset >= -self.span_up && offset <= self.span_down {
            self.values[(offset + self.span_up) as usize]
        } else {
            0
        }
    }

    /// Total number of scanned anchors.
    pub fn records(&self) -> Count {
        self.records
    }

    pub fn merge(&mut self, other: &Profile) -> Result<()> {
        ensure!(
            self.span_up == other.span_up && self.span_down == other.span_down,
            "Can't merge profiles with different spans"
        );
        for (mine, theirs) in self.values.iter_mut().zip(&other.values) {
            *mine += theirs;
        }
        self.records += other.records;
        Ok(())
    }

    /// `(offset, value)` pairs in ascending offset order.
    pub fn rows(&self) -> impl Iterator<Item = (Pos, Count)> + '_ {
        self.offsets().zip(self.values.iter().copied())
    }

    /// Writes the profile as TSV with a `pos  val  records` header.
    pub fn write_tsv(&self, mut writer: impl Write) -> Result<()> {
        writeln!(writer, "pos\tval\trecords")?;
        for (offset, value) in self.rows() {
            writeln!(writer, "{offset}\t{value}\t{}", self.records)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile() -> Result<()> {
        let mut profile = Profile::new(2, 1)?;
        profile.cover(-2, 1);
        profile.cover(0, 3);
        profile.cover(0, 1);
        profile.cover(2, 10);
        profile.cover(-3, 10);
        profile.add_records(5);

        assert_eq!(
            profile.rows().collect::<Vec<_>>(),
            vec![(-2, 1), (-1, 0), (0, 4), (1, 0)]
        );

        let mut other = Profile::new(2, 1)?;
        other.cover(1, 2);
        other.add_records(1);
        profile.merge(&other)?;
        assert_eq!(profile.get(1), 2);
        assert_eq!(profile.records(), 6);
        assert!(profile.merge(&Profile::new(1, 1)?).is_err());

        let mut buffer = Vec::new();
        profile.write_tsv(&mut buffer)?;
        assert_eq!(
            String::from_utf8(buffer)?,
            "pos\tval\trecords\n-2\t1\t6\n-1\t0\t6\n0\t4\t6\n1\t2\t6\n"
        );
        Ok(())
    }
}
