use std::collections::BTreeSet;
use std::io::Write;

use ahash::AHashMap;
use eyre::{ensure, Result};
use itertools::Itertools;

use framekit_core_rs::anchor::Wig;
use framekit_core_rs::loc::{Interval, IntervalOp};
use framekit_core_rs::num::{Count, Pos};

use crate::config::Unit;

/// One output line of the composition table.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Row<'a> {
    pub offset: Pos,
    pub token: &'a [u8],
    pub count: Count,
    pub total: Count,
}

/// Token counts at each offset `-span_up..=span_down` around the anchors.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CountTable {
    span_up: Pos,
    span_down: Pos,
    unit: Unit,
    counts: Vec<AHashMap<Vec<u8>, Count>>,
}

impl CountTable {
    pub fn new(span_up: Pos, span_down: Pos, unit: Unit) -> Result<Self> {
        ensure!(
            span_up >= 0 && span_down >= 0,
            "Spans must be non-negative, got {span_up} and {span_down}"
        );
        let offsets = (span_up + span_down + 1) as usize;
        Ok(Self {
            span_up,
            span_down,
            unit,
            counts: vec![AHashMap::new(); offsets],
        })
    }

    pub fn offsets(&self) -> impl Iterator<Item = Pos> {
        -self.span_up..=self.span_down
    }

    fn slot(&self, offset: Pos) -> Option<usize> {
        (offset >= -self.span_up && offset <= self.span_down)
            .then(|| (offset + self.span_up) as usize)
    }

    /// Adds `count` occurrences of `token` at `offset`.
    pub fn add(&mut self, offset: Pos, token: &[u8], count: Count) -> Result<()> {
        let slot = self.slot(offset).ok_or_else(|| {
            eyre::eyre!(
                "Offset {offset} is outside of the table span [-{}, {}]",
                self.span_up,
                self.span_down
            )
        })?;
        let counts = &mut self.counts[slot];
        match counts.get_mut(token) {
            Some(cnt) => *cnt += count,
            None => {
                counts.insert(token.to_vec(), count);
            }
        }
        Ok(())
    }

    pub fn get(&self, offset: Pos, token: &[u8]) -> Count {
        self.slot(offset)
            .and_then(|slot| self.counts[slot].get(token))
            .copied()
            .unwrap_or(0)
    }

    /// Sum of all token counts at the offset.
    pub fn total(&self, offset: Pos) -> Count {
        self.slot(offset)
            .map(|slot| self.counts[slot].values().sum())
            .unwrap_or(0)
    }

    /// Every token observed at any offset, sorted lexicographically.
    pub fn tokens(&self) -> BTreeSet<&[u8]> {
        self.counts
            .iter()
            .flat_map(|x| x.keys().map(|k| k.as_slice()))
            .collect()
    }

    /// Expands every anchor of the wig over the table span and counts the covered tokens.
    ///
    /// Codon anchors are first snapped to the start of their codon. Fails if any token of the span
    /// falls outside the feature or the sequence.
    pub fn tabulate(&mut self, wig: &Wig, sequence: &[u8], feature: &Interval<Pos>) -> Result<()> {
        let width = self.unit.width();
        let mut token = Vec::with_capacity(width as usize);

        for (pos, count) in wig.iter() {
            let anchor = self.unit.snap(pos, feature.start());
            for offset in -self.span_up..=self.span_down {
                let start = anchor + offset * width;
                let end = start + width;
                ensure!(
                    feature.envelops_range(start, end) && end <= sequence.len() as Pos,
                    "Span out of bounds for position {pos} (feature {feature})"
                );

                token.clear();
                token.extend(
                    sequence[start as usize..end as usize]
                        .iter()
                        .map(|x| x.to_ascii_uppercase()),
                );
                self.add(offset, &token, count)?;
            }
        }
        Ok(())
    }

    /// Sums counts of another table with the same layout.
    pub fn merge(&mut self, other: &CountTable) -> Result<()> {
        ensure!(
            self.span_up == other.span_up
                && self.span_down == other.span_down
                && self.unit == other.unit,
            "Can't merge count tables with different layouts"
        );
        for (mine, theirs) in self.counts.iter_mut().zip(&other.counts) {
            for (token, count) in theirs {
                *mine.entry(token.clone()).or_insert(0) += count;
            }
        }
        Ok(())
    }

    /// All rows of the table: every offset crossed with every observed token, zero-filled.
    pub fn rows(&self) -> Vec<Row<'_>> {
        let tokens = self.tokens();
        self.offsets()
            .cartesian_product(tokens.iter().copied())
            .map(|(offset, token)| Row {
                offset,
                token,
                count: self.get(offset, token),
                total: self.total(offset),
            })
            .collect()
    }

    /// Writes the table as TSV with a `pos  <unit>  count  total_count` header.
    pub fn write_tsv(&self, mut writer: impl Write) -> Result<()> {
        writeln!(writer, "pos\t{}\tcount\ttotal_count", self.unit.label())?;
        for row in self.rows() {
            writeln!(
                writer,
                "{}\t{}\t{}\t{}",
                row.offset,
                String::from_utf8_lossy(row.token),
                row.count,
                row.total
            )?;
        }
        Ok(())
    }
}
