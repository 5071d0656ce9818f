use derive_getters::{Dissolve, Getters};
use eyre::{Result, WrapErr};
use regex::bytes::{Regex, RegexBuilder};

use framekit_core_rs::loc::Frame;
use framekit_core_rs::num::Pos;

/// Four runs of 2-4 guanines separated by loops of 1-7 nucleotides.
pub const G4_PATTERN: &str = r"G{2,4}.{1,7}G{2,4}.{1,7}G{2,4}.{1,7}G{2,4}";

/// A single motif occurrence in the scanned sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Dissolve, Getters)]
pub struct Hit {
    // Half-open span relative to the start of the scanned sequence
    start: usize,
    end: usize,
    // Frame of the first matched nucleotide relative to the feature origin
    frame: Frame,
}

/// Finds non-overlapping, leftmost-first motif occurrences.
#[derive(Debug, Clone)]
pub struct Scanner {
    regex: Regex,
    orf: Option<Frame>,
}

impl Scanner {
    /// G-quadruplex scanner. Hits outside `orf` are dropped when it's set.
    pub fn new(orf: Option<Frame>) -> Result<Self> {
        Self::with_pattern(G4_PATTERN, orf)
    }

    pub fn with_pattern(pattern: &str, orf: Option<Frame>) -> Result<Self> {
        let regex = RegexBuilder::new(pattern)
            .unicode(false)
            .build()
            .wrap_err_with(|| format!("Invalid motif pattern: {pattern}"))?;
        Ok(Self { regex, orf })
    }

    pub fn orf(&self) -> Option<Frame> {
        self.orf
    }

    /// Scans `sequence`, whose first nucleotide is located at `from` in the reference.
    pub fn scan<'a>(
        &'a self,
        sequence: &'a [u8],
        from: Pos,
        origin: Pos,
    ) -> impl Iterator<Item = Hit> + 'a {
        self.regex
            .find_iter(sequence)
            .map(move |m| Hit {
                start: m.start(),
                end: m.end(),
                frame: Frame::of(from + m.start() as Pos, origin),
            })
            .filter(|hit| self.orf.is_none_or(|orf| orf == hit.frame))
    }
}
