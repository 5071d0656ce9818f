use std::fmt::Display;
use std::str::FromStr;

use derive_getters::{Dissolve, Getters};
use eyre::{ensure, eyre, Report, Result};

use framekit_core_rs::anchor::Endpoint;
use framekit_core_rs::loc::{codon_start, Interval, IntervalOp, CODON};
use framekit_core_rs::num::Pos;

/// Token tabulated at each offset around an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Unit {
    /// In-frame codons. Anchors are snapped to the start of their codon and offsets step by 3 nt.
    #[default]
    Codon,
    /// Single nucleotides, no snapping.
    Nucleotide,
}

impl Unit {
    /// Length of a single token in nucleotides.
    pub fn width(&self) -> Pos {
        match self {
            Unit::Codon => CODON,
            Unit::Nucleotide => 1,
        }
    }

    /// First nucleotide of the token that contains `pos`.
    pub fn snap(&self, pos: Pos, origin: Pos) -> Pos {
        match self {
            Unit::Codon => codon_start(pos, origin),
            Unit::Nucleotide => pos,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Unit::Codon => "codon",
            Unit::Nucleotide => "nt",
        }
    }
}

impl Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Unit {
    type Err = Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "codon" => Ok(Unit::Codon),
            "nt" | "nucleotide" => Ok(Unit::Nucleotide),
            _ => Err(eyre!("Unknown unit: {s:?}, expected 'codon' or 'nt'")),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Hash, Debug, Dissolve, Getters)]
pub struct Config {
    // Tabulated span around each anchor, in units
    span_up: Pos,
    span_down: Pos,
    unit: Unit,
    // Anchor selection
    endpoint: Endpoint,
    collapse: bool,
    len_lim: Pos,
    q_area: Pos,
    anti: bool,
    // Null model
    random: bool,
    win_up: Pos,
    win_down: Pos,
    max_misses: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            span_up: 0,
            span_down: 0,
            unit: Unit::Codon,
            endpoint: Endpoint::Head,
            collapse: false,
            len_lim: 0,
            q_area: 1000,
            anti: false,
            random: false,
            win_up: 0,
            win_down: 0,
            max_misses: 1000,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_span(&mut self, span_up: Pos, span_down: Pos) -> &mut Self {
        self.span_up = span_up;
        self.span_down = span_down;
        self
    }

    pub fn set_unit(&mut self, unit: Unit) -> &mut Self {
        self.unit = unit;
        self
    }

    pub fn set_endpoint(&mut self, endpoint: Endpoint) -> &mut Self {
        self.endpoint = endpoint;
        self
    }

    pub fn set_collapse(&mut self, collapse: bool) -> &mut Self {
        self.collapse = collapse;
        self
    }

    pub fn set_len_lim(&mut self, len_lim: Pos) -> &mut Self {
        self.len_lim = len_lim;
        self
    }

    pub fn set_q_area(&mut self, q_area: Pos) -> &mut Self {
        self.q_area = q_area;
        self
    }

    pub fn set_anti(&mut self, anti: bool) -> &mut Self {
        self.anti = anti;
        self
    }

    pub fn set_random(&mut self, random: bool) -> &mut Self {
        self.random = random;
        self
    }

    pub fn set_window(&mut self, win_up: Pos, win_down: Pos) -> &mut Self {
        self.win_up = win_up;
        self.win_down = win_down;
        self
    }

    pub fn set_max_misses(&mut self, max_misses: usize) -> &mut Self {
        self.max_misses = max_misses;
        self
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.span_up >= 0 && self.span_down >= 0,
            "Upstream and downstream spans must be non-negative, got {} and {}",
            self.span_up,
            self.span_down
        );
        ensure!(
            self.win_up >= 0 && self.win_down >= 0,
            "Upstream and downstream content windows must be non-negative, got {} and {}",
            self.win_up,
            self.win_down
        );
        ensure!(self.len_lim >= 0, "Length limit must be non-negative");
        ensure!(self.q_area >= 0, "Query area must be non-negative");
        ensure!(
            self.max_misses > 0,
            "The number of consecutive resampling misses must be positive"
        );
        Ok(())
    }

    /// Whether the full span around the anchor fits inside the feature.
    pub fn accepts(&self, pos: Pos, feature: &Interval<Pos>) -> bool {
        let width = self.unit.width();
        let first = self.unit.snap(pos, feature.start());
        first - width * self.span_up >= feature.start()
            && first + width * self.span_down + width <= feature.end()
    }

    /// Whether the anchor is usable on a sequence of the given length: its span must fit inside
    /// the feature and, when resampling, its content window must fit inside the sequence.
    pub fn admits(&self, pos: Pos, feature: &Interval<Pos>, length: Pos) -> bool {
        self.accepts(pos, feature)
            && (!self.random || (pos - self.win_up >= 0 && pos + self.win_down < length))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codon_bounds() -> Result<()> {
        let feature = Interval::new(100, 160)?;
        let mut config = Config::new();
        config.set_span(2, 1);

        // The anchor codon must be at least two codons downstream of the start
        for (pos, expected) in [
            (105, false),
            (106, true),
            (107, true),
            (108, true),
            // ... and leave room for one codon downstream
            (153, true),
            (154, true),
            (156, true),
            (157, false),
            (159, false),
        ] {
            assert_eq!(config.accepts(pos, &feature), expected, "pos {pos}");
        }
        Ok(())
    }

    #[test]
    fn test_nucleotide_bounds() -> Result<()> {
        let feature = Interval::new(0, 20)?;
        let mut config = Config::new();
        config.set_span(3, 4).set_unit(Unit::Nucleotide);

        for (pos, expected) in [(2, false), (3, true), (15, true), (16, false)] {
            assert_eq!(config.accepts(pos, &feature), expected, "pos {pos}");
        }
        Ok(())
    }

    #[test]
    fn test_content_window_bounds() -> Result<()> {
        let feature = Interval::new(0, 30)?;
        let mut config = Config::new();
        config.set_span(0, 1).set_window(3, 3);

        // Without resampling the content window is irrelevant
        for pos in [1, 26] {
            assert!(config.admits(pos, &feature, 30), "pos {pos}");
        }

        config.set_random(true);
        for (pos, expected) in [(1, false), (2, false), (3, true), (26, true), (27, false)] {
            assert_eq!(config.admits(pos, &feature, 30), expected, "pos {pos}");
        }
        // The window may reach past the feature as long as it stays on the sequence
        assert!(config.admits(26, &feature, 40));
        Ok(())
    }

    #[test]
    fn test_validate() {
        assert!(Config::new().validate().is_ok());
        assert!(Config::new().set_span(-1, 2).validate().is_err());
        assert!(Config::new().set_window(0, -3).validate().is_err());
        assert!(Config::new().set_max_misses(0).validate().is_err());
        assert!(Config::new().set_q_area(-10).validate().is_err());
    }

    #[test]
    fn test_unit_from_str() -> Result<()> {
        assert_eq!("codon".parse::<Unit>()?, Unit::Codon);
        assert_eq!("nt".parse::<Unit>()?, Unit::Nucleotide);
        assert!("aa".parse::<Unit>().is_err());
        Ok(())
    }
}
