use std::ops::Range;

use derive_getters::{Dissolve, Getters};
use eyre::{ensure, Result};

use framekit_core_rs::anchor::Endpoint;
use framekit_core_rs::loc::{Frame, Interval, IntervalOp};
use framekit_core_rs::num::Pos;

#[derive(Clone, PartialEq, Eq, Hash, Debug, Dissolve, Getters)]
pub struct Config {
    // Reported offsets around each anchor
    span_up: Pos,
    span_down: Pos,
    // Extra sequence scanned on both sides of the span
    margin: Pos,
    // Anchor selection
    endpoint: Endpoint,
    collapse: bool,
    len_lim: Pos,
    q_area: Pos,
    anti: bool,
    // Null models
    random: bool,
    shuffle: bool,
    // Keep only hits starting in this frame
    orf: Option<Frame>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            span_up: 0,
            span_down: 0,
            margin: 50,
            endpoint: Endpoint::Head,
            collapse: false,
            len_lim: 0,
            q_area: 1000,
            anti: false,
            random: false,
            shuffle: false,
            orf: None,
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

    pub fn set_margin(&mut self, margin: Pos) -> &mut Self {
        self.margin = margin;
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

    pub fn set_shuffle(&mut self, shuffle: bool) -> &mut Self {
        self.shuffle = shuffle;
        self
    }

    pub fn set_orf(&mut self, orf: Option<Frame>) -> &mut Self {
        self.orf = orf;
        self
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.span_up >= 0 && self.span_down >= 0,
            "Upstream and downstream spans must be non-negative, got {} and {}",
            self.span_up,
            self.span_down
        );
        ensure!(self.margin >= 0, "Scan margin must be non-negative");
        ensure!(self.len_lim >= 0, "Length limit must be non-negative");
        ensure!(self.q_area >= 0, "Query area must be non-negative");
        Ok(())
    }

    /// Anchors that can receive a full scan window inside the feature.
    pub fn permitted(&self, feature: &Interval<Pos>) -> Range<Pos> {
        let start = feature.start() + self.span_up + self.margin;
        let end = feature.end() - self.span_down - self.margin;
        start..end.max(start)
    }

    pub fn accepts(&self, pos: Pos, feature: &Interval<Pos>) -> bool {
        self.permitted(feature).contains(&pos)
    }

    /// Scanned region around the anchor: the span extended by the margin on both sides.
    pub fn scan_window(&self, pos: Pos) -> Range<Pos> {
        pos - self.span_up - self.margin..pos + self.span_down + self.margin + 1
    }
}
