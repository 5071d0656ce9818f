use ahash::AHashMap;
use derive_getters::{Dissolve, Getters};
use eyre::{ensure, Result};
use rand::Rng;

use framekit_core_rs::anchor::Wig;
use framekit_core_rs::loc::{Frame, Interval, IntervalOp, PerFrame};
use framekit_core_rs::num::{Count, Pos};

/// How well the demand of a single reading frame was met.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FrameOutcome {
    /// Every requested anchor was placed.
    #[default]
    Satisfied,
    /// Sampling stopped after too many consecutive misses.
    Partial { unresolved: Count },
    /// The permitted region has no position in this frame.
    Infeasible { unresolved: Count },
}

impl FrameOutcome {
    pub fn unresolved(&self) -> Count {
        match self {
            FrameOutcome::Satisfied => 0,
            FrameOutcome::Partial { unresolved } | FrameOutcome::Infeasible { unresolved } => {
                *unresolved
            }
        }
    }

    pub fn is_satisfied(&self) -> bool {
        matches!(self, FrameOutcome::Satisfied)
    }
}

/// Span of nucleotides around a position: `win_up` upstream, the position itself, and `win_down`
/// downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Dissolve, Getters)]
pub struct Window {
    win_up: Pos,
    win_down: Pos,
}

impl Window {
    pub fn new(win_up: Pos, win_down: Pos) -> Result<Self> {
        ensure!(
            win_up >= 0 && win_down >= 0,
            "Content window must be non-negative, got {win_up} and {win_down}"
        );
        Ok(Self { win_up, win_down })
    }

    /// Number of nucleotides in the window.
    pub fn width(&self) -> usize {
        (self.win_up + self.win_down + 1) as usize
    }

    /// Window nucleotides around `pos`, if the window lies inside the sequence.
    pub fn slice<'a>(&self, sequence: &'a [u8], pos: Pos) -> Option<&'a [u8]> {
        let start = pos - self.win_up;
        let end = pos + self.win_down + 1;
        (start >= 0 && end <= sequence.len() as Pos).then(|| &sequence[start as usize..end as usize])
    }
}

/// Nucleotides observed at each window offset around the anchors of each frame. Every anchor
/// contributes its nucleotides as many times as it was observed.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct ContentModel {
    window: Window,
    pools: PerFrame<Vec<Vec<u8>>>,
    demand: PerFrame<Count>,
}

impl ContentModel {
    /// Collects window content around every anchor of the wig. Fails if any window leaves the
    /// sequence.
    pub fn observe(window: Window, wig: &Wig, sequence: &[u8], origin: Pos) -> Result<Self> {
        let empty = vec![Vec::new(); window.width()];
        let mut pools = PerFrame::new(empty.clone(), empty.clone(), empty);
        let mut demand = PerFrame::<Count>::default();

        for (pos, count) in wig.iter() {
            let frame = Frame::of(pos, origin);
            let content = match window.slice(sequence, pos) {
                Some(content) => content,
                None => eyre::bail!(
                    "Content window [-{}, {}] around {pos} leaves the sequence (length {})",
                    window.win_up,
                    window.win_down,
                    sequence.len()
                ),
            };

            *demand.get_mut(frame) += count;
            for (pool, nt) in pools.get_mut(frame).iter_mut().zip(content) {
                pool.extend(std::iter::repeat_n(*nt, count as usize));
            }
        }

        Ok(Self {
            window,
            pools,
            demand,
        })
    }

    /// Synthesizes a window for the frame by drawing one nucleotide per offset uniformly with
    /// replacement. The frame must have a positive demand.
    pub fn draw(&self, frame: Frame, rng: &mut impl Rng, into: &mut Vec<u8>) {
        into.clear();
        into.extend(
            self.pools
                .get(frame)
                .iter()
                .map(|pool| pool[rng.random_range(0..pool.len())]),
        );
    }
}

/// Exact window content -> candidate positions of each frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositionIndex<'a> {
    windows: AHashMap<&'a [u8], PerFrame<Vec<Pos>>>,
    frames: PerFrame<Count>,
}

impl<'a> CompositionIndex<'a> {
    /// Indexes every position of the region whose window lies inside the sequence.
    pub fn build(
        window: Window,
        sequence: &'a [u8],
        origin: Pos,
        region: impl IntoIterator<Item = Pos>,
    ) -> Self {
        let mut windows: AHashMap<&'a [u8], PerFrame<Vec<Pos>>> = AHashMap::new();
        let mut frames = PerFrame::<Count>::default();
        for pos in region {
            if let Some(content) = window.slice(sequence, pos) {
                let frame = Frame::of(pos, origin);
                windows
                    .entry(content)
                    .or_default()
                    .get_mut(frame)
                    .push(pos);
                *frames.get_mut(frame) += 1;
            }
        }
        Self { windows, frames }
    }

    /// Positions of the frame whose window matches the content exactly.
    pub fn candidates(&self, content: &[u8], frame: Frame) -> &[Pos] {
        self.windows
            .get(content)
            .map(|x| x.get(frame).as_slice())
            .unwrap_or(&[])
    }

    /// Number of indexed positions in the frame.
    pub fn size(&self, frame: Frame) -> Count {
        *self.frames.get(frame)
    }
}

/// Resampled anchors and the outcome for each frame.
#[derive(Debug, Clone, PartialEq, Eq, Dissolve, Getters)]
pub struct Resampled {
    wig: Wig,
    requested: PerFrame<Count>,
    outcomes: PerFrame<FrameOutcome>,
}

/// Relocates anchors inside a feature while preserving the per-frame nucleotide content of the
/// windows around them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Dissolve, Getters)]
pub struct Resampler {
    window: Window,
    max_misses: usize,
}

impl Resampler {
    pub fn new(window: Window, max_misses: usize) -> Result<Self> {
        ensure!(max_misses > 0, "Maximum number of misses must be positive");
        Ok(Self { window, max_misses })
    }

    /// Resamples the wig within the feature. Only positions passing `accept` can receive anchors.
    pub fn resample(
        &self,
        wig: &Wig,
        sequence: &[u8],
        feature: &Interval<Pos>,
        accept: impl Fn(Pos) -> bool,
        rng: &mut impl Rng,
    ) -> Result<Resampled> {
        let origin = feature.start();
        let model = ContentModel::observe(self.window, wig, sequence, origin)?;
        let index = CompositionIndex::build(
            self.window,
            sequence,
            origin,
            feature.as_range().filter(|p| accept(*p)),
        );
        Ok(self.draw(&model, &index, rng))
    }

    /// Fills the demand of each frame with candidates matching synthesized windows.
    pub fn draw(
        &self,
        model: &ContentModel,
        index: &CompositionIndex,
        rng: &mut impl Rng,
    ) -> Resampled {
        let mut wig = Wig::new();
        let mut outcomes = PerFrame::<FrameOutcome>::default();
        let mut content = Vec::with_capacity(self.window.width());

        for frame in Frame::ALL {
            let mut demand = *model.demand().get(frame);
            if demand == 0 {
                continue;
            }
            if index.size(frame) == 0 {
                *outcomes.get_mut(frame) = FrameOutcome::Infeasible { unresolved: demand };
                continue;
            }

            let mut misses = 0;
            while demand > 0 && misses < self.max_misses {
                model.draw(frame, rng, &mut content);
                let candidates = index.candidates(&content, frame);
                if candidates.is_empty() {
                    misses += 1;
                    continue;
                }
                misses = 0;
                demand -= 1;
                wig.add(candidates[rng.random_range(0..candidates.len())], 1);
            }
            if demand > 0 {
                *outcomes.get_mut(frame) = FrameOutcome::Partial { unresolved: demand };
            }
        }

        Resampled {
            wig,
            requested: *model.demand(),
            outcomes,
        }
    }
}
