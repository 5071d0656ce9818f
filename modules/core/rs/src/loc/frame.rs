//! Reading-frame arithmetic.
//!
//! All frames are relative to an origin, normally the first nucleotide of a forward feature.
//! Position `origin` is in frame 0, `origin + 1` in frame 1, `origin + 2` in frame 2, and the
//! pattern repeats in both directions.

use std::fmt::Display;

#[cfg(feature = "bitcode")]
use bitcode::{Decode, Encode};
use derive_getters::Dissolve;
use derive_more::{Constructor, From};
use eyre::{eyre, Report};

use crate::num::Pos;

/// Number of nucleotides in a codon.
pub const CODON: Pos = 3;

/// Offset of `pos` inside its codon, relative to the reading frame that starts at `origin`.
/// Always in {0, 1, 2}, including positions upstream of the origin.
#[inline(always)]
pub fn frame_offset(pos: Pos, origin: Pos) -> Pos {
    (pos - origin).rem_euclid(CODON)
}

/// First nucleotide of the codon that contains `pos` in the reading frame that starts at `origin`.
#[inline(always)]
pub fn codon_start(pos: Pos, origin: Pos) -> Pos {
    pos - frame_offset(pos, origin)
}

/// One of the three codon phases.
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Frame {
    Zero = 0,
    One = 1,
    Two = 2,
}

impl Frame {
    pub const ALL: [Frame; 3] = [Frame::Zero, Frame::One, Frame::Two];

    /// Frame of `pos` relative to the reading frame that starts at `origin`.
    pub fn of(pos: Pos, origin: Pos) -> Self {
        match frame_offset(pos, origin) {
            0 => Frame::Zero,
            1 => Frame::One,
            _ => Frame::Two,
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl Display for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.index())
    }
}

impl TryFrom<i64> for Frame {
    type Error = Report;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Frame::Zero),
            1 => Ok(Frame::One),
            2 => Ok(Frame::Two),
            _ => Err(eyre!("Reading frame must be 0, 1, or 2, got {value}")),
        }
    }
}

/// A struct that holds data for each reading frame.
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, From, Dissolve, Constructor,
)]
pub struct PerFrame<T> {
    pub zero: T,
    pub one: T,
    pub two: T,
}

impl<T> PerFrame<T> {
    /// Gets a reference to the data for the specified frame.
    pub fn get(&self, frame: Frame) -> &T {
        match frame {
            Frame::Zero => &self.zero,
            Frame::One => &self.one,
            Frame::Two => &self.two,
        }
    }

    /// Gets a mutable reference to the data for the specified frame.
    pub fn get_mut(&mut self, frame: Frame) -> &mut T {
        match frame {
            Frame::Zero => &mut self.zero,
            Frame::One => &mut self.one,
            Frame::Two => &mut self.two,
        }
    }

    /// Iterates over frames in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (Frame, &T)> {
        self.into_iter()
    }

    /// Maps each frame to a new value.
    pub fn map<U>(self, mut f: impl FnMut(Frame, T) -> U) -> PerFrame<U> {
        PerFrame {
            zero: f(Frame::Zero, self.zero),
            one: f(Frame::One, self.one),
            two: f(Frame::Two, self.two),
        }
    }
}

impl<T> IntoIterator for PerFrame<T> {
    type Item = (Frame, T);
    type IntoIter = std::array::IntoIter<(Frame, T), 3>;

    fn into_iter(self) -> Self::IntoIter {
        [
            (Frame::Zero, self.zero),
            (Frame::One, self.one),
            (Frame::Two, self.two),
        ]
        .into_iter()
    }
}

impl<'a, T> IntoIterator for &'a PerFrame<T> {
    type Item = (Frame, &'a T);
    type IntoIter = std::array::IntoIter<(Frame, &'a T), 3>;

    fn into_iter(self) -> Self::IntoIter {
        [
            (Frame::Zero, &self.zero),
            (Frame::One, &self.one),
            (Frame::Two, &self.two),
        ]
        .into_iter()
    }
}
