use std::fmt::Display;
use std::str::FromStr;

#[cfg(feature = "bitcode")]
use bitcode::{Decode, Encode};
use eyre::{eyre, Report};

/// Orientation of a feature or of an aligned read relative to the reference.
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(i8)]
pub enum Orientation {
    /// Object is located on the forward strand, also known as the positive strand or Watson strand.
    Forward,
    /// Object is located on the reverse strand, also known as the negative strand or Crick strand.
    Reverse,
    /// Orientation is unknown or not applicable (BED '.').
    Dual,
}

impl Orientation {
    /// New orientation that is the opposite of the current one. Dual orientation remains the same.
    pub fn flipped(&self) -> Self {
        match self {
            Orientation::Forward => Orientation::Reverse,
            Orientation::Reverse => Orientation::Forward,
            Orientation::Dual => Orientation::Dual,
        }
    }

    /// Get the symbolic representation of the orientation.
    pub fn symbol(&self) -> char {
        match self {
            Orientation::Forward => '+',
            Orientation::Reverse => '-',
            Orientation::Dual => '.',
        }
    }

    /// Index of a stranded orientation, used by per-orientation lookup tables.
    /// Dual orientation has no reading direction and therefore no index.
    pub fn stranded_index(&self) -> Option<usize> {
        match self {
            Orientation::Forward => Some(0),
            Orientation::Reverse => Some(1),
            Orientation::Dual => None,
        }
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Orientation::Dual
    }
}

impl Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl TryFrom<char> for Orientation {
    type Error = Report;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '+' => Ok(Orientation::Forward),
            '-' => Ok(Orientation::Reverse),
            '.' | '=' => Ok(Orientation::Dual),
            _ => Err(eyre!("Invalid orientation symbol: {value:?}")),
        }
    }
}

impl FromStr for Orientation {
    type Err = Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(symbol), None) => Orientation::try_from(symbol),
            _ => Err(eyre!("Invalid orientation: {s:?}")),
        }
    }
}
