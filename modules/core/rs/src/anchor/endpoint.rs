use std::fmt::Display;
use std::str::FromStr;

use eyre::{eyre, OptionExt, Report, Result};

use crate::loc::IntervalOp;
use crate::num::Pos;

use super::record::AnchorRecord;

/// Which end of a read is used as its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Endpoint {
    /// First nucleotide in the direction of the read orientation (5' end).
    #[default]
    Head,
    /// Last nucleotide in the direction of the read orientation (3' end).
    Tail,
}

#[derive(Debug, Clone, Copy)]
enum Side {
    First,
    Last,
}

// [endpoint][stranded orientation index]
const SIDES: [[Side; 2]; 2] = [
    // Head: forward -> start, reverse -> end - 1
    [Side::First, Side::Last],
    // Tail: forward -> end - 1, reverse -> start
    [Side::Last, Side::First],
];

impl Endpoint {
    /// Anchor position of the record. Records without a reading direction can't be anchored.
    pub fn select(&self, record: &AnchorRecord) -> Result<Pos> {
        let column = record.orientation().stranded_index().ok_or_eyre(
            "Read orientation must be forward or reverse to select its head or tail",
        )?;
        let side = SIDES[*self as usize][column];
        Ok(match side {
            Side::First => record.start(),
            Side::Last => record.last(),
        })
    }

    pub fn label(&self) -> &'static str {
        match self {
            Endpoint::Head => "5p",
            Endpoint::Tail => "3p",
        }
    }
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Endpoint {
    type Err = Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "5p" | "head" => Ok(Endpoint::Head),
            "3p" | "tail" => Ok(Endpoint::Tail),
            _ => Err(eyre!("Position selector must be either 5p or 3p, got {s:?}")),
        }
    }
}
