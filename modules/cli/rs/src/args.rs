use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use eyre::{Result, WrapErr};

use framekit_codoncomp_rs::{Config as CodonConfig, Unit};
use framekit_core_rs::anchor::Endpoint;
use framekit_core_rs::loc::Frame;
use framekit_core_rs::num::Pos;
use framekit_gquad_rs::Config as GQuadConfig;

#[derive(Parser, Debug)]
#[command(name = "framekit", version)]
#[command(about = "Positional statistics of the reference around read anchors")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase verbosity level (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only report errors
    #[arg(short = 'q', long = "quiet", global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Codon (or nucleotide) composition around read anchors
    CodonComposition(CodonCompositionArgs),
    /// Density of predicted G-quadruplexes around read anchors
    Gquad(GQuadArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Position {
    #[value(name = "5p", alias = "head")]
    FivePrime,
    #[value(name = "3p", alias = "tail")]
    ThreePrime,
}

impl From<Position> for Endpoint {
    fn from(value: Position) -> Self {
        match value {
            Position::FivePrime => Endpoint::Head,
            Position::ThreePrime => Endpoint::Tail,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Token {
    Codon,
    #[value(alias = "nucleotide")]
    Nt,
}

impl From<Token> for Unit {
    fn from(value: Token) -> Self {
        match value {
            Token::Codon => Unit::Codon,
            Token::Nt => Unit::Nucleotide,
        }
    }
}

/// Inputs and anchor selection options shared by all subcommands.
#[derive(Args, Debug)]
pub struct Common {
    /// Reference sequences (FASTA, optionally gzip-compressed)
    #[arg(short = 'f', long)]
    pub fasta: PathBuf,

    /// Features, e.g. coding sequences (BED6)
    #[arg(short = 'b', long)]
    pub bed: PathBuf,

    /// Aligned reads, one BED6 line per read
    #[arg(short = 'r', long)]
    pub reads: PathBuf,

    /// Read end used as the anchor
    #[arg(long, value_enum, default_value = "5p")]
    pub pos: Position,

    /// Positions reported upstream of the anchor
    #[arg(long, default_value_t = 10)]
    pub span_up: Pos,

    /// Positions reported downstream of the anchor
    #[arg(long, default_value_t = 10)]
    pub span_down: Pos,

    /// Count each anchor position once, regardless of the number of reads
    #[arg(long)]
    pub collapse: bool,

    /// Skip features shorter than this
    #[arg(long, default_value_t = 0)]
    pub len_lim: Pos,

    /// Extra flank used when querying reads around a feature
    #[arg(long, default_value_t = 1000)]
    pub q_area: Pos,

    /// Use reads from the opposite strand of the feature
    #[arg(long)]
    pub anti: bool,

    /// Replace observed anchors with randomly placed ones
    #[arg(long)]
    pub random: bool,

    /// Seed of the random number generator
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output table (stdout if not given)
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct CodonCompositionArgs {
    #[command(flatten)]
    pub common: Common,

    /// Counted token
    #[arg(long, value_enum, default_value = "codon")]
    pub unit: Token,

    /// Content window upstream of the anchor, used with --random
    #[arg(long, default_value_t = 0)]
    pub win_up: Pos,

    /// Content window downstream of the anchor, used with --random
    #[arg(long, default_value_t = 0)]
    pub win_down: Pos,

    /// Consecutive failed draws tolerated per frame before resampling gives up
    #[arg(long, default_value_t = 1000)]
    pub max_misses: usize,
}

impl CodonCompositionArgs {
    pub fn config(&self) -> Result<CodonConfig> {
        let common = &self.common;
        let mut config = CodonConfig::new();
        config
            .set_span(common.span_up, common.span_down)
            .set_unit(self.unit.into())
            .set_endpoint(common.pos.into())
            .set_collapse(common.collapse)
            .set_len_lim(common.len_lim)
            .set_q_area(common.q_area)
            .set_anti(common.anti)
            .set_random(common.random)
            .set_window(self.win_up, self.win_down)
            .set_max_misses(self.max_misses);
        config.validate()?;
        Ok(config)
    }
}

#[derive(Args, Debug)]
pub struct GQuadArgs {
    #[command(flatten)]
    pub common: Common,

    /// Shuffle codons within each scanned window, keeping their frame
    #[arg(long)]
    pub shuffle: bool,

    /// Only report quadruplexes starting in this frame (-1 for any frame)
    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    pub orf: i64,

    /// Scanned flank beyond the reported span on each side
    #[arg(long, default_value_t = 50)]
    pub margin: Pos,
}

impl GQuadArgs {
    pub fn orf(&self) -> Result<Option<Frame>> {
        match self.orf {
            -1 => Ok(None),
            x => Frame::try_from(x).map(Some).wrap_err("Invalid --orf value"),
        }
    }

    pub fn config(&self) -> Result<GQuadConfig> {
        let common = &self.common;
        let mut config = GQuadConfig::new();
        config
            .set_span(common.span_up, common.span_down)
            .set_margin(self.margin)
            .set_endpoint(common.pos.into())
            .set_collapse(common.collapse)
            .set_len_lim(common.len_lim)
            .set_q_area(common.q_area)
            .set_anti(common.anti)
            .set_random(common.random)
            .set_shuffle(self.shuffle)
            .set_orf(self.orf()?);
        config.validate()?;
        Ok(config)
    }
}
