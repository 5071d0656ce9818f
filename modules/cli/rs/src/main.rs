use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use clap::Parser;
use eyre::{Result, WrapErr};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use framekit_codoncomp_rs::CodonComp;
use framekit_core_rs::anchor::IndexedRecords;
use framekit_core_rs::loc::Feature;
use framekit_core_rs::seq::SequenceStore;
use framekit_gquad_rs::GQuad;
use framekit_io_rs::{bed, fasta, reads};

mod args;

use args::{Cli, CodonCompositionArgs, Command, Common, GQuadArgs};

struct Inputs {
    store: SequenceStore<String>,
    features: Vec<Feature<String>>,
    reads: IndexedRecords<String>,
    rng: StdRng,
}

impl Inputs {
    fn load(common: &Common) -> Result<Self> {
        let store = fasta::load_store(&common.fasta)?;
        let features = bed::load_features(&common.bed)?;
        let reads = reads::load_reads(&common.reads)?;
        info!(
            "Loaded {} sequences, {} features and {} reads",
            store.len(),
            features.len(),
            reads.len()
        );

        let rng = match common.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self {
            store,
            features,
            reads,
            rng,
        })
    }
}

fn writer(output: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match output {
        Some(path) => Box::new(BufWriter::new(File::create(path).wrap_err_with(|| {
            format!("Failed to create the output file {}", path.display())
        })?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

fn codon_composition(args: &CodonCompositionArgs) -> Result<()> {
    let engine = CodonComp::new(args.config()?)?;
    let mut inputs = Inputs::load(&args.common)?;

    let composition = engine.run(
        &inputs.store,
        &inputs.features,
        &mut inputs.reads,
        &mut inputs.rng,
    )?;

    let mut output = writer(args.common.output.as_deref())?;
    composition.table().write_tsv(&mut output)?;
    output.flush()?;
    Ok(())
}

fn gquad(args: &GQuadArgs) -> Result<()> {
    let engine = GQuad::new(args.config()?)?;
    let mut inputs = Inputs::load(&args.common)?;

    let prediction = engine.run(
        &inputs.store,
        &inputs.features,
        &mut inputs.reads,
        &mut inputs.rng,
    )?;

    let mut output = writer(args.common.output.as_deref())?;
    prediction.profile().write_tsv(&mut output)?;
    output.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level()))
        .init();

    match &cli.command {
        Command::CodonComposition(args) => codon_composition(args),
        Command::Gquad(args) => gquad(args),
    }
}
