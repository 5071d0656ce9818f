use std::path::PathBuf;

use eyre::{ensure, eyre, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

use framekit_codoncomp_rs::{CodonComp, Config, Unit};
use framekit_core_rs::anchor::{AnchorRecord, Endpoint, IndexedRecords};
use framekit_core_rs::loc::{Feature, Interval, IntervalOp, Orientation};
use framekit_core_rs::num::Pos;
use framekit_core_rs::seq::SequenceStore;
use framekit_io_rs::{bed, fasta, reads};

fn get_resource_path(resource: &str) -> Result<PathBuf> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(4)
        .map(|x| x.join("resources").join(resource))
        .ok_or_else(|| eyre!("Failed to locate requested resource: {resource}"))?;
    ensure!(
        path.exists(),
        "Requested resource does not exist: {}",
        path.display()
    );
    Ok(path)
}

fn synthetic(len: usize) -> Result<(SequenceStore<String>, Feature<String>)> {
    let sequence: Vec<u8> = b"ATGGCTAAACCCGATTTG".iter().cycle().take(len).copied().collect();
    let store: SequenceStore<String> = [("chr1".to_string(), sequence)].into_iter().collect();
    let feature = Feature::new(
        "chr1".to_string(),
        Interval::new(0, len as Pos)?,
        Orientation::Forward,
        None,
    );
    Ok((store, feature))
}

#[test]
fn anchors_downstream_of_origin() -> Result<()> {
    let (store, feature) = synthetic(300)?;
    let mut reads = IndexedRecords::new();
    for _ in 0..10 {
        reads.add("chr1".to_string(), AnchorRecord::new(Orientation::Forward, 30, 60)?);
    }

    let mut config = Config::new();
    config.set_span(2, 2).set_endpoint(Endpoint::Head);
    let mut rng = StdRng::seed_from_u64(0);
    let result = CodonComp::new(config)?.run(&store, [&feature], &mut reads, &mut rng)?;

    // Position 30 is the start of "GAT" in the repeating 18-mer
    let table = result.table();
    assert_eq!(table.get(0, b"GAT"), 10);
    assert_eq!(table.total(0), 10);
    assert_eq!(table.get(-2, b"AAA"), 10);
    assert_eq!(table.get(-1, b"CCC"), 10);
    assert_eq!(table.get(1, b"TTG"), 10);
    assert_eq!(table.get(2, b"ATG"), 10);

    let mut output = Vec::new();
    table.write_tsv(&mut output)?;
    let output = String::from_utf8(output)?;
    assert!(output.starts_with("pos\tcodon\tcount\ttotal_count\n-2\t"));
    assert!(output.contains("\n0\tGAT\t10\t10\n"));
    assert!(output.contains("\n0\tAAA\t0\t10\n"));
    Ok(())
}

#[test]
fn upstream_boundary_is_exact() -> Result<()> {
    let (store, feature) = synthetic(300)?;
    let mut config = Config::new();
    config.set_span(3, 0);

    // Anchors inside the codon that starts exactly 3 codons downstream are kept
    for (head, kept) in [(6, false), (8, false), (9, true), (11, true)] {
        let mut reads = IndexedRecords::new();
        reads.add("chr1".to_string(), AnchorRecord::new(Orientation::Forward, head, head + 20)?);

        let mut rng = StdRng::seed_from_u64(0);
        let result = CodonComp::new(config.clone())?.run(&store, [&feature], &mut reads, &mut rng)?;
        assert_eq!(result.table().total(0), kept as u64, "head {head}");
        assert_eq!(result.census().tally().out_of_bounds, !kept as u64, "head {head}");
    }
    Ok(())
}

#[test]
fn tail_anchors_of_reverse_reads_with_anti() -> Result<()> {
    let (store, feature) = synthetic(300)?;
    let mut reads = IndexedRecords::new();
    reads.add("chr1".to_string(), AnchorRecord::new(Orientation::Reverse, 30, 90)?);
    reads.add("chr1".to_string(), AnchorRecord::new(Orientation::Forward, 30, 90)?);

    let mut config = Config::new();
    config
        .set_span(0, 0)
        .set_endpoint(Endpoint::Tail)
        .set_anti(true)
        .set_unit(Unit::Nucleotide);
    let mut rng = StdRng::seed_from_u64(0);
    let result = CodonComp::new(config)?.run(&store, [&feature], &mut reads, &mut rng)?;

    // Tail of a reverse read is its leftmost nucleotide
    assert_eq!(result.table().get(0, b"G"), 1);
    assert_eq!(result.table().total(0), 1);
    assert_eq!(result.census().tally().records, 1);
    Ok(())
}

#[test]
fn resource_files() -> Result<()> {
    let store = fasta::load_store(get_resource_path("fasta/example.fa.gz")?)?;
    let features = bed::load_features(get_resource_path("bed/features.bed")?)?;
    let mut reads = reads::load_reads(get_resource_path("bed/reads.bed")?)?;

    let mut config = Config::new();
    config.set_span(1, 1).set_len_lim(31);

    // The reverse-orientation feature is rejected
    let engine = CodonComp::new(config)?;
    let mut rng = StdRng::seed_from_u64(0);
    assert!(engine.run(&store, &features, &mut reads, &mut rng).is_err());

    let forward = features
        .iter()
        .filter(|x| *x.orientation() == Orientation::Forward);
    let result = engine.run(&store, forward, &mut reads, &mut rng)?;
    let census = result.census();
    assert_eq!(*census.processed(), 1);
    assert_eq!(*census.too_short(), 1);

    // Heads at 9, 9 and 21 on chr1 (0..60)
    assert_eq!(result.table().total(0), 3);
    assert_eq!(features[0].len(), 60);
    Ok(())
}
