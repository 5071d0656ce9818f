use std::ops::Range;

use rand::Rng;

use framekit_core_rs::anchor::Wig;
use framekit_core_rs::loc::{frame_offset, CODON};
use framekit_core_rs::num::{Count, Pos};

/// Index of the first nucleotide of `sequence` that starts an in-frame codon, where `sequence`
/// begins at `from` and the reading frame begins at `origin`.
pub fn first_in_frame(from: Pos, origin: Pos) -> usize {
    ((CODON - frame_offset(from, origin)) % CODON) as usize
}

/// Shuffles complete in-frame codons of the sequence, starting from the codon at `first`.
///
/// Each codon is swapped with a uniformly chosen codon among itself and the codons before it,
/// which yields a uniform permutation of codons. Nucleotides outside of complete codons stay in
/// place.
pub fn frame_shuffle(sequence: &mut [u8], first: usize, rng: &mut impl Rng) {
    let codon = CODON as usize;
    let mut i = first;
    while i + 2 < sequence.len() {
        let j = i - codon * rng.random_range(0..=(i - first) / codon);
        if i != j {
            let (head, tail) = sequence.split_at_mut(i);
            head[j..j + codon].swap_with_slice(&mut tail[..codon]);
        }
        i += codon;
    }
}

/// Uniformly permutes wig counts over the positions in `range`; positions without anchors count
/// as zeros. Positions outside the range are untouched.
pub fn randomize(wig: &mut Wig, range: Range<Pos>, rng: &mut impl Rng) {
    let mut counts: Vec<Count> = range.clone().map(|pos| wig.get(pos)).collect();
    for i in 0..counts.len() {
        let j = rng.random_range(0..=i);
        counts.swap(i, j);
    }
    for (pos, count) in range.zip(counts) {
        wig.set(pos, count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn codons(sequence: &[u8], first: usize) -> Vec<Vec<u8>> {
        let mut codons = sequence[first.min(sequence.len())..]
            .chunks_exact(3)
            .map(|x| x.to_vec())
            .collect::<Vec<_>>();
        codons.sort();
        codons
    }

    #[test]
    fn test_first_in_frame() {
        for (from, origin, expected) in [(0, 0, 0), (1, 0, 2), (2, 0, 1), (3, 0, 0), (10, 12, 2)] {
            assert_eq!(first_in_frame(from, origin), expected, "{from} {origin}");
        }
    }

    #[test]
    fn test_frame_shuffle_keeps_flanks() {
        let original = b"TTAAACCCGGGTTTAC".to_vec();
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..20 {
            let mut sequence = original.clone();
            frame_shuffle(&mut sequence, 2, &mut rng);
            assert_eq!(&sequence[..2], b"TT");
            assert_eq!(&sequence[14..], b"AC");
            assert_eq!(codons(&sequence, 2), codons(&original, 2));
        }
    }

    #[test]
    fn test_frame_shuffle_short_sequences() {
        let mut rng = StdRng::seed_from_u64(0);
        for (sequence, first) in [
            (&b""[..], 0),
            (&b"AC"[..], 0),
            (&b"ACG"[..], 1),
            (&b"ACGT"[..], 2),
        ] {
            let mut shuffled = sequence.to_vec();
            frame_shuffle(&mut shuffled, first, &mut rng);
            assert_eq!(shuffled, sequence);
        }
    }

    #[test]
    fn test_frame_shuffle_moves_codons() {
        let original = b"AAACCCGGGTTT".to_vec();
        let mut rng = StdRng::seed_from_u64(1);
        let moved = (0..50).any(|_| {
            let mut sequence = original.clone();
            frame_shuffle(&mut sequence, 0, &mut rng);
            sequence != original
        });
        assert!(moved);
    }

    #[test]
    fn test_randomize() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut wig: Wig = [(0, 7), (10, 3), (12, 1), (50, 2)].into_iter().collect();
        randomize(&mut wig, 10..20, &mut rng);

        assert_eq!(wig.get(0), 7);
        assert_eq!(wig.get(50), 2);
        assert_eq!(wig.mass(), 13);
        let inside = wig.iter().filter(|(p, _)| (10..20).contains(p)).collect::<Vec<_>>();
        let mut counts = inside.iter().map(|x| x.1).collect::<Vec<_>>();
        counts.sort();
        assert_eq!(counts, vec![1, 3]);
    }

    proptest! {
        #[test]
        fn test_frame_shuffle_preserves_codons(
            sequence in prop::collection::vec(prop::sample::select(b"ACGT".to_vec()), 0..80),
            from in 0..100i64,
            origin in 0..100i64,
            seed in any::<u64>(),
        ) {
            let first = first_in_frame(from, origin);
            let mut shuffled = sequence.clone();
            frame_shuffle(&mut shuffled, first, &mut StdRng::seed_from_u64(seed));

            prop_assert_eq!(codons(&shuffled, first), codons(&sequence, first));
            let head = first.min(sequence.len());
            prop_assert_eq!(&shuffled[..head], &sequence[..head]);
            let tail = head + (sequence.len() - head) / 3 * 3;
            prop_assert_eq!(&shuffled[tail..], &sequence[tail..]);
        }

        #[test]
        fn test_randomize_preserves_mass(
            anchors in prop::collection::vec((0..30i64, 1..5u64), 0..20),
            seed in any::<u64>(),
        ) {
            let mut wig: Wig = anchors.into_iter().collect();
            let mass = wig.mass();
            randomize(&mut wig, 0..30, &mut StdRng::seed_from_u64(seed));
            prop_assert_eq!(wig.mass(), mass);
        }
    }
}
