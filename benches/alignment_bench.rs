use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use localign::bio::alignment::{
    FillStrategy, GapPenalty, NamedMatrix, NucleotideMatrix, ScoringModel, SmithWaterman,
};
use localign::bio::sequence::Sequence;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;

/// Seeded random symbols, so tied maxima stay rare
fn generate_from(alphabet: &[u8], length: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..length)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
        .collect()
}

fn generate_sequence(length: usize, seed: u8) -> Sequence {
    Sequence::new(format!("seq_{}", seed), generate_from(b"ACGT", length, seed as u64))
}

fn generate_protein_sequence(length: usize, seed: u8) -> Sequence {
    Sequence::new(
        format!("protein_{}", seed),
        generate_from(b"ARNDCQEGHILKMFPSTWYV", length, seed as u64),
    )
}

fn nucleotide_aligner(strategy: FillStrategy) -> SmithWaterman<NucleotideMatrix> {
    SmithWaterman::new(NucleotideMatrix::new(2, -1), GapPenalty::new(2).unwrap())
        .with_fill_strategy(strategy)
}

fn bench_short_alignment(c: &mut Criterion) {
    let mut group = c.benchmark_group("alignment/short");
    let aligner = nucleotide_aligner(FillStrategy::RowMajor);

    for length in [10, 25, 50, 100].iter() {
        let seq1 = generate_sequence(*length, 1);
        let seq2 = generate_sequence(*length, 2);

        group.bench_with_input(BenchmarkId::from_parameter(length), length, |b, _| {
            b.iter(|| aligner.align_sequences(black_box(&seq1), black_box(&seq2)))
        });
    }

    group.finish();
}

fn bench_fill_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("alignment/fill");
    group.sample_size(10);

    for length in [500, 1000, 2500].iter() {
        let seq1 = generate_sequence(*length, 1);
        let seq2 = generate_sequence(*length, 2);

        for strategy in [FillStrategy::RowMajor, FillStrategy::Wavefront] {
            let aligner = nucleotide_aligner(strategy);
            group.bench_with_input(
                BenchmarkId::new(strategy.to_string(), length),
                length,
                |b, _| b.iter(|| aligner.build_matrix(black_box(&seq1.sequence), black_box(&seq2.sequence))),
            );
        }
    }

    group.finish();
}

fn bench_protein_alignment(c: &mut Criterion) {
    let mut group = c.benchmark_group("alignment/protein");
    let aligner = SmithWaterman::new(
        ScoringModel::substitution(NamedMatrix::Blosum62),
        GapPenalty::new(8).unwrap(),
    );

    for length in [50, 100, 250, 500].iter() {
        let seq1 = generate_protein_sequence(*length, 1);
        let seq2 = generate_protein_sequence(*length, 2);

        group.bench_with_input(BenchmarkId::from_parameter(length), length, |b, _| {
            b.iter(|| aligner.align_sequences(black_box(&seq1), black_box(&seq2)))
        });
    }

    group.finish();
}

fn bench_identical_alignment(c: &mut Criterion) {
    let mut group = c.benchmark_group("alignment/identical");
    let aligner = nucleotide_aligner(FillStrategy::RowMajor);

    for length in [100, 500, 1000].iter() {
        let seq = generate_sequence(*length, 1);

        group.bench_with_input(BenchmarkId::from_parameter(length), length, |b, _| {
            b.iter(|| aligner.align_sequences(black_box(&seq), black_box(&seq)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_short_alignment,
    bench_fill_strategies,
    bench_protein_alignment,
    bench_identical_alignment
);
criterion_main!(benches);
