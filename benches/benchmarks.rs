//! Performance benchmarks for ferro-interface
//!
//! Run with: cargo bench
//! Run specific benchmark: cargo bench -- alignment

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ferro_interface::{
    AlignmentMode, Gene, InteractionQuery, MockProvider, PairwiseAligner, PositionManager,
    QueryScope, Range, RangeMerger, SequenceAligner,
};

const RESIDUES: &[u8] = b"ACDEFGHIKLMNPQRSTVWY";

/// Deterministic pseudo-protein of length `len`
fn protein(len: usize, seed: usize) -> String {
    (0..len)
        .map(|i| RESIDUES[(i * 7 + seed * 13 + i / 5) % RESIDUES.len()] as char)
        .collect()
}

/// Copy of `sequence` with every `every`-th residue dropped
fn with_deletions(sequence: &str, every: usize) -> String {
    sequence
        .chars()
        .enumerate()
        .filter(|(i, _)| i % every != every - 1)
        .map(|(_, c)| c)
        .collect()
}

// =============================================================================
// Alignment benchmarks
// =============================================================================

/// Benchmark global and local alignment at increasing sequence lengths
fn bench_alignment(c: &mut Criterion) {
    let aligner = PairwiseAligner::default();
    let mut group = c.benchmark_group("alignment");

    for len in [50, 200, 500, 1000] {
        let a = protein(len, 1);
        let b = with_deletions(&a, 40);
        group.throughput(Throughput::Elements((a.len() * b.len()) as u64));

        group.bench_with_input(BenchmarkId::new("global", len), &len, |bench, _| {
            bench.iter(|| aligner.align(black_box(&a), black_box(&b), AlignmentMode::Global))
        });

        let fragment = &a[len / 4..len / 2];
        group.bench_with_input(BenchmarkId::new("local", len), &len, |bench, _| {
            bench.iter(|| aligner.align(black_box(&a), black_box(fragment), AlignmentMode::Local))
        });
    }

    group.finish();
}

// =============================================================================
// Position mapping benchmarks
// =============================================================================

/// Benchmark genomic region to residue conversion on a multi-exon gene
fn bench_position_mapping(c: &mut Criterion) {
    // ten exons of 90 coding bases separated by 1 kb introns
    let bounds: Vec<(u64, u64)> = (0..10u64).map(|i| (i * 1090, i * 1090 + 89)).collect();
    let coding_end = bounds[9].1;
    let sequence = protein(300, 3);
    let gene = Gene::from_exon_bounds("BENCH", "chr1", &bounds, 0, coding_end)
        .expect("valid gene model")
        .with_transcript_sequence(sequence.clone())
        .with_uniprot_sequence(with_deletions(&sequence, 60));

    let mut group = c.benchmark_group("position_mapping");
    for (name, min, max) in [
        ("one_exon", 2200u64, 2260u64),
        ("intron_spanning", 3300, 5500),
        ("whole_gene", 0, coding_end),
    ] {
        group.bench_function(name, |bench| {
            bench.iter(|| {
                let mut gene = gene.clone();
                let mut positions = PositionManager::new();
                positions.aa_positions(&mut gene, black_box(min), black_box(max))
            })
        });
    }
    group.finish();
}

/// Benchmark residue to genome projection
fn bench_genome_positions(c: &mut Criterion) {
    let bounds: Vec<(u64, u64)> = (0..10u64).map(|i| (i * 1090, i * 1090 + 88)).collect();
    let gene = Gene::from_exon_bounds("BENCH", "chr1", &bounds, 0, bounds[9].1)
        .expect("valid gene model");

    c.bench_function("genome_positions", |bench| {
        bench.iter(|| {
            (1..=296u64)
                .map(|residue| gene.genome_positions(black_box(residue)).len())
                .sum::<usize>()
        })
    });
}

// =============================================================================
// Range merging benchmarks
// =============================================================================

fn bench_range_merger(c: &mut Criterion) {
    let ranges: Vec<Range> = (0..1000u64)
        .map(|i| {
            let min = (i * 7919) % 100_000;
            Range::new(min, min + (i % 50))
        })
        .collect();

    c.bench_function("range_merger_1000", |bench| {
        bench.iter(|| {
            let mut merger = RangeMerger::new();
            for range in &ranges {
                merger.add_range("chr1", *black_box(range));
            }
            merger.len()
        })
    });
}

// =============================================================================
// Full pipeline benchmarks
// =============================================================================

fn bench_full_query(c: &mut Criterion) {
    let provider = MockProvider::with_test_data();
    let query = InteractionQuery::new("chr1", 1000, 1129, "P11111", "P22222");

    c.bench_function("full_query", |bench| {
        bench.iter(|| {
            let mut scope = QueryScope::new(&provider, &provider);
            for gene in provider.genes() {
                scope.add_gene(gene.clone());
            }
            scope.run(black_box(&query)).map(|report| report.overall_quality())
        })
    });
}

criterion_group!(
    benches,
    bench_alignment,
    bench_position_mapping,
    bench_genome_positions,
    bench_range_merger,
    bench_full_query,
);

criterion_main!(benches);
