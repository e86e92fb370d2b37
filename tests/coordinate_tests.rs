//! Tabular tests for genomic, transcript and structural coordinates

use ferro_interface::coords::{index_to_residue, residue_to_index};
use ferro_interface::gene::translate;
use ferro_interface::structure::{pdb_position, pdb_position_chain};
use ferro_interface::{Gene, GenomicInterval};
use rstest::rstest;

/// Forward gene whose residue 4 is split 1 + 2 across the exon junction
fn split_gene() -> Gene {
    Gene::from_exon_bounds("SPLIT", "chr2", &[(0, 9), (20, 30)], 0, 30).unwrap()
}

/// Reverse-strand mirror of [`split_gene`]
fn reverse_split_gene() -> Gene {
    Gene::from_exon_bounds("RSPLIT", "chr2", &[(30, 20), (9, 0)], 0, 30).unwrap()
}

#[rstest]
#[case(0, Some(1))]
#[case(2, Some(1))]
#[case(3, Some(2))]
#[case(9, Some(4))]
#[case(15, None)]
#[case(20, Some(4))]
#[case(21, Some(4))]
#[case(22, Some(5))]
#[case(25, Some(6))]
#[case(30, Some(7))]
#[case(31, None)]
fn test_transcript_aa_position_forward(#[case] pos: u64, #[case] expected: Option<u64>) {
    assert_eq!(split_gene().transcript_aa_position(pos), expected);
}

#[rstest]
#[case(30, Some(1))]
#[case(28, Some(1))]
#[case(27, Some(2))]
#[case(20, Some(4))]
#[case(15, None)]
#[case(9, Some(4))]
#[case(8, Some(5))]
#[case(7, Some(5))]
#[case(0, Some(7))]
fn test_transcript_aa_position_reverse(#[case] pos: u64, #[case] expected: Option<u64>) {
    assert_eq!(reverse_split_gene().transcript_aa_position(pos), expected);
}

#[rstest]
#[case(1, &["chr2:0-2"])]
#[case(3, &["chr2:6-8"])]
#[case(4, &["chr2:9-9", "chr2:20-21"])]
#[case(5, &["chr2:22-24"])]
#[case(7, &["chr2:28-30"])]
#[case(8, &[])]
fn test_genome_positions_forward(#[case] residue: u64, #[case] expected: &[&str]) {
    let intervals: Vec<String> = split_gene()
        .genome_positions(residue)
        .iter()
        .map(|i| i.to_string())
        .collect();
    assert_eq!(intervals, expected);
}

#[rstest]
#[case(1, &["chr2:28-30"])]
#[case(4, &["chr2:20-21", "chr2:9-9"])]
#[case(7, &["chr2:0-2"])]
fn test_genome_positions_reverse(#[case] residue: u64, #[case] expected: &[&str]) {
    let intervals: Vec<String> = reverse_split_gene()
        .genome_positions(residue)
        .iter()
        .map(|i| i.to_string())
        .collect();
    assert_eq!(intervals, expected);
}

#[rstest]
#[case("chr1:100-200", "chr1", 100, 200)]
#[case("chr1:200-100", "chr1", 100, 200)]
#[case("HLA-A:5-6", "HLA-A", 5, 6)]
#[case("X:0-0", "X", 0, 0)]
fn test_genomic_interval_parse(
    #[case] input: &str,
    #[case] chromosome: &str,
    #[case] start: u64,
    #[case] end: u64,
) {
    let interval: GenomicInterval = input.parse().unwrap();
    assert_eq!(interval, GenomicInterval::new(chromosome, start, end));
}

#[rstest]
#[case("chr1")]
#[case("chr1:100")]
#[case(":1-2")]
#[case("chr1:a-b")]
fn test_genomic_interval_parse_invalid(#[case] input: &str) {
    assert!(input.parse::<GenomicInterval>().is_err());
}

#[rstest]
#[case(0, 1)]
#[case(9, 10)]
#[case(99, 100)]
fn test_index_residue_conversion(#[case] index: usize, #[case] residue: u64) {
    assert_eq!(index_to_residue(index), residue);
    assert_eq!(residue_to_index(residue), index);
}

#[rstest]
#[case("52", "A", "52:A")]
#[case("52A", "B", "52A:B")]
#[case("-3", "C", "-3:C")]
fn test_pdb_position(#[case] label: &str, #[case] chain: &str, #[case] expected: &str) {
    let position = pdb_position(label, chain);
    assert_eq!(position, expected);
    assert_eq!(pdb_position_chain(&position), Some(chain));
}

#[rstest]
#[case("ATGAAATAA", "MK*")]
#[case("ATGAAATA", "MK")]
#[case("ATGNNNGGG", "MXG")]
#[case("atggcc", "MA")]
fn test_translate(#[case] cds: &str, #[case] expected: &str) {
    assert_eq!(translate(cds), expected);
}
