//! Substitution matrices

use serde::{Deserialize, Serialize};

/// Residue order of [`BLOSUM62`] rows and columns
const BLOSUM62_ALPHABET: &[u8; 24] = b"ARNDCQEGHILKMFPSTWYVBZX*";

/// BLOSUM62 as distributed by NCBI
#[rustfmt::skip]
const BLOSUM62: [[i8; 24]; 24] = [
    //A   R   N   D   C   Q   E   G   H   I   L   K   M   F   P   S   T   W   Y   V   B   Z   X   *
    [ 4, -1, -2, -2,  0, -1, -1,  0, -2, -1, -1, -1, -1, -2, -1,  1,  0, -3, -2,  0, -2, -1,  0, -4], // A
    [-1,  5,  0, -2, -3,  1,  0, -2,  0, -3, -2,  2, -1, -3, -2, -1, -1, -3, -2, -3, -1,  0, -1, -4], // R
    [-2,  0,  6,  1, -3,  0,  0,  0,  1, -3, -3,  0, -2, -3, -2,  1,  0, -4, -2, -3,  3,  0, -1, -4], // N
    [-2, -2,  1,  6, -3,  0,  2, -1, -1, -3, -4, -1, -3, -3, -1,  0, -1, -4, -3, -3,  4,  1, -1, -4], // D
    [ 0, -3, -3, -3,  9, -3, -4, -3, -3, -1, -1, -3, -1, -2, -3, -1, -1, -2, -2, -1, -3, -3, -2, -4], // C
    [-1,  1,  0,  0, -3,  5,  2, -2,  0, -3, -2,  1,  0, -3, -1,  0, -1, -2, -1, -2,  0,  3, -1, -4], // Q
    [-1,  0,  0,  2, -4,  2,  5, -2,  0, -3, -3,  1, -2, -3, -1,  0, -1, -3, -2, -2,  1,  4, -1, -4], // E
    [ 0, -2,  0, -1, -3, -2, -2,  6, -2, -4, -4, -2, -3, -3, -2,  0, -2, -2, -3, -3, -1, -2, -1, -4], // G
    [-2,  0,  1, -1, -3,  0,  0, -2,  8, -3, -3, -1, -2, -1, -2, -1, -2, -2,  2, -3,  0,  0, -1, -4], // H
    [-1, -3, -3, -3, -1, -3, -3, -4, -3,  4,  2, -3,  1,  0, -3, -2, -1, -3, -1,  3, -3, -3, -1, -4], // I
    [-1, -2, -3, -4, -1, -2, -3, -4, -3,  2,  4, -2,  2,  0, -3, -2, -1, -2, -1,  1, -4, -3, -1, -4], // L
    [-1,  2,  0, -1, -3,  1,  1, -2, -1, -3, -2,  5, -1, -3, -1,  0, -1, -3, -2, -2,  0,  1, -1, -4], // K
    [-1, -1, -2, -3, -1,  0, -2, -3, -2,  1,  2, -1,  5,  0, -2, -1, -1, -1, -1,  1, -3, -1, -1, -4], // M
    [-2, -3, -3, -3, -2, -3, -3, -3, -1,  0,  0, -3,  0,  6, -4, -2, -2,  1,  3, -1, -3, -3, -1, -4], // F
    [-1, -2, -2, -1, -3, -1, -1, -2, -2, -3, -3, -1, -2, -4,  7, -1, -1, -4, -3, -2, -2, -1, -2, -4], // P
    [ 1, -1,  1,  0, -1,  0,  0,  0, -1, -2, -2,  0, -1, -2, -1,  4,  1, -3, -2, -2,  0,  0,  0, -4], // S
    [ 0, -1,  0, -1, -1, -1, -1, -2, -2, -1, -1, -1, -1, -2, -1,  1,  5, -2, -2,  0, -1, -1,  0, -4], // T
    [-3, -3, -4, -4, -2, -2, -3, -2, -2, -3, -2, -3, -1,  1, -4, -3, -2, 11,  2, -3, -4, -3, -2, -4], // W
    [-2, -2, -2, -3, -2, -1, -2, -3,  2, -1, -1, -2, -1,  3, -3, -2, -2,  2,  7, -1, -3, -2, -1, -4], // Y
    [ 0, -3, -3, -3, -1, -2, -2, -3, -3,  3,  1, -2,  1, -1, -2, -2,  0, -3, -1,  4, -3, -2, -1, -4], // V
    [-2, -1,  3,  4, -3,  0,  1, -1,  0, -3, -4,  0, -3, -3, -2,  0, -1, -4, -3, -3,  4,  1, -1, -4], // B
    [-1,  0,  0,  1, -3,  3,  4, -2,  0, -3, -3,  1, -1, -3, -1,  0, -1, -3, -2, -2,  1,  4, -1, -4], // Z
    [ 0, -1, -1, -1, -2, -1, -1, -1, -1, -1, -1, -1, -1, -1, -2,  0,  0, -2, -1, -1, -1, -1, -1, -4], // X
    [-4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4,  1], // *
];

/// Row/column of a residue in [`BLOSUM62`]; anything unknown scores as `X`
fn blosum62_index(residue: u8) -> usize {
    let residue = residue.to_ascii_uppercase();
    BLOSUM62_ALPHABET
        .iter()
        .position(|&r| r == residue)
        .unwrap_or(22)
}

/// How a pair of residues is scored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubstitutionMatrix {
    /// BLOSUM62, for protein-protein alignment
    #[default]
    Blosum62,
    /// Flat match/mismatch scores (case-insensitive)
    Identity { match_score: i32, mismatch_score: i32 },
}

impl SubstitutionMatrix {
    /// Score aligning residue `a` against residue `b`
    #[inline]
    pub fn score(&self, a: u8, b: u8) -> i32 {
        match self {
            SubstitutionMatrix::Blosum62 => {
                BLOSUM62[blosum62_index(a)][blosum62_index(b)] as i32
            }
            SubstitutionMatrix::Identity {
                match_score,
                mismatch_score,
            } => {
                if a.eq_ignore_ascii_case(&b) {
                    *match_score
                } else {
                    *mismatch_score
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blosum62_is_symmetric() {
        for (i, row) in BLOSUM62.iter().enumerate() {
            for (j, value) in row.iter().enumerate() {
                assert_eq!(*value, BLOSUM62[j][i], "asymmetry at {},{}", i, j);
            }
        }
    }

    #[test]
    fn test_blosum62_known_values() {
        let m = SubstitutionMatrix::Blosum62;
        assert_eq!(m.score(b'W', b'W'), 11);
        assert_eq!(m.score(b'A', b'A'), 4);
        assert_eq!(m.score(b'C', b'C'), 9);
        assert_eq!(m.score(b'I', b'V'), 3);
        assert_eq!(m.score(b'a', b'A'), 4);
        assert_eq!(m.score(b'*', b'A'), -4);
    }

    #[test]
    fn test_unknown_residue_scores_as_x() {
        let m = SubstitutionMatrix::Blosum62;
        assert_eq!(m.score(b'U', b'A'), m.score(b'X', b'A'));
    }

    #[test]
    fn test_identity_matrix() {
        let m = SubstitutionMatrix::Identity {
            match_score: 2,
            mismatch_score: -3,
        };
        assert_eq!(m.score(b'A', b'a'), 2);
        assert_eq!(m.score(b'A', b'C'), -3);
    }
}
