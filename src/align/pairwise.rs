//! Affine-gap dynamic programming aligner
//!
//! Three score matrices are filled (Gotoh):
//!
//! - `M[i][j]`: best alignment of `a[..i]`, `b[..j]` ending with `a[i-1]`
//!   aligned to `b[j-1]`
//! - `X[i][j]`: ending with `a[i-1]` against a gap
//! - `Y[i][j]`: ending with `b[j-1]` against a gap
//!
//! Each cell keeps a one-byte pointer to the state it came from, so the
//! traceback never has to re-derive scores. Ties are broken M, then X,
//! then Y, which keeps the output stable for identical inputs.

use super::{Alignment, AlignmentMode, ScoringScheme, SequenceAligner, GAP};
use crate::error::InterfaceError;

/// Score of an unreachable cell; far enough from `i32::MIN` that adding
/// penalties cannot overflow.
const NEG: i32 = i32::MIN / 4;

const FROM_M: u8 = 0;
const FROM_X: u8 = 1;
const FROM_Y: u8 = 2;
/// Local alignment starts at this cell
const START: u8 = 3;

/// Pick the best of the three states, preferring M, then X, then Y
#[inline]
fn best_of(m: i32, x: i32, y: i32) -> (i32, u8) {
    if m >= x && m >= y {
        (m, FROM_M)
    } else if x >= y {
        (x, FROM_X)
    } else {
        (y, FROM_Y)
    }
}

/// Dynamic programming aligner with affine gap penalties
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PairwiseAligner {
    scoring: ScoringScheme,
}

impl PairwiseAligner {
    /// Create an aligner with the given scoring scheme
    pub fn new(scoring: ScoringScheme) -> Self {
        Self { scoring }
    }

    /// Scoring scheme used by this aligner
    pub fn scoring(&self) -> &ScoringScheme {
        &self.scoring
    }

    fn check_input(name: &str, seq: &str) -> Result<(), InterfaceError> {
        if seq.is_empty() {
            return Err(InterfaceError::InvalidSequenceInput {
                msg: format!("{} sequence is empty", name),
            });
        }
        if !seq.is_ascii() {
            return Err(InterfaceError::InvalidSequenceInput {
                msg: format!("{} sequence contains non-ASCII characters", name),
            });
        }
        Ok(())
    }
}

/// Filled matrices for one alignment
struct Matrices {
    cols: usize,
    m: Vec<i32>,
    x: Vec<i32>,
    y: Vec<i32>,
    ptr_m: Vec<u8>,
    ptr_x: Vec<u8>,
    ptr_y: Vec<u8>,
}

impl Matrices {
    fn new(rows: usize, cols: usize) -> Self {
        let size = rows * cols;
        Self {
            cols,
            m: vec![NEG; size],
            x: vec![NEG; size],
            y: vec![NEG; size],
            ptr_m: vec![START; size],
            ptr_x: vec![FROM_M; size],
            ptr_y: vec![FROM_M; size],
        }
    }

    #[inline]
    fn idx(&self, i: usize, j: usize) -> usize {
        i * self.cols + j
    }
}

impl SequenceAligner for PairwiseAligner {
    fn align(&self, a: &str, b: &str, mode: AlignmentMode) -> Result<Alignment, InterfaceError> {
        Self::check_input("first", a)?;
        Self::check_input("second", b)?;

        let a = a.as_bytes();
        let b = b.as_bytes();
        let (n, m) = (a.len(), b.len());
        let open = self.scoring.gap_open;
        let extend = self.scoring.gap_extend;
        let local = mode == AlignmentMode::Local;

        let mut dp = Matrices::new(n + 1, m + 1);

        if !local {
            let origin = dp.idx(0, 0);
            dp.m[origin] = 0;
            for i in 1..=n {
                let k = dp.idx(i, 0);
                dp.x[k] = -(open + (i as i32 - 1) * extend);
                dp.ptr_x[k] = if i == 1 { FROM_M } else { FROM_X };
            }
            for j in 1..=m {
                let k = dp.idx(0, j);
                dp.y[k] = -(open + (j as i32 - 1) * extend);
                dp.ptr_y[k] = if j == 1 { FROM_M } else { FROM_Y };
            }
        }

        // Local alignments always end in M
        let mut best = (0, 0, 0);

        for i in 1..=n {
            for j in 1..=m {
                let k = dp.idx(i, j);
                let diag = dp.idx(i - 1, j - 1);
                let up = dp.idx(i - 1, j);
                let left = dp.idx(i, j - 1);

                let s = self.scoring.matrix.score(a[i - 1], b[j - 1]);
                let (prev, from) = best_of(dp.m[diag], dp.x[diag], dp.y[diag]);
                if local && prev <= 0 {
                    dp.m[k] = s;
                    dp.ptr_m[k] = START;
                } else {
                    dp.m[k] = prev + s;
                    dp.ptr_m[k] = from;
                }

                let (x, from_x) =
                    best_of(dp.m[up] - open, dp.x[up] - extend, dp.y[up] - open);
                dp.x[k] = x;
                dp.ptr_x[k] = from_x;

                let (y, from_y) =
                    best_of(dp.m[left] - open, dp.x[left] - open, dp.y[left] - extend);
                dp.y[k] = y;
                dp.ptr_y[k] = from_y;

                if local && dp.m[k] > best.0 {
                    best = (dp.m[k], i, j);
                }
            }
        }

        let (score, mut i, mut j, mut state) = if local {
            if best.0 <= 0 {
                return Ok(Alignment::default());
            }
            (best.0, best.1, best.2, FROM_M)
        } else {
            let k = dp.idx(n, m);
            let (score, state) = best_of(dp.m[k], dp.x[k], dp.y[k]);
            (score, n, m, state)
        };

        let mut aligned_a = Vec::with_capacity(n + m);
        let mut aligned_b = Vec::with_capacity(n + m);

        while i > 0 || j > 0 {
            let k = dp.idx(i, j);
            match state {
                FROM_M => {
                    aligned_a.push(a[i - 1]);
                    aligned_b.push(b[j - 1]);
                    state = dp.ptr_m[k];
                    i -= 1;
                    j -= 1;
                    if state == START {
                        break;
                    }
                }
                FROM_X => {
                    aligned_a.push(a[i - 1]);
                    aligned_b.push(GAP as u8);
                    state = dp.ptr_x[k];
                    i -= 1;
                }
                _ => {
                    aligned_a.push(GAP as u8);
                    aligned_b.push(b[j - 1]);
                    state = dp.ptr_y[k];
                    j -= 1;
                }
            }
        }

        aligned_a.reverse();
        aligned_b.reverse();

        Ok(Alignment {
            aligned_a: aligned_a.into_iter().map(char::from).collect(),
            aligned_b: aligned_b.into_iter().map(char::from).collect(),
            start_a: i,
            start_b: j,
            score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aligner() -> PairwiseAligner {
        PairwiseAligner::default()
    }

    fn simple() -> PairwiseAligner {
        PairwiseAligner::new(ScoringScheme::identity(2, -1, 3, 1))
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let result = aligner().align("", "MKV", AlignmentMode::Global);
        assert!(matches!(
            result,
            Err(InterfaceError::InvalidSequenceInput { .. })
        ));
        let result = aligner().align("MKV", "", AlignmentMode::Local);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_identical() {
        let alignment = aligner().align("MKVLA", "MKVLA", AlignmentMode::Global).unwrap();
        assert_eq!(alignment.aligned_a, "MKVLA");
        assert_eq!(alignment.aligned_b, "MKVLA");
        assert_eq!(alignment.start_a, 0);
        assert_eq!(alignment.start_b, 0);
        assert_eq!(alignment.score, 5 + 5 + 4 + 4 + 4);
    }

    #[test]
    fn test_global_with_insertion() {
        let alignment = simple().align("ACDEFGH", "ACDGH", AlignmentMode::Global).unwrap();
        assert_eq!(alignment.aligned_a.len(), alignment.aligned_b.len());
        assert_eq!(alignment.aligned_a, "ACDEFGH");
        assert_eq!(alignment.aligned_b, "ACD--GH");
        // five matches, one gap of length two
        assert_eq!(alignment.score, 5 * 2 - 3 - 1);
    }

    #[test]
    fn test_global_leading_gap() {
        let alignment = simple().align("MKVLA", "VLA", AlignmentMode::Global).unwrap();
        assert_eq!(alignment.aligned_a, "MKVLA");
        assert_eq!(alignment.aligned_b, "--VLA");
        assert_eq!(alignment.start_a, 0);
        assert_eq!(alignment.start_b, 0);
    }

    #[test]
    fn test_local_finds_embedded_segment() {
        let alignment = aligner()
            .align("MKWWHHCCW", "PPPPWHHCCPPP", AlignmentMode::Local)
            .unwrap();
        assert_eq!(alignment.aligned_a, "WHHCC");
        assert_eq!(alignment.aligned_b, "WHHCC");
        assert_eq!(alignment.start_a, 3);
        assert_eq!(alignment.start_b, 4);
    }

    #[test]
    fn test_local_identical() {
        let alignment = aligner().align("MKVLA", "MKVLA", AlignmentMode::Local).unwrap();
        assert_eq!(alignment.aligned_a, "MKVLA");
        assert_eq!(alignment.start_a, 0);
        assert_eq!(alignment.start_b, 0);
    }

    #[test]
    fn test_local_without_positive_score_is_empty() {
        let alignment = simple().align("AAAA", "CCCC", AlignmentMode::Local).unwrap();
        assert!(alignment.is_empty());
        assert_eq!(alignment.score, 0);
    }

    #[test]
    fn test_deterministic() {
        let first = aligner().align("MKVLAWHC", "MKLAWHHC", AlignmentMode::Global).unwrap();
        for _ in 0..5 {
            let again = aligner().align("MKVLAWHC", "MKLAWHHC", AlignmentMode::Global).unwrap();
            assert_eq!(first, again);
        }
    }

    #[test]
    fn test_non_ascii_is_rejected() {
        assert!(aligner().align("MKé", "MK", AlignmentMode::Global).is_err());
    }
}
