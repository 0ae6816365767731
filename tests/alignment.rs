use std::collections::HashMap;

use nw_aligner::{align, AlignedPair, AlignerError, NeedlemanWunsch, ScoringModel, GAP_SYMBOL};
use proptest::prelude::*;

fn strip_gaps(row: &[u8]) -> Vec<u8> {
    row.iter().copied().filter(|&c| c != GAP_SYMBOL).collect()
}

fn rescore(pair: &AlignedPair, scoring: &ScoringModel) -> f64 {
    pair.aligned_a
        .iter()
        .zip(&pair.aligned_b)
        .map(|(&a, &b)| {
            if a == GAP_SYMBOL || b == GAP_SYMBOL {
                scoring.gap_penalty
            } else {
                scoring.substitution(a, b)
            }
        })
        .sum()
}

/// Number of optimal paths through an integer-scored grid, counted directly.
fn optimal_path_count(a: &[u8], b: &[u8], gap: i64, award: i64, mismatch: i64) -> (i64, u64) {
    let cols = b.len() + 1;
    let mut best = vec![0i64; (a.len() + 1) * cols];
    let mut paths = vec![1u64; (a.len() + 1) * cols];
    for i in 0..=a.len() {
        for j in 0..=b.len() {
            if i == 0 || j == 0 {
                best[i * cols + j] = (i + j) as i64 * gap;
                continue;
            }
            let sub = if a[i - 1] == b[j - 1] { award } else { mismatch };
            let routes = [
                (best[i * cols + j - 1] + gap, paths[i * cols + j - 1]),
                (best[(i - 1) * cols + j] + gap, paths[(i - 1) * cols + j]),
                (best[(i - 1) * cols + j - 1] + sub, paths[(i - 1) * cols + j - 1]),
            ];
            let top = routes.iter().map(|&(score, _)| score).max().unwrap();
            best[i * cols + j] = top;
            paths[i * cols + j] = routes
                .iter()
                .filter(|&&(score, _)| score == top)
                .map(|&(_, count)| count)
                .sum();
        }
    }
    (best[best.len() - 1], paths[paths.len() - 1])
}

fn tenths(value: i64) -> f64 {
    value as f64 / 10.0
}

fn multiset(pairs: &[AlignedPair]) -> HashMap<AlignedPair, usize> {
    let mut counts = HashMap::new();
    for pair in pairs {
        *counts.entry(pair.clone()).or_insert(0) += 1;
    }
    counts
}

#[test]
fn test_reference_pair() {
    let mut aligner = NeedlemanWunsch::default();
    let (scores, _) = aligner.build_matrices(b"CGA", b"CACGA").unwrap();
    assert_eq!(scores.row(0), vec![0.0, -1.0, -2.0, -3.0, -4.0, -5.0]);
    assert_eq!(scores.column(0), vec![0.0, -1.0, -2.0, -3.0]);

    let result = aligner.align(b"CGA", b"CACGA").unwrap();
    assert_eq!(result.score, 1.0);
    assert_eq!(
        result.sorted_alignments(),
        vec![
            AlignedPair::new(*b"--CGA", *b"CACGA"),
            AlignedPair::new(*b"C--GA", *b"CACGA"),
        ]
    );
}

#[test]
fn test_empty_against_two_symbols() {
    let scoring = ScoringModel::default().with_gap_penalty(-2.0);
    let mut aligner = NeedlemanWunsch::new(scoring);
    let (scores, _) = aligner.build_matrices(b"", b"AC").unwrap();
    assert_eq!(scores.to_rows(), vec![vec![0.0, -2.0, -4.0]]);

    let result = aligner.align(b"", b"AC").unwrap();
    assert_eq!(result.alignments, vec![AlignedPair::new(*b"--", *b"AC")]);
}

#[test]
fn test_too_long_never_builds_matrices() {
    let scoring = ScoringModel::default().with_max_sequence_length(5);
    let mut aligner = NeedlemanWunsch::new(scoring);
    let long = vec![b'A'; 6];

    let err = aligner.align(&long, b"A").unwrap_err();
    assert!(matches!(err, AlignerError::SequenceTooLong { length: 6, max: 5 }));
    let err = aligner.align(b"A", &long).unwrap_err();
    assert!(matches!(err, AlignerError::SequenceTooLong { length: 6, max: 5 }));

    assert_eq!(aligner.stats().matrices_built, 0);
    assert_eq!(aligner.stats().cells_allocated, 0);
}

#[test]
fn test_repetitive_input_grows_solution_count() {
    // With match 1, mismatch 0 and gap -1, "AA" vs "A" can match either A.
    let result = align(b"AA", b"A", &ScoringModel::default()).unwrap();
    assert_eq!(result.score, 0.0);
    assert_eq!(result.len(), 2);

    let result = align(b"AAAA", b"AA", &ScoringModel::default()).unwrap();
    assert_eq!(result.score, 0.0);
    // Choose which 2 of the 4 symbols pair up: C(4, 2).
    assert_eq!(result.len(), 6);
}

#[test]
fn test_extreme_scoring_values_are_accepted() {
    let scoring = ScoringModel::new(0.0, 0.0, 0.0, 10);
    let result = align(b"AC", b"G", &scoring).unwrap();
    assert_eq!(result.score, 0.0);
    for pair in &result.alignments {
        assert_eq!(strip_gaps(&pair.aligned_a), b"AC");
        assert_eq!(strip_gaps(&pair.aligned_b), b"G");
    }
}

proptest! {
    #[test]
    fn prop_score_is_symmetric_under_default_scoring(
        a in "[ACGT]{0,10}",
        b in "[ACGT]{0,10}"
    ) {
        let scoring = ScoringModel::default();
        let ab = align(a.as_bytes(), b.as_bytes(), &scoring).unwrap();
        let ba = align(b.as_bytes(), a.as_bytes(), &scoring).unwrap();
        prop_assert_eq!(ab.score, ba.score);
    }

    #[test]
    fn prop_alignments_are_consistent(
        a in "[ACGT]{0,8}",
        b in "[ACGT]{0,8}",
        gap in -3i32..=0,
        mismatch in -2i32..=1
    ) {
        let scoring = ScoringModel::default()
            .with_gap_penalty(gap as f64)
            .with_mismatch_penalty(mismatch as f64);
        let result = align(a.as_bytes(), b.as_bytes(), &scoring).unwrap();
        prop_assert!(!result.is_empty());
        for pair in &result.alignments {
            prop_assert_eq!(pair.aligned_a.len(), pair.aligned_b.len());
            prop_assert_eq!(strip_gaps(&pair.aligned_a), a.as_bytes().to_vec());
            prop_assert_eq!(strip_gaps(&pair.aligned_b), b.as_bytes().to_vec());
            prop_assert_eq!(rescore(pair, &scoring), result.score);
        }
    }

    #[test]
    fn prop_boundaries_are_cumulative_gaps(
        a in "[ACGT]{0,10}",
        b in "[ACGT]{0,10}",
        gap in -4i32..=2
    ) {
        let scoring = ScoringModel::default().with_gap_penalty(gap as f64);
        let mut aligner = NeedlemanWunsch::new(scoring);
        let (scores, _) = aligner.build_matrices(a.as_bytes(), b.as_bytes()).unwrap();
        for i in 0..scores.rows() {
            prop_assert_eq!(scores.get(i, 0), i as f64 * gap as f64);
        }
        for j in 0..scores.cols() {
            prop_assert_eq!(scores.get(0, j), j as f64 * gap as f64);
        }
    }

    #[test]
    fn prop_decimal_boundaries_are_exact_multiples(
        a in "[ACGT]{0,12}",
        b in "[ACGT]{0,12}",
        gap in -30i64..=10
    ) {
        let scoring = ScoringModel::default().with_gap_penalty(tenths(gap));
        let exact = scoring.to_fixed_point().unwrap();
        let mut aligner = NeedlemanWunsch::new(scoring);
        let (scores, _) = aligner.build_matrices(a.as_bytes(), b.as_bytes()).unwrap();
        for i in 0..scores.rows() {
            prop_assert_eq!(scores.units(i, 0), i as i64 * exact.gap_penalty);
            prop_assert_eq!(scores.get(i, 0), tenths(i as i64 * gap));
        }
        for j in 0..scores.cols() {
            prop_assert_eq!(scores.units(0, j), j as i64 * exact.gap_penalty);
            prop_assert_eq!(scores.get(0, j), tenths(j as i64 * gap));
        }
    }

    #[test]
    fn prop_decimal_scores_count_every_tie(
        a in "[AC]{0,7}",
        b in "[AC]{0,7}",
        gap in -20i64..=0,
        award in 0i64..=20,
        mismatch in -20i64..=5
    ) {
        let scoring = ScoringModel::new(tenths(gap), tenths(award), tenths(mismatch), 100);
        let result = align(a.as_bytes(), b.as_bytes(), &scoring).unwrap();
        let (score, count) = optimal_path_count(a.as_bytes(), b.as_bytes(), gap, award, mismatch);
        prop_assert_eq!(result.score, tenths(score));
        prop_assert_eq!(result.alignments.len() as u64, count);
        for pair in &result.alignments {
            prop_assert_eq!(strip_gaps(&pair.aligned_a), a.as_bytes().to_vec());
            prop_assert_eq!(strip_gaps(&pair.aligned_b), b.as_bytes().to_vec());
        }
    }

    #[test]
    fn prop_align_is_idempotent(a in "[ACGT]{0,8}", b in "[ACGT]{0,8}") {
        let mut aligner = NeedlemanWunsch::default();
        let first = aligner.align(a.as_bytes(), b.as_bytes()).unwrap();
        let second = aligner.align(a.as_bytes(), b.as_bytes()).unwrap();
        prop_assert_eq!(first.score, second.score);
        prop_assert_eq!(multiset(&first.alignments), multiset(&second.alignments));
    }

    #[test]
    fn prop_empty_side_is_all_gaps(b in "[ACGT]{0,12}") {
        let scoring = ScoringModel::default();
        let result = align(b"", b.as_bytes(), &scoring).unwrap();
        prop_assert_eq!(result.score, b.len() as f64 * scoring.gap_penalty);
        prop_assert_eq!(result.alignments.len(), 1);
        prop_assert_eq!(&result.alignments[0].aligned_a, &vec![GAP_SYMBOL; b.len()]);
        prop_assert_eq!(&result.alignments[0].aligned_b, &b.as_bytes().to_vec());
    }
}
