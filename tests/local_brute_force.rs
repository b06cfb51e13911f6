use align_dp::{align_global, align_local, strip_gaps, ScoringBuilder, SmithWaterman};
use proptest::prelude::*;

/// Best global score over every pair of substrings, floored at the empty pair.
fn brute_local(s: &[u8], t: &[u8], mm: i32, gp: i32) -> i32 {
    let scoring = ScoringBuilder::new()
        .mismatch_penalty(mm)
        .gap_penalty(gp)
        .linear()
        .unwrap();
    let mut best = 0;
    for i0 in 0..=s.len() {
        for i1 in i0..=s.len() {
            for j0 in 0..=t.len() {
                for j1 in j0..=t.len() {
                    let score = align_global(&s[i0..i1], &t[j0..j1], &scoring).unwrap().score;
                    best = best.max(score);
                }
            }
        }
    }
    best
}

proptest! {
    #[test]
    fn local_matches_brute_force(a in "[ACGT]{0,6}", b in "[ACGT]{0,6}", mm in 1i32..3, gp in 1i32..3) {
        let (s, t) = (a.as_bytes(), b.as_bytes());
        let scoring = ScoringBuilder::new()
            .mismatch_penalty(mm)
            .gap_penalty(gp)
            .linear()
            .unwrap();
        let aln = align_local(s, t, &scoring).unwrap();
        prop_assert_eq!(aln.score, brute_local(s, t, mm, gp));
    }

    #[test]
    fn ranges_locate_the_aligned_substrings(a in "[ACGT]{0,12}", b in "[ACGT]{0,12}") {
        let (s, t) = (a.as_bytes(), b.as_bytes());
        let scoring = ScoringBuilder::new().linear().unwrap();
        let aln = align_local(s, t, &scoring).unwrap();
        prop_assert_eq!(strip_gaps(&aln.first), &s[aln.first_range.clone()]);
        prop_assert_eq!(strip_gaps(&aln.second), &t[aln.second_range.clone()]);
        prop_assert!(aln.score >= 0);
        prop_assert!(aln.score >= align_global(s, t, &scoring).unwrap().score);
    }

    #[test]
    fn score_matrix_is_non_negative(a in "[ACGT]{0,10}", b in "[ACGT]{0,10}") {
        let scoring = ScoringBuilder::new().mismatch_penalty(3).linear().unwrap();
        let (scores, _, best) = SmithWaterman::new(a.as_bytes(), b.as_bytes(), &scoring).fill();
        for i in 0..scores.rows() {
            for j in 0..scores.cols() {
                prop_assert!(scores[(i, j)] >= 0);
                prop_assert!(scores[(i, j)] <= best.score);
            }
        }
    }
}

#[test]
fn reference_pair_local() {
    let scoring = ScoringBuilder::new().linear().unwrap();
    let v = b"GCCCAGTCTATGTCAGGGGGCACGAGCATGCACA";
    let w = b"GCCGCCGTCGTTTTCAGCAGTTATGTTCAGAT";
    let aln = align_local(v, w, &scoring).unwrap();
    assert_eq!(aln.score, 10);
    assert_eq!(
        aln.to_strings(),
        ("CAGTCTATG-TCAG".into(), "CAGT-TATGTTCAG".into())
    );
    assert_eq!(aln.first_range, 3..16);
    assert_eq!(aln.second_range, 17..30);
}
