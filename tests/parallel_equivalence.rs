#![cfg(feature = "parallel")]

use align_dp::{align_global, align_linear_space, HirschbergAligner, ScoringBuilder};
use proptest::prelude::*;

proptest! {
    #[test]
    fn parallel_engine_matches_quadratic(a in "[ACGT]{0,40}", b in "[ACGT]{0,40}") {
        let scoring = ScoringBuilder::new().linear().unwrap();
        let (s, t) = (a.as_bytes(), b.as_bytes());
        let quadratic = align_global(s, t, &scoring).unwrap();
        let linear = align_linear_space(s, t, &scoring).unwrap();
        prop_assert_eq!(linear.score, quadratic.score);
    }

    #[test]
    fn repeated_runs_are_identical(a in "[ACGT]{0,60}", b in "[ACGT]{0,60}") {
        let scoring = ScoringBuilder::new().mismatch_penalty(2).linear().unwrap();
        let engine = HirschbergAligner::new(a.as_bytes(), b.as_bytes(), &scoring);
        let first = engine.run().unwrap();
        for _ in 0..3 {
            prop_assert_eq!(&engine.run().unwrap(), &first);
        }
    }
}

#[test]
fn reference_pair_is_unchanged_by_parallelism() {
    let scoring = ScoringBuilder::new().linear().unwrap();
    let aln = align_linear_space(
        b"GCCCAGTCTATGTCAGGGGGCACGAGCATGCACA",
        b"GCCGCCGTCGTTTTCAGCAGTTATGTTCAGAT",
        &scoring,
    )
    .unwrap();
    assert_eq!(aln.score, 5);
    assert_eq!(
        aln.to_strings(),
        (
            "GCC-CAGTC-TATGTCAGGGGGCACGAGCATG--CACA-".into(),
            "GCCGCCGTCGT-TTTCA----GCA-G-TTATGTTCAGAT".into()
        )
    );
}
