use align_dp::{
    align_affine, align_affine_with, align_global, align_linear_space, align_local, align_multi,
    AffineGap, AlignError, Alphabet, EntropyScoring, LinearGap, ScoringBuilder,
    SubstitutionTable,
};

fn only_identity() -> SubstitutionTable {
    SubstitutionTable::from_entries([((b'A', b'A'), 2), ((b'C', b'C'), 2)]).unwrap()
}

#[test]
fn foreign_symbols_are_rejected_by_every_aligner() {
    let scoring = ScoringBuilder::new().linear().unwrap();
    let expected = AlignError::InvalidAlphabet {
        sequence: 1,
        position: 2,
        symbol: 'X',
    };
    assert_eq!(align_global(b"ACG", b"ACX", &scoring), Err(expected.clone()));
    assert_eq!(align_local(b"ACG", b"ACX", &scoring), Err(expected.clone()));
    assert_eq!(align_linear_space(b"ACG", b"ACX", &scoring), Err(expected.clone()));
    assert_eq!(align_affine(b"ACG", b"ACX", 1, 2, 1), Err(expected));
    assert!(matches!(
        align_multi(&["ACG", "AC", "A-G"], 1.0),
        Err(AlignError::InvalidAlphabet { sequence: 2, position: 1, symbol: '-' })
    ));
}

#[test]
fn gap_symbol_is_never_an_input() {
    let scoring = ScoringBuilder::new().linear().unwrap();
    assert!(matches!(
        align_global(b"A-C", b"AC", &scoring),
        Err(AlignError::InvalidAlphabet { sequence: 0, position: 1, symbol: '-' })
    ));
}

#[test]
fn missing_pairs_are_forbidden_columns() {
    // The only mismatching pair has no entry, so it must be routed around.
    let scoring = LinearGap::with_matrix(only_identity(), 1).unwrap();
    let aln = align_global(b"A", b"C", &scoring).unwrap();
    assert_eq!(aln.score, -2);
    // equal gap paths: Up is taken first from the corner
    assert_eq!(aln.to_strings(), ("-A".into(), "C-".into()));

    let lin = align_linear_space(b"AAC", b"CAA", &scoring).unwrap();
    assert_eq!(lin.score, align_global(b"AAC", b"CAA", &scoring).unwrap().score);

    let affine = AffineGap::with_matrix(only_identity(), 1, 1).unwrap();
    let aln = align_affine_with(b"AC", b"CAC", &affine).unwrap();
    assert_eq!(aln.score, 4 - 1);
    assert_eq!(aln.to_strings(), ("-AC".into(), "CAC".into()));
}

#[test]
fn unreachable_terminal_is_reported() {
    // The affine score is read from the match matrix, so the last column
    // must be a scorable pair.
    let table = only_identity();
    let affine = AffineGap::with_matrix(&table, 1, 1).unwrap();
    assert_eq!(
        align_affine_with(b"A", b"C", &affine),
        Err(AlignError::NoAlignmentPossible)
    );
    assert_eq!(align_affine_with(b"", b"", &affine).map(|a| a.score), Ok(0));
}

#[test]
fn too_few_sequences() {
    assert_eq!(
        align_multi(&["ACGT"], 1.0),
        Err(AlignError::DimensionMismatch {
            expected_at_least: 2,
            found: 1
        })
    );
}

#[test]
fn invalid_parameters() {
    assert!(matches!(
        ScoringBuilder::new().gap_penalty(-1).linear(),
        Err(AlignError::InvalidParameters(_))
    ));
    assert!(matches!(
        align_affine(b"A", b"A", 1, -1, 1),
        Err(AlignError::InvalidParameters(_))
    ));
    assert!(matches!(
        align_multi(&["A", "A"], 0.0),
        Err(AlignError::InvalidParameters(_))
    ));
    assert!(matches!(
        EntropyScoring::new(f64::NAN),
        Err(AlignError::InvalidParameters(_))
    ));
    assert!(matches!(
        Alphabet::new(b"AC-"),
        Err(AlignError::InvalidParameters(_))
    ));
}

fn is_invalid<T>(result: Result<T, AlignError>) -> bool {
    matches!(result, Err(AlignError::InvalidParameters(_)))
}

#[test]
fn scores_beyond_i32_are_invalid_parameters() {
    let long_a = vec![b'A'; 2200];
    let long_c = vec![b'C'; 2200];

    assert!(is_invalid(align_affine(&long_a, b"", 1, 1_000_000, 1_000_000)));
    let fits = align_affine(&long_a[..2000], b"", 1, 1_000_000, 1_000_000).unwrap();
    assert_eq!(fits.score, -2_000_000_000);

    let scoring = ScoringBuilder::new().gap_penalty(1_000_000).linear().unwrap();
    assert!(is_invalid(align_global(b"", &long_c, &scoring)));
    assert!(is_invalid(align_linear_space(b"", &long_c, &scoring)));
    assert!(is_invalid(align_local(&long_a, &long_c, &scoring)));

    assert!(is_invalid(ScoringBuilder::new().mismatch_penalty(i32::MIN).linear()));
    assert!(is_invalid(align_affine(b"A", b"C", i32::MIN, 1, 1)));
}
