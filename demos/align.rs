//! Example: the pairwise aligners on one DNA pair.
//!
//! Run with:
//! `cargo run --example align`
//!
//! Scoring: +1 match, -1 mismatch, -1 per gap column (affine: open/extend 3/1).

use align_dp::{
    align_affine, align_global, align_linear_space, align_local, PairwiseAlignment,
    ScoringBuilder,
};

fn show(label: &str, aln: &PairwiseAlignment) {
    let (first, second) = aln.to_strings();
    println!("{label} (score {}):", aln.score);
    println!("  {first}");
    println!("  {second}");
}

fn main() -> align_dp::Result<()> {
    let v = b"GCCCAGTCTATGTCAGGGGGCACGAGCATGCACA";
    let w = b"GCCGCCGTCGTTTTCAGCAGTTATGTTCAGAT";

    let scoring = ScoringBuilder::new().linear()?;

    show("global", &align_global(v, w, &scoring)?);

    let local = align_local(v, w, &scoring)?;
    show("local", &local);
    println!(
        "  covers v[{:?}] and w[{:?}]",
        local.first_range, local.second_range
    );

    show("affine", &align_affine(v, w, 1, 3, 1)?);
    show("linear space", &align_linear_space(v, w, &scoring)?);

    Ok(())
}
