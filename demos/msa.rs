//! Example: three-way alignment under the entropy column score.
//!
//! Run with:
//! `cargo run --example msa`

use align_dp::align_multi;

fn main() -> align_dp::Result<()> {
    let sequences = [
        "GCCCAGTCTATGTCAGGGGGCACGAGCATGCACA",
        "GCCGCCGTCGTTTTCAGCAGTTATGTTCAGAT",
        "GCCAGTCTATGTCAGGGGGCACGAGCAT",
    ];

    let aln = align_multi(&sequences, 1.0)?;
    println!("score: {:.6}", aln.score);
    for row in aln.to_strings() {
        println!("  {row}");
    }
    Ok(())
}
