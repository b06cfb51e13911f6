//! Example: protein alignment under explicit substitution tables.
//!
//! Run with:
//! `cargo run --example substitution`
//!
//! The first table is a small hand-written one that deliberately leaves some
//! pairs out; those columns are never used. The second is rust-bio's PAM250
//! behind a function matrix.

use align_dp::{
    align_global, align_local, Alphabet, FnMatrix, LinearGap, SubstitutionTable,
};

fn main() -> align_dp::Result<()> {
    let x = b"HEAGAWGHEE";
    let y = b"PAWHEAE";

    // Only identities plus a few conservative swaps.
    let mut entries = Vec::new();
    for &s in b"AEGHPW" {
        entries.push(((s, s), 5));
    }
    for (a, b, score) in [(b'E', b'A', -1), (b'A', b'E', -1), (b'H', b'W', -3), (b'W', b'H', -3)] {
        entries.push(((a, b), score));
    }
    let table = SubstitutionTable::from_entries(entries)?;
    let sparse = LinearGap::with_matrix(&table, 2)?;

    let aln = align_global(x, y, &sparse)?;
    let (first, second) = aln.to_strings();
    println!("sparse table, global (score {}):\n  {first}\n  {second}", aln.score);

    let pam = LinearGap::with_matrix(FnMatrix::new(Alphabet::protein(), bio::scores::pam250), 8)?;
    let aln = align_local(x, y, &pam)?;
    let (first, second) = aln.to_strings();
    println!("PAM250, local (score {}):\n  {first}\n  {second}", aln.score);

    Ok(())
}
