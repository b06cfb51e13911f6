//! Quadratic-space pairwise aligners.
//!
//! - [`global`]: Needleman–Wunsch with a linear gap model.
//! - [`local`]: Smith–Waterman with a linear gap model.
//! - [`affine`]: Gotoh global alignment with affine gap costs.
//!
//! Each module exposes the recurrence as a struct with `fill` (the score and
//! backtrack matrices) and `align`, plus a free `align` function that checks
//! the inputs against the scoring alphabet first.

pub mod affine;
pub mod global;
pub mod local;
