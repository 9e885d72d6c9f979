//! FDCR: false discovery (cost) rate adjustment of p-values
//!
//! This library adjusts a family of p-values for multiple testing in two ways:
//! - `Fdr`: the Benjamini-Hochberg step-up procedure, tolerant of missing values
//! - `Fdcr`: the Benjamini-Kling cost-weighted step-up, where each hypothesis carries
//!   an expert belief score and the weighted Simes statistic of the family is appended
//!   as an extra hypothesis
//!
//! Inputs may be numbers or numeric strings (see `Numberfy`). Anything that cannot be
//! read as a non-negative number is treated as missing and flagged invalid in the output.
//!
//! The free functions `adjusted_fdr_pvalues` and `adjusted_fdcr_pvalues` return plain
//! vectors with NaN in invalid slots.

mod coerce;
mod config;
mod error;
mod fdcr;
mod fdr;
mod math;
mod results;

pub use coerce::{numberfy, Numberfy};
pub use config::{TieMethod, BELIEF_EPSILON, DEFAULT_INTERSECTION_BELIEF};
pub use error::FdcrError;
pub use fdcr::Fdcr;
pub use fdr::Fdr;
pub use results::{AdjustedPValues, FdcrResults};

/// Benjamini-Hochberg adjusted p-values, in the same order as the input
pub fn adjusted_fdr_pvalues<T: Numberfy>(pvalues: &[T]) -> Vec<f64> {
    Fdr::default().adjust(pvalues).into_adjusted()
}

/// Weighted FDCR adjusted p-values
///
/// The result has one more entry than `pvalues`: the last one is the adjusted weighted
/// Simes statistic. Use `DEFAULT_INTERSECTION_BELIEF` when no family belief is known.
pub fn adjusted_fdcr_pvalues<P, B>(
    pvalues: &[P],
    belief_scores: &[B],
    intersection_belief_score: f64,
) -> Result<Vec<f64>, FdcrError>
where
    P: Numberfy,
    B: Numberfy,
{
    Fdcr::builder()
        .intersection_belief_score(intersection_belief_score)
        .build()
        .adjust(pvalues, belief_scores)
        .map(FdcrResults::into_adjusted)
}
