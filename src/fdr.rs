use bon::Builder;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::{
    coerce::{is_valid, Numberfy},
    config::TieMethod,
    math::{ascending_order, rank, step_up},
    results::AdjustedPValues,
};

/// Benjamini-Hochberg step-up adjustment for the false discovery rate
///
/// Benjamini Y., Hochberg Y. (1995). Controlling the false discovery rate: a practical
/// and powerful approach to multiple testing. JRSS B, 57, 289-300.
///
/// Missing or invalid p-values (NaN, negative, unparsable) are tolerated: they do not
/// count towards the number of tests and come back flagged invalid.
#[derive(Debug, Clone, Copy, Default, Builder)]
pub struct Fdr {
    /// Rank convention for tied p-values
    #[builder(default)]
    ties: TieMethod,
}
impl Fdr {
    /// Adjust a single family of p-values
    pub fn adjust<T: Numberfy>(&self, pvalues: &[T]) -> AdjustedPValues {
        let pvalues = pvalues.iter().map(Numberfy::numberfy).collect::<Vec<_>>();
        let valid = pvalues.iter().map(|p| is_valid(*p)).collect::<Vec<_>>();
        let mut adjusted = vec![f64::NAN; pvalues.len()];

        let order = ascending_order(&pvalues);
        if order.is_empty() {
            if !pvalues.is_empty() {
                warn!(
                    num_pvalues = pvalues.len(),
                    "no valid p-values to adjust, every entry is left invalid"
                );
            }
            return AdjustedPValues::new(pvalues, adjusted, valid);
        }

        let ranks = rank(&pvalues, &order, self.ties);
        step_up(&pvalues, &ranks, &order, &mut adjusted);
        debug!(
            num_pvalues = pvalues.len(),
            num_valid = order.len(),
            "adjusted p-values with Benjamini-Hochberg"
        );

        AdjustedPValues::new(pvalues, adjusted, valid)
    }

    /// Adjust many independent families in parallel
    pub fn adjust_many<T>(&self, families: &[Vec<T>]) -> Vec<AdjustedPValues>
    where
        T: Numberfy + Sync,
    {
        families
            .par_iter()
            .map(|family| self.adjust(family))
            .collect()
    }
}
