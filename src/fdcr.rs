use bon::Builder;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::{
    coerce::{is_valid, Numberfy},
    config::{BELIEF_EPSILON, DEFAULT_INTERSECTION_BELIEF},
    error::FdcrError,
    math::{ascending_order, belief_to_cost, weighted_simes, weighted_step_up},
    results::FdcrResults,
};

/// Weighted false discovery cost rate (FDCR) adjustment
///
/// Implements the Benjamini-Kling cost-based step-up, with the weighted Simes statistic
/// of the whole family appended as an extra hypothesis.
///
/// Benjamini Y., Hochberg Y. (1997). Multiple hypotheses testing with weights.
/// Scandinavian Journal of Statistics, 24(3), 407-418.
///
/// Each hypothesis carries a belief score: 0 means the null is surely true, infinity
/// means it is surely false. A belief `b` costs `1 / (b + epsilon)` to reject.
#[derive(Debug, Clone, Copy, Builder)]
pub struct Fdcr {
    /// Belief score of the family (intersection) hypothesis
    #[builder(default = DEFAULT_INTERSECTION_BELIEF)]
    intersection_belief_score: f64,
    /// Offset added to beliefs before inversion
    #[builder(default = BELIEF_EPSILON)]
    epsilon: f64,
}
impl Default for Fdcr {
    fn default() -> Self {
        Self::builder().build()
    }
}
impl Fdcr {
    /// Adjust a family of p-values given one belief score per p-value
    ///
    /// Belief scores past the number of p-values are ignored. Fewer belief scores than
    /// p-values is an error.
    pub fn adjust<P, B>(&self, pvalues: &[P], belief_scores: &[B]) -> Result<FdcrResults, FdcrError>
    where
        P: Numberfy,
        B: Numberfy,
    {
        if pvalues.len() > belief_scores.len() {
            return Err(FdcrError::MissingBeliefScores {
                pvalues: pvalues.len(),
                beliefs: belief_scores.len(),
            });
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(FdcrError::InvalidEpsilon(self.epsilon));
        }
        if belief_scores.len() > pvalues.len() {
            debug!(
                num_ignored = belief_scores.len() - pvalues.len(),
                "ignoring belief scores without a matching p-value"
            );
        }

        let mut pvalues = pvalues.iter().map(Numberfy::numberfy).collect::<Vec<_>>();
        let beliefs = belief_scores[..pvalues.len()]
            .iter()
            .map(Numberfy::numberfy)
            .collect::<Vec<_>>();

        // Hypotheses without a usable p-value never enter the cumulative sums
        let mut costs = pvalues
            .iter()
            .zip(beliefs.iter())
            .map(|(p, b)| {
                if is_valid(*p) {
                    belief_to_cost(*b, self.epsilon)
                } else {
                    0.0
                }
            })
            .collect::<Vec<_>>();
        let eligible = beliefs.iter().map(|b| is_valid(*b)).collect::<Vec<_>>();
        let mut valid = pvalues.iter().map(|p| is_valid(*p)).collect::<Vec<_>>();

        let order = ascending_order(&pvalues);
        let simes = if order.is_empty() {
            if !pvalues.is_empty() {
                warn!(
                    num_pvalues = pvalues.len(),
                    "no valid p-values to adjust, every entry is left invalid"
                );
            }
            None
        } else {
            let simes = weighted_simes(&pvalues, &costs, &eligible, &order);
            if simes.is_none() {
                warn!("valid hypotheses carry no cost, the weighted Simes statistic is undefined");
            }
            simes
        };

        match simes {
            Some(simes) => {
                if !is_valid(self.intersection_belief_score) {
                    warn!(
                        intersection_belief_score = self.intersection_belief_score,
                        "invalid intersection belief score, the family hypothesis costs nothing"
                    );
                }
                pvalues.push(simes);
                costs.push(belief_to_cost(self.intersection_belief_score, self.epsilon));
                valid.push(true);
            }
            None => {
                pvalues.push(f64::NAN);
                costs.push(0.0);
                valid.push(false);
            }
        }

        let mut adjusted = vec![f64::NAN; pvalues.len()];
        let order = ascending_order(&pvalues);
        weighted_step_up(&pvalues, &costs, &order, &mut adjusted);
        debug!(
            num_pvalues = pvalues.len() - 1,
            num_valid = order.len(),
            simes = ?simes,
            "adjusted p-values with weighted FDCR"
        );

        Ok(FdcrResults::new(pvalues, costs, adjusted, valid))
    }

    /// Adjust many independent families in parallel
    ///
    /// Each family is a pair of p-values and their belief scores.
    pub fn adjust_many<P, B>(
        &self,
        families: &[(Vec<P>, Vec<B>)],
    ) -> Vec<Result<FdcrResults, FdcrError>>
    where
        P: Numberfy + Sync,
        B: Numberfy + Sync,
    {
        families
            .par_iter()
            .map(|(pvalues, beliefs)| self.adjust(pvalues, beliefs))
            .collect()
    }
}
