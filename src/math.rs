use itertools::Itertools;

use crate::{coerce::is_valid, config::TieMethod};

/// Indices of the valid entries of `values`, ordered by ascending value
///
/// Invalid entries (NaN or negative) are left out. Ties keep their input order.
pub fn ascending_order(values: &[f64]) -> Vec<usize> {
    (0..values.len())
        .filter(|&i| is_valid(values[i]))
        .sorted_by(|&a, &b| values[a].total_cmp(&values[b]))
        .collect()
}

/// Ranks the entries listed in `order` (as returned by `ascending_order`)
///
/// The result is indexed by input position. Positions missing from `order` are NaN.
pub fn rank(values: &[f64], order: &[usize], ties: TieMethod) -> Vec<f64> {
    let mut ranks = vec![f64::NAN; values.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start;
        while end + 1 < order.len() && values[order[end + 1]] == values[order[start]] {
            end += 1;
        }
        for (offset, &i) in order[start..=end].iter().enumerate() {
            ranks[i] = ties.tied_rank(start + 1, end + 1, start + offset + 1);
        }
        start = end + 1;
    }
    ranks
}

/// Converts a belief score into the cost of rejecting its hypothesis
///
/// Invalid beliefs cost nothing so they never enter cumulative sums.
pub fn belief_to_cost(belief: f64, epsilon: f64) -> f64 {
    if is_valid(belief) {
        1.0 / (belief + epsilon)
    } else {
        0.0
    }
}

/// Writes step-up adjusted p-values into `adjusted`
///
/// `raw` yields `(index, raw adjustment)` starting from the largest p-value.
/// Each value is clamped to 1 and capped at the smallest value seen before it.
pub fn enforce_step_up<I>(raw: I, adjusted: &mut [f64])
where
    I: IntoIterator<Item = (usize, f64)>,
{
    raw.into_iter().fold(1.0_f64, |min_ap, (i, value)| {
        let value = value.min(1.0).min(min_ap);
        adjusted[i] = value;
        value
    });
}

/// Benjamini-Hochberg step-up over the entries in `order`
pub fn step_up(pvalues: &[f64], ranks: &[f64], order: &[usize], adjusted: &mut [f64]) {
    let m = order.len() as f64;
    let raw = order.iter().rev().map(|&i| (i, pvalues[i] * m / ranks[i]));
    enforce_step_up(raw, adjusted);
}

/// Weighted Simes statistic (Benjamini & Hochberg 1997)
///
/// Minimum over `order` of `cumulative cost / total cost * p`. Only `eligible`
/// hypotheses are candidates for the minimum, though every hypothesis adds its cost.
/// Returns `None` when the total cost is zero.
pub fn weighted_simes(
    pvalues: &[f64],
    costs: &[f64],
    eligible: &[bool],
    order: &[usize],
) -> Option<f64> {
    let total = order.iter().map(|&i| costs[i]).sum::<f64>();
    if total <= 0.0 {
        return None;
    }
    order
        .iter()
        .scan(0.0, |cumulative, &i| {
            *cumulative += costs[i];
            Some((i, *cumulative))
        })
        .filter(|&(i, _)| eligible[i])
        .map(|(i, cumulative)| cumulative / total * pvalues[i])
        .min_by(f64::total_cmp)
}

/// Cost-weighted step-up (Benjamini & Kling) over the entries in `order`
///
/// Walks from the largest p-value down carrying the cost still remaining at or
/// below the current rank. With equal costs this is the Benjamini-Hochberg step-up.
pub fn weighted_step_up(pvalues: &[f64], costs: &[f64], order: &[usize], adjusted: &mut [f64]) {
    let total = order.iter().map(|&i| costs[i]).sum::<f64>();
    let raw = order.iter().rev().scan(total, |remaining, &i| {
        let value = if *remaining > 0.0 {
            total / *remaining * pvalues[i]
        } else {
            1.0
        };
        *remaining -= costs[i];
        Some((i, value))
    });
    enforce_step_up(raw, adjusted);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ascending_order_skips_invalid() {
        let values = vec![0.3, f64::NAN, 0.1, -1.0, 0.2];
        assert_eq!(ascending_order(&values), vec![2, 4, 0]);
    }

    #[test]
    fn test_ascending_order_stable_ties() {
        let values = vec![0.2, 0.1, 0.2, 0.1];
        assert_eq!(ascending_order(&values), vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_rank_tie_methods() {
        let values = vec![3.0, 1.0, 2.0, 2.0];
        let order = ascending_order(&values);
        assert_eq!(rank(&values, &order, TieMethod::Average), vec![4.0, 1.0, 2.5, 2.5]);
        assert_eq!(rank(&values, &order, TieMethod::Min), vec![4.0, 1.0, 2.0, 2.0]);
        assert_eq!(rank(&values, &order, TieMethod::Max), vec![4.0, 1.0, 3.0, 3.0]);
        assert_eq!(rank(&values, &order, TieMethod::Ordinal), vec![4.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_rank_invalid_is_nan() {
        let values = vec![0.5, f64::NAN, 0.1];
        let order = ascending_order(&values);
        let ranks = rank(&values, &order, TieMethod::Average);
        assert_eq!(ranks[0], 2.0);
        assert!(ranks[1].is_nan());
        assert_eq!(ranks[2], 1.0);
    }

    #[test]
    fn test_belief_to_cost() {
        assert_relative_eq!(belief_to_cost(0.0, 1e-5), 1e5, epsilon = 1e-6);
        assert_relative_eq!(belief_to_cost(4.0, 0.0), 0.25);
        assert_eq!(belief_to_cost(f64::INFINITY, 1e-5), 0.0);
        assert_eq!(belief_to_cost(-3.0, 1e-5), 0.0);
        assert_eq!(belief_to_cost(f64::NAN, 1e-5), 0.0);
    }

    #[test]
    fn test_enforce_step_up_caps_running_minimum() {
        let mut adjusted = vec![0.0; 4];
        enforce_step_up(vec![(3, 1.7), (2, 0.3), (1, 0.5), (0, 0.1)], &mut adjusted);
        assert_eq!(adjusted, vec![0.1, 0.3, 0.3, 1.0]);
    }

    #[test]
    fn test_weighted_simes_equal_costs() {
        let pvalues = vec![0.01, 0.02, 0.03];
        let costs = vec![2.0; 3];
        let order = ascending_order(&pvalues);
        let simes = weighted_simes(&pvalues, &costs, &[true; 3], &order).unwrap();
        assert_relative_eq!(simes, 0.01 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_weighted_simes_skips_ineligible() {
        let pvalues = vec![0.01, 0.02];
        let costs = vec![0.0, 1.0];
        let order = ascending_order(&pvalues);
        let simes = weighted_simes(&pvalues, &costs, &[false, true], &order).unwrap();
        assert_relative_eq!(simes, 0.02, epsilon = 1e-12);
    }

    #[test]
    fn test_weighted_simes_zero_cost() {
        let pvalues = vec![0.01, 0.02];
        let order = ascending_order(&pvalues);
        assert!(weighted_simes(&pvalues, &[0.0, 0.0], &[true, true], &order).is_none());
    }

    #[test]
    fn test_weighted_step_up_matches_step_up_for_equal_costs() {
        let pvalues = vec![0.04, 0.001, 0.3, 0.012, 0.02];
        let order = ascending_order(&pvalues);
        let ranks = rank(&pvalues, &order, TieMethod::Average);

        let mut unweighted = vec![f64::NAN; pvalues.len()];
        step_up(&pvalues, &ranks, &order, &mut unweighted);

        let mut weighted = vec![f64::NAN; pvalues.len()];
        weighted_step_up(&pvalues, &[0.5; 5], &order, &mut weighted);

        for (a, b) in unweighted.iter().zip(weighted.iter()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_weighted_step_up_zero_remaining_cost() {
        let pvalues = vec![0.01, 0.5];
        let order = ascending_order(&pvalues);
        let mut adjusted = vec![f64::NAN; 2];
        weighted_step_up(&pvalues, &[0.0, 1.0], &order, &mut adjusted);
        assert_relative_eq!(adjusted[1], 0.5);
        assert_relative_eq!(adjusted[0], 0.5);
    }
}
