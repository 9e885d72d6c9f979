/// Belief score given to the weighted Simes family hypothesis unless configured otherwise
pub const DEFAULT_INTERSECTION_BELIEF: f64 = 10000.0;

/// Added to every belief score before taking its reciprocal, so a zero belief has a finite cost
pub const BELIEF_EPSILON: f64 = 1e-5;

/// Rank convention for tied p-values
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieMethod {
    /// Mean of the positions occupied by the tie
    #[default]
    Average,
    /// Lowest position occupied by the tie
    Min,
    /// Highest position occupied by the tie
    Max,
    /// Distinct positions in input order
    Ordinal,
}

impl TieMethod {
    /// Rank of the element at 1-based sorted `position` inside a tie spanning `first..=last`
    pub fn tied_rank(&self, first: usize, last: usize, position: usize) -> f64 {
        match self {
            TieMethod::Average => (first + last) as f64 / 2.0,
            TieMethod::Min => first as f64,
            TieMethod::Max => last as f64,
            TieMethod::Ordinal => position as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tied_rank_average() {
        assert_eq!(TieMethod::Average.tied_rank(2, 3, 2), 2.5);
        assert_eq!(TieMethod::Average.tied_rank(4, 4, 4), 4.0);
    }

    #[test]
    fn test_tied_rank_bounds() {
        assert_eq!(TieMethod::Min.tied_rank(2, 5, 4), 2.0);
        assert_eq!(TieMethod::Max.tied_rank(2, 5, 4), 5.0);
        assert_eq!(TieMethod::Ordinal.tied_rank(2, 5, 4), 4.0);
    }

    #[test]
    fn test_default_is_average() {
        assert_eq!(TieMethod::default(), TieMethod::Average);
    }
}
