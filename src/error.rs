use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FdcrError {
    #[error("Missing belief scores: need one per p-value ({pvalues}), got {beliefs}")]
    MissingBeliefScores { pvalues: usize, beliefs: usize },

    #[error("Belief epsilon must be finite and positive, got {0}")]
    InvalidEpsilon(f64),
}
