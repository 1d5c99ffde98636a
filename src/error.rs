use thiserror::Error;

use crate::pattern::Pattern;

/// Errors raised while validating, reducing, classifying or solving a patch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatchError {
    /// The loop violates a precondition (empty, zero subdivisions, odd total, corner mismatch).
    #[error("invalid edge loop: {0}")]
    InvalidLoop(String),

    /// Only 3 to 6 sided patches have a pattern catalog.
    #[error("unsupported patch arity {0}, expected 3 to 6 sides")]
    UnsupportedArity(usize),

    /// The pattern index is outside the catalog for the arity.
    #[error("no pattern #{index} for a {arity} sided patch")]
    InvalidPattern { arity: usize, index: usize },

    /// The integer program for a single (permutation, pattern) pair has no solution.
    #[error("{pattern} is infeasible for this permutation")]
    Infeasible { pattern: Pattern },

    /// The reduced loop matches no row of the classification table.
    #[error("reduced loop {values:?} matches no pattern")]
    ClassificationAmbiguous { values: Vec<usize> },

    /// The integer programming backend failed for a reason other than infeasibility.
    #[error("solver failed: {0}")]
    Solver(String),
}

impl PatchError {
    pub fn invalid_loop(details: impl Into<String>) -> Self {
        Self::InvalidLoop(details.into())
    }

    pub fn solver(details: impl Into<String>) -> Self {
        Self::Solver(details.into())
    }

    /// Whether the error only rules out one candidate rather than the whole patch.
    pub fn is_infeasible(&self) -> bool {
        matches!(self, Self::Infeasible { .. })
    }
}
