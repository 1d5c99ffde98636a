pub mod reducible;
pub use reducible::*;

use crate::{edge_loop::EdgeLoop, error::PatchError};

/// Policy used to pick the next strip to trim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReductionStrategy {
    /// Trim the full strip with the largest potential, coarsest decomposition
    #[default]
    MaxFirst,
    /// Trim the full strip with the smallest potential
    MinFirst,
    /// Trim a single row along the side with the largest potential
    Padding,
}

impl ReductionStrategy {
    /// Pick a candidate, ties go to the lowest side index.
    fn select(&self, candidates: &[ReductionCandidate]) -> Option<ReductionCandidate> {
        candidates.iter().copied().reduce(|best, c| match self {
            ReductionStrategy::MaxFirst | ReductionStrategy::Padding => {
                if c.potential > best.potential {
                    c
                } else {
                    best
                }
            }
            ReductionStrategy::MinFirst => {
                if c.potential < best.potential {
                    c
                } else {
                    best
                }
            }
        })
    }

    fn depth(&self, candidate: &ReductionCandidate) -> usize {
        match self {
            ReductionStrategy::Padding => 1,
            _ => candidate.depth,
        }
    }
}

/// Options for reducing an edge loop
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReductionOptions {
    /// Maximum number of strips trimmed before giving up
    pub max_iterations: usize,
}

impl Default for ReductionOptions {
    fn default() -> Self {
        Self { max_iterations: 10 }
    }
}

impl ReductionOptions {
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// One trimmed strip
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ReductionStep {
    pub candidate: ReductionCandidate,
    /// Depth actually removed, at most `candidate.depth`
    pub depth: usize,
    pub result: EdgeLoop,
}

/// Record of a reduction run
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ReductionTrace {
    strategy: ReductionStrategy,
    initial: EdgeLoop,
    steps: Vec<ReductionStep>,
    capped: bool,
}

impl ReductionTrace {
    pub fn strategy(&self) -> ReductionStrategy {
        self.strategy
    }

    pub fn initial(&self) -> &EdgeLoop {
        &self.initial
    }

    pub fn steps(&self) -> &[ReductionStep] {
        &self.steps
    }

    /// Final loop of the run
    pub fn reduced(&self) -> &EdgeLoop {
        self.steps
            .last()
            .map(|step| &step.result)
            .unwrap_or(&self.initial)
    }

    /// True when the iteration limit stopped the run while strips were still removable
    pub fn capped(&self) -> bool {
        self.capped
    }

    pub fn iterations(&self) -> usize {
        self.steps.len()
    }
}

/// Repeatedly analyze, pick and trim until no side is reducible
/// or `options.max_iterations` strips have been removed.
pub fn reduce(
    edge_loop: &EdgeLoop,
    strategy: ReductionStrategy,
    options: &ReductionOptions,
) -> Result<ReductionTrace, PatchError> {
    let mut current = edge_loop.clone();
    let mut steps = vec![];
    let mut candidates = reducible(&current);

    while !candidates.is_empty() && steps.len() < options.max_iterations {
        let Some(candidate) = strategy.select(&candidates) else {
            break;
        };
        let depth = strategy.depth(&candidate);
        current = reduce_edges(&current, candidate.edge, depth)?;

        #[cfg(feature = "log")]
        log::debug!(
            "{:?} reduction: side #{} by {} -> {}",
            strategy,
            candidate.edge,
            depth,
            current
        );

        candidates = reducible(&current);
        steps.push(ReductionStep {
            candidate,
            depth,
            result: current.clone(),
        });
    }

    #[cfg(feature = "log")]
    {
        if steps.is_empty() {
            log::debug!("{} is already maximally reduced", edge_loop);
        }
    }

    Ok(ReductionTrace {
        strategy,
        initial: edge_loop.clone(),
        steps,
        capped: !candidates.is_empty(),
    })
}
