use itertools::iproduct;
use nalgebra::Point3;

use crate::{
    constraint::ConstraintSystem,
    edge_loop::EdgeLoop,
    error::PatchError,
    pattern::{classify, Classification, Pattern},
    permutation::{permutations, Permutation},
    reduction::{reduce, ReductionOptions, ReductionStrategy, ReductionTrace},
    solver::Solution,
};

/// Options for solving a patch
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PatchOptions {
    /// Options of the reduction run preceding classification
    pub reduction: ReductionOptions,
    /// Strategy used by `Patch::identify_pattern`
    pub strategy: ReductionStrategy,
}

impl PatchOptions {
    pub fn with_reduction(mut self, reduction: ReductionOptions) -> Self {
        self.reduction = reduction;
        self
    }

    pub fn with_strategy(mut self, strategy: ReductionStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

/// Feasible tiling found for one permutation and pattern
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatchSolution {
    pub permutation: Permutation,
    pub pattern: Pattern,
    pub solution: Solution,
}

impl PatchSolution {
    /// Side of the caller's loop acting as the template's side 0
    pub fn alpha_side(&self) -> usize {
        self.permutation.pivot()
    }
}

/// N-sided region bounded by a closed loop of subdivided sides.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Patch {
    edge_loop: EdgeLoop,
    /// Corner positions, carried for later placement only
    corners: Option<Vec<Point3<f64>>>,
    #[cfg_attr(feature = "serde", serde(skip))]
    options: PatchOptions,
}

impl Patch {
    pub fn new(edge_loop: EdgeLoop) -> Self {
        Self {
            edge_loop,
            corners: None,
            options: PatchOptions::default(),
        }
    }

    /// Create a patch from subdivision counts
    pub fn try_new(subdivisions: &[usize]) -> Result<Self, PatchError> {
        Ok(Self::new(EdgeLoop::try_from(subdivisions)?))
    }

    pub fn with_corners(mut self, corners: Vec<Point3<f64>>) -> Self {
        self.corners = Some(corners);
        self
    }

    pub fn with_options(mut self, options: PatchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn edge_loop(&self) -> &EdgeLoop {
        &self.edge_loop
    }

    pub fn corners(&self) -> Option<&[Point3<f64>]> {
        self.corners.as_deref()
    }

    pub fn options(&self) -> &PatchOptions {
        &self.options
    }

    /// Check that a closed quad tiling can exist for this loop
    pub fn validate(&self) -> Result<(), PatchError> {
        let n = self.edge_loop.arity();
        if let Some(corners) = &self.corners {
            if corners.len() != n {
                return Err(PatchError::invalid_loop(format!(
                    "{} corners for {} sides",
                    corners.len(),
                    n
                )));
            }
        }
        if !self.edge_loop.is_even() {
            return Err(PatchError::invalid_loop(format!(
                "{} has an odd total of {} segments",
                self.edge_loop,
                self.edge_loop.total()
            )));
        }
        Pattern::count(n)?;
        Ok(())
    }

    /// Solve every cataloged pattern on every rotation and reflection of the loop.
    ///
    /// Infeasible combinations are skipped; an empty result means no pattern fits.
    /// Results follow permutation order, then pattern index.
    pub fn solve(&self) -> Result<Vec<PatchSolution>, PatchError> {
        self.validate()?;

        let catalog = Pattern::catalog(self.edge_loop.arity())?;
        let mut solutions = vec![];
        for (permutation, &pattern) in iproduct!(permutations(&self.edge_loop), catalog.iter()) {
            let system = ConstraintSystem::build(permutation.edge_loop(), pattern)?;
            match system.solve() {
                Ok(solution) => solutions.push(PatchSolution {
                    permutation,
                    pattern,
                    solution,
                }),
                Err(e) if e.is_infeasible() => {}
                Err(e) => return Err(e),
            }
        }

        #[cfg(feature = "log")]
        log::info!(
            "{}: {} feasible permutation/pattern pairs",
            self.edge_loop,
            solutions.len()
        );

        Ok(solutions)
    }

    /// Trim strips off the loop with `strategy` until it is maximally reduced
    pub fn reduce(&self, strategy: ReductionStrategy) -> Result<ReductionTrace, PatchError> {
        reduce(&self.edge_loop, strategy, &self.options.reduction)
    }

    /// Reduce with the configured strategy and classify the residual loop.
    /// Diagnostic only, `solve` does not depend on it.
    pub fn identify_pattern(&self) -> Result<Classification, PatchError> {
        let trace = self.reduce(self.options.strategy)?;
        classify(trace.reduced())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permutation::Direction;

    #[test]
    fn validation() {
        assert!(Patch::try_new(&[2, 1, 1]).unwrap().validate().is_ok());
        assert!(matches!(
            Patch::try_new(&[3, 3, 3]).unwrap().validate(),
            Err(PatchError::InvalidLoop(_))
        ));
        assert_eq!(
            Patch::try_new(&[1, 1]).unwrap().validate(),
            Err(PatchError::UnsupportedArity(2))
        );
        assert_eq!(
            Patch::try_new(&[1; 8]).unwrap().validate(),
            Err(PatchError::UnsupportedArity(8))
        );

        let patch = Patch::try_new(&[2, 1, 1])
            .unwrap()
            .with_corners(vec![Point3::origin(), Point3::new(1., 0., 0.)]);
        assert!(matches!(patch.validate(), Err(PatchError::InvalidLoop(_))));
    }

    #[test]
    fn odd_loop_is_rejected_before_solving() {
        let patch = Patch::try_new(&[4, 2, 1, 2]).unwrap();
        assert!(matches!(patch.solve(), Err(PatchError::InvalidLoop(_))));
    }

    #[test]
    fn triangle_solutions_carry_provenance() {
        let solutions = Patch::try_new(&[2, 1, 1]).unwrap().solve().unwrap();
        let tags = solutions
            .iter()
            .map(|s| {
                (
                    s.permutation.pivot(),
                    s.permutation.direction(),
                    s.pattern.index(),
                )
            })
            .collect::<Vec<_>>();
        assert_eq!(
            tags,
            vec![(0, Direction::Forward, 0), (0, Direction::Reversed, 0)]
        );
        assert!(solutions.iter().all(|s| s.solution.padding() == 0));
        assert!(solutions.iter().all(|s| s.alpha_side() == 0));
    }

    #[test]
    fn identify_pattern_after_reduction() {
        let patch = Patch::try_new(&[7, 7, 7, 7]).unwrap();
        let classification = patch.identify_pattern().unwrap();
        assert_eq!(classification.reduced.values(), &[1, 1, 1, 1]);
        assert_eq!(classification.pattern, Pattern::new(4, 0).unwrap());
    }
}
