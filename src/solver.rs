use std::fmt;

use good_lp::{
    constraint, microlp, variable, variables, Expression, ResolutionError, Solution as _,
    SolverModel, Variable,
};

use crate::{constraint::ConstraintSystem, error::PatchError};

const FREE_PARAMETER_NAMES: [&str; 2] = ["x", "y"];

/// Integer assignment of a feasible constraint system
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "SolutionRepr"))]
pub struct Solution {
    bridges: Vec<usize>,
    free_parameters: Vec<usize>,
    padding: usize,
}

/// Deserialized form; `padding` is recomputed from the bridges
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct SolutionRepr {
    bridges: Vec<usize>,
    free_parameters: Vec<usize>,
}

#[cfg(feature = "serde")]
impl From<SolutionRepr> for Solution {
    fn from(repr: SolutionRepr) -> Self {
        Solution::new(repr.bridges, repr.free_parameters)
    }
}

impl Solution {
    pub fn new(bridges: Vec<usize>, free_parameters: Vec<usize>) -> Self {
        let padding = bridges.iter().sum();
        Self {
            bridges,
            free_parameters,
            padding,
        }
    }

    /// Bridge variable values `p0..pN-1`
    pub fn bridges(&self) -> &[usize] {
        &self.bridges
    }

    pub fn free_parameters(&self) -> &[usize] {
        &self.free_parameters
    }

    pub fn x(&self) -> Option<usize> {
        self.free_parameters.first().copied()
    }

    pub fn y(&self) -> Option<usize> {
        self.free_parameters.get(1).copied()
    }

    /// Objective value, the sum of the bridge variables
    pub fn padding(&self) -> usize {
        self.padding
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, p) in self.bridges.iter().enumerate() {
            write!(f, "p{} = {}, ", i, p)?;
        }
        for (name, v) in FREE_PARAMETER_NAMES.iter().zip(&self.free_parameters) {
            write!(f, "{} = {}, ", name, v)?;
        }
        write!(f, "padding = {}", self.padding)
    }
}

impl ConstraintSystem {
    /// Maximize the padding (sum of bridge variables) over integer assignments.
    ///
    /// Returns `PatchError::Infeasible` when no assignment satisfies the equalities,
    /// which is the common outcome for most permutation and pattern pairs.
    pub fn solve(&self) -> Result<Solution, PatchError> {
        let mut vars = variables!();
        let bridges: Vec<Variable> = self
            .bridge_bounds()
            .iter()
            .enumerate()
            .map(|(i, &bound)| {
                vars.add(
                    variable()
                        .integer()
                        .min(0)
                        .max(bound as f64)
                        .name(format!("p{}", i)),
                )
            })
            .collect();
        let free: Vec<Variable> = FREE_PARAMETER_NAMES
            .iter()
            .take(self.free_parameters())
            .map(|name| vars.add(variable().integer().min(0).name(*name)))
            .collect();

        let padding: Expression = bridges.iter().copied().sum();
        let mut model = vars.maximise(padding).using(microlp);

        for equality in self.equalities() {
            let mut lhs = Expression::from(bridges[equality.bridges[0]]);
            lhs += bridges[equality.bridges[1]];
            for (coefficient, parameter) in [equality.x, equality.y].into_iter().zip(&free) {
                if coefficient > 0 {
                    lhs += *parameter * coefficient as f64;
                }
            }
            let rhs = equality.rhs as f64;
            model.add_constraint(constraint!(lhs == rhs));
        }

        let solved = match model.solve() {
            Ok(solved) => solved,
            Err(ResolutionError::Infeasible) => {
                #[cfg(feature = "log")]
                log::trace!("{} is infeasible on {}", self.pattern(), self.edge_loop());
                return Err(PatchError::Infeasible {
                    pattern: self.pattern(),
                });
            }
            Err(e) => return Err(PatchError::solver(e.to_string())),
        };

        let round = |v: &Variable| solved.value(*v).round().max(0.) as usize;
        let solution = Solution::new(
            bridges.iter().map(round).collect(),
            free.iter().map(round).collect(),
        );

        if !self.is_satisfied_by(&solution) {
            return Err(PatchError::solver(format!(
                "assignment {} violates {} on {}",
                solution,
                self.pattern(),
                self.edge_loop()
            )));
        }

        #[cfg(feature = "log")]
        log::debug!("{} on {}: {}", self.pattern(), self.edge_loop(), solution);

        Ok(solution)
    }
}
