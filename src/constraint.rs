use std::fmt;

use crate::{edge_loop::EdgeLoop, error::PatchError, pattern::Pattern, solver::Solution};

/// `p[bridges[0]] + p[bridges[1]] + x * X + y * Y = rhs` for one side of the loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearEquality {
    /// Bridges touching the side: the ones parallel to its predecessor and successor
    pub bridges: [usize; 2],
    pub x: usize,
    pub y: usize,
    /// Side length minus the template offset, negative when the side is too short
    pub rhs: i64,
}

impl LinearEquality {
    /// Evaluate the left hand side for an assignment
    pub fn evaluate(&self, bridges: &[usize], free: &[usize]) -> i64 {
        let free_at = |i: usize| free.get(i).copied().unwrap_or(0) as i64;
        (bridges[self.bridges[0]] + bridges[self.bridges[1]]) as i64
            + self.x as i64 * free_at(0)
            + self.y as i64 * free_at(1)
    }

    pub fn holds(&self, bridges: &[usize], free: &[usize]) -> bool {
        self.evaluate(bridges, free) == self.rhs
    }
}

impl fmt::Display for LinearEquality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{} + p{}", self.bridges[0], self.bridges[1])?;
        for (coefficient, name) in [(self.x, "x"), (self.y, "y")] {
            match coefficient {
                0 => {}
                1 => write!(f, " + {}", name)?,
                c => write!(f, " + {}{}", c, name)?,
            }
        }
        write!(f, " = {}", self.rhs)
    }
}

/// Integer constraints of a pattern instantiated on a concrete loop.
///
/// There is one bridge variable per side, `0 <= p[k] <= min(len[k-1], len[k+1]) - 1`,
/// plus the pattern's free parameters (`x`, `y`), which are only bounded below by zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintSystem {
    edge_loop: EdgeLoop,
    pattern: Pattern,
    bridge_bounds: Vec<usize>,
    free_parameters: usize,
    equalities: Vec<LinearEquality>,
}

impl ConstraintSystem {
    /// Instantiate `pattern` on `edge_loop`, whose side 0 plays the template's alpha side.
    pub fn build(edge_loop: &EdgeLoop, pattern: Pattern) -> Result<Self, PatchError> {
        let n = edge_loop.arity();
        if n != pattern.arity() {
            return Err(PatchError::invalid_loop(format!(
                "{} sided loop cannot host {}",
                n, pattern
            )));
        }

        let bridge_bounds = (0..n)
            .map(|k| edge_loop[edge_loop.prev(k)].min(edge_loop[edge_loop.next(k)]) - 1)
            .collect();

        let template = pattern.template();
        let equalities = template
            .sides()
            .iter()
            .enumerate()
            .map(|(k, relation)| LinearEquality {
                bridges: [edge_loop.prev(k), edge_loop.next(k)],
                x: relation.x,
                y: relation.y,
                rhs: edge_loop[k] as i64 - relation.offset as i64,
            })
            .collect();

        Ok(Self {
            edge_loop: edge_loop.clone(),
            pattern,
            bridge_bounds,
            free_parameters: template.free_parameters(),
            equalities,
        })
    }

    pub fn edge_loop(&self) -> &EdgeLoop {
        &self.edge_loop
    }

    pub fn pattern(&self) -> Pattern {
        self.pattern
    }

    /// Upper bound of each bridge variable
    pub fn bridge_bounds(&self) -> &[usize] {
        &self.bridge_bounds
    }

    pub fn free_parameters(&self) -> usize {
        self.free_parameters
    }

    /// One equality per side, in side order
    pub fn equalities(&self) -> &[LinearEquality] {
        &self.equalities
    }

    /// Check bounds and every equality exactly
    pub fn is_satisfied_by(&self, solution: &Solution) -> bool {
        let bridges = solution.bridges();
        let free = solution.free_parameters();
        bridges.len() == self.bridge_bounds.len()
            && free.len() == self.free_parameters
            && bridges
                .iter()
                .zip(&self.bridge_bounds)
                .all(|(p, bound)| p <= bound)
            && self.equalities.iter().all(|e| e.holds(bridges, free))
    }
}
