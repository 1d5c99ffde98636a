use std::fmt;

use super::Pattern;
use crate::{edge_loop::EdgeLoop, error::PatchError};

/// Shape parameter derived while classifying, stored as twice its value
/// so relations like `A = 3 + 2x` stay exact even when `A` has the wrong parity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DerivedParameter(i64);

impl DerivedParameter {
    /// `numerator / 2`
    pub fn halved(numerator: i64) -> Self {
        Self(numerator)
    }

    pub fn whole(value: i64) -> Self {
        Self(2 * value)
    }

    pub fn value(&self) -> f64 {
        self.0 as f64 / 2.
    }

    pub fn is_integral(&self) -> bool {
        self.0 % 2 == 0
    }
}

impl fmt::Display for DerivedParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Pattern assigned to a maximally reduced loop, with the reasoning behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Classification {
    pub reduced: EdgeLoop,
    pub pattern: Pattern,
    /// Largest subdivision count
    pub alpha: usize,
    /// Second largest distinct count, when three distinct counts exist
    pub beta: Option<usize>,
    /// First side carrying `alpha`, which plays side 0 of the template
    pub alpha_side: usize,
    pub x: Option<DerivedParameter>,
    pub y: Option<DerivedParameter>,
    /// Template shape, e.g. `[A,1,1,1] with A = 3 + 2x`
    pub description: &'static str,
}

impl Classification {
    /// False when a derived parameter is a half integer
    pub fn is_integral(&self) -> bool {
        self.x.iter().chain(self.y.iter()).all(|p| p.is_integral())
    }
}

struct Row {
    index: usize,
    beta: Option<usize>,
    x: Option<DerivedParameter>,
    y: Option<DerivedParameter>,
    description: &'static str,
}

impl Row {
    fn new(index: usize, description: &'static str) -> Self {
        Self {
            index,
            beta: None,
            x: None,
            y: None,
            description,
        }
    }

    fn beta(mut self, beta: usize) -> Self {
        self.beta = Some(beta);
        self
    }

    fn x(mut self, x: DerivedParameter) -> Self {
        self.x = Some(x);
        self
    }

    fn y(mut self, y: DerivedParameter) -> Self {
        self.y = Some(y);
        self
    }
}

/// Assign a catalog pattern to a maximally reduced loop.
///
/// The decision depends on the largest value `alpha`, the number of distinct
/// values, how often `alpha` occurs and, for hexagons, whether `alpha` sits next
/// to its duplicate or to `beta`. Derived parameters are kept exact, so half-integral
/// cases are visible to callers and decided by their true sign.
pub fn classify(reduced: &EdgeLoop) -> Result<Classification, PatchError> {
    let n = reduced.arity();
    Pattern::count(n)?;

    let distinct = reduced.distinct_values();
    let alpha = reduced.max();
    let alpha_side = reduced.position(alpha).unwrap_or(0);
    let alphas = reduced.count(alpha);
    let a = alpha as i64;

    let row = match (n, distinct.len()) {
        (3, _) if alpha == 2 => Row::new(0, "[2,1,1]"),
        (3, _) if alpha > 2 => {
            Row::new(1, "[A,1,1] with A = 4 + 2x").x(DerivedParameter::halved(a - 4))
        }

        (4, _) if alpha == 1 => Row::new(0, "[1,1,1,1]"),
        (4, 2) if alphas == 1 => {
            let x = DerivedParameter::halved(a - 3);
            if x.value() <= 0. {
                Row::new(2, "[A,1,1,1] with A = 3 + 2x, x = 0").x(x)
            } else {
                Row::new(3, "[A,1,1,1] with A = 3 + 2x").x(x)
            }
        }
        (4, 2) if alphas == 2 => {
            Row::new(1, "[A,A,1,1]").x(DerivedParameter::whole(a - 2))
        }
        (4, 3) => {
            let b = distinct[1];
            Row::new(4, "[A,B,1,1] with A = B + 2 + 2x")
                .beta(b)
                .x(DerivedParameter::halved(a - b as i64 - 2))
                .y(DerivedParameter::whole(b as i64 - 2))
        }

        (5, 2) if alpha == 2 => Row::new(0, "[2,1,1,1,1]"),
        (5, 2) if alpha > 2 => {
            Row::new(2, "[A,1,1,1,1] with A = 4 + 2x").x(DerivedParameter::halved(a - 4))
        }
        (5, 3) => {
            let b = distinct[1];
            if b + 1 == alpha {
                Row::new(1, "[A,B,1,1,1] with A = B + 1")
                    .beta(b)
                    .x(DerivedParameter::whole(a - 2))
            } else {
                Row::new(3, "[A,B,1,1,1] with A = B + 3 + 2x")
                    .beta(b)
                    .x(DerivedParameter::halved(a - b as i64 - 3))
                    .y(DerivedParameter::whole(b as i64 - 2))
            }
        }

        (6, 1) => Row::new(0, "[1,1,1,1,1,1]").x(DerivedParameter::whole(a - 1)),
        (6, 2) if alphas == 1 => Row::new(2, "[A,1,1,1,1,1] with A = 3 + 2x, y = 0")
            .x(DerivedParameter::halved(a - 3))
            .y(DerivedParameter::whole(0)),
        (6, 2) if alphas == 2 => {
            if reduced.has_neighbor_with(alpha_side, alpha) {
                Row::new(1, "[A,A,1,1,1,1]").x(DerivedParameter::whole(a - 2))
            } else {
                Row::new(0, "[A,1,1,A,1,1]").x(DerivedParameter::whole(a - 1))
            }
        }
        (6, 3) => {
            let b = distinct[1];
            let x = DerivedParameter::halved(a - b as i64 - 2);
            if reduced.has_neighbor_with(alpha_side, b) {
                Row::new(3, "[A,B,1,1,1,1] with A = B + 2 + 2x")
                    .beta(b)
                    .x(x)
                    .y(DerivedParameter::whole(b as i64 - 2))
            } else {
                Row::new(2, "[A,1,1,B,1,1] with A = B + 2 + 2x")
                    .beta(b)
                    .x(x)
                    .y(DerivedParameter::whole(b as i64 - 1))
            }
        }

        _ => {
            return Err(PatchError::ClassificationAmbiguous {
                values: reduced.values().to_vec(),
            })
        }
    };

    let classification = Classification {
        reduced: reduced.clone(),
        pattern: Pattern::new(n, row.index)?,
        alpha,
        beta: row.beta,
        alpha_side,
        x: row.x,
        y: row.y,
        description: row.description,
    };

    #[cfg(feature = "log")]
    {
        log::debug!(
            "{} classified as {}: {} (alpha = {}, beta = {:?}, side 0 = #{})",
            reduced,
            classification.pattern,
            classification.description,
            alpha,
            classification.beta,
            alpha_side
        );
        if !classification.is_integral() {
            log::warn!(
                "{} yields non-integral shape parameters x = {:?}, y = {:?}",
                reduced,
                classification.x.map(|p| p.value()),
                classification.y.map(|p| p.value())
            );
        }
    }

    Ok(classification)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_values(values: &[usize]) -> Result<Classification, PatchError> {
        classify(&EdgeLoop::try_new(values.to_vec()).unwrap())
    }

    fn index_of(values: &[usize]) -> usize {
        classify_values(values).unwrap().pattern.index()
    }

    #[test]
    fn triangles() {
        assert_eq!(index_of(&[2, 1, 1]), 0);

        let c = classify_values(&[4, 4, 4]).unwrap();
        assert_eq!(c.pattern.index(), 1);
        assert_eq!(c.alpha, 4);
        assert_eq!(c.x, Some(DerivedParameter::whole(0)));

        assert!(matches!(
            classify_values(&[1, 1, 1]),
            Err(PatchError::ClassificationAmbiguous { .. })
        ));
    }

    #[test]
    fn quads() {
        assert_eq!(index_of(&[1, 1, 1, 1]), 0);
        assert_eq!(index_of(&[3, 3, 1, 1]), 1);
        assert_eq!(index_of(&[3, 1, 1, 1]), 2);
        assert_eq!(index_of(&[5, 1, 1, 1]), 3);

        // A = 4 gives x = 0.5, which is still positive
        let c = classify_values(&[4, 1, 1, 1]).unwrap();
        assert_eq!(c.pattern.index(), 3);
        assert_eq!(c.x.map(|x| x.value()), Some(0.5));
        assert!(!c.is_integral());

        let c = classify_values(&[1, 6, 2, 1]).unwrap();
        assert_eq!(c.pattern.index(), 4);
        assert_eq!(c.beta, Some(2));
        assert_eq!(c.alpha_side, 1);
        assert_eq!(c.x, Some(DerivedParameter::whole(1)));
    }

    #[test]
    fn half_integral_parameter_is_flagged() {
        let c = classify_values(&[2, 1, 1, 1]).unwrap();
        assert_eq!(c.pattern.index(), 2);
        let x = c.x.unwrap();
        assert_ne!(x.value(), 0.);
        assert_eq!(x.value(), -0.5);
        assert!(!c.is_integral());
    }

    #[test]
    fn pentagons() {
        assert_eq!(index_of(&[2, 1, 1, 1, 1]), 0);
        assert_eq!(index_of(&[1, 1, 6, 1, 1]), 2);
        assert_eq!(index_of(&[4, 3, 1, 1, 1]), 1);

        let c = classify_values(&[7, 2, 1, 1, 1]).unwrap();
        assert_eq!(c.pattern.index(), 3);
        assert_eq!(c.beta, Some(2));
        assert_eq!(c.x, Some(DerivedParameter::whole(1)));
    }

    #[test]
    fn hexagons() {
        assert_eq!(index_of(&[1, 1, 1, 1, 1, 1]), 0);
        assert_eq!(index_of(&[1, 1, 5, 1, 1, 1]), 2);
        assert_eq!(index_of(&[3, 1, 1, 1, 1, 3]), 1);
        assert_eq!(index_of(&[3, 1, 1, 3, 1, 1]), 0);
        assert_eq!(index_of(&[1, 6, 2, 1, 1, 1]), 3);
        assert_eq!(index_of(&[6, 1, 1, 2, 1, 1]), 2);
    }

    #[test]
    fn unmatched_configurations() {
        assert!(matches!(
            classify_values(&[2, 2, 2, 1]),
            Err(PatchError::ClassificationAmbiguous { .. })
        ));
        assert!(matches!(
            classify_values(&[1, 1, 1, 1, 1]),
            Err(PatchError::ClassificationAmbiguous { .. })
        ));
        assert_eq!(
            classify_values(&[2, 1, 1, 1, 1, 1, 1]).unwrap_err(),
            PatchError::UnsupportedArity(7)
        );
    }
}
