/// Equation for side `k` of a pattern:
/// `p[k-1] + p[k+1] + x * X + y * Y = len[k] - offset`
/// where `p` are the bridge variables and `X`, `Y` the free parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SideRelation {
    pub x: usize,
    pub y: usize,
    pub offset: usize,
}

macro_rules! side {
    ($x:expr, $y:expr, $offset:expr) => {
        SideRelation {
            x: $x,
            y: $y,
            offset: $offset,
        }
    };
}

/// Plain side: its two bridges span the whole side but one segment
const PLAIN: SideRelation = side!(0, 0, 1);

/// Topological template of a quad patch, one relation per side.
/// Side 0 is the side carrying the largest subdivision count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PatternTemplate {
    sides: &'static [SideRelation],
}

impl PatternTemplate {
    pub fn sides(&self) -> &'static [SideRelation] {
        self.sides
    }

    pub fn arity(&self) -> usize {
        self.sides.len()
    }

    /// Number of free parameters (0, 1 or 2) the template uses
    pub fn free_parameters(&self) -> usize {
        if self.sides.iter().any(|s| s.y > 0) {
            2
        } else if self.sides.iter().any(|s| s.x > 0) {
            1
        } else {
            0
        }
    }
}

pub(crate) static TRIANGLE: [PatternTemplate; 2] = [
    PatternTemplate {
        sides: &[side!(0, 0, 2), PLAIN, PLAIN],
    },
    PatternTemplate {
        sides: &[side!(2, 0, 4), PLAIN, PLAIN],
    },
];

pub(crate) static QUAD: [PatternTemplate; 5] = [
    PatternTemplate {
        sides: &[PLAIN, PLAIN, PLAIN, PLAIN],
    },
    PatternTemplate {
        sides: &[side!(1, 0, 2), side!(1, 0, 2), PLAIN, PLAIN],
    },
    PatternTemplate {
        sides: &[side!(1, 1, 3), side!(1, 0, 1), PLAIN, side!(0, 1, 1)],
    },
    PatternTemplate {
        sides: &[side!(2, 0, 3), PLAIN, PLAIN, PLAIN],
    },
    PatternTemplate {
        sides: &[side!(2, 1, 4), side!(0, 1, 2), PLAIN, PLAIN],
    },
];

pub(crate) static PENTAGON: [PatternTemplate; 4] = [
    PatternTemplate {
        sides: &[side!(0, 0, 2), PLAIN, PLAIN, PLAIN, PLAIN],
    },
    PatternTemplate {
        sides: &[side!(1, 0, 2), side!(1, 0, 1), PLAIN, PLAIN, PLAIN],
    },
    PatternTemplate {
        sides: &[side!(2, 0, 4), PLAIN, PLAIN, PLAIN, PLAIN],
    },
    PatternTemplate {
        sides: &[side!(2, 1, 5), side!(0, 1, 2), PLAIN, PLAIN, PLAIN],
    },
];

pub(crate) static HEXAGON: [PatternTemplate; 4] = [
    PatternTemplate {
        sides: &[side!(1, 0, 1), PLAIN, PLAIN, side!(1, 0, 1), PLAIN, PLAIN],
    },
    PatternTemplate {
        sides: &[side!(1, 0, 2), side!(1, 0, 2), PLAIN, PLAIN, PLAIN, PLAIN],
    },
    PatternTemplate {
        sides: &[side!(2, 1, 3), PLAIN, PLAIN, side!(0, 1, 1), PLAIN, PLAIN],
    },
    PatternTemplate {
        sides: &[side!(2, 1, 4), side!(0, 1, 2), PLAIN, PLAIN, PLAIN, PLAIN],
    },
];

/// Templates available for a patch with `arity` sides, empty when unsupported
pub(crate) fn catalog(arity: usize) -> &'static [PatternTemplate] {
    match arity {
        3 => &TRIANGLE,
        4 => &QUAD,
        5 => &PENTAGON,
        6 => &HEXAGON,
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_sizes() {
        assert_eq!(catalog(3).len(), 2);
        assert_eq!(catalog(4).len(), 5);
        assert_eq!(catalog(5).len(), 4);
        assert_eq!(catalog(6).len(), 4);
        assert!(catalog(2).is_empty());
        assert!(catalog(7).is_empty());
    }

    #[test]
    fn templates_match_their_arity() {
        for arity in 3..=6 {
            for t in catalog(arity) {
                assert_eq!(t.arity(), arity);
            }
        }
    }

    #[test]
    fn free_parameter_counts() {
        let counts = |arity: usize| {
            catalog(arity)
                .iter()
                .map(|t| t.free_parameters())
                .collect::<Vec<_>>()
        };
        assert_eq!(counts(3), vec![0, 1]);
        assert_eq!(counts(4), vec![0, 1, 2, 1, 2]);
        assert_eq!(counts(5), vec![0, 1, 1, 2]);
        assert_eq!(counts(6), vec![1, 1, 2, 2]);
    }
}
