use crate::edge_loop::EdgeLoop;

/// Orientation of a permuted loop relative to the caller's loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Same winding as the original loop (+1)
    Forward,
    /// Opposite winding (-1)
    Reversed,
}

impl Direction {
    /// Step taken through the original loop per permuted side
    pub fn sign(&self) -> i64 {
        match self {
            Direction::Forward => 1,
            Direction::Reversed => -1,
        }
    }
}

/// A rotation or reflection of an edge loop.
/// `pivot` is the original side that became side 0.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Permutation {
    edge_loop: EdgeLoop,
    pivot: usize,
    direction: Direction,
}

impl Permutation {
    pub fn edge_loop(&self) -> &EdgeLoop {
        &self.edge_loop
    }

    pub fn pivot(&self) -> usize {
        self.pivot
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Original side index of the permuted side `index`
    pub fn original_index(&self, index: usize) -> usize {
        let n = self.edge_loop.arity() as i64;
        (self.pivot as i64 + self.direction.sign() * index as i64).rem_euclid(n) as usize
    }

    /// Rebuild the loop this permutation was generated from
    pub fn restore(&self) -> EdgeLoop {
        let n = self.edge_loop.arity();
        let mut original = vec![0; n];
        for (j, &l) in self.edge_loop.iter().enumerate() {
            original[self.original_index(j)] = l;
        }
        EdgeLoop::from_positive(original)
    }
}

/// Enumerate every rotation of the loop together with its reversal.
///
/// For each start index `i` the rotation is tagged `(i, Forward)` and its reversal,
/// which starts at the side preceding `i`, is tagged `((i + n - 1) % n, Reversed)`.
/// The order is rotation 0, reversal 0, rotation 1, reversal 1, ...
pub fn permutations(edge_loop: &EdgeLoop) -> Vec<Permutation> {
    let n = edge_loop.arity();
    (0..n)
        .flat_map(|i| {
            let rotated = edge_loop.rotated(i);
            let reversed = rotated.reversed();
            [
                Permutation {
                    edge_loop: rotated,
                    pivot: i,
                    direction: Direction::Forward,
                },
                Permutation {
                    edge_loop: reversed,
                    pivot: (i + n - 1) % n,
                    direction: Direction::Reversed,
                },
            ]
        })
        .collect()
}
