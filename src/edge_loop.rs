use std::fmt;
use std::ops::Index;

use itertools::Itertools;

use crate::error::PatchError;

/// Closed loop of patch sides, each entry is the number of segments on that side.
/// Indices wrap around, so the predecessor of side 0 is side `len - 1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<usize>", into = "Vec<usize>")
)]
pub struct EdgeLoop(Vec<usize>);

impl EdgeLoop {
    /// Create a loop from subdivision counts.
    /// Fails when the loop is empty or a side has no segment.
    pub fn try_new(subdivisions: Vec<usize>) -> Result<Self, PatchError> {
        if subdivisions.is_empty() {
            return Err(PatchError::invalid_loop("loop has no sides"));
        }
        if let Some(side) = subdivisions.iter().position(|&l| l == 0) {
            return Err(PatchError::invalid_loop(format!(
                "side #{} has zero subdivisions",
                side
            )));
        }
        Ok(Self(subdivisions))
    }

    /// Wrap counts already known to be positive
    pub(crate) fn from_positive(subdivisions: Vec<usize>) -> Self {
        debug_assert!(!subdivisions.is_empty() && subdivisions.iter().all(|&l| l > 0));
        Self(subdivisions)
    }

    /// Number of sides
    pub fn arity(&self) -> usize {
        self.0.len()
    }

    pub fn values(&self) -> &[usize] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, usize> {
        self.0.iter()
    }

    /// Total number of boundary segments
    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }

    /// A closed all-quad tiling needs an even number of boundary segments.
    pub fn is_even(&self) -> bool {
        self.total() % 2 == 0
    }

    pub fn prev(&self, index: usize) -> usize {
        let n = self.arity();
        (index % n + n - 1) % n
    }

    pub fn next(&self, index: usize) -> usize {
        (index + 1) % self.arity()
    }

    /// Largest subdivision count
    pub fn max(&self) -> usize {
        self.0.iter().copied().max().unwrap_or(0)
    }

    /// Distinct subdivision counts in descending order
    pub fn distinct_values(&self) -> Vec<usize> {
        self.0
            .iter()
            .copied()
            .sorted_unstable_by(|a, b| b.cmp(a))
            .dedup()
            .collect()
    }

    /// How many sides carry exactly `value` segments
    pub fn count(&self, value: usize) -> usize {
        self.0.iter().filter(|&&l| l == value).count()
    }

    /// Index of the first side carrying `value` segments
    pub fn position(&self, value: usize) -> Option<usize> {
        self.0.iter().position(|&l| l == value)
    }

    /// Whether a neighbor of side `index` carries `value` segments
    pub fn has_neighbor_with(&self, index: usize, value: usize) -> bool {
        self[self.prev(index)] == value || self[self.next(index)] == value
    }

    /// Loop starting at side `start`, same orientation
    pub fn rotated(&self, start: usize) -> Self {
        let n = self.arity();
        Self((0..n).map(|j| self.0[(start + j) % n]).collect())
    }

    /// Loop traversed in the opposite orientation, side 0 becomes the last side
    pub fn reversed(&self) -> Self {
        Self(self.0.iter().rev().copied().collect())
    }
}

impl Index<usize> for EdgeLoop {
    type Output = usize;
    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl TryFrom<Vec<usize>> for EdgeLoop {
    type Error = PatchError;
    fn try_from(value: Vec<usize>) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl TryFrom<&[usize]> for EdgeLoop {
    type Error = PatchError;
    fn try_from(value: &[usize]) -> Result<Self, Self::Error> {
        Self::try_new(value.to_vec())
    }
}

impl From<EdgeLoop> for Vec<usize> {
    fn from(value: EdgeLoop) -> Self {
        value.0
    }
}

impl<'a> IntoIterator for &'a EdgeLoop {
    type Item = &'a usize;
    type IntoIter = std::slice::Iter<'a, usize>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for EdgeLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.iter().join(", "))
    }
}
