pub mod classifier;
pub mod template;
pub use classifier::*;
pub use template::{PatternTemplate, SideRelation};

use std::fmt;

use crate::error::PatchError;

/// One member of the per-arity pattern catalog.
/// Triangles have 2 patterns, quads 5, pentagons and hexagons 4 each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "PatternRepr", into = "PatternRepr")
)]
pub struct Pattern {
    arity: usize,
    index: usize,
}

impl Pattern {
    pub fn new(arity: usize, index: usize) -> Result<Self, PatchError> {
        let count = Self::count(arity)?;
        if index < count {
            Ok(Self { arity, index })
        } else {
            Err(PatchError::InvalidPattern { arity, index })
        }
    }

    /// Number of cataloged patterns for `arity`
    pub fn count(arity: usize) -> Result<usize, PatchError> {
        match template::catalog(arity).len() {
            0 => Err(PatchError::UnsupportedArity(arity)),
            n => Ok(n),
        }
    }

    /// Every pattern for `arity`, in index order
    pub fn catalog(arity: usize) -> Result<Vec<Self>, PatchError> {
        let count = Self::count(arity)?;
        Ok((0..count).map(|index| Self { arity, index }).collect())
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn template(&self) -> &'static PatternTemplate {
        &template::catalog(self.arity)[self.index]
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pattern #{} of {} sided patch", self.index, self.arity)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct PatternRepr {
    arity: usize,
    index: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<PatternRepr> for Pattern {
    type Error = PatchError;
    fn try_from(value: PatternRepr) -> Result<Self, Self::Error> {
        Pattern::new(value.arity, value.index)
    }
}

#[cfg(feature = "serde")]
impl From<Pattern> for PatternRepr {
    fn from(value: Pattern) -> Self {
        PatternRepr {
            arity: value.arity,
            index: value.index,
        }
    }
}
