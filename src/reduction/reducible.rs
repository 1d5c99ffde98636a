use crate::{edge_loop::EdgeLoop, error::PatchError};

/// A side whose two neighbors can both be shortened by trimming a quad strip along it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReductionCandidate {
    /// Side index
    pub edge: usize,
    /// Largest strip depth that keeps both neighbors at one segment or more
    pub depth: usize,
    /// `depth * len[edge]`, the quad area the full strip removes
    pub potential: usize,
}

/// Find every side whose neighbors both carry more than one segment.
/// An empty result means the loop is maximally reduced.
pub fn reducible(edge_loop: &EdgeLoop) -> Vec<ReductionCandidate> {
    (0..edge_loop.arity())
        .filter_map(|k| {
            let before = edge_loop[edge_loop.prev(k)];
            let after = edge_loop[edge_loop.next(k)];
            if before > 1 && after > 1 {
                let depth = before.min(after) - 1;
                Some(ReductionCandidate {
                    edge: k,
                    depth,
                    potential: depth * edge_loop[k],
                })
            } else {
                None
            }
        })
        .collect()
}

/// Trim a strip of `depth` rows along side `edge`: both neighbors lose `depth` segments,
/// every other side (including `edge`) is unchanged.
pub fn reduce_edges(edge_loop: &EdgeLoop, edge: usize, depth: usize) -> Result<EdgeLoop, PatchError> {
    let n = edge_loop.arity();
    if edge >= n {
        return Err(PatchError::invalid_loop(format!(
            "side #{} is out of range for a {} sided loop",
            edge, n
        )));
    }
    let (before, after) = (edge_loop.prev(edge), edge_loop.next(edge));
    let reduced = edge_loop
        .iter()
        .enumerate()
        .map(|(i, &l)| {
            if i == before || i == after {
                l.checked_sub(depth).filter(|&r| r > 0).ok_or_else(|| {
                    PatchError::invalid_loop(format!(
                        "reducing side #{} by {} empties side #{}",
                        edge, depth, i
                    ))
                })
            } else {
                Ok(l)
            }
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(EdgeLoop::from_positive(reduced))
}
