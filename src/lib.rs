mod constraint;
mod edge_loop;
mod error;
mod patch;
mod pattern;
mod permutation;
mod reduction;
mod solver;

pub mod prelude {
    pub use crate::constraint::*;
    pub use crate::edge_loop::*;
    pub use crate::error::*;
    pub use crate::patch::*;
    pub use crate::pattern::*;
    pub use crate::permutation::*;
    pub use crate::reduction::*;
    pub use crate::solver::*;
}
