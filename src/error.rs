//! Errors raised by an allocation round

use thiserror::Error;

use crate::types::{PhysReg, VReg};

/// Fatal conditions that abort the allocation round for a function.
///
/// A spillable value running out of registers is not an error; it is
/// reported as [`Decision::Spill`](crate::Decision::Spill).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocError {
    #[error("{0} cannot be spilled but no register is left for it")]
    UnspillableSpilled(VReg),

    #[error("{0} has no candidate registers")]
    EmptyCandidates(VReg),

    #[error("interference graph is asymmetric: {from} -> {to} has no reverse edge")]
    AsymmetricEdge { from: VReg, to: VReg },

    #[error("interference graph has a self edge on {0}")]
    SelfEdge(VReg),

    #[error("degree of {vreg} is {degree} but it has {neighbors} neighbors")]
    DegreeMismatch {
        vreg: VReg,
        degree: usize,
        neighbors: usize,
    },

    #[error("interfering values {a} and {b} were both assigned {reg}")]
    ConflictingColors { a: VReg, b: VReg, reg: PhysReg },
}
