//! Collaborator interfaces consumed by the allocator.
//!
//! Liveness, register classes and execution frequency are computed elsewhere
//! in the compiler. The allocator only sees them through these traits, in the
//! same way the CFG analyses see functions through `CfgFunction`/`CfgInst`.

use crate::types::{InstRef, PhysReg, VReg};

/// Live-value adapter: enumerates values and answers overlap queries.
pub trait LiveValues {
    /// Every value of the function, in a stable order.
    fn live_values(&self) -> Vec<VReg>;

    /// Whether the live ranges of `a` and `b` share a program point.
    fn overlaps(&self, a: VReg, b: VReg) -> bool;

    /// Whether `vreg` may be rewritten to memory.
    fn is_spillable(&self, vreg: VReg) -> bool;

    /// False for values without a live range (e.g. debug-only values).
    fn has_live_range(&self, vreg: VReg) -> bool;

    /// Half-open `[start, end)` hull of the live range, if known.
    ///
    /// Only used to prune pair tests; `overlaps` stays authoritative.
    fn extent(&self, _vreg: VReg) -> Option<(u32, u32)> {
        None
    }
}

/// Register-class adapter: the locations a value may legally occupy.
pub trait CandidateLocations {
    /// Candidate registers for `vreg`. Must be stable within a round.
    fn candidate_locations(&self, vreg: VReg) -> Vec<PhysReg>;
}

/// Use/def and loop-nesting adapter for spill weights.
pub trait UseFrequency {
    /// Every instruction that reads or writes `vreg`.
    fn references(&self, vreg: VReg) -> Vec<InstRef>;

    /// Loop nesting depth of `inst` (0 = not in a loop).
    fn loop_depth(&self, inst: InstRef) -> u32;

    /// `(reads, writes)` of `vreg` at `inst`.
    fn reads_writes(&self, vreg: VReg, inst: InstRef) -> (bool, bool);
}
