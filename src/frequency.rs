//! Use/def table for spill weights
//!
//! Records, per instruction, its loop nesting depth and the values it reads
//! and writes. Loop depths come from the caller's loop analysis.

use std::collections::{BTreeSet, HashMap};

use crate::provider::UseFrequency;
use crate::types::{InstRef, VReg};

#[derive(Debug, Clone, Default)]
struct InstRecord {
    loop_depth: u32,
    reads: Vec<VReg>,
    writes: Vec<VReg>,
}

/// Operand and loop-depth summary of a function's instructions
#[derive(Debug, Clone, Default)]
pub struct UseTable {
    insts: Vec<InstRecord>,
    refs: HashMap<VReg, BTreeSet<InstRef>>,
}

impl UseTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an instruction and return its reference
    pub fn push_inst(&mut self, loop_depth: u32, reads: &[VReg], writes: &[VReg]) -> InstRef {
        let inst = InstRef(self.insts.len() as u32);
        for vreg in reads.iter().chain(writes) {
            self.refs.entry(*vreg).or_default().insert(inst);
        }
        self.insts.push(InstRecord {
            loop_depth,
            reads: reads.to_vec(),
            writes: writes.to_vec(),
        });
        inst
    }

    pub fn len(&self) -> usize {
        self.insts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.insts.is_empty()
    }
}

impl UseFrequency for UseTable {
    fn references(&self, vreg: VReg) -> Vec<InstRef> {
        self.refs
            .get(&vreg)
            .map(|s| s.iter().copied().collect())
            .unwrap_or_default()
    }

    fn loop_depth(&self, inst: InstRef) -> u32 {
        self.insts
            .get(inst.0 as usize)
            .map(|i| i.loop_depth)
            .unwrap_or(0)
    }

    fn reads_writes(&self, vreg: VReg, inst: InstRef) -> (bool, bool) {
        match self.insts.get(inst.0 as usize) {
            Some(i) => (i.reads.contains(&vreg), i.writes.contains(&vreg)),
            None => (false, false),
        }
    }
}
