//! Register classes
//!
//! Maps each value to a class of physical registers. The candidate list of a
//! value is its class's registers in class order, minus the reserved ones.

use std::collections::{HashMap, HashSet};

use crate::provider::CandidateLocations;
use crate::types::{PhysReg, VReg};

/// Register class identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegClassId(pub u32);

/// A named, ordered set of interchangeable physical registers
#[derive(Debug, Clone)]
pub struct RegClass {
    pub name: String,
    pub regs: Vec<PhysReg>,
}

impl RegClass {
    pub fn new(name: impl Into<String>, regs: impl IntoIterator<Item = PhysReg>) -> Self {
        Self {
            name: name.into(),
            regs: regs.into_iter().collect(),
        }
    }
}

/// Class assignment for every value of a function
#[derive(Debug, Clone, Default)]
pub struct RegClassTable {
    classes: Vec<RegClass>,
    class_of: HashMap<VReg, RegClassId>,
    reserved: HashSet<PhysReg>,
}

impl RegClassTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_class(&mut self, class: RegClass) -> RegClassId {
        let id = RegClassId(self.classes.len() as u32);
        self.classes.push(class);
        id
    }

    pub fn class(&self, id: RegClassId) -> Option<&RegClass> {
        self.classes.get(id.0 as usize)
    }

    pub fn set_class(&mut self, vreg: VReg, class: RegClassId) {
        self.class_of.insert(vreg, class);
    }

    pub fn class_of(&self, vreg: VReg) -> Option<RegClassId> {
        self.class_of.get(&vreg).copied()
    }

    /// Exclude `reg` from every candidate list (stack pointer, frame pointer, ...)
    pub fn reserve(&mut self, reg: PhysReg) {
        self.reserved.insert(reg);
    }

    pub fn is_reserved(&self, reg: PhysReg) -> bool {
        self.reserved.contains(&reg)
    }
}

impl CandidateLocations for RegClassTable {
    fn candidate_locations(&self, vreg: VReg) -> Vec<PhysReg> {
        let Some(class) = self.class_of(vreg).and_then(|id| self.class(id)) else {
            return Vec::new();
        };
        class
            .regs
            .iter()
            .copied()
            .filter(|reg| !self.is_reserved(*reg))
            .collect()
    }
}
