//! Graph-coloring register allocation core
//!
//! This library assigns physical registers to the virtual registers produced
//! by instruction selection. Liveness, register classes and loop frequencies
//! are supplied by the surrounding compiler through the traits in
//! [`provider`]; the allocator answers with one [`Decision`] per value.
//!
//! Ready-made providers for segmented live ranges, register classes and
//! use/def tables are included for callers that do not have their own.

pub mod config;
pub mod error;
pub mod frequency;
pub mod graph_coloring;
pub mod liveness;
pub mod provider;
pub mod reg_class;
pub mod types;

pub use config::{AllocatorConfig, BuildStrategy, ExhaustionPolicy};
pub use error::AllocError;
pub use frequency::UseTable;
pub use graph_coloring::{
    Allocation, AllocationRound, Color, Decision, InterferenceGraph, MAX_LOOP_DEPTH, allocate,
    spill_weight,
};
pub use liveness::{LiveRange, LiveRangeTable, Segment};
pub use provider::{CandidateLocations, LiveValues, UseFrequency};
pub use reg_class::{RegClass, RegClassId, RegClassTable};
pub use types::{InstRef, PhysReg, VReg};
