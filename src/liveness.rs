//! Segmented live ranges
//!
//! A ready-made [`LiveValues`] implementation for callers whose liveness
//! analysis produces per-value lists of instruction-index segments.

use std::collections::BTreeMap;

use crate::provider::LiveValues;
use crate::types::VReg;

/// Half-open interval `[start, end)` of linearized instruction indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub start: u32,
    pub end: u32,
}

impl Segment {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Live range of one value: sorted, disjoint, non-adjacent segments
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiveRange {
    segments: Vec<Segment>,
}

impl LiveRange {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from arbitrary segments; empty ones are dropped and the rest merged.
    pub fn from_segments(segments: impl IntoIterator<Item = Segment>) -> Self {
        let mut range = Self::new();
        for seg in segments {
            range.add_segment(seg);
        }
        range
    }

    pub fn add_segment(&mut self, seg: Segment) {
        if seg.is_empty() {
            return;
        }
        let pos = self.segments.partition_point(|s| s.start < seg.start);
        self.segments.insert(pos, seg);

        let mut merged: Vec<Segment> = Vec::with_capacity(self.segments.len());
        for s in self.segments.drain(..) {
            match merged.last_mut() {
                Some(last) if s.start <= last.end => last.end = last.end.max(s.end),
                _ => merged.push(s),
            }
        }
        self.segments = merged;
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn start(&self) -> Option<u32> {
        self.segments.first().map(|s| s.start)
    }

    pub fn end(&self) -> Option<u32> {
        self.segments.last().map(|s| s.end)
    }

    /// Check if two ranges share any instruction index
    pub fn overlaps(&self, other: &LiveRange) -> bool {
        let (mut i, mut j) = (0, 0);
        while i < self.segments.len() && j < other.segments.len() {
            let a = self.segments[i];
            let b = other.segments[j];
            if a.start < b.end && b.start < a.end {
                return true;
            }
            if a.end <= b.end {
                i += 1;
            } else {
                j += 1;
            }
        }
        false
    }
}

#[derive(Debug, Clone)]
struct Entry {
    range: LiveRange,
    spillable: bool,
}

/// Live ranges for every value of a function
#[derive(Debug, Clone, Default)]
pub struct LiveRangeTable {
    entries: BTreeMap<VReg, Entry>,
}

impl LiveRangeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a spillable value
    pub fn insert(&mut self, vreg: VReg, range: LiveRange) {
        self.entries.insert(
            vreg,
            Entry {
                range,
                spillable: true,
            },
        );
    }

    /// Register a value that must end up in a register
    pub fn insert_unspillable(&mut self, vreg: VReg, range: LiveRange) {
        self.entries.insert(
            vreg,
            Entry {
                range,
                spillable: false,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl LiveValues for LiveRangeTable {
    fn live_values(&self) -> Vec<VReg> {
        self.entries.keys().copied().collect()
    }

    fn overlaps(&self, a: VReg, b: VReg) -> bool {
        match (self.entries.get(&a), self.entries.get(&b)) {
            (Some(x), Some(y)) => x.range.overlaps(&y.range),
            _ => false,
        }
    }

    fn is_spillable(&self, vreg: VReg) -> bool {
        self.entries.get(&vreg).is_none_or(|e| e.spillable)
    }

    fn has_live_range(&self, vreg: VReg) -> bool {
        self.entries.get(&vreg).is_some_and(|e| !e.range.is_empty())
    }

    fn extent(&self, vreg: VReg) -> Option<(u32, u32)> {
        let range = &self.entries.get(&vreg)?.range;
        Some((range.start()?, range.end()?))
    }
}
