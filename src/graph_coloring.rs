//! Graph Coloring Register Allocator (degree-ordered, randomized, extended colors)
//!
//! Assigns each value either a physical register or a spill decision using a
//! single greedy pass over the interference graph.
//!
//! ## Algorithm Overview
//!
//! 1. **Build**: Test every pair of live values for overlap and record edges
//! 2. **Weigh**: Spill weight = Σ (reads + writes) × 10^min(loop depth, 35)
//! 3. **Order**: Sort nodes by descending degree (most constrained first)
//! 4. **Select**: For each node, pick uniformly at random among the candidate
//!    registers no already-colored neighbor holds. If none is left, pick among
//!    the extended colors no neighbor holds, or create a new one.
//! 5. **Resolve**: Real colors become register assignments, extended colors
//!    become spills.
//!
//! There is no simplify/select stack, no coalescing and no iteration: every
//! node is colored exactly once. Infeasibility is deferred to extended colors
//! and handed to the spiller as data.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::{AllocatorConfig, BuildStrategy, ExhaustionPolicy};
use crate::error::AllocError;
use crate::provider::{CandidateLocations, LiveValues, UseFrequency};
use crate::types::{PhysReg, VReg};

/// Loop depths beyond this contribute the same weight as this depth
pub const MAX_LOOP_DEPTH: u32 = 35;

/// Color of a node after the selection pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// Index into the node's own sorted candidate list
    Real(usize),
    /// Strictly negative placeholder for a value that ran out of registers
    Extended(i32),
}

impl Color {
    pub fn is_extended(self) -> bool {
        matches!(self, Color::Extended(_))
    }
}

/// Final outcome for one value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Assign(PhysReg),
    Spill,
}

/// Result of one allocation round
#[derive(Debug, Clone)]
pub struct Allocation {
    /// Outcome for every value with a live range
    pub decisions: BTreeMap<VReg, Decision>,
    /// Advisory spill weights, for tie-breaking among spill candidates
    pub spill_weights: HashMap<VReg, f64>,
    /// Assigned values: candidate list rotated so the chosen register is first
    pub preferences: HashMap<VReg, Vec<PhysReg>>,
    /// Seed used for color selection this round
    pub seed: u64,
    /// Number of extended colors created
    pub extended_colors: usize,
}

impl Allocation {
    pub fn decision(&self, vreg: VReg) -> Option<Decision> {
        self.decisions.get(&vreg).copied()
    }

    pub fn assigned(&self, vreg: VReg) -> Option<PhysReg> {
        match self.decision(vreg)? {
            Decision::Assign(reg) => Some(reg),
            Decision::Spill => None,
        }
    }

    pub fn is_spilled(&self, vreg: VReg) -> bool {
        self.decision(vreg) == Some(Decision::Spill)
    }

    pub fn spill_weight(&self, vreg: VReg) -> f64 {
        self.spill_weights.get(&vreg).copied().unwrap_or(0.0)
    }

    pub fn assignments(&self) -> impl Iterator<Item = (VReg, PhysReg)> + '_ {
        self.decisions.iter().filter_map(|(&vreg, d)| match d {
            Decision::Assign(reg) => Some((vreg, *reg)),
            Decision::Spill => None,
        })
    }

    pub fn spilled(&self) -> impl Iterator<Item = VReg> + '_ {
        self.decisions
            .iter()
            .filter(|(_, d)| **d == Decision::Spill)
            .map(|(&vreg, _)| vreg)
    }

    /// Spilled values, cheapest first
    pub fn spill_candidates(&self) -> Vec<VReg> {
        let mut spilled: Vec<VReg> = self.spilled().collect();
        spilled.sort_by(|a, b| {
            self.spill_weight(*a)
                .total_cmp(&self.spill_weight(*b))
                .then(a.cmp(b))
        });
        spilled
    }
}

/// Interference graph for register allocation
#[derive(Debug, Default)]
pub struct InterferenceGraph {
    /// All virtual registers
    nodes: HashSet<VReg>,
    /// Adjacency sets: canonical (low, high) pairs
    adj_set: HashSet<(VReg, VReg)>,
    /// Adjacency lists for efficient iteration
    adj_list: HashMap<VReg, HashSet<VReg>>,
    /// Degree of each node
    degree: HashMap<VReg, usize>,
}

impl InterferenceGraph {
    fn new() -> Self {
        Self::default()
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.adj_set.clear();
        self.adj_list.clear();
        self.degree.clear();
    }

    /// Add a node to the graph
    fn add_node(&mut self, vreg: VReg) {
        if self.nodes.insert(vreg) {
            self.adj_list.entry(vreg).or_default();
            self.degree.entry(vreg).or_insert(0);
        }
    }

    /// Add an interference edge between two nodes
    fn add_edge(&mut self, u: VReg, v: VReg) {
        if u == v {
            return;
        }
        let (a, b) = if u < v { (u, v) } else { (v, u) };
        if self.adj_set.insert((a, b)) {
            self.adj_list.entry(u).or_default().insert(v);
            self.adj_list.entry(v).or_default().insert(u);
            *self.degree.entry(u).or_insert(0) += 1;
            *self.degree.entry(v).or_insert(0) += 1;
        }
    }

    pub fn contains(&self, vreg: VReg) -> bool {
        self.nodes.contains(&vreg)
    }

    /// Check if two nodes interfere
    pub fn interferes(&self, u: VReg, v: VReg) -> bool {
        let (a, b) = if u < v { (u, v) } else { (v, u) };
        self.adj_set.contains(&(a, b))
    }

    pub fn degree(&self, vreg: VReg) -> usize {
        self.degree.get(&vreg).copied().unwrap_or(0)
    }

    pub fn adjacent(&self, vreg: VReg) -> impl Iterator<Item = VReg> + '_ {
        self.adj_list
            .get(&vreg)
            .into_iter()
            .flat_map(|s| s.iter().copied())
    }

    /// Nodes in ascending order
    pub fn nodes(&self) -> Vec<VReg> {
        let mut nodes: Vec<VReg> = self.nodes.iter().copied().collect();
        nodes.sort_unstable();
        nodes
    }

    /// Edges as ascending `(low, high)` pairs
    pub fn edges(&self) -> Vec<(VReg, VReg)> {
        let mut edges: Vec<(VReg, VReg)> = self.adj_set.iter().copied().collect();
        edges.sort_unstable();
        edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adj_set.len()
    }
}

/// Scratch state of one allocation round.
///
/// Every map is cleared when a round starts, so one instance can be reused
/// across functions without leaking values between them.
pub struct AllocationRound {
    config: AllocatorConfig,
    /// The interference graph
    graph: InterferenceGraph,
    /// Spill weight of each value
    spill_weight: HashMap<VReg, f64>,
    /// Sorted, deduplicated candidate registers of each node
    candidates: HashMap<VReg, Vec<PhysReg>>,
    /// Color chosen for each node
    colors: HashMap<VReg, Color>,
    /// Extended colors created this round, most recent last
    extended_colors: Vec<i32>,
    /// Values an earlier decision already sent to memory
    pre_spilled: BTreeSet<VReg>,
    seed: u64,
    rng: SmallRng,
}

#[path = "graph_coloring/build.rs"]
mod build;

#[path = "graph_coloring/coloring.rs"]
mod coloring;

#[path = "graph_coloring/resolve.rs"]
mod resolve;

#[path = "graph_coloring/verify.rs"]
mod verify;

#[path = "graph_coloring/dump.rs"]
mod dump;

pub use build::spill_weight;
pub use dump::{ColoringDump, GraphDump};

impl AllocationRound {
    pub fn new(config: AllocatorConfig) -> Self {
        // Unseeded rounds draw their seed when they run
        let seed = config.seed.unwrap_or(0);
        Self {
            config,
            graph: InterferenceGraph::new(),
            spill_weight: HashMap::new(),
            candidates: HashMap::new(),
            colors: HashMap::new(),
            extended_colors: Vec::new(),
            pre_spilled: BTreeSet::new(),
            seed,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Exclude `vreg` from the next round; it is reported as spilled.
    pub fn mark_spilled(&mut self, vreg: VReg) {
        self.pre_spilled.insert(vreg);
    }

    pub fn graph(&self) -> &InterferenceGraph {
        &self.graph
    }

    pub fn color(&self, vreg: VReg) -> Option<Color> {
        self.colors.get(&vreg).copied()
    }

    pub fn spill_weight(&self, vreg: VReg) -> Option<f64> {
        self.spill_weight.get(&vreg).copied()
    }

    /// Sorted candidate registers of a graph node
    pub fn candidates(&self, vreg: VReg) -> &[PhysReg] {
        self.candidates.get(&vreg).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Extended colors created this round, in creation order
    pub fn extended_colors(&self) -> &[i32] {
        &self.extended_colors
    }

    /// Seed of the most recent run (the configured seed before any run)
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Register a real color resolves to for `vreg`
    pub fn resolved_reg(&self, vreg: VReg) -> Option<PhysReg> {
        match self.color(vreg)? {
            Color::Real(idx) => self.candidates(vreg).get(idx).copied(),
            Color::Extended(_) => None,
        }
    }

    /// Drop all per-round state
    fn clear(&mut self) {
        self.graph.clear();
        self.spill_weight.clear();
        self.candidates.clear();
        self.colors.clear();
        self.extended_colors.clear();
    }

    fn reseed(&mut self) {
        self.seed = self
            .config
            .seed
            .unwrap_or_else(|| rand::thread_rng().r#gen());
        self.rng = SmallRng::seed_from_u64(self.seed);
    }

    /// Run one full round: build, weigh, color, verify and resolve
    pub fn run<L, C, U>(
        &mut self,
        live: &L,
        locations: &C,
        freq: &U,
    ) -> Result<Allocation, AllocError>
    where
        L: LiveValues + ?Sized,
        C: CandidateLocations + ?Sized,
        U: UseFrequency + ?Sized,
    {
        let pre_spilled = std::mem::take(&mut self.pre_spilled);
        self.clear();
        self.reseed();
        log::debug!(
            "allocation round: seed {}, {} pre-spilled values",
            self.seed,
            pre_spilled.len()
        );

        // Build interference graph
        self.build(live, &pre_spilled);
        log::trace!("{}", self.dump_graph());

        // Compute spill costs
        self.compute_spill_costs(freq, &pre_spilled);

        // Fetch candidate registers, most constrained nodes first
        self.load_candidates(locations)?;
        let order = self.order_by_degree();

        // Assign colors
        self.biased_select(&order);
        log::debug!(
            "colored {} nodes, {} out of registers ({} extended colors)",
            self.colors.len(),
            self.colors.values().filter(|c| c.is_extended()).count(),
            self.extended_colors.len()
        );
        log::trace!("{}", self.dump_coloring());

        if self.config.verify {
            self.verify()?;
        }

        self.resolve(live, &pre_spilled)
    }
}

/// Convenience function to perform one allocation round
pub fn allocate<L, C, U>(
    live: &L,
    locations: &C,
    freq: &U,
    config: AllocatorConfig,
) -> Result<Allocation, AllocError>
where
    L: LiveValues + ?Sized,
    C: CandidateLocations + ?Sized,
    U: UseFrequency + ?Sized,
{
    AllocationRound::new(config).run(live, locations, freq)
}

impl fmt::Debug for AllocationRound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AllocationRound")
            .field("config", &self.config)
            .field("seed", &self.seed)
            .field("nodes", &self.graph.node_count())
            .field("edges", &self.graph.edge_count())
            .field("extended_colors", &self.extended_colors)
            .finish()
    }
}
