use super::*;

/// Spill weight of `vreg`: every referencing instruction contributes
/// `(reads + writes) * 10^depth`, with depth capped at [`MAX_LOOP_DEPTH`].
pub fn spill_weight<U: UseFrequency + ?Sized>(freq: &U, vreg: VReg) -> f64 {
    freq.references(vreg)
        .into_iter()
        .map(|inst| {
            let depth = freq.loop_depth(inst).min(MAX_LOOP_DEPTH);
            let (reads, writes) = freq.reads_writes(vreg, inst);
            let accesses = u8::from(reads) + u8::from(writes);
            f64::from(accesses) * 10.0_f64.powi(depth as i32)
        })
        .sum()
}

impl AllocationRound {
    /// Build the interference graph from pairwise overlap queries
    pub(super) fn build<L: LiveValues + ?Sized>(&mut self, live: &L, pre_spilled: &BTreeSet<VReg>) {
        let mut values: Vec<VReg> = live
            .live_values()
            .into_iter()
            .filter(|v| live.has_live_range(*v) && !pre_spilled.contains(v))
            .collect();
        values.sort_unstable();
        values.dedup();

        for &vreg in &values {
            self.graph.add_node(vreg);
        }

        match self.config.build_strategy {
            BuildStrategy::Pairwise => self.build_pairwise(live, &values),
            BuildStrategy::SweepLine => {
                let extents: Option<Vec<(VReg, u32, u32)>> = values
                    .iter()
                    .map(|&v| live.extent(v).map(|(start, end)| (v, start, end)))
                    .collect();
                match extents {
                    Some(extents) => self.build_sweep(live, extents),
                    None => {
                        log::debug!("missing live range extents, building pairwise");
                        self.build_pairwise(live, &values);
                    }
                }
            }
        }

        log::debug!(
            "interference graph: {} nodes, {} edges",
            self.graph.node_count(),
            self.graph.edge_count()
        );
    }

    pub(super) fn build_pairwise<L: LiveValues + ?Sized>(&mut self, live: &L, values: &[VReg]) {
        for i in 0..values.len() {
            for j in (i + 1)..values.len() {
                if live.overlaps(values[i], values[j]) {
                    self.graph.add_edge(values[i], values[j]);
                }
            }
        }
    }

    /// Only test pairs whose `[start, end)` hulls intersect
    pub(super) fn build_sweep<L: LiveValues + ?Sized>(
        &mut self,
        live: &L,
        mut extents: Vec<(VReg, u32, u32)>,
    ) {
        extents.sort_by_key(|&(vreg, start, _)| (start, vreg));

        let mut active: Vec<(VReg, u32)> = Vec::new();
        for (vreg, start, end) in extents {
            active.retain(|&(_, active_end)| active_end > start);
            for &(other, _) in &active {
                if live.overlaps(other, vreg) {
                    self.graph.add_edge(other, vreg);
                }
            }
            active.push((vreg, end));
        }
    }

    /// Compute spill weights for every node and every pre-spilled value
    pub(super) fn compute_spill_costs<U: UseFrequency + ?Sized>(
        &mut self,
        freq: &U,
        pre_spilled: &BTreeSet<VReg>,
    ) {
        for vreg in self.graph.nodes().into_iter().chain(pre_spilled.iter().copied()) {
            self.spill_weight.insert(vreg, spill_weight(freq, vreg));
        }
    }

    /// Fetch, sort and deduplicate each node's candidate registers
    pub(super) fn load_candidates<C: CandidateLocations + ?Sized>(
        &mut self,
        locations: &C,
    ) -> Result<(), AllocError> {
        for vreg in self.graph.nodes() {
            let mut regs = locations.candidate_locations(vreg);
            regs.sort_unstable();
            regs.dedup();
            if regs.is_empty() {
                return Err(AllocError::EmptyCandidates(vreg));
            }
            self.candidates.insert(vreg, regs);
        }
        Ok(())
    }
}
