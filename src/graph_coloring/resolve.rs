use super::*;

impl AllocationRound {
    /// Turn colors into register assignments and spill decisions
    pub(super) fn resolve<L: LiveValues + ?Sized>(
        &self,
        live: &L,
        pre_spilled: &BTreeSet<VReg>,
    ) -> Result<Allocation, AllocError> {
        let mut decisions = BTreeMap::new();
        let mut preferences = HashMap::new();

        let mut colored: Vec<(VReg, Color)> = self.colors.iter().map(|(&v, &c)| (v, c)).collect();
        colored.sort_unstable_by_key(|(vreg, _)| *vreg);

        for (vreg, color) in colored {
            match color {
                Color::Real(idx) => {
                    let candidates = self.candidates(vreg);
                    let reg = candidates
                        .get(idx)
                        .copied()
                        .ok_or(AllocError::EmptyCandidates(vreg))?;
                    let mut order = candidates.to_vec();
                    order.rotate_left(idx);
                    preferences.insert(vreg, order);
                    decisions.insert(vreg, Decision::Assign(reg));
                }
                Color::Extended(_) => {
                    self.spill(live, vreg)?;
                    decisions.insert(vreg, Decision::Spill);
                }
            }
        }

        let live_values: BTreeSet<VReg> = live.live_values().into_iter().collect();
        for &vreg in pre_spilled {
            // Values with nothing live need no location at all
            if !live_values.contains(&vreg) || !live.has_live_range(vreg) {
                continue;
            }
            self.spill(live, vreg)?;
            decisions.insert(vreg, Decision::Spill);
        }

        Ok(Allocation {
            decisions,
            spill_weights: self.spill_weight.clone(),
            preferences,
            seed: self.seed,
            extended_colors: self.extended_colors.len(),
        })
    }

    fn spill<L: LiveValues + ?Sized>(&self, live: &L, vreg: VReg) -> Result<(), AllocError> {
        if !live.is_spillable(vreg) {
            return Err(AllocError::UnspillableSpilled(vreg));
        }
        log::debug!(
            "spilling {vreg} (weight {})",
            self.spill_weight(vreg).unwrap_or(0.0)
        );
        Ok(())
    }
}
