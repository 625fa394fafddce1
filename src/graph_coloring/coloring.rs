use super::*;

impl AllocationRound {
    /// Nodes by descending degree; equal degrees in ascending vreg order
    pub(super) fn order_by_degree(&self) -> Vec<VReg> {
        let mut order = self.graph.nodes();
        order.sort_by_key(|&v| (std::cmp::Reverse(self.graph.degree(v)), v));
        order
    }

    /// Color every node once, in the given order
    pub(super) fn biased_select(&mut self, order: &[VReg]) {
        for &vreg in order {
            let color = self.select_color(vreg);
            log::trace!("{vreg} (degree {}) -> {color:?}", self.graph.degree(vreg));
            self.colors.insert(vreg, color);
        }
    }

    pub(super) fn select_color(&mut self, vreg: VReg) -> Color {
        // Only neighbors colored earlier in the pass constrain this node
        let mut used_regs: HashSet<PhysReg> = HashSet::new();
        let mut used_extended: HashSet<i32> = HashSet::new();
        for neighbor in self.graph.adjacent(vreg) {
            match self.colors.get(&neighbor) {
                Some(Color::Real(_)) => {
                    if let Some(reg) = self.resolved_reg(neighbor) {
                        used_regs.insert(reg);
                    }
                }
                Some(Color::Extended(c)) => {
                    used_extended.insert(*c);
                }
                None => {}
            }
        }

        let available: Vec<usize> = self
            .candidates(vreg)
            .iter()
            .enumerate()
            .filter(|(_, reg)| !used_regs.contains(*reg))
            .map(|(idx, _)| idx)
            .collect();
        if let Some(idx) = self.pick(&available) {
            return Color::Real(idx);
        }

        if self.config.exhaustion == ExhaustionPolicy::Extend {
            let available: Vec<i32> = self
                .extended_colors
                .iter()
                .copied()
                .filter(|c| !used_extended.contains(c))
                .collect();
            if let Some(color) = self.pick(&available) {
                return Color::Extended(color);
            }
        }

        Color::Extended(self.new_extended_color())
    }

    /// Uniformly random element of `choices`
    pub(super) fn pick<T: Copy>(&mut self, choices: &[T]) -> Option<T> {
        if choices.is_empty() {
            return None;
        }
        Some(choices[self.rng.gen_range(0..choices.len())])
    }

    /// Create an extended color one below the lowest created so far
    pub(super) fn new_extended_color(&mut self) -> i32 {
        let color = self.extended_colors.last().map_or(-1, |&last| last - 1);
        self.extended_colors.push(color);
        log::debug!("created extended color {color}");
        color
    }
}
