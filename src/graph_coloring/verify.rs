use super::*;

impl AllocationRound {
    /// Check graph symmetry, degrees and that no edge joins two equal registers.
    ///
    /// Extended colors are exempt: adjacent nodes may share one.
    pub fn verify(&self) -> Result<(), AllocError> {
        self.verify_graph()?;
        self.verify_coloring()
    }

    pub(super) fn verify_graph(&self) -> Result<(), AllocError> {
        for vreg in self.graph.nodes() {
            let mut neighbors = 0;
            for neighbor in self.graph.adjacent(vreg) {
                if neighbor == vreg {
                    return Err(AllocError::SelfEdge(vreg));
                }
                let reverse = self
                    .graph
                    .adj_list
                    .get(&neighbor)
                    .is_some_and(|s| s.contains(&vreg));
                if !reverse {
                    return Err(AllocError::AsymmetricEdge {
                        from: vreg,
                        to: neighbor,
                    });
                }
                neighbors += 1;
            }
            let degree = self.graph.degree(vreg);
            if degree != neighbors {
                return Err(AllocError::DegreeMismatch {
                    vreg,
                    degree,
                    neighbors,
                });
            }
        }
        Ok(())
    }

    pub(super) fn verify_coloring(&self) -> Result<(), AllocError> {
        for (a, b) in self.graph.edges() {
            if let (Some(ra), Some(rb)) = (self.resolved_reg(a), self.resolved_reg(b)) {
                if ra == rb {
                    return Err(AllocError::ConflictingColors { a, b, reg: ra });
                }
            }
        }
        Ok(())
    }
}
