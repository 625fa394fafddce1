//! Human-readable dumps of the interference graph (not a stable format)

use super::*;

const RULE: &str = "-----------------------------------------------------------------";

/// `v<N> => <degree>: {<neighbors>}` per node
pub struct GraphDump<'a> {
    round: &'a AllocationRound,
}

/// Graph dump with the color chosen for each node
pub struct ColoringDump<'a> {
    round: &'a AllocationRound,
}

impl AllocationRound {
    pub fn dump_graph(&self) -> GraphDump<'_> {
        GraphDump { round: self }
    }

    pub fn dump_coloring(&self) -> ColoringDump<'_> {
        ColoringDump { round: self }
    }
}

fn write_node(f: &mut fmt::Formatter<'_>, graph: &InterferenceGraph, vreg: VReg) -> fmt::Result {
    let mut neighbors: Vec<VReg> = graph.adjacent(vreg).collect();
    neighbors.sort_unstable();
    write!(f, "Interferences of {vreg} => {}: {{", graph.degree(vreg))?;
    for n in neighbors {
        write!(f, "{n},")?;
    }
    write!(f, "}}")
}

impl fmt::Display for GraphDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let graph = &self.round.graph;
        writeln!(f, " Interference Graph:")?;
        writeln!(f, "{RULE}")?;
        for vreg in graph.nodes() {
            write_node(f, graph, vreg)?;
            writeln!(f)?;
        }
        write!(f, "{RULE}")
    }
}

impl fmt::Display for ColoringDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let round = self.round;
        writeln!(f, " Interference Graph (colored, seed {}):", round.seed)?;
        writeln!(f, "{RULE}")?;
        for vreg in round.graph.nodes() {
            write_node(f, &round.graph, vreg)?;
            match round.color(vreg) {
                Some(Color::Real(idx)) => match round.resolved_reg(vreg) {
                    Some(reg) => writeln!(f, " -- COLOR => {idx}::{reg}")?,
                    None => writeln!(f, " -- COLOR => {idx}::?")?,
                },
                Some(Color::Extended(c)) => writeln!(f, " -- EXTENDED COLOR => {c}")?,
                None => writeln!(f, " -- UNCOLORED")?,
            }
        }
        write!(f, "{RULE}")
    }
}
