//! Flattening of a solved path into per-segment-type AS entry lists.

use crate::segment::{AsEntry, PathSegment, SegType};
use serde::{Deserialize, Serialize};

/// How a segment is used by the solved path
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Index of the first AS entry used; earlier entries are cut off
    #[serde(default)]
    pub shortcut: usize,
    /// Hop entry index of the peering hop, if the path peers out of this segment.
    /// Index 0 is the regular hop, so `Some(0)` means no peering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peer: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionEdge {
    pub segment: PathSegment,
    #[serde(default)]
    pub edge: Edge,
}

/// A path as produced by the path solver: segments in traversal order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathSolution {
    pub edges: Vec<SolutionEdge>,
}

impl PathSolution {
    pub fn new(edges: Vec<SolutionEdge>) -> Self {
        Self { edges }
    }

    pub fn push(&mut self, segment: PathSegment, edge: Edge) {
        self.edges.push(SolutionEdge { segment, edge });
    }
}

/// AS entries of a solved path, grouped by segment type.
///
/// Each list holds the entries of its segment from the last entry down to the
/// shortcut index, so index 0 is the far end of the segment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AsEntryList<'a> {
    pub ups: Vec<&'a AsEntry>,
    pub cores: Vec<&'a AsEntry>,
    pub downs: Vec<&'a AsEntry>,
    pub up_peer: Option<usize>,
    pub down_peer: Option<usize>,
}

impl<'a> AsEntryList<'a> {
    pub fn gather(solution: &'a PathSolution) -> Self {
        let mut res = AsEntryList::default();
        for sol_edge in &solution.edges {
            let entries = &sol_edge.segment.as_entries;
            let shortcut = sol_edge.edge.shortcut.min(entries.len());
            let target = match sol_edge.segment.seg_type {
                SegType::Up => &mut res.ups,
                SegType::Core => &mut res.cores,
                SegType::Down => &mut res.downs,
            };
            target.extend(entries[shortcut..].iter().rev());

            if let Some(peer) = sol_edge.edge.peer.filter(|&p| p > 0) {
                match sol_edge.segment.seg_type {
                    SegType::Up => res.up_peer = Some(peer),
                    SegType::Down => res.down_peer = Some(peer),
                    SegType::Core => {}
                }
            }
        }
        res
    }

    pub fn is_empty(&self) -> bool {
        self.ups.is_empty() && self.cores.is_empty() && self.downs.is_empty()
    }
}
