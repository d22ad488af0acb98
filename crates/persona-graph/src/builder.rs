//! Undirected record graph built from classifier verdicts.

use std::collections::{HashMap, HashSet};

use persona_core::{CandidatePair, Verdict};
use rustworkx_core::petgraph::graph::{NodeIndex, UnGraph};
use tracing::debug;

use crate::error::GraphError;

/// One vertex per record id, one edge per distinct positive pair.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: UnGraph<String, ()>,
    id_to_index: HashMap<String, NodeIndex>,
    edges: HashSet<(NodeIndex, NodeIndex)>,
}

impl GraphBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a record id; repeated ids map to the same vertex.
    pub fn add_vertex(&mut self, id: &str) -> NodeIndex {
        if let Some(&index) = self.id_to_index.get(id) {
            return index;
        }
        let index = self.graph.add_node(id.to_string());
        self.id_to_index.insert(id.to_string(), index);
        index
    }

    pub fn add_vertices<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for id in ids {
            self.add_vertex(id.as_ref());
        }
    }

    /// Connect two ids, registering either if unseen. Returns `false` for a
    /// self-loop or an unordered pair that is already connected.
    pub fn add_edge(&mut self, left: &str, right: &str) -> bool {
        let a = self.add_vertex(left);
        let b = self.add_vertex(right);
        if a == b {
            return false;
        }
        let key = if a < b { (a, b) } else { (b, a) };
        if !self.edges.insert(key) {
            return false;
        }
        self.graph.add_edge(a, b, ());
        true
    }

    /// Add an edge for every positive verdict. Returns the number of new edges.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::LengthMismatch`] when the slices differ in length.
    pub fn add_verdicts(
        &mut self,
        pairs: &[CandidatePair],
        verdicts: &[Verdict],
    ) -> Result<usize, GraphError> {
        if pairs.len() != verdicts.len() {
            return Err(GraphError::LengthMismatch {
                pairs: pairs.len(),
                verdicts: verdicts.len(),
            });
        }

        let added = pairs
            .iter()
            .zip(verdicts)
            .filter(|(_, verdict)| verdict.same_person)
            .filter(|(pair, _)| self.add_edge(&pair.left_id, &pair.right_id))
            .count();
        debug!(pairs = pairs.len(), edges = added, "verdicts added to graph");
        Ok(added)
    }

    #[must_use]
    pub fn build(self) -> ProfileGraph {
        ProfileGraph { graph: self.graph }
    }
}

/// Finished record graph, ready for component extraction.
#[derive(Debug)]
pub struct ProfileGraph {
    pub(crate) graph: UnGraph<String, ()>,
}

impl ProfileGraph {
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn pair(left: &str, right: &str) -> CandidatePair {
        CandidatePair {
            left: 0,
            right: 1,
            left_id: left.into(),
            right_id: right.into(),
            features: Vec::new(),
            same_person: None,
        }
    }

    #[test]
    fn vertices_are_registered_once() {
        let mut builder = GraphBuilder::new();
        builder.add_vertices(["r1", "r2", "r1"]);
        assert_eq!(builder.build().vertex_count(), 2);
    }

    #[test]
    fn reversed_duplicate_edges_are_ignored() {
        let mut builder = GraphBuilder::new();
        assert!(builder.add_edge("r1", "r2"));
        assert!(!builder.add_edge("r2", "r1"));
        assert!(!builder.add_edge("r1", "r1"));
        assert_eq!(builder.build().edge_count(), 1);
    }

    #[test]
    fn only_positive_verdicts_become_edges() {
        let mut builder = GraphBuilder::new();
        builder.add_vertices(["r1", "r2", "r3"]);
        let added = builder
            .add_verdicts(
                &[pair("r1", "r2"), pair("r2", "r3")],
                &[Verdict::positive(0.9), Verdict::negative(0.2)],
            )
            .unwrap();

        assert_eq!(added, 1);
        let graph = builder.build();
        assert_eq!((graph.vertex_count(), graph.edge_count()), (3, 1));
    }

    #[test]
    fn verdict_count_must_match_pairs() {
        let mut builder = GraphBuilder::new();
        assert!(matches!(
            builder.add_verdicts(&[pair("r1", "r2")], &[]),
            Err(GraphError::LengthMismatch {
                pairs: 1,
                verdicts: 0
            })
        ));
    }
}
