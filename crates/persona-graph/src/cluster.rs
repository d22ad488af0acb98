//! Connected components as entity profiles.

use persona_core::EntityProfile;
use rustworkx_core::connectivity::connected_components;
use tracing::debug;

use crate::builder::ProfileGraph;

/// One profile per connected component, isolated vertices included.
///
/// Members keep vertex insertion order and profiles are ordered by their
/// first member's insertion, so output is stable for a given input.
#[must_use]
pub fn extract_profiles(graph: &ProfileGraph) -> Vec<EntityProfile> {
    let mut components: Vec<Vec<_>> = connected_components(&graph.graph)
        .into_iter()
        .map(|component| {
            let mut nodes: Vec<_> = component.into_iter().collect();
            nodes.sort_unstable();
            nodes
        })
        .collect();
    components.sort_unstable_by_key(|nodes| nodes.first().copied());

    let profiles: Vec<EntityProfile> = components
        .into_iter()
        .map(|nodes| EntityProfile::new(nodes.into_iter().map(|n| graph.graph[n].clone()).collect()))
        .collect();

    debug!(
        vertices = graph.vertex_count(),
        profiles = profiles.len(),
        singletons = profiles.iter().filter(|p| p.is_singleton()).count(),
        "profiles extracted"
    );
    profiles
}
