use std::collections::HashMap;

use egui::Vec2;

pub mod build;
pub mod connections;

/// A navigation node enriched with derived metadata and simulation state.
/// Lives in the `DomainGraph` arena and is addressed by index; positions and
/// velocities are only ever mutated through the arena.
#[derive(Clone, Debug)]
pub struct EnhancedNode {
    pub id: String,
    pub url: String,
    pub title: String,
    pub created_at: i64,
    pub parent_id: Option<String>,
    pub depth: usize,
    pub domain: String,
    pub color: String,
    pub group: usize,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Set while the user drags the node. The external stepper overrides the
    /// position from this; forces still write velocity as usual.
    pub pinned: Option<Vec2>,
}

#[derive(Clone, Copy, Debug)]
pub struct GroupStats {
    pub count: usize,
    pub earliest_visit: i64,
    pub latest_visit: i64,
}

#[derive(Clone, Debug)]
pub struct DomainGroup {
    pub domain: String,
    pub color: String,
    /// Arena indices of member nodes, in traversal order.
    pub members: Vec<usize>,
    pub stats: GroupStats,
}

/// Output of one Graph Builder run. Rebuilt wholesale on every pipeline run;
/// nothing is patched incrementally.
#[derive(Clone, Debug, Default)]
pub struct DomainGraph {
    pub nodes: Vec<EnhancedNode>,
    pub groups: Vec<DomainGroup>,
    pub group_by_domain: HashMap<String, usize>,
    pub index_by_id: HashMap<String, usize>,
}

impl DomainGraph {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn group(&self, domain: &str) -> Option<&DomainGroup> {
        self.group_by_domain
            .get(domain)
            .map(|&index| &self.groups[index])
    }

    pub fn node(&self, id: &str) -> Option<&EnhancedNode> {
        self.index_by_id.get(id).map(|&index| &self.nodes[index])
    }

    /// Current member positions of one group, for boundary computation.
    pub fn member_positions(&self, group: &DomainGroup) -> Vec<Vec2> {
        group
            .members
            .iter()
            .filter_map(|&index| self.nodes.get(index))
            .map(|node| node.position)
            .collect()
    }
}
