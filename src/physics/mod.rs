use egui::Vec2;

use crate::config::ClusterOptions;
use crate::graph::DomainGraph;

/// Per-tick force contribution that pulls every node toward the live centroid
/// of its domain group. Registered with the external physics stepper, which
/// calls `apply` once per tick with its current cooling factor.
pub struct ClusterForce {
    strength: f32,
    centroids: Vec<Vec2>,
    counts: Vec<usize>,
}

impl ClusterForce {
    pub fn new(options: &ClusterOptions) -> Self {
        Self {
            strength: options.strength.max(0.0),
            centroids: Vec::new(),
            counts: Vec::new(),
        }
    }

    pub fn strength(&self) -> f32 {
        self.strength
    }

    /// Runtime-adjustable; 0 turns the force into a no-op, degrading to
    /// whatever the stepper's other forces produce.
    pub fn set_strength(&mut self, strength: f32) {
        self.strength = strength.max(0.0);
    }

    /// One tick. Centroids are recomputed from live positions every call;
    /// pinned nodes contribute to their group's centroid and still receive
    /// the velocity nudge (the stepper enforces the pin by overriding
    /// position, not by exempting velocity).
    pub fn apply(&mut self, alpha: f32, graph: &mut DomainGraph) {
        if self.strength <= 0.0 || graph.nodes.is_empty() {
            return;
        }

        let group_count = graph.groups.len();
        self.centroids.resize(group_count, Vec2::ZERO);
        self.centroids.fill(Vec2::ZERO);
        self.counts.resize(group_count, 0);
        self.counts.fill(0);

        for node in &graph.nodes {
            if node.group < group_count {
                self.centroids[node.group] += node.position;
                self.counts[node.group] += 1;
            }
        }
        for (centroid, &count) in self.centroids.iter_mut().zip(self.counts.iter()) {
            if count > 0 {
                *centroid /= count as f32;
            }
        }

        let pull = self.strength * alpha;
        for node in &mut graph.nodes {
            if node.group >= group_count || self.counts[node.group] == 0 {
                continue;
            }
            node.velocity += (self.centroids[node.group] - node.position) * pull;
        }
    }
}

#[cfg(test)]
mod tests {
    use egui::vec2;

    use crate::config::GroupingOptions;
    use crate::graph::build::build_domain_groups;
    use crate::tree::parse_navigation_tree;

    use super::*;

    fn sample_graph() -> DomainGraph {
        let tree = parse_navigation_tree(
            r#"{
                "a": {
                    "id": "a",
                    "url": "https://github.com",
                    "createdAt": 1000,
                    "children": [
                        { "id": "b", "url": "https://github.com/pulls", "createdAt": 2000 },
                        { "id": "c", "url": "https://stackoverflow.com/q", "createdAt": 3000 }
                    ]
                }
            }"#,
        )
        .unwrap();
        build_domain_groups(&tree, &GroupingOptions::default())
    }

    #[test]
    fn nodes_are_pulled_toward_their_group_centroid() {
        let mut graph = sample_graph();
        let a = graph.index_by_id["a"];
        let b = graph.index_by_id["b"];
        graph.nodes[a].position = vec2(0.0, 0.0);
        graph.nodes[b].position = vec2(10.0, 0.0);

        let mut force = ClusterForce::new(&ClusterOptions { strength: 0.5 });
        force.apply(1.0, &mut graph);

        // Group centroid is (5, 0); both members get equal and opposite pulls.
        assert_eq!(graph.nodes[a].velocity, vec2(2.5, 0.0));
        assert_eq!(graph.nodes[b].velocity, vec2(-2.5, 0.0));
    }

    #[test]
    fn alpha_scales_the_pull() {
        let mut graph = sample_graph();
        let a = graph.index_by_id["a"];
        let b = graph.index_by_id["b"];
        graph.nodes[a].position = vec2(0.0, 0.0);
        graph.nodes[b].position = vec2(10.0, 0.0);

        let mut force = ClusterForce::new(&ClusterOptions { strength: 0.5 });
        force.apply(0.1, &mut graph);
        assert!((graph.nodes[a].velocity.x - 0.25).abs() < 0.0001);
    }

    #[test]
    fn zero_strength_is_a_no_op() {
        let mut graph = sample_graph();
        let before = graph
            .nodes
            .iter()
            .map(|node| node.velocity)
            .collect::<Vec<_>>();

        let mut force = ClusterForce::new(&ClusterOptions { strength: 0.0 });
        force.apply(1.0, &mut graph);

        for (node, velocity) in graph.nodes.iter().zip(before.iter()) {
            assert_eq!(node.velocity, *velocity);
        }
    }

    #[test]
    fn pinned_nodes_still_count_and_still_receive_velocity() {
        let mut graph = sample_graph();
        let a = graph.index_by_id["a"];
        let b = graph.index_by_id["b"];
        graph.nodes[a].position = vec2(0.0, 0.0);
        graph.nodes[b].position = vec2(10.0, 0.0);
        graph.nodes[a].pinned = Some(vec2(0.0, 0.0));

        let mut force = ClusterForce::new(&ClusterOptions { strength: 0.5 });
        force.apply(1.0, &mut graph);

        // Centroid still reflects the pinned member, and the pinned member's
        // velocity is still written.
        assert_eq!(graph.nodes[a].velocity, vec2(2.5, 0.0));
        assert_eq!(graph.nodes[b].velocity, vec2(-2.5, 0.0));
    }

    #[test]
    fn scratch_buffers_survive_group_count_changes() {
        let mut force = ClusterForce::new(&ClusterOptions::default());

        let mut graph = sample_graph();
        force.apply(1.0, &mut graph);

        // Rebuilds may shrink or grow the group set; the same force instance
        // must keep working across them.
        let mut empty = DomainGraph::default();
        force.apply(1.0, &mut empty);
        force.apply(1.0, &mut graph);
    }
}
