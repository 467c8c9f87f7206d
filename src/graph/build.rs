use std::collections::HashMap;

use egui::vec2;

use crate::config::GroupingOptions;
use crate::domain::{deterministic_color, resolve_domain};
use crate::tree::{NavigationNode, NavigationTree};
use crate::util::stable_pair;

use super::{DomainGraph, DomainGroup, EnhancedNode, GroupStats};

/// Radius of the deterministic seed scatter for fresh node positions.
const SEED_RADIUS: f32 = 160.0;

/// Partitions the navigation tree into domain groups. One depth-first pass
/// over every root; group order is first-encounter order, member order is
/// traversal order. A second pass applies `min_cluster_size`.
pub fn build_domain_groups(tree: &NavigationTree, options: &GroupingOptions) -> DomainGraph {
    let mut graph = DomainGraph::default();

    for root in tree.values() {
        visit(root, None, 0, options, &mut graph);
    }

    if options.min_cluster_size > 1 {
        graph = filter_small_groups(graph, options.min_cluster_size);
    }

    graph
}

fn visit(
    node: &NavigationNode,
    parent_id: Option<&str>,
    depth: usize,
    options: &GroupingOptions,
    graph: &mut DomainGraph,
) {
    if node.id.is_empty() || node.url.is_empty() {
        log::warn!(
            "skipping malformed navigation node (id={:?}); traversal continues",
            node.id
        );
        for child in &node.children {
            visit(child, parent_id, depth + 1, options, graph);
        }
        return;
    }

    let domain = resolve_domain(&node.url, &options.domain);
    let group_index = match graph.group_by_domain.get(&domain) {
        Some(&index) => index,
        None => {
            let index = graph.groups.len();
            graph.groups.push(DomainGroup {
                domain: domain.clone(),
                color: deterministic_color(&domain),
                members: Vec::new(),
                stats: GroupStats {
                    count: 0,
                    earliest_visit: i64::MAX,
                    latest_visit: i64::MIN,
                },
            });
            graph.group_by_domain.insert(domain.clone(), index);
            index
        }
    };

    let node_index = graph.nodes.len();
    let (jx, jy) = stable_pair(&node.id);
    let color = graph.groups[group_index].color.clone();

    graph.nodes.push(EnhancedNode {
        id: node.id.clone(),
        url: node.url.clone(),
        title: node.title.clone(),
        created_at: node.created_at,
        parent_id: parent_id.map(str::to_owned),
        depth,
        domain,
        color,
        group: group_index,
        position: vec2(jx, jy) * SEED_RADIUS,
        velocity: egui::Vec2::ZERO,
        pinned: None,
    });
    graph.index_by_id.insert(node.id.clone(), node_index);

    let group = &mut graph.groups[group_index];
    group.members.push(node_index);
    group.stats.count += 1;
    group.stats.earliest_visit = group.stats.earliest_visit.min(node.created_at);
    group.stats.latest_visit = group.stats.latest_visit.max(node.created_at);

    for child in &node.children {
        visit(child, Some(&node.id), depth + 1, options, graph);
    }
}

/// Drops groups below the size threshold and rebuilds the arena so surviving
/// indices stay dense. Edges dangling from removed nodes are not repaired
/// here; the Connection Mapper only considers surviving nodes.
fn filter_small_groups(graph: DomainGraph, min_cluster_size: usize) -> DomainGraph {
    let survivors = graph
        .groups
        .iter()
        .enumerate()
        .filter(|(_, group)| group.stats.count >= min_cluster_size)
        .map(|(index, _)| index)
        .collect::<Vec<_>>();

    if survivors.len() == graph.groups.len() {
        return graph;
    }

    let mut group_remap = HashMap::with_capacity(survivors.len());
    for (new_index, &old_index) in survivors.iter().enumerate() {
        group_remap.insert(old_index, new_index);
    }

    let mut filtered = DomainGraph::default();
    for &old_index in &survivors {
        let group = &graph.groups[old_index];
        filtered
            .group_by_domain
            .insert(group.domain.clone(), filtered.groups.len());
        filtered.groups.push(DomainGroup {
            domain: group.domain.clone(),
            color: group.color.clone(),
            members: Vec::new(),
            stats: group.stats,
        });
    }

    for node in graph.nodes {
        let Some(&new_group) = group_remap.get(&node.group) else {
            continue;
        };

        let node_index = filtered.nodes.len();
        filtered.index_by_id.insert(node.id.clone(), node_index);
        filtered.groups[new_group].members.push(node_index);
        filtered.nodes.push(EnhancedNode {
            group: new_group,
            ..node
        });
    }

    filtered
}
