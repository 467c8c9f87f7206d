use std::collections::HashMap;

use crate::config::ConnectionOptions;

use super::DomainGraph;

const MILLIS_PER_DAY: f64 = 86_400_000.0;
/// Recency decays linearly to zero over this window.
const RECENCY_WINDOW_DAYS: f64 = 30.0;

/// One observed parent→child navigation contributing to a Connection.
#[derive(Clone, Debug)]
pub struct ContributingEdge {
    pub parent_id: String,
    pub child_id: String,
    /// Child's `created_at`, unix milliseconds.
    pub timestamp: i64,
}

/// A directed, weighted edge between two domains. Parallel navigations
/// between the same pair accumulate into one Connection.
#[derive(Clone, Debug)]
pub struct Connection {
    pub source_domain: String,
    pub target_domain: String,
    pub contributing: Vec<ContributingEdge>,
    pub frequency: usize,
    /// Combined frequency/recency score, always in [0, 1].
    pub strength: f32,
    pub bidirectional: bool,
}

/// Descriptive classification of domains by their edge profile. Consumed by
/// optional UI highlighting only.
#[derive(Clone, Debug, Default)]
pub struct ConnectionPatterns {
    pub hubs: Vec<String>,
    pub sinks: Vec<String>,
    pub isolated: Vec<String>,
}

/// Derives the domain-level connection graph from parent→child links whose
/// endpoints both survived grouping. `now_ms` is passed in rather than read
/// from the system clock so recency scoring is deterministic.
pub fn build_connections(
    graph: &DomainGraph,
    options: &ConnectionOptions,
    now_ms: i64,
) -> Vec<Connection> {
    let mut accumulated: HashMap<(String, String), Vec<ContributingEdge>> = HashMap::new();

    for node in &graph.nodes {
        let Some(parent_id) = node.parent_id.as_deref() else {
            continue;
        };
        // Nodes filtered out by grouping leave dangling parent ids; those
        // edges are dropped here.
        let Some(parent) = graph.node(parent_id) else {
            continue;
        };

        if parent.domain == node.domain && !options.include_intra_domain {
            continue;
        }

        accumulated
            .entry((parent.domain.clone(), node.domain.clone()))
            .or_default()
            .push(ContributingEdge {
                parent_id: parent_id.to_owned(),
                child_id: node.id.clone(),
                timestamp: node.created_at,
            });
    }

    let mut connections = accumulated
        .iter()
        .map(|((source, target), contributing)| {
            let frequency = contributing.len();
            let strength = connection_strength(graph, source, contributing, options, now_ms);
            let bidirectional = accumulated.contains_key(&(target.clone(), source.clone()));

            Connection {
                source_domain: source.clone(),
                target_domain: target.clone(),
                contributing: contributing.clone(),
                frequency,
                strength,
                bidirectional,
            }
        })
        .filter(|connection| connection.strength >= options.min_connection_strength)
        .collect::<Vec<_>>();

    connections.sort_by(|a, b| {
        b.strength
            .total_cmp(&a.strength)
            .then_with(|| a.source_domain.cmp(&b.source_domain))
            .then_with(|| a.target_domain.cmp(&b.target_domain))
    });
    connections
}

fn connection_strength(
    graph: &DomainGraph,
    source_domain: &str,
    contributing: &[ContributingEdge],
    options: &ConnectionOptions,
    now_ms: i64,
) -> f32 {
    let mut strength = 0.0_f32;

    if options.weight_by_frequency {
        let source_size = graph
            .group(source_domain)
            .map(|group| group.stats.count)
            .unwrap_or(0)
            .max(1);
        let frequency_score = (contributing.len() as f32 / source_size as f32).min(1.0);
        strength += options.frequency_weight * frequency_score;
    }

    if options.weight_by_recency {
        let most_recent = contributing
            .iter()
            .map(|edge| edge.timestamp)
            .max()
            .unwrap_or(i64::MIN);
        let days_since = (now_ms.saturating_sub(most_recent)) as f64 / MILLIS_PER_DAY;
        let recency_score = (1.0 - (days_since / RECENCY_WINDOW_DAYS)).max(0.0) as f32;
        strength += options.recency_weight * recency_score;
    }

    strength.clamp(0.0, 1.0)
}

/// Classifies domains by edge profile: a hub sends markedly more outgoing
/// edges than the mean, a sink receives markedly more, and an isolated domain
/// has no edges at all.
pub fn analyze_connection_patterns(
    connections: &[Connection],
    graph: &DomainGraph,
) -> ConnectionPatterns {
    let mut outgoing: HashMap<&str, usize> = HashMap::new();
    let mut incoming: HashMap<&str, usize> = HashMap::new();
    for connection in connections {
        *outgoing.entry(connection.source_domain.as_str()).or_default() += 1;
        *incoming.entry(connection.target_domain.as_str()).or_default() += 1;
    }

    let domain_count = graph.groups.len().max(1);
    let mean_outgoing = connections.len() as f32 / domain_count as f32;
    let mean_incoming = mean_outgoing;

    let mut patterns = ConnectionPatterns::default();
    for group in &graph.groups {
        let out = outgoing.get(group.domain.as_str()).copied().unwrap_or(0);
        let inbound = incoming.get(group.domain.as_str()).copied().unwrap_or(0);

        if out == 0 && inbound == 0 {
            patterns.isolated.push(group.domain.clone());
            continue;
        }
        if out as f32 > mean_outgoing * 1.5 {
            patterns.hubs.push(group.domain.clone());
        }
        if inbound as f32 > mean_incoming * 1.5 {
            patterns.sinks.push(group.domain.clone());
        }
    }

    patterns
}
