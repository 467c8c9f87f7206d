use serde::Deserialize;

use crate::view::ViewMode;

/// URL → domain-key resolution options.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct DomainOptions {
    /// Strip one leading `www.` label from the hostname.
    pub remove_www: bool,
    /// Collapse `a.b.example.com` to `example.com` when the last label is in
    /// a fixed list of common TLDs (`com org net edu gov io co`). This is a
    /// heuristic, not a public-suffix-list lookup.
    pub group_subdomains: bool,
    /// Domain key used when a URL cannot be resolved.
    pub fallback: String,
}

impl Default for DomainOptions {
    fn default() -> Self {
        Self {
            remove_www: true,
            group_subdomains: false,
            fallback: "unknown".to_owned(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct GroupingOptions {
    pub domain: DomainOptions,
    /// Domain groups with fewer nodes than this are dropped after traversal.
    pub min_cluster_size: usize,
}

impl Default for GroupingOptions {
    fn default() -> Self {
        Self {
            domain: DomainOptions::default(),
            min_cluster_size: 1,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ConnectionOptions {
    /// Keep parent→child links whose endpoints share a domain.
    pub include_intra_domain: bool,
    pub weight_by_frequency: bool,
    pub weight_by_recency: bool,
    pub frequency_weight: f32,
    pub recency_weight: f32,
    /// Connections scoring below this are dropped from the output.
    pub min_connection_strength: f32,
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        Self {
            include_intra_domain: false,
            weight_by_frequency: true,
            weight_by_recency: true,
            frequency_weight: 0.6,
            recency_weight: 0.4,
            min_connection_strength: 0.1,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct BoundaryOptions {
    /// Outward offset from the hull, in world units.
    pub padding: f32,
    pub smoothing: bool,
    /// Cardinal-spline tension; 0 is loosest, 1 degenerates to straight edges.
    pub tension: f32,
    /// Curve samples emitted per hull segment when smoothing.
    pub samples_per_segment: usize,
}

impl Default for BoundaryOptions {
    fn default() -> Self {
        Self {
            padding: 25.0,
            smoothing: true,
            tension: 0.3,
            samples_per_segment: 8,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ClusterOptions {
    /// Magnitude of the centroid pull; 0 disables the force.
    pub strength: f32,
}

impl Default for ClusterOptions {
    fn default() -> Self {
        Self { strength: 0.1 }
    }
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ViewOptions {
    pub transition_duration_ms: u64,
    pub preserve_zoom: bool,
    pub preserve_selection: bool,
    pub default_mode: ViewMode,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            transition_duration_ms: 300,
            preserve_zoom: true,
            preserve_selection: true,
            default_mode: ViewMode::Hierarchy,
        }
    }
}

/// Aggregated configuration for the whole pipeline.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct TabGraphConfig {
    pub grouping: GroupingOptions,
    pub connections: ConnectionOptions,
    pub boundary: BoundaryOptions,
    pub cluster: ClusterOptions,
    pub view: ViewOptions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = TabGraphConfig::default();
        assert!(config.grouping.domain.remove_www);
        assert!(!config.grouping.domain.group_subdomains);
        assert_eq!(config.grouping.domain.fallback, "unknown");
        assert_eq!(config.grouping.min_cluster_size, 1);
        assert_eq!(config.connections.frequency_weight, 0.6);
        assert_eq!(config.connections.recency_weight, 0.4);
        assert_eq!(config.connections.min_connection_strength, 0.1);
        assert_eq!(config.boundary.padding, 25.0);
        assert_eq!(config.boundary.tension, 0.3);
        assert_eq!(config.cluster.strength, 0.1);
        assert_eq!(config.view.transition_duration_ms, 300);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let raw = r#"{ "padding": 10.0, "glow": true }"#;
        let parsed = serde_json::from_str::<BoundaryOptions>(raw);
        assert!(parsed.is_err());
    }

    #[test]
    fn partial_config_fills_defaults() {
        let raw = r#"{ "connections": { "minConnectionStrength": 0.25 } }"#;
        let config: TabGraphConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.connections.min_connection_strength, 0.25);
        assert!(config.connections.weight_by_frequency);
        assert_eq!(config.boundary.padding, 25.0);
    }
}
