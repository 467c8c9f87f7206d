//! Core engine for visualizing a browser navigation tree as a
//! domain-clustered force graph.
//!
//! The pipeline takes the host's navigation tree (pages opened from other
//! pages), partitions it into domain groups with deterministic colors,
//! derives a weighted connection graph between domains, and supplies the two
//! pieces a renderer needs during simulation: a centroid-pull force for the
//! external physics stepper and padded, smoothed cluster outlines. The
//! [`view::ViewController`] owns which of the two presentations (hierarchy or
//! cluster) is live and carries camera/selection state across switches.
//!
//! Rendering, persistence and the physics stepper itself are external
//! collaborators; this crate never draws and never reads a clock on its own.

pub mod boundary;
pub mod config;
pub mod domain;
pub mod error;
pub mod graph;
pub mod physics;
pub mod tree;
pub mod util;
pub mod view;

pub use boundary::{BoundaryPolygon, create_boundaries, create_boundary};
pub use config::TabGraphConfig;
pub use domain::{deterministic_color, resolve_domain};
pub use error::{Error, Result};
pub use graph::build::build_domain_groups;
pub use graph::connections::{analyze_connection_patterns, build_connections};
pub use graph::{DomainGraph, DomainGroup, EnhancedNode};
pub use physics::ClusterForce;
pub use tree::{NavigationNode, NavigationTree, parse_navigation_tree};
pub use view::{Presentation, PresentationFactory, ViewController, ViewEvent, ViewMode};
