use egui::{Vec2, vec2};

use crate::config::BoundaryOptions;
use crate::graph::DomainGraph;

mod hull;
mod smooth;

use hull::{convex_hull, pad_outward};
use smooth::cardinal_loop;

/// Vertex count of the circle approximation synthesized for a single node.
const CIRCLE_SEGMENTS: usize = 12;

/// A padded, smoothed closed outline around one domain's nodes. Purely
/// derived from current positions; recomputed every simulation tick while
/// boundaries are visible.
#[derive(Clone, Debug)]
pub struct BoundaryPolygon {
    pub domain: String,
    /// Closed ring in drawing order; the first point is not repeated.
    pub points: Vec<Vec2>,
    /// Ring centroid, for label placement by the rendering layer.
    pub centroid: Vec2,
}

/// Builds the outline for one domain from its current member positions.
/// Degenerate inputs never error: an empty set yields `None`, a single point
/// a synthesized circle.
pub fn create_boundary(
    domain: &str,
    positions: &[Vec2],
    options: &BoundaryOptions,
) -> Option<BoundaryPolygon> {
    match positions {
        [] => None,
        &[center] => Some(circle_boundary(domain, center, options.padding)),
        _ => {
            let hull = convex_hull(positions);
            let ring = match hull.as_slice() {
                &[a, b] => two_point_ring(a, b, options.padding),
                _ => pad_outward(&hull, options.padding).0,
            };

            let points = if options.smoothing {
                cardinal_loop(&ring, options.tension, options.samples_per_segment)
            } else {
                ring
            };

            let centroid = ring_centroid(&points);
            Some(BoundaryPolygon {
                domain: domain.to_owned(),
                points,
                centroid,
            })
        }
    }
}

/// Outlines for every non-empty domain group, in group order.
pub fn create_boundaries(graph: &DomainGraph, options: &BoundaryOptions) -> Vec<BoundaryPolygon> {
    graph
        .groups
        .iter()
        .filter_map(|group| {
            let positions = graph.member_positions(group);
            create_boundary(&group.domain, &positions, options)
        })
        .collect()
}

fn circle_boundary(domain: &str, center: Vec2, radius: f32) -> BoundaryPolygon {
    let points = (0..CIRCLE_SEGMENTS)
        .map(|segment| {
            let angle = (segment as f32 / CIRCLE_SEGMENTS as f32) * std::f32::consts::TAU;
            center + vec2(angle.cos(), angle.sin()) * radius
        })
        .collect();

    BoundaryPolygon {
        domain: domain.to_owned(),
        points,
        centroid: center,
    }
}

/// Two nodes leave the hull as a bare segment. Pad it into a rhombus so the
/// outline is a real ring the spline can close around.
fn two_point_ring(a: Vec2, b: Vec2, padding: f32) -> Vec<Vec2> {
    let midpoint = (a + b) / 2.0;
    let delta = b - a;
    let length = delta.length();
    let axis = if length > 0.0001 {
        delta / length
    } else {
        vec2(1.0, 0.0)
    };
    let perpendicular = vec2(-axis.y, axis.x);

    vec![
        a - axis * padding,
        midpoint - perpendicular * padding,
        b + axis * padding,
        midpoint + perpendicular * padding,
    ]
}

fn ring_centroid(points: &[Vec2]) -> Vec2 {
    let mut centroid = Vec2::ZERO;
    for &point in points {
        centroid += point;
    }
    centroid / points.len().max(1) as f32
}
