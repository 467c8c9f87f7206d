use egui::{Vec2, vec2};

/// Graham scan. Pivot is the lowest point (smallest y, ties by smallest x);
/// remaining points are swept in polar-angle order (ties by distance,
/// ascending) and non-left turns are popped, so the result is the smallest
/// convex polygon containing the input, counter-clockwise.
pub(super) fn convex_hull(points: &[Vec2]) -> Vec<Vec2> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let mut pivot = points[0];
    for &point in &points[1..] {
        if point.y < pivot.y || (point.y == pivot.y && point.x < pivot.x) {
            pivot = point;
        }
    }

    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| {
        let angle_a = (a.y - pivot.y).atan2(a.x - pivot.x);
        let angle_b = (b.y - pivot.y).atan2(b.x - pivot.x);
        angle_a
            .partial_cmp(&angle_b)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| {
                let dist_a = (*a - pivot).length_sq();
                let dist_b = (*b - pivot).length_sq();
                dist_a.total_cmp(&dist_b)
            })
    });

    let mut hull: Vec<Vec2> = Vec::with_capacity(sorted.len());
    for point in sorted {
        while hull.len() >= 2 {
            let a = hull[hull.len() - 2];
            let b = hull[hull.len() - 1];
            let cross = (b.x - a.x) * (point.y - a.y) - (b.y - a.y) * (point.x - a.x);
            if cross <= 0.0 {
                hull.pop();
            } else {
                break;
            }
        }
        hull.push(point);
    }

    hull
}

/// Moves every vertex outward from the centroid by `padding` world units.
/// Returns the padded ring and the hull centroid. A vertex coincident with
/// the centroid is nudged along the x-axis instead.
pub(super) fn pad_outward(hull: &[Vec2], padding: f32) -> (Vec<Vec2>, Vec2) {
    let mut centroid = Vec2::ZERO;
    for &point in hull {
        centroid += point;
    }
    centroid /= hull.len().max(1) as f32;

    let padded = hull
        .iter()
        .map(|&point| {
            let delta = point - centroid;
            let distance = delta.length();
            if distance <= 0.0001 {
                centroid + vec2(padding, 0.0)
            } else {
                centroid + delta * ((distance + padding) / distance)
            }
        })
        .collect();

    (padded, centroid)
}
