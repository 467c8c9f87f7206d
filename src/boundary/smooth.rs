use egui::Vec2;

/// Samples a closed cardinal spline through `ring`. Tangents are scaled by
/// `1 - tension`, so tension 1 collapses back to the straight-edge polygon.
/// Emits `samples_per_segment` points per segment; the ring stays closed
/// implicitly (first point is not repeated at the end).
pub(super) fn cardinal_loop(ring: &[Vec2], tension: f32, samples_per_segment: usize) -> Vec<Vec2> {
    let n = ring.len();
    if n < 3 || samples_per_segment == 0 {
        return ring.to_vec();
    }

    let scale = (1.0 - tension.clamp(0.0, 1.0)) * 0.5;
    let tangent = |index: usize| -> Vec2 {
        let previous = ring[(index + n - 1) % n];
        let next = ring[(index + 1) % n];
        (next - previous) * scale
    };

    let mut curve = Vec::with_capacity(n * samples_per_segment);
    for i in 0..n {
        let p0 = ring[i];
        let p1 = ring[(i + 1) % n];
        let m0 = tangent(i);
        let m1 = tangent((i + 1) % n);

        for step in 0..samples_per_segment {
            let s = step as f32 / samples_per_segment as f32;
            let s2 = s * s;
            let s3 = s2 * s;

            let h00 = (2.0 * s3) - (3.0 * s2) + 1.0;
            let h10 = s3 - (2.0 * s2) + s;
            let h01 = (-2.0 * s3) + (3.0 * s2);
            let h11 = s3 - s2;

            curve.push((p0 * h00) + (m0 * h10) + (p1 * h01) + (m1 * h11));
        }
    }

    curve
}

#[cfg(test)]
mod tests {
    use egui::vec2;

    use super::*;

    fn square() -> Vec<Vec2> {
        vec![
            vec2(0.0, 0.0),
            vec2(10.0, 0.0),
            vec2(10.0, 10.0),
            vec2(0.0, 10.0),
        ]
    }

    #[test]
    fn curve_passes_through_control_points() {
        let ring = square();
        let curve = cardinal_loop(&ring, 0.3, 8);

        assert_eq!(curve.len(), ring.len() * 8);
        for (i, control) in ring.iter().enumerate() {
            let sample = curve[i * 8];
            assert!((sample - *control).length() < 0.001);
        }
    }

    #[test]
    fn full_tension_reduces_to_polygon_vertices() {
        let ring = square();
        let curve = cardinal_loop(&ring, 1.0, 4);

        // With zero-length tangents every segment is a straight Hermite blend.
        let midpoint = curve[2];
        let expected = vec2(5.0, 0.0);
        assert!((midpoint - expected).length() < 0.5);
    }

    #[test]
    fn short_rings_are_returned_unchanged() {
        let ring = vec![vec2(0.0, 0.0), vec2(1.0, 1.0)];
        assert_eq!(cardinal_loop(&ring, 0.3, 8), ring);
    }
}
