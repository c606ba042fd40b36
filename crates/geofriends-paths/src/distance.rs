use geofriends_core::Point;

/// Straight-line (L2) distance between two points.
///
/// Used both as edge weight and as heuristic on visibility graphs: every
/// edge is a straight segment, so the heuristic is admissible and
/// consistent.
#[inline]
pub fn euclidean(a: Point, b: Point) -> f32 {
    a.distance(b)
}

/// Sum of the Euclidean lengths of consecutive segments.
pub fn polyline_length(points: &[Point]) -> f32 {
    points.windows(2).map(|w| euclidean(w[0], w[1])).sum()
}
