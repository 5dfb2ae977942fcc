use nalgebra as na;
use ndarray::Array2;

/// Builds the `n x m` matrix of euclidean distances between `a[i]` and `b[j]`.
///
/// Either side may be empty, the result then has a zero-sized axis. The
/// assignment solver is undefined on such a matrix, so callers have to
/// handle those cases before solving.
pub fn cost_matrix(a: &[na::Point2<f32>], b: &[na::Point2<f32>]) -> Array2<f32> {
    Array2::from_shape_fn((a.len(), b.len()), |(i, j)| na::distance(&a[i], &b[j]))
}

/// Ray casting point-in-polygon test. Points on the upper/right edges count
/// as inside.
pub fn in_bounds(p: na::Point2<f32>, poly: &[na::Point2<f32>]) -> bool {
    let n = poly.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut p1 = poly[0];
    let mut xints = 0.0;

    for i in 1..=n {
        let p2 = poly[i % n];

        if p.y > f32::min(p1.y, p2.y) && p.y <= f32::max(p1.y, p2.y) && p.x <= f32::max(p1.x, p2.x)
        {
            if (p1.y - p2.y).abs() > f32::EPSILON {
                xints = (p.y - p1.y) * (p2.x - p1.x) / (p2.y - p1.y) + p1.x;
            }

            if (p1.x - p2.x).abs() < f32::EPSILON || p.x <= xints {
                inside = !inside;
            }
        }

        p1 = p2;
    }

    inside
}
