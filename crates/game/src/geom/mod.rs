use glam::Vec2;

/// 2D cross product: `v1.x * v2.y - v1.y * v2.x`. Zero iff the vectors are
/// parallel.
#[inline]
pub fn cross(v1: Vec2, v2: Vec2) -> f32 {
    v1.x * v2.y - v1.y * v2.x
}

/// Whether the directed segments `p -> p2` and `q -> q2` share at least one
/// point, via the cross-product parametrization. Comparisons are exact:
/// grazing contacts at a boundary count as intersecting.
pub fn segments_intersect(p: Vec2, p2: Vec2, q: Vec2, q2: Vec2) -> bool {
    let r = p2 - p;
    let s = q2 - q;

    let u_numerator = cross(q - p, r);
    let t_numerator = cross(q - p, s);
    let denominator = cross(r, s);

    if u_numerator == 0.0 && t_numerator == 0.0 && denominator == 0.0 {
        // Collinear. Touching endpoints intersect outright.
        if p == q || p == q2 || p2 == q || p2 == q2 {
            return true;
        }
        // Overlapping iff the endpoint differences do not all point the same
        // way along some axis.
        return !all_equal([
            q.x - p.x < 0.0,
            q.x - p2.x < 0.0,
            q2.x - p.x < 0.0,
            q2.x - p2.x < 0.0,
        ]) || !all_equal([
            q.y - p.y < 0.0,
            q.y - p2.y < 0.0,
            q2.y - p.y < 0.0,
            q2.y - p2.y < 0.0,
        ]);
    }

    if denominator == 0.0 {
        // Parallel, non-collinear.
        return false;
    }

    let t = t_numerator / denominator;
    let u = u_numerator / denominator;

    (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u)
}

fn all_equal(values: [bool; 4]) -> bool {
    values.iter().all(|&v| v == values[0])
}
