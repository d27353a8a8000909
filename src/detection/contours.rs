use crate::models::{Contour, Mask};
use imageproc::contours::{self, BorderType};
use imageproc::point::Point;

/// Find region boundaries in a binary mask.
///
/// With `external_only` only the outermost borders are kept; otherwise outer
/// and hole borders at every nesting level are returned in border-following
/// order. Every contour is reduced to the corners of its straight runs.
pub fn find_contours(mask: &Mask, external_only: bool) -> Vec<Contour> {
    contours::find_contours::<i32>(mask)
        .into_iter()
        .filter(|c| !external_only || (c.border_type == BorderType::Outer && c.parent.is_none()))
        .map(|c| Contour::new(simplify_chain(&c.points), c.border_type, c.parent))
        .collect()
}

/// Drop points that sit strictly inside a straight segment of a closed chain
pub fn simplify_chain(points: &[Point<i32>]) -> Vec<Point<i32>> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }

    points
        .iter()
        .enumerate()
        .filter(|&(i, p)| {
            let prev = points[(i + n - 1) % n];
            let next = points[(i + 1) % n];
            let (ax, ay) = (p.x - prev.x, p.y - prev.y);
            let (bx, by) = (next.x - p.x, next.y - p.y);
            let cross = ax * by - ay * bx;
            let dot = ax * bx + ay * by;
            !(cross == 0 && dot > 0)
        })
        .map(|(_, p)| *p)
        .collect()
}
