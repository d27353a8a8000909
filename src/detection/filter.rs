use crate::config::{within, FilterCriteria};
use crate::error::Result;
use crate::models::Contour;
use tracing::debug;

/// Keep the contours that satisfy every bound in `criteria`, preserving order
pub fn filter_contours(contours: &[Contour], criteria: &FilterCriteria) -> Vec<Contour> {
    contours
        .iter()
        .filter(|c| match passes(c, criteria) {
            Ok(keep) => keep,
            Err(e) => {
                debug!("Rejecting contour with {} points: {}", c.vertex_count(), e);
                false
            }
        })
        .cloned()
        .collect()
}

/// Checks follow the fixed criterion order and stop at the first failure
fn passes(contour: &Contour, criteria: &FilterCriteria) -> Result<bool> {
    if !within(contour.width() as f64, [criteria.min_width, criteria.max_width]) {
        return Ok(false);
    }
    if !within(contour.height() as f64, [criteria.min_height, criteria.max_height]) {
        return Ok(false);
    }

    let area = contour.area();
    if area < criteria.min_area {
        return Ok(false);
    }
    if contour.perimeter() < criteria.min_perimeter {
        return Ok(false);
    }
    if !within(contour.solidity()?, criteria.solidity) {
        return Ok(false);
    }

    let vertices = contour.vertex_count();
    if vertices < criteria.min_vertices || vertices > criteria.max_vertices {
        return Ok(false);
    }

    Ok(within(contour.aspect_ratio()?, [criteria.min_ratio, criteria.max_ratio]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use imageproc::contours::BorderType;
    use imageproc::point::Point;

    fn rect(x0: i32, y0: i32, w: i32, h: i32) -> Contour {
        let (x1, y1) = (x0 + w - 1, y0 + h - 1);
        Contour::new(
            vec![
                Point::new(x0, y0),
                Point::new(x0, y1),
                Point::new(x1, y1),
                Point::new(x1, y0),
            ],
            BorderType::Outer,
            None,
        )
    }

    fn permissive() -> FilterCriteria {
        FilterCriteria {
            min_area: 0.0,
            min_perimeter: 0.0,
            min_width: 0.0,
            max_width: 1000.0,
            min_height: 0.0,
            max_height: 1000.0,
            solidity: [0.0, 100.0],
            min_vertices: 0,
            max_vertices: 1_000_000,
            min_ratio: 0.0,
            max_ratio: 1000.0,
        }
    }

    #[test]
    fn test_center_preset_drops_small_regions() {
        let criteria = PipelineConfig::center().filter;
        let contours = vec![rect(0, 0, 5, 5), rect(10, 10, 40, 40), rect(100, 100, 8, 30)];

        let kept = filter_contours(&contours, &criteria);
        assert_eq!(kept, vec![contours[1].clone()]);
    }

    #[test]
    fn test_width_and_height_bounds_are_inclusive() {
        let mut criteria = permissive();
        criteria.min_width = 20.0;
        criteria.max_width = 20.0;
        criteria.max_height = 10.0;

        let contours = vec![rect(0, 0, 20, 10), rect(0, 0, 21, 10), rect(0, 0, 20, 11)];
        let kept = filter_contours(&contours, &criteria);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].bounding_box().width, 20);
    }

    #[test]
    fn test_ratio_bounds() {
        let mut criteria = permissive();
        criteria.min_ratio = 1.5;
        criteria.max_ratio = 3.0;

        let contours = vec![rect(0, 0, 31, 10), rect(0, 0, 20, 10), rect(0, 0, 10, 10)];
        let kept = filter_contours(&contours, &criteria);
        assert_eq!(kept, vec![contours[1].clone()]);
    }

    fn l_shape() -> Contour {
        // 8x8 square with a 4x4 corner removed: area 48, hull area 56
        Contour::new(
            vec![
                Point::new(0, 0),
                Point::new(0, 8),
                Point::new(8, 8),
                Point::new(8, 4),
                Point::new(4, 4),
                Point::new(4, 0),
            ],
            BorderType::Outer,
            None,
        )
    }

    #[test]
    fn test_solidity_bounds() {
        let mut criteria = permissive();
        criteria.solidity = [90.0, 100.0];

        let contours = vec![rect(0, 0, 10, 10), l_shape()];
        let kept = filter_contours(&contours, &criteria);
        assert_eq!(kept, vec![contours[0].clone()]);

        // Bounds are inclusive: an exact match on the computed solidity passes
        let solidity = l_shape().solidity().unwrap();
        assert!((solidity - 100.0 * 48.0 / 56.0).abs() < 1e-9);
        criteria.solidity = [solidity, solidity];
        assert_eq!(filter_contours(&contours, &criteria), vec![contours[1].clone()]);
    }

    #[test]
    fn test_vertex_bounds() {
        let mut criteria = permissive();
        criteria.min_vertices = 5;
        assert!(filter_contours(&[rect(0, 0, 10, 10)], &criteria).is_empty());

        criteria.min_vertices = 4;
        criteria.max_vertices = 4;
        assert_eq!(filter_contours(&[rect(0, 0, 10, 10)], &criteria).len(), 1);
    }

    #[test]
    fn test_degenerate_hull_is_rejected() {
        let line = Contour::new(
            vec![Point::new(0, 0), Point::new(9, 0)],
            BorderType::Outer,
            None,
        );
        let kept = filter_contours(&[line, rect(0, 0, 10, 10)], &permissive());
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].vertex_count(), 4);
    }

    #[test]
    fn test_filter_is_idempotent_and_order_preserving() {
        let mut criteria = permissive();
        criteria.min_area = 50.0;
        let contours = vec![
            rect(0, 0, 12, 12),
            rect(0, 0, 3, 3),
            rect(50, 0, 20, 5),
            rect(0, 50, 2, 40),
            rect(80, 80, 9, 9),
        ];

        let once = filter_contours(&contours, &criteria);
        let twice = filter_contours(&once, &criteria);
        assert_eq!(once, twice);
        assert_eq!(once, vec![contours[0].clone(), contours[2].clone(), contours[4].clone()]);
    }
}
