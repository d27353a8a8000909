use crate::error::{PhError, Result};
use image::GrayImage;
use imageproc::contours::BorderType;
use imageproc::geometry::{arc_length, convex_hull};
use imageproc::point::Point;
use serde::{Deserialize, Serialize};

/// Binary selection over an image: 255 = selected, 0 = not selected.
pub type Mask = GrayImage;

/// Axis-aligned bounding box, inclusive of its edge pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Closed boundary of one connected region of a mask
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    pub points: Vec<Point<i32>>,
    pub border_type: BorderType,
    /// Index of the enclosing border in the extraction output, if any
    pub parent: Option<usize>,
}

impl Contour {
    pub fn new(points: Vec<Point<i32>>, border_type: BorderType, parent: Option<usize>) -> Self {
        Self {
            points,
            border_type,
            parent,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    pub fn bounding_box(&self) -> BoundingBox {
        let Some(first) = self.points.first() else {
            return BoundingBox { x: 0, y: 0, width: 0, height: 0 };
        };

        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in &self.points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        BoundingBox {
            x: min_x.max(0) as u32,
            y: min_y.max(0) as u32,
            width: (max_x - min_x + 1) as u32,
            height: (max_y - min_y + 1) as u32,
        }
    }

    pub fn width(&self) -> u32 {
        self.bounding_box().width
    }

    pub fn height(&self) -> u32 {
        self.bounding_box().height
    }

    /// Enclosed polygon area (shoelace formula)
    pub fn area(&self) -> f64 {
        polygon_area(&self.points)
    }

    /// Length of the closed polyline
    pub fn perimeter(&self) -> f64 {
        if self.points.len() < 2 {
            return 0.0;
        }
        arc_length(&self.points, true)
    }

    pub fn convex_hull_area(&self) -> f64 {
        if self.points.len() < 3 {
            return 0.0;
        }
        let hull = convex_hull(self.points.as_slice());
        polygon_area(&hull)
    }

    /// Area as a percentage of the convex hull area
    pub fn solidity(&self) -> Result<f64> {
        let hull_area = self.convex_hull_area();
        if hull_area <= 0.0 {
            return Err(PhError::degenerate_geometry("convex hull has zero area"));
        }
        Ok(100.0 * self.area() / hull_area)
    }

    /// Bounding box width divided by height
    pub fn aspect_ratio(&self) -> Result<f64> {
        let bbox = self.bounding_box();
        if bbox.height == 0 {
            return Err(PhError::degenerate_geometry("bounding box has zero height"));
        }
        Ok(bbox.width as f64 / bbox.height as f64)
    }
}

fn polygon_area(points: &[Point<i32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut twice_area = 0i64;
    for (i, p) in points.iter().enumerate() {
        let q = points[(i + 1) % points.len()];
        twice_area += p.x as i64 * q.y as i64 - q.x as i64 * p.y as i64;
    }
    twice_area.abs() as f64 / 2.0
}

/// Mean color of a region, in RGB and in 8-bit HSV
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSample {
    pub rgb: [u8; 3],
    pub hsv: [u8; 3],
    /// Number of mask pixels that were averaged
    pub pixel_count: u64,
}

impl ColorSample {
    pub fn hue(&self) -> u8 {
        self.hsv[0]
    }
}
