use inkcalc_shared::Point;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InkBounds {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl InkBounds {
    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) as f64 / 2.0,
            (self.min_y + self.max_y) as f64 / 2.0,
        )
    }
}

/// Scan every pixel of an RGBA buffer for non-zero alpha. Min bounds start
/// at the full-canvas extent and max bounds at zero, so an untouched canvas
/// leaves them inverted; that sentinel is reported as `None`.
pub fn ink_bounds(rgba: &[u8], width: u32, height: u32) -> Option<InkBounds> {
    let mut bounds = InkBounds {
        min_x: width,
        min_y: height,
        max_x: 0,
        max_y: 0,
    };
    for y in 0..height {
        for x in 0..width {
            let index = ((y * width + x) * 4 + 3) as usize;
            if rgba.get(index).copied().unwrap_or(0) > 0 {
                bounds.min_x = bounds.min_x.min(x);
                bounds.min_y = bounds.min_y.min(y);
                bounds.max_x = bounds.max_x.max(x);
                bounds.max_y = bounds.max_y.max(y);
            }
        }
    }
    if bounds.min_x > bounds.max_x || bounds.min_y > bounds.max_y {
        None
    } else {
        Some(bounds)
    }
}

/// Anchor for new result overlays: center of the ink, or the canvas center
/// when the scan found nothing.
pub fn anchor_point(bounds: Option<InkBounds>, width: f64, height: f64) -> Point {
    match bounds {
        Some(bounds) => bounds.center(),
        None => Point::new(width / 2.0, height / 2.0),
    }
}

/// Normalize signed rect extents into a top-left origin and positive size.
pub fn normalized_rect(origin: Point, width: f64, height: f64) -> (Point, f64, f64) {
    let x = origin.x.min(origin.x + width);
    let y = origin.y.min(origin.y + height);
    (Point::new(x, y), width.abs(), height.abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_with_ink(width: u32, height: u32, pixels: &[(u32, u32)]) -> Vec<u8> {
        let mut rgba = vec![0u8; (width * height * 4) as usize];
        for (x, y) in pixels {
            rgba[((y * width + x) * 4 + 3) as usize] = 255;
        }
        rgba
    }

    #[test]
    fn empty_canvas_yields_sentinel() {
        let rgba = buffer_with_ink(8, 8, &[]);
        assert_eq!(ink_bounds(&rgba, 8, 8), None);
    }

    #[test]
    fn bounds_cover_all_inked_pixels() {
        let rgba = buffer_with_ink(10, 10, &[(2, 3), (7, 3), (4, 8)]);
        let bounds = ink_bounds(&rgba, 10, 10).unwrap();
        assert_eq!(
            bounds,
            InkBounds {
                min_x: 2,
                min_y: 3,
                max_x: 7,
                max_y: 8,
            }
        );
        assert_eq!(bounds.center(), Point::new(4.5, 5.5));
    }

    #[test]
    fn single_pixel_is_a_degenerate_box() {
        let rgba = buffer_with_ink(4, 4, &[(1, 2)]);
        let bounds = ink_bounds(&rgba, 4, 4).unwrap();
        assert_eq!(bounds.center(), Point::new(1.0, 2.0));
    }

    #[test]
    fn faint_alpha_still_counts() {
        let mut rgba = buffer_with_ink(4, 4, &[]);
        rgba[(2 * 4 + 2) * 4 + 3] = 1;
        assert!(ink_bounds(&rgba, 4, 4).is_some());
    }

    #[test]
    fn anchor_falls_back_to_canvas_center() {
        assert_eq!(anchor_point(None, 200.0, 100.0), Point::new(100.0, 50.0));
        let bounds = InkBounds {
            min_x: 10,
            min_y: 10,
            max_x: 30,
            max_y: 20,
        };
        assert_eq!(
            anchor_point(Some(bounds), 200.0, 100.0),
            Point::new(20.0, 15.0)
        );
    }

    #[test]
    fn normalized_rect_handles_any_corner_order() {
        let expected = (Point::new(10.0, 10.0), 40.0, 20.0);
        assert_eq!(
            normalized_rect(Point::new(10.0, 10.0), 40.0, 20.0),
            expected
        );
        assert_eq!(
            normalized_rect(Point::new(50.0, 30.0), -40.0, -20.0),
            expected
        );
        assert_eq!(
            normalized_rect(Point::new(10.0, 30.0), 40.0, -20.0),
            expected
        );
    }

    #[test]
    fn three_four_five_distance() {
        assert_eq!(Point::new(0.0, 0.0).distance_to(Point::new(3.0, 4.0)), 5.0);
    }
}
