//! Tests for circle, star, heart and polygon masks

#[cfg(test)]
mod tests {
    use imageproc::point::Point;
    use shapecollage::shape::procedural::{circle_mask, heart_mask, polygon_mask, star_mask};
    use shapecollage::spatial::Canvas;

    fn canvas() -> Canvas {
        Canvas::new(600, 600).expect("valid canvas")
    }

    const CORNERS: [(i64, i64); 4] = [(0, 0), (599, 0), (0, 599), (599, 599)];

    // Tests the circle accepts its center and rejects every corner
    // Verified by drawing the ellipse without the margin
    #[test]
    fn test_circle_center_and_corners() {
        let mask = circle_mask(canvas(), 0.04);

        assert!(mask.accepts(300, 300));
        for (x, y) in CORNERS {
            assert!(!mask.accepts(x, y), "corner ({x}, {y})");
        }
        assert_eq!(mask.canvas(), canvas());
    }

    // Tests that the margin excludes a border band
    // Verified by using the full canvas radius
    #[test]
    fn test_circle_margin_band() {
        let mask = circle_mask(canvas(), 0.04);

        assert!(mask.accepts(300, 30));
        assert!(!mask.accepts(300, 20));
        assert!(!mask.accepts(10, 300));

        let no_margin = circle_mask(canvas(), 0.0);
        assert!(no_margin.accepts(300, 5));
    }

    // Tests the star covers its center but not the notch between the lower tips
    // Verified by using equal inner and outer radii
    #[test]
    fn test_star_mask() {
        let mask = star_mask(canvas());

        assert!(mask.accepts(300, 300));
        assert!(!mask.accepts(300, 520));
        for (x, y) in CORNERS {
            assert!(!mask.accepts(x, y));
        }
    }

    // Tests the heart is filled below its top notch
    // Verified by flipping the heart vertically
    #[test]
    fn test_heart_mask() {
        let mask = heart_mask(canvas());

        assert!(mask.accepts(300, 300));
        assert!(mask.accepts(300, 500));
        assert!(!mask.accepts(300, 180));
        for (x, y) in CORNERS {
            assert!(!mask.accepts(x, y));
        }
    }

    // Tests that closed outlines and repeated vertices are tolerated
    // Verified by removing the trailing vertex deduplication
    #[test]
    fn test_polygon_mask_tolerates_closed_outline() {
        let square = [(100, 100), (100, 100), (200, 100), (200, 200), (100, 200), (100, 100)]
            .into_iter()
            .map(|(x, y)| Point::new(x, y));
        let mask = polygon_mask(canvas(), square);

        assert!(mask.accepts(150, 150));
        assert!(!mask.accepts(250, 150));
    }

    // Tests that degenerate polygons produce an empty mask
    // Verified by drawing polygons with two vertices
    #[test]
    fn test_degenerate_polygon_is_empty() {
        let line = [Point::new(0, 0), Point::new(10, 10), Point::new(0, 0)];

        assert!(polygon_mask(canvas(), line).is_empty());
    }
}
