//! Tests for masks built from free-hand drawings

#[cfg(test)]
mod tests {
    use crate::fixtures::{encode, photo};
    use image::{GrayImage, ImageFormat, Luma, RgbImage};
    use shapecollage::CollageError;
    use shapecollage::shape::drawing::{drawn_mask, mask_from_drawing};
    use shapecollage::spatial::Canvas;

    fn canvas() -> Canvas {
        Canvas::new(600, 600).expect("valid canvas")
    }

    // Tests that a blank drawing rejects the whole canvas
    // Verified by skipping the inversion
    #[test]
    fn test_blank_drawing_rejects_everything() {
        let white = RgbImage::from_pixel(200, 200, image::Rgb([255, 255, 255]));
        let mask = drawn_mask(canvas(), &encode(&white, ImageFormat::Png)).expect("decodes");

        assert!(mask.is_empty());
        assert_eq!(mask.canvas(), canvas());
    }

    // Tests that ink becomes the accepted region after resizing to the canvas
    // Verified by resizing to the drawing's own dimensions
    #[test]
    fn test_ink_is_accepted_after_resize() {
        let drawing = GrayImage::from_fn(300, 300, |x, y| {
            if (100..200).contains(&x) && (100..200).contains(&y) {
                Luma([0])
            } else {
                Luma([255])
            }
        });
        let mask = mask_from_drawing(canvas(), &drawing);

        assert!(mask.accepts(300, 300));
        assert!(mask.accepts(220, 380));
        assert!(!mask.accepts(100, 100));
        assert!(!mask.accepts(500, 300));
    }

    // Tests that color drawings are judged by their luminance
    // Verified by reading only the blue channel
    #[test]
    fn test_color_drawing_uses_luminance() {
        let mask = drawn_mask(canvas(), &encode(&photo(60, 60), ImageFormat::Png))
            .expect("decodes");

        assert_eq!(mask.canvas(), canvas());
        assert!(mask.accepts(5, 5));
        assert!(!mask.accepts(595, 595));
    }

    // Tests that undecodable drawings are reported as decode errors
    // Verified by returning an empty mask on decode failure
    #[test]
    fn test_invalid_drawing_fails_to_decode() {
        let result = drawn_mask(canvas(), b"scribble");

        assert!(matches!(
            result,
            Err(CollageError::InputDecode { input: "drawn shape", .. })
        ));
    }
}
