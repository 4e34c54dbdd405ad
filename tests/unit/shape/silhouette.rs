//! Tests for silhouette segmentation and smoothing

#[cfg(test)]
mod tests {
    use crate::fixtures::photo;
    use image::RgbImage;
    use ndarray::Array2;
    use shapecollage::shape::silhouette::smooth_silhouette;
    use shapecollage::shape::{SegmentationModel, SilhouetteSegmenter};
    use shapecollage::spatial::Canvas;
    use shapecollage::{CollageError, Result};

    /// Model reporting a person in the middle half of the frame
    struct CenteredPerson;

    impl SegmentationModel for CenteredPerson {
        fn foreground_probability(&mut self, image: &RgbImage) -> Result<Array2<f32>> {
            let (w, h) = (image.width() as usize, image.height() as usize);
            Ok(Array2::from_shape_fn((h, w), |(y, x)| {
                if (w / 4..3 * w / 4).contains(&x) && (h / 4..3 * h / 4).contains(&y) {
                    0.9
                } else {
                    0.1
                }
            }))
        }
    }

    /// Model returning a fixed-size map regardless of the input
    struct WrongSize;

    impl SegmentationModel for WrongSize {
        fn foreground_probability(&mut self, _image: &RgbImage) -> Result<Array2<f32>> {
            Ok(Array2::zeros((3, 3)))
        }
    }

    fn canvas() -> Canvas {
        Canvas::new(600, 600).expect("valid canvas")
    }

    // Tests that the foreground region maps onto the canvas
    // Verified by resizing to the photo size instead of the canvas
    #[test]
    fn test_segment_image_maps_foreground_to_canvas() {
        let mut segmenter = SilhouetteSegmenter::new(CenteredPerson);
        let mask = segmenter
            .segment_image(&photo(200, 100), canvas())
            .expect("segmentation succeeds");

        assert_eq!(mask.canvas(), canvas());
        assert!(mask.accepts(300, 300));
        assert!(!mask.accepts(50, 50));
        assert!(!mask.accepts(550, 550));
    }

    // Tests that outputs with the wrong shape are rejected
    // Verified by skipping the dimension check
    #[test]
    fn test_segment_image_rejects_mismatched_output() {
        let mut segmenter = SilhouetteSegmenter::new(WrongSize);
        let result = segmenter.segment_image(&photo(20, 10), canvas());

        assert!(matches!(result, Err(CollageError::InvalidSourceData { .. })));
    }

    // Tests that undecodable references fail before inference
    // Verified by decoding with a default image on error
    #[test]
    fn test_segment_rejects_undecodable_reference() {
        let mut segmenter = SilhouetteSegmenter::new(CenteredPerson);
        let result = segmenter.segment(b"not a photo", canvas());

        assert!(result.is_err_and(|e| e.kind() == "input_decode"));
    }

    // Tests that smoothing keeps large regions and drops isolated specks
    // Verified by removing the re-threshold step
    #[test]
    fn test_smoothing_removes_specks() {
        let mut probabilities = Array2::<f32>::zeros((100, 100));
        for y in 30..70 {
            for x in 30..70 {
                if let Some(p) = probabilities.get_mut((y, x)) {
                    *p = 1.0;
                }
            }
        }
        if let Some(p) = probabilities.get_mut((5, 5)) {
            *p = 1.0;
        }

        let smooth = smooth_silhouette(&probabilities);

        assert_eq!(smooth.dimensions(), (100, 100));
        assert_eq!(smooth.get_pixel(50, 50).0, [255]);
        assert_eq!(smooth.get_pixel(5, 5).0, [0]);
        assert_eq!(smooth.get_pixel(90, 90).0, [0]);
        assert!(smooth.pixels().all(|p| p.0 == [0] || p.0 == [255]));
    }
}
