//! Tests for the end-to-end collage pipeline with in-memory collaborators

#[cfg(test)]
mod tests {
    use crate::fixtures::{MemoryStore, Reply, ScriptedService, encode, encoded_photo};
    use image::{ImageFormat, Rgb, RgbImage};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use shapecollage::CollageError;
    use shapecollage::algorithm::{CollagePipeline, PipelineConfig};
    use shapecollage::io::payload::CollageRequest;
    use shapecollage::shape::MaskBuilder;
    use shapecollage::spatial::{Canvas, GridDimensions};

    fn config(render: bool) -> PipelineConfig {
        PipelineConfig {
            canvas: Canvas::new(300, 300).expect("valid canvas"),
            grid: GridDimensions::new(10, 10),
            target_count: 2,
            max_attempts: 4,
            render,
            ..PipelineConfig::default()
        }
    }

    fn masks() -> MaskBuilder {
        MaskBuilder::new(Canvas::new(300, 300).expect("valid canvas"))
    }

    // Tests a full request producing a layout, stored assets and a render
    // Verified by skipping target storage
    #[test]
    fn test_pipeline_runs_end_to_end() {
        let service = ScriptedService::new(vec![Reply::Failure, Reply::Image, Reply::Image]);
        let uploads = MemoryStore::default();
        let generated = MemoryStore::default();
        let mut pipeline =
            CollagePipeline::new(config(true), masks(), &service, &uploads, &generated)
                .expect("matching canvas");

        let request = CollageRequest::new("circle", encoded_photo(80, 60));
        let outcome = pipeline
            .run(&request, &mut StdRng::seed_from_u64(1))
            .expect("pipeline succeeds");

        assert_eq!(outcome.attempts, 3);
        assert_eq!(generated.names().len(), 2);
        let target_name = uploads.names().first().cloned().expect("target stored");
        assert!(target_name.ends_with(".jpg") && !target_name.starts_with("edited_"));
        assert_eq!(
            outcome.result.target().map(|t| t.path.clone()),
            Some(format!("/memory/{target_name}"))
        );
        assert_eq!(outcome.result.generated().count(), 2);
        assert!(outcome.mask.is_some());
        assert_eq!(outcome.render.map(|r| r.dimensions()), Some((300, 300)));
    }

    // Tests that rendering is skipped unless configured and rectangles have no mask
    // Verified by always rendering
    #[test]
    fn test_pipeline_without_render() {
        let service = ScriptedService::new(vec![Reply::Image, Reply::Image]);
        let uploads = MemoryStore::default();
        let generated = MemoryStore::default();
        let mut pipeline =
            CollagePipeline::new(config(false), masks(), &service, &uploads, &generated)
                .expect("matching canvas");

        let outcome = pipeline
            .run(
                &CollageRequest::new("rectangle", encoded_photo(40, 40)),
                &mut StdRng::seed_from_u64(2),
            )
            .expect("pipeline succeeds");

        assert!(outcome.render.is_none());
        assert!(outcome.mask.is_none());
        assert_eq!(outcome.result.placements().len(), 100);
        assert_eq!(pipeline.config().target_count, 2);
    }

    // Tests that caller errors are detected before any service call or storage
    // Verified by storing the target before validating the shape
    #[test]
    fn test_caller_errors_precede_generation() {
        let service = ScriptedService::new(vec![Reply::Image]);
        let uploads = MemoryStore::default();
        let generated = MemoryStore::default();
        let mut pipeline =
            CollagePipeline::new(config(false), masks(), &service, &uploads, &generated)
                .expect("matching canvas");
        let mut rng = StdRng::seed_from_u64(3);

        let undecodable = pipeline.run(&CollageRequest::new("circle", b"nope".to_vec()), &mut rng);
        assert!(matches!(
            undecodable,
            Err(CollageError::InputDecode { input: "reference image", .. })
        ));

        let missing_text = pipeline.run(&CollageRequest::new("text", encoded_photo(8, 8)), &mut rng);
        assert!(matches!(missing_text, Err(CollageError::InvalidShapeParams { .. })));

        let blank = encode(&RgbImage::from_pixel(50, 50, Rgb([255, 255, 255])), ImageFormat::Png);
        let blank_drawing = pipeline.run(
            &CollageRequest::new("draw", encoded_photo(8, 8)).with_drawn_shape(blank),
            &mut rng,
        );
        assert!(matches!(blank_drawing, Err(CollageError::NoCandidateCells { .. })));

        let mut speck = RgbImage::from_pixel(300, 300, Rgb([255, 255, 255]));
        for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            speck.put_pixel(x, y, Rgb([0, 0, 0]));
        }
        let speck_drawing = pipeline.run(
            &CollageRequest::new("draw", encoded_photo(8, 8))
                .with_drawn_shape(encode(&speck, ImageFormat::Png)),
            &mut rng,
        );
        assert!(matches!(speck_drawing, Err(CollageError::NoCandidateCells { .. })));

        assert_eq!(service.calls(), 0);
        assert!(uploads.names().is_empty());
    }

    // Tests that generation exhaustion fails the request after the full budget
    // Verified by returning an empty layout on exhaustion
    #[test]
    fn test_generation_exhaustion_fails_request() {
        let service = ScriptedService::new(Vec::new());
        let uploads = MemoryStore::default();
        let generated = MemoryStore::default();
        let mut pipeline =
            CollagePipeline::new(config(false), masks(), &service, &uploads, &generated)
                .expect("matching canvas");

        let result = pipeline.run(
            &CollageRequest::new("star", encoded_photo(8, 8)),
            &mut StdRng::seed_from_u64(4),
        );

        assert!(matches!(result, Err(CollageError::GenerationExhausted { attempts: 4 })));
        assert_eq!(service.calls(), 4);
    }

    // Tests that the mask builder must share the pipeline canvas
    // Verified by removing the canvas comparison
    #[test]
    fn test_mismatched_canvas_is_rejected() {
        let service = ScriptedService::new(Vec::new());
        let store = MemoryStore::default();
        let builder = MaskBuilder::new(Canvas::new(600, 600).expect("valid canvas"));

        let result = CollagePipeline::new(config(false), builder, &service, &store, &store);

        assert!(result.is_err_and(|e| e.kind() == "invalid_parameter"));
    }
}
