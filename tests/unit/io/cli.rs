//! Tests for command-line parsing and the collage command

#[cfg(test)]
mod tests {
    use crate::fixtures::encoded_photo;
    use clap::Parser;
    use shapecollage::io::cli::{Cli, CollageCommand};
    use shapecollage::io::configuration::{
        DEFAULT_MAX_ATTEMPTS, DEFAULT_MAX_STORED_FILES, DEFAULT_SEED, DEFAULT_TARGET_COUNT,
    };
    use shapecollage::spatial::{Canvas, GridDimensions};
    use std::path::{Path, PathBuf};

    fn parse(extra: &[&str]) -> Cli {
        let mut args = vec!["shapecollage", "me.jpg", "--api-key", "test-key"];
        args.extend_from_slice(extra);
        Cli::parse_from(args)
    }

    fn with_dirs(dir: &Path, reference: &Path, extra: &[&str]) -> Cli {
        let uploads = dir.join("uploads");
        let generated = dir.join("generated");
        let mut args = vec![
            "shapecollage".to_string(),
            reference.display().to_string(),
            "--api-key".to_string(),
            "test-key".to_string(),
            "--uploads".to_string(),
            uploads.display().to_string(),
            "--generated".to_string(),
            generated.display().to_string(),
            "--quiet".to_string(),
        ];
        args.extend(extra.iter().map(ToString::to_string));
        Cli::parse_from(args)
    }

    // Tests CLI parsing with only the reference and key
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_cli_parse_minimal_args() {
        let cli = parse(&[]);

        assert_eq!(cli.reference, PathBuf::from("me.jpg"));
        assert_eq!(cli.shape, "rectangle");
        assert_eq!(cli.seed, DEFAULT_SEED);
        assert_eq!(cli.count, DEFAULT_TARGET_COUNT);
        assert_eq!(cli.attempts, DEFAULT_MAX_ATTEMPTS);
        assert_eq!(cli.max_files, DEFAULT_MAX_STORED_FILES);
        assert_eq!(cli.canvas, Canvas::new(600, 600).expect("valid canvas"));
        assert_eq!(cli.grid, GridDimensions::new(18, 18));
        assert!(cli.should_show_progress());
    }

    // Tests CLI parsing of layout and shape arguments
    // Verified by swapping the canvas and grid value parsers
    #[test]
    fn test_cli_parse_layout_args() {
        let cli = parse(&[
            "--shape", "text", "--text", "LOVE", "--canvas", "800x400", "--grid", "20x10",
            "--jitter", "0.1", "--count", "3", "--attempts", "6", "--render", "out.png", "-q",
        ]);
        let config = cli.pipeline_config();

        assert_eq!(cli.text.as_deref(), Some("LOVE"));
        assert_eq!(config.canvas, Canvas::new(800, 400).expect("valid canvas"));
        assert_eq!(config.grid, GridDimensions::new(20, 10));
        assert!((config.jitter_ratio - 0.1).abs() < f64::EPSILON);
        assert_eq!((config.target_count, config.max_attempts), (3, 6));
        assert!(config.render);
        assert!(!cli.should_show_progress());
    }

    // Tests that malformed dimensions are rejected at parse time
    // Verified by defaulting unparsable dimensions
    #[test]
    fn test_cli_rejects_bad_dimensions() {
        let args = ["shapecollage", "me.jpg", "--api-key", "k", "--canvas", "600"];
        assert!(Cli::try_parse_from(args).is_err());

        let args = ["shapecollage", "me.jpg", "--api-key", "k", "--canvas", "0x600"];
        assert!(Cli::try_parse_from(args).is_err());

        let args = ["shapecollage", "me.jpg", "--api-key", "k", "--grid", "tenxten"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    // Tests that input files are read into the request
    // Verified by leaving the drawing out of the request
    #[test]
    fn test_request_reads_files() {
        let dir = tempfile::tempdir().expect("temp dir");
        let reference = dir.path().join("me.png");
        let drawing = dir.path().join("drawing.png");
        std::fs::write(&reference, encoded_photo(8, 8)).expect("writes");
        std::fs::write(&drawing, encoded_photo(4, 4)).expect("writes");

        let cli = with_dirs(
            dir.path(),
            &reference,
            &["--shape", "draw", "--drawing", &drawing.display().to_string()],
        );
        let request = cli.request().expect("files exist");

        assert_eq!(request.shape, "draw");
        assert_eq!(request.reference_image, encoded_photo(8, 8));
        assert_eq!(request.drawn_shape, Some(encoded_photo(4, 4)));
        assert_eq!(request.custom_mask, None);
    }

    // Tests that a missing reference fails before any network call
    // Verified by reading the reference after constructing the client
    #[test]
    fn test_run_fails_on_missing_reference() {
        let dir = tempfile::tempdir().expect("temp dir");
        let cli = with_dirs(dir.path(), &dir.path().join("absent.jpg"), &[]);

        let result = CollageCommand::new(cli).run();

        assert!(result.is_err_and(|e| e.kind() == "file_system"));
        assert!(!dir.path().join("uploads").exists());
    }

    // Tests that an unusable segmentation model aborts before generation
    // Verified by skipping the model when building the mask builder
    #[test]
    fn test_run_fails_on_unusable_segmentation_model() {
        let dir = tempfile::tempdir().expect("temp dir");
        let reference = dir.path().join("me.png");
        std::fs::write(&reference, encoded_photo(8, 8)).expect("writes");
        let model = dir.path().join("missing.onnx").display().to_string();

        let cli = with_dirs(dir.path(), &reference, &["--segmentation-model", &model]);
        let result = CollageCommand::new(cli).run();

        assert!(result.is_err_and(|e| e.is_caller_error() || e.kind() == "invalid_source_data"));
        assert_eq!(std::fs::read_dir(dir.path().join("uploads")).map(Iterator::count).ok(), Some(0));
    }
}
