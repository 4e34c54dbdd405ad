//! Tests for shape name resolution and parameter validation

#[cfg(test)]
mod tests {
    use shapecollage::io::payload::CollageRequest;
    use shapecollage::shape::ShapeKind;
    use shapecollage::CollageError;

    fn request(shape: &str) -> CollageRequest {
        CollageRequest::new(shape, vec![1, 2, 3])
    }

    // Tests parameterless shapes and case-insensitive matching
    // Verified by removing the lowercase conversion
    #[test]
    fn test_procedural_names_resolve() {
        let resolve = |name| ShapeKind::from_request(&request(name)).ok();

        assert_eq!(resolve("rectangle"), Some(ShapeKind::Rectangle));
        assert_eq!(resolve("Circle"), Some(ShapeKind::Circle));
        assert_eq!(resolve(" STAR "), Some(ShapeKind::Star));
        assert_eq!(resolve("heart"), Some(ShapeKind::Heart));
    }

    // Tests that text shapes require non-blank text
    // Verified by accepting whitespace-only text
    #[test]
    fn test_text_requires_text_input() {
        let missing = ShapeKind::from_request(&request("text"));
        assert!(matches!(
            missing,
            Err(CollageError::InvalidShapeParams { shape: "text", parameter: "text_input" })
        ));

        let blank = ShapeKind::from_request(&request("text").with_text("   "));
        assert!(blank.is_err());

        let alias = ShapeKind::from_request(&request("text_mask").with_text(" LOVE "));
        assert_eq!(alias.ok(), Some(ShapeKind::Text("LOVE".to_string())));
    }

    // Tests that silhouette and draw shapes require their images
    // Verified by defaulting missing images to empty byte vectors
    #[test]
    fn test_image_shapes_require_images() {
        assert!(matches!(
            ShapeKind::from_request(&request("custom_silhouette")),
            Err(CollageError::InvalidShapeParams { parameter: "custom_mask", .. })
        ));
        assert!(matches!(
            ShapeKind::from_request(&request("draw")),
            Err(CollageError::InvalidShapeParams { parameter: "drawn_shape", .. })
        ));
        assert!(ShapeKind::from_request(&request("draw").with_drawn_shape(Vec::new())).is_err());

        let silhouette =
            ShapeKind::from_request(&request("silhouette").with_custom_mask(vec![9, 9]));
        assert_eq!(silhouette.ok(), Some(ShapeKind::Silhouette(vec![9, 9])));
    }

    // Tests that unknown names fall back to an unconstrained shape
    // Verified by returning an error for unknown names
    #[test]
    fn test_unknown_shape_is_unconstrained() {
        let kind = ShapeKind::from_request(&request("hexagon")).expect("permissive fallback");

        assert_eq!(kind, ShapeKind::Unrecognized("hexagon".to_string()));
        assert!(!kind.is_constrained());
        assert_eq!(kind.name(), "unrecognized");
    }

    // Tests canonical names and constraint flags
    // Verified by marking rectangle as constrained
    #[test]
    fn test_names_and_constraints() {
        assert!(!ShapeKind::Rectangle.is_constrained());
        assert!(ShapeKind::Circle.is_constrained());
        assert!(ShapeKind::Draw(vec![1]).is_constrained());
        assert_eq!(ShapeKind::Silhouette(vec![1]).name(), "custom_silhouette");
        assert_eq!(ShapeKind::Text("a".to_string()).name(), "text");
    }
}
