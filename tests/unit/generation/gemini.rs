//! Tests for the Gemini request configuration and response parsing

#[cfg(test)]
mod tests {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use shapecollage::generation::gemini::parse_inline_images;
    use shapecollage::generation::{GeminiClient, GeminiConfig, ServiceError};

    // Tests the generateContent URL with and without the models/ prefix
    // Verified by always prepending models/
    #[test]
    fn test_generate_url() {
        let config = GeminiConfig::new("key").with_endpoint("https://example.test/v1beta/");
        assert_eq!(
            config.generate_url(),
            "https://example.test/v1beta/models/gemini-2.5-flash-image:generateContent"
        );

        let prefixed = config.with_model("models/custom");
        assert_eq!(
            prefixed.generate_url(),
            "https://example.test/v1beta/models/custom:generateContent"
        );
    }

    // Tests that only the first candidate's inline images are collected
    // Verified by flattening parts of every candidate
    #[test]
    fn test_parse_first_candidate_images() {
        let data = STANDARD.encode(b"png bytes");
        let body = format!(
            r#"{{"candidates": [
                {{"content": {{"parts": [
                    {{"text": "Here you go"}},
                    {{"inlineData": {{"mimeType": "image/png", "data": "{data}"}}}}
                ]}}}},
                {{"content": {{"parts": [
                    {{"inlineData": {{"mimeType": "image/png", "data": "{data}"}}}}
                ]}}}}
            ]}}"#
        );

        let images = parse_inline_images(&body).expect("parses");

        assert_eq!(images.len(), 1);
        assert_eq!(images.first().map(|i| i.data.as_slice()), Some(&b"png bytes"[..]));
        assert_eq!(images.first().map(|i| i.mime_type.as_str()), Some("image/png"));
    }

    // Tests that empty and blocked responses yield no images
    // Verified by erroring on a missing content field
    #[test]
    fn test_parse_responses_without_images() {
        assert!(parse_inline_images("{}").is_ok_and(|images| images.is_empty()));
        assert!(parse_inline_images(r#"{"candidates": []}"#).is_ok_and(|i| i.is_empty()));
        assert!(
            parse_inline_images(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#)
                .is_ok_and(|i| i.is_empty())
        );
    }

    // Tests that snake_case keys are accepted and bad payloads rejected
    // Verified by removing the inline_data alias
    #[test]
    fn test_parse_aliases_and_errors() {
        let body = r#"{"candidates": [{"content": {"parts": [
            {"inline_data": {"mime_type": "image/jpeg", "data": "AAEC"}}
        ]}}]}"#;
        let images = parse_inline_images(body).expect("parses");
        assert_eq!(images.first().map(|i| i.data.clone()), Some(vec![0, 1, 2]));

        let bad_base64 = r#"{"candidates": [{"content": {"parts": [
            {"inlineData": {"mimeType": "image/png", "data": "!!"}}
        ]}}]}"#;
        assert!(matches!(parse_inline_images(bad_base64), Err(ServiceError::Base64(_))));
        assert!(matches!(parse_inline_images("not json"), Err(ServiceError::Parse(_))));
    }

    // Tests that a client cannot be built without an API key
    // Verified by removing the empty key check
    #[test]
    fn test_client_requires_api_key() {
        let result = GeminiClient::new(&GeminiConfig::new("  "));

        assert!(matches!(result, Err(ServiceError::Configuration(_))));
    }
}
