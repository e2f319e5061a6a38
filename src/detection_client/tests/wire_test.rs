#[cfg(test)]
mod wire_test {
    use crate::capture_source::encode::EncodedImage;
    use crate::detection_client::wire::{decode_error, decode_success, multipart_body};
    use crate::error::DetectError;
    use crate::geometry::BoundingBox;

    #[test]
    fn test_decode_success_with_primary() {
        let body = r#"{
            "detections": [
                {"box": [100, 100, 400, 400], "label": "cat", "confidence": 0.92},
                {"box": [0, 0, 10, 20], "label": "dog", "confidence": 0.31}
            ],
            "highest_confidence_detection": {"box": [100, 100, 400, 400], "label": "cat", "confidence": 0.92},
            "model_used": "yolo11n.pt"
        }"#;

        let result = decode_success(body).unwrap();

        assert_eq!(result.detections.len(), 2);
        assert_eq!(result.detections[0].bbox, BoundingBox::new(100.0, 100.0, 400.0, 400.0));
        assert_eq!(result.detections[1].label, "dog");
        assert_eq!(result.primary.unwrap().label, "cat");
        assert_eq!(result.model_used.as_deref(), Some("yolo11n.pt"));
    }

    #[test]
    fn test_decode_without_detections_key_is_empty() {
        let result = decode_success(r#"{"model_used": "yolo8n.pt"}"#).unwrap();
        assert!(result.is_empty());
        assert!(result.primary.is_none());
    }

    #[test]
    fn test_decode_rejects_malformed_bodies() {
        assert!(matches!(decode_success("<html>"), Err(DetectError::Decode(_))));
        assert!(matches!(
            decode_success(r#"{"detections": [{"box": [1, 2, 3], "label": "x", "confidence": 0.5}]}"#),
            Err(DetectError::Decode(_))
        ));
        assert!(matches!(
            decode_success(r#"{"detections": [{"box": [1, 2, 3, 4], "label": "x", "confidence": 1.5}]}"#),
            Err(DetectError::Decode(_))
        ));
        assert!(matches!(
            decode_success(r#"{"detections": [{"box": [9, 2, 3, 4], "label": "x", "confidence": 0.5}]}"#),
            Err(DetectError::Decode(_))
        ));
    }

    #[test]
    fn test_decode_error_prefers_server_message() {
        assert_eq!(
            decode_error(400, r#"{"error": "No image uploaded"}"#),
            DetectError::Server {
                status: 400,
                message: "No image uploaded".to_string()
            }
        );
        assert_eq!(
            decode_error(502, "Bad Gateway"),
            DetectError::Server {
                status: 502,
                message: "Server responded with status: 502".to_string()
            }
        );
        assert_eq!(
            decode_error(500, r#"{"error": ""}"#).to_string(),
            "Server responded with status: 500"
        );
    }

    #[test]
    fn test_multipart_body_layout() {
        let image = EncodedImage {
            bytes: vec![0xff, 0xd8, 0x00, 0xff, 0xd9],
            filename: "frame.jpg".to_string(),
            mime: "image/jpeg".to_string(),
        };

        let body = multipart_body("XYZ", &image, "yolo8n.pt");
        let text = String::from_utf8_lossy(&body);

        assert!(text.starts_with("--XYZ\r\nContent-Disposition: form-data; name=\"image\"; filename=\"frame.jpg\"\r\nContent-Type: image/jpeg\r\n\r\n"));
        assert!(text.contains("--XYZ\r\nContent-Disposition: form-data; name=\"model\"\r\n\r\nyolo8n.pt\r\n"));
        assert!(text.ends_with("--XYZ--\r\n"));
        assert!(body.windows(5).any(|w| w == [0xff, 0xd8, 0x00, 0xff, 0xd9]));
    }
}
