use serde::Deserialize;

/// Body returned by the classification endpoint.
///
/// Error responses from the service carry only `error`, so `success`
/// defaults to false when absent.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ClassificationResult {
    #[serde(default)]
    pub success: bool,
    pub prediction: Option<String>,
    /// Raw model confidence in `[0, 1]`.
    pub confidence: Option<f64>,
    pub confidence_percent: Option<f64>,
    pub severity: Option<String>,
    pub priority: Option<String>,
    /// Preview image as a `data:` URI.
    pub image: Option<String>,
    pub error: Option<String>,
}

/// Body returned by the training endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct TrainingResult {
    #[serde(default)]
    pub success: bool,
    pub message: Option<String>,
    pub note: Option<String>,
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_classification_body() {
        let body = r#"{
            "success": true,
            "prediction": "Road_Issues_Pothole",
            "confidence": 0.8712,
            "confidence_percent": 87.12,
            "severity": "High",
            "priority": "High",
            "image": "data:image/png;base64,AAAA"
        }"#;
        let parsed: ClassificationResult = serde_json::from_str(body).unwrap();
        assert!(parsed.success);
        assert_eq!(parsed.prediction.as_deref(), Some("Road_Issues_Pothole"));
        assert_eq!(parsed.confidence_percent, Some(87.12));
        assert_eq!(parsed.error, None);
    }

    #[test]
    fn error_only_bodies_are_unsuccessful() {
        let parsed: ClassificationResult =
            serde_json::from_str(r#"{"error": "Invalid file type"}"#).unwrap();
        assert!(!parsed.success);
        assert_eq!(parsed.error.as_deref(), Some("Invalid file type"));

        let parsed: TrainingResult = serde_json::from_str("{}").unwrap();
        assert!(!parsed.success);
        assert_eq!(parsed.error, None);
    }

    #[test]
    fn ignores_unknown_fields() {
        let parsed: TrainingResult = serde_json::from_str(
            r#"{"success": true, "message": "m", "note": "n", "job_id": 4}"#,
        )
        .unwrap();
        assert_eq!(parsed.message.as_deref(), Some("m"));
        assert_eq!(parsed.note.as_deref(), Some("n"));
    }
}
