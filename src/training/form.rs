use serde::Serialize;

use crate::errors::ValidationError;

/// Raw text of the training form fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TrainingForm {
    pub dataset_path: String,
    pub epochs: String,
    pub batch_size: String,
}

impl TrainingForm {
    /// Prefill the form from numeric defaults.
    pub fn with_defaults(dataset_path: impl Into<String>, epochs: u32, batch_size: u32) -> Self {
        Self {
            dataset_path: dataset_path.into(),
            epochs: epochs.to_string(),
            batch_size: batch_size.to_string(),
        }
    }

    /// Turn the form into a request. Only the dataset path is required.
    ///
    /// A numeric field without a leading integer is sent as `null`.
    pub fn to_request(&self) -> Result<TrainingRequest, ValidationError> {
        if self.dataset_path.is_empty() {
            return Err(ValidationError::MissingDatasetPath);
        }
        Ok(TrainingRequest {
            dataset_path: self.dataset_path.clone(),
            epochs: parse_int_prefix(&self.epochs),
            batch_size: parse_int_prefix(&self.batch_size),
        })
    }
}

/// JSON body sent to the training endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TrainingRequest {
    pub dataset_path: String,
    pub epochs: Option<i64>,
    pub batch_size: Option<i64>,
}

/// Parse the leading integer of a field, ignoring anything after the digits.
///
/// `" 12 epochs"` parses as 12; a field without leading digits yields `None`.
pub fn parse_int_prefix(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let value: i64 = rest[..digits_len].parse().ok()?;
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(path: &str, epochs: &str, batch: &str) -> TrainingForm {
        TrainingForm {
            dataset_path: path.to_string(),
            epochs: epochs.to_string(),
            batch_size: batch.to_string(),
        }
    }

    #[test]
    fn empty_dataset_path_is_rejected_first() {
        let err = form("", "not a number", "").to_request().unwrap_err();
        assert!(matches!(err, ValidationError::MissingDatasetPath));
        assert_eq!(err.to_string(), "Please provide a dataset path");
    }

    #[test]
    fn builds_request_with_parsed_integers() {
        let request = form("/data/civic", "20", " 64").to_request().unwrap();
        assert_eq!(
            request,
            TrainingRequest {
                dataset_path: "/data/civic".to_string(),
                epochs: Some(20),
                batch_size: Some(64),
            }
        );
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"dataset_path": "/data/civic", "epochs": 20, "batch_size": 64})
        );
    }

    #[test]
    fn unparseable_numbers_are_sent_as_null() {
        let request = form("d", "ten", "").to_request().unwrap();
        assert_eq!(request.epochs, None);
        assert_eq!(request.batch_size, None);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"dataset_path": "d", "epochs": null, "batch_size": null})
        );
    }

    #[test]
    fn int_prefix_parsing_ignores_trailing_text() {
        assert_eq!(parse_int_prefix("12abc"), Some(12));
        assert_eq!(parse_int_prefix("  7.9"), Some(7));
        assert_eq!(parse_int_prefix("-3"), Some(-3));
        assert_eq!(parse_int_prefix("+5"), Some(5));
        assert_eq!(parse_int_prefix("-"), None);
        assert_eq!(parse_int_prefix("abc"), None);
        assert_eq!(parse_int_prefix("99999999999999999999"), None);
    }

    #[test]
    fn defaults_prefill_numeric_text() {
        let form = TrainingForm::with_defaults("data", 10, 32);
        assert_eq!(form.epochs, "10");
        assert_eq!(form.batch_size, "32");
    }
}
