//! Request DTOs for the fingerprint cache API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use crate::cache::{MAX_BATCH_SIZE, MAX_FINGERPRINT_LENGTH, MAX_LABEL_LENGTH};

/// Request body for recording a sighting (PUT /seen)
///
/// # Fields
/// - `fingerprint`: Content hash or normalized URL computed by the caller
/// - `label`: Optional origin of the sighting (channel, message id, ...)
#[derive(Debug, Clone, Deserialize)]
pub struct SeenRequest {
    pub fingerprint: String,
    #[serde(default)]
    pub label: Option<String>,
}

impl SeenRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.fingerprint.is_empty() {
            return Some("Fingerprint cannot be empty".to_string());
        }
        if self.fingerprint.len() > MAX_FINGERPRINT_LENGTH {
            return Some(format!(
                "Fingerprint exceeds maximum length of {} bytes",
                MAX_FINGERPRINT_LENGTH
            ));
        }
        if let Some(label) = &self.label {
            if label.len() > MAX_LABEL_LENGTH {
                return Some(format!(
                    "Label exceeds maximum length of {} bytes",
                    MAX_LABEL_LENGTH
                ));
            }
        }
        None
    }
}

/// Request body for recording several sightings (PUT /seen/batch)
///
/// Items are applied in order; duplicates inside the batch are rejected
/// like any other repeat.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchSeenRequest {
    pub items: Vec<SeenRequest>,
}

impl BatchSeenRequest {
    /// Validates the batch and every item in it.
    pub fn validate(&self) -> Option<String> {
        if self.items.is_empty() {
            return Some("Batch cannot be empty".to_string());
        }
        if self.items.len() > MAX_BATCH_SIZE {
            return Some(format!(
                "Batch exceeds maximum size of {} items",
                MAX_BATCH_SIZE
            ));
        }
        self.items
            .iter()
            .enumerate()
            .find_map(|(i, item)| item.validate().map(|msg| format!("Item {}: {}", i, msg)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seen(fingerprint: &str) -> SeenRequest {
        SeenRequest {
            fingerprint: fingerprint.to_string(),
            label: None,
        }
    }

    #[test]
    fn test_seen_request_deserialize() {
        let json = r#"{"fingerprint": "abc123"}"#;
        let req: SeenRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.fingerprint, "abc123");
        assert!(req.label.is_none());
    }

    #[test]
    fn test_seen_request_with_label() {
        let json = r#"{"fingerprint": "abc123", "label": "memes"}"#;
        let req: SeenRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.label.as_deref(), Some("memes"));
    }

    #[test]
    fn test_validate_empty_fingerprint() {
        assert!(seen("").validate().is_some());
    }

    #[test]
    fn test_validate_long_fingerprint() {
        let req = seen(&"f".repeat(MAX_FINGERPRINT_LENGTH + 1));
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_validate_long_label() {
        let req = SeenRequest {
            fingerprint: "abc".to_string(),
            label: Some("l".repeat(MAX_LABEL_LENGTH + 1)),
        };
        assert!(req.validate().unwrap().contains("Label"));
    }

    #[test]
    fn test_validate_valid_request() {
        assert!(seen("https://example.com/article").validate().is_none());
    }

    #[test]
    fn test_batch_validate() {
        let empty = BatchSeenRequest { items: vec![] };
        assert!(empty.validate().is_some());

        let bad_item = BatchSeenRequest {
            items: vec![seen("ok"), seen("")],
        };
        assert!(bad_item.validate().unwrap().starts_with("Item 1"));

        let good = BatchSeenRequest {
            items: vec![seen("a"), seen("b")],
        };
        assert!(good.validate().is_none());
    }
}
