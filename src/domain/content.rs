use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Title and content submitted for validation or enhancement. Both fields are
/// optional on the wire so a missing one surfaces as `InvalidInput` instead of
/// a deserialization rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl ContentRequest {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: Some(content.into()),
        }
    }

    /// Borrow title and content, failing when either is absent or blank.
    pub fn require(&self) -> Result<(&str, &str)> {
        let title = self.title.as_deref().filter(|t| !t.trim().is_empty());
        let content = self.content.as_deref().filter(|c| !c.trim().is_empty());

        match (title, content) {
            (Some(title), Some(content)) => Ok((title, content)),
            _ => Err(AppError::InvalidInput(
                "Title and content are required".to_string(),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub score: f64,
    #[serde(default)]
    pub issues: Vec<String>,
    #[serde(default)]
    pub feedback: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancementResult {
    pub enhanced_title: String,
    pub enhanced_content: String,
    #[serde(default)]
    pub improvements: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_rejects_missing_or_blank_fields() {
        assert!(ContentRequest::default().require().is_err());
        assert!(ContentRequest::new("Title", "   ").require().is_err());
        assert!(matches!(
            ContentRequest { title: Some("Title".into()), content: None }.require(),
            Err(AppError::InvalidInput(_))
        ));
        assert_eq!(
            ContentRequest::new("Title", "Body").require().unwrap(),
            ("Title", "Body")
        );
    }

    #[test]
    fn validation_result_uses_camel_case_on_the_wire() {
        let result = ValidationResult {
            is_valid: true,
            score: 0.9,
            issues: vec![],
            feedback: "Looks good".into(),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["isValid"], true);
        assert_eq!(json["feedback"], "Looks good");
    }
}
