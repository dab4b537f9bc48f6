use std::sync::Arc;
use serde::Deserialize;

use crate::{
    domain::{ContentRequest, ValidationResult},
    error::{AppError, Result},
    integrations::{extract_json_object, TextGenerator},
};

/// Score reported when the classifier's answer cannot be read.
pub const FALLBACK_SCORE: f64 = 0.7;

const GUIDELINES: &[&str] = &[
    "No hate speech, harassment or discriminatory language",
    "No scams, fraudulent offers or misleading claims",
    "No explicit, sexual or violent content",
    "No personal data such as phone numbers, addresses or private emails",
    "Content must be on-topic for community announcements",
];

/// Verdict as the classifier writes it. `isValid` is mandatory; anything else
/// may be missing.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawVerdict {
    is_valid: bool,
    #[serde(default)]
    score: Option<f64>,
    #[serde(default)]
    issues: Vec<String>,
    #[serde(default)]
    feedback: Option<String>,
}

pub struct ValidationService {
    classifier: Arc<dyn TextGenerator>,
}

impl ValidationService {
    pub fn new(classifier: Arc<dyn TextGenerator>) -> Self {
        Self { classifier }
    }

    /// Ask the classifier whether an announcement meets the community guidelines.
    ///
    /// A classifier failure is returned as is. An answer that cannot be parsed
    /// degrades to [`fallback_verdict`] instead of failing.
    pub async fn validate(&self, request: &ContentRequest) -> Result<ValidationResult> {
        let (title, content) = request.require()?;

        let prompt = build_prompt(title, content);
        let text = self.classifier.generate(&prompt).await?;

        match parse_verdict(&text) {
            Ok(verdict) => {
                tracing::debug!(
                    "Classifier {} judged announcement valid={} score={}",
                    self.classifier.name(),
                    verdict.is_valid,
                    verdict.score
                );
                Ok(verdict)
            }
            Err(e) => {
                tracing::warn!("Falling back to basic validation: {}", e);
                Ok(fallback_verdict(title, content))
            }
        }
    }
}

fn build_prompt(title: &str, content: &str) -> String {
    let rules = GUIDELINES
        .iter()
        .enumerate()
        .map(|(i, rule)| format!("{}. {}", i + 1, rule))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are a content moderator for a community announcement board.\n\
         Check the announcement below against these guidelines:\n{rules}\n\n\
         Respond with a single JSON object and nothing else:\n\
         {{\"isValid\": boolean, \"score\": number between 0 and 1, \
         \"issues\": [list of guideline violations], \"feedback\": \"short explanation\"}}\n\n\
         Title: {title}\n\
         Content: {content}"
    )
}

/// Read the first JSON object in `text` as a verdict.
pub fn parse_verdict(text: &str) -> Result<ValidationResult> {
    let json = extract_json_object(text)
        .ok_or_else(|| AppError::Parse("Classifier response contains no JSON object".to_string()))?;

    let raw: RawVerdict = serde_json::from_str(json)
        .map_err(|e| AppError::Parse(format!("Invalid classifier verdict: {}", e)))?;

    let score = raw
        .score
        .filter(|s| s.is_finite())
        .unwrap_or(if raw.is_valid { 1.0 } else { 0.0 })
        .clamp(0.0, 1.0);

    Ok(ValidationResult {
        is_valid: raw.is_valid,
        score,
        issues: raw.issues,
        feedback: raw.feedback.unwrap_or_default(),
    })
}

/// Length-only verdict used when the classifier's answer is unreadable.
pub fn fallback_verdict(title: &str, content: &str) -> ValidationResult {
    let title_ok = title.chars().count() > 3;
    let content_ok = content.chars().count() > 10;

    let mut issues = Vec::new();
    if !title_ok {
        issues.push("Title is too short".to_string());
    }
    if !content_ok {
        issues.push("Content is too short".to_string());
    }

    ValidationResult {
        is_valid: title_ok && content_ok,
        score: FALLBACK_SCORE,
        issues,
        feedback: "Basic validation completed. Detailed validation failed, so only length checks were applied."
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_rejects_short_title() {
        let verdict = fallback_verdict("Hi", "short");
        assert!(!verdict.is_valid);
        assert_eq!(verdict.score, FALLBACK_SCORE);
        assert!(!verdict.feedback.is_empty());
        assert_eq!(verdict.issues.len(), 2);
    }

    #[test]
    fn fallback_accepts_reasonable_lengths() {
        let verdict = fallback_verdict(
            "New Partnership Announcement",
            "We are thrilled to announce...",
        );
        assert!(verdict.is_valid);
        assert_eq!(verdict.score, 0.7);
        assert!(verdict.issues.is_empty());
    }

    #[test]
    fn fallback_boundaries_are_strict() {
        assert!(!fallback_verdict("Four", "exactly10!").is_valid);
        assert!(fallback_verdict("Four", "eleven char").is_valid);
        assert!(!fallback_verdict("abc", "a long enough body").is_valid);
    }

    #[test]
    fn parses_verdict_inside_prose_and_clamps_score() {
        let text = "Here you go:\n{\"isValid\": false, \"score\": 1.7, \"issues\": [\"Contains a phone number\"], \"feedback\": \"Remove personal data\"}";
        let verdict = parse_verdict(text).unwrap();
        assert!(!verdict.is_valid);
        assert_eq!(verdict.score, 1.0);
        assert_eq!(verdict.issues, vec!["Contains a phone number".to_string()]);
    }

    #[test]
    fn verdict_without_is_valid_is_a_parse_error() {
        assert!(matches!(
            parse_verdict("{\"score\": 0.4}"),
            Err(AppError::Parse(_))
        ));
        assert!(matches!(parse_verdict("looks fine to me"), Err(AppError::Parse(_))));
    }

    #[test]
    fn prompt_names_every_guideline() {
        let prompt = build_prompt("Title", "Body");
        for rule in GUIDELINES {
            assert!(prompt.contains(rule));
        }
        assert!(prompt.contains("Title: Title"));
    }
}
