use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde::Serialize;
use serde_json::Value;

/// Domain keyword tables, shared between the entity extractor's keyword pass
/// and the classifier's entity derivation.
pub(crate) const INDUSTRY_KEYWORDS: &[&str] = &[
    "tech", "fashion", "beauty", "fitness", "food", "travel", "gaming", "music", "sports",
    "health",
];
pub(crate) const PLATFORM_KEYWORDS: &[&str] = &[
    "instagram", "youtube", "tiktok", "twitter", "facebook", "linkedin",
];
pub(crate) const BUDGET_KEYWORDS: &[&str] = &[
    "budget", "price", "cost", "payment", "fee", "cheap", "expensive", "affordable",
];

const KEYWORD_CATEGORIES: &[(&str, &[&str])] = &[
    ("industry", INDUSTRY_KEYWORDS),
    ("platform", PLATFORM_KEYWORDS),
    ("budget", BUDGET_KEYWORDS),
];

static PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    [
        ("email", r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b"),
        ("phone", r"\b\d{3}[-.]?\d{3}[-.]?\d{4}\b"),
        ("url", r"https?://[A-Za-z0-9$\-_@.&+!*(),%/:~#=?]+"),
        ("money", r"\$\d+(?:,\d{3})*(?:\.\d{2})?"),
        ("date", r"\b\d{1,2}[/-]\d{1,2}[/-]\d{2,4}\b"),
    ]
    .iter()
    .map(|(label, pattern)| {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .expect("invalid built-in entity pattern");
        (*label, regex)
    })
    .collect()
});

/// A labeled span found in the message text.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ExtractedEntity {
    pub text: String,
    pub label: String,
    pub start: usize,
    pub end: usize,
}

/// Rule-based entity extractor: fixed regex categories plus domain keywords.
#[derive(Debug, Clone, Default)]
pub struct EntityExtractor;

impl EntityExtractor {
    pub fn new() -> Self {
        EntityExtractor
    }

    /// Extracts all entities from the text. Pattern matches carry exact byte
    /// offsets into the original text; keyword matches report the first
    /// occurrence only. Both passes may report overlapping spans.
    pub fn extract(&self, text: &str) -> Vec<ExtractedEntity> {
        let mut entities = Vec::new();

        for (label, regex) in PATTERNS.iter() {
            for found in regex.find_iter(text) {
                entities.push(ExtractedEntity {
                    text: found.as_str().to_string(),
                    label: label.to_string(),
                    start: found.start(),
                    end: found.end(),
                });
            }
        }

        let text_lower = text.to_lowercase();
        for (label, keywords) in KEYWORD_CATEGORIES {
            for keyword in *keywords {
                if let Some(start) = text_lower.find(keyword) {
                    entities.push(ExtractedEntity {
                        text: keyword.to_string(),
                        label: label.to_string(),
                        start,
                        end: start + keyword.len(),
                    });
                }
            }
        }

        entities
    }

    /// Folds the extracted spans into a label → text mapping; later spans of
    /// the same label overwrite earlier ones.
    pub fn entity_map(&self, text: &str) -> HashMap<String, Value> {
        self.extract(text)
            .into_iter()
            .map(|entity| (entity.label, Value::String(entity.text)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels_of(entities: &[ExtractedEntity], label: &str) -> Vec<String> {
        entities
            .iter()
            .filter(|e| e.label == label)
            .map(|e| e.text.clone())
            .collect()
    }

    #[test]
    fn extracts_email_with_offsets() {
        let text = "reach me at jane.doe@example.com please";
        let entities = EntityExtractor::new().extract(text);
        let email = entities.iter().find(|e| e.label == "email").unwrap();
        assert_eq!(email.text, "jane.doe@example.com");
        assert_eq!(&text[email.start..email.end], "jane.doe@example.com");
    }

    #[test]
    fn extracts_phone_money_and_date() {
        let entities =
            EntityExtractor::new().extract("call 555-123-4567 about the $1,200.50 deal on 12/05/2024");
        assert_eq!(labels_of(&entities, "phone"), vec!["555-123-4567"]);
        assert_eq!(labels_of(&entities, "money"), vec!["$1,200.50"]);
        assert_eq!(labels_of(&entities, "date"), vec!["12/05/2024"]);
    }

    #[test]
    fn extracts_url() {
        let entities = EntityExtractor::new().extract("my page is https://example.com/profile");
        assert_eq!(labels_of(&entities, "url"), vec!["https://example.com/profile"]);
    }

    #[test]
    fn keyword_pass_reports_first_occurrence_only() {
        let text = "Instagram or instagram, still instagram";
        let entities = EntityExtractor::new().extract(text);
        let platforms: Vec<_> = entities.iter().filter(|e| e.label == "platform").collect();
        assert_eq!(platforms.len(), 1);
        assert_eq!(platforms[0].start, 0);
        assert_eq!(platforms[0].text, "instagram");
    }

    #[test]
    fn keyword_pass_finds_industry_and_budget_terms() {
        let entities = EntityExtractor::new().extract("what's the budget for my tech campaign?");
        assert_eq!(labels_of(&entities, "industry"), vec!["tech"]);
        assert_eq!(labels_of(&entities, "budget"), vec!["budget"]);
    }

    #[test]
    fn offsets_are_valid_spans() {
        let text = "email me@here.io, budget is $500, visit http://x.io on 1-2-25";
        for entity in EntityExtractor::new().extract(text) {
            assert!(entity.start < entity.end);
            assert!(entity.end <= text.len());
        }
    }

    #[test]
    fn extraction_is_deterministic() {
        let extractor = EntityExtractor::new();
        let text = "find tech influencers on youtube, budget $2,000";
        assert_eq!(extractor.extract(text), extractor.extract(text));
    }

    #[test]
    fn empty_input_yields_nothing() {
        let extractor = EntityExtractor::new();
        assert!(extractor.extract("").is_empty());
        assert!(extractor.extract("   \t  ").is_empty());
    }

    #[test]
    fn entity_map_keys_by_label() {
        let map = EntityExtractor::new().entity_map("tech brands on instagram");
        assert_eq!(map.get("industry"), Some(&Value::String("tech".into())));
        assert_eq!(map.get("platform"), Some(&Value::String("instagram".into())));
        assert!(map.get("email").is_none());
    }
}
