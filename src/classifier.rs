use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::catalog::IntentCatalog;
use crate::entities::{BUDGET_KEYWORDS, INDUSTRY_KEYWORDS, PLATFORM_KEYWORDS};
use crate::round4;

/// Tag emitted when no intent clears the confidence threshold.
pub const UNKNOWN_INTENT: &str = "unknown";

/// Scores below this cutoff are routed to the unknown intent. Fixed
/// threshold, trading recall for fewer false-positive routings on weak
/// pattern collisions.
const CONFIDENCE_THRESHOLD: f32 = 0.3;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    pub intent: String,
    pub confidence: f32,
}

impl ClassificationResult {
    fn unknown() -> Self {
        ClassificationResult {
            intent: UNKNOWN_INTENT.to_string(),
            confidence: 0.0,
        }
    }
}

/// Pattern-matching intent classifier. Scores the message against every
/// pattern of every catalog entry with three strategies, strongest first:
/// exact match (1.0), substring match (0.8), and word-set overlap.
pub struct IntentClassifier {
    catalog: Arc<IntentCatalog>,
}

impl IntentClassifier {
    pub fn new(catalog: Arc<IntentCatalog>) -> Self {
        log::info!("Intent classifier ready with {} intents", catalog.len());
        IntentClassifier { catalog }
    }

    /// Picks the best-matching intent for the message, or the unknown
    /// sentinel when the best score does not clear the threshold.
    pub fn predict(&self, text: &str) -> ClassificationResult {
        let message = text.trim().to_lowercase();
        let message_words: HashSet<&str> = message.split_whitespace().collect();

        let mut best_tag: Option<&str> = None;
        let mut best_score = 0.0f32;

        for intent in self.catalog.intents() {
            let mut score = 0.0f32;
            for pattern in &intent.patterns {
                let pattern = pattern.to_lowercase();
                if pattern == message {
                    score = 1.0;
                    break;
                } else if message.contains(&pattern) {
                    score = score.max(0.8);
                } else {
                    let pattern_words: HashSet<&str> = pattern.split_whitespace().collect();
                    let overlap = pattern_words.intersection(&message_words).count();
                    if overlap > 0 {
                        let denominator = pattern_words.len().max(message_words.len());
                        score = score.max(overlap as f32 / denominator as f32);
                    }
                }
            }
            // Strictly greater: on ties the earlier catalog entry wins.
            if score > best_score {
                best_score = score;
                best_tag = Some(intent.tag.as_str());
            }
        }

        match best_tag {
            Some(tag) if best_score > CONFIDENCE_THRESHOLD => ClassificationResult {
                intent: tag.to_string(),
                confidence: round4(best_score),
            },
            _ => ClassificationResult::unknown(),
        }
    }

    /// Classifies the message and derives keyword entities from it.
    pub fn classify(&self, text: &str) -> (String, f32, Option<HashMap<String, Value>>) {
        let result = self.predict(text);
        let entities = keyword_entities(text);
        (result.intent, result.confidence, entities)
    }
}

/// Derives at most one entity per keyword category; the first keyword in
/// table order wins. Returns None when nothing matched.
fn keyword_entities(text: &str) -> Option<HashMap<String, Value>> {
    let lower = text.to_lowercase();
    let mut entities = HashMap::new();

    if let Some(industry) = INDUSTRY_KEYWORDS.iter().find(|k| lower.contains(*k)) {
        entities.insert("industry".to_string(), Value::String(industry.to_string()));
    }
    if let Some(platform) = PLATFORM_KEYWORDS.iter().find(|k| lower.contains(*k)) {
        entities.insert("platform".to_string(), Value::String(platform.to_string()));
    }
    if BUDGET_KEYWORDS.iter().any(|k| lower.contains(k)) {
        entities.insert("budget_related".to_string(), Value::Bool(true));
    }

    if entities.is_empty() {
        None
    } else {
        Some(entities)
    }
}
