use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde_json::Value;

use crate::catalog::IntentCatalog;
use crate::classifier::UNKNOWN_INTENT;

/// Fallback of last resort when even the unknown tag has no templates.
const GENERIC_RESPONSE: &str = "I'm here to help! How can I assist you?";

/// Template-based response generator. Template choice is random by design;
/// the generator is seedable so tests can pin the sequence.
pub struct ResponseGenerator {
    catalog: Arc<IntentCatalog>,
    rng: Mutex<StdRng>,
}

impl ResponseGenerator {
    pub fn new(catalog: Arc<IntentCatalog>) -> Self {
        Self::with_rng(catalog, StdRng::from_entropy())
    }

    pub fn with_seed(catalog: Arc<IntentCatalog>, seed: u64) -> Self {
        Self::with_rng(catalog, StdRng::seed_from_u64(seed))
    }

    fn with_rng(catalog: Arc<IntentCatalog>, rng: StdRng) -> Self {
        ResponseGenerator {
            catalog,
            rng: Mutex::new(rng),
        }
    }

    /// Picks a response template for the intent, falling back to the unknown
    /// tag's templates when the intent is absent from the catalog. A
    /// non-empty `user_name` in the context prefixes the reply.
    pub fn generate(
        &self,
        intent: &str,
        entities: Option<&HashMap<String, Value>>,
        context: &HashMap<String, Value>,
    ) -> String {
        log::debug!(
            "Generating '{}' response ({} entities)",
            intent,
            entities.map(HashMap::len).unwrap_or(0)
        );

        let templates = self
            .catalog
            .get(intent)
            .filter(|definition| !definition.responses.is_empty())
            .or_else(|| self.catalog.get(UNKNOWN_INTENT))
            .map(|definition| definition.responses.as_slice())
            .filter(|responses| !responses.is_empty());

        let response = match templates {
            Some(responses) => responses
                .choose(&mut *self.rng.lock())
                .cloned()
                .unwrap_or_else(|| GENERIC_RESPONSE.to_string()),
            None => GENERIC_RESPONSE.to_string(),
        };

        match context.get("user_name").and_then(Value::as_str) {
            Some(name) if !name.is_empty() => format!("{}, {}", name, response),
            _ => response,
        }
    }

    /// Static follow-up prompts keyed by intent.
    pub fn suggestions(&self, intent: &str) -> Vec<String> {
        let prompts: &[&str] = match intent {
            "greeting" => &["Find matches for me", "Show my performance", "Help me collaborate"],
            "find_matches" => &["Show me top matches", "Filter by industry", "View match details"],
            "collaboration" => &["View my requests", "Send a message", "Schedule a meeting"],
            "performance" => &["Show detailed analytics", "Compare with others", "Export report"],
            "help" => &["Find matches", "View analytics", "Send collaboration request"],
            _ => &["Find matches", "View performance", "Get help"],
        };
        prompts.iter().map(|prompt| prompt.to_string()).collect()
    }
}
