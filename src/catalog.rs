use std::collections::HashMap;
use std::fs::read_to_string;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// One intent entry of the catalog: trigger patterns plus candidate responses.
#[derive(Deserialize, Debug, Clone)]
pub struct IntentDefinition {
    pub tag: String,
    #[serde(default)]
    pub patterns: Vec<String>,
    #[serde(default)]
    pub responses: Vec<String>,
}

#[derive(Deserialize)]
struct CatalogDocument {
    intents: Vec<IntentDefinition>,
}

/// The full set of intent definitions, loaded once and immutable afterwards.
///
/// Keeps the definitions in document order (matching order matters for
/// tie-breaking) plus a derived tag index for O(1) lookup.
#[derive(Debug, Clone)]
pub struct IntentCatalog {
    intents: Vec<IntentDefinition>,
    by_tag: HashMap<String, usize>,
    from_defaults: bool,
}

impl IntentCatalog {
    /// Loads the catalog from a JSON document. Any failure (missing file,
    /// parse error, missing `intents` key) falls back to the built-in
    /// catalog so the pipeline is never left without intents.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        match Self::read_document(path.as_ref()) {
            Ok(intents) => {
                log::info!("Loaded {} intents from {:?}", intents.len(), path.as_ref());
                Self::from_intents(intents, false)
            }
            Err(err) => {
                log::warn!(
                    "Could not load intent catalog from {:?} ({:#}), using built-in defaults",
                    path.as_ref(),
                    err
                );
                Self::defaults()
            }
        }
    }

    /// The built-in catalog, used whenever no external document is usable.
    pub fn defaults() -> Self {
        Self::from_intents(default_intents(), true)
    }

    /// Builds a catalog from definitions supplied by the caller.
    pub fn from_definitions(intents: Vec<IntentDefinition>) -> Self {
        Self::from_intents(intents, false)
    }

    fn read_document(path: &Path) -> Result<Vec<IntentDefinition>> {
        let content = read_to_string(path)
            .with_context(|| format!("cannot read intent catalog file {:?}", path))?;
        parse_document(&content)
    }

    fn from_intents(mut intents: Vec<IntentDefinition>, from_defaults: bool) -> Self {
        // The unknown tag is the fallback of last resort; guarantee it even
        // when a loaded document omits it.
        if !intents.iter().any(|intent| intent.tag == "unknown") {
            if let Some(unknown) = default_intents().into_iter().find(|i| i.tag == "unknown") {
                intents.push(unknown);
            }
        }
        let mut by_tag = HashMap::new();
        for (index, intent) in intents.iter().enumerate() {
            if by_tag.contains_key(&intent.tag) {
                log::warn!("Duplicate intent tag '{}', keeping the first entry", intent.tag);
                continue;
            }
            by_tag.insert(intent.tag.clone(), index);
        }
        IntentCatalog {
            intents,
            by_tag,
            from_defaults,
        }
    }

    pub fn get(&self, tag: &str) -> Option<&IntentDefinition> {
        self.by_tag.get(tag).map(|&index| &self.intents[index])
    }

    pub fn intents(&self) -> &[IntentDefinition] {
        &self.intents
    }

    pub fn len(&self) -> usize {
        self.intents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }

    /// True when the built-in catalog was substituted for the configured one.
    pub fn from_defaults(&self) -> bool {
        self.from_defaults
    }
}

fn parse_document(content: &str) -> Result<Vec<IntentDefinition>> {
    let document: CatalogDocument =
        serde_json::from_str(content).context("cannot deserialize intent catalog json")?;
    Ok(document.intents)
}

fn default_intents() -> Vec<IntentDefinition> {
    let raw: &[(&str, &[&str], &[&str])] = &[
        (
            "greeting",
            &["hi", "hello", "hey", "good morning", "good afternoon", "what's up"],
            &[
                "Hello! 👋 How can I help you today?",
                "Hi there! What can I do for you?",
                "Hey! Ready to find your perfect match?",
            ],
        ),
        (
            "find_matches",
            &[
                "find matches",
                "show matches",
                "who can i work with",
                "find influencers",
                "find companies",
            ],
            &[
                "I can help you find perfect matches! Let me check your profile and suggest the best options.",
                "Great! Based on your profile, I'll find the most compatible matches for you.",
            ],
        ),
        (
            "collaboration",
            &["send collaboration", "work together", "start project", "collaborate"],
            &[
                "I can help you send a collaboration request! Which match would you like to reach out to?",
                "Let's get you connected! Tell me more about the collaboration you have in mind.",
            ],
        ),
        (
            "performance",
            &["show stats", "my performance", "analytics", "how am i doing"],
            &[
                "Let me pull up your performance metrics! 📊",
                "Here's a quick overview of your performance...",
            ],
        ),
        (
            "help",
            &["help", "how does this work", "what can you do", "guide"],
            &[
                "I'm here to help! I can assist you with:\n• Finding perfect matches\n• Sending collaboration requests\n• Viewing your analytics\n• Managing your profile\n\nWhat would you like to know more about?",
            ],
        ),
        (
            "unknown",
            &[],
            &[
                "I'm not sure I understand. Could you rephrase that?",
                "I'm here to help! Try asking about matches, collaborations, or your performance.",
                "I didn't quite get that. You can ask me about finding matches, sending collaboration requests, or viewing your stats.",
            ],
        ),
    ];
    raw.iter()
        .map(|(tag, patterns, responses)| IntentDefinition {
            tag: tag.to_string(),
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
            responses: responses.iter().map(|r| r.to_string()).collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_required_tags() {
        let catalog = IntentCatalog::defaults();
        for tag in [
            "greeting",
            "find_matches",
            "collaboration",
            "performance",
            "help",
            "unknown",
        ] {
            assert!(catalog.get(tag).is_some(), "missing default tag '{}'", tag);
        }
        assert!(catalog.from_defaults());
        assert!(!catalog.get("unknown").unwrap().responses.is_empty());
    }

    #[test]
    fn default_tags_are_unique() {
        let catalog = IntentCatalog::defaults();
        let mut seen = std::collections::HashSet::new();
        for intent in catalog.intents() {
            assert!(seen.insert(intent.tag.clone()), "duplicate tag '{}'", intent.tag);
        }
    }

    #[test]
    fn load_falls_back_on_missing_file() {
        let catalog = IntentCatalog::load("no/such/intents.json");
        assert!(catalog.from_defaults());
        assert!(catalog.get("greeting").is_some());
    }

    #[test]
    fn parse_rejects_document_without_intents_key() {
        assert!(parse_document(r#"{"tags": []}"#).is_err());
        assert!(parse_document("not json at all").is_err());
    }

    #[test]
    fn parse_accepts_minimal_document() {
        let intents = parse_document(
            r#"{"intents": [{"tag": "greeting", "patterns": ["hi"], "responses": ["Hello!"]}]}"#,
        )
        .unwrap();
        assert_eq!(intents.len(), 1);
        assert_eq!(intents[0].tag, "greeting");
    }

    #[test]
    fn loaded_catalog_is_completed_with_unknown_tag() {
        let intents = parse_document(
            r#"{"intents": [{"tag": "greeting", "patterns": ["hi"], "responses": ["Hello!"]}]}"#,
        )
        .unwrap();
        let catalog = IntentCatalog::from_intents(intents, false);
        assert!(!catalog.from_defaults());
        let unknown = catalog.get("unknown").expect("unknown tag must be appended");
        assert!(!unknown.responses.is_empty());
    }
}
