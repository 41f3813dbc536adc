use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;

use crate::catalog::IntentCatalog;
use crate::classifier::IntentClassifier;
use crate::entities::EntityExtractor;
use crate::responder::ResponseGenerator;
use crate::sentiment::{SentimentAnalyzer, SentimentResult};

/// Combined result of one pipeline run.
#[derive(Serialize, Debug)]
pub struct ChatOutcome {
    pub response: String,
    pub intent: String,
    pub confidence: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entities: Option<HashMap<String, Value>>,
    pub sentiment: SentimentResult,
    pub suggestions: Vec<String>,
}

/// Request-scoped coordinator of the NLU stages. All components are built
/// eagerly at construction and are immutable afterwards, so the pipeline can
/// be shared freely across request handlers.
pub struct ChatPipeline {
    catalog: Arc<IntentCatalog>,
    extractor: EntityExtractor,
    classifier: IntentClassifier,
    analyzer: SentimentAnalyzer,
    generator: ResponseGenerator,
}

impl ChatPipeline {
    pub fn new(catalog: IntentCatalog) -> Self {
        let catalog = Arc::new(catalog);
        ChatPipeline {
            extractor: EntityExtractor::new(),
            classifier: IntentClassifier::new(catalog.clone()),
            analyzer: SentimentAnalyzer::new(),
            generator: ResponseGenerator::new(catalog.clone()),
            catalog,
        }
    }

    /// Builds the pipeline from a catalog document, substituting the built-in
    /// catalog when the document is unusable.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        Self::new(IntentCatalog::load(path))
    }

    /// Builds the pipeline with a seeded response generator, for
    /// reproducible output.
    pub fn with_seed(catalog: IntentCatalog, seed: u64) -> Self {
        let catalog = Arc::new(catalog);
        ChatPipeline {
            extractor: EntityExtractor::new(),
            classifier: IntentClassifier::new(catalog.clone()),
            analyzer: SentimentAnalyzer::new(),
            generator: ResponseGenerator::with_seed(catalog.clone(), seed),
            catalog,
        }
    }

    /// Runs the full pipeline over one message: entity extraction, intent
    /// classification (classifier entities override extractor entities on
    /// key collision), sentiment analysis, then response generation with a
    /// sentiment-augmented copy of the caller's context.
    pub fn handle(
        &self,
        message: &str,
        context: &HashMap<String, Value>,
    ) -> Result<ChatOutcome> {
        let mut entities = self.extractor.entity_map(message);

        let (intent, confidence, classifier_entities) = self.classifier.classify(message);
        if let Some(extra) = classifier_entities {
            entities.extend(extra);
        }

        let sentiment = self.analyzer.analyze(message);

        let mut generation_context = context.clone();
        generation_context.insert(
            "sentiment".to_string(),
            Value::String(sentiment.sentiment.as_str().to_string()),
        );

        // Callers branch on presence: an empty mapping is reported as absent.
        let entities = if entities.is_empty() {
            None
        } else {
            Some(entities)
        };

        let response = self
            .generator
            .generate(&intent, entities.as_ref(), &generation_context);
        let suggestions = self.generator.suggestions(&intent);

        Ok(ChatOutcome {
            response,
            intent,
            confidence,
            entities,
            sentiment,
            suggestions,
        })
    }

    /// Readiness signal for the transport layer: components are constructed
    /// and the catalog holds at least one intent.
    pub fn ready(&self) -> bool {
        !self.catalog.is_empty()
    }

    /// True when the built-in catalog was substituted for the configured one.
    pub fn used_default_catalog(&self) -> bool {
        self.catalog.from_defaults()
    }

    pub fn intent_count(&self) -> usize {
        self.catalog.len()
    }
}
