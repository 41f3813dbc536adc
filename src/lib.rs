mod catalog;
mod classifier;
mod entities;
mod pipeline;
mod responder;
mod sentiment;

pub use crate::catalog::{IntentCatalog, IntentDefinition};
pub use crate::classifier::{ClassificationResult, IntentClassifier, UNKNOWN_INTENT};
pub use crate::entities::{EntityExtractor, ExtractedEntity};
pub use crate::pipeline::{ChatOutcome, ChatPipeline};
pub use crate::responder::ResponseGenerator;
pub use crate::sentiment::{Sentiment, SentimentAnalyzer, SentimentResult};

/// Rounds a score to 4 decimal places for stable output.
pub(crate) fn round4(value: f32) -> f32 {
    (value * 10_000.0).round() / 10_000.0
}
