use std::collections::HashSet;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::round4;

static POSITIVE_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "good", "great", "excellent", "amazing", "wonderful", "fantastic", "love", "like",
        "happy", "pleased", "satisfied", "perfect", "awesome", "brilliant", "outstanding",
        "superb", "thanks", "thank",
    ]
    .into_iter()
    .collect()
});

static NEGATIVE_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "bad", "terrible", "awful", "horrible", "poor", "disappointing", "hate", "dislike",
        "unhappy", "unsatisfied", "worst", "useless", "annoying", "frustrating", "problem",
        "issue", "error", "broken",
    ]
    .into_iter()
    .collect()
});

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SentimentResult {
    pub sentiment: Sentiment,
    pub score: f32,
    pub positive_words: usize,
    pub negative_words: usize,
}

/// Lexicon-based polarity scorer. Tokenizes by whitespace, lowercases, and
/// counts membership in the positive and negative word sets.
#[derive(Debug, Clone, Default)]
pub struct SentimentAnalyzer;

impl SentimentAnalyzer {
    pub fn new() -> Self {
        SentimentAnalyzer
    }

    pub fn analyze(&self, text: &str) -> SentimentResult {
        let lower = text.to_lowercase();
        let mut positive_count = 0;
        let mut negative_count = 0;
        for word in lower.split_whitespace() {
            if POSITIVE_WORDS.contains(word) {
                positive_count += 1;
            }
            if NEGATIVE_WORDS.contains(word) {
                negative_count += 1;
            }
        }

        let total = positive_count + negative_count;
        let (sentiment, score) = if total == 0 || positive_count == negative_count {
            (Sentiment::Neutral, 0.5)
        } else if positive_count > negative_count {
            (
                Sentiment::Positive,
                0.5 + positive_count as f32 / (total as f32 * 2.0),
            )
        } else {
            (
                Sentiment::Negative,
                0.5 - negative_count as f32 / (total as f32 * 2.0),
            )
        };

        SentimentResult {
            sentiment,
            score: round4(score),
            positive_words: positive_count,
            negative_words: negative_count,
        }
    }
}
