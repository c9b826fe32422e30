//! Word-frequency extraction for the feedback word cloud.
//!
//! # Responsibility
//! - Tokenize comments and drop short/stop words.
//! - Attribute each occurrence the sentiment of its parent feedback.
//!
//! # Invariants
//! - Output is sorted by count descending; ties keep first-seen order.
//! - Output never exceeds [`MAX_WORDS`] entries.
//! - Every call recomputes from the given snapshot.

use crate::analytics::sentiment::SentimentBucket;
use crate::model::feedback::Feedback;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Maximum number of words returned by [`analyze`].
pub const MAX_WORDS: usize = 35;
/// Tokens shorter than this are dropped.
pub const MIN_WORD_LEN: usize = 3;

static NON_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9A-Za-z_\s]").expect("valid non-word regex"));

static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "an", "the", "and", "but", "or", "for", "nor", "on", "at", "to", "from", "by", "i",
        "me", "my", "mine", "we", "us", "our", "ours", "you", "your", "yours", "he", "him", "his",
        "she", "her", "hers", "they", "them", "their", "theirs", "it", "its", "this", "that",
        "these", "those", "is", "was", "are", "were", "be", "been", "being", "have", "has", "had",
        "do", "does", "did", "will", "would", "shall", "should", "can", "could", "of", "with",
        "in", "out", "about", "during", "before", "after", "above", "below", "up", "down", "very",
    ]
    .into_iter()
    .collect()
});

/// One word-cloud entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordStat {
    pub text: String,
    pub count: usize,
    /// Mean sentiment of the feedback items the word occurred in,
    /// weighted by occurrence.
    pub mean_sentiment: f64,
    /// `count / max count in the result`, in `(0, 1]`.
    pub relative_weight: f64,
}

impl WordStat {
    /// Polarity used to colour the word.
    pub fn tone(&self) -> SentimentBucket {
        SentimentBucket::classify(self.mean_sentiment)
    }

    /// Whether the word occurs more than half as often as the top word.
    pub fn is_emphasized(&self) -> bool {
        self.relative_weight > 0.5
    }
}

/// Returns whether `word` is in the closed stop-word list.
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

/// Lowercases `comment`, strips non-word characters and splits on whitespace.
///
/// Short words and stop words are still present; [`analyze`] filters them.
pub fn tokenize(comment: &str) -> Vec<String> {
    let lowered = comment.to_lowercase();
    NON_WORD_RE
        .replace_all(&lowered, "")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

struct WordAccumulator {
    text: String,
    count: usize,
    sentiment_sum: f64,
}

/// Extracts the most frequent salient words from `feedback` comments.
pub fn analyze(feedback: &[Feedback]) -> Vec<WordStat> {
    let mut words: Vec<WordAccumulator> = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();

    for item in feedback.iter().filter(|item| !item.comment.is_empty()) {
        for token in tokenize(&item.comment) {
            if token.len() < MIN_WORD_LEN || is_stop_word(&token) {
                continue;
            }

            match slots.get(&token) {
                Some(&slot) => {
                    let word = &mut words[slot];
                    word.count += 1;
                    word.sentiment_sum += item.sentiment_score;
                }
                None => {
                    slots.insert(token.clone(), words.len());
                    words.push(WordAccumulator {
                        text: token,
                        count: 1,
                        sentiment_sum: item.sentiment_score,
                    });
                }
            }
        }
    }

    words.sort_by(|left, right| right.count.cmp(&left.count));
    words.truncate(MAX_WORDS);

    let max_count = words.first().map_or(1, |word| word.count) as f64;
    words
        .into_iter()
        .map(|word| WordStat {
            mean_sentiment: word.sentiment_sum / word.count as f64,
            relative_weight: word.count as f64 / max_count,
            count: word.count,
            text: word.text,
        })
        .collect()
}
