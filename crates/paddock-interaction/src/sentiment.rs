//! Lexical sentiment classification for fan comments.
//!
//! The engine treats sentiment analysis as an optional capability: a
//! missing analyzer degrades to `Positive`, never to an error.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum_macros::{Display, EnumString};

/// Detected sentiment of a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

/// Capability interface for sentiment classification.
pub trait SentimentAnalyzer {
    fn classify(&self, text: &str) -> Sentiment;
}

/// Compound-score thresholds; scores inside the band are neutral.
const POSITIVE_THRESHOLD: f64 = 0.05;
const NEGATIVE_THRESHOLD: f64 = -0.05;

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z']+").expect("valid word regex"));

static VALENCES: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    let entries: [(&str, f64); 40] = [
        ("amazing", 2.0),
        ("awesome", 2.0),
        ("best", 1.5),
        ("brilliant", 2.0),
        ("champion", 1.5),
        ("congrats", 1.5),
        ("congratulations", 1.5),
        ("fantastic", 2.0),
        ("good", 1.0),
        ("great", 1.5),
        ("happy", 1.0),
        ("hero", 1.5),
        ("incredible", 2.0),
        ("legend", 1.5),
        ("love", 1.5),
        ("loved", 1.5),
        ("mega", 1.0),
        ("perfect", 2.0),
        ("proud", 1.5),
        ("superb", 2.0),
        ("victory", 1.5),
        ("well", 0.5),
        ("win", 1.0),
        ("angry", -1.5),
        ("awful", -2.0),
        ("bad", -1.0),
        ("boring", -1.0),
        ("crash", -1.0),
        ("disappointing", -1.5),
        ("disaster", -2.0),
        ("hate", -2.0),
        ("pathetic", -2.0),
        ("poor", -1.0),
        ("rubbish", -1.5),
        ("sad", -1.0),
        ("shame", -1.0),
        ("slow", -1.0),
        ("terrible", -2.0),
        ("useless", -1.5),
        ("worst", -2.0),
    ];
    HashMap::from(entries)
});

/// Sentiment analyzer backed by a fixed valence lexicon.
///
/// Tokenizes on word characters, sums the valence of known words and
/// normalizes by token count, mirroring the thresholds of the compound
/// score it stands in for.
#[derive(Debug, Clone, Default)]
pub struct LexiconSentiment;

impl LexiconSentiment {
    pub fn new() -> Self {
        Self
    }

    fn compound_score(text: &str) -> f64 {
        let lowered = text.to_lowercase();
        let mut tokens = 0usize;
        let mut sum = 0.0;
        for word in WORD_RE.find_iter(&lowered) {
            tokens += 1;
            if let Some(valence) = VALENCES.get(word.as_str()) {
                sum += valence;
            }
        }
        if tokens == 0 {
            return 0.0;
        }
        sum / tokens as f64
    }
}

impl SentimentAnalyzer for LexiconSentiment {
    fn classify(&self, text: &str) -> Sentiment {
        let score = Self::compound_score(text);
        if score >= POSITIVE_THRESHOLD {
            Sentiment::Positive
        } else if score <= NEGATIVE_THRESHOLD {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }
}
