use std::collections::HashMap;

use crate::models::{Sentiment, SurveyResponse, WordCount};

pub const DEFAULT_WORD_LIMIT: usize = 50;

const STOPWORDS: &[&str] = &[
    "the", "is", "at", "which", "on", "a", "an", "and", "or", "but", "in", "with", "to", "for",
    "of", "as", "by", "that", "this", "it", "from", "be", "are", "was", "were", "been", "have",
    "has", "had", "do", "does", "did", "will", "would", "could", "should", "may", "might", "can",
    "i", "me", "my", "we", "our", "you", "your", "ve", "t", "s", "m", "re", "ll", "d", "very",
    "just", "so", "than", "too", "when", "where", "who", "what", "how", "why", "if", "because",
    "while", "after", "before", "during", "without", "within", "through", "over", "under",
    "again", "further", "then", "once", "here", "there", "all", "both", "each", "few", "more",
    "most", "other", "some", "such", "only", "own", "same", "into", "up", "down", "out", "about",
    "its", "dono", "don",
];

pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(&word)
}

/// Most frequent words across answers with the given sentiment, highest
/// count first. Ties keep the order in which words were first seen.
pub fn top_words(data: &[SurveyResponse], sentiment: Sentiment, limit: usize) -> Vec<WordCount> {
    let mut counts: Vec<WordCount> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    let answers = data.iter().filter(|item| item.sentiment == sentiment);
    for answer in answers {
        for word in tokenize(&answer.answer) {
            match positions.get(&word) {
                Some(&index) => counts[index].count += 1,
                None => {
                    positions.insert(word.clone(), counts.len());
                    counts.push(WordCount { word, count: 1 });
                }
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    counts
}

fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    cleaned
        .split_whitespace()
        .filter(|word| word.len() > 2 && !is_stopword(word))
        .map(str::to_string)
        .collect()
}
