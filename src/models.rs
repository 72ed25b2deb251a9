use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "UX/UI")]
    UxUi,
    Performance,
    Features,
    Support,
    #[serde(rename = "Data Quality & Reliability")]
    DataQuality,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::UxUi,
        Category::Performance,
        Category::Features,
        Category::Support,
        Category::DataQuality,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::UxUi => "UX/UI",
            Category::Performance => "Performance",
            Category::Features => "Features",
            Category::Support => "Support",
            Category::DataQuality => "Data Quality & Reliability",
        }
    }

    /// Label used on chart axes, where the compound label is too wide.
    pub fn short_label(self) -> &'static str {
        match self {
            Category::DataQuality => "Data Quality",
            other => other.label(),
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Category::UxUi => "ux-ui",
            Category::Performance => "performance",
            Category::Features => "features",
            Category::Support => "support",
            Category::DataQuality => "data-quality",
        }
    }

    /// Exact, case-sensitive match against the closed label set.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.label() == label)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|category| {
                category.label() == trimmed || category.slug().eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|c| c.slug()).collect();
                format!("unknown category {trimmed:?} (expected one of {})", known.join(", "))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

    pub fn label(self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|sentiment| sentiment.label() == label)
    }

    pub fn score(self) -> i32 {
        match self {
            Sentiment::Positive => 1,
            Sentiment::Neutral => 0,
            Sentiment::Negative => -1,
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Sentiment {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|sentiment| sentiment.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| format!("unknown sentiment {trimmed:?} (expected positive, neutral or negative)"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyResponse {
    pub user_name: String,
    pub answer: String,
    pub category: Category,
    pub sentiment: Sentiment,
}

impl SurveyResponse {
    pub fn new(user_name: &str, answer: &str, category: Category, sentiment: Sentiment) -> Self {
        Self {
            user_name: user_name.to_string(),
            answer: answer.to_string(),
            category,
            sentiment,
        }
    }
}

/// Counts keyed in first-seen order. Keys that never occur are absent, so
/// lookups of a missing key read as zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally<K> {
    entries: Vec<(K, usize)>,
}

impl<K> Default for Tally<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: Copy + PartialEq> Tally<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: K) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 += 1,
            None => self.entries.push((key, 1)),
        }
    }

    pub fn get(&self, key: K) -> usize {
        self.entries
            .iter()
            .find(|(existing, _)| *existing == key)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    pub fn contains(&self, key: K) -> bool {
        self.entries.iter().any(|(existing, _)| *existing == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, usize)> + '_ {
        self.entries.iter().copied()
    }

    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.entries.iter().map(|(key, _)| *key)
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Copy + PartialEq> FromIterator<K> for Tally<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tally = Tally::new();
        for key in iter {
            tally.add(key);
        }
        tally
    }
}

impl<K: Serialize> Serialize for Tally<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, count) in &self.entries {
            map.serialize_entry(key, count)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryStats {
    pub category: Category,
    pub total_responses: usize,
    pub sentiment_distribution: Tally<Sentiment>,
    pub average_sentiment_score: f64,
    pub top_issues: Vec<String>,
    pub critical_issues_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct OverallStats {
    pub total_responses: usize,
    pub categories: Vec<Category>,
    pub overall_sentiment_distribution: Tally<Sentiment>,
    pub category_distribution: Tally<Category>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Neutral,
    Down,
}

impl Trend {
    pub fn marker(self) -> &'static str {
        match self {
            Trend::Up => "▲",
            Trend::Neutral => "◆",
            Trend::Down => "▼",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LengthSummary {
    pub sentiment: Sentiment,
    pub min: usize,
    pub q1: usize,
    pub median: usize,
    pub q3: usize,
    pub max: usize,
    pub mean: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EngagementMetrics {
    pub avg_feedback_length: usize,
    pub avg_words_per_response: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparativeScore {
    pub category: Category,
    pub score: f64,
    pub positive_count: usize,
    pub neutral_count: usize,
    pub negative_count: usize,
    pub total_responses: usize,
    pub is_current: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureMention {
    pub feature: String,
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl FeatureMention {
    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}
