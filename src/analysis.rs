use crate::models::{
    Category, CategoryStats, ComparativeScore, EngagementMetrics, FeatureMention, LengthSummary,
    OverallStats, Sentiment, SurveyResponse, Tally, Trend,
};

pub const NEUTRAL_GRAY: &str = "#6b7280";
pub const TOP_ISSUE_LIMIT: usize = 3;

const CATEGORY_PALETTE: [&str; 5] = [
    "#8b5cf6", // violet
    "#06b6d4", // cyan
    "#f59e0b", // amber
    "#ec4899", // pink
    "#10b981", // emerald
];

const FEATURE_KEYWORDS: [(&str, &[&str]); 7] = [
    ("Scheduling", &["scheduling", "schedule", "recurring"]),
    ("Customization", &["customization", "customize", "custom"]),
    ("Filters", &["filter", "filtering", "filters"]),
    ("Integrations", &["integration", "integrations", "integrate"]),
    ("Export", &["export", "exporting", "excel"]),
    ("Alerts", &["alert", "alerts", "notification"]),
    ("Report Builder", &["report builder", "builder", "build"]),
];

pub fn analyze_category_data(data: &[SurveyResponse], category: Category) -> CategoryStats {
    analyze_category_data_with_limit(data, category, TOP_ISSUE_LIMIT)
}

pub fn analyze_category_data_with_limit(
    data: &[SurveyResponse],
    category: Category,
    top_issue_limit: usize,
) -> CategoryStats {
    let category_data: Vec<&SurveyResponse> =
        data.iter().filter(|item| item.category == category).collect();

    let sentiment_distribution: Tally<Sentiment> =
        category_data.iter().map(|item| item.sentiment).collect();

    let score_total: i32 = category_data.iter().map(|item| item.sentiment.score()).sum();
    let average_sentiment_score = if category_data.is_empty() {
        0.0
    } else {
        score_total as f64 / category_data.len() as f64
    };

    // Dataset order, not ranked.
    let negative: Vec<&SurveyResponse> = category_data
        .iter()
        .copied()
        .filter(|item| item.sentiment == Sentiment::Negative)
        .collect();
    let top_issues = negative
        .iter()
        .take(top_issue_limit)
        .map(|item| item.answer.clone())
        .collect();

    CategoryStats {
        category,
        total_responses: category_data.len(),
        sentiment_distribution,
        average_sentiment_score,
        top_issues,
        critical_issues_count: negative.len(),
    }
}

pub fn get_overall_stats(data: &[SurveyResponse]) -> OverallStats {
    let category_distribution: Tally<Category> = data.iter().map(|item| item.category).collect();

    OverallStats {
        total_responses: data.len(),
        categories: category_distribution.keys().collect(),
        overall_sentiment_distribution: data.iter().map(|item| item.sentiment).collect(),
        category_distribution,
    }
}

/// Chart color for a sentiment label. Anything outside the closed set gets
/// the neutral gray.
pub fn sentiment_color(label: &str) -> &'static str {
    match Sentiment::from_label(label) {
        Some(Sentiment::Positive) => "#10b981",
        Some(Sentiment::Neutral) => "#f59e0b",
        Some(Sentiment::Negative) => "#f87171",
        None => NEUTRAL_GRAY,
    }
}

/// Palette entry for a chart position; wraps so every index has a color.
pub fn category_color(index: usize) -> &'static str {
    CATEGORY_PALETTE[index % CATEGORY_PALETTE.len()]
}

pub fn percentage(value: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (value as f64 / total as f64 * 100.0).round() as u32
}

pub fn format_percentage(value: usize, total: usize) -> String {
    format!("{}%", percentage(value, total))
}

/// Share of responses that are not negative, as a whole percentage.
pub fn acceptance_rate(stats: &OverallStats) -> u32 {
    let accepted = stats.overall_sentiment_distribution.get(Sentiment::Positive)
        + stats.overall_sentiment_distribution.get(Sentiment::Neutral);
    percentage(accepted, stats.total_responses)
}

pub fn acceptance_trend(rate: u32) -> Trend {
    match rate {
        61.. => Trend::Up,
        41..=60 => Trend::Neutral,
        _ => Trend::Down,
    }
}

pub fn sentiment_trend(score: f64) -> Trend {
    if score > 0.2 {
        Trend::Up
    } else if score < -0.2 {
        Trend::Down
    } else {
        Trend::Neutral
    }
}

pub fn critical_trend(count: usize) -> Trend {
    match count {
        0 => Trend::Up,
        1..=2 => Trend::Neutral,
        _ => Trend::Down,
    }
}

/// Box-plot figures over answer lengths, one entry per sentiment.
pub fn length_summaries(data: &[SurveyResponse]) -> Vec<LengthSummary> {
    [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral]
        .into_iter()
        .map(|sentiment| {
            let lengths: Vec<usize> = data
                .iter()
                .filter(|item| item.sentiment == sentiment)
                .map(|item| item.answer.chars().count())
                .collect();
            summarize_lengths(sentiment, &lengths)
        })
        .collect()
}

fn summarize_lengths(sentiment: Sentiment, values: &[usize]) -> LengthSummary {
    if values.is_empty() {
        return LengthSummary {
            sentiment,
            min: 0,
            q1: 0,
            median: 0,
            q3: 0,
            max: 0,
            mean: 0.0,
        };
    }

    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let n = sorted.len();

    LengthSummary {
        sentiment,
        min: sorted[0],
        q1: sorted[n / 4],
        median: sorted[n / 2],
        q3: sorted[n * 3 / 4],
        max: sorted[n - 1],
        mean: sorted.iter().sum::<usize>() as f64 / n as f64,
    }
}

pub fn engagement_metrics<'a, I>(responses: I) -> EngagementMetrics
where
    I: IntoIterator<Item = &'a SurveyResponse>,
{
    let mut count = 0usize;
    let mut chars = 0usize;
    let mut words = 0usize;

    for response in responses {
        count += 1;
        chars += response.answer.chars().count();
        words += response.answer.split_whitespace().count();
    }

    if count == 0 {
        return EngagementMetrics {
            avg_feedback_length: 0,
            avg_words_per_response: 0,
        };
    }

    EngagementMetrics {
        avg_feedback_length: (chars as f64 / count as f64).round() as usize,
        avg_words_per_response: (words as f64 / count as f64).round() as usize,
    }
}

/// Net sentiment per category ignoring neutral answers, floored at zero.
pub fn comparative_scores(data: &[SurveyResponse], current: Category) -> Vec<ComparativeScore> {
    Category::ALL
        .into_iter()
        .map(|category| {
            let sentiments: Tally<Sentiment> = data
                .iter()
                .filter(|item| item.category == category)
                .map(|item| item.sentiment)
                .collect();
            let positive = sentiments.get(Sentiment::Positive);
            let neutral = sentiments.get(Sentiment::Neutral);
            let negative = sentiments.get(Sentiment::Negative);

            let polar = positive + negative;
            let score = if polar == 0 {
                0.0
            } else {
                let raw = (positive as f64 - negative as f64) / polar as f64 * 100.0;
                (raw.max(0.0) * 10.0).round() / 10.0
            };

            ComparativeScore {
                category,
                score,
                positive_count: positive,
                neutral_count: neutral,
                negative_count: negative,
                total_responses: sentiments.total(),
                is_current: category == current,
            }
        })
        .collect()
}

/// Sentiment split for each product feature named in Features answers.
pub fn feature_mentions(data: &[SurveyResponse]) -> Vec<FeatureMention> {
    let mut mentions: Vec<FeatureMention> = FEATURE_KEYWORDS
        .iter()
        .map(|(feature, _)| FeatureMention {
            feature: feature.to_string(),
            positive: 0,
            neutral: 0,
            negative: 0,
        })
        .collect();

    for response in data.iter().filter(|item| item.category == Category::Features) {
        let answer = response.answer.to_lowercase();
        for (mention, (_, keywords)) in mentions.iter_mut().zip(FEATURE_KEYWORDS.iter()) {
            if keywords.iter().any(|keyword| answer.contains(keyword)) {
                match response.sentiment {
                    Sentiment::Positive => mention.positive += 1,
                    Sentiment::Neutral => mention.neutral += 1,
                    Sentiment::Negative => mention.negative += 1,
                }
            }
        }
    }

    mentions.retain(|mention| mention.total() > 0);
    mentions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    fn response(category: Category, sentiment: Sentiment, answer: &str) -> SurveyResponse {
        SurveyResponse::new("tester", answer, category, sentiment)
    }

    #[test]
    fn category_stats_count_and_score() {
        let data = vec![
            response(Category::UxUi, Sentiment::Positive, "clean"),
            response(Category::UxUi, Sentiment::Negative, "clunky"),
            response(Category::Support, Sentiment::Negative, "slow"),
            response(Category::UxUi, Sentiment::Negative, "confusing"),
        ];

        let stats = analyze_category_data(&data, Category::UxUi);
        assert_eq!(stats.total_responses, 3);
        assert_eq!(stats.sentiment_distribution.get(Sentiment::Positive), 1);
        assert_eq!(stats.sentiment_distribution.get(Sentiment::Negative), 2);
        assert!(!stats.sentiment_distribution.contains(Sentiment::Neutral));
        assert!((stats.average_sentiment_score - (-1.0 / 3.0)).abs() < 1e-9);
        assert_eq!(stats.critical_issues_count, 2);
        assert_eq!(stats.top_issues, vec!["clunky", "confusing"]);
    }

    #[test]
    fn empty_category_scores_zero() {
        let data = vec![response(Category::Features, Sentiment::Positive, "great")];
        let stats = analyze_category_data(&data, Category::Support);
        assert_eq!(stats.total_responses, 0);
        assert_eq!(stats.average_sentiment_score, 0.0);
        assert!(stats.sentiment_distribution.is_empty());
        assert!(stats.top_issues.is_empty());
    }

    #[test]
    fn top_issues_keep_dataset_order_and_stop_at_three() {
        let data: Vec<SurveyResponse> = ["first", "second", "third", "fourth"]
            .iter()
            .map(|answer| response(Category::Performance, Sentiment::Negative, answer))
            .collect();
        let stats = analyze_category_data(&data, Category::Performance);
        assert_eq!(stats.top_issues, vec!["first", "second", "third"]);
        assert_eq!(stats.critical_issues_count, 4);
    }

    #[test]
    fn distributions_sum_to_totals_and_scores_stay_in_range() {
        let data = seed::bundled_responses();
        let overall = get_overall_stats(&data);
        assert_eq!(overall.overall_sentiment_distribution.total(), overall.total_responses);
        assert_eq!(overall.category_distribution.total(), overall.total_responses);

        for category in Category::ALL {
            let stats = analyze_category_data(&data, category);
            assert_eq!(stats.sentiment_distribution.total(), stats.total_responses);
            assert!((-1.0..=1.0).contains(&stats.average_sentiment_score));
        }
    }

    #[test]
    fn overall_categories_follow_first_occurrence() {
        let data = vec![
            response(Category::Support, Sentiment::Neutral, "a"),
            response(Category::UxUi, Sentiment::Positive, "b"),
            response(Category::Support, Sentiment::Negative, "c"),
            response(Category::DataQuality, Sentiment::Negative, "d"),
            response(Category::Features, Sentiment::Positive, "e"),
            response(Category::Performance, Sentiment::Neutral, "f"),
        ];
        let overall = get_overall_stats(&data);
        assert_eq!(
            overall.categories,
            vec![
                Category::Support,
                Category::UxUi,
                Category::DataQuality,
                Category::Features,
                Category::Performance,
            ]
        );
        assert_eq!(overall.category_distribution.get(Category::Support), 2);
    }

    #[test]
    fn colors_are_total() {
        assert_eq!(sentiment_color("Positive"), "#10b981");
        assert_eq!(sentiment_color("Mixed"), NEUTRAL_GRAY);
        assert_eq!(category_color(5), category_color(0));
        assert_eq!(category_color(12), category_color(2));
        assert_eq!(category_color(usize::MAX), CATEGORY_PALETTE[usize::MAX % 5]);
    }

    #[test]
    fn percentages_round_to_nearest() {
        assert_eq!(format_percentage(0, 0), "0%");
        assert_eq!(format_percentage(1, 2), "50%");
        assert_eq!(format_percentage(2, 3), "67%");
        assert_eq!(format_percentage(1, 3), "33%");
    }

    #[test]
    fn acceptance_counts_positive_and_neutral() {
        let data = vec![
            response(Category::UxUi, Sentiment::Positive, "a"),
            response(Category::UxUi, Sentiment::Neutral, "b"),
            response(Category::UxUi, Sentiment::Negative, "c"),
            response(Category::UxUi, Sentiment::Negative, "d"),
        ];
        let rate = acceptance_rate(&get_overall_stats(&data));
        assert_eq!(rate, 50);
        assert_eq!(acceptance_trend(rate), Trend::Neutral);
        assert_eq!(acceptance_rate(&get_overall_stats(&[])), 0);
    }

    #[test]
    fn trend_thresholds() {
        assert_eq!(sentiment_trend(0.21), Trend::Up);
        assert_eq!(sentiment_trend(0.2), Trend::Neutral);
        assert_eq!(sentiment_trend(-0.5), Trend::Down);
        assert_eq!(critical_trend(0), Trend::Up);
        assert_eq!(critical_trend(2), Trend::Neutral);
        assert_eq!(critical_trend(3), Trend::Down);
        assert_eq!(acceptance_trend(61), Trend::Up);
        assert_eq!(acceptance_trend(40), Trend::Down);
    }

    #[test]
    fn length_summary_uses_floor_indexing() {
        let data: Vec<SurveyResponse> = ["aaaa", "a", "aaa", "aa"]
            .iter()
            .map(|answer| response(Category::Support, Sentiment::Positive, answer))
            .collect();
        let summaries = length_summaries(&data);
        assert_eq!(summaries.len(), 3);

        let positive = &summaries[0];
        assert_eq!(positive.sentiment, Sentiment::Positive);
        assert_eq!((positive.min, positive.q1, positive.median, positive.q3, positive.max), (1, 2, 3, 4, 4));
        assert!((positive.mean - 2.5).abs() < 1e-9);

        let negative = &summaries[1];
        assert_eq!(negative.sentiment, Sentiment::Negative);
        assert_eq!(negative.max, 0);
        assert_eq!(negative.mean, 0.0);
    }

    #[test]
    fn engagement_rounds_averages() {
        let data = vec![
            response(Category::Support, Sentiment::Positive, "two  words"),
            response(Category::Support, Sentiment::Positive, "one"),
        ];
        let metrics = engagement_metrics(&data);
        assert_eq!(metrics.avg_feedback_length, 7);
        assert_eq!(metrics.avg_words_per_response, 2);

        let empty = engagement_metrics(std::iter::empty());
        assert_eq!(empty.avg_feedback_length, 0);
    }

    #[test]
    fn comparative_scores_ignore_neutral_and_floor_at_zero() {
        let data = vec![
            response(Category::UxUi, Sentiment::Positive, "a"),
            response(Category::UxUi, Sentiment::Positive, "b"),
            response(Category::UxUi, Sentiment::Negative, "c"),
            response(Category::UxUi, Sentiment::Neutral, "d"),
            response(Category::Support, Sentiment::Negative, "e"),
        ];
        let scores = comparative_scores(&data, Category::UxUi);
        assert_eq!(scores.len(), 5);

        let ux = &scores[0];
        assert_eq!(ux.category, Category::UxUi);
        assert!(ux.is_current);
        assert_eq!(ux.score, 33.3);
        assert_eq!(ux.total_responses, 4);

        let support = scores.iter().find(|s| s.category == Category::Support).unwrap();
        assert_eq!(support.score, 0.0);
        assert!(!support.is_current);

        let features = scores.iter().find(|s| s.category == Category::Features).unwrap();
        assert_eq!(features.total_responses, 0);
    }

    #[test]
    fn feature_mentions_match_keywords_in_features_only() {
        let data = vec![
            response(Category::Features, Sentiment::Positive, "I love the Scheduling feature"),
            response(Category::Features, Sentiment::Negative, "Filters are broken"),
            response(Category::Features, Sentiment::Neutral, "Needs an Excel export"),
            response(Category::UxUi, Sentiment::Negative, "filters look odd"),
        ];
        let mentions = feature_mentions(&data);
        let names: Vec<&str> = mentions.iter().map(|m| m.feature.as_str()).collect();
        assert_eq!(names, vec!["Scheduling", "Filters", "Export"]);
        assert_eq!(mentions[1].negative, 1);
        assert_eq!(mentions[2].neutral, 1);
    }
}
