use std::fmt::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::analysis;
use crate::config::Settings;
use crate::dashboard::{DatasetSnapshot, View};
use crate::models::{
    Category, CategoryStats, ComparativeScore, EngagementMetrics, FeatureMention, LengthSummary,
    OverallStats, Sentiment, SurveyResponse, Trend, WordCount,
};
use crate::seed;
use crate::table::{self, TableFilter};
use crate::words;

#[derive(Debug, Clone, Serialize)]
pub struct DatasetInfo {
    pub source: String,
    pub revision: Uuid,
    pub loaded_at: DateTime<Utc>,
}

impl From<&DatasetSnapshot> for DatasetInfo {
    fn from(snapshot: &DatasetSnapshot) -> Self {
        Self {
            source: snapshot.source.clone(),
            revision: snapshot.revision,
            loaded_at: snapshot.loaded_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OverviewSummary {
    pub dataset: DatasetInfo,
    pub stats: OverallStats,
    pub acceptance_rate: u32,
    pub acceptance_trend: Trend,
    pub engagement: EngagementMetrics,
    pub feedback_length: Vec<LengthSummary>,
    pub positive_words: Vec<WordCount>,
    pub negative_words: Vec<WordCount>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategorySummary {
    pub dataset: DatasetInfo,
    pub criteria: &'static str,
    pub stats: CategoryStats,
    pub sentiment_trend: Trend,
    pub critical_trend: Trend,
    pub engagement: EngagementMetrics,
    pub comparison: Vec<ComparativeScore>,
    pub feature_mentions: Vec<FeatureMention>,
    pub observations: &'static [&'static str],
    pub actionable_insights: &'static [&'static str],
}

pub fn summarize_overview(snapshot: &DatasetSnapshot, settings: &Settings) -> OverviewSummary {
    let data = &snapshot.responses;
    let stats = analysis::get_overall_stats(data);
    let acceptance_rate = analysis::acceptance_rate(&stats);

    OverviewSummary {
        dataset: snapshot.into(),
        acceptance_trend: analysis::acceptance_trend(acceptance_rate),
        acceptance_rate,
        engagement: analysis::engagement_metrics(data.iter()),
        feedback_length: analysis::length_summaries(data),
        positive_words: words::top_words(data, Sentiment::Positive, settings.top_words),
        negative_words: words::top_words(data, Sentiment::Negative, settings.top_words),
        stats,
    }
}

pub fn summarize_category(
    snapshot: &DatasetSnapshot,
    category: Category,
    settings: &Settings,
) -> CategorySummary {
    let data = &snapshot.responses;
    let stats = analysis::analyze_category_data_with_limit(data, category, settings.top_issues);
    let insights = seed::category_insights(category);
    let feature_mentions = if category == Category::Features {
        analysis::feature_mentions(data)
    } else {
        Vec::new()
    };

    CategorySummary {
        dataset: snapshot.into(),
        criteria: insights.criteria,
        sentiment_trend: analysis::sentiment_trend(stats.average_sentiment_score),
        critical_trend: analysis::critical_trend(stats.critical_issues_count),
        engagement: analysis::engagement_metrics(
            data.iter().filter(|item| item.category == category),
        ),
        comparison: analysis::comparative_scores(data, category),
        feature_mentions,
        observations: insights.observations,
        actionable_insights: insights.actionable_insights,
        stats,
    }
}

pub fn build_report(snapshot: &DatasetSnapshot, view: View, settings: &Settings) -> String {
    match view {
        View::Overview => build_overview_report(snapshot, settings),
        View::Category(category) => build_category_report(snapshot, category, settings),
    }
}

pub fn build_overview_report(snapshot: &DatasetSnapshot, settings: &Settings) -> String {
    let summary = summarize_overview(snapshot, settings);
    let stats = &summary.stats;
    let mut output = String::new();

    let _ = writeln!(output, "# Survey Results Overview");
    write_dataset_line(&mut output, &summary.dataset, stats.total_responses);
    let _ = writeln!(output);

    let _ = writeln!(output, "## Key Figures");
    let _ = writeln!(output, "- Total Responses: {} (across all categories)", stats.total_responses);
    let _ = writeln!(
        output,
        "- Categories Analyzed: {} (different feedback areas)",
        stats.categories.len()
    );
    let _ = writeln!(
        output,
        "- Early Acceptance: {}% {} (includes positive and neutral feedback)",
        summary.acceptance_rate,
        summary.acceptance_trend.marker()
    );
    let _ = writeln!(
        output,
        "- Avg. Feedback Length: {} characters, {} words per response",
        summary.engagement.avg_feedback_length, summary.engagement.avg_words_per_response
    );
    let _ = writeln!(output);

    let _ = writeln!(output, "## Overall Sentiment Distribution");
    write_sentiment_lines(&mut output, stats.overall_sentiment_distribution.iter(), stats.total_responses);
    let _ = writeln!(output);

    let _ = writeln!(output, "## Responses by Category");
    if stats.category_distribution.is_empty() {
        let _ = writeln!(output, "No responses recorded.");
    }
    for (index, (category, count)) in stats.category_distribution.iter().enumerate() {
        let _ = writeln!(
            output,
            "- {}: {} ({}) [{}]",
            category.short_label(),
            count,
            analysis::format_percentage(count, stats.total_responses),
            analysis::category_color(index)
        );
    }
    let _ = writeln!(output);

    let _ = writeln!(output, "## Feedback Length by Sentiment");
    let _ = writeln!(output, "| Sentiment | Min | Q1 | Median | Q3 | Max | Mean |");
    let _ = writeln!(output, "| --- | --- | --- | --- | --- | --- | --- |");
    for length in &summary.feedback_length {
        let _ = writeln!(
            output,
            "| {} | {} | {} | {} | {} | {} | {} |",
            length.sentiment,
            length.min,
            length.q1,
            length.median,
            length.q3,
            length.max,
            length.mean.round()
        );
    }
    let _ = writeln!(output);

    let _ = writeln!(output, "## Feedback Word Analysis");
    let _ = write!(output, "{}", render_words(Sentiment::Positive, &summary.positive_words));
    let _ = write!(output, "{}", render_words(Sentiment::Negative, &summary.negative_words));
    let _ = writeln!(output);

    let rows = table::filter_responses(&snapshot.responses, &TableFilter::default());
    let _ = write!(
        output,
        "{}",
        table::render_table("All Survey Responses", &rows, settings.table_limit)
    );

    output
}

pub fn build_category_report(
    snapshot: &DatasetSnapshot,
    category: Category,
    settings: &Settings,
) -> String {
    let summary = summarize_category(snapshot, category, settings);
    let stats = &summary.stats;
    let mut output = String::new();

    let _ = writeln!(output, "# {} Dashboard", category);
    write_dataset_line(&mut output, &summary.dataset, snapshot.responses.len());
    let _ = writeln!(output);
    let _ = writeln!(output, "> Category Criteria: {}", summary.criteria);
    let _ = writeln!(output);

    let _ = writeln!(output, "## Key Figures");
    let _ = writeln!(output, "- Total Responses: {}", stats.total_responses);
    let _ = writeln!(
        output,
        "- Sentiment Score: {:.2} {} (range -1.0 to 1.0)",
        stats.average_sentiment_score,
        summary.sentiment_trend.marker()
    );
    let _ = writeln!(
        output,
        "- Negative Feedback: {} {}",
        stats.critical_issues_count,
        summary.critical_trend.marker()
    );
    let _ = writeln!(
        output,
        "- Avg. Feedback Length: {} characters, {} words per response",
        summary.engagement.avg_feedback_length, summary.engagement.avg_words_per_response
    );
    let _ = writeln!(output);

    let _ = writeln!(output, "## Sentiment Distribution");
    write_sentiment_lines(&mut output, stats.sentiment_distribution.iter(), stats.total_responses);
    let _ = writeln!(output);

    let _ = writeln!(output, "## Comparative Sentiment");
    for score in &summary.comparison {
        let marker = if score.is_current { " <" } else { "" };
        let _ = writeln!(
            output,
            "- {}: {}% (+{} / ={} / -{}, {} total){}",
            score.category.short_label(),
            score.score,
            score.positive_count,
            score.neutral_count,
            score.negative_count,
            score.total_responses,
            marker
        );
    }
    let _ = writeln!(output);

    if !summary.feature_mentions.is_empty() {
        let _ = writeln!(output, "## Feature Mentions");
        let _ = writeln!(output, "| Feature | Positive | Neutral | Negative |");
        let _ = writeln!(output, "| --- | --- | --- | --- |");
        for mention in &summary.feature_mentions {
            let _ = writeln!(
                output,
                "| {} | {} | {} | {} |",
                mention.feature, mention.positive, mention.neutral, mention.negative
            );
        }
        let _ = writeln!(output);
    }

    let _ = writeln!(output, "## Top Issues");
    if stats.top_issues.is_empty() {
        let _ = writeln!(output, "No negative feedback in this category.");
    } else {
        for issue in &stats.top_issues {
            let _ = writeln!(output, "- {issue}");
        }
    }
    let _ = writeln!(output);

    let _ = writeln!(output, "## Observations");
    for line in summary.observations {
        let _ = writeln!(output, "- {line}");
    }
    let _ = writeln!(output);
    let _ = writeln!(output, "## Actionable Insights");
    for line in summary.actionable_insights {
        let _ = writeln!(output, "- {line}");
    }
    let _ = writeln!(output);

    let filter = TableFilter {
        category: Some(category),
        ..TableFilter::default()
    };
    let rows = table::filter_responses(&snapshot.responses, &filter);
    let _ = write!(
        output,
        "{}",
        table::render_table(&format!("{category} Responses"), &rows, settings.table_limit)
    );

    output
}

pub fn render_words(sentiment: Sentiment, words: &[WordCount]) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "### {} Feedback", sentiment);
    if words.is_empty() {
        let _ = writeln!(
            output,
            "No {} feedback available",
            sentiment.label().to_lowercase()
        );
        return output;
    }
    let line: Vec<String> = words
        .iter()
        .map(|word| format!("{} ({})", word.word, word.count))
        .collect();
    let _ = writeln!(output, "{}", line.join(", "));
    output
}

fn write_dataset_line(output: &mut String, dataset: &DatasetInfo, rows: usize) {
    let _ = writeln!(
        output,
        "Generated {} from {} ({} responses, revision {})",
        Utc::now().format("%Y-%m-%d %H:%M UTC"),
        dataset.source,
        rows,
        dataset.revision
    );
}

fn write_sentiment_lines<I>(output: &mut String, distribution: I, total: usize)
where
    I: Iterator<Item = (Sentiment, usize)>,
{
    let mut any = false;
    for (sentiment, count) in distribution {
        any = true;
        let _ = writeln!(
            output,
            "- {}: {} ({}) [{}]",
            sentiment,
            count,
            analysis::format_percentage(count, total),
            analysis::sentiment_color(sentiment.label())
        );
    }
    if !any {
        let _ = writeln!(output, "No responses recorded.");
    }
}

/// Rows for callers that only need the raw records of one view.
pub fn view_rows(data: &[SurveyResponse], view: View) -> Vec<&SurveyResponse> {
    let filter = TableFilter {
        category: match view {
            View::Overview => None,
            View::Category(category) => Some(category),
        },
        ..TableFilter::default()
    };
    table::filter_responses(data, &filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::Dashboard;

    #[test]
    fn overview_report_has_all_sections() {
        let dashboard = Dashboard::default();
        let report = build_report(&dashboard.snapshot(), View::Overview, &Settings::default());

        assert!(report.starts_with("# Survey Results Overview"));
        assert!(report.contains("- Total Responses: 52"));
        assert!(report.contains("- Categories Analyzed: 5"));
        assert!(report.contains("- Data Quality: 4 (8%) [#"));
        assert!(report.contains("## Feedback Length by Sentiment"));
        assert!(report.contains("### Positive Feedback"));
        assert!(report.contains("Showing 52 responses"));
    }

    #[test]
    fn category_report_lists_issues_and_features() {
        let dashboard = Dashboard::default();
        let settings = Settings::default();
        let report = build_category_report(&dashboard.snapshot(), Category::Features, &settings);

        assert!(report.starts_with("# Features Dashboard"));
        assert!(report.contains("Category Criteria: Comments about functionality"));
        assert!(report.contains("## Feature Mentions"));
        assert!(report.contains("- Sometimes the filters don't work as expected. Frustrating!"));
        assert!(report.contains("- Features: ") && report.contains(" <"));
    }

    #[test]
    fn category_without_negatives_says_so() {
        let dashboard = Dashboard::new(
            "test.csv",
            vec![SurveyResponse::new("a", "Helpful team", Category::Support, Sentiment::Positive)],
        );
        let report = build_category_report(&dashboard.snapshot(), Category::Support, &Settings::default());
        assert!(report.contains("No negative feedback in this category."));
        assert!(report.contains("- Sentiment Score: 1.00"));
    }

    #[test]
    fn empty_word_cloud_has_placeholder() {
        assert_eq!(
            render_words(Sentiment::Negative, &[]),
            "### Negative Feedback\nNo negative feedback available\n"
        );
    }

    #[test]
    fn overview_summary_serializes() {
        let dashboard = Dashboard::default();
        let summary = summarize_overview(&dashboard.snapshot(), &Settings::default());
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["stats"]["total_responses"], 52);
        assert_eq!(json["stats"]["category_distribution"]["UX/UI"], 14);
        assert_eq!(json["acceptance_trend"], "up");
    }

    #[test]
    fn view_rows_filter_by_category() {
        let data = seed::bundled_responses();
        assert_eq!(view_rows(&data, View::Overview).len(), 52);
        assert_eq!(view_rows(&data, View::Category(Category::Support)).len(), 5);
    }
}
