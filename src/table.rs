use std::fmt::Write as _;
use std::io::Write;

use crate::models::{Category, Sentiment, SurveyResponse};

#[derive(Debug, Clone, Default)]
pub struct TableFilter {
    pub query: Option<String>,
    pub category: Option<Category>,
    pub sentiment: Option<Sentiment>,
}

impl TableFilter {
    fn matches(&self, response: &SurveyResponse, needle: Option<&str>) -> bool {
        if self.category.is_some_and(|category| category != response.category) {
            return false;
        }
        if self.sentiment.is_some_and(|sentiment| sentiment != response.sentiment) {
            return false;
        }
        match needle {
            Some(needle) => {
                response.user_name.to_lowercase().contains(needle)
                    || response.answer.to_lowercase().contains(needle)
            }
            None => true,
        }
    }
}

/// Rows matching the filter, in dataset order. The search text is a
/// case-insensitive substring of the user name or the answer.
pub fn filter_responses<'a>(data: &'a [SurveyResponse], filter: &TableFilter) -> Vec<&'a SurveyResponse> {
    let needle = filter
        .query
        .as_deref()
        .map(str::trim)
        .filter(|query| !query.is_empty())
        .map(str::to_lowercase);

    data.iter()
        .filter(|response| filter.matches(response, needle.as_deref()))
        .collect()
}

pub fn render_table(title: &str, rows: &[&SurveyResponse], limit: Option<usize>) -> String {
    let mut output = String::new();
    let plural = if rows.len() == 1 { "" } else { "s" };

    let _ = writeln!(output, "## {title}");
    let _ = writeln!(output, "Showing {} response{plural}", rows.len());
    let _ = writeln!(output);

    if rows.is_empty() {
        let _ = writeln!(output, "No responses match.");
        return output;
    }

    let _ = writeln!(output, "| User | Response | Category | Sentiment |");
    let _ = writeln!(output, "| --- | --- | --- | --- |");
    let shown = limit.unwrap_or(rows.len());
    for row in rows.iter().take(shown) {
        let _ = writeln!(
            output,
            "| {} | {} | {} | {} |",
            escape_cell(&row.user_name),
            escape_cell(&row.answer),
            row.category,
            row.sentiment
        );
    }
    if rows.len() > shown {
        let _ = writeln!(output, "\n_{} more not shown._", rows.len() - shown);
    }

    output
}

fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|").replace('\n', " ")
}

/// Writes responses as a four-column CSV. The upload path reads it back
/// unchanged unless an answer contains a double quote or a line break: the
/// upload parser drops quote characters and splits rows on every newline.
pub fn write_csv<'a, W, I>(responses: I, writer: W) -> anyhow::Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a SurveyResponse>,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut written = 0usize;
    for response in responses {
        csv_writer.serialize(response)?;
        written += 1;
    }
    csv_writer.flush()?;
    Ok(written)
}
