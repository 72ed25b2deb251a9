use std::path::{Path, PathBuf};

use snafu::{prelude::*, Snafu};
use tracing::{debug, info};

use crate::models::{Category, Sentiment, SurveyResponse};

const USER_COLUMNS: [&str; 3] = ["user_name", "username", "user"];
const ANSWER_COLUMNS: [&str; 3] = ["answer", "feedback", "comment"];

#[derive(Debug, Snafu)]
pub enum IngestError {
    #[snafu(display("Please upload a CSV file (got {path})"))]
    NotCsv { path: String },

    #[snafu(display("No valid data found in the CSV file (expected a header and at least one row)"))]
    TooFewLines,

    #[snafu(display("CSV must contain columns: user_name, answer, category, sentiment"))]
    MissingColumns,

    #[snafu(display("No valid data found in the CSV file"))]
    NoValidRows,

    #[snafu(display("Failed to parse CSV file. Please check the format. ({})", path.display()))]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type IngestResult<T> = Result<T, IngestError>;

/// A validated replacement dataset and the file it came from.
#[derive(Debug, Clone)]
pub struct Upload {
    pub source: String,
    pub responses: Vec<SurveyResponse>,
}

struct Columns {
    user: usize,
    answer: usize,
    category: usize,
    sentiment: usize,
}

impl Columns {
    // Header cells are split on bare commas; quoting is not honoured here.
    fn resolve(header: &str) -> IngestResult<Self> {
        let names: Vec<String> = header.split(',').map(|h| h.trim().to_lowercase()).collect();
        let find = |candidates: &[&str]| {
            names
                .iter()
                .position(|name| candidates.contains(&name.as_str()))
        };

        match (
            find(&USER_COLUMNS[..]),
            find(&ANSWER_COLUMNS[..]),
            find(&["category"][..]),
            find(&["sentiment"][..]),
        ) {
            (Some(user), Some(answer), Some(category), Some(sentiment)) => Ok(Self {
                user,
                answer,
                category,
                sentiment,
            }),
            _ => MissingColumnsSnafu.fail(),
        }
    }

    fn highest(&self) -> usize {
        self.user.max(self.answer).max(self.category).max(self.sentiment)
    }
}

/// Splits one CSV line on commas outside double quotes. Quote characters
/// only toggle the quoted state and never reach the output; fields are
/// trimmed.
pub fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);

    fields.into_iter().map(|field| field.trim().to_string()).collect()
}

/// Parses survey rows out of CSV text. Rows that are too short or carry a
/// category or sentiment outside the known labels are dropped without error.
pub fn parse_csv(text: &str) -> IngestResult<Vec<SurveyResponse>> {
    let lines: Vec<(usize, &str)> = text
        .split('\n')
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .collect();
    ensure!(lines.len() >= 2, TooFewLinesSnafu);

    let columns = Columns::resolve(lines[0].1)?;
    let mut parsed = Vec::new();

    for (index, line) in lines.iter().skip(1) {
        let lineno = index + 1;
        let values = parse_csv_line(line);

        if values.len() <= columns.highest() {
            debug!(lineno, fields = values.len(), "skipping short row");
            continue;
        }

        let category = Category::from_label(&values[columns.category]);
        let sentiment = Sentiment::from_label(&values[columns.sentiment]);
        let (Some(category), Some(sentiment)) = (category, sentiment) else {
            debug!(
                lineno,
                category = %values[columns.category],
                sentiment = %values[columns.sentiment],
                "skipping row with unknown label"
            );
            continue;
        };

        parsed.push(SurveyResponse {
            user_name: values[columns.user].clone(),
            answer: values[columns.answer].clone(),
            category,
            sentiment,
        });
    }

    debug!(
        accepted = parsed.len(),
        dropped = lines.len() - 1 - parsed.len(),
        "parsed csv rows"
    );
    Ok(parsed)
}

/// Parses and requires at least one surviving row.
pub fn ingest_text(text: &str) -> IngestResult<Vec<SurveyResponse>> {
    let responses = parse_csv(text)?;
    ensure!(!responses.is_empty(), NoValidRowsSnafu);
    Ok(responses)
}

pub fn check_extension(path: &Path) -> IngestResult<String> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    ensure!(
        file_name.ends_with(".csv"),
        NotCsvSnafu {
            path: path.display().to_string()
        }
    );
    Ok(file_name)
}

/// Decodes uploaded bytes as UTF-8. Invalid sequences become U+FFFD and a
/// leading byte-order mark is dropped.
pub fn decode_upload(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    match text.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => text.into_owned(),
    }
}

/// Reads a whole uploaded file and turns it into a replacement dataset.
/// The extension is checked before anything is read.
pub async fn load_upload(path: &Path) -> IngestResult<Upload> {
    let source = check_extension(path)?;
    let bytes = tokio::fs::read(path).await.context(ReadSnafu { path })?;
    let text = decode_upload(&bytes);
    let responses = ingest_text(&text)?;
    info!(source = %source, rows = responses.len(), "upload parsed");
    Ok(Upload { source, responses })
}
