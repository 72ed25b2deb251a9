use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::ingest::{self, IngestResult, Upload};
use crate::models::{Category, SurveyResponse};
use crate::seed;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Overview,
    Category(Category),
}

/// An immutable view of the dataset at one revision.
#[derive(Debug, Clone)]
pub struct DatasetSnapshot {
    pub revision: Uuid,
    pub loaded_at: DateTime<Utc>,
    pub source: String,
    pub responses: Arc<[SurveyResponse]>,
}

impl DatasetSnapshot {
    fn new(source: &str, responses: Vec<SurveyResponse>) -> Self {
        Self {
            revision: Uuid::new_v4(),
            loaded_at: Utc::now(),
            source: source.to_string(),
            responses: responses.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Replaced { source: String, count: usize },
    Rejected { message: String },
}

/// Owns the working dataset and the selected view. Datasets are only ever
/// swapped whole; readers hold their own snapshot.
#[derive(Debug)]
pub struct Dashboard {
    snapshot: DatasetSnapshot,
    view: View,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new(seed::BUNDLED_SOURCE, seed::bundled_responses())
    }
}

impl Dashboard {
    pub fn new(source: &str, responses: Vec<SurveyResponse>) -> Self {
        Self {
            snapshot: DatasetSnapshot::new(source, responses),
            view: View::Overview,
        }
    }

    pub fn snapshot(&self) -> DatasetSnapshot {
        self.snapshot.clone()
    }

    pub fn responses(&self) -> &[SurveyResponse] {
        &self.snapshot.responses
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn select(&mut self, view: View) {
        self.view = view;
    }

    pub fn replace_dataset(&mut self, upload: Upload) -> usize {
        let count = upload.responses.len();
        let previous = std::mem::replace(
            &mut self.snapshot,
            DatasetSnapshot::new(&upload.source, upload.responses),
        );
        info!(
            source = %self.snapshot.source,
            rows = count,
            previous_rows = previous.responses.len(),
            revision = %self.snapshot.revision,
            "dataset replaced"
        );
        count
    }

    pub fn apply_upload(&mut self, result: IngestResult<Upload>) -> UploadOutcome {
        match result {
            Ok(upload) => {
                let source = upload.source.clone();
                let count = self.replace_dataset(upload);
                UploadOutcome::Replaced { source, count }
            }
            Err(err) => {
                warn!(error = %err, "upload rejected, keeping current dataset");
                UploadOutcome::Rejected {
                    message: err.to_string(),
                }
            }
        }
    }

    pub async fn upload(&mut self, path: &Path) -> UploadOutcome {
        let result = ingest::load_upload(path).await;
        self.apply_upload(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::IngestError;
    use crate::models::Sentiment;

    fn upload(count: usize) -> Upload {
        Upload {
            source: "fresh.csv".to_string(),
            responses: (0..count)
                .map(|i| {
                    SurveyResponse::new(&format!("user{i}"), "fine", Category::Support, Sentiment::Neutral)
                })
                .collect(),
        }
    }

    #[test]
    fn starts_on_overview_with_bundled_data() {
        let dashboard = Dashboard::default();
        assert_eq!(dashboard.view(), View::Overview);
        assert_eq!(dashboard.responses().len(), 52);
        assert_eq!(dashboard.snapshot().source, seed::BUNDLED_SOURCE);
    }

    #[test]
    fn successful_upload_swaps_whole_dataset() {
        let mut dashboard = Dashboard::default();
        let before = dashboard.snapshot();

        let outcome = dashboard.apply_upload(Ok(upload(2)));
        assert_eq!(
            outcome,
            UploadOutcome::Replaced {
                source: "fresh.csv".to_string(),
                count: 2
            }
        );
        assert_eq!(dashboard.responses().len(), 2);
        assert_ne!(dashboard.snapshot().revision, before.revision);
        // Earlier snapshots are untouched by the swap.
        assert_eq!(before.responses.len(), 52);
    }

    #[test]
    fn rejected_upload_keeps_dataset() {
        let mut dashboard = Dashboard::default();
        let before = dashboard.snapshot();

        let outcome = dashboard.apply_upload(Err(IngestError::NoValidRows));
        assert_eq!(
            outcome,
            UploadOutcome::Rejected {
                message: "No valid data found in the CSV file".to_string()
            }
        );
        let after = dashboard.snapshot();
        assert_eq!(after.revision, before.revision);
        assert_eq!(after.responses.len(), 52);
    }

    #[test]
    fn view_selection_is_independent_of_data() {
        let mut dashboard = Dashboard::default();
        dashboard.select(View::Category(Category::Features));
        dashboard.apply_upload(Ok(upload(1)));
        assert_eq!(dashboard.view(), View::Category(Category::Features));
    }

    #[tokio::test]
    async fn upload_from_wrong_extension_is_rejected() {
        let mut dashboard = Dashboard::default();
        let outcome = dashboard.upload(Path::new("notes.txt")).await;
        assert!(matches!(outcome, UploadOutcome::Rejected { .. }));
        assert_eq!(dashboard.responses().len(), 52);
    }
}
