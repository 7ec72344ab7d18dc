//! Dataset loading and the process-wide cache.

use std::sync::Arc;

use tokio::sync::OnceCell;

use flashcourt_core::model::Dataset;

use crate::error::DataLoadError;
use crate::parser::{parse_dataset, LoadReport};
use crate::source::DatasetSource;

/// Result of a load attempt that never fails outright.
#[derive(Debug, Clone, Default)]
pub struct LoadedDataset {
    pub dataset: Arc<Dataset>,
    pub report: LoadReport,
    /// User-facing message when the load failed; the dataset is empty then.
    pub warning: Option<String>,
}

impl LoadedDataset {
    pub fn is_available(&self) -> bool {
        !self.dataset.is_empty()
    }
}

/// Fetch and parse a dataset, propagating any failure.
pub async fn try_load(source: &dyn DatasetSource) -> Result<(Dataset, LoadReport), DataLoadError> {
    let content = source.fetch().await?;
    let (dataset, report) = parse_dataset(&content)?;
    tracing::info!(source = %source.describe(), %report, "loaded player table");
    Ok((dataset, report))
}

/// Fetch and parse a dataset. Failures yield an empty dataset and a warning.
pub async fn load(source: &dyn DatasetSource) -> LoadedDataset {
    match try_load(source).await {
        Ok((dataset, report)) => LoadedDataset {
            dataset: Arc::new(dataset),
            report,
            warning: None,
        },
        Err(e) => {
            tracing::error!(source = %source.describe(), "failed to load player table: {e}");
            LoadedDataset {
                dataset: Arc::new(Dataset::empty()),
                report: LoadReport::default(),
                warning: Some(format!("Failed to load data from {}: {e}", source.describe())),
            }
        }
    }
}

/// Loads the dataset once and hands out the same copy afterwards.
///
/// A failed load is cached too: the source is not contacted again for the
/// lifetime of the cache.
pub struct DatasetCache {
    source: Box<dyn DatasetSource>,
    cell: OnceCell<LoadedDataset>,
}

impl DatasetCache {
    pub fn new(source: Box<dyn DatasetSource>) -> Self {
        Self {
            source,
            cell: OnceCell::new(),
        }
    }

    /// The cached dataset, loading it on first use.
    pub async fn get(&self) -> &LoadedDataset {
        self.cell.get_or_init(|| load(self.source.as_ref())).await
    }

    /// Whether a load has already completed.
    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }

    pub fn source(&self) -> &dyn DatasetSource {
        self.source.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockSource;

    const CSV: &str = "Player,Team,Age,Ht,Exp,College,Pos,Draft Pick\n\
A,X,25,5'10\",2,Duke,G,3rd overall\n\
B,Y,30,6'2\",8,UConn,C,5th overall\n\
B,Y,30,6'2\",8,UConn,C,5th overall\n";

    #[tokio::test]
    async fn load_parses_and_reports() {
        let source = MockSource::with_csv(CSV);
        let loaded = load(&source).await;
        assert!(loaded.is_available());
        assert!(loaded.warning.is_none());
        assert_eq!(loaded.dataset.len(), 2);
        assert_eq!(loaded.report.duplicates, 1);
    }

    #[tokio::test]
    async fn failed_fetch_yields_empty_dataset_and_warning() {
        let source = MockSource::failing();
        let loaded = load(&source).await;
        assert!(!loaded.is_available());
        assert!(loaded.dataset.is_empty());
        let warning = loaded.warning.unwrap();
        assert!(warning.contains("mock source unavailable"), "{warning}");
    }

    #[tokio::test]
    async fn malformed_document_yields_empty_dataset() {
        let source = MockSource::with_csv("name,score\nA,1\n");
        let loaded = load(&source).await;
        assert!(loaded.dataset.is_empty());
        assert!(loaded.warning.unwrap().contains("missing required columns"));
    }

    #[tokio::test]
    async fn try_load_propagates_errors() {
        let source = MockSource::failing();
        assert!(matches!(
            try_load(&source).await,
            Err(DataLoadError::Network(_))
        ));
    }

    #[tokio::test]
    async fn cache_fetches_once() {
        let source = Arc::new(MockSource::with_csv(CSV));
        let cache = DatasetCache::new(Box::new(Arc::clone(&source)));
        assert!(!cache.is_loaded());

        let first = Arc::clone(&cache.get().await.dataset);
        let second = Arc::clone(&cache.get().await.dataset);
        assert!(Arc::ptr_eq(&first, &second));
        assert!(cache.is_loaded());
        assert_eq!(source.fetch_count(), 1);
    }

    #[tokio::test]
    async fn cache_keeps_a_failed_load() {
        let source = Arc::new(MockSource::failing());
        let cache = DatasetCache::new(Box::new(Arc::clone(&source)));
        assert!(cache.get().await.warning.is_some());
        assert!(cache.get().await.dataset.is_empty());
        assert_eq!(source.fetch_count(), 1);
        assert_eq!(cache.source().describe(), "mock");
    }
}
