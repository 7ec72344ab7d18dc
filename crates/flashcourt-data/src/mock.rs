//! In-memory source for testing.

use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;

use crate::error::DataLoadError;
use crate::source::DatasetSource;

/// A source that serves a fixed CSV document, or fails every fetch.
///
/// Counts fetches so callers can check caching behaviour.
pub struct MockSource {
    content: Option<String>,
    fetch_count: AtomicU32,
}

impl MockSource {
    /// A source that always returns `content`.
    pub fn with_csv(content: &str) -> Self {
        Self {
            content: Some(content.to_string()),
            fetch_count: AtomicU32::new(0),
        }
    }

    /// A source whose every fetch fails with a network error.
    pub fn failing() -> Self {
        Self {
            content: None,
            fetch_count: AtomicU32::new(0),
        }
    }

    /// Number of fetches made so far.
    pub fn fetch_count(&self) -> u32 {
        self.fetch_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl DatasetSource for MockSource {
    fn describe(&self) -> String {
        "mock".to_string()
    }

    async fn fetch(&self) -> Result<String, DataLoadError> {
        self.fetch_count.fetch_add(1, Ordering::Relaxed);
        self.content
            .clone()
            .ok_or_else(|| DataLoadError::Network("mock source unavailable".to_string()))
    }
}
