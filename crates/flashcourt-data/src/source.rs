//! Where the player table comes from.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::instrument;

use crate::error::DataLoadError;

/// The published Google Sheets CSV export of the WNBA roster.
pub const DEFAULT_SOURCE_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vSo78o_XcjeBYWvYnDBaSolSgf6JAGvBCBSNipn9iLe7KsZkfLI3XCGbVb90oT0wsD57K6h7lR1H5wo/pub?output=csv";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// A place the raw CSV document can be fetched from.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Human-readable location, for logs and warnings.
    fn describe(&self) -> String;

    /// Fetch the raw CSV text.
    async fn fetch(&self) -> Result<String, DataLoadError>;
}

#[async_trait]
impl<T: DatasetSource + ?Sized> DatasetSource for Arc<T> {
    fn describe(&self) -> String {
        (**self).describe()
    }

    async fn fetch(&self) -> Result<String, DataLoadError> {
        (**self).fetch().await
    }
}

/// A CSV document served over HTTP(S).
pub struct HttpSource {
    url: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: &str, timeout_secs: u64) -> Result<Self, DataLoadError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| DataLoadError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            url: url.to_string(),
            timeout_secs,
            client,
        })
    }
}

#[async_trait]
impl DatasetSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch(&self) -> Result<String, DataLoadError> {
        let response = self.client.get(&self.url).send().await.map_err(|e| {
            if e.is_timeout() {
                DataLoadError::Timeout(self.timeout_secs)
            } else {
                DataLoadError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DataLoadError::HttpStatus {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| DataLoadError::Network(format!("failed to read response body: {e}")))
    }
}

/// A CSV file on local disk.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DatasetSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn fetch(&self) -> Result<String, DataLoadError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| DataLoadError::Io {
                path: self.path.display().to_string(),
                source,
            })
    }
}

/// Pick a source for a location string: `http(s)://` URLs go over the
/// network, anything else is a file path.
pub fn source_for(
    location: &str,
    timeout_secs: u64,
) -> Result<Box<dyn DatasetSource>, DataLoadError> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Ok(Box::new(HttpSource::new(location, timeout_secs)?))
    } else {
        Ok(Box::new(FileSource::new(location)))
    }
}
