//! Upstream data sources
//!
//! The weather provider itself lives outside this crate. The service only
//! needs something that hands back raw region records, which are normalized
//! before anything else touches them.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

/// Supplier of raw, untrusted region records.
#[async_trait]
pub trait SnowDataSource: Send + Sync {
    async fn fetch_regions(&self) -> anyhow::Result<Vec<Value>>;
}

/// Reads region records from a JSON file.
///
/// Accepts either a bare array or an object with a `snowRegions` array. The
/// file is re-read on every fetch so an external sync job can replace it.
#[derive(Debug, Clone)]
pub struct FileSnowSource {
    path: PathBuf,
}

impl FileSnowSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SnowDataSource for FileSnowSource {
    async fn fetch_regions(&self) -> anyhow::Result<Vec<Value>> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("reading region snapshot {}", self.path.display()))?;
        let raw: Value = serde_json::from_slice(&bytes)
            .with_context(|| format!("parsing region snapshot {}", self.path.display()))?;

        let records = match raw {
            Value::Array(items) => items,
            Value::Object(mut fields) => match fields.remove("snowRegions") {
                Some(Value::Array(items)) => items,
                _ => bail!("region snapshot has no snowRegions array"),
            },
            _ => bail!("region snapshot must be a JSON array"),
        };

        debug!("Loaded {} region records from {}", records.len(), self.path.display());
        Ok(records)
    }
}
