use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub s3: S3Config,
}

impl Config {
    pub fn trace_loaded(&self) {
        info!(bucket = %self.s3.bucket, "Loaded Config");
        debug!(?self, "Config loaded (full debug)");
    }
}

/// Where the mailbox objects live.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct S3Config {
    pub bucket: String,
    /// Only keys under this prefix are listed.
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    /// Custom endpoint for S3-compatible stores (MinIO, Ceph, ...).
    #[serde(default)]
    pub endpoint_url: Option<String>,
    #[serde(default)]
    pub force_path_style: bool,
}

impl S3Config {
    pub fn trace_loaded(&self) {
        info!(
            bucket = %self.bucket,
            prefix = self.prefix.as_deref().unwrap_or(""),
            region = self.region.as_deref().unwrap_or("default"),
            endpoint_url = self.endpoint_url.as_deref().unwrap_or("default"),
            force_path_style = self.force_path_style,
            "Loaded S3 settings"
        );
    }
}
