/// `load_config` module: reads the static YAML config and merges environment overrides
/// into a [`Config`].
///
/// The bucket name may come from the file (`s3.bucket`) or from `MAIL_BUCKET_NAME`;
/// the environment wins when both are present. Credentials are never read here, they
/// come from the AWS default provider chain when the client is built.
///
/// All errors use `anyhow::Error` and are surfaced at the CLI boundary.
use crate::config::{Config, S3Config};
use anyhow::Result;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{error, info};

pub const BUCKET_ENV_VAR: &str = "MAIL_BUCKET_NAME";

#[derive(Deserialize)]
struct StaticConfig {
    s3: S3Section,
}

#[derive(Deserialize)]
struct S3Section {
    #[serde(default)]
    bucket: Option<String>,
    #[serde(default)]
    prefix: Option<String>,
    #[serde(default)]
    region: Option<String>,
    #[serde(default)]
    endpoint_url: Option<String>,
    #[serde(default)]
    force_path_style: bool,
}

/// Loads a static YAML config file and injects the bucket override from the environment.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => {
            info!(config_path = ?path_ref, "Config file read successfully");
            content
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    let static_conf: StaticConfig = match serde_yaml::from_str(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            conf
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            return Err(anyhow::anyhow!("Failed to parse config YAML: {e}"));
        }
    };

    let bucket = match std::env::var(BUCKET_ENV_VAR) {
        Ok(var) if !var.trim().is_empty() => {
            info!(bucket = %var, "{BUCKET_ENV_VAR} found in env, overriding config file");
            var
        }
        _ => match static_conf.s3.bucket {
            Some(bucket) if !bucket.trim().is_empty() => bucket,
            _ => {
                error!(config_path = ?path_ref, "No bucket configured");
                anyhow::bail!(
                    "No bucket configured: set s3.bucket in {:?} or the {} environment variable",
                    path_ref,
                    BUCKET_ENV_VAR
                );
            }
        },
    };

    let config = Config {
        s3: S3Config {
            bucket,
            prefix: static_conf.s3.prefix,
            region: static_conf.s3.region,
            endpoint_url: static_conf.s3.endpoint_url,
            force_path_style: static_conf.s3.force_path_style,
        },
    };

    config.trace_loaded();
    config.s3.trace_loaded();
    Ok(config)
}
