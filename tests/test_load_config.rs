use serial_test::serial;
use std::env;
use std::fs::write;
use tempfile::NamedTempFile;

use mail_bucket::load_config::{load_config, BUCKET_ENV_VAR};

fn config_file(yaml: &str) -> NamedTempFile {
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), yaml).unwrap();
    config_file
}

/// A complete static config loads as written when no override is set.
#[test]
#[serial]
fn test_load_config_reads_all_s3_settings() {
    env::remove_var(BUCKET_ENV_VAR);
    let config_file = config_file(
        r#"
s3:
  bucket: mail-archive
  prefix: inbox/
  region: eu-west-1
  endpoint_url: "http://localhost:9000"
  force_path_style: true
"#,
    );

    let config = load_config(config_file.path()).expect("Config should load");

    assert_eq!(config.s3.bucket, "mail-archive");
    assert_eq!(config.s3.prefix.as_deref(), Some("inbox/"));
    assert_eq!(config.s3.region.as_deref(), Some("eu-west-1"));
    assert_eq!(config.s3.endpoint_url.as_deref(), Some("http://localhost:9000"));
    assert!(config.s3.force_path_style);
}

/// Optional settings default to unset.
#[test]
#[serial]
fn test_load_config_minimal() {
    env::remove_var(BUCKET_ENV_VAR);
    let config_file = config_file("s3:\n  bucket: mail-archive\n");

    let config = load_config(config_file.path()).expect("Config should load");

    assert_eq!(config.s3.bucket, "mail-archive");
    assert_eq!(config.s3.prefix, None);
    assert_eq!(config.s3.region, None);
    assert_eq!(config.s3.endpoint_url, None);
    assert!(!config.s3.force_path_style);
}

/// The bucket from the environment wins over the file.
#[test]
#[serial]
fn test_load_config_env_overrides_bucket() {
    env::set_var(BUCKET_ENV_VAR, "from-env");
    let config_file = config_file("s3:\n  bucket: from-file\n  prefix: inbox/\n");

    let config = load_config(config_file.path());
    env::remove_var(BUCKET_ENV_VAR);

    let config = config.expect("Config should load");
    assert_eq!(config.s3.bucket, "from-env");
    assert_eq!(config.s3.prefix.as_deref(), Some("inbox/"));
}

#[test]
#[serial]
fn test_load_config_errors_without_bucket() {
    env::remove_var(BUCKET_ENV_VAR);
    let config_file = config_file("s3:\n  prefix: inbox/\n");

    let err = load_config(config_file.path()).unwrap_err();
    let msg = err.to_string();

    assert!(
        msg.contains("bucket") && msg.contains(BUCKET_ENV_VAR),
        "Must error for missing bucket, got: {msg}"
    );
}

#[test]
#[serial]
fn test_load_config_errors_for_invalid_file() {
    env::set_var(BUCKET_ENV_VAR, "present");
    let config_file = config_file("not-yaml: [:::");

    let err = load_config(config_file.path()).unwrap_err();
    env::remove_var(BUCKET_ENV_VAR);
    let msg = err.to_string();

    assert!(
        msg.contains("parse") || msg.contains("YAML"),
        "Parse error expected, got: {msg}"
    );
}

#[test]
#[serial]
fn test_load_config_errors_for_missing_file() {
    let err = load_config("/definitely/not/here/mail-bucket.yaml").unwrap_err();
    let msg = err.to_string();

    assert!(msg.contains("read"), "Read error expected, got: {msg}");
}
