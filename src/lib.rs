//! mail-bucket: a numbered mailbox view over email objects stored in an S3-compatible bucket.
//!
//! The [`provider::S3Provider`] lists the bucket through a [`contract::ListingClient`],
//! numbers the objects 1..N in listing order and filters out excluded numbers. A populated
//! [`contract::EmailCache`] short-circuits the listing call entirely.

pub mod cache;
pub mod cli;
pub mod config;
pub mod contract;
pub mod error;
pub mod load_config;
pub mod provider;
pub mod s3;

pub use cli::{run, Cli, Commands};
pub use error::ProviderError;
