use crate::contract::{EmailMap, EmailNumber};
use crate::load_config::load_config;
use crate::provider::{retrieve_email, S3Provider};
use crate::s3::{connect, S3Downloader, S3ListingClient};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

/// CLI for mail-bucket: a numbered mailbox view over an S3 bucket.
#[derive(Parser)]
#[clap(
    name = "mail-bucket",
    version,
    about = "List and fetch email objects stored in an S3-compatible bucket"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the numbered emails in the bucket
    List {
        /// Path to the YAML config file
        #[clap(long)]
        config: PathBuf,
        /// Email number to leave out of the listing (repeatable)
        #[clap(long, allow_negative_numbers = true)]
        exclude: Vec<EmailNumber>,
        /// Print the listing as a JSON object keyed by number
        #[clap(long)]
        json: bool,
    },
    /// Write the raw body of one email to stdout or a file
    Fetch {
        /// Path to the YAML config file
        #[clap(long)]
        config: PathBuf,
        /// Number of the email, as shown by `list`
        number: EmailNumber,
        /// Write to this file instead of stdout
        #[clap(long)]
        output: Option<PathBuf>,
    },
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::List {
            config,
            exclude,
            json,
        } => {
            let config = load_config(config)?;
            let client = connect(&config.s3).await;
            let provider = S3Provider::new(S3ListingClient::new(client, &config.s3));

            let emails = provider.list_emails(&exclude).await?;
            tracing::info!(command = "list", emails = emails.len(), "Listing complete");
            let rendered = if json {
                serde_json::to_string_pretty(&emails).context("Failed to serialise listing")?
            } else {
                render_listing(&emails)
            };
            println!("{rendered}");
            Ok(())
        }
        Commands::Fetch {
            config,
            number,
            output,
        } => {
            let config = load_config(config)?;
            let client = connect(&config.s3).await;
            let downloader = S3Downloader::new(client.clone(), &config.s3);
            let provider = S3Provider::new(S3ListingClient::new(client, &config.s3));

            let email = provider.email(number).await?;
            let body = retrieve_email(&downloader, &email).await?;
            match output {
                Some(path) => std::fs::write(&path, &body)
                    .with_context(|| format!("Failed to write email to {}", path.display()))?,
                None => std::io::stdout()
                    .write_all(&body)
                    .context("Failed to write email to stdout")?,
            }
            tracing::info!(command = "fetch", number, key = %email.id, "Fetch complete");
            Ok(())
        }
    }
}

/// One `<number> <size> <key>` line per email, in number order.
pub fn render_listing(emails: &EmailMap) -> String {
    emails
        .iter()
        .map(|(number, email)| format!("{number} {} {}", email.size, email.id))
        .collect::<Vec<_>>()
        .join("\n")
}
