use assert_cmd::Command;
use predicates::prelude::*;
use std::sync::{Arc, Mutex};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{layer::Context, Layer, Registry};

use mail_bucket::cli::{run, Cli, Commands};

#[test]
fn list_fails_for_missing_config_file() {
    let mut cmd = Command::cargo_bin("mail-bucket").expect("Binary exists");

    cmd.arg("list")
        .arg("--config")
        .arg("/definitely/not/here/mail-bucket.yaml")
        .env_remove("MAIL_BUCKET_NAME");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config file"));
}

#[test]
fn fetch_requires_a_number() {
    let mut cmd = Command::cargo_bin("mail-bucket").expect("Binary exists");

    cmd.arg("fetch").arg("--config").arg("mail.yaml");

    cmd.assert().failure();
}

#[test]
fn help_lists_subcommands() {
    let mut cmd = Command::cargo_bin("mail-bucket").expect("Binary exists");

    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("list").and(predicate::str::contains("fetch")));
}

/// Custom Layer to collect emitted event messages.
struct EventCollector {
    events: Arc<Mutex<Vec<String>>>,
}

impl<S> Layer<S> for EventCollector
where
    S: tracing::Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        self.events.lock().unwrap().push(format!("{:?}", event));
    }
}

#[tokio::test]
async fn emits_trace_initialised_event() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let collector = EventCollector {
        events: events.clone(),
    };
    let subscriber = Registry::default().with(collector);
    let _guard = tracing::subscriber::set_default(subscriber);

    let cli = Cli {
        command: Commands::List {
            config: std::path::PathBuf::from("dummy.yaml"),
            exclude: vec![],
            json: false,
        },
    };

    let result = run(cli).await;

    assert!(result.is_err(), "dummy config must not load");
    let event_msgs = events.lock().unwrap();
    assert!(
        event_msgs.iter().any(|msg| msg.contains("trace_initialised")),
        "Expected a 'trace_initialised' trace event, got: {:?}",
        event_msgs
    );
}
