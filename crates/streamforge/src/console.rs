//! Console output for stream pipeline events.
//!
//! Provides a `tracing` layer that prints stage and executor events emitted
//! by `streamforge_core` as single log lines.

use std::fmt::Write as _;
use std::io::{self, Write};
use std::sync::OnceLock;

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

/// Directives added on top of `RUST_LOG`. Failed stages and executor
/// construction are `debug` events; per-stage progress is `trace` and needs
/// `RUST_LOG=streamforge_core=trace`.
const DEFAULT_DIRECTIVES: [&str; 2] = ["streamforge_core=debug", "streamforge=info"];

/// Initializes console output for stream events.
///
/// Safe to call multiple times - only the first call has effect. Does
/// nothing if another global subscriber was installed first.
pub fn init() {
    INIT.get_or_init(|| {
        let _ = tracing_subscriber::registry()
            .with(with_default_directives(EnvFilter::from_default_env()))
            .with(StreamConsoleLayer)
            .try_init();
    });
}

fn with_default_directives(filter: EnvFilter) -> EnvFilter {
    DEFAULT_DIRECTIVES
        .iter()
        .filter_map(|directive| directive.parse::<Directive>().ok())
        .fold(filter, EnvFilter::add_directive)
}

/// A tracing layer that formats stream events as plain lines on stdout.
pub struct StreamConsoleLayer;

impl<S: Subscriber> Layer<S> for StreamConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("streamforge") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_stream_event(*metadata.level(), &visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    message: Option<String>,
    stage: Option<String>,
    error: Option<String>,
    input: Option<u64>,
    output: Option<u64>,
    threads: Option<u64>,
    min_chunk_len: Option<u64>,
    parallel: Option<bool>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        match field.name() {
            "message" => self.message = Some(s),
            "stage" => self.stage = Some(s.trim_matches('"').to_string()),
            "error" => self.error = Some(s),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "input" => self.input = Some(value),
            "output" => self.output = Some(value),
            "threads" => self.threads = Some(value),
            "min_chunk_len" => self.min_chunk_len = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "parallel" {
            self.parallel = Some(value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message = Some(value.to_string()),
            "stage" => self.stage = Some(value.to_string()),
            "error" => self.error = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_stream_event(level: Level, v: &EventVisitor) -> String {
    let msg = v.message.as_deref().unwrap_or("");

    let body = match msg {
        "Stream stage complete" => format_stage_complete(v),
        "Stream stage failed" => format_stage_failed(v),
        "Built parallel executor" => format_executor(v),
        "" => return String::new(),
        other => other.to_string(),
    };
    format!("{} {:>5} {}", timestamp(), level.as_str(), body)
}

fn format_stage_complete(v: &EventVisitor) -> String {
    format!(
        "[{}] {} stage: {} in, {} out",
        mode_label(v.parallel),
        v.stage.as_deref().unwrap_or("?"),
        v.input.unwrap_or(0),
        v.output.unwrap_or(0)
    )
}

fn format_stage_failed(v: &EventVisitor) -> String {
    format!(
        "[{}] {} stage failed: {}",
        mode_label(v.parallel),
        v.stage.as_deref().unwrap_or("?"),
        v.error.as_deref().unwrap_or("unknown error")
    )
}

fn format_executor(v: &EventVisitor) -> String {
    let mut line = String::from("[parallel] executor ready");
    if let Some(threads) = v.threads {
        let _ = write!(line, ": {} threads", threads);
    }
    if let Some(chunk) = v.min_chunk_len {
        let _ = write!(line, ", min chunk {}", chunk);
    }
    line
}

fn mode_label(parallel: Option<bool>) -> &'static str {
    match parallel {
        Some(true) => "parallel",
        Some(false) => "sequential",
        None => "stream",
    }
}

fn timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs() % 100000;
            let millis = d.subsec_millis();
            format!("{:5}.{:03}", secs, millis)
        })
        .unwrap_or_else(|_| "    0.000".to_string())
}
