use std::fmt::{self, Write as _};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{layer::Context, EnvFilter, Layer, Registry};

const DEFAULT_FILTER: &str = "warn,engine=warn,simulator=info";

/// Engine targets whose debug output is worth printing. Everything else at
/// debug level is dropped even when `RUST_LOG` lets it through.
const TRACED_TARGETS: [&str; 2] = ["engine::session", "engine::sampler"];

/// Collects the event message plus its structured fields as `key=value`.
#[derive(Default)]
struct SpinEventVisitor {
    message: String,
    fields: Vec<(&'static str, String)>,
}

impl SpinEventVisitor {
    fn push(&mut self, field: &Field, value: String) {
        if field.name() == "message" {
            self.message.push_str(&value);
        } else {
            self.fields.push((field.name(), value));
        }
    }
}

impl Visit for SpinEventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.push(field, format!("{:?}", value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.push(field, value.to_string());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.push(field, format!("{:.2}", value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.push(field, value.to_string());
    }
}

fn render(level: &Level, target: &str, visitor: &SpinEventVisitor) -> Option<String> {
    if visitor.message.is_empty() {
        return None;
    }
    let marker = match *level {
        Level::ERROR => "❌ Error:",
        Level::WARN => "⚠️ Warning:",
        Level::INFO if target == "engine::session" => "🎡",
        Level::INFO => "ℹ️",
        Level::DEBUG if TRACED_TARGETS.iter().any(|t| target.starts_with(t)) => "🔄",
        _ => return None,
    };

    let mut line = format!("{} {} - {}", marker, target, visitor.message);
    for (key, value) in &visitor.fields {
        let _ = write!(line, " {}={}", key, value);
    }
    Some(line)
}

struct SpinLogLayer;

impl<S: Subscriber> Layer<S> for SpinLogLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let mut visitor = SpinEventVisitor::default();
        event.record(&mut visitor);

        if let Some(line) = render(metadata.level(), metadata.target(), &visitor) {
            let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
            // stdout carries the JSON report
            eprintln!("[{}] {}", timestamp, line);
        }
    }
}

pub fn setup() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let subscriber = Registry::default().with(env_filter).with(SpinLogLayer);

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("logging disabled: {}", e);
    }
}
