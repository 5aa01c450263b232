//! One JSON object per finished span.
//!
//! Each line is self-contained so the file can be tailed, grepped or loaded with
//! `jq -s`:
//!
//! ```json
//! {"service":"userdeck","name":"worker_handle_message","traceId":"…","spanId":"…",
//!  "parentSpanId":"…","start":"2026-01-05T10:00:00.000000Z","durationUs":1834,
//!  "status":"ok","attributes":{"message_type":"load_users"},"events":[]}
//! ```

use chrono::{DateTime, SecondsFormat, Utc};
use opentelemetry::trace::{SpanId, Status};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use opentelemetry_sdk::resource::Resource;
use serde_json::{json, Map, Value as JsonValue};

/// Turns finished spans into one JSON object per line.
pub struct SpanFormatter {
    service: String,
}

impl SpanFormatter {
    /// Takes the service name from the resource's `service.name`.
    pub fn new(resource: &Resource) -> Self {
        let service = resource
            .iter()
            .find(|(key, _)| key.as_str() == "service.name")
            .map_or_else(|| "unknown".to_string(), |(_, value)| value.to_string());
        Self { service }
    }

    /// # Parameters
    ///
    /// * `span` - Finished span handed over by the exporter
    ///
    /// # Returns
    ///
    /// A flat JSON object: service and span name, trace, span and parent ids (the
    /// parent is `null` for roots), start time, duration in microseconds, status,
    /// attributes and events.
    pub fn format_span(&self, span: &SpanData) -> JsonValue {
        let parent = if span.parent_span_id == SpanId::INVALID {
            JsonValue::Null
        } else {
            json!(format!("{:016x}", span.parent_span_id))
        };
        let duration = span
            .end_time
            .duration_since(span.start_time)
            .unwrap_or_default();
        let (status, message) = match &span.status {
            Status::Unset => ("unset", None),
            Status::Ok => ("ok", None),
            Status::Error { description } => ("error", Some(description.to_string())),
        };

        let events: Vec<JsonValue> = span
            .events
            .iter()
            .map(|event| {
                json!({
                    "name": event.name,
                    "time": timestamp(event.timestamp),
                    "attributes": attributes(&event.attributes),
                })
            })
            .collect();

        let mut line = json!({
            "service": self.service,
            "name": span.name,
            "traceId": format!("{:032x}", span.span_context.trace_id()),
            "spanId": format!("{:016x}", span.span_context.span_id()),
            "parentSpanId": parent,
            "start": timestamp(span.start_time),
            "durationUs": u64::try_from(duration.as_micros()).unwrap_or(u64::MAX),
            "status": status,
            "attributes": attributes(&span.attributes),
            "events": events,
        });
        if let (Some(message), Some(object)) = (message, line.as_object_mut()) {
            object.insert("statusMessage".to_string(), json!(message));
        }
        line
    }
}

fn timestamp(time: std::time::SystemTime) -> String {
    DateTime::<Utc>::from(time).to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn attributes(attributes: &[KeyValue]) -> JsonValue {
    let map: Map<String, JsonValue> = attributes
        .iter()
        .map(|kv| (kv.key.to_string(), attribute_value(&kv.value)))
        .collect();
    JsonValue::Object(map)
}

fn attribute_value(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => json!(b),
        Value::I64(i) => json!(i),
        Value::F64(f) => json!(f),
        Value::String(s) => json!(s.as_str()),
        Value::Array(_) => json!(value.to_string()),
    }
}

impl std::fmt::Debug for SpanFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpanFormatter").field("service", &self.service).finish()
    }
}
