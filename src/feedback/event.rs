//! The feedback record written to the log sink.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

/// Marker prefixed to every feedback line in the log stream.
pub const FEEDBACK_MARKER: &str = "[feedback]";

/// User-agent recorded when the request carries none.
pub const UNKNOWN_USER_AGENT: &str = "unknown";

const TS_FIELD: &str = "ts";
const UA_FIELD: &str = "ua";

/// A caller's rating of a symbol.
///
/// Only `up` and `down` are expected, but nothing rejects other values;
/// they are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Up,
    Down,
    Other(String),
}

impl Verdict {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "up" => Verdict::Up,
            "down" => Verdict::Down,
            other => Verdict::Other(other.to_string()),
        }
    }

    /// Low-cardinality label for metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            Verdict::Up => "up",
            Verdict::Down => "down",
            Verdict::Other(_) => "other",
        }
    }
}

/// One ingested feedback event.
///
/// Built from whatever JSON the caller sent plus two server-observed
/// fields. Caller fields go in first and `ts`/`ua` are applied last, so a
/// caller can never supply either of them.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackEvent {
    fields: Map<String, Value>,
    ts: i64,
    ua: String,
}

impl FeedbackEvent {
    /// Shallow-merge a parsed request body with the server-assigned fields.
    ///
    /// Objects contribute their keys, arrays and strings contribute one key
    /// per index, and every other JSON value contributes nothing.
    ///
    /// Strings are indexed by Unicode scalar value (`char`), not by UTF-16
    /// code unit, so `"😀"` yields the single key `"0"`.
    pub fn from_payload(payload: Value, ts: i64, ua: impl Into<String>) -> Self {
        let mut fields = match payload {
            Value::Object(map) => map,
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), v))
                .collect(),
            Value::String(s) => s
                .chars()
                .enumerate()
                .map(|(i, c)| (i.to_string(), Value::String(c.to_string())))
                .collect(),
            Value::Null | Value::Bool(_) | Value::Number(_) => Map::new(),
        };

        fields.remove(TS_FIELD);
        fields.remove(UA_FIELD);

        Self {
            fields,
            ts,
            ua: ua.into(),
        }
    }

    /// Server time the body was parsed, in epoch milliseconds.
    pub fn ts(&self) -> i64 {
        self.ts
    }

    /// User-agent the request arrived with.
    pub fn ua(&self) -> &str {
        &self.ua
    }

    pub fn symbol(&self) -> Option<&str> {
        self.fields.get("symbol").and_then(Value::as_str)
    }

    pub fn verdict(&self) -> Option<Verdict> {
        self.fields.get("verdict").and_then(Value::as_str).map(Verdict::parse)
    }

    pub fn reason(&self) -> Option<&str> {
        self.fields.get("reason").and_then(Value::as_str)
    }

    pub fn user_id(&self) -> Option<&str> {
        self.fields.get("userId").and_then(Value::as_str)
    }

    /// Caller-supplied fields, excluding `ts` and `ua`.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// The event as a flat JSON object.
    pub fn to_value(&self) -> Value {
        let mut map = self.fields.clone();
        map.insert(TS_FIELD.to_string(), Value::from(self.ts));
        map.insert(UA_FIELD.to_string(), Value::from(self.ua.clone()));
        Value::Object(map)
    }

    /// The exact line written to the log stream.
    pub fn log_line(&self) -> Result<String, serde_json::Error> {
        Ok(format!("{} {}", FEEDBACK_MARKER, serde_json::to_string(self)?))
    }
}

impl Serialize for FeedbackEvent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 2))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.serialize_entry(TS_FIELD, &self.ts)?;
        map.serialize_entry(UA_FIELD, &self.ua)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_server_fields_override_caller() {
        let event = FeedbackEvent::from_payload(
            json!({"symbol": "AAPL", "ts": 1, "ua": "spoofed"}),
            1_700_000_000_000,
            "curl/8.0",
        );

        assert_eq!(event.ts(), 1_700_000_000_000);
        assert_eq!(event.ua(), "curl/8.0");
        assert_eq!(
            event.to_value(),
            json!({"symbol": "AAPL", "ts": 1_700_000_000_000_i64, "ua": "curl/8.0"})
        );
    }

    #[test]
    fn test_unknown_fields_pass_through() {
        let event = FeedbackEvent::from_payload(
            json!({"symbol": 42, "verdict": "sideways", "extra": [1, 2]}),
            5,
            UNKNOWN_USER_AGENT,
        );

        assert_eq!(event.symbol(), None);
        assert_eq!(event.verdict(), Some(Verdict::Other("sideways".into())));
        assert_eq!(event.fields()["extra"], json!([1, 2]));
        assert_eq!(event.fields()["symbol"], json!(42));
    }

    #[test]
    fn test_non_object_payloads_spread_like_objects() {
        let array = FeedbackEvent::from_payload(json!(["a", true]), 1, "x");
        assert_eq!(array.to_value(), json!({"0": "a", "1": true, "ts": 1, "ua": "x"}));

        let string = FeedbackEvent::from_payload(json!("hi"), 1, "x");
        assert_eq!(string.to_value(), json!({"0": "h", "1": "i", "ts": 1, "ua": "x"}));

        for scalar in [json!(null), json!(false), json!(3.5)] {
            let event = FeedbackEvent::from_payload(scalar, 1, "x");
            assert_eq!(event.to_value(), json!({"ts": 1, "ua": "x"}));
        }
    }

    #[test]
    fn test_string_payload_spreads_by_char() {
        let event = FeedbackEvent::from_payload(json!("a😀"), 1, "x");
        assert_eq!(event.to_value(), json!({"0": "a", "1": "😀", "ts": 1, "ua": "x"}));
    }

    #[test]
    fn test_log_line_format() {
        let event = FeedbackEvent::from_payload(json!({"verdict": "up"}), 10, "agent");
        let line = event.log_line().unwrap();

        let json_part = line.strip_prefix("[feedback] ").expect("marker prefix");
        let parsed: Value = serde_json::from_str(json_part).unwrap();
        assert_eq!(parsed, json!({"verdict": "up", "ts": 10, "ua": "agent"}));
    }

    #[test]
    fn test_verdict_labels() {
        assert_eq!(Verdict::parse("up").as_label(), "up");
        assert_eq!(Verdict::parse("down").as_label(), "down");
        assert_eq!(Verdict::parse("UP").as_label(), "other");
    }
}
