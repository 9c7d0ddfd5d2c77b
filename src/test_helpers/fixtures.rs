use std::collections::HashMap;

use serde_json::{json, Value as JsonValue};

use crate::app::model::{Attributes, MessageAttribute, SnsEnvelope};

pub(crate) fn success_message() -> SnsEnvelope {
    parse(include_str!("fixtures/success_message.json"))
}

pub(crate) fn failure_message() -> SnsEnvelope {
    parse(include_str!("fixtures/failure_message.json"))
}

pub(crate) fn success_attributes() -> Attributes {
    attributes(include_str!("fixtures/success_attributes.json"))
}

pub(crate) fn success_attributes_with_data() -> Attributes {
    attributes(include_str!("fixtures/success_attributes_with_data.json"))
}

pub(crate) fn package_events() -> JsonValue {
    parse(include_str!("fixtures/package_events.json"))
}

/// Notification for an arbitrary (package, service, outcome).
pub(crate) fn message(package_id: &str, service: &str, outcome: &str) -> SnsEnvelope {
    let envelope = json!({
        "Records": [{
            "EventSource": "aws:sns",
            "Sns": {
                "Type": "Notification",
                "MessageAttributes": {
                    "package_id": {"Type": "String", "Value": package_id},
                    "service": {"Type": "String", "Value": service},
                    "outcome": {"Type": "String", "Value": outcome}
                }
            }
        }]
    });

    serde_json::from_value(envelope).expect("Failed to parse notification")
}

fn attributes(json: &str) -> Attributes {
    let attributes = parse::<HashMap<String, MessageAttribute>>(json);
    Attributes::from_message_attributes(&attributes).expect("Failed to parse attributes")
}

fn parse<T: serde::de::DeserializeOwned>(json: &str) -> T {
    serde_json::from_str(json).expect("Failed to parse fixture")
}
