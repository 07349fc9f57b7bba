//! Contract interface descriptors.
//!
//! The descriptor is a metadata JSON document in the ink! shape:
//! `contract.name` plus `spec.messages[]`, each message carrying a
//! `label`, a 4-byte `selector` and its argument list.

use crate::ParseError;
use serde_json::Value;
use std::collections::BTreeMap;

/// A single callable message in a contract interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageSpec {
    pub label: String,
    pub selector: [u8; 4],
    pub arg_labels: Vec<String>,
    pub mutates: bool,
}

/// A parsed contract interface: the set of callable messages keyed by
/// label. Pure data; binding it to an address is the gateway's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceDescriptor {
    name: Option<String>,
    messages: BTreeMap<String, MessageSpec>,
}

impl InterfaceDescriptor {
    /// Parse a metadata JSON document. Rejects missing or duplicate
    /// labels, selectors that are not exactly 4 bytes, and arguments
    /// without a string label.
    pub fn from_json(metadata: &Value) -> Result<Self, ParseError> {
        let name = metadata
            .pointer("/contract/name")
            .and_then(Value::as_str)
            .map(str::to_string);

        let raw_messages = metadata
            .pointer("/spec/messages")
            .and_then(Value::as_array)
            .ok_or_else(|| ParseError::Descriptor("missing spec.messages array".into()))?;

        let mut messages = BTreeMap::new();
        for entry in raw_messages {
            let label = entry
                .get("label")
                .and_then(Value::as_str)
                .ok_or_else(|| ParseError::Descriptor("message without a label".into()))?;
            let selector = entry
                .get("selector")
                .and_then(Value::as_str)
                .ok_or_else(|| {
                    ParseError::Descriptor(format!("message {label} without a selector"))
                })?;
            let selector = parse_selector(selector)?;
            let arg_labels = match entry.get("args") {
                None => Vec::new(),
                Some(args) => args
                    .as_array()
                    .ok_or_else(|| {
                        ParseError::Descriptor(format!("message {label} args is not an array"))
                    })?
                    .iter()
                    .map(|arg| {
                        arg.get("label")
                            .and_then(Value::as_str)
                            .map(str::to_string)
                            .ok_or_else(|| {
                                ParseError::Descriptor(format!(
                                    "message {label} has an argument without a label"
                                ))
                            })
                    })
                    .collect::<Result<Vec<_>, _>>()?,
            };
            let mutates = entry.get("mutates").and_then(Value::as_bool).unwrap_or(false);

            let spec = MessageSpec {
                label: label.to_string(),
                selector,
                arg_labels,
                mutates,
            };
            if messages.insert(label.to_string(), spec).is_some() {
                return Err(ParseError::Descriptor(format!(
                    "duplicate message label {label}"
                )));
            }
        }

        Ok(Self { name, messages })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn message(&self, label: &str) -> Option<&MessageSpec> {
        self.messages.get(label)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.messages.keys().map(String::as_str)
    }
}

fn parse_selector(raw: &str) -> Result<[u8; 4], ParseError> {
    let digits = raw.strip_prefix("0x").unwrap_or(raw);
    let bytes = hex::decode(digits)
        .map_err(|e| ParseError::Descriptor(format!("bad selector {raw}: {e}")))?;
    bytes
        .try_into()
        .map_err(|_| ParseError::Descriptor(format!("selector {raw} is not 4 bytes")))
}
