// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Egviz and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use serde_json::{Map, Value};

use crate::model::{RenderedGraph, RewriteRule, RuleId};

const FAILURE_SENTINEL: &str = "False";

/// Decoded result of one action: the server either accepted it (with route-specific data) or
/// rejected it with a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply<T> {
    Success { msg: String, data: T },
    Failure { msg: String },
}

impl<T> Reply<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn msg(&self) -> &str {
        match self {
            Self::Success { msg, .. } | Self::Failure { msg } => msg,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    NotAnObject,
    MissingField(&'static str),
    InvalidField { field: &'static str, reason: String },
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnObject => f.write_str("reply is not a JSON object"),
            Self::MissingField(field) => write!(f, "reply is missing field '{field}'"),
            Self::InvalidField { field, reason } => {
                write!(f, "reply field '{field}' is invalid: {reason}")
            }
        }
    }
}

impl std::error::Error for ProtocolError {}

/// Common envelope of every reply.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub success: bool,
    pub msg: String,
    pub payload: Option<Value>,
    pub payload1: Option<Value>,
    pub payload2: Option<Value>,
}

impl Envelope {
    pub fn from_value(value: Value) -> Result<Self, ProtocolError> {
        let Value::Object(mut fields) = value else {
            return Err(ProtocolError::NotAnObject);
        };

        let response = fields.remove("response").ok_or(ProtocolError::MissingField("response"))?;
        let success = !matches!(&response, Value::String(flag) if flag == FAILURE_SENTINEL);
        let msg = match fields.remove("msg") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(msg)) => msg,
            Some(other) => other.to_string(),
        };

        Ok(Self {
            success,
            msg,
            payload: take_present(&mut fields, "payload"),
            payload1: take_present(&mut fields, "payload1"),
            payload2: take_present(&mut fields, "payload2"),
        })
    }

    fn into_reply<T>(
        self,
        decode: impl FnOnce(Self) -> Result<T, ProtocolError>,
    ) -> Result<Reply<T>, ProtocolError> {
        if !self.success {
            return Ok(Reply::Failure { msg: self.msg });
        }
        let msg = self.msg.clone();
        let data = decode(self)?;
        Ok(Reply::Success { msg, data })
    }
}

fn take_present(fields: &mut Map<String, Value>, key: &str) -> Option<Value> {
    fields.remove(key).filter(|value| !value.is_null())
}

/// Replies that only carry a status message.
pub fn decode_status(value: Value) -> Result<Reply<()>, ProtocolError> {
    Envelope::from_value(value)?.into_reply(|_| Ok(()))
}

/// `/loadegraph`: `payload1` is the description, `payload2` the graph source.
pub fn decode_graph(value: Value) -> Result<Reply<RenderedGraph>, ProtocolError> {
    Envelope::from_value(value)?.into_reply(|envelope| {
        let source = match envelope.payload2 {
            Some(Value::String(source)) => source,
            Some(other) => {
                return Err(ProtocolError::InvalidField {
                    field: "payload2",
                    reason: format!("expected a string, got {}", json_kind(&other)),
                })
            }
            None => return Err(ProtocolError::MissingField("payload2")),
        };
        let description = match envelope.payload1 {
            None => None,
            Some(Value::String(description)) => Some(description),
            Some(other) => Some(other.to_string()),
        };
        Ok(RenderedGraph { description, source })
    })
}

/// `/extractterm`: `payload` is the best term.
pub fn decode_term(value: Value) -> Result<Reply<String>, ProtocolError> {
    Envelope::from_value(value)?.into_reply(|envelope| match envelope.payload {
        Some(Value::String(term)) => Ok(term),
        Some(other) => Err(ProtocolError::InvalidField {
            field: "payload",
            reason: format!("expected a string, got {}", json_kind(&other)),
        }),
        None => Err(ProtocolError::MissingField("payload")),
    })
}

/// `/getrules`: `payload` maps id to `[id, lhs, rhs]`, in the server's order.
pub fn decode_rules(value: Value) -> Result<Reply<Vec<RewriteRule>>, ProtocolError> {
    Envelope::from_value(value)?.into_reply(|envelope| {
        let entries = match envelope.payload {
            Some(Value::Object(entries)) => entries,
            Some(other) => {
                return Err(ProtocolError::InvalidField {
                    field: "payload",
                    reason: format!("expected an object, got {}", json_kind(&other)),
                })
            }
            None => return Err(ProtocolError::MissingField("payload")),
        };

        entries.into_iter().map(|(key, entry)| decode_rule_entry(&key, entry)).collect()
    })
}

fn decode_rule_entry(key: &str, entry: Value) -> Result<RewriteRule, ProtocolError> {
    let invalid = |reason: String| ProtocolError::InvalidField { field: "payload", reason };

    let Value::Array(parts) = entry else {
        return Err(invalid(format!("rule '{key}' is not an array")));
    };
    let [id, lhs, rhs, ..] = parts.as_slice() else {
        return Err(invalid(format!("rule '{key}' has {} elements, expected 3", parts.len())));
    };

    let id = match id {
        Value::String(id) => RuleId::new(id),
        Value::Number(id) => RuleId::new(id.to_string()),
        other => return Err(invalid(format!("rule '{key}' id is {}", json_kind(other)))),
    };
    let (Value::String(lhs), Value::String(rhs)) = (lhs, rhs) else {
        return Err(invalid(format!("rule '{key}' patterns must be strings")));
    };

    Ok(RewriteRule::new(id, lhs.as_str(), rhs.as_str()))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
