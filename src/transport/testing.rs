// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Egviz and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::cell::RefCell;
use std::collections::VecDeque;

use serde_json::{json, Value};

use super::{Transport, TransportError};
use crate::protocol::{Request, Route};

/// In-memory transport that replays scripted replies in call order and records every request.
#[derive(Debug, Default)]
pub(crate) struct ScriptedTransport {
    replies: RefCell<VecDeque<Result<Value, TransportError>>>,
    sent: RefCell<Vec<Request>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reply(&self, value: Value) -> &Self {
        self.replies.borrow_mut().push_back(Ok(value));
        self
    }

    pub(crate) fn ok(&self, msg: &str) -> &Self {
        self.reply(json!({ "response": "True", "msg": msg }))
    }

    pub(crate) fn rejected(&self, msg: &str) -> &Self {
        self.reply(json!({ "response": "False", "msg": msg }))
    }

    pub(crate) fn unreachable(&self) -> &Self {
        self.replies
            .borrow_mut()
            .push_back(Err(TransportError::Unreachable("connection refused".to_owned())));
        self
    }

    pub(crate) fn invalid_json(&self) -> &Self {
        self.replies
            .borrow_mut()
            .push_back(Err(TransportError::InvalidJson("expected value".to_owned())));
        self
    }

    pub(crate) fn sent(&self) -> Vec<Request> {
        self.sent.borrow().clone()
    }

    pub(crate) fn routes(&self) -> Vec<Route> {
        self.sent.borrow().iter().map(Request::route).collect()
    }

    pub(crate) fn remaining(&self) -> usize {
        self.replies.borrow().len()
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: &Request) -> Result<Value, TransportError> {
        self.sent.borrow_mut().push(request.clone());
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted reply left for {}", request.route()))
    }
}

pub(crate) fn graph_reply(description: &str, source: &str) -> Value {
    json!({
        "response": "True",
        "msg": "EGraph loaded.",
        "payload1": description,
        "payload2": source,
    })
}

pub(crate) fn no_graph_reply() -> Value {
    json!({
        "response": "False",
        "msg": "No EGraph there.",
        "payload1": null,
        "payload2": null,
    })
}

pub(crate) fn rules_reply(rules: &[(&str, &str, &str)]) -> Value {
    let payload = rules
        .iter()
        .map(|(id, lhs, rhs)| ((*id).to_owned(), json!([id, lhs, rhs])))
        .collect::<serde_json::Map<_, _>>();
    json!({ "response": "True", "msg": "Loaded rules.", "payload": payload })
}

pub(crate) fn term_reply(term: &str) -> Value {
    json!({
        "response": "True",
        "msg": "Extracted best term. Use debug (>) output to watch extraction.",
        "payload": term,
    })
}
